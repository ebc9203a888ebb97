use thiserror::Error;

#[derive(Error, Debug)]
pub enum SoilCheckError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("PDF rendering error: {0}")]
    Pdf(String),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("{0}")]
    Request(#[from] axum::extract::rejection::JsonRejection),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{0}")]
    MissingFields(&'static str),

    #[error("Email already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,
}

pub type Result<T> = std::result::Result<T, SoilCheckError>;
