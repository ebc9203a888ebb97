//! Identity: password hashing, user registration and bearer tokens.

use crate::config::AuthConfig;
use crate::db::Database;
use crate::error::{Result, SoilCheckError};
use crate::models::{Claims, User};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{info, warn};

/// Issues and verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_days)
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let claims = Claims {
            user_id: user.id.clone(),
            email: user.email.clone(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Decode and validate a token. Any failure, including expiry, is
    /// reported as `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                warn!(error = %e, "Rejected bearer token");
                SoilCheckError::Unauthorized
            })
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// User accounts backed by the local database.
#[derive(Clone)]
pub struct UserDirectory {
    db: Database,
    bcrypt_cost: u32,
}

impl UserDirectory {
    pub fn new(db: Database, bcrypt_cost: u32) -> Self {
        Self { db, bcrypt_cost }
    }

    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(SoilCheckError::MissingFields("All fields required"));
        }

        if self.db.find_user_by_email(email)?.is_some() {
            return Err(SoilCheckError::AlreadyExists);
        }

        let hash = bcrypt::hash(password, self.bcrypt_cost)?;
        let user = User::new(name, email, hash);
        self.db.create_user(&user)?;

        info!(user_id = %user.id, email = %user.email, "Registered user");
        Ok(user)
    }

    pub fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(SoilCheckError::MissingFields("Email and password required"));
        }

        let user = match self.db.find_user_by_email(email)? {
            Some(user) => user,
            None => {
                warn!(email, "Login for unknown email");
                return Err(SoilCheckError::InvalidCredentials);
            }
        };

        if !bcrypt::verify(password, &user.password_hash)? {
            warn!(email, "Login with wrong password");
            return Err(SoilCheckError::InvalidCredentials);
        }

        info!(user_id = %user.id, "User logged in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> UserDirectory {
        UserDirectory::new(Database::open_in_memory().unwrap(), 4)
    }

    #[test]
    fn register_then_authenticate() {
        let users = directory();
        let registered = users.register("Asha", "asha@example.com", "pw123").unwrap();
        assert_ne!(registered.password_hash, "pw123");

        let user = users.authenticate("asha@example.com", "pw123").unwrap();
        assert_eq!(user.id, registered.id);
    }

    #[test]
    fn register_requires_all_fields() {
        let users = directory();
        assert!(matches!(
            users.register("", "a@example.com", "pw"),
            Err(SoilCheckError::MissingFields(_))
        ));
        assert!(matches!(
            users.register("A", "a@example.com", ""),
            Err(SoilCheckError::MissingFields(_))
        ));
    }

    #[test]
    fn duplicate_registration_fails() {
        let users = directory();
        users.register("A", "dup@example.com", "pw").unwrap();
        assert!(matches!(
            users.register("B", "dup@example.com", "other"),
            Err(SoilCheckError::AlreadyExists)
        ));
    }

    #[test]
    fn wrong_password_and_unknown_email_are_invalid_credentials() {
        let users = directory();
        users.register("A", "a@example.com", "right").unwrap();

        assert!(matches!(
            users.authenticate("a@example.com", "wrong"),
            Err(SoilCheckError::InvalidCredentials)
        ));
        assert!(matches!(
            users.authenticate("ghost@example.com", "right"),
            Err(SoilCheckError::InvalidCredentials)
        ));
    }

    #[test]
    fn issued_token_verifies() {
        let tokens = TokenService::new("secret", 7);
        let user = User::new("A", "a@example.com", "hash".into());

        let claims = tokens.verify(&tokens.issue(&user).unwrap()).unwrap();
        assert_eq!(claims.user_id, user.id);
        assert_eq!(claims.email, "a@example.com");
    }

    #[test]
    fn expired_token_is_rejected() {
        let tokens = TokenService::new("secret", -1);
        let user = User::new("A", "a@example.com", "hash".into());
        let token = tokens.issue(&user).unwrap();
        assert!(matches!(tokens.verify(&token), Err(SoilCheckError::Unauthorized)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let user = User::new("A", "a@example.com", "hash".into());
        let token = TokenService::new("one", 7).issue(&user).unwrap();
        assert!(TokenService::new("two", 7).verify(&token).is_err());
        assert!(TokenService::new("one", 7).verify("not-a-token").is_err());
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }
}
