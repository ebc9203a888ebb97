//! HTTP server wiring: shared state, router and lifecycle.

use crate::auth::{TokenService, UserDirectory};
use crate::config::Config;
use crate::db::Database;
use crate::error::Result;
use crate::logic::SuitabilityEngine;
use crate::routes;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Database,
    pub users: UserDirectory,
    pub tokens: TokenService,
    pub engine: Arc<SuitabilityEngine>,
}

impl AppState {
    pub fn new(config: Config, db: Database) -> Self {
        let users = UserDirectory::new(db.clone(), config.auth.bcrypt_cost);
        let tokens = TokenService::from_config(&config.auth);

        Self {
            config: Arc::new(config),
            db,
            users,
            tokens,
            engine: Arc::new(SuitabilityEngine::new()),
        }
    }
}

/// Configured origins as header values. Credentials are allowed, so a
/// wildcard is never a valid entry.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .map(|o| o.trim().trim_end_matches('/'))
        .filter_map(|o| {
            if o == "*" {
                warn!("Ignoring wildcard CORS origin; list origins explicitly");
                return None;
            }
            match o.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = o, "Ignoring invalid CORS origin");
                    None
                }
            }
        })
        .collect()
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = allowed_origins(origins);

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);
    let body_limit = state.config.server.body_limit_bytes;

    Router::new()
        .route("/api/health", get(routes::health))
        // Identity
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login))
        // Analysis
        .route(
            "/api/analyze-suitability",
            post(routes::analysis::analyze_suitability),
        )
        // Reports
        .route("/api/generate-report", post(routes::reports::generate_report))
        .route("/api/my-reports", get(routes::reports::my_reports))
        .route("/api/my-reports/{id}/pdf", get(routes::reports::report_pdf))
        // Checked when JsonBody buffers the request
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.server.bind_addr();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
