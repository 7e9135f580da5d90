use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod entities;
pub mod error;
pub mod reports;
pub mod routes;
pub mod seed;
pub mod viewer;
pub mod views;

use config::Config;
use error::AppError;

/// Shared handler state; the connection is a pool, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `ok` while the process is serving
    status: String,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
        }),
    )
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "investhub",
        version = "0.1.0",
        description = "Startup investment reports with CSV export"
    ),
    paths(
        health_check,
        routes::reports_overview,
        routes::investments_report,
        routes::startups_report,
        routes::dashboard
    ),
    components(schemas(HealthResponse)),
    tags(
        (name = "reports", description = "Filterable investment and startup reports")
    )
)]
struct ApiDoc;

/// Create the application with default settings: no rate limiting, permissive CORS.
pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &Config::default())
}

/// Create the application with all routes and middleware
pub fn create_app_with_config(state: AppState, config: &Config) -> Router {
    let api_doc = ApiDoc::openapi();

    // --- Define the routes that touch the database ---
    let report_routes = Router::new()
        .route("/reports", get(routes::reports_overview))
        .route("/reports/investments", get(routes::investments_report))
        .route("/reports/startups", get(routes::startups_report))
        .route("/dashboard", get(routes::dashboard))
        .with_state(state);

    // --- Rate limiting is opt-in; it needs the peer address (see main.rs) ---
    let report_routes = match config.rate_limit_burst {
        Some(burst) => {
            let governor_conf = GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .period(Duration::from_secs(60))
                .burst_size(burst)
                .finish();
            match governor_conf {
                Some(conf) => {
                    tracing::info!(burst, "rate limiting report routes");
                    report_routes.layer(GovernorLayer {
                        config: Arc::new(conf),
                    })
                }
                None => {
                    tracing::warn!(burst, "invalid rate limit settings; serving without rate limiting");
                    report_routes
                }
            }
        }
        None => report_routes,
    };

    // --- Build the final application router ---
    let mut app = Router::new()
        .route("/health", get(health_check))
        .merge(report_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", api_doc))
        .fallback(not_found);

    if config.cors_permissive {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    app.layer(TraceLayer::new_for_http())
}
