//! # TutorDesk API
//!
//! The API crate provides the web server implementation for the TutorDesk
//! back-office service. It defines RESTful endpoints for managing lessons,
//! teachers, students, admin accounts, operator sessions, and the financial
//! report.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Provide cross-cutting concerns like authentication and error handling
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework and SQLx for database interactions.
//! All `/api` routes except login sit behind the bearer-session middleware;
//! identity reaches handlers as an explicit [`Session`] extension, never as
//! ambient state.
//!
//! [`Session`]: tutordesk_core::models::admin::Session

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement business logic
pub mod handlers;
/// Middleware for authentication, logging, and error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use tutordesk_notify::{Calendar, Notifier};

/// Shared application state that is accessible to all request handlers
pub struct ApiState {
    /// PostgreSQL connection pool for database operations
    pub db_pool: PgPool,
    /// Guardian/teacher notification channel (best-effort)
    pub notifier: Notifier,
    /// Calendar sync channel (best-effort)
    pub calendar: Calendar,
    /// Lifetime of issued session tokens, in hours
    pub session_ttl_hours: i64,
}

/// Creates the root admin account from `BASE_ADMIN_EMAIL` /
/// `BASE_ADMIN_PASSWORD` when both are set and no admin with that email
/// exists yet. A no-op otherwise.
pub async fn bootstrap_base_admin(db_pool: &PgPool) -> Result<()> {
    let (Ok(email), Ok(password)) = (
        std::env::var("BASE_ADMIN_EMAIL"),
        std::env::var("BASE_ADMIN_PASSWORD"),
    ) else {
        return Ok(());
    };

    let password_hash = middleware::auth::hash_password(&password)?;
    tutordesk_db::repositories::admin::ensure_base_admin(db_pool, &email, &password_hash).await?;

    Ok(())
}

/// Starts the API server with the provided configuration and database connection
///
/// This function initializes the application, sets up logging, configures
/// routes, and starts the HTTP server. The notification and calendar clients
/// are built from their environment variables; without webhook URLs they run
/// in simulated mode.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Create shared state with dependencies
    let state = Arc::new(ApiState {
        db_pool,
        notifier: Notifier::from_env(),
        calendar: Calendar::from_env(),
        session_ttl_hours: config.session_ttl_hours,
    });

    // Everything except login and health requires a valid bearer session
    let protected = Router::new()
        .merge(routes::lesson::routes())
        .merge(routes::teacher::routes())
        .merge(routes::student::routes())
        .merge(routes::admin::routes())
        .merge(routes::report::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_session,
        ));

    // Build the application router with all routes
    let app = Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Login / logout
        .merge(routes::session::routes())
        // Authenticated back-office endpoints
        .merge(protected)
        // Attach shared state to all routes
        .with_state(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .map(|origin| origin.parse().unwrap())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
