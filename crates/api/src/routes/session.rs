use axum::{
    Router,
    routing::{delete, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/session", post(handlers::session::login))
        .route("/api/session", delete(handlers::session::logout))
}
