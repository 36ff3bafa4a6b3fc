use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/lessons", post(handlers::lesson::create_lesson))
        .route("/api/lessons", get(handlers::lesson::list_lessons))
        .route("/api/lessons/:id", get(handlers::lesson::get_lesson))
        .route("/api/lessons/:id", put(handlers::lesson::update_lesson))
        .route("/api/lessons/:id", delete(handlers::lesson::delete_lesson))
}
