use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/teachers", post(handlers::teacher::create_teacher))
        .route("/api/teachers", get(handlers::teacher::list_teachers))
        .route("/api/teachers/:id", get(handlers::teacher::get_teacher))
        .route("/api/teachers/:id", put(handlers::teacher::update_teacher))
        .route(
            "/api/teachers/:id/inactivate",
            post(handlers::teacher::inactivate_teacher),
        )
}
