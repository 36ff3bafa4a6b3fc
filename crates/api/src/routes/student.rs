use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/students", post(handlers::student::create_student))
        .route("/api/students", get(handlers::student::list_students))
        .route("/api/students/:id", get(handlers::student::get_student))
        .route("/api/students/:id", put(handlers::student::update_student))
        .route(
            "/api/students/:id/inactivate",
            post(handlers::student::inactivate_student),
        )
}
