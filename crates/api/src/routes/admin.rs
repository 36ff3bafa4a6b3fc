use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/admins", post(handlers::admin::create_admin))
        .route("/api/admins", get(handlers::admin::list_admins))
        .route("/api/admins/:id", put(handlers::admin::update_admin))
        .route(
            "/api/admins/:id/inactivate",
            post(handlers::admin::inactivate_admin),
        )
}
