//! Demo echo routes.

use crate::handlers::demo::{body, query, spencer, url_param};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn demo_routes() -> Router<AppState> {
    Router::new()
        .route("/api/spencer", get(spencer))
        .route("/api/query", get(query))
        .route("/api/url/:x", get(url_param))
        .route("/api/body", get(body).post(body))
}
