//! Router assembly.

pub mod common;
pub mod demo;
pub mod resource;

pub use common::common_routes;
pub use demo::demo_routes;
pub use resource::{api_routes, resource_routes};

use crate::config::Settings;
use crate::handlers::pages;
use crate::response::error_body;
use crate::state::AppState;
use axum::{
    handler::HandlerWithoutStateExt,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, get_service},
    Json, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
};

/// Request bodies are small JSON or form payloads.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(error_body("Not found")))
}

/// Full application: pages, API, health routes, static files from `public_dir`,
/// and a JSON 404 for anything else, including a known path under the wrong method.
pub fn app(state: AppState, settings: &Settings) -> Router {
    let public = ServeDir::new(&settings.public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(pages::landing))
        .route(
            "/spencer",
            get_service(ServeFile::new(settings.public_dir.join("spencer.html"))),
        )
        .merge(common_routes())
        .merge(api_routes(&state.registry))
        .merge(demo_routes())
        // applies only to the routes registered above
        .method_not_allowed_fallback(not_found)
        .fallback_service(public)
        .layer(
            ServiceBuilder::new()
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
                .layer(TimeoutLayer::new(settings.request_timeout)),
        )
        .with_state(state)
}
