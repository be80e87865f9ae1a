//! Resource CRUD routes. One router per resource, nested under `/api/<path_segment>`;
//! static segments (`seed`, `cleanup`, `form`) take priority over `:id`.

use crate::config::{ResourceDef, ResourceRegistry};
use crate::handlers::contact;
use crate::handlers::resource::{
    cleanup, create, create_from_form, delete as delete_handler, list, patch, read, replace, seed,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;

pub fn resource_routes(resource: Arc<ResourceDef>) -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/seed", post(seed))
        .route("/cleanup", delete(cleanup))
        .route("/form", post(create_from_form))
        .route(
            "/:id",
            get(read).put(replace).patch(patch).delete(delete_handler),
        )
        .layer(Extension(resource))
}

/// Every CRUD resource in the registry plus `POST /api/contact`.
pub fn api_routes(registry: &ResourceRegistry) -> Router<AppState> {
    let router = registry.crud_resources().fold(Router::new(), |router, resource| {
        router.nest(&format!("/api/{}", resource.path_segment), resource_routes(resource.clone()))
    });
    router.route("/api/contact", post(contact::submit))
}
