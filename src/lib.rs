//! Infinity API: CRUD over students, paper orders, posts and contact messages,
//! backed by a document store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{resolve, ResourceDef, ResourceRegistry, Settings};
pub use error::{AppError, ConfigError, StartupError, StoreError};
pub use routes::app;
pub use service::CrudService;
pub use state::AppState;
pub use store::{connect, Document, DocumentStore, MemoryStore, MongoStore, PgStore};
