//! CrudService: generic CRUD over a document store, driven by resource definitions.

mod crud;
mod validation;
pub use crud::CrudService;
pub use validation::{RequestValidator, INVALID_EMAIL};
