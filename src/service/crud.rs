//! Generic CRUD execution against a document store.

use crate::config::{ResourceDef, ID_FIELD};
use crate::error::{AppError, StoreError};
use crate::service::RequestValidator;
use crate::store::{Document, DocumentStore};
use chrono::Utc;
use serde_json::Value;

pub struct CrudService;

impl CrudService {
    /// Validate, stamp and insert. Returns the stored document with its `_id`.
    pub async fn create(store: &dyn DocumentStore, def: &ResourceDef, body: &Document) -> Result<Document, AppError> {
        let mut doc = RequestValidator::validate_create(def, body, Utc::now())?;
        tracing::debug!(collection = %def.collection, "insert");
        let id = store.insert_one(&def.collection, doc.clone()).await?;
        doc.insert(ID_FIELD.into(), Value::String(id));
        Ok(doc)
    }

    /// Every document in the collection, in the resource's order.
    pub async fn list(store: &dyn DocumentStore, def: &ResourceDef) -> Result<Vec<Document>, AppError> {
        tracing::debug!(collection = %def.collection, sort = ?def.sort, "find");
        Ok(store.find_many(&def.collection, def.sort.as_ref()).await?)
    }

    pub async fn read(store: &dyn DocumentStore, def: &ResourceDef, id: &str) -> Result<Document, AppError> {
        tracing::debug!(collection = %def.collection, id = %id, "find one");
        store
            .find_one_by_id(&def.collection, id)
            .await?
            .ok_or_else(|| AppError::NotFound(def.not_found()))
    }

    /// Full replace of the resource's fields. `_id` and `createdAt` are untouched.
    pub async fn replace(store: &dyn DocumentStore, def: &ResourceDef, id: &str, body: &Document) -> Result<(), AppError> {
        match RequestValidator::validate_replace(def, body) {
            Ok(patch) => Self::apply(store, def, id, patch).await,
            Err(e) => Err(Self::unless_missing(store, def, id, e).await),
        }
    }

    /// Overwrite only the supplied fields.
    pub async fn patch(store: &dyn DocumentStore, def: &ResourceDef, id: &str, body: &Document) -> Result<(), AppError> {
        match RequestValidator::validate_partial(def, body) {
            Ok(patch) => Self::apply(store, def, id, patch).await,
            Err(e) => Err(Self::unless_missing(store, def, id, e).await),
        }
    }

    pub async fn delete(store: &dyn DocumentStore, def: &ResourceDef, id: &str) -> Result<(), AppError> {
        tracing::debug!(collection = %def.collection, id = %id, "delete one");
        if store.delete_one_by_id(&def.collection, id).await? == 0 {
            return Err(AppError::NotFound(def.not_found()));
        }
        Ok(())
    }

    /// Remove every document. An empty collection is not an error.
    pub async fn delete_all(store: &dyn DocumentStore, def: &ResourceDef) -> Result<u64, AppError> {
        let deleted = store.delete_many(&def.collection).await?;
        tracing::info!(collection = %def.collection, deleted, "collection cleared");
        Ok(deleted)
    }

    /// Replace the collection's contents with the canonical sample set.
    pub async fn seed(store: &dyn DocumentStore, def: &ResourceDef) -> Result<u64, AppError> {
        let seed = def
            .seed
            .ok_or_else(|| AppError::NotFound(format!("{} has no seed data", def.name)))?;
        let samples = seed(Utc::now()).map_err(|e| StoreError::Encoding(e.to_string()))?;
        store.delete_many(&def.collection).await?;
        let ids = store.insert_many(&def.collection, samples).await?;
        tracing::info!(collection = %def.collection, inserted = ids.len(), "collection seeded");
        Ok(ids.len() as u64)
    }

    async fn apply(store: &dyn DocumentStore, def: &ResourceDef, id: &str, patch: Document) -> Result<(), AppError> {
        tracing::debug!(collection = %def.collection, id = %id, fields = patch.len(), "update one");
        if store.update_one_by_id(&def.collection, id, patch).await? == 0 {
            return Err(AppError::NotFound(def.not_found()));
        }
        Ok(())
    }

    /// An unknown id outranks a validation failure: probe before reporting `err`.
    async fn unless_missing(store: &dyn DocumentStore, def: &ResourceDef, id: &str, err: AppError) -> AppError {
        match store.find_one_by_id(&def.collection, id).await {
            Ok(Some(_)) => err,
            Ok(None) => AppError::NotFound(def.not_found()),
            Err(e) => e.into(),
        }
    }
}
