//! Document store adapter. Handlers see only [`DocumentStore`]; the backend is
//! picked from the connection string scheme at startup.

mod memory;
mod mongo;
mod postgres;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use postgres::PgStore;

use crate::config::{Settings, SortSpec};
use crate::error::{StartupError, StoreError};
use async_trait::async_trait;
use std::sync::Arc;

/// A flat record as stored and returned. Returned documents carry `_id` as a string.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Single-document operations; each call is atomic on its own and nothing spans calls.
///
/// Ids that are not syntactically valid for the backend behave like unknown ids:
/// lookups return `None` and mutations report zero affected documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Insert and return the assigned identity. Any `_id` in `doc` is ignored.
    async fn insert_one(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<String>, StoreError> {
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            ids.push(self.insert_one(collection, doc).await?);
        }
        Ok(ids)
    }

    /// All documents; with a sort, ties keep insertion order in the sort's direction.
    async fn find_many(&self, collection: &str, sort: Option<&SortSpec>) -> Result<Vec<Document>, StoreError>;

    async fn find_one_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Overwrite the top-level fields present in `patch`. Returns the matched count (0 or 1).
    async fn update_one_by_id(&self, collection: &str, id: &str, patch: Document) -> Result<u64, StoreError>;

    async fn delete_one_by_id(&self, collection: &str, id: &str) -> Result<u64, StoreError>;

    async fn delete_many(&self, collection: &str) -> Result<u64, StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Mongo,
    Postgres,
    Memory,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> Result<Self, StartupError> {
        let scheme = url.split("://").next().unwrap_or_default().to_ascii_lowercase();
        match scheme.as_str() {
            "mongodb" | "mongodb+srv" => Ok(StoreBackend::Mongo),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(StartupError::UnsupportedStore(scheme)),
        }
    }
}

/// Connect once at startup. Any failure, including the connect timeout, is fatal.
pub async fn connect(settings: &Settings, collections: &[String]) -> Result<Arc<dyn DocumentStore>, StartupError> {
    let backend = StoreBackend::from_url(&settings.store_url)?;
    let timeout = settings.connect_timeout;
    let connecting = async {
        let store: Arc<dyn DocumentStore> = match backend {
            StoreBackend::Mongo => Arc::new(MongoStore::connect(&settings.store_url, &settings.database, timeout).await?),
            StoreBackend::Postgres => Arc::new(
                PgStore::connect(&settings.store_url, &settings.database, timeout, collections).await?,
            ),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };
        store.ping().await?;
        Ok::<_, StoreError>(store)
    };
    match tokio::time::timeout(timeout, connecting).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(StartupError::ConnectTimeout(timeout)),
    }
}

/// Collection names become table names on Postgres, so both backends hold them to one shape.
pub(crate) fn check_collection(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false)
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidCollection(name.to_string()))
    }
}
