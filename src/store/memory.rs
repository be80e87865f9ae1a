//! In-process backend for `memory://`. Identities mimic 24-hex ObjectIds.

use super::{check_collection, Document, DocumentStore};
use crate::config::{SortDirection, SortSpec, ID_FIELD};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
pub struct MemoryStore {
    /// Per collection, (id, document) in insertion order.
    collections: RwLock<HashMap<String, Vec<(String, Document)>>>,
    next_id: AtomicU64,
    calls: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations issued so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(AtomicOrdering::SeqCst)
    }

    fn record_call(&self, collection: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, AtomicOrdering::SeqCst);
        check_collection(collection)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, Vec<(String, Document)>>>, StoreError> {
        self.collections
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, Vec<(String, Document)>>>, StoreError> {
        self.collections
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn generate_id(&self) -> String {
        let secs = chrono::Utc::now().timestamp() as u32;
        let seq = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
        format!("{:08x}{:016x}", secs, seq)
    }
}

fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

fn with_id(id: &str, doc: &Document) -> Document {
    let mut out = doc.clone();
    out.insert(ID_FIELD.into(), Value::String(id.to_string()));
    out
}

fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        self.record_call(collection)?;
        doc.remove(ID_FIELD);
        let id = self.generate_id();
        self.write()?
            .entry(collection.to_string())
            .or_default()
            .push((id.clone(), doc));
        Ok(id)
    }

    async fn find_many(&self, collection: &str, sort: Option<&SortSpec>) -> Result<Vec<Document>, StoreError> {
        self.record_call(collection)?;
        let guard = self.read()?;
        let mut rows: Vec<&(String, Document)> = guard.get(collection).map(|c| c.iter().collect()).unwrap_or_default();
        if let Some(sort) = sort {
            if sort.direction == SortDirection::Descending {
                rows.reverse();
            }
            rows.sort_by(|(_, a), (_, b)| {
                let ord = compare_field(a.get(&sort.field), b.get(&sort.field));
                match sort.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            });
        }
        Ok(rows.into_iter().map(|(id, doc)| with_id(id, doc)).collect())
    }

    async fn find_one_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.record_call(collection)?;
        if !is_object_id(id) {
            return Ok(None);
        }
        Ok(self
            .read()?
            .get(collection)
            .and_then(|c| c.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(doc_id, doc)| with_id(doc_id, doc)))
    }

    async fn update_one_by_id(&self, collection: &str, id: &str, mut patch: Document) -> Result<u64, StoreError> {
        self.record_call(collection)?;
        if !is_object_id(id) {
            return Ok(0);
        }
        patch.remove(ID_FIELD);
        let mut guard = self.write()?;
        let Some((_, doc)) = guard
            .get_mut(collection)
            .and_then(|c| c.iter_mut().find(|(doc_id, _)| doc_id == id))
        else {
            return Ok(0);
        };
        doc.extend(patch);
        Ok(1)
    }

    async fn delete_one_by_id(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        self.record_call(collection)?;
        if !is_object_id(id) {
            return Ok(0);
        }
        let mut guard = self.write()?;
        let Some(docs) = guard.get_mut(collection) else {
            return Ok(0);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        Ok((before - docs.len()) as u64)
    }

    async fn delete_many(&self, collection: &str) -> Result<u64, StoreError> {
        self.record_call(collection)?;
        Ok(self
            .write()?
            .remove(collection)
            .map(|docs| docs.len() as u64)
            .unwrap_or(0))
    }
}
