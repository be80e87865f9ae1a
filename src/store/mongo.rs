//! MongoDB backend. Identities are ObjectIds rendered as 24-char hex strings.

use super::{check_collection, Document, DocumentStore};
use crate::config::{SortDirection, SortSpec, ID_FIELD};
use crate::error::StoreError;
use async_trait::async_trait;
use mongodb::bson::{self, doc, oid::ObjectId, Bson, Document as BsonDocument};
use mongodb::options::{ClientOptions, FindOptions};
use mongodb::{Client, Collection, Database};
use serde_json::Value;
use std::time::Duration;

pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub async fn connect(url: &str, database: &str, timeout: Duration) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(url).await?;
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        let client = Client::with_options(options)?;
        Ok(Self {
            db: client.database(database),
        })
    }

    fn collection(&self, name: &str) -> Result<Collection<BsonDocument>, StoreError> {
        check_collection(name)?;
        Ok(self.db.collection(name))
    }
}

fn to_bson(mut doc: Document) -> Result<BsonDocument, StoreError> {
    doc.remove(ID_FIELD);
    bson::to_document(&doc).map_err(|e| StoreError::Encoding(e.to_string()))
}

fn from_bson(mut doc: BsonDocument) -> Document {
    let id = doc.remove("_id").map(|id| match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        other => other.to_string(),
    });
    let mut out = match Bson::Document(doc).into_relaxed_extjson() {
        Value::Object(map) => map,
        _ => Document::new(),
    };
    if let Some(id) = id {
        out.insert(ID_FIELD.into(), Value::String(id));
    }
    out
}

fn id_filter(id: &str) -> Option<BsonDocument> {
    ObjectId::parse_str(id).ok().map(|oid| doc! { "_id": oid })
}

fn inserted_hex(id: &Bson) -> Result<String, StoreError> {
    id.as_object_id()
        .map(|oid| oid.to_hex())
        .ok_or_else(|| StoreError::Encoding(format!("unexpected inserted id {}", id)))
}

#[async_trait]
impl DocumentStore for MongoStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }

    async fn insert_one(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let result = self.collection(collection)?.insert_one(to_bson(doc)?, None).await?;
        inserted_hex(&result.inserted_id)
    }

    async fn insert_many(&self, collection: &str, docs: Vec<Document>) -> Result<Vec<String>, StoreError> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }
        let docs = docs.into_iter().map(to_bson).collect::<Result<Vec<_>, _>>()?;
        let result = self.collection(collection)?.insert_many(docs, None).await?;
        let mut ids: Vec<(usize, Bson)> = result.inserted_ids.into_iter().collect();
        ids.sort_by_key(|(index, _)| *index);
        ids.iter().map(|(_, id)| inserted_hex(id)).collect()
    }

    async fn find_many(&self, collection: &str, sort: Option<&SortSpec>) -> Result<Vec<Document>, StoreError> {
        let options = sort.map(|sort| {
            let dir = match sort.direction {
                SortDirection::Ascending => 1,
                SortDirection::Descending => -1,
            };
            let mut order = BsonDocument::new();
            order.insert(sort.field.clone(), dir);
            // ObjectIds grow with insertion time
            order.insert("_id", dir);
            FindOptions::builder().sort(order).build()
        });
        let mut cursor = self.collection(collection)?.find(None, options).await?;
        let mut out = Vec::new();
        while cursor.advance().await? {
            out.push(from_bson(cursor.deserialize_current()?));
        }
        Ok(out)
    }

    async fn find_one_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let coll = self.collection(collection)?;
        let Some(filter) = id_filter(id) else {
            return Ok(None);
        };
        Ok(coll.find_one(filter, None).await?.map(from_bson))
    }

    async fn update_one_by_id(&self, collection: &str, id: &str, patch: Document) -> Result<u64, StoreError> {
        let coll = self.collection(collection)?;
        let Some(filter) = id_filter(id) else {
            return Ok(0);
        };
        let patch = to_bson(patch)?;
        if patch.is_empty() {
            // `$set` rejects an empty document
            return Ok(coll.count_documents(filter, None).await?);
        }
        let result = coll.update_one(filter, doc! { "$set": patch }, None).await?;
        Ok(result.matched_count)
    }

    async fn delete_one_by_id(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        let coll = self.collection(collection)?;
        let Some(filter) = id_filter(id) else {
            return Ok(0);
        };
        Ok(coll.delete_one(filter, None).await?.deleted_count)
    }

    async fn delete_many(&self, collection: &str) -> Result<u64, StoreError> {
        Ok(self.collection(collection)?.delete_many(doc! {}, None).await?.deleted_count)
    }
}
