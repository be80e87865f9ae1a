//! PostgreSQL backend: one JSONB table per collection inside the configured schema.
//! Identities are UUIDs.

use super::{check_collection, Document, DocumentStore};
use crate::config::{SortDirection, SortSpec, ID_FIELD};
use crate::error::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use uuid::Uuid;

pub struct PgStore {
    pool: PgPool,
    schema: String,
}

impl PgStore {
    pub async fn connect(url: &str, schema: &str, timeout: Duration, collections: &[String]) -> Result<Self, StoreError> {
        check_collection(schema)?;
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(timeout)
            .connect(url)
            .await?;
        let store = Self {
            pool,
            schema: schema.to_string(),
        };
        store.ensure_collections(collections).await?;
        Ok(store)
    }

    /// Quoted, schema-qualified table name for a collection (e.g. `"studentDB"."posts"`).
    fn table(&self, collection: &str) -> Result<String, StoreError> {
        check_collection(collection)?;
        Ok(format!("\"{}\".\"{}\"", self.schema, collection))
    }

    /// Create the schema and one table per collection if missing.
    /// `seq` records insertion order for natural ordering and sort tie-breaks.
    pub async fn ensure_collections(&self, collections: &[String]) -> Result<(), StoreError> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", self.schema))
            .execute(&self.pool)
            .await?;
        for collection in collections {
            let ddl = format!(
                r#"
                CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY,
                    seq BIGSERIAL NOT NULL,
                    payload JSONB NOT NULL,
                    inserted_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
                self.table(collection)?
            );
            sqlx::query(&ddl).execute(&self.pool).await?;
        }
        Ok(())
    }
}

fn row_to_document(id: Uuid, payload: Value) -> Document {
    let mut doc = match payload {
        Value::Object(map) => map,
        _ => Document::new(),
    };
    doc.insert(ID_FIELD.into(), Value::String(id.to_string()));
    doc
}

#[async_trait]
impl DocumentStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_one(&self, collection: &str, mut doc: Document) -> Result<String, StoreError> {
        doc.remove(ID_FIELD);
        let sql = format!("INSERT INTO {} (id, payload) VALUES ($1, $2)", self.table(collection)?);
        tracing::debug!(sql = %sql, "query");
        let id = Uuid::new_v4();
        sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(doc))
            .execute(&self.pool)
            .await?;
        Ok(id.to_string())
    }

    async fn find_many(&self, collection: &str, sort: Option<&SortSpec>) -> Result<Vec<Document>, StoreError> {
        let table = self.table(collection)?;
        let rows: Vec<(Uuid, Value)> = match sort {
            Some(sort) => {
                let dir = match sort.direction {
                    SortDirection::Ascending => "ASC",
                    SortDirection::Descending => "DESC",
                };
                let sql = format!(
                    "SELECT id, payload FROM {} ORDER BY payload->>$1 {dir}, seq {dir}",
                    table,
                    dir = dir
                );
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as(&sql).bind(&sort.field).fetch_all(&self.pool).await?
            }
            None => {
                let sql = format!("SELECT id, payload FROM {} ORDER BY seq", table);
                tracing::debug!(sql = %sql, "query");
                sqlx::query_as(&sql).fetch_all(&self.pool).await?
            }
        };
        Ok(rows.into_iter().map(|(id, payload)| row_to_document(id, payload)).collect())
    }

    async fn find_one_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let table = self.table(collection)?;
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };
        let sql = format!("SELECT id, payload FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, "query");
        let row: Option<(Uuid, Value)> = sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(row.map(|(id, payload)| row_to_document(id, payload)))
    }

    async fn update_one_by_id(&self, collection: &str, id: &str, mut patch: Document) -> Result<u64, StoreError> {
        let table = self.table(collection)?;
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(0);
        };
        patch.remove(ID_FIELD);
        // jsonb `||` replaces top-level keys, matching `$set`
        let sql = format!("UPDATE {} SET payload = payload || $2 WHERE id = $1", table);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(Value::Object(patch))
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_one_by_id(&self, collection: &str, id: &str) -> Result<u64, StoreError> {
        let table = self.table(collection)?;
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(0);
        };
        let sql = format!("DELETE FROM {} WHERE id = $1", table);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete_many(&self, collection: &str) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {}", self.table(collection)?);
        tracing::debug!(sql = %sql, "query");
        let result = sqlx::query(&sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
