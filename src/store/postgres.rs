use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::config::StoreConfig;

use super::{Document, DocumentStore, StoreError};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS documents (
    id UUID PRIMARY KEY,
    collection TEXT NOT NULL,
    doc JSONB NOT NULL
)";

const COLLECTION_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS documents_collection_idx ON documents (collection)";

/// Document store over a single JSONB table.
///
/// Collections are rows sharing a `collection` value; ids are v4 UUIDs
/// generated on insert. `DATABASE_URL` is the startup credential and must
/// be present in the environment (or `.env`) before connecting.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and make sure the documents table exists.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::ConfigMissing("DATABASE_URL"))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_secs))
            .connect(&url)
            .await?;

        sqlx::query(SCHEMA).execute(&pool).await?;
        sqlx::query(COLLECTION_INDEX).execute(&pool).await?;

        info!("Connected to document store");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn add(&self, collection: &str, fields: Map<String, Value>) -> Result<Uuid, StoreError> {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO documents (id, collection, doc) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(collection)
            .bind(Value::Object(fields))
            .execute(&self.pool)
            .await?;
        Ok(id)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query("SELECT id, doc FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, doc FROM documents WHERE collection = $1 AND doc->>($2::text) = $3",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(row_to_document).collect())
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE documents SET doc = doc || $3 WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .bind(Value::Object(patch))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::MissingDocument {
                collection: collection.to_string(),
                id,
            });
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_document(row: PgRow) -> Document {
    let id: Uuid = row.get("id");
    let fields = match row.try_get::<Value, _>("doc") {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    };
    Document { id, fields }
}
