use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{AppConfig, StoreBackend};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

/// Errors from document store backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Document {id} not found in collection {collection}")]
    MissingDocument { collection: String, id: Uuid },

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// A stored document: store-assigned id plus loosely-schematized fields.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: Uuid,
    pub fields: Map<String, Value>,
}

/// Collection-scoped primitives of the document store.
///
/// The service treats the store as opaque: every backend supplies create,
/// full-collection read, field-equality query, and per-document patch.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document, returning the store-assigned id.
    async fn add(&self, collection: &str, fields: Map<String, Value>) -> Result<Uuid, StoreError>;

    /// Every document in a collection. Iteration order is backend-defined.
    async fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// All documents whose `field` equals `value`.
    async fn find_eq(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;

    /// Merge `patch` into an existing document's fields.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        patch: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Process-wide store handle, shared by all request handlers.
pub type SharedStore = Arc<dyn DocumentStore>;

/// Build the store backend selected by configuration.
pub async fn init(config: &AppConfig) -> Result<SharedStore, StoreError> {
    match config.store.backend {
        StoreBackend::Postgres => Ok(Arc::new(PostgresStore::connect(&config.store).await?)),
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
    }
}
