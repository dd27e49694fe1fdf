pub mod document;
pub mod memory;
pub mod repository;
pub mod sqlite;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StorageError;

pub use document::{DocumentId, StoredRecord};
pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

/// A document store organised in named collections.
///
/// One handle is built at startup and shared by every request.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Appends `document` to `collection` and returns the identifier the
    /// store assigned to it.
    async fn insert(
        &self,
        collection: &str,
        document: Map<String, Value>,
    ) -> Result<DocumentId, StorageError>;

    /// Every document in `collection`, in insertion order.
    async fn find_all(&self, collection: &str) -> Result<Vec<StoredRecord>, StorageError>;

    /// Names of the collections holding at least one document.
    async fn list_collections(&self) -> Result<Vec<String>, StorageError>;
}
