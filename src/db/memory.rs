use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::db::{DocumentId, DocumentStore, StoredRecord};
use crate::error::StorageError;

/// Process-local store with the same contract as the SQLite one.
#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<BTreeMap<String, Vec<StoredRecord>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> StorageError {
    StorageError::Unavailable("memory store lock poisoned".to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        document: Map<String, Value>,
    ) -> Result<DocumentId, StorageError> {
        let id = DocumentId::generate();
        let mut collections = self.collections.write().map_err(poisoned)?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredRecord::new(id, document));
        Ok(id)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredRecord>, StorageError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn list_collections(&self) -> Result<Vec<String>, StorageError> {
        let collections = self.collections.read().map_err(poisoned)?;
        Ok(collections.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_insert_then_find_all() {
        let store = MemoryDocumentStore::new();
        let mut doc = Map::new();
        doc.insert("student_name".to_string(), json!("Ana"));

        let id = store.insert("enrollment", doc).await.expect("insert");
        let records = store.find_all("enrollment").await.expect("fetch");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert!(store.find_all("course").await.expect("fetch").is_empty());
        assert_eq!(
            store.list_collections().await.expect("collections"),
            vec!["enrollment".to_string()]
        );
    }
}
