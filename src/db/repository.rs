//! The boundary between validated records and the document store.

use tracing::debug;

use crate::db::{DocumentId, DocumentStore, StoredRecord};
use crate::error::StorageError;
use crate::schema::RecordKind;
use crate::validation::NormalizedRecord;

pub async fn insert_record(
    store: &dyn DocumentStore,
    record: NormalizedRecord,
) -> Result<DocumentId, StorageError> {
    let collection = record.kind().collection();
    let id = store.insert(collection, record.into_map()).await?;
    debug!("stored {} record {}", collection, id);
    Ok(id)
}

pub async fn fetch_records(
    store: &dyn DocumentStore,
    kind: RecordKind,
) -> Result<Vec<StoredRecord>, StorageError> {
    store.find_all(kind.collection()).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::db::MemoryDocumentStore;
    use crate::validation::validate;

    #[tokio::test]
    async fn test_insert_record_uses_kind_collection() {
        let store = MemoryDocumentStore::new();
        let record = validate(
            RecordKind::Enrollment,
            &json!({"course_id": "c1", "student_name": "Ana", "email": "ana@example.com"}),
        )
        .expect("valid enrollment");

        let id = insert_record(&store, record.clone()).await.expect("insert");

        assert!(fetch_records(&store, RecordKind::Course).await.expect("fetch").is_empty());
        let stored = fetch_records(&store, RecordKind::Enrollment).await.expect("fetch");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, id);
        assert_eq!(&stored[0].fields, record.as_map());
    }
}
