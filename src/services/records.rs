use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use crate::db::{DocumentStore, repository};
use crate::error::{AppError, StorageError};
use crate::models::CreatedRecord;
use crate::schema::RecordKind;
use crate::validation;

/// Validates `payload` as a `kind` record and stores it.
pub async fn create_record(
    store: &dyn DocumentStore,
    kind: RecordKind,
    payload: &Value,
) -> Result<CreatedRecord, AppError> {
    let record = validation::validate(kind, payload)?;
    let id = repository::insert_record(store, record).await?;
    info!("created {} {}", kind, id);
    Ok(CreatedRecord {
        id: id.to_canonical(),
    })
}

/// Every stored `kind` record in wire form, decoded into `T`.
pub async fn list_records<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    kind: RecordKind,
) -> Result<Vec<T>, AppError> {
    let stored = repository::fetch_records(store, kind).await?;
    let mut items = Vec::with_capacity(stored.len());

    for record in stored {
        let id = record.id.to_canonical();
        let item = serde_json::from_value::<T>(Value::Object(record.into_wire())).map_err(|e| {
            StorageError::Malformed {
                collection: kind.collection().to_string(),
                id,
                reason: e.to_string(),
            }
        })?;
        items.push(item);
    }

    Ok(items)
}
