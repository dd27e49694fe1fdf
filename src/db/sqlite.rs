use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::{
    FromRow, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::{DocumentId, DocumentStore, StoredRecord};
use crate::error::StorageError;

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: String,
}

#[derive(Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Opens (creating the file if needed) and migrates the database at
    /// `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self::new(pool);
        store.migrate().await?;
        info!("document store ready at {}", database_url);
        Ok(store)
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn insert(
        &self,
        collection: &str,
        document: Map<String, Value>,
    ) -> Result<DocumentId, StorageError> {
        let id = DocumentId::generate();
        let now = Utc::now().to_rfc3339();
        let body = Value::Object(document).to_string();

        sqlx::query(
            "INSERT INTO documents (id, collection, body, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(id.native())
        .bind(collection)
        .bind(body)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!("inserted {} into {}", id, collection);
        Ok(id)
    }

    async fn find_all(&self, collection: &str) -> Result<Vec<StoredRecord>, StorageError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = ?1 ORDER BY seq",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let id = DocumentId::from_native(row.id);
                let malformed = |reason: String| StorageError::Malformed {
                    collection: collection.to_string(),
                    id: id.to_canonical(),
                    reason,
                };
                match serde_json::from_str::<Value>(&row.body) {
                    Ok(Value::Object(fields)) => Ok(StoredRecord::new(id, fields)),
                    Ok(_) => Err(malformed("body is not a JSON object".to_string())),
                    Err(e) => Err(malformed(e.to_string())),
                }
            })
            .collect()
    }

    async fn list_collections(&self) -> Result<Vec<String>, StorageError> {
        let names = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT collection FROM documents ORDER BY collection",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(names)
    }
}
