use std::fmt;

use serde_json::{Map, Value};
use uuid::Uuid;

/// Key under which a store may keep its native identifier inside a document.
pub const STORAGE_KEY: &str = "_id";
/// Key under which the canonical identifier is exposed on the wire.
pub const WIRE_KEY: &str = "id";

/// Storage-assigned identifier.
///
/// Has no `Deserialize` impl: identifiers come from a store, never from a
/// request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_native(native: Uuid) -> Self {
        Self(native)
    }

    pub fn native(&self) -> Uuid {
        self.0
    }

    /// The only conversion from the native token to its string form.
    pub fn to_canonical(&self) -> String {
        self.0.hyphenated().to_string()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

/// A document as returned by a store: native identifier plus body.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub id: DocumentId,
    pub fields: Map<String, Value>,
}

impl StoredRecord {
    pub fn new(id: DocumentId, fields: Map<String, Value>) -> Self {
        Self { id, fields }
    }

    /// Reshapes the record for output: the storage key is dropped and the
    /// identifier is written as a string under `id`.
    pub fn into_wire(self) -> Map<String, Value> {
        let mut fields = self.fields;
        fields.remove(STORAGE_KEY);
        fields.insert(WIRE_KEY.to_string(), Value::String(self.id.to_canonical()));
        fields
    }
}
