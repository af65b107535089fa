//! Records, identifiers and collections.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Field map of a stored record.
pub type Document = Map<String, Value>;

/// Key under which a record's identifier appears in its document form.
pub const ID_FIELD: &str = "id";

/// Name of a record kind (`authors`, `books`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Collection(&'static str);

impl Collection {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Store-assigned record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Fresh identifier: a v7 UUID in 32-character hex form. Identifiers
    /// generated by one process sort in creation order.
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored record: identifier plus fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub fields: Document,
}

impl Record {
    /// Build a record, dropping any caller-supplied `id` field and any
    /// null fields so absent optionals stay absent.
    pub fn new(id: RecordId, mut fields: Document) -> Self {
        fields.remove(ID_FIELD);
        fields.retain(|_, value| !value.is_null());
        Self { id, fields }
    }

    /// Flatten into a single document with the identifier under `id`.
    pub fn into_document(self) -> Document {
        let mut document = self.fields;
        document.insert(ID_FIELD.to_string(), Value::String(self.id.into_string()));
        document
    }
}
