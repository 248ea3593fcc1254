use std::collections::HashMap;
use async_trait::async_trait;
use serde_json::{Map, Value};
use crate::database::errors::StoreError;

/// A value to be written into a document field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Value(Value),
    /// Resolved by the store at write time, never by the caller's clock.
    ServerTimestamp,
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Value(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Value(Value::String(value.to_string()))
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        FieldValue::Value(value.map(Value::String).unwrap_or(Value::Null))
    }
}

pub type WriteFields = HashMap<String, FieldValue>;

/// A stored document: its store-assigned key plus its field map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Interface
///
/// Collections are named groups of documents keyed by an application-chosen id.
/// A `set` with `merge` creates the document if absent and otherwise only touches
/// the written fields; without `merge` the document is replaced.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: WriteFields,
        merge: bool,
    ) -> Result<(), StoreError>;

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError>;

    async fn stream(&self, collection: &str) -> Result<Vec<Document>, StoreError>;
}
