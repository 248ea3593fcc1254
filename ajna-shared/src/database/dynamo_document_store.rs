use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use serde_json::{Map, Number, Value};
use crate::database::document_store::{Document, DocumentStore, FieldValue, WriteFields};
use crate::database::errors::StoreError;

const PARTITION_KEY: &str = "PK";
const SORT_KEY: &str = "SK";

/// DynamoDB-backed implementation
///
/// Single table layout: the collection name is the partition key and the
/// document key is the sort key, so a collection is streamed with one
/// paginated query.
pub struct DynamoDocumentStore {
    db: DynamoDbClient,
    table_name: String,
}

impl DynamoDocumentStore {
    pub fn new(db: DynamoDbClient, table_name: impl Into<String>) -> Self {
        Self {
            db,
            table_name: table_name.into(),
        }
    }

    fn key(collection: &str, key: &str) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (PARTITION_KEY.to_string(), AttributeValue::S(collection.to_string())),
            (SORT_KEY.to_string(), AttributeValue::S(key.to_string())),
        ])
    }

    async fn merge_fields(&self, collection: &str, key: &str, fields: WriteFields) -> Result<(), StoreError> {
        let mut builder = self.db
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(collection, key)));

        if !fields.is_empty() {
            let mut assignments = Vec::with_capacity(fields.len());
            for (index, (name, value)) in fields.into_iter().enumerate() {
                let name_ref = format!("#f{}", index);
                let value_ref = format!(":v{}", index);
                assignments.push(format!("{} = {}", name_ref, value_ref));
                builder = builder
                    .expression_attribute_names(name_ref, name)
                    .expression_attribute_values(value_ref, resolve(value));
            }
            builder = builder.update_expression(format!("SET {}", assignments.join(", ")));
        }

        builder.send().await?;
        Ok(())
    }

    async fn replace_fields(&self, collection: &str, key: &str, fields: WriteFields) -> Result<(), StoreError> {
        let mut item = Self::key(collection, key);
        for (name, value) in fields {
            item.insert(name, resolve(value));
        }

        self.db
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for DynamoDocumentStore {
    async fn set(
        &self,
        collection: &str,
        key: &str,
        fields: WriteFields,
        merge: bool,
    ) -> Result<(), StoreError> {
        log::debug!("Writing {}/{} (merge: {})", collection, key, merge);
        if merge {
            self.merge_fields(collection, key, fields).await
        } else {
            self.replace_fields(collection, key, fields).await
        }
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Document>, StoreError> {
        let res = self.db
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(collection, key)))
            .send()
            .await?;

        match res.item {
            Some(item) => Ok(Some(to_document(item)?)),
            None => Ok(None),
        }
    }

    async fn stream(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let mut documents = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let result = self.db
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("#pk = :pk")
                .expression_attribute_names("#pk", PARTITION_KEY)
                .expression_attribute_values(":pk", AttributeValue::S(collection.to_string()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await?;

            for item in result.items.unwrap_or_default() {
                documents.push(to_document(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        log::info!("Streamed {} documents from {}", documents.len(), collection);
        Ok(documents)
    }
}

fn resolve(value: FieldValue) -> AttributeValue {
    match value {
        FieldValue::Value(value) => to_attribute(value),
        FieldValue::ServerTimestamp => AttributeValue::S(Utc::now().to_rfc3339()),
    }
}

pub fn to_attribute(value: Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s),
        Value::Array(values) => AttributeValue::L(values.into_iter().map(to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.into_iter().map(|(k, v)| (k, to_attribute(v))).collect(),
        ),
    }
}

pub fn to_value(attribute: AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Bool(b) => Value::Bool(b),
        AttributeValue::S(s) => Value::String(s),
        AttributeValue::N(n) => parse_number(&n)?,
        AttributeValue::Ss(values) => Value::Array(values.into_iter().map(Value::String).collect()),
        AttributeValue::Ns(values) => Value::Array(
            values.iter().map(|n| parse_number(n)).collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::L(values) => Value::Array(
            values.into_iter().map(to_value).collect::<Result<Vec<_>, _>>()?,
        ),
        AttributeValue::M(map) => {
            let mut object = Map::new();
            for (k, v) in map {
                object.insert(k, to_value(v)?);
            }
            Value::Object(object)
        }
        other => {
            return Err(StoreError::Deserialization(format!("Unsupported attribute type: {:?}", other)));
        }
    };
    Ok(value)
}

fn parse_number(raw: &str) -> Result<Value, StoreError> {
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::Number(Number::from(i)));
    }
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .ok_or_else(|| StoreError::Deserialization(format!("Invalid number attribute: {}", raw)))
}

fn to_document(mut item: HashMap<String, AttributeValue>) -> Result<Document, StoreError> {
    item.remove(PARTITION_KEY);
    let id = item.remove(SORT_KEY)
        .and_then(|v| v.as_s().ok().cloned())
        .ok_or_else(|| StoreError::Deserialization("Missing SK".into()))?;

    let mut fields = Map::new();
    for (name, attribute) in item {
        fields.insert(name, to_value(attribute)?);
    }

    Ok(Document { id, fields })
}
