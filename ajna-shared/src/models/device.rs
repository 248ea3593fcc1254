use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::database::document_store::Document;

pub const DEVICE_COLLECTION: &str = "devices";
pub const DEVICE_ID_FIELD: &str = "device_id";
pub const FCM_TOKEN_FIELD: &str = "fcm_token";
pub const STATUS_FIELD: &str = "status";
pub const LAST_SEEN_FIELD: &str = "last_seen";
pub const STATUS_ONLINE: &str = "online";

#[derive(Debug, Default, Deserialize)]
pub struct RegisterDeviceRequest {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub fcm_token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HeartbeatRequest {
    #[serde(default)]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DeviceAck {
    pub result: String,
    pub device_id: String,
}

impl DeviceAck {
    pub fn registered(device_id: String) -> Self {
        Self { result: "registered".to_string(), device_id }
    }

    pub fn ok(device_id: String) -> Self {
        Self { result: "ok".to_string(), device_id }
    }
}

/// A device as listed by the registry: the stored fields with the document key
/// merged in under `device_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceRecord {
    pub device_id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl DeviceRecord {
    pub fn fcm_token(&self) -> Option<&str> {
        self.fields.get(FCM_TOKEN_FIELD).and_then(Value::as_str)
    }

    pub fn status(&self) -> Option<&str> {
        self.fields.get(STATUS_FIELD).and_then(Value::as_str)
    }
}

impl From<Document> for DeviceRecord {
    fn from(document: Document) -> Self {
        let mut fields = document.fields;
        // The key wins over any stored copy of the id.
        fields.remove(DEVICE_ID_FIELD);
        Self { device_id: document.id, fields }
    }
}

/// Outcome of resolving a device's push token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    Found(String),
    NotFound,
    NoToken,
}
