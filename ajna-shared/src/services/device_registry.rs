use std::sync::Arc;
use crate::database::document_store::{DocumentStore, FieldValue, WriteFields};
use crate::models::device::{
    DeviceRecord, TokenLookup, DEVICE_COLLECTION, FCM_TOKEN_FIELD, LAST_SEEN_FIELD, STATUS_FIELD, STATUS_ONLINE,
};
use crate::models::errors::GatewayError;
use crate::utilities::logging::log_info;
use crate::utilities::requests::require_non_empty;

/// Owns the device records in the document store. Nothing is cached: every
/// read goes to the store.
#[derive(Clone)]
pub struct DeviceRegistry {
    store: Arc<dyn DocumentStore>,
}

impl DeviceRegistry {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Upserts the device's token and marks it online. A missing token is stored as null.
    pub async fn register_device(
        &self,
        device_id: Option<String>,
        fcm_token: Option<String>,
    ) -> Result<String, GatewayError> {
        let device_id = require_device_id(device_id)?;

        let fields = WriteFields::from([
            (FCM_TOKEN_FIELD.to_string(), FieldValue::from(fcm_token)),
            (STATUS_FIELD.to_string(), FieldValue::from(STATUS_ONLINE)),
        ]);
        self.store.set(DEVICE_COLLECTION, &device_id, fields, true).await?;

        log_info("DeviceRegistered", &device_id);
        Ok(device_id)
    }

    /// Stamps `last_seen` with the store's clock and marks the device online.
    pub async fn heartbeat(&self, device_id: Option<String>) -> Result<String, GatewayError> {
        let device_id = require_device_id(device_id)?;

        let fields = WriteFields::from([
            (LAST_SEEN_FIELD.to_string(), FieldValue::ServerTimestamp),
            (STATUS_FIELD.to_string(), FieldValue::from(STATUS_ONLINE)),
        ]);
        self.store.set(DEVICE_COLLECTION, &device_id, fields, true).await?;

        log_info("DeviceHeartbeat", &device_id);
        Ok(device_id)
    }

    /// Every stored device, in whatever order the store yields them.
    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>, GatewayError> {
        let documents = self.store.stream(DEVICE_COLLECTION).await?;
        Ok(documents.into_iter().map(DeviceRecord::from).collect())
    }

    pub async fn device_token(&self, device_id: &str) -> Result<TokenLookup, GatewayError> {
        let document = match self.store.get(DEVICE_COLLECTION, device_id).await? {
            Some(document) => document,
            None => return Ok(TokenLookup::NotFound),
        };

        let lookup = match DeviceRecord::from(document).fcm_token() {
            Some(token) if !token.is_empty() => TokenLookup::Found(token.to_string()),
            _ => TokenLookup::NoToken,
        };
        Ok(lookup)
    }
}

pub fn require_device_id(device_id: Option<String>) -> Result<String, GatewayError> {
    require_non_empty(device_id, || GatewayError::missing_field("device_id"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use crate::utilities::test::InMemoryDocumentStore;

    fn registry() -> (Arc<InMemoryDocumentStore>, DeviceRegistry) {
        let store = Arc::new(InMemoryDocumentStore::new());
        (store.clone(), DeviceRegistry::new(store))
    }

    #[tokio::test]
    async fn test_register_rejects_missing_id_without_touching_store() {
        let (store, registry) = registry();

        for device_id in [None, Some(String::new())] {
            let result = registry.register_device(device_id, Some("tok".into())).await;
            assert!(matches!(result, Err(GatewayError::InvalidInput(ref m)) if m == "missing device_id"));
        }
        assert!(matches!(registry.heartbeat(None).await, Err(GatewayError::InvalidInput(_))));

        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_register_stores_null_token_and_online_status() {
        let (store, registry) = registry();

        let id = registry.register_device(Some("d1".into()), None).await.unwrap();

        assert_eq!(id, "d1");
        let document = store.document("devices", "d1").unwrap();
        assert_eq!(Value::Object(document.fields), json!({"fcm_token": null, "status": "online"}));
    }

    #[tokio::test]
    async fn test_register_twice_keeps_heartbeat_fields() {
        let (store, registry) = registry();

        registry.register_device(Some("d1".into()), Some("first".into())).await.unwrap();
        registry.heartbeat(Some("d1".into())).await.unwrap();
        registry.register_device(Some("d1".into()), Some("second".into())).await.unwrap();

        let document = store.document("devices", "d1").unwrap();
        assert_eq!(document.field("fcm_token"), Some(&json!("second")));
        assert_eq!(document.field("status"), Some(&json!("online")));
        assert!(document.field("last_seen").is_some());
    }

    #[tokio::test]
    async fn test_heartbeat_leaves_token_untouched() {
        let (store, registry) = registry();

        registry.register_device(Some("d1".into()), Some("tok".into())).await.unwrap();
        registry.heartbeat(Some("d1".into())).await.unwrap();

        let document = store.document("devices", "d1").unwrap();
        assert_eq!(document.field("fcm_token"), Some(&json!("tok")));
        let last_seen = document.field("last_seen").and_then(Value::as_str).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(last_seen).is_ok());
    }

    #[tokio::test]
    async fn test_heartbeat_creates_unknown_device() {
        let (store, registry) = registry();

        registry.heartbeat(Some("fresh".into())).await.unwrap();

        let document = store.document("devices", "fresh").unwrap();
        assert!(document.field("fcm_token").is_none());
        assert_eq!(document.field("status"), Some(&json!("online")));
    }

    #[tokio::test]
    async fn test_list_devices_merges_ids() {
        let (_store, registry) = registry();

        registry.register_device(Some("a".into()), Some("ta".into())).await.unwrap();
        registry.register_device(Some("b".into()), None).await.unwrap();

        let mut ids: Vec<String> = registry.list_devices().await.unwrap()
            .into_iter()
            .map(|record| record.device_id)
            .collect();
        ids.sort();

        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_device_token_lookup() {
        let (store, registry) = registry();

        registry.register_device(Some("with".into()), Some("tok".into())).await.unwrap();
        registry.register_device(Some("without".into()), None).await.unwrap();
        registry.register_device(Some("empty".into()), Some(String::new())).await.unwrap();
        store.insert("devices", "bare", json!({"status": "online"}));

        assert_eq!(registry.device_token("with").await.unwrap(), TokenLookup::Found("tok".into()));
        assert_eq!(registry.device_token("without").await.unwrap(), TokenLookup::NoToken);
        assert_eq!(registry.device_token("empty").await.unwrap(), TokenLookup::NoToken);
        assert_eq!(registry.device_token("bare").await.unwrap(), TokenLookup::NoToken);
        assert_eq!(registry.device_token("missing").await.unwrap(), TokenLookup::NotFound);
    }

    #[tokio::test]
    async fn test_store_failure_surfaces_as_store_error() {
        let (store, registry) = registry();
        store.fail_with("connection reset");

        let result = registry.register_device(Some("d1".into()), None).await;

        assert!(matches!(result, Err(GatewayError::Store(_))));
    }
}
