use std::sync::Arc;
use ajna_shared::database::client::get_dynamodb_client;
use ajna_shared::database::document_store::DocumentStore;
use ajna_shared::database::dynamo_document_store::DynamoDocumentStore;
use ajna_shared::services::cloudwatch_services::MetricsEmitter;
use ajna_shared::services::device_registry::DeviceRegistry;
use ajna_shared::services::generation_services::{ChatRelay, GenerationClient, OllamaClient};
use ajna_shared::services::notification_services::{FirebaseClient, NotificationRelay, PushClient};
use ajna_shared::utilities::config::{self, GatewayConfig};
use ajna_shared::utilities::logging::log_warn;

/// Everything a request handler needs, built once per process.
#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub registry: DeviceRegistry,
    pub notifications: NotificationRelay,
    pub chat: ChatRelay,
    pub metrics: MetricsEmitter,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn DocumentStore>,
        push: Arc<dyn PushClient>,
        generator: Arc<dyn GenerationClient>,
        metrics: MetricsEmitter,
    ) -> Self {
        let registry = DeviceRegistry::new(store);
        let notifications = NotificationRelay::new(registry.clone(), push, metrics.clone());
        let chat = ChatRelay::new(generator, metrics.clone());

        Self { config, registry, notifications, chat, metrics }
    }

    pub async fn from_env() -> anyhow::Result<Self> {
        let config = GatewayConfig::from_env()?;
        if config.api_key.is_none() {
            log_warn("AuthDisabled", "API_KEY is not set; requests will not be authenticated");
        }

        let metrics = MetricsEmitter::from_env().await;

        let store = DynamoDocumentStore::new(get_dynamodb_client().await, config::get_document_table());
        let push = FirebaseClient::new(
            &config::get_firebase_credentials_path()?,
            config::get_firebase_project_id(),
            metrics.clone(),
        )?;
        let generator = OllamaClient::new(&config.llm_url, &config.llm_model, config.llm_timeout)?;

        Ok(Self::new(config, Arc::new(store), Arc::new(push), Arc::new(generator), metrics))
    }
}
