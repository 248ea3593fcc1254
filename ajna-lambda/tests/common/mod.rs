#![allow(dead_code)]

use std::sync::Arc;
use http::Method;
use lambda_http::{Body, Request, RequestExt, Response};
use serde_json::Value;
use ajna_lambda::state::AppState;
use ajna_shared::services::cloudwatch_services::MetricsEmitter;
use ajna_shared::utilities::config::GatewayConfig;
use ajna_shared::utilities::test::{init_logging, InMemoryDocumentStore, RecordingPushClient, StubGenerationClient};

pub const API_KEY: &str = "test-api-key-12345";

pub struct Harness {
    pub state: AppState,
    pub store: Arc<InMemoryDocumentStore>,
    pub push: Arc<RecordingPushClient>,
    pub generator: Arc<StubGenerationClient>,
}

impl Harness {
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_clients(
            api_key,
            RecordingPushClient::succeeding("mock-message-id-12345"),
            StubGenerationClient::replying(200, r#"{"response": "This is a generated response"}"#),
        )
    }

    pub fn with_clients(api_key: Option<&str>, push: RecordingPushClient, generator: StubGenerationClient) -> Self {
        init_logging();
        let store = Arc::new(InMemoryDocumentStore::new());
        let push = Arc::new(push);
        let generator = Arc::new(generator);
        let state = AppState::new(
            GatewayConfig::with_api_key(api_key),
            store.clone(),
            push.clone(),
            generator.clone(),
            MetricsEmitter::disabled(),
        );
        Self { state, store, push, generator }
    }

    pub async fn send(&self, request: Request) -> Response<Body> {
        ajna_lambda::router::handle_lambda(&self.state, request).await.unwrap()
    }
}

pub fn request(method: Method, path: &str, key: Option<&str>, body: Option<Value>) -> Request {
    let mut builder = http::Request::builder()
        .method(method)
        .uri(path.to_string())
        .header("Content-Type", "application/json");
    if let Some(key) = key {
        builder = builder.header("X-API-Key", key);
    }
    let body = match body {
        Some(json) => Body::from(json.to_string()),
        None => Body::Empty,
    };
    Request::from(builder.body(body).unwrap()).with_raw_http_path(path)
}

pub fn json_body(response: &Response<Body>) -> Value {
    if let Body::Text(body) = response.body() {
        serde_json::from_str(body).unwrap()
    } else {
        panic!("Response body is not text");
    }
}
