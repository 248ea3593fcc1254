use std::fs;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use async_trait::async_trait;
use tokio::sync::RwLock;
use chrono::{Utc, Duration, DateTime};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use crate::models::device::TokenLookup;
use crate::models::errors::{GatewayError, NotificationError};
use crate::models::notifications::{
    FcmSendResponse, FirebaseClaims, NotificationPayload, ServiceAccountKey, TokenResponse,
};
use crate::services::cloudwatch_services::MetricsEmitter;
use crate::services::device_registry::{require_device_id, DeviceRegistry};
use crate::utilities::logging::log_error;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const PUSH_TIMEOUT_SECS: u64 = 10;

/// Interface
#[async_trait]
pub trait PushClient: Send + Sync {
    /// Delivers one notification and returns the provider's message id.
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, NotificationError>;
}

/// Looks up a device's token and hands the notification to the push provider.
/// Never writes to the registry and never retries.
#[derive(Clone)]
pub struct NotificationRelay {
    registry: DeviceRegistry,
    push: Arc<dyn PushClient>,
    metrics: MetricsEmitter,
}

impl NotificationRelay {
    pub fn new(registry: DeviceRegistry, push: Arc<dyn PushClient>, metrics: MetricsEmitter) -> Self {
        Self { registry, push, metrics }
    }

    pub async fn send_notification(
        &self,
        device_id: Option<String>,
        title: Option<String>,
        body: Option<String>,
    ) -> Result<String, GatewayError> {
        let device_id = require_device_id(device_id)?;

        let token = match self.registry.device_token(&device_id).await? {
            TokenLookup::Found(token) => token,
            TokenLookup::NotFound => return Err(GatewayError::NotFound("unknown device".to_string())),
            TokenLookup::NoToken => return Err(GatewayError::NoToken),
        };

        let payload = NotificationPayload::with_defaults(title, body);

        match self.push.send(&token, &payload).await {
            Ok(message_id) => {
                log::info!("Notified device {} ({})", device_id, message_id);
                Ok(message_id)
            }
            Err(e) => {
                log_error("PushDeliveryFailed", &format!("device {}: {}", device_id, e));
                self.metrics.count("PushDeliveryFailures").await;
                Err(GatewayError::DeliveryFailed(e.to_string()))
            }
        }
    }
}

// Holds the service account and token cache
pub struct FirebaseClient {
    key: ServiceAccountKey,
    cached_token: Arc<RwLock<Option<(String, DateTime<Utc>)>>>,
    project_id: String,
    http: reqwest::Client,
    metrics: MetricsEmitter,
}

impl FirebaseClient {
    pub fn new(path: &str,
               project_id: Option<String>,
               metrics: MetricsEmitter) -> Result<Self, NotificationError> {
        let key = load_service_account_key(path)?;
        let project_id = project_id
            .or_else(|| key.project_id.clone())
            .ok_or_else(|| NotificationError::ServiceAccount(format!("No project_id in {} and FIREBASE_PROJECT_ID unset", path)))?;

        let http = reqwest::Client::builder()
            .timeout(StdDuration::from_secs(PUSH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            key,
            project_id,
            cached_token: Arc::new(RwLock::new(None)),
            http,
            metrics,
        })
    }

    async fn get_access_token(&self) -> Result<String, NotificationError> {
        let refresh_margin = Duration::minutes(5);
        let now = Utc::now();

        let mut guard = self.cached_token.write().await;
        if let Some((token, expiry)) = guard.as_ref() {
            let seconds_remaining = (*expiry - now).num_seconds();
            if *expiry - refresh_margin > now {
                log::debug!("[Push] Firebase token cache hit (expires in {}s)", seconds_remaining);
                self.metrics.count("FirebaseTokenCacheHits").await;
                return Ok(token.clone());
            }
            log::info!("[Push] Firebase token near expiry ({}s remaining), refreshing", seconds_remaining);
        } else {
            log::info!("[Push] Firebase token cache miss, no token loaded yet");
        }

        let jwt = create_jwt(&self.key)?;
        let token_response = match self.exchange_jwt_for_token(&jwt).await {
            Ok(t) => t,
            Err(e) => {
                self.metrics.count("FirebaseTokenRefreshFailures").await;
                return Err(e);
            }
        };

        let lifetime = token_response.expires_in.unwrap_or(3600) as i64;
        let expiry = Utc::now() + Duration::seconds(lifetime);
        *guard = Some((token_response.access_token.clone(), expiry));

        self.metrics.count("FirebaseTokenCacheMisses").await;
        log::info!("[Push] New Firebase token cached (valid until {})", expiry);

        Ok(token_response.access_token)
    }

    async fn exchange_jwt_for_token(&self, jwt: &str) -> Result<TokenResponse, NotificationError> {
        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", jwt),
        ];

        let res = self.http
            .post(&self.key.token_uri)
            .form(&params)
            .send()
            .await?;

        if !res.status().is_success() {
            let body = res.text().await?;
            return Err(NotificationError::TokenExchangeFailed(body));
        }

        Ok(res.json().await?)
    }
}

#[async_trait]
impl PushClient for FirebaseClient {
    async fn send(&self, token: &str, payload: &NotificationPayload) -> Result<String, NotificationError> {
        let access_token = self.get_access_token().await?;

        let message = serde_json::json!({
            "message": {
                "token": token,
                "notification": {
                    "title": payload.title,
                    "body": payload.body
                },
                "android": {
                    "priority": "high"
                }
            }
        });

        let url = format!(
            "https://fcm.googleapis.com/v1/projects/{}/messages:send",
            self.project_id
        );

        let res = self.http
            .post(&url)
            .bearer_auth(access_token)
            .json(&message)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await?;
            log::warn!("Push failed with {}: {}", status, text);
            return Err(NotificationError::FcmPushFailed(format!("Push failed: {}", text)));
        }

        let sent: FcmSendResponse = res.json().await?;
        Ok(sent.name)
    }
}

fn load_service_account_key(path: &str) -> Result<ServiceAccountKey, NotificationError> {
    let data = fs::read_to_string(path)
        .map_err(|e| NotificationError::ServiceAccount(format!("Unable to read key file at {}: {}", path, e)))?;

    serde_json::from_str(&data)
        .map_err(|e| NotificationError::ServiceAccount(format!("Invalid service account JSON in {}: {}", path, e)))
}

fn create_jwt(sa: &ServiceAccountKey) -> Result<String, NotificationError> {
    let now = Utc::now();
    let claims = FirebaseClaims {
        iss: &sa.client_email,
        scope: FCM_SCOPE,
        aud: &sa.token_uri,
        iat: now.timestamp(),
        exp: (now + Duration::minutes(60)).timestamp(),
    };

    let key = EncodingKey::from_rsa_pem(sa.private_key.replace("\\n", "\n").as_bytes())
        .map_err(|e| NotificationError::JwtCreation(format!("Invalid private key format: {}", e)))?;

    encode(&Header::new(Algorithm::RS256), &claims, &key)
        .map_err(|e| NotificationError::JwtCreation(e.to_string()))
}
