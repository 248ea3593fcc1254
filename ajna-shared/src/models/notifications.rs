use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "AJNA";

#[derive(Debug, Default, Deserialize)]
pub struct NotificationRequest {
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationPayload {
    pub title: String,
    pub body: String,
}

impl NotificationPayload {
    pub fn with_defaults(title: Option<String>, body: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            body: body.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct NotificationSent {
    pub result: String,
    pub message_id: String,
}

impl NotificationSent {
    pub fn new(message_id: String) -> Self {
        Self { result: "sent".to_string(), message_id }
    }
}

#[derive(Deserialize, Debug)]
pub struct ServiceAccountKey {
    pub private_key: String,
    pub client_email: String,
    pub token_uri: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(Serialize)]
pub struct FirebaseClaims<'a> {
    pub iss: &'a str,
    pub scope: &'a str,
    pub aud: &'a str,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// FCM v1 `messages:send` reply; `name` is the provider's message id.
#[derive(Deserialize)]
pub struct FcmSendResponse {
    pub name: String,
}
