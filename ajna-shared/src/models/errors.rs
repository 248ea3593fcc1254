use http::StatusCode;
use reqwest::Error as ReqwestError;
use thiserror::Error;
use crate::database::errors::StoreError;

/// Every failure the gateway reports to a caller. The display text is the
/// `error` field of the JSON response body.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("no fcm_token for device")]
    NoToken,

    #[error("Empty response from LLM service")]
    UpstreamEmpty,

    #[error("LLM service unavailable")]
    UpstreamUnavailable,

    #[error("{0}")]
    DeliveryFailed(String),

    #[error("Document store error")]
    Store(#[from] StoreError),
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            GatewayError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::NoToken => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamEmpty => StatusCode::BAD_GATEWAY,
            GatewayError::UpstreamUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::DeliveryFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        GatewayError::InvalidInput(format!("missing {}", field))
    }

    pub fn required_field(field: &str) -> Self {
        GatewayError::InvalidInput(format!("{} is required", field))
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Failed to load service account key: {0}")]
    ServiceAccount(String),

    #[error("JWT creation failed: {0}")]
    JwtCreation(String),

    #[error("Token exchange failed: {0}")]
    TokenExchangeFailed(String),

    #[error("{0}")]
    FcmPushFailed(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("LLM request failed: {0}")]
    Transport(#[from] ReqwestError),

    #[error("LLM service returned {status}: {body}")]
    Status { status: u16, body: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_error_kind() {
        assert_eq!(GatewayError::missing_field("device_id").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::Unauthorized("x".into()).status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(GatewayError::NotFound("unknown device".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(GatewayError::NoToken.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(GatewayError::UpstreamEmpty.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(GatewayError::UpstreamUnavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(GatewayError::DeliveryFailed("boom".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_messages_match_public_contract() {
        assert_eq!(GatewayError::missing_field("device_id").to_string(), "missing device_id");
        assert_eq!(GatewayError::NoToken.to_string(), "no fcm_token for device");
        assert!(GatewayError::Unauthorized("invalid or missing API key".into()).to_string().starts_with("Unauthorized"));
        assert!(GatewayError::UpstreamEmpty.to_string().to_lowercase().contains("empty"));
        assert!(GatewayError::UpstreamUnavailable.to_string().to_lowercase().contains("unavailable"));
    }
}
