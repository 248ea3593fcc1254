use dotenv::dotenv;
use std::env;
use std::time::Duration;
use crate::models::errors::ConfigError;

pub const DEFAULT_DOCUMENT_TABLE: &str = "ajna-documents";
pub const DEFAULT_LLM_URL: &str = "http://127.0.0.1:11434/api/generate";
pub const DEFAULT_LLM_MODEL: &str = "llama3.2:3b";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;

/// Initialize dotenv (only needs to be called once at startup)
pub fn init() {
    if dotenv().is_ok() {
        log::info!("Loaded .env file");
    } else {
        log::info!("No .env file loaded");
    }
}

/// Fetch an environment variable, treating empty values as unset.
pub fn get_optional_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

pub fn get_env_var(key: &str) -> Result<String, ConfigError> {
    get_optional_env_var(key).ok_or_else(|| ConfigError::MissingEnv(key.to_string()))
}

pub fn get_api_key() -> Option<String> {
    get_optional_env_var("API_KEY")
}

pub fn get_document_table() -> String {
    get_optional_env_var("DEVICE_TABLE_NAME").unwrap_or_else(|| DEFAULT_DOCUMENT_TABLE.to_string())
}

pub fn get_firebase_credentials_path() -> Result<String, ConfigError> {
    get_env_var("FIREBASE_CREDENTIALS")
}

pub fn get_firebase_project_id() -> Option<String> {
    get_optional_env_var("FIREBASE_PROJECT_ID")
}

pub fn get_llm_url() -> String {
    get_optional_env_var("LLM_URL").unwrap_or_else(|| DEFAULT_LLM_URL.to_string())
}

pub fn get_llm_model() -> String {
    get_optional_env_var("LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string())
}

pub fn get_llm_timeout() -> Result<Duration, ConfigError> {
    match get_optional_env_var("LLM_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), raw)),
        None => Ok(Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS)),
    }
}

pub fn get_metrics_enabled() -> bool {
    get_optional_env_var("METRICS_ENABLED")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false)
}

pub fn get_environment() -> String {
    get_optional_env_var("ENVIRONMENT").unwrap_or_else(|| "dev".to_string())
}

/// Process-wide settings read once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// `None` disables API key enforcement.
    pub api_key: Option<String>,
    pub llm_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: get_api_key(),
            llm_url: get_llm_url(),
            llm_model: get_llm_model(),
            llm_timeout: get_llm_timeout()?,
        })
    }

    pub fn with_api_key(api_key: Option<&str>) -> Self {
        Self {
            api_key: api_key.map(str::to_string),
            ..Self::default()
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            llm_url: DEFAULT_LLM_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
        }
    }
}
