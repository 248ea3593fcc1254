use serde::{Deserialize, Serialize};

pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
}

/// Body posted to the text-generation service.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
}

/// The provider's reply, relayed verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReply {
    pub status: u16,
    pub content_type: String,
    pub body: String,
}
