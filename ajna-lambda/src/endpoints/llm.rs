use lambda_http::{Body, Response};
use serde_json::Value;
use ajna_shared::models::chat::{ChatRequest, GenerationReply};
use ajna_shared::models::errors::GatewayError;
use ajna_shared::utilities::requests::parse_body;
use ajna_shared::utilities::responses::{gateway_error_response, passthrough_response};
use crate::state::AppState;

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match generate(state, body).await {
        Ok(reply) => passthrough_response(reply),
        Err(err) => gateway_error_response(&err),
    }
}

async fn generate(state: &AppState, body: Value) -> Result<GenerationReply, GatewayError> {
    let request: ChatRequest = parse_body(body)?;
    state.chat.generate(request.message).await
}
