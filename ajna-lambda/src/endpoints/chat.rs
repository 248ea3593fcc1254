use lambda_http::{Body, Response};
use serde_json::Value;
use ajna_shared::models::chat::{ChatRequest, ChatResponse};
use ajna_shared::models::errors::GatewayError;
use ajna_shared::utilities::requests::parse_body;
use ajna_shared::utilities::responses::{gateway_error_response, success_response};
use crate::state::AppState;

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match echo(state, body) {
        Ok(response) => success_response(response),
        Err(err) => gateway_error_response(&err),
    }
}

fn echo(state: &AppState, body: Value) -> Result<ChatResponse, GatewayError> {
    let request: ChatRequest = parse_body(body)?;
    let response = state.chat.echo(request.message)?;
    Ok(ChatResponse { response })
}
