use std::time::Instant;
use lambda_http::{Body, Response};
use serde_json::Value;
use ajna_shared::models::device::{DeviceAck, HeartbeatRequest};
use ajna_shared::models::errors::GatewayError;
use ajna_shared::utilities::requests::parse_body;
use ajna_shared::utilities::responses::{gateway_error_response, success_response};
use crate::state::AppState;

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match heartbeat(state, body).await {
        Ok(response) => success_response(response),
        Err(err) => gateway_error_response(&err),
    }
}

async fn heartbeat(state: &AppState, body: Value) -> Result<DeviceAck, GatewayError> {
    let start_time = Instant::now();
    let request: HeartbeatRequest = parse_body(body)?;

    let device_id = state.registry.heartbeat(request.device_id).await?;

    let duration = start_time.elapsed().as_secs_f64();
    state.metrics.duration("Heartbeat", duration).await;
    Ok(DeviceAck::ok(device_id))
}
