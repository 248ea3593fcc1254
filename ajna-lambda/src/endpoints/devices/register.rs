use std::time::Instant;
use lambda_http::{Body, Response};
use serde_json::Value;
use ajna_shared::models::device::{DeviceAck, RegisterDeviceRequest};
use ajna_shared::models::errors::GatewayError;
use ajna_shared::utilities::requests::parse_body;
use ajna_shared::utilities::responses::{gateway_error_response, success_response};
use crate::state::AppState;

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match register_device(state, body).await {
        Ok(response) => success_response(response),
        Err(err) => gateway_error_response(&err),
    }
}

async fn register_device(state: &AppState, body: Value) -> Result<DeviceAck, GatewayError> {
    let start_time = Instant::now();
    let request: RegisterDeviceRequest = parse_body(body)?;

    let device_id = state.registry
        .register_device(request.device_id, request.fcm_token)
        .await?;

    let duration = start_time.elapsed().as_secs_f64();
    state.metrics.duration("RegisterDevice", duration).await;
    Ok(DeviceAck::registered(device_id))
}
