use std::time::Instant;
use lambda_http::{Body, Response};
use ajna_shared::models::device::DeviceRecord;
use ajna_shared::models::errors::GatewayError;
use ajna_shared::utilities::responses::{gateway_error_response, success_response};
use crate::state::AppState;

pub async fn handler(state: &AppState) -> Result<Response<Body>, lambda_http::Error> {
    match list_devices(state).await {
        Ok(devices) => success_response(devices),
        Err(err) => gateway_error_response(&err),
    }
}

async fn list_devices(state: &AppState) -> Result<Vec<DeviceRecord>, GatewayError> {
    let start_time = Instant::now();
    let devices = state.registry.list_devices().await?;

    let duration = start_time.elapsed().as_secs_f64();
    state.metrics.duration("ListDevices", duration).await;
    Ok(devices)
}
