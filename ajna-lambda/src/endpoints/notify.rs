use std::time::Instant;
use lambda_http::{Body, Response};
use serde_json::Value;
use ajna_shared::models::errors::GatewayError;
use ajna_shared::models::notifications::{NotificationRequest, NotificationSent};
use ajna_shared::utilities::requests::parse_body;
use ajna_shared::utilities::responses::{gateway_error_response, success_response};
use crate::state::AppState;

pub async fn handler(state: &AppState, body: Value) -> Result<Response<Body>, lambda_http::Error> {
    match send_notification(state, body).await {
        Ok(response) => success_response(response),
        Err(err) => gateway_error_response(&err),
    }
}

async fn send_notification(state: &AppState, body: Value) -> Result<NotificationSent, GatewayError> {
    let start_time = Instant::now();
    let request: NotificationRequest = parse_body(body)?;

    let message_id = state.notifications
        .send_notification(request.device_id, request.title, request.body)
        .await?;

    let duration = start_time.elapsed().as_secs_f64();
    state.metrics.duration("SendNotification", duration).await;
    Ok(NotificationSent::new(message_id))
}
