use chrono::Utc;
use lambda_http::{Body, Response};
use serde::Serialize;
use ajna_shared::utilities::responses::success_response;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub time: String,
}

pub async fn handle() -> HealthResponse {
    HealthResponse { status: "ok".to_string(), time: Utc::now().to_rfc3339() }
}

pub async fn handler() -> Result<Response<Body>, lambda_http::Error> {
    success_response(handle().await)
}
