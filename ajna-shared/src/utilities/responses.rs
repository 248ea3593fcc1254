use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE};
use http::StatusCode;
use lambda_http::{Response, Body};
use serde::Serialize;
use serde_json::json;
use crate::models::chat::GenerationReply;
use crate::models::errors::GatewayError;

pub fn success_response<T: Serialize>(data: T) -> Result<Response<Body>, lambda_http::Error> {
    response_with_code(data, StatusCode::OK)
}

pub fn gateway_error_response(err: &GatewayError) -> Result<Response<Body>, lambda_http::Error> {
    log::warn!("Request failed: {:?}", err);
    response_with_code(json!({"error": err.to_string()}), err.status_code())
}

pub fn not_found_response() -> Result<Response<Body>, lambda_http::Error> {
    response_with_code(json!({"error": "Not Found"}), StatusCode::NOT_FOUND)
}

pub fn response_with_code<T: Serialize>(data: T, code: StatusCode) -> Result<Response<Body>, lambda_http::Error> {
    let body = serde_json::to_string(&data).map_err(|_| lambda_http::Error::from("Serialization error"))?;
    log::info!("Response Code:{}\nBody: {}", code, body);
    Response::builder()
        .status(code)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::Text(body))
        .map_err(|e| {
            log::error!("Failed to build response: {:?}", e);
            lambda_http::Error::from("Failed to construct HTTP response")
        })
}

/// Relays a generation reply with the provider's own status and content type.
pub fn passthrough_response(reply: GenerationReply) -> Result<Response<Body>, lambda_http::Error> {
    let code = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
    log::info!("Relaying provider response with code {}", code);
    Response::builder()
        .status(code)
        .header(CONTENT_TYPE, reply.content_type)
        .body(Body::Text(reply.body))
        .map_err(|e| {
            log::error!("Failed to build response: {:?}", e);
            lambda_http::Error::from("Failed to construct HTTP response")
        })
}

/// Answers a CORS pre-flight request.
pub fn preflight_response() -> Result<Response<Body>, lambda_http::Error> {
    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header(ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
        .header(ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, X-API-Key")
        .body(Body::Empty)
        .map_err(|e| {
            log::error!("Failed to build response: {:?}", e);
            lambda_http::Error::from("Failed to construct HTTP response")
        })
}
