use http::Method;
use lambda_http::{Body, Request, Response};
use lambda_http::RequestExt;
use crate::endpoints::{chat, devices, health, llm, notify};
use crate::state::AppState;
use ajna_shared::utilities::authentication::{check_api_key, Access, PUBLIC_ROUTES};
use ajna_shared::utilities::requests::{extract_api_key, extract_body};
use ajna_shared::utilities::responses::{gateway_error_response, not_found_response, preflight_response};

const GET: &str = "GET";
const POST: &str = "POST";

const STAGE_PREFIXES: &[&str] = &["/dev", "/prod"];

/// Drops a leading API Gateway stage segment. `/devices` is not a stage.
fn strip_stage_prefix(raw_path: &str) -> &str {
    STAGE_PREFIXES
        .iter()
        .filter_map(|stage| raw_path.strip_prefix(*stage))
        .find(|rest| rest.is_empty() || rest.starts_with('/'))
        .map(|rest| if rest.is_empty() { "/" } else { rest })
        .unwrap_or(raw_path)
}

pub async fn handle_lambda(state: &AppState, event: Request) -> Result<Response<Body>, lambda_http::Error> {
    let raw_path = match event.raw_http_path() {
        "" => event.uri().path(),
        raw => raw,
    };
    let path = strip_stage_prefix(raw_path);

    log::info!("Received {} request for path: {}", event.method(), path);

    let access = check_api_key(
        state.config.api_key.as_deref(),
        event.method(),
        path,
        extract_api_key(&event),
        PUBLIC_ROUTES,
    );
    match access {
        Ok(Access::Unenforced) => state.metrics.count("AuthDisabled").await,
        Ok(Access::Granted) => {}
        Err(err) => return gateway_error_response(&err),
    }

    if event.method() == Method::OPTIONS {
        return preflight_response();
    }

    let event_body = extract_body(&event);
    log::debug!("Received request {:?}", event_body);

    match (event.method().as_str(), path) {
        //Monitor
        (GET, "/health") => health::handler().await,

        //Chat
        (POST, "/chat") => chat::handler(state, event_body).await,
        (POST, "/llm") => llm::handler(state, event_body).await,

        //Devices
        (POST, "/register-device") => devices::register::handler(state, event_body).await,
        (POST, "/heartbeat") => devices::heartbeat::handler(state, event_body).await,
        (GET, "/devices") => devices::list::handler(state).await,

        //Notifications
        (POST, "/notify") => notify::handler(state, event_body).await,

        //Not found
        _ => not_found_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_prefix_needs_segment_boundary() {
        assert_eq!(strip_stage_prefix("/devices"), "/devices");
        assert_eq!(strip_stage_prefix("/dev/devices"), "/devices");
        assert_eq!(strip_stage_prefix("/prod/devices"), "/devices");
        assert_eq!(strip_stage_prefix("/production/health"), "/production/health");
        assert_eq!(strip_stage_prefix("/dev"), "/");
    }
}
