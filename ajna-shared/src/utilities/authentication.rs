use http::Method;
use crate::models::errors::GatewayError;
use crate::utilities::logging::log_warn;

/// Routes reachable without the shared secret.
pub const PUBLIC_ROUTES: &[&str] = &["/health"];

/// Outcome of running a request through the API key gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    /// No secret is configured, so enforcement is off.
    Unenforced,
}

/// Checks the shared secret before any route handler runs.
///
/// Pre-flight requests and exempt routes always pass. With no secret configured
/// every request passes with a warning. Otherwise the supplied key must equal the
/// secret exactly.
pub fn check_api_key(
    expected: Option<&str>,
    method: &Method,
    path: &str,
    supplied: Option<&str>,
    exempt: &[&str],
) -> Result<Access, GatewayError> {
    if method == Method::OPTIONS || exempt.contains(&path) {
        return Ok(Access::Granted);
    }

    let Some(expected) = expected else {
        log_warn("AuthDisabled", &format!("API_KEY not configured, allowing {} {}", method, path));
        return Ok(Access::Unenforced);
    };

    match supplied {
        Some(key) if key == expected => Ok(Access::Granted),
        _ => {
            log_warn("AuthRejected", &format!("Rejected {} {}", method, path));
            Err(GatewayError::Unauthorized("invalid or missing API key".to_string()))
        }
    }
}
