mod common;

#[cfg(test)]
mod tests {
    use http::Method;
    use serde_json::json;
    use crate::common::{json_body, request, Harness, API_KEY};

    #[tokio::test]
    async fn test_health_is_public() {
        let harness = Harness::new(Some(API_KEY));

        let response = harness.send(request(Method::GET, "/health", None, None)).await;

        assert_eq!(response.status(), 200);
        let body = json_body(&response);
        assert_eq!(body["status"], "ok");
        let time = body["time"].as_str().unwrap();
        assert!(time.contains('T'));
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok());
    }

    #[tokio::test]
    async fn test_stage_prefix_is_stripped() {
        let harness = Harness::new(Some(API_KEY));

        let response = harness.send(request(Method::GET, "/dev/health", None, None)).await;
        assert_eq!(response.status(), 200);

        for path in ["/devices", "/dev/devices", "/prod/devices"] {
            let response = harness.send(request(Method::GET, path, Some(API_KEY), None)).await;
            assert_eq!(response.status(), 200, "GET {}", path);
            assert_eq!(json_body(&response), json!([]));
        }
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let harness = Harness::new(Some(API_KEY));

        let response = harness.send(request(Method::GET, "/unknown", Some(API_KEY), None)).await;

        assert_eq!(response.status(), 404);
        assert_eq!(json_body(&response), json!({"error": "Not Found"}));
    }

    #[tokio::test]
    async fn test_protected_routes_require_key() {
        let harness = Harness::new(Some(API_KEY));
        let routes = [
            (Method::POST, "/chat", Some(json!({"message": "test"}))),
            (Method::POST, "/llm", Some(json!({"message": "test"}))),
            (Method::POST, "/register-device", Some(json!({"device_id": "test-123"}))),
            (Method::POST, "/notify", Some(json!({"device_id": "test-123", "title": "Test", "body": "Test"}))),
            (Method::GET, "/devices", None),
            (Method::POST, "/heartbeat", Some(json!({"device_id": "test-123"}))),
        ];

        for (method, path, body) in routes {
            let response = harness.send(request(method, path, None, body)).await;
            assert_eq!(response.status(), 401, "{} was not protected", path);
            let error = json_body(&response)["error"].as_str().unwrap().to_string();
            assert!(error.contains("Unauthorized"));
        }

        assert_eq!(harness.store.calls(), 0);
        assert!(harness.push.sent().is_empty());
        assert!(harness.generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_empty_and_miscased_keys_are_rejected() {
        let harness = Harness::new(Some(API_KEY));

        for key in ["wrong-key", "", "TEST-API-KEY-12345"] {
            let response = harness
                .send(request(Method::POST, "/chat", Some(key), Some(json!({"message": "test"}))))
                .await;
            assert_eq!(response.status(), 401, "accepted key {:?}", key);
        }
    }

    #[tokio::test]
    async fn test_valid_key_with_lowercase_header_name() {
        let harness = Harness::new(Some(API_KEY));
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/chat")
            .header("x-api-key", API_KEY)
            .body(lambda_http::Body::from(json!({"message": "test"}).to_string()))
            .unwrap();

        let response = harness.send(request).await;

        assert_eq!(response.status(), 200);
        assert_eq!(json_body(&response), json!({"response": "Echo: test"}));
    }

    #[tokio::test]
    async fn test_preflight_is_never_unauthorized() {
        let harness = Harness::new(Some(API_KEY));

        let response = harness.send(request(Method::OPTIONS, "/chat", None, None)).await;

        assert_ne!(response.status(), 401);
        assert_eq!(response.status(), 204);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_missing_secret_disables_enforcement() {
        let harness = Harness::new(None);

        let response = harness
            .send(request(Method::POST, "/chat", None, Some(json!({"message": "hi"}))))
            .await;

        assert_eq!(response.status(), 200);
    }
}
