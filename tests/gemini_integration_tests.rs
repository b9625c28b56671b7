//! Tests for the Gemini backend.
//!
//! Offline tests talk to a one-shot local HTTP responder. The live test needs
//! `GEMINI_API_KEY` (or `GOOGLE_GENAI_API_KEY` / `GOOGLE_API_KEY`) and skips
//! itself otherwise.

#[cfg(all(test, feature = "gemini"))]
mod gemini_integration_tests {
    use medisage::form::{SymptomForm, submit};
    use medisage::{CauseExplainer, CauseRequest, GeminiClient, GeminiModel, MediSageError};
    use serde_json::json;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    const TEST_KEY: &str = "SECRET-KEY-123";

    /// Answer a single HTTP request with `status` and `body`.
    ///
    /// Returns the base URL to point the client at and a handle yielding the
    /// raw request that was received.
    async fn serve_once(status: &'static str, body: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind local responder");
        let addr = listener.local_addr().expect("No local address");

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("No connection");
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.expect("Read failed");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);

                let Some(head_end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
                    continue;
                };
                let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if request.len() >= head_end + 4 + content_length {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\n\
                 connection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket
                .write_all(response.as_bytes())
                .await
                .expect("Write failed");
            let _ = socket.shutdown().await;
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}/v1beta", addr), handle)
    }

    fn envelope(text: &str) -> String {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }]
        })
        .to_string()
    }

    fn explainer_for(base_url: &str) -> CauseExplainer<GeminiClient> {
        let client = GeminiClient::new(TEST_KEY)
            .expect("Failed to create Gemini client")
            .base_url(base_url)
            .timeout(Duration::from_secs(5))
            .build();
        CauseExplainer::new(client)
    }

    #[tokio::test]
    async fn test_valid_reply_is_returned_unmodified() {
        let text = "  1. Common cold: a virus irritates the airways.\n\n2. Low iron  ";
        let reply = json!({ "potentialCauses": text }).to_string();
        let (base_url, request) = serve_once("200 OK", envelope(&reply)).await;

        let response = explainer_for(&base_url)
            .generate_causes(&CauseRequest::new("cough, fatigue", ["Asthma", "Anemia"]))
            .await
            .expect("Gemini call failed");

        assert_eq!(response.potential_causes, text);

        let raw = request.await.expect("Responder panicked");
        let request_line = raw.lines().next().unwrap_or_default();
        assert!(request_line.starts_with("POST /v1beta/models/gemini-2.0-flash:generateContent"));
        assert!(!request_line.contains(TEST_KEY));
        assert!(
            raw.to_lowercase()
                .contains(&format!("x-goog-api-key: {}", TEST_KEY.to_lowercase()))
        );
        assert!(raw.contains("Selected Conditions: Asthma, Anemia"));
    }

    #[tokio::test]
    async fn test_null_field_in_reply_is_malformed() {
        let (base_url, request) =
            serve_once("200 OK", envelope(r#"{"potentialCauses": null}"#)).await;

        let result = explainer_for(&base_url)
            .generate_causes(&CauseRequest::new("fever", ["Malaria"]))
            .await;

        match result {
            Err(MediSageError::MalformedResponse(_)) => {}
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
        request.await.expect("Responder panicked");
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let body = json!({"error": {"code": 503, "message": "The model is overloaded."}});
        let (base_url, request) = serve_once("503 Service Unavailable", body.to_string()).await;

        let result = explainer_for(&base_url)
            .generate_causes(&CauseRequest::new("fever", ["Malaria"]))
            .await;

        match result {
            Err(MediSageError::BackendUnavailable(msg)) => {
                assert!(msg.contains("503"));
                assert!(!msg.contains(TEST_KEY));
            }
            other => panic!("Expected BackendUnavailable, got {:?}", other),
        }
        request.await.expect("Responder panicked");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        // Nothing listens on the discard port
        let explainer = explainer_for("http://127.0.0.1:9/v1beta");

        let result = explainer
            .generate_causes(&CauseRequest::new("cough", ["Asthma"]))
            .await;

        match result {
            Err(MediSageError::BackendUnavailable(_)) => {}
            other => panic!("Expected BackendUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_expose_api_key() {
        let explainer = explainer_for("http://127.0.0.1:9/v1beta");
        let mut form = SymptomForm::new();
        form.set_symptoms("cough");

        let submission = submit(&form, &explainer).await;

        let description = submission.notice().description;
        assert!(description.starts_with("Backend unavailable"));
        assert!(!description.contains(TEST_KEY));
    }

    #[tokio::test]
    async fn test_live_generate_causes() {
        let client = match GeminiClient::from_env() {
            Ok(client) => client,
            Err(_) => {
                println!("Skipping test: no Gemini API key set");
                return;
            }
        };

        let explainer = CauseExplainer::new(
            client
                .model(GeminiModel::Gemini20Flash)
                .timeout(Duration::from_secs(60))
                .build(),
        );
        let request = CauseRequest::new("persistent cough, fatigue", ["Asthma", "Anemia"]);

        let response = explainer
            .generate_causes(&request)
            .await
            .expect("Gemini call failed");

        assert!(!response.potential_causes.trim().is_empty());
    }
}
