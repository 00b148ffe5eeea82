//! HttpCompletionClient -- concrete [`CompletionClient`] for a flat
//! prompt-in, text-out completion endpoint.
//!
//! POSTs `{prompt, max_tokens, temperature}` with a bearer token and
//! classifies the answer with [`CompletionBody`]. Any timeout, transport
//! failure or non-2xx status comes back as a [`CompletionError`].
//!
//! The API key is wrapped in [`secrecy::SecretString`] and never logged.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use batbot_core::llm::CompletionClient;
use batbot_core::text::truncate_chars;
use batbot_types::completion::{CompletionBody, CompletionRequest};
use batbot_types::config::CompletionConfig;
use batbot_types::error::CompletionError;

/// Longest error body kept in a `Status` error.
const ERROR_BODY_CHARS: usize = 200;

pub struct HttpCompletionClient {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
    timeout: Duration,
}

impl HttpCompletionClient {
    /// Build a client for `config.endpoint()` with the configured timeout.
    pub fn new(api_key: SecretString, config: &CompletionConfig) -> Result<Self, CompletionError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CompletionError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_send_error(&self, err: reqwest::Error) -> CompletionError {
        if err.is_timeout() {
            CompletionError::Timeout {
                secs: self.timeout.as_secs(),
            }
        } else {
            CompletionError::Transport(format!("HTTP request failed: {err}"))
        }
    }
}

// No Debug derive: keeps the key out of formatted output entirely.

impl CompletionClient for HttpCompletionClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "Completion service rejected request");
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, ERROR_BODY_CHARS),
            });
        }

        let parsed = CompletionBody::from_body(&body);
        tracing::debug!(shape = parsed.shape(), "Completion response received");
        Ok(parsed.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> CompletionConfig {
        CompletionConfig {
            base_url: server.uri(),
            ..CompletionConfig::default()
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "Batman dark-witty one-liner reply: \"hi\"".to_string(),
            max_tokens: 90,
            temperature: 0.8,
        }
    }

    fn client(server: &MockServer) -> HttpCompletionClient {
        HttpCompletionClient::new(SecretString::from("test-key-not-real"), &config_for(server))
            .unwrap()
    }

    #[tokio::test]
    async fn test_direct_shape_is_trimmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/complete"))
            .and(header("authorization", "Bearer test-key-not-real"))
            .and(body_json(json!({
                "prompt": "Batman dark-witty one-liner reply: \"hi\"",
                "max_tokens": 90,
                "temperature": 0.8
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"completion": "  Gotham remembers. 🦇 \n"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let text = client(&server).complete(&request()).await.unwrap();
        assert_eq!(text, "Gotham remembers. 🦇");
    }

    #[tokio::test]
    async fn test_choices_shape_uses_first_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/complete"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"text": "First."}, {"text": "Second."}]
            })))
            .mount(&server)
            .await;

        let text = client(&server).complete(&request()).await.unwrap();
        assert_eq!(text, "First.");
    }

    #[tokio::test]
    async fn test_unknown_json_is_returned_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": 1})))
            .mount(&server)
            .await;

        let text = client(&server).complete(&request()).await.unwrap();
        assert_eq!(text, r#"{"unexpected":1}"#);
    }

    #[tokio::test]
    async fn test_non_json_body_is_returned_raw() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("  plain words "))
            .mount(&server)
            .await;

        let text = client(&server).complete(&request()).await.unwrap();
        assert_eq!(text, "plain words");
    }

    #[tokio::test]
    async fn test_error_status_is_tagged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client(&server).complete(&request()).await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_large_error_body_is_cut() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>".repeat(1_000)))
            .mount(&server)
            .await;

        let err = client(&server).complete(&request()).await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.chars().count(), ERROR_BODY_CHARS);
                assert!(body.starts_with("<html><html>"));
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"completion": "late"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = CompletionConfig {
            timeout_secs: 1,
            ..config_for(&server)
        };
        let client = HttpCompletionClient::new(SecretString::from("k"), &config).unwrap();
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Timeout { secs: 1 }));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let config = CompletionConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..CompletionConfig::default()
        };
        let client = HttpCompletionClient::new(SecretString::from("k"), &config).unwrap();
        let err = client.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let config = CompletionConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..CompletionConfig::default()
        };
        let client = HttpCompletionClient::new(SecretString::from("k"), &config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/v1/complete");
        assert_eq!(client.name(), "http");
    }
}
