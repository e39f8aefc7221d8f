//! LLM gateway backed by the Gemini `generateContent` REST endpoint.
//!
//! One `reqwest::Client` is built at startup and shared by every request.
//! The raw JSON reply is returned untouched; picking the text out of
//! `candidates` is left to the reply normalizers.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use snapquiz_application::ports::llm_gateway::{GatewayError, LlmGateway};
use snapquiz_domain::Model;
use snapquiz_domain::core::string::truncate;
use std::time::Duration;
use tracing::debug;

const API_KEY_HEADER: &str = "x-goog-api-key";
const ERROR_BODY_PREVIEW: usize = 500;

/// [`LlmGateway`] implementation for Google Gemini.
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiGateway {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("snapquiz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self, model: &Model) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            model.as_str()
        )
    }

    fn request_body(prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        })
    }
}

/// Map a reqwest failure onto the gateway error taxonomy.
fn map_reqwest_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::ConnectionError(e.to_string())
    } else if e.is_decode() {
        GatewayError::InvalidResponse(e.to_string())
    } else {
        GatewayError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(
        &self,
        model: &Model,
        prompt: &str,
        timeout: Duration,
    ) -> Result<Value, GatewayError> {
        let mut request = self
            .client
            .post(self.endpoint(model))
            .timeout(timeout)
            .json(&Self::request_body(prompt));
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        debug!(model = %model, prompt_bytes = prompt.len(), "Sending generateContent request");
        let response = request.send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::NOT_FOUND => GatewayError::ModelNotAvailable(model.to_string()),
                _ => GatewayError::RequestFailed(format!(
                    "HTTP {}: {}",
                    status,
                    truncate(body.trim(), ERROR_BODY_PREVIEW)
                )),
            });
        }

        response.json::<Value>().await.map_err(map_reqwest_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

    fn gateway(server: &MockServer, key: Option<&str>) -> GeminiGateway {
        GeminiGateway::new(server.uri(), key.map(str::to_string)).unwrap()
    }

    #[tokio::test]
    async fn test_generate_returns_raw_reply() {
        let server = MockServer::start().await;
        let reply = json!({
            "candidates": [{"content": {"parts": [{"text": "{\"choice\":\"A\"}"}]}}]
        });

        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "secret"))
            .and(body_json(json!({
                "contents": [{"parts": [{"text": "Question?"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway(&server, Some("secret"))
            .generate(&Model::Gemini20Flash, "Question?", Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(result, reply);
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/custom-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "ok"})))
            .mount(&server)
            .await;

        let gateway = GeminiGateway::new(format!("{}/", server.uri()), None).unwrap();
        let result = gateway
            .generate(
                &Model::Custom("custom-model".to_string()),
                "p",
                Duration::from_secs(5),
            )
            .await
            .unwrap();
        assert_eq!(result["text"], "ok");
    }

    #[tokio::test]
    async fn test_http_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = gateway(&server, Some("k"))
            .generate(&Model::Gemini20Flash, "p", Duration::from_secs(5))
            .await
            .unwrap_err();

        match err {
            GatewayError::RequestFailed(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unknown_model_is_not_available() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = gateway(&server, Some("k"))
            .generate(&Model::Gemini25Pro, "p", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::ModelNotAvailable("gemini-2.5-pro".to_string())
        );
    }

    #[tokio::test]
    async fn test_slow_reply_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"text": "late"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let err = gateway(&server, None)
            .generate(&Model::Gemini20Flash, "p", Duration::from_millis(100))
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Timeout);
    }

    #[tokio::test]
    async fn test_non_json_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = gateway(&server, None)
            .generate(&Model::Gemini20Flash, "p", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_refused_connection() {
        // Bind then drop a listener to get a port nobody listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let gateway = GeminiGateway::new(format!("http://127.0.0.1:{}", port), None).unwrap();

        let err = gateway
            .generate(&Model::Gemini20Flash, "p", Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }
}
