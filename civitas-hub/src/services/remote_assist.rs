//! External assist API client
//!
//! Forwards assist calls to a remote model service speaking the same JSON
//! shapes as this hub's `/api/ai/*` endpoints. Any network, HTTP or parse
//! failure degrades to the local [`FallbackAssist`] result.

use async_trait::async_trait;
use civitas_common::assist::{
    FallbackAssist, PromptContext, ProofreadOptions, RewriteOptions, SummaryOptions, TextAssist,
    TranslateOptions,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("civitas-hub/", env!("CARGO_PKG_VERSION"));

/// Remote assist errors
#[derive(Debug, Error)]
pub enum AssistError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Remote assist backend with local fallback
pub struct RemoteAssist {
    http_client: reqwest::Client,
    base_url: String,
    fallback: FallbackAssist,
}

impl RemoteAssist {
    /// Create a client for `base_url` (e.g. `http://host:5780/api/ai`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AssistError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AssistError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            fallback: FallbackAssist,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `body` to `{base_url}/{path}` and return the string in `field`
    async fn call<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        field: &str,
    ) -> Result<String, AssistError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Calling remote assist API");

        let response = self
            .http_client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AssistError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AssistError::ApiError(status.as_u16(), error_text));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AssistError::ParseError(e.to_string()))?;

        value
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| AssistError::ParseError(format!("missing string field '{}'", field)))
    }

    fn degrade(&self, operation: &str, error: &AssistError) {
        warn!(
            operation = operation,
            base_url = %self.base_url,
            "Remote assist failed, using local fallback: {}",
            error
        );
    }
}

#[async_trait]
impl TextAssist for RemoteAssist {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn summarize(&self, text: &str, options: &SummaryOptions) -> String {
        let body = json!({
            "text": text,
            "max_length": options.max_length,
            "style": options.style,
        });
        match self.call("summarize", &body, "summary").await {
            Ok(summary) => summary,
            Err(e) => {
                self.degrade("summarize", &e);
                self.fallback.summarize(text, options).await
            }
        }
    }

    async fn proofread(&self, text: &str, options: &ProofreadOptions) -> String {
        let body = json!({
            "text": text,
            "language": options.language,
            "style": options.style,
        });
        match self.call("proofread", &body, "proofread_text").await {
            Ok(proofread) => proofread,
            Err(e) => {
                self.degrade("proofread", &e);
                self.fallback.proofread(text, options).await
            }
        }
    }

    async fn rewrite(&self, text: &str, options: &RewriteOptions) -> String {
        let body = json!({
            "text": text,
            "tone": options.tone,
            "style": options.style,
            "audience": options.audience,
        });
        match self.call("rewrite", &body, "rewritten_text").await {
            Ok(rewritten) => rewritten,
            Err(e) => {
                self.degrade("rewrite", &e);
                self.fallback.rewrite(text, options).await
            }
        }
    }

    async fn translate(&self, text: &str, options: &TranslateOptions) -> String {
        let body = json!({
            "text": text,
            "target_language": options.target_language,
            "source_language": options.source_language,
        });
        match self.call("translate", &body, "translated_text").await {
            Ok(translated) => translated,
            Err(e) => {
                self.degrade("translate", &e);
                self.fallback.translate(text, options).await
            }
        }
    }

    async fn generate_prompt(&self, prompt: &PromptContext) -> String {
        match self.call("generate-prompt", prompt, "prompt").await {
            Ok(generated) => generated,
            Err(e) => {
                self.degrade("generate_prompt", &e);
                self.fallback.generate_prompt(prompt).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    /// Serve a stub assist API on an ephemeral port and return its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_uses_remote_result_when_available() {
        let router = Router::new()
            .route("/summarize", post(|| async { Json(json!({"summary": "remote summary"})) }))
            .route("/generate-prompt", post(|Json(body): Json<Value>| async move {
                Json(json!({"prompt": format!("remote plan for {}", body["context"].as_str().unwrap_or(""))}))
            }));
        let base_url = spawn_stub(router).await;
        let assist = RemoteAssist::new(base_url, Duration::from_secs(5)).unwrap();

        assert_eq!(
            assist.summarize("anything at all", &SummaryOptions::default()).await,
            "remote summary"
        );
        let prompt = PromptContext {
            context: "wildfire".to_string(),
            ..PromptContext::default()
        };
        assert_eq!(assist.generate_prompt(&prompt).await, "remote plan for wildfire");
    }

    #[tokio::test]
    async fn test_http_error_falls_back() {
        let router = Router::new().route(
            "/rewrite",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "busy") }),
        );
        let base_url = spawn_stub(router).await;
        let assist = RemoteAssist::new(base_url, Duration::from_secs(5)).unwrap();

        assert_eq!(
            assist.rewrite("URGENT", &RewriteOptions::default()).await,
            "CRITICAL"
        );
    }

    #[tokio::test]
    async fn test_missing_field_falls_back() {
        let router = Router::new().route(
            "/translate",
            post(|| async { Json(json!({"unexpected": true})) }),
        );
        let base_url = spawn_stub(router).await;
        let assist = RemoteAssist::new(base_url, Duration::from_secs(5)).unwrap();

        assert_eq!(
            assist.translate("Flood danger", &TranslateOptions::to("es")).await,
            "inundación peligro"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_falls_back() {
        // Bind then drop to get a port with nothing listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let assist = RemoteAssist::new(format!("http://{}/", addr), Duration::from_secs(2)).unwrap();
        assert_eq!(assist.base_url(), format!("http://{}", addr));

        assert_eq!(
            assist.proofread("hello world", &ProofreadOptions::default()).await,
            "Hello world."
        );
    }
}
