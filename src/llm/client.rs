//! Chat-completion client.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// One system + user exchange with its sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Model API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
    #[error("Model returned no content")]
    EmptyCompletion,
}

/// Sends a chat request and returns the assistant's text.
pub trait ChatModel {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

impl<T: ChatModel + ?Sized> ChatModel for &T {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        (**self).complete(request)
    }
}

impl<T: ChatModel + ?Sized> ChatModel for Arc<T> {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        (**self).complete(request)
    }
}

// ─── Wire types ─────────────────────────────────────────────────

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireReply,
}

#[derive(Deserialize)]
struct WireReply {
    #[serde(default)]
    content: Option<String>,
}

// ─── OpenAI ─────────────────────────────────────────────────────

pub struct OpenAiChat {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiChat {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn wire_request<'a>(&'a self, request: &'a ChatRequest) -> WireRequest<'a> {
        WireRequest {
            model: &self.model,
            messages: [
                WireMessage { role: "system", content: &request.system },
                WireMessage { role: "user", content: &request.user },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            top_p: request.top_p,
        }
    }
}

impl ChatModel for OpenAiChat {
    fn complete(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, user = %request.user, "chat completion");

        let response = self
            .agent
            .post(&url)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .send_json(self.wire_request(request))
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => LlmError::Status {
                    status,
                    body: resp.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(t) => LlmError::Network(t.to_string()),
            })?;

        let parsed: WireResponse = response
            .into_json()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        first_content(parsed).ok_or_else(|| {
            warn!(model = %self.model, "completion had no content");
            LlmError::EmptyCompletion
        })
    }
}

fn first_content(response: WireResponse) -> Option<String> {
    response.choices.into_iter().next()?.message.content
}
