use serde::Deserialize;
use std::time::Duration;

use crate::error::{status_error, GenAiError};
use crate::schema::{wrapped_deck_schema, Dialect};

const DEFAULT_BASE: &str = "https://api.openai.com/v1";

/// OpenAI-compatible Chat Completions client using structured outputs.
///
/// The API only accepts an object at the schema root, so the deck comes back
/// as `{"slides": [...]}`.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    pub model: String,
    api_base: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, GenAiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key,
            model,
            api_base: DEFAULT_BASE.to_string(),
        })
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "slide_deck",
                    "schema": wrapped_deck_schema(Dialect::JsonSchema),
                }
            }
        })
    }

    pub async fn generate_json(&self, prompt: &str) -> Result<String, GenAiError> {
        if self.api_key.trim().is_empty() {
            return Err(GenAiError::MissingApiKey { provider: "openai" });
        }

        let body = self.request_body(prompt);
        tracing::debug!(model = %self.model, "openai request: {}", body);

        let mut req = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key);
        if let Ok(project) = std::env::var("OPENAI_PROJECT") {
            if !project.is_empty() {
                req = req.header("OpenAI-Project", project);
            }
        }
        if let Ok(org) = std::env::var("OPENAI_ORG") {
            if !org.is_empty() {
                req = req.header("OpenAI-Organization", org);
            }
        }

        let resp = req.json(&body).send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "openai response");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        let parsed: ChatCompletion = serde_json::from_str(&text)?;
        completion_text(parsed)
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
    refusal: Option<String>,
}

fn completion_text(resp: ChatCompletion) -> Result<String, GenAiError> {
    let message = resp
        .choices
        .into_iter()
        .next()
        .map(|c| c.message)
        .ok_or(GenAiError::EmptyResponse)?;

    if let Some(reason) = message.refusal.filter(|r| !r.is_empty()) {
        return Err(GenAiError::Blocked { reason });
    }
    message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or(GenAiError::EmptyResponse)
}
