use serde::Deserialize;
use std::time::Duration;

use crate::error::{status_error, GenAiError};
use crate::schema::{deck_schema, Dialect};

const DEFAULT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Gemini `generateContent` client returning JSON text.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    pub model: String,
    api_base: String,
}

impl GeminiClient {
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

    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    pub fn request_body(prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": deck_schema(Dialect::Gemini),
            }
        })
    }

    /// One request, no retry. Returns the concatenated text parts of the
    /// first candidate.
    pub async fn generate_json(&self, prompt: &str) -> Result<String, GenAiError> {
        if self.api_key.trim().is_empty() {
            return Err(GenAiError::MissingApiKey { provider: "gemini" });
        }

        let body = Self::request_body(prompt);
        tracing::debug!(model = %self.model, "gemini request: {}", body);

        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        tracing::debug!(%status, bytes = text.len(), "gemini response");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        response_text(parsed)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

fn response_text(resp: GenerateContentResponse) -> Result<String, GenAiError> {
    if let Some(reason) = resp.prompt_feedback.and_then(|f| f.block_reason) {
        return Err(GenAiError::Blocked { reason });
    }

    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or(GenAiError::EmptyResponse)?;

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        let reason = candidate.finish_reason.unwrap_or_default();
        if matches!(reason.as_str(), "SAFETY" | "RECITATION" | "BLOCKLIST") {
            return Err(GenAiError::Blocked { reason });
        }
        return Err(GenAiError::EmptyResponse);
    }
    Ok(text)
}
