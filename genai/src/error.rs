use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenAiError {
    #[error("no API key configured for {provider}")]
    MissingApiKey { provider: &'static str },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("the request was blocked: {reason}")]
    Blocked { reason: String },

    #[error("the model returned no text")]
    EmptyResponse,

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `{"error": {"message": ...}}`, shared by both providers.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
}

/// Best-effort human message for a non-2xx body.
pub(crate) fn status_error(status: u16, body: &str) -> GenAiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    GenAiError::Status { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_prefers_envelope_message() {
        let body = r#"{"error":{"code":429,"message":"rate limited","status":"RESOURCE_EXHAUSTED"}}"#;
        match status_error(429, body) {
            GenAiError::Status { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_status_error_falls_back_to_raw_body() {
        let err = status_error(502, "  Bad Gateway\n");
        assert_eq!(err.to_string(), "service returned 502: Bad Gateway");
    }
}
