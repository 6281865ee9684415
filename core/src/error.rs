use std::path::PathBuf;
use thiserror::Error;

use slide_common::DeckViolation;
use slide_genai::GenAiError;

/// Every way a single generation attempt can fail.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No API key configured for {provider}.")]
    MissingApiKey { provider: &'static str },

    #[error("Failed to communicate with the AI service: {0}")]
    Transport(String),

    #[error("The AI service reported an error: {0}")]
    Service(String),

    #[error("Could not parse the AI response: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Received malformed slide data from AI: {0}")]
    Malformed(#[from] DeckViolation),

    /// Failures from injected generators that fit no other variant.
    #[error("{0}")]
    Other(String),
}

impl GenerationError {
    /// Parse and schema failures, as opposed to transport or service ones.
    pub fn is_malformed_response(&self) -> bool {
        matches!(self, GenerationError::Parse(_) | GenerationError::Malformed(_))
    }
}

impl From<GenAiError> for GenerationError {
    fn from(err: GenAiError) -> Self {
        match err {
            GenAiError::MissingApiKey { provider } => GenerationError::MissingApiKey { provider },
            GenAiError::Http(e) => GenerationError::Transport(e.to_string()),
            GenAiError::Status { status, message } => {
                GenerationError::Service(format!("{message} (HTTP {status})"))
            }
            GenAiError::Blocked { reason } => {
                GenerationError::Service(format!("the request was blocked ({reason})"))
            }
            GenAiError::EmptyResponse => {
                GenerationError::Service("the model returned no text".to_string())
            }
            GenAiError::Decode(e) => GenerationError::Parse(e),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("There are no slides to export.")]
    EmptyDeck,

    #[error("Failed to encode the presentation: {0}")]
    Encode(#[from] slide_pptx::PptxError),

    #[error("Failed to save {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_keeps_service_message() {
        let err: GenerationError = GenAiError::Status {
            status: 429,
            message: "rate limited".into(),
        }
        .into();
        assert!(err.to_string().contains("rate limited"));
        assert!(!err.is_malformed_response());
    }

    #[test]
    fn test_violation_is_malformed() {
        let err: GenerationError = DeckViolation::MissingTitle { index: 2 }.into();
        assert!(err.is_malformed_response());
        assert_eq!(
            err.to_string(),
            "Received malformed slide data from AI: slide 2 has no title"
        );
    }
}
