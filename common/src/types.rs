use serde::{Deserialize, Serialize};

/// One slide of a generated deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub title: String,
    /// Bullet points in display order.
    pub content: Vec<String>,
    /// Presenter-only notes; never rendered on the slide body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker_notes: Option<String>,
}

impl Slide {
    pub fn new(title: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            title: title.into(),
            content,
            speaker_notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.speaker_notes = Some(notes.into());
        self
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.is_empty()
    }
}

/// Ordered slides of one presentation.
pub type Deck = Vec<Slide>;

/// Why a candidate value was rejected as a deck.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeckViolation {
    #[error("expected a list of slides, got {found}")]
    NotASequence { found: &'static str },

    #[error("slide {index} is not an object")]
    NotAnObject { index: usize },

    #[error("slide {index} has no title")]
    MissingTitle { index: usize },

    #[error("slide {index} has no content list")]
    MissingContent { index: usize },

    #[error("slide {index} has an empty content list")]
    EmptyContent { index: usize },

    #[error("slide {index} has a non-text bullet at position {position}")]
    NonTextBullet { index: usize, position: usize },

    #[error("slide {index} has non-text speaker notes")]
    NonTextNotes { index: usize },
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Checks a decoded JSON value against the slide invariant and converts it
/// into a [`Deck`]. Slide indices in violations are 1-based.
pub fn deck_from_value(value: &serde_json::Value) -> Result<Deck, DeckViolation> {
    let items = value.as_array().ok_or(DeckViolation::NotASequence {
        found: json_kind(value),
    })?;

    items
        .iter()
        .enumerate()
        .map(|(i, item)| slide_from_value(i + 1, item))
        .collect()
}

fn slide_from_value(index: usize, item: &serde_json::Value) -> Result<Slide, DeckViolation> {
    let obj = item
        .as_object()
        .ok_or(DeckViolation::NotAnObject { index })?;

    let title = obj
        .get("title")
        .and_then(|t| t.as_str())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(DeckViolation::MissingTitle { index })?;

    let bullets = obj
        .get("content")
        .and_then(|c| c.as_array())
        .ok_or(DeckViolation::MissingContent { index })?;
    if bullets.is_empty() {
        return Err(DeckViolation::EmptyContent { index });
    }
    let content = bullets
        .iter()
        .enumerate()
        .map(|(position, b)| {
            b.as_str()
                .map(str::to_string)
                .ok_or(DeckViolation::NonTextBullet {
                    index,
                    position: position + 1,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let speaker_notes = match obj.get("speakerNotes") {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => None,
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(_) => return Err(DeckViolation::NonTextNotes { index }),
    };

    Ok(Slide {
        title: title.to_string(),
        content,
        speaker_notes,
    })
}
