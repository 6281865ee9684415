use serde_json::Value;
use slide_common::{deck_from_value, Deck};

use crate::error::GenerationError;

/// Decode the raw model answer into a validated deck.
///
/// Accepts a bare JSON array or an object whose `slides` field holds the
/// array. A surrounding Markdown code fence is tolerated.
pub fn parse_deck(raw: &str) -> Result<Deck, GenerationError> {
    let text = strip_code_fence(raw.trim());
    let value: Value = serde_json::from_str(text).map_err(GenerationError::Parse)?;

    let value = match value {
        Value::Object(mut map) => match map.remove("slides") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };

    let deck = deck_from_value(&value).map_err(|violation| {
        tracing::warn!("Parsed data is not in the expected format: {violation}");
        GenerationError::Malformed(violation)
    })?;
    Ok(deck)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // drop the info string (`json`) up to the first newline
    let body = rest.split_once('\n').map_or("", |(_, body)| body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_array() {
        let raw = r#"
            [{"title":"Intro","content":["a","b","c"],"speakerNotes":"hi"}]
        "#;
        let deck = parse_deck(raw).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck[0].content.len(), 3);
    }

    #[test]
    fn test_parses_wrapped_object() {
        let raw = r#"{"slides":[{"title":"A","content":["x"]},{"title":"B","content":["y"]}]}"#;
        let deck = parse_deck(raw).unwrap();
        assert_eq!(
            deck.iter().map(|s| s.title.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_tolerates_code_fence() {
        let raw = "```json\n[{\"title\":\"A\",\"content\":[\"x\"]}]\n```";
        assert_eq!(parse_deck(raw).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = parse_deck("[{\"title\": ").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn test_schema_violation_is_malformed_not_parse() {
        let err = parse_deck(r#"[{"title":"A"}]"#).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
        let err = parse_deck(r#"{"title":"A","content":["x"]}"#).unwrap_err();
        assert!(matches!(err, GenerationError::Malformed(_)));
    }

    #[test]
    fn test_empty_array_is_not_an_error_here() {
        assert!(parse_deck(" [] ").unwrap().is_empty());
    }
}
