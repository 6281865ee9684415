use serde_json::{json, Value};

const TITLE_DESC: &str = "The title of the slide. Should be concise and engaging.";
const CONTENT_DESC: &str = "An array of strings, where each string is a bullet point for the slide body. Aim for 3-5 clear and informative points.";
const NOTES_DESC: &str = "Brief notes for the presenter for this specific slide. These notes will not be visible on the slide itself.";

/// Gemini takes the OpenAPI subset with upper-case type names; OpenAI takes
/// plain JSON Schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Gemini,
    JsonSchema,
}

impl Dialect {
    fn ty(self, name: &str) -> String {
        match self {
            Dialect::Gemini => name.to_ascii_uppercase(),
            Dialect::JsonSchema => name.to_string(),
        }
    }
}

/// One slide: `title` and `content` required, `speakerNotes` optional.
pub fn slide_schema(dialect: Dialect) -> Value {
    json!({
        "type": dialect.ty("object"),
        "properties": {
            "title": { "type": dialect.ty("string"), "description": TITLE_DESC },
            "content": {
                "type": dialect.ty("array"),
                "description": CONTENT_DESC,
                "items": { "type": dialect.ty("string") }
            },
            "speakerNotes": { "type": dialect.ty("string"), "description": NOTES_DESC }
        },
        "required": ["title", "content"]
    })
}

/// Ordered list of slides.
pub fn deck_schema(dialect: Dialect) -> Value {
    json!({
        "type": dialect.ty("array"),
        "items": slide_schema(dialect)
    })
}

/// Object root with a `slides` array, for APIs that reject array roots.
pub fn wrapped_deck_schema(dialect: Dialect) -> Value {
    json!({
        "type": dialect.ty("object"),
        "properties": { "slides": deck_schema(dialect) },
        "required": ["slides"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_schema_uses_upper_case_types() {
        let s = deck_schema(Dialect::Gemini);
        assert_eq!(s["type"], "ARRAY");
        assert_eq!(s["items"]["type"], "OBJECT");
        assert_eq!(s["items"]["properties"]["content"]["items"]["type"], "STRING");
        assert_eq!(s["items"]["required"], json!(["title", "content"]));
    }

    #[test]
    fn test_wrapped_schema_nests_deck_under_slides() {
        let s = wrapped_deck_schema(Dialect::JsonSchema);
        assert_eq!(s["type"], "object");
        assert_eq!(s["properties"]["slides"]["type"], "array");
        assert!(s["properties"]["slides"]["items"]["properties"]
            .get("speakerNotes")
            .is_some());
    }
}
