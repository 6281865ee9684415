//! HTTP clients for the hosted models that write slide decks.
//!
//! Each client sends one schema-constrained request and hands back the raw
//! JSON text of the answer. Decoding that text into slides happens in
//! `slide-core`.

pub mod error;
pub mod gemini;
pub mod openai;
pub mod prompt;
pub mod schema;

pub use error::GenAiError;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use prompt::build_prompt;
