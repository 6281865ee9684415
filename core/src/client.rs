use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use slide_common::{Deck, Provider, Slide, SlideConfig};
use slide_genai::{build_prompt, GeminiClient, OpenAiClient};

use crate::error::GenerationError;
use crate::generation::parse_deck;

/// Turns a topic into a deck. One attempt per call; no retry, no caching.
#[async_trait]
pub trait DeckGenerator {
    async fn generate(&self, topic: &str) -> Result<Deck, GenerationError>;
}

pub type SharedGenerator = Arc<dyn DeckGenerator + Send + Sync>;

/// Canned six-slide deck; no network.
pub struct StubGenerator;

#[async_trait]
impl DeckGenerator for StubGenerator {
    async fn generate(&self, topic: &str) -> Result<Deck, GenerationError> {
        let b = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Ok(vec![
            Slide::new(topic, b(&["An overview", "Why it matters", "What we will cover"]))
                .with_notes("Welcome the audience and introduce the topic."),
            Slide::new("Background", b(&["Where it started", "Key milestones", "Context today"]))
                .with_notes("Keep the history brief."),
            Slide::new("Current State", b(&["Main challenges", "Open opportunities", "Who is involved"])),
            Slide::new("Proposal", b(&["Concrete approach", "Expected impact", "Trade-offs"]))
                .with_notes("Spend most of the time here."),
            Slide::new("Next Steps", b(&["Timeline", "Resources", "Milestones"])),
            Slide::new("Conclusion & Q&A", b(&["Key takeaways", "Questions"]))
                .with_notes("Open the floor."),
        ])
    }
}

/// Adapter wrapping [`GeminiClient`] into [`DeckGenerator`].
pub struct GeminiGenerator {
    inner: GeminiClient,
}

impl GeminiGenerator {
    pub fn new(inner: GeminiClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DeckGenerator for GeminiGenerator {
    async fn generate(&self, topic: &str) -> Result<Deck, GenerationError> {
        let raw = self.inner.generate_json(&build_prompt(topic)).await?;
        parse_deck(&raw)
    }
}

/// Adapter wrapping [`OpenAiClient`] into [`DeckGenerator`].
pub struct OpenAiGenerator {
    inner: OpenAiClient,
}

impl OpenAiGenerator {
    pub fn new(inner: OpenAiClient) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl DeckGenerator for OpenAiGenerator {
    async fn generate(&self, topic: &str) -> Result<Deck, GenerationError> {
        let raw = self.inner.generate_json(&build_prompt(topic)).await?;
        parse_deck(&raw)
    }
}

/// Build the generator selected by `config`. A missing API key is not an
/// error here; it surfaces on the first request.
pub fn generator_from_config(config: &SlideConfig) -> Result<SharedGenerator, GenerationError> {
    let timeout = Duration::from_secs(config.request_timeout_secs);
    let key = config.api_key.clone().unwrap_or_default();
    let model = config.model().to_string();
    tracing::info!(provider = ?config.provider, %model, "configuring deck generator");

    let generator: SharedGenerator = match config.provider {
        Provider::Gemini => {
            let mut client = GeminiClient::new(key, model, timeout)?;
            if let Some(base) = &config.api_base {
                client = client.with_api_base(base.as_str());
            }
            Arc::new(GeminiGenerator::new(client))
        }
        Provider::OpenAi => {
            let mut client = OpenAiClient::new(key, model, timeout)?;
            if let Some(base) = &config.api_base {
                client = client.with_api_base(base.as_str());
            }
            Arc::new(OpenAiGenerator::new(client))
        }
        Provider::Stub => Arc::new(StubGenerator),
    };
    Ok(generator)
}
