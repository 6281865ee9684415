//! Presentation controller: the request lifecycle as an explicit state machine.
//!
//! [`PresentationState::apply`] is the only place state changes. It performs
//! no I/O; a submission yields a [`GenerateRequest`] that the [`Controller`]
//! turns into a [`PendingGeneration`], the single effectful call site.

use slide_common::{Deck, SupersedePolicy};

use crate::client::SharedGenerator;
use crate::error::{ExportError, GenerationError};
use crate::export::{DeckExporter, ExportArtifact};
use crate::viewer;

pub const BLANK_TOPIC_MESSAGE: &str = "Please enter a topic for your presentation.";
pub const EMPTY_DECK_MESSAGE: &str =
    "The AI could not generate slides for this topic. Please try again with a different topic.";
pub const FAILURE_PREFIX: &str = "Failed to generate presentation.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

/// Monotonically increasing id of a submitted generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Failed,
}

#[derive(Debug)]
pub enum Event {
    Submit { topic: String },
    Resolved(Resolution),
    Next,
    Prev,
}

/// Outcome of one generation, tagged with the request it answers.
#[derive(Debug)]
pub struct Resolution {
    pub request: RequestId,
    pub outcome: Result<Deck, GenerationError>,
}

/// Effect requested by a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub id: RequestId,
    pub topic: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentationState {
    pub topic: String,
    pub slides: Deck,
    pub is_loading: bool,
    pub error: Option<String>,
    pub current_slide_index: usize,
    pub phase: Phase,
    latest_request: RequestId,
    policy: SupersedePolicy,
}

impl Default for PresentationState {
    fn default() -> Self {
        Self::new(SupersedePolicy::default())
    }
}

impl PresentationState {
    pub fn new(policy: SupersedePolicy) -> Self {
        Self {
            topic: String::new(),
            slides: Vec::new(),
            is_loading: false,
            error: None,
            current_slide_index: 0,
            phase: Phase::Idle,
            latest_request: RequestId(0),
            policy,
        }
    }

    pub fn latest_request(&self) -> RequestId {
        self.latest_request
    }

    pub fn policy(&self) -> SupersedePolicy {
        self.policy
    }

    /// Apply one event. Returns the generation to start, if any.
    pub fn apply(&mut self, event: Event) -> Option<GenerateRequest> {
        match event {
            Event::Submit { topic } => self.submit(topic),
            Event::Resolved(resolution) => {
                self.resolve(resolution);
                None
            }
            Event::Next => {
                if self.current_slide_index + 1 < self.slides.len() {
                    self.current_slide_index += 1;
                }
                None
            }
            Event::Prev => {
                self.current_slide_index = self.current_slide_index.saturating_sub(1);
                None
            }
        }
    }

    fn submit(&mut self, topic: String) -> Option<GenerateRequest> {
        if topic.trim().is_empty() {
            self.error = Some(BLANK_TOPIC_MESSAGE.to_string());
            return None;
        }

        self.latest_request = RequestId(self.latest_request.0 + 1);
        self.is_loading = true;
        self.error = None;
        self.slides.clear();
        self.current_slide_index = 0;
        self.topic = topic.clone();
        self.phase = Phase::Loading;

        Some(GenerateRequest {
            id: self.latest_request,
            topic,
        })
    }

    fn resolve(&mut self, Resolution { request, outcome }: Resolution) {
        if self.policy == SupersedePolicy::LatestOnly && request != self.latest_request {
            tracing::info!(
                request = request.0,
                latest = self.latest_request.0,
                "discarding superseded generation"
            );
            return;
        }

        self.is_loading = false;
        self.current_slide_index = 0;

        match outcome {
            Ok(deck) if !deck.is_empty() => {
                tracing::info!(request = request.0, slides = deck.len(), "generation succeeded");
                self.slides = deck;
                self.error = None;
                self.phase = Phase::Success;
            }
            Ok(_) => {
                tracing::warn!(request = request.0, "generation returned no slides");
                self.slides.clear();
                self.error = Some(EMPTY_DECK_MESSAGE.to_string());
                self.phase = Phase::Failed;
            }
            Err(err) => {
                tracing::warn!(request = request.0, "generation failed: {err}");
                self.slides.clear();
                self.error = Some(failure_message(&err));
                self.phase = Phase::Failed;
            }
        }
    }
}

fn failure_message(err: &GenerationError) -> String {
    let detail = err.to_string();
    let detail = detail.trim();
    if detail.is_empty() {
        format!("{FAILURE_PREFIX} {UNKNOWN_ERROR_MESSAGE}")
    } else {
        format!("{FAILURE_PREFIX} {detail}")
    }
}

/// A generation that has been submitted but not yet run.
pub struct PendingGeneration {
    pub request: RequestId,
    pub topic: String,
    generator: SharedGenerator,
}

impl PendingGeneration {
    /// Call the generator once. Never panics on failure; the error travels in
    /// the returned [`Resolution`].
    pub async fn run(self) -> Resolution {
        tracing::info!(request = self.request.0, topic = %self.topic, "generation started");
        let outcome = self.generator.generate(&self.topic).await;
        Resolution {
            request: self.request,
            outcome,
        }
    }
}

/// Owns the presentation state and the generator capability.
pub struct Controller {
    state: PresentationState,
    generator: SharedGenerator,
}

impl Controller {
    pub fn new(generator: SharedGenerator, policy: SupersedePolicy) -> Self {
        Self {
            state: PresentationState::new(policy),
            generator,
        }
    }

    pub fn state(&self) -> &PresentationState {
        &self.state
    }

    /// Start a generation for `topic`, unless it is blank. The caller decides
    /// where the returned future runs.
    pub fn submit(&mut self, topic: impl Into<String>) -> Option<PendingGeneration> {
        let request = self.state.apply(Event::Submit {
            topic: topic.into(),
        })?;
        Some(PendingGeneration {
            request: request.id,
            topic: request.topic,
            generator: self.generator.clone(),
        })
    }

    pub fn resolve(&mut self, resolution: Resolution) {
        self.state.apply(Event::Resolved(resolution));
    }

    pub fn next(&mut self) {
        self.state.apply(Event::Next);
    }

    pub fn prev(&mut self) {
        self.state.apply(Event::Prev);
    }

    /// Submit and wait for the result in place.
    pub async fn generate(&mut self, topic: impl Into<String>) {
        if let Some(pending) = self.submit(topic) {
            let resolution = pending.run().await;
            self.resolve(resolution);
        }
    }

    /// Export the current deck. Never changes state, whatever the outcome.
    pub fn download(&self, exporter: &dyn DeckExporter) -> Result<ExportArtifact, ExportError> {
        if !viewer::can_download(&self.state) {
            return Err(ExportError::EmptyDeck);
        }
        exporter.export(&self.state.slides, &self.state.topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DeckGenerator;
    use async_trait::async_trait;
    use slide_common::Slide;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn deck(n: usize) -> Deck {
        (1..=n)
            .map(|i| Slide::new(format!("Slide {i}"), vec![format!("point {i}")]))
            .collect()
    }

    /// Returns a fixed outcome and counts calls.
    struct Scripted {
        calls: AtomicUsize,
        outcome: fn() -> Result<Deck, GenerationError>,
    }

    impl Scripted {
        fn new(outcome: fn() -> Result<Deck, GenerationError>) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                outcome,
            })
        }
    }

    #[async_trait]
    impl DeckGenerator for Scripted {
        async fn generate(&self, _topic: &str) -> Result<Deck, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.outcome)()
        }
    }

    fn controller(generator: Arc<Scripted>) -> Controller {
        Controller::new(generator, SupersedePolicy::LastResolved)
    }

    #[test]
    fn test_submit_enters_loading_and_clears_previous_state() {
        let mut state = PresentationState::default();
        state.slides = deck(3);
        state.current_slide_index = 2;
        state.error = Some("old".into());
        state.phase = Phase::Success;

        let request = state
            .apply(Event::Submit {
                topic: "Volcanoes".into(),
            })
            .unwrap();
        assert_eq!(request.topic, "Volcanoes");
        assert_eq!(request.id, RequestId(1));
        assert_eq!(state.phase, Phase::Loading);
        assert!(state.is_loading);
        assert!(state.slides.is_empty());
        assert_eq!(state.error, None);
        assert_eq!(state.topic, "Volcanoes");
    }

    #[test]
    fn test_blank_submit_sets_error_only() {
        let mut state = PresentationState::default();
        state.slides = deck(2);
        state.phase = Phase::Success;
        state.topic = "kept".into();

        assert!(state.apply(Event::Submit { topic: "   \n".into() }).is_none());
        assert_eq!(state.error.as_deref(), Some(BLANK_TOPIC_MESSAGE));
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.slides.len(), 2);
        assert_eq!(state.topic, "kept");
        assert_eq!(state.latest_request(), RequestId(0));
    }

    #[test]
    fn test_success_resets_index_even_from_a_later_slide() {
        let mut state = PresentationState::default();
        let first = state.apply(Event::Submit { topic: "a".into() }).unwrap();
        state.apply(Event::Resolved(Resolution {
            request: first.id,
            outcome: Ok(deck(4)),
        }));
        state.apply(Event::Next);
        state.apply(Event::Next);
        assert_eq!(state.current_slide_index, 2);

        let second = state.apply(Event::Submit { topic: "b".into() }).unwrap();
        state.apply(Event::Resolved(Resolution {
            request: second.id,
            outcome: Ok(deck(7)),
        }));
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.current_slide_index, 0);
        assert_eq!(state.slides, deck(7));
    }

    #[test]
    fn test_pagination_bounds_are_no_ops() {
        let mut state = PresentationState::default();
        state.slides = deck(5);
        state.apply(Event::Prev);
        assert_eq!(state.current_slide_index, 0);
        for _ in 0..10 {
            state.apply(Event::Next);
        }
        assert_eq!(state.current_slide_index, 4);
    }

    #[test]
    fn test_pagination_on_empty_deck_stays_at_zero() {
        let mut state = PresentationState::default();
        state.apply(Event::Next);
        state.apply(Event::Prev);
        assert_eq!(state.current_slide_index, 0);
    }

    #[test]
    fn test_last_resolved_wins_by_default() {
        let mut state = PresentationState::default();
        let slow = state.apply(Event::Submit { topic: "slow".into() }).unwrap();
        let fast = state.apply(Event::Submit { topic: "fast".into() }).unwrap();
        state.apply(Event::Resolved(Resolution {
            request: fast.id,
            outcome: Ok(deck(2)),
        }));
        state.apply(Event::Resolved(Resolution {
            request: slow.id,
            outcome: Ok(deck(9)),
        }));
        assert_eq!(state.slides.len(), 9);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_latest_only_discards_stale_results() {
        let mut state = PresentationState::new(SupersedePolicy::LatestOnly);
        let slow = state.apply(Event::Submit { topic: "slow".into() }).unwrap();
        let fast = state.apply(Event::Submit { topic: "fast".into() }).unwrap();

        state.apply(Event::Resolved(Resolution {
            request: slow.id,
            outcome: Ok(deck(9)),
        }));
        assert!(state.is_loading);
        assert!(state.slides.is_empty());

        state.apply(Event::Resolved(Resolution {
            request: fast.id,
            outcome: Ok(deck(2)),
        }));
        assert!(!state.is_loading);
        assert_eq!(state.slides.len(), 2);
    }

    // Scenario A
    #[tokio::test]
    async fn test_six_slide_generation_succeeds() {
        let generator = Scripted::new(|| Ok(deck(6)));
        let mut controller = controller(generator.clone());
        controller.generate("The history of jazz").await;

        let state = controller.state();
        assert_eq!(state.phase, Phase::Success);
        assert_eq!(state.slides.len(), 6);
        assert_eq!(state.current_slide_index, 0);
        assert!(!state.is_loading);
        assert_eq!(state.topic, "The history of jazz");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    // Scenario B
    #[tokio::test]
    async fn test_blank_topic_makes_no_call() {
        let generator = Scripted::new(|| Ok(deck(6)));
        let mut controller = controller(generator.clone());
        controller.generate("").await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            controller.state().error.as_deref(),
            Some("Please enter a topic for your presentation.")
        );
        assert_eq!(controller.state().phase, Phase::Idle);
    }

    // Scenario C
    #[tokio::test]
    async fn test_empty_deck_is_a_tailored_failure() {
        let mut controller = controller(Scripted::new(|| Ok(Vec::new())));
        controller.generate("X").await;

        let state = controller.state();
        assert_eq!(state.phase, Phase::Failed);
        assert!(state.slides.is_empty());
        assert_eq!(state.error.as_deref(), Some(EMPTY_DECK_MESSAGE));
        assert!(!EMPTY_DECK_MESSAGE.starts_with(FAILURE_PREFIX));
    }

    // Scenario D
    #[tokio::test]
    async fn test_rejection_message_is_surfaced() {
        let mut controller =
            controller(Scripted::new(|| Err(GenerationError::Other("rate limited".into()))));
        controller.generate("X").await;

        let state = controller.state();
        assert_eq!(state.phase, Phase::Failed);
        assert!(!state.is_loading);
        let error = state.error.as_deref().unwrap();
        assert!(error.starts_with(FAILURE_PREFIX));
        assert!(error.contains("rate limited"));
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_fallback() {
        let mut controller = controller(Scripted::new(|| Err(GenerationError::Other(String::new()))));
        controller.generate("X").await;
        assert_eq!(
            controller.state().error.as_deref(),
            Some("Failed to generate presentation. An unknown error occurred.")
        );
    }

    // Scenario E
    #[tokio::test]
    async fn test_next_on_last_slide_is_a_no_op() {
        let mut controller = controller(Scripted::new(|| Ok(deck(5))));
        controller.generate("five").await;
        for _ in 0..4 {
            controller.next();
        }
        assert_eq!(controller.state().current_slide_index, 4);
        controller.next();
        assert_eq!(controller.state().current_slide_index, 4);
    }

    #[tokio::test]
    async fn test_submit_is_loading_before_the_call_settles() {
        let mut controller = controller(Scripted::new(|| Ok(deck(3))));
        let pending = controller.submit("topic").unwrap();
        assert!(controller.state().is_loading);
        assert_eq!(controller.state().phase, Phase::Loading);

        let resolution = pending.run().await;
        controller.resolve(resolution);
        assert!(!controller.state().is_loading);
    }

    struct FailingExporter;

    impl DeckExporter for FailingExporter {
        fn export(&self, _deck: &[Slide], _topic: &str) -> Result<ExportArtifact, ExportError> {
            Err(ExportError::Io {
                path: "nowhere".into(),
                source: std::io::Error::other("disk full"),
            })
        }
    }

    #[tokio::test]
    async fn test_export_failure_leaves_state_intact() {
        let mut controller = controller(Scripted::new(|| Ok(deck(3))));
        controller.generate("Keep me").await;
        let before = controller.state().clone();

        assert!(controller.download(&FailingExporter).is_err());
        assert_eq!(controller.state(), &before);
    }

    #[test]
    fn test_download_requires_slides() {
        let controller = controller(Scripted::new(|| Ok(deck(3))));
        assert!(matches!(
            controller.download(&FailingExporter),
            Err(ExportError::EmptyDeck)
        ));
    }
}
