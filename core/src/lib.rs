//! Core library: deck generation, presentation state and export.

pub mod client;
pub mod controller;
pub mod error;
pub mod export;
pub mod generation;
pub mod viewer;

pub use client::{generator_from_config, DeckGenerator, SharedGenerator, StubGenerator};
pub use controller::{Controller, Event, PendingGeneration, Phase, PresentationState, RequestId, Resolution};
pub use error::{ExportError, GenerationError};
pub use export::{file_name_for, save, DeckExporter, ExportArtifact, PptxExporter};
pub use viewer::{view, SlideView, View};
