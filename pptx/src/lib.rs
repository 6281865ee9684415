//! Minimal PresentationML (`.pptx`) writer.
//!
//! Produces a package with one slide master, a "Title and Content" layout, a
//! theme, a notes master and one slide (plus an optional notes slide) per
//! input slide. Text only; no images or custom geometry.

pub mod error;
mod parts;
mod template;
pub mod writer;
mod xml;

pub use error::{PptxError, Result};
pub use writer::{Presentation, PptxSlide};
