use std::path::{Path, PathBuf};

use slide_common::Slide;
use slide_pptx::{Presentation, PptxSlide};

use crate::error::ExportError;

const FALLBACK_NAME: &str = "presentation";
const MAX_STEM_CHARS: usize = 50;

/// An encoded deck plus the file name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Encodes a deck into a downloadable artifact. Must not mutate anything.
pub trait DeckExporter {
    fn export(&self, deck: &[Slide], topic: &str) -> Result<ExportArtifact, ExportError>;
}

/// Writes one "Title and Content" slide per deck entry, notes in the notes pane.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxExporter;

impl DeckExporter for PptxExporter {
    fn export(&self, deck: &[Slide], topic: &str) -> Result<ExportArtifact, ExportError> {
        if deck.is_empty() {
            return Err(ExportError::EmptyDeck);
        }

        let mut presentation = Presentation::new(topic);
        for slide in deck {
            let mut page = PptxSlide::new(slide.title.clone(), slide.content.clone());
            if let Some(notes) = &slide.speaker_notes {
                page = page.with_notes(notes.clone());
            }
            presentation.add_slide(page);
        }

        let bytes = presentation.to_bytes()?;
        let file_name = file_name_for(topic);
        tracing::info!(%file_name, slides = deck.len(), size = bytes.len(), "exported deck");
        Ok(ExportArtifact { file_name, bytes })
    }
}

/// `<sanitized topic>.pptx`. Anything that is not a letter or digit becomes `_`,
/// runs collapse, the ends are trimmed and the stem is capped.
pub fn file_name_for(topic: &str) -> String {
    let mut stem = String::with_capacity(topic.len());
    for c in topic.chars() {
        if c.is_alphanumeric() {
            stem.push(c);
        } else if !stem.ends_with('_') {
            stem.push('_');
        }
    }
    let stem: String = stem.trim_matches('_').chars().take(MAX_STEM_CHARS).collect();
    let stem = stem.trim_end_matches('_');
    if stem.is_empty() {
        format!("{FALLBACK_NAME}.pptx")
    } else {
        format!("{stem}.pptx")
    }
}

/// Write `artifact` into `dir`, creating it if needed.
pub fn save(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf, ExportError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExportError::Io { path, source }
    };

    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    let path = dir.join(&artifact.file_name);
    std::fs::write(&path, &artifact.bytes).map_err(io_err(&path))?;
    tracing::info!(path = %path.display(), "saved presentation");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    fn deck() -> Vec<Slide> {
        vec![
            Slide::new("Intro", vec!["a".into(), "b".into()]).with_notes("Greet everyone"),
            Slide::new("Middle", vec!["c".into()]),
            Slide::new("End", vec!["d".into()]).with_notes("Thank them"),
        ]
    }

    #[test]
    fn test_file_name_sanitizing() {
        assert_eq!(file_name_for("The History of Jazz!"), "The_History_of_Jazz.pptx");
        assert_eq!(file_name_for("a / b \\ c"), "a_b_c.pptx");
        assert_eq!(file_name_for("???"), "presentation.pptx");
        assert_eq!(file_name_for(""), "presentation.pptx");
        assert_eq!(file_name_for("Café"), "Café.pptx");
    }

    #[test]
    fn test_file_name_keeps_non_latin_topics() {
        assert_eq!(file_name_for("再生可能エネルギーの未来"), "再生可能エネルギーの未来.pptx");
        assert_eq!(file_name_for("AI と 教育"), "AI_と_教育.pptx");
        let long = file_name_for(&"漢".repeat(80));
        assert_eq!(long.chars().count(), MAX_STEM_CHARS + ".pptx".len());
    }

    #[test]
    fn test_file_name_is_capped() {
        let name = file_name_for(&"x".repeat(200));
        assert_eq!(name.len(), MAX_STEM_CHARS + ".pptx".len());
    }

    #[test]
    fn test_export_round_trips_slides_and_notes() {
        let artifact = PptxExporter.export(&deck(), "Jazz").unwrap();
        assert_eq!(artifact.file_name, "Jazz.pptx");

        let mut archive = zip::ZipArchive::new(Cursor::new(&artifact.bytes)).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        let slides = names.iter().filter(|n| n.starts_with("ppt/slides/slide")).count();
        let notes = names
            .iter()
            .filter(|n| n.starts_with("ppt/notesSlides/notesSlide"))
            .count();
        assert_eq!(slides, 3);
        assert_eq!(notes, 2);

        let mut xml = String::new();
        archive
            .by_name("ppt/notesSlides/notesSlide3.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        assert!(xml.contains("Thank them"));
    }

    #[test]
    fn test_empty_deck_is_rejected() {
        assert!(matches!(
            PptxExporter.export(&[], "t"),
            Err(ExportError::EmptyDeck)
        ));
    }

    #[test]
    fn test_save_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested/out");
        let artifact = PptxExporter.export(&deck(), "Save me").unwrap();
        let path = save(&artifact, &dir).unwrap();
        assert_eq!(path, dir.join("Save_me.pptx"));
        assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
    }
}
