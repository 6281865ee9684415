//! Presentation writer for PPTX.
use chrono::{DateTime, Utc};
use std::io::{Cursor, Seek, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::{PptxError, Result};
use crate::{parts, template};

/// A text slide: title, bullets in display order, optional speaker notes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PptxSlide {
    pub title: String,
    pub bullets: Vec<String>,
    pub notes: Option<String>,
}

impl PptxSlide {
    pub fn new(title: impl Into<String>, bullets: Vec<String>) -> Self {
        Self {
            title: title.into(),
            bullets,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn has_notes(&self) -> bool {
        self.notes.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// An in-memory presentation ready to be encoded.
#[derive(Debug, Clone)]
pub struct Presentation {
    title: String,
    slides: Vec<PptxSlide>,
    created: DateTime<Utc>,
}

impl Presentation {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            slides: Vec::new(),
            created: Utc::now(),
        }
    }

    /// Fix the creation timestamp written to `docProps/core.xml`.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = created;
        self
    }

    pub fn add_slide(&mut self, slide: PptxSlide) -> &mut Self {
        self.slides.push(slide);
        self
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Encode the whole package into memory.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let cursor = self.write(Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Encode the package into `sink` and return it.
    pub fn write<W: Write + Seek>(&self, sink: W) -> Result<W> {
        if self.slides.is_empty() {
            return Err(PptxError::NoSlides);
        }

        let mut archive = ZipWriter::new(sink);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let add = |archive: &mut ZipWriter<W>, path: &str, content: &str| -> Result<()> {
            archive.start_file(path, options)?;
            archive.write_all(content.as_bytes())?;
            Ok(())
        };

        let count = self.slides.len();
        let notes_count = self.slides.iter().filter(|s| s.has_notes()).count();

        add(&mut archive, "[Content_Types].xml", &parts::content_types(&self.slides)?)?;
        add(&mut archive, "_rels/.rels", &parts::root_rels()?)?;
        add(&mut archive, "docProps/core.xml", &parts::core_props(&self.title, self.created)?)?;
        add(&mut archive, "docProps/app.xml", &parts::app_props(count, notes_count)?)?;

        add(&mut archive, "ppt/presentation.xml", &parts::presentation(count)?)?;
        add(&mut archive, "ppt/_rels/presentation.xml.rels", &parts::presentation_rels(count)?)?;

        add(&mut archive, "ppt/slideMasters/slideMaster1.xml", &template::slide_master())?;
        add(&mut archive, "ppt/slideMasters/_rels/slideMaster1.xml.rels", &parts::master_rels()?)?;
        add(&mut archive, "ppt/slideLayouts/slideLayout1.xml", &template::title_and_content_layout())?;
        add(&mut archive, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", &parts::layout_rels()?)?;
        add(&mut archive, "ppt/notesMasters/notesMaster1.xml", &template::notes_master())?;
        add(&mut archive, "ppt/notesMasters/_rels/notesMaster1.xml.rels", &parts::notes_master_rels()?)?;
        add(&mut archive, "ppt/theme/theme1.xml", template::THEME)?;
        add(&mut archive, "ppt/theme/theme2.xml", template::THEME)?;

        for (i, slide) in self.slides.iter().enumerate() {
            let n = i + 1;
            add(&mut archive, &format!("ppt/slides/slide{n}.xml"), &parts::slide(slide)?)?;
            add(
                &mut archive,
                &format!("ppt/slides/_rels/slide{n}.xml.rels"),
                &parts::slide_rels(n, slide.has_notes())?,
            )?;
            if let Some(notes) = slide.notes.as_deref().filter(|_| slide.has_notes()) {
                add(
                    &mut archive,
                    &format!("ppt/notesSlides/notesSlide{n}.xml"),
                    &parts::notes_slide(notes)?,
                )?;
                add(
                    &mut archive,
                    &format!("ppt/notesSlides/_rels/notesSlide{n}.xml.rels"),
                    &parts::notes_slide_rels(n)?,
                )?;
            }
        }

        Ok(archive.finish()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> Option<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).ok()?;
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        Some(out)
    }

    fn sample() -> Presentation {
        let mut pres = Presentation::new("Jazz & Blues");
        pres.add_slide(PptxSlide::new("Intro", vec!["a".into(), "b".into()]).with_notes("say hi"))
            .add_slide(PptxSlide::new("Outro", vec!["c".into()]));
        pres
    }

    #[test]
    fn test_empty_presentation_is_rejected() {
        let err = Presentation::new("x").to_bytes().unwrap_err();
        assert!(matches!(err, PptxError::NoSlides));
    }

    #[test]
    fn test_package_has_required_parts() {
        let bytes = sample().to_bytes().unwrap();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/notesSlides/notesSlide1.xml",
        ] {
            assert!(read_part(&bytes, part).is_some(), "missing {part}");
        }
        assert!(read_part(&bytes, "ppt/notesSlides/notesSlide2.xml").is_none());
    }

    #[test]
    fn test_notes_are_not_on_the_slide() {
        let bytes = sample().to_bytes().unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide1.xml").unwrap();
        assert!(slide.contains("<a:t>Intro</a:t>"));
        assert!(!slide.contains("say hi"));
        let notes = read_part(&bytes, "ppt/notesSlides/notesSlide1.xml").unwrap();
        assert!(notes.contains("<a:t>say hi</a:t>"));
    }

    #[test]
    fn test_core_props_title_and_timestamp() {
        let created = DateTime::parse_from_rfc3339("2024-03-01T10:20:30Z")
            .unwrap()
            .with_timezone(&Utc);
        let bytes = sample().with_created(created).to_bytes().unwrap();
        let core = read_part(&bytes, "docProps/core.xml").unwrap();
        assert!(core.contains("<dc:title>Jazz &amp; Blues</dc:title>"));
        assert!(core.contains("2024-03-01T10:20:30Z"));
    }

    #[test]
    fn test_blank_notes_are_skipped() {
        let mut pres = Presentation::new("t");
        pres.add_slide(PptxSlide::new("only", vec!["x".into()]).with_notes("   "));
        let bytes = pres.to_bytes().unwrap();
        assert!(read_part(&bytes, "ppt/notesSlides/notesSlide1.xml").is_none());
        let rels = read_part(&bytes, "ppt/slides/_rels/slide1.xml.rels").unwrap();
        assert!(!rels.contains("notesSlide"));
    }
}
