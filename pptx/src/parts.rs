use chrono::{DateTime, Utc};
use std::fmt::Write as FmtWrite;

use crate::error::Result;
use crate::template::{group_props, NOTES_HEIGHT, NOTES_WIDTH, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::writer::PptxSlide;
use crate::xml::{escape_xml, NS_A, NS_P, NS_R, NS_REL, XML_DECL};

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_NOTES_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesMaster+xml";
const CT_NOTES_SLIDE: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.notesSlide+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_APP: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const REL_OFFICE_DOC: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_APP: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_NOTES_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesMaster";
const REL_NOTES_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/notesSlide";

/// `presentation.xml.rels` ids: master, notes master, theme, then slides.
const FIRST_SLIDE_REL: usize = 4;

/// One `<Relationship>` entry.
pub(crate) struct Rel<'a> {
    pub id: String,
    pub kind: &'a str,
    pub target: String,
}

pub(crate) fn relationships(rels: &[Rel<'_>]) -> Result<String> {
    let mut xml = String::with_capacity(256 + rels.len() * 160);
    xml.push_str(XML_DECL);
    write!(xml, r#"<Relationships xmlns="{NS_REL}">"#)?;
    for rel in rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            rel.id, rel.kind, rel.target
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

pub(crate) fn content_types(slides: &[PptxSlide]) -> Result<String> {
    let mut xml = String::with_capacity(2048);
    xml.push_str(XML_DECL);
    xml.push_str(
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    );
    xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
    xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);

    let mut over = |part: &str, ct: &str| -> Result<()> {
        write!(xml, r#"<Override PartName="{part}" ContentType="{ct}"/>"#)?;
        Ok(())
    };
    over("/ppt/presentation.xml", CT_PRESENTATION)?;
    over("/ppt/slideMasters/slideMaster1.xml", CT_MASTER)?;
    over("/ppt/slideLayouts/slideLayout1.xml", CT_LAYOUT)?;
    over("/ppt/notesMasters/notesMaster1.xml", CT_NOTES_MASTER)?;
    over("/ppt/theme/theme1.xml", CT_THEME)?;
    over("/ppt/theme/theme2.xml", CT_THEME)?;
    for (i, slide) in slides.iter().enumerate() {
        let n = i + 1;
        over(&format!("/ppt/slides/slide{n}.xml"), CT_SLIDE)?;
        if slide.has_notes() {
            over(&format!("/ppt/notesSlides/notesSlide{n}.xml"), CT_NOTES_SLIDE)?;
        }
    }
    over("/docProps/core.xml", CT_CORE)?;
    over("/docProps/app.xml", CT_APP)?;

    xml.push_str("</Types>");
    Ok(xml)
}

pub(crate) fn root_rels() -> Result<String> {
    relationships(&[
        Rel { id: "rId1".into(), kind: REL_OFFICE_DOC, target: "ppt/presentation.xml".into() },
        Rel { id: "rId2".into(), kind: REL_CORE, target: "docProps/core.xml".into() },
        Rel { id: "rId3".into(), kind: REL_APP, target: "docProps/app.xml".into() },
    ])
}

pub(crate) fn presentation(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_count * 48);
    xml.push_str(XML_DECL);
    write!(
        xml,
        r#"<p:presentation xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}" saveSubsetFonts="1">"#
    )?;
    xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);
    xml.push_str(r#"<p:notesMasterIdLst><p:notesMasterId r:id="rId2"/></p:notesMasterIdLst>"#);
    xml.push_str("<p:sldIdLst>");
    for i in 0..slide_count {
        write!(
            xml,
            r#"<p:sldId id="{}" r:id="rId{}"/>"#,
            256 + i,
            FIRST_SLIDE_REL + i
        )?;
    }
    xml.push_str("</p:sldIdLst>");
    write!(
        xml,
        r#"<p:sldSz cx="{SLIDE_WIDTH}" cy="{SLIDE_HEIGHT}"/><p:notesSz cx="{NOTES_WIDTH}" cy="{NOTES_HEIGHT}"/>"#
    )?;
    xml.push_str("</p:presentation>");
    Ok(xml)
}

pub(crate) fn presentation_rels(slide_count: usize) -> Result<String> {
    let mut rels = vec![
        Rel { id: "rId1".into(), kind: REL_MASTER, target: "slideMasters/slideMaster1.xml".into() },
        Rel { id: "rId2".into(), kind: REL_NOTES_MASTER, target: "notesMasters/notesMaster1.xml".into() },
        Rel { id: "rId3".into(), kind: REL_THEME, target: "theme/theme1.xml".into() },
    ];
    for i in 0..slide_count {
        rels.push(Rel {
            id: format!("rId{}", FIRST_SLIDE_REL + i),
            kind: REL_SLIDE,
            target: format!("slides/slide{}.xml", i + 1),
        });
    }
    relationships(&rels)
}

pub(crate) fn master_rels() -> Result<String> {
    relationships(&[
        Rel { id: "rId1".into(), kind: REL_LAYOUT, target: "../slideLayouts/slideLayout1.xml".into() },
        Rel { id: "rId2".into(), kind: REL_THEME, target: "../theme/theme1.xml".into() },
    ])
}

pub(crate) fn layout_rels() -> Result<String> {
    relationships(&[Rel {
        id: "rId1".into(),
        kind: REL_MASTER,
        target: "../slideMasters/slideMaster1.xml".into(),
    }])
}

pub(crate) fn notes_master_rels() -> Result<String> {
    relationships(&[Rel {
        id: "rId1".into(),
        kind: REL_THEME,
        target: "../theme/theme2.xml".into(),
    }])
}

fn text_paragraph(xml: &mut String, text: &str) -> Result<()> {
    write!(
        xml,
        r#"<a:p><a:r><a:rPr lang="en-US" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        escape_xml(text)
    )?;
    Ok(())
}

fn placeholder_open(xml: &mut String, id: u32, name: &str, ph: &str) -> Result<()> {
    write!(
        xml,
        concat!(
            "<p:sp><p:nvSpPr>",
            r#"<p:cNvPr id="{}" name="{}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            "<p:nvPr>{}</p:nvPr>",
            "</p:nvSpPr><p:spPr/>",
            "<p:txBody><a:bodyPr/><a:lstStyle/>"
        ),
        id, name, ph
    )?;
    Ok(())
}

const PLACEHOLDER_CLOSE: &str = "</p:txBody></p:sp>";

/// Title placeholder plus one body paragraph per bullet, in order.
pub(crate) fn slide(slide: &PptxSlide) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide.bullets.iter().map(|b| b.len() + 96).sum::<usize>());
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:sld xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#)?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(group_props());

    placeholder_open(&mut xml, 2, "Title 1", r#"<p:ph type="title"/>"#)?;
    text_paragraph(&mut xml, &slide.title)?;
    xml.push_str(PLACEHOLDER_CLOSE);

    placeholder_open(&mut xml, 3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#)?;
    if slide.bullets.is_empty() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
    }
    for bullet in &slide.bullets {
        text_paragraph(&mut xml, bullet)?;
    }
    xml.push_str(PLACEHOLDER_CLOSE);

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sld>");
    Ok(xml)
}

pub(crate) fn slide_rels(number: usize, has_notes: bool) -> Result<String> {
    let mut rels = vec![Rel {
        id: "rId1".into(),
        kind: REL_LAYOUT,
        target: "../slideLayouts/slideLayout1.xml".into(),
    }];
    if has_notes {
        rels.push(Rel {
            id: "rId2".into(),
            kind: REL_NOTES_SLIDE,
            target: format!("../notesSlides/notesSlide{number}.xml"),
        });
    }
    relationships(&rels)
}

/// Notes page: slide thumbnail plus the notes text, one paragraph per line.
pub(crate) fn notes_slide(notes: &str) -> Result<String> {
    let mut xml = String::with_capacity(1024 + notes.len());
    xml.push_str(XML_DECL);
    write!(xml, r#"<p:notes xmlns:a="{NS_A}" xmlns:r="{NS_R}" xmlns:p="{NS_P}">"#)?;
    xml.push_str("<p:cSld><p:spTree>");
    xml.push_str(group_props());

    xml.push_str(concat!(
        "<p:sp><p:nvSpPr>",
        r#"<p:cNvPr id="2" name="Slide Image Placeholder 1"/>"#,
        r#"<p:cNvSpPr><a:spLocks noGrp="1" noRot="1" noChangeAspect="1"/></p:cNvSpPr>"#,
        r#"<p:nvPr><p:ph type="sldImg"/></p:nvPr>"#,
        "</p:nvSpPr><p:spPr/></p:sp>"
    ));

    placeholder_open(&mut xml, 3, "Notes Placeholder 2", r#"<p:ph type="body" idx="1"/>"#)?;
    for line in notes.lines() {
        text_paragraph(&mut xml, line)?;
    }
    if notes.lines().next().is_none() {
        xml.push_str(r#"<a:p><a:endParaRPr lang="en-US"/></a:p>"#);
    }
    xml.push_str(PLACEHOLDER_CLOSE);

    xml.push_str("</p:spTree></p:cSld>");
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:notes>");
    Ok(xml)
}

pub(crate) fn notes_slide_rels(number: usize) -> Result<String> {
    relationships(&[
        Rel {
            id: "rId1".into(),
            kind: REL_NOTES_MASTER,
            target: "../notesMasters/notesMaster1.xml".into(),
        },
        Rel {
            id: "rId2".into(),
            kind: REL_SLIDE,
            target: format!("../slides/slide{number}.xml"),
        },
    ])
}

pub(crate) fn core_props(title: &str, created: DateTime<Utc>) -> Result<String> {
    let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
    let mut xml = String::with_capacity(768);
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    xml.push_str("<cp:revision>1</cp:revision>");
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{stamp}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{stamp}</dcterms:modified>"#
    )?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

pub(crate) fn app_props(slide_count: usize, notes_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECL);
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    xml.push_str("<Application>slide</Application>");
    write!(
        xml,
        "<Slides>{slide_count}</Slides><Notes>{notes_count}</Notes><PresentationFormat>Widescreen</PresentationFormat>"
    )?;
    xml.push_str("</Properties>");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_lists_slides_after_fixed_rels() {
        let xml = presentation(2).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId4"/>"#));
        assert!(xml.contains(r#"<p:sldId id="257" r:id="rId5"/>"#));
        let rels = presentation_rels(2).unwrap();
        assert!(rels.contains(r#"Id="rId5""#));
        assert!(rels.contains("slides/slide2.xml"));
    }

    #[test]
    fn test_slide_bullets_keep_order_and_escape() {
        let s = PptxSlide::new("Q&A", vec!["first <one>".into(), "second".into()]);
        let xml = slide(&s).unwrap();
        assert!(xml.contains("<a:t>Q&amp;A</a:t>"));
        let first = xml.find("first &lt;one&gt;").unwrap();
        let second = xml.find("<a:t>second</a:t>").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_notes_rel_only_when_notes_exist() {
        assert!(!slide_rels(1, false).unwrap().contains("notesSlide"));
        assert!(slide_rels(3, true).unwrap().contains("../notesSlides/notesSlide3.xml"));
    }

    #[test]
    fn test_content_types_cover_notes_slides() {
        let slides = vec![
            PptxSlide::new("a", vec!["x".into()]).with_notes("n"),
            PptxSlide::new("b", vec!["y".into()]),
        ];
        let xml = content_types(&slides).unwrap();
        assert!(xml.contains("/ppt/notesSlides/notesSlide1.xml"));
        assert!(!xml.contains("/ppt/notesSlides/notesSlide2.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
    }
}
