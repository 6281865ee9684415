//! Fixed parts of every package: theme, masters and the single layout.
//!
//! Geometry is for a 16:9 slide of 12192000 x 6858000 EMU.

pub(crate) const SLIDE_WIDTH: i64 = 12_192_000;
pub(crate) const SLIDE_HEIGHT: i64 = 6_858_000;
pub(crate) const NOTES_WIDTH: i64 = 6_858_000;
pub(crate) const NOTES_HEIGHT: i64 = 9_144_000;

pub(crate) const THEME: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme">"#,
    "<a:themeElements>",
    r#"<a:clrScheme name="Office">"#,
    r#"<a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>"#,
    r#"<a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1>"#,
    r#"<a:dk2><a:srgbClr val="44546A"/></a:dk2>"#,
    r#"<a:lt2><a:srgbClr val="E7E6E6"/></a:lt2>"#,
    r#"<a:accent1><a:srgbClr val="4472C4"/></a:accent1>"#,
    r#"<a:accent2><a:srgbClr val="ED7D31"/></a:accent2>"#,
    r#"<a:accent3><a:srgbClr val="A5A5A5"/></a:accent3>"#,
    r#"<a:accent4><a:srgbClr val="FFC000"/></a:accent4>"#,
    r#"<a:accent5><a:srgbClr val="5B9BD5"/></a:accent5>"#,
    r#"<a:accent6><a:srgbClr val="70AD47"/></a:accent6>"#,
    r#"<a:hlink><a:srgbClr val="0563C1"/></a:hlink>"#,
    r#"<a:folHlink><a:srgbClr val="954F72"/></a:folHlink>"#,
    "</a:clrScheme>",
    r#"<a:fontScheme name="Office">"#,
    r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
    r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
    "</a:fontScheme>",
    r#"<a:fmtScheme name="Office">"#,
    "<a:fillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    "</a:fillStyleLst>",
    "<a:lnStyleLst>",
    r#"<a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    r#"<a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>"#,
    "</a:lnStyleLst>",
    "<a:effectStyleLst>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "<a:effectStyle><a:effectLst/></a:effectStyle>",
    "</a:effectStyleLst>",
    "<a:bgFillStyleLst>",
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#,
    "</a:bgFillStyleLst>",
    "</a:fmtScheme>",
    "</a:themeElements>",
    "<a:objectDefaults/>",
    "<a:extraClrSchemeLst/>",
    "</a:theme>"
);

const CLR_MAP: &str = r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>"#;

const GROUP_PROPS: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    "<p:grpSpPr><a:xfrm>",
    r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#,
    "</a:xfrm></p:grpSpPr>"
);

/// Placeholder with an explicit frame, used on masters.
fn framed_placeholder(id: u32, name: &str, ph: &str, x: i64, y: i64, cx: i64, cy: i64) -> String {
    format!(
        concat!(
            "<p:sp><p:nvSpPr>",
            r#"<p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            "<p:nvPr>{ph}</p:nvPr>",
            "</p:nvSpPr>",
            r#"<p:spPr><a:xfrm><a:off x="{x}" y="{y}"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
            r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr>"#,
            r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>"#,
            "</p:sp>"
        ),
        id = id,
        name = name,
        ph = ph,
        x = x,
        y = y,
        cx = cx,
        cy = cy,
    )
}

/// Placeholder that inherits its frame from the master.
fn inherited_placeholder(id: u32, name: &str, ph: &str) -> String {
    format!(
        concat!(
            "<p:sp><p:nvSpPr>",
            r#"<p:cNvPr id="{id}" name="{name}"/>"#,
            r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#,
            "<p:nvPr>{ph}</p:nvPr>",
            "</p:nvSpPr><p:spPr/>",
            r#"<p:txBody><a:bodyPr/><a:lstStyle/><a:p><a:endParaRPr lang="en-US"/></a:p></p:txBody>"#,
            "</p:sp>"
        ),
        id = id,
        name = name,
        ph = ph,
    )
}

fn level_style(tag: &str, size: u32, bullet: bool) -> String {
    let bullet_xml = if bullet {
        r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#
    } else {
        "<a:buNone/>"
    };
    let indent = if bullet { r#" marL="228600" indent="-228600""# } else { "" };
    format!(
        r#"<a:{tag}{indent}>{bullet_xml}<a:defRPr sz="{size}"><a:solidFill><a:schemeClr val="tx1"/></a:solidFill><a:latin typeface="+mn-lt"/></a:defRPr></a:{tag}>"#
    )
}

pub(crate) fn slide_master() -> String {
    let title = framed_placeholder(
        2,
        "Title Placeholder 1",
        r#"<p:ph type="title"/>"#,
        838_200,
        365_125,
        10_515_600,
        1_325_563,
    );
    let body = framed_placeholder(
        3,
        "Text Placeholder 2",
        r#"<p:ph type="body" idx="1"/>"#,
        838_200,
        1_825_625,
        10_515_600,
        4_351_338,
    );
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:sldMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            "<p:spTree>{group}{title}{body}</p:spTree></p:cSld>",
            "{clr_map}",
            r#"<p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst>"#,
            "<p:txStyles>",
            "<p:titleStyle>{title_style}</p:titleStyle>",
            "<p:bodyStyle>{body_style}</p:bodyStyle>",
            "<p:otherStyle>{other_style}</p:otherStyle>",
            "</p:txStyles>",
            "</p:sldMaster>"
        ),
        a = crate::xml::NS_A,
        r = crate::xml::NS_R,
        p = crate::xml::NS_P,
        group = GROUP_PROPS,
        title = title,
        body = body,
        clr_map = CLR_MAP,
        title_style = level_style("lvl1pPr", 4400, false),
        body_style = level_style("lvl1pPr", 2800, true),
        other_style = level_style("lvl1pPr", 1800, false),
    )
}

pub(crate) fn title_and_content_layout() -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:sldLayout xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}" type="obj" preserve="1">"#,
            r#"<p:cSld name="Title and Content"><p:spTree>{group}{title}{body}</p:spTree></p:cSld>"#,
            "<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>",
            "</p:sldLayout>"
        ),
        a = crate::xml::NS_A,
        r = crate::xml::NS_R,
        p = crate::xml::NS_P,
        group = GROUP_PROPS,
        title = inherited_placeholder(2, "Title 1", r#"<p:ph type="title"/>"#),
        body = inherited_placeholder(3, "Content Placeholder 2", r#"<p:ph idx="1"/>"#),
    )
}

pub(crate) fn notes_master() -> String {
    let image = framed_placeholder(
        2,
        "Slide Image Placeholder 1",
        r#"<p:ph type="sldImg" idx="2"/>"#,
        685_800,
        1_143_000,
        5_486_400,
        3_086_100,
    );
    let body = framed_placeholder(
        3,
        "Notes Placeholder 2",
        r#"<p:ph type="body" sz="quarter" idx="3"/>"#,
        685_800,
        4_400_550,
        5_486_400,
        3_600_450,
    );
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<p:notesMaster xmlns:a="{a}" xmlns:r="{r}" xmlns:p="{p}">"#,
            r#"<p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>"#,
            "<p:spTree>{group}{image}{body}</p:spTree></p:cSld>",
            "{clr_map}",
            "</p:notesMaster>"
        ),
        a = crate::xml::NS_A,
        r = crate::xml::NS_R,
        p = crate::xml::NS_P,
        group = GROUP_PROPS,
        image = image,
        body = body,
        clr_map = CLR_MAP,
    )
}

pub(crate) fn group_props() -> &'static str {
    GROUP_PROPS
}
