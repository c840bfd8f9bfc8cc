//! Word (`.docx`) rendering: a minimal WordprocessingML package.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::model::{ContentNode, NodeKind, StructuredDocument, Table};

use super::style::{outline_level, strip_bullet, style_for, NodeStyle};
use super::RenderOptions;

/// Indentation per level, in twentieths of a point.
const INDENT_TWIPS: u32 = 360;

/// Table border width, in eighths of a point.
const BORDER_SIZE: u32 = 4;

/// Convert a document to a `.docx` archive.
pub fn to_docx(doc: &StructuredDocument, options: &RenderOptions) -> Result<Vec<u8>> {
    let document_xml = build_document_xml(doc, options);
    let title = options.title.as_deref().or_else(|| doc.title());
    let core_xml = build_core_xml(title, doc.metadata.author.as_deref());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let opt = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("[Content_Types].xml", opt)?;
    zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

    zip.start_file("_rels/.rels", opt)?;
    zip.write_all(RELS_XML.as_bytes())?;

    zip.start_file("docProps/core.xml", opt)?;
    zip.write_all(core_xml.as_bytes())?;

    zip.start_file("word/document.xml", opt)?;
    zip.write_all(document_xml.as_bytes())?;

    zip.start_file("word/_rels/document.xml.rels", opt)?;
    zip.write_all(WORD_RELS_XML.as_bytes())?;

    zip.start_file("word/styles.xml", opt)?;
    zip.write_all(STYLES_XML.as_bytes())?;

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

fn build_document_xml(doc: &StructuredDocument, options: &RenderOptions) -> String {
    let mut body = String::new();
    let mut first = true;

    for page in doc
        .pages
        .iter()
        .filter(|p| options.page_selection.includes(p.number))
    {
        if !first && options.page_breaks {
            body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
        }
        first = false;

        for node in &page.nodes {
            match (&node.table, node.kind) {
                (Some(table), NodeKind::Table) => push_table(&mut body, table),
                _ => push_paragraph(&mut body, node),
            }
        }
    }

    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    {body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="708" w:footer="708" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
    )
}

fn paragraph_style_id(node: &ContentNode) -> Option<String> {
    match outline_level(node) {
        Some(1) => Some("Title".to_string()),
        Some(level) => Some(format!("Heading{}", level - 1)),
        None if node.kind == NodeKind::ListItem => Some("ListBullet".to_string()),
        None => None,
    }
}

fn push_paragraph(body: &mut String, node: &ContentNode) {
    let style = style_for(node.kind);
    let text = match node.kind {
        NodeKind::ListItem => format!("• {}", strip_bullet(&node.text)),
        _ => node.text.clone(),
    };

    body.push_str("<w:p><w:pPr>");
    if let Some(id) = paragraph_style_id(node) {
        body.push_str(&format!(r#"<w:pStyle w:val="{}"/>"#, id));
    }
    if style.indent > 0 {
        body.push_str(&format!(
            r#"<w:ind w:left="{}"/>"#,
            INDENT_TWIPS * u32::from(style.indent)
        ));
    }
    body.push_str(&format!(r#"<w:jc w:val="{}"/>"#, style.alignment.docx()));
    body.push_str("</w:pPr>");
    push_run(body, &text, &style, style.bold, style.italic);
    body.push_str("</w:p>");
}

fn push_run(body: &mut String, text: &str, style: &NodeStyle, bold: bool, italic: bool) {
    body.push_str("<w:r><w:rPr>");
    if bold {
        body.push_str("<w:b/>");
    }
    if italic {
        body.push_str("<w:i/>");
    }
    let half_points = style.half_points();
    body.push_str(&format!(
        r#"<w:sz w:val="{half_points}"/><w:szCs w:val="{half_points}"/>"#
    ));
    body.push_str(r#"</w:rPr><w:t xml:space="preserve">"#);
    body.push_str(&xml_escape(text));
    body.push_str("</w:t></w:r>");
}

fn push_table(body: &mut String, table: &Table) {
    let col_count = table.column_count();
    if col_count == 0 {
        return;
    }
    let style = style_for(NodeKind::Table);

    body.push_str("<w:tbl><w:tblPr>");
    body.push_str(r#"<w:tblW w:w="5000" w:type="pct"/><w:tblBorders>"#);
    for edge in ["top", "left", "bottom", "right", "insideH", "insideV"] {
        body.push_str(&format!(
            r#"<w:{edge} w:val="single" w:sz="{BORDER_SIZE}" w:space="0" w:color="auto"/>"#
        ));
    }
    body.push_str("</w:tblBorders></w:tblPr><w:tblGrid>");
    for _ in 0..col_count {
        body.push_str("<w:gridCol/>");
    }
    body.push_str("</w:tblGrid>");

    for row in 0..table.row_count() {
        body.push_str("<w:tr>");
        for col in 0..col_count {
            body.push_str("<w:tc><w:p>");
            push_run(body, table.cell(row, col), &style, row == 0, false);
            body.push_str("</w:p></w:tc>");
        }
        body.push_str("</w:tr>");
    }
    body.push_str("</w:tbl>");
    // Word expects a paragraph after every table
    body.push_str("<w:p/>");
}

fn build_core_xml(title: Option<&str>, author: Option<&str>) -> String {
    let mut props = String::new();
    if let Some(title) = title {
        props.push_str(&format!("<dc:title>{}</dc:title>", xml_escape(title)));
    }
    if let Some(author) = author {
        props.push_str(&format!("<dc:creator>{}</dc:creator>", xml_escape(author)));
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">{props}</cp:coreProperties>"#
    )
}

/// Escape text for XML, dropping characters XML 1.0 cannot carry.
fn xml_escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            '\t' | '\n' | '\r' => result.push(' '),
            c if c.is_control() => {}
            _ => result.push(c),
        }
    }
    result
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const WORD_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:docDefaults>
    <w:rPrDefault><w:rPr><w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:cs="Calibri"/><w:sz w:val="22"/></w:rPr></w:rPrDefault>
    <w:pPrDefault><w:pPr><w:spacing w:after="120"/></w:pPr></w:pPrDefault>
  </w:docDefaults>
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Title">
    <w:name w:val="Title"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:spacing w:after="60"/><w:outlineLvl w:val="0"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading1">
    <w:name w:val="heading 1"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="240" w:after="60"/><w:pBdr><w:bottom w:val="single" w:sz="4" w:space="1" w:color="auto"/></w:pBdr><w:outlineLvl w:val="0"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading2">
    <w:name w:val="heading 2"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:spacing w:before="200" w:after="60"/><w:outlineLvl w:val="1"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading3">
    <w:name w:val="heading 3"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="2"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading4">
    <w:name w:val="heading 4"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="3"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="Heading5">
    <w:name w:val="heading 5"/>
    <w:basedOn w:val="Normal"/>
    <w:next w:val="Normal"/>
    <w:qFormat/>
    <w:pPr><w:keepNext/><w:outlineLvl w:val="4"/></w:pPr>
  </w:style>
  <w:style w:type="paragraph" w:styleId="ListBullet">
    <w:name w:val="List Bullet"/>
    <w:basedOn w:val="Normal"/>
    <w:pPr><w:spacing w:after="40"/></w:pPr>
  </w:style>
</w:styles>"#;
