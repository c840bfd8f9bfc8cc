//! End-to-end conversion tests over an in-memory resume fixture.

mod common;

use std::io::{Cursor, Read};

use pdfconv::convert::{ConvertOptions, WriterRegistry};
use pdfconv::{
    convert_file, parse_bytes, parse_file, parse_file_with_options, Error, NodeKind,
    PageSelection, ParseOptions,
};

#[test]
fn test_parse_resume_structure() {
    let doc = parse_bytes(&common::resume_bytes()).unwrap();

    assert_eq!(doc.page_count(), 2);
    let kinds: Vec<NodeKind> = doc.pages[0].nodes.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Name,
            NodeKind::Contact,
            NodeKind::SectionHeader,
            NodeKind::JobTitle,
            NodeKind::CompanyDate,
            NodeKind::ListItem,
            NodeKind::ListItem,
            NodeKind::Paragraph,
        ]
    );
    assert_eq!(doc.pages[0].nodes[0].text, "Jane Doe");
    assert!(doc.pages[0].nodes[0].format.bold);
    assert_eq!(doc.pages[0].nodes[2].heading_level, Some(1));
    assert!(doc.pages[0].nodes[4].format.italic);

    let page_two: Vec<NodeKind> = doc.pages[1].nodes.iter().map(|n| n.kind).collect();
    assert_eq!(page_two, vec![NodeKind::SectionHeader, NodeKind::Paragraph]);
}

#[test]
fn test_metadata_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_resume(dir.path());

    let doc = parse_file(&path).unwrap();
    assert_eq!(doc.metadata.title.as_deref(), Some("Jane Doe Resume"));
    assert_eq!(doc.metadata.author.as_deref(), Some("Jane Doe"));
    assert_eq!(doc.metadata.page_count, 2);
    assert_eq!(doc.metadata.pdf_version, "1.5");
    assert!(doc.metadata.created.is_some());
}

#[test]
fn test_plain_text_mode_has_no_metrics() {
    let dir = tempfile::tempdir().unwrap();
    let path = common::write_resume(dir.path());

    let doc = parse_file_with_options(&path, ParseOptions::new().plain_text()).unwrap();
    let first = doc.nodes().next().unwrap();
    assert_eq!(first.kind, NodeKind::Name);
    assert!(doc.nodes().all(|n| n.format.font_size.is_none()));
}

#[test]
fn test_convert_to_docx() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_resume(dir.path());
    let output = dir.path().join("resume.docx");

    let report = convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    assert_eq!(report.format, "docx");
    assert_eq!(report.headings(), 3);
    assert_eq!(report.paragraphs(), 7);
    assert_eq!(
        report.message(),
        "Successfully converted PDF to Word. Created 3 headings and 7 paragraphs."
    );

    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), report.output_bytes);
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    assert!(xml.contains("Jane Doe"));
    assert!(xml.contains("tools &lt;fast&gt;."));
    assert!(xml.contains(r#"<w:br w:type="page"/>"#));
}

#[test]
fn test_convert_to_html() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_resume(dir.path());
    let output = dir.path().join("resume.html");

    convert_file(&input, &output, &ConvertOptions::default()).unwrap();
    let html = std::fs::read_to_string(&output).unwrap();

    assert!(html.contains("<title>Jane Doe Resume</title>"));
    assert!(html.contains("<h1 class=\"resume-name\">Jane Doe</h1>"));
    assert!(html.contains("<h2 class=\"section-header\">EXPERIENCE</h2>"));
    assert!(html.contains("<p class=\"job-title\">Senior Software Engineer</p>"));
    assert_eq!(html.matches("<ul>").count(), 1);
    assert!(html.contains("<li class=\"bullet-point\">Led a team of five people</li>"));
    assert!(html.contains("services &amp; tools &lt;fast&gt;."));
    assert_eq!(html.matches("<section class=\"pdf-page\"").count(), 2);
}

#[test]
fn test_convert_with_explicit_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_resume(dir.path());
    let output = dir.path().join("resume.out");

    let options = ConvertOptions::new().with_format("md");
    let report = convert_file(&input, &output, &options).unwrap();
    assert_eq!(report.format, "markdown");

    let md = std::fs::read_to_string(&output).unwrap();
    assert!(md.starts_with("# Jane Doe"));
    assert!(md.contains("## EXPERIENCE"));
    assert!(md.contains("**Senior Software Engineer**"));
    assert!(md.contains("- Led a team of five people\n- Shipped the billing platform"));
}

#[test]
fn test_convert_selected_pages_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_resume(dir.path());
    let output = dir.path().join("resume.json");

    let options = ConvertOptions::new().with_pages(PageSelection::pages([2]));
    let report = convert_file(&input, &output, &options).unwrap();
    assert_eq!(report.stats.page_count, 1);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    let pages = json["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0]["number"], 2);
}

#[test]
fn test_convert_bytes_to_text() {
    let registry = WriterRegistry::with_defaults();
    let bytes = registry
        .convert_bytes(&common::resume_bytes(), "txt", &ConvertOptions::default())
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("Jane Doe\n\n"));
    assert!(text.contains("• Led a team of five people"));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let result = convert_file(
        dir.path().join("missing.pdf"),
        dir.path().join("out.docx"),
        &ConvertOptions::default(),
    );
    match result {
        Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
        other => panic!("expected NotFound, got {:?}", other.map(|r| r.message())),
    }
}

#[test]
fn test_non_pdf_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("notes.pdf");
    std::fs::write(&input, "just some text").unwrap();

    let result = convert_file(&input, dir.path().join("out.html"), &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnknownFormat)));
}

#[test]
fn test_unsupported_output_is_rejected_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let input = common::write_resume(dir.path());
    let output = dir.path().join("resume.pptx");

    let result = convert_file(&input, &output, &ConvertOptions::default());
    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(!output.exists());
}

#[test]
fn test_empty_document_is_no_content() {
    let doc = common::build_document(&[&[]]);
    let dir = tempfile::tempdir().unwrap();
    let input = common::save(doc, dir.path(), "empty.pdf");

    let options = ConvertOptions::new().with_parse_options(ParseOptions::new().lenient());
    let result = convert_file(&input, dir.path().join("out.docx"), &options);
    assert!(matches!(result, Err(Error::NoContent)));
}
