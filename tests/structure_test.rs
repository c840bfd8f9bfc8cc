//! Classifier and merge properties over the public structure API.

use pdfconv::structure::{
    assemble, classify_line, classify_text, lines_from_records, PageInput, StructureBuilder,
    StructureConfig, VerticalAxis,
};
use pdfconv::{CharRecord, Error, Line, NodeKind};

fn config() -> StructureConfig {
    StructureConfig::default()
}

#[test]
fn test_classification_is_total_and_pure() {
    let samples = [
        "Jane Doe",
        "jane@example.com",
        "EDUCATION",
        "UI/UX Designer",
        "Acme Solutions — 2021-Present",
        "• Led a team of 5 engineers",
        "1. First numbered entry",
        "Plain sentence about nothing in particular.",
        "123 Main Street",
        "???",
    ];
    for text in samples {
        let first = classify_text(text, &config());
        assert!(NodeKind::ALL.contains(&first));
        assert_eq!(first, classify_text(text, &config()), "{}", text);
    }
}

#[test]
fn test_first_line_is_name_regardless_of_keywords() {
    let line = Line::plain("Work Experience", 0.0).first();
    assert_eq!(classify_line(&line, &config()), NodeKind::Name);

    let styled = Line::styled("Data Engineer", 11.0, false, 700.0).first();
    assert_eq!(classify_line(&styled, &config()), NodeKind::Name);
}

#[test]
fn test_at_sign_is_contact() {
    assert_eq!(
        classify_text("Senior Engineer jane@acme.com", &config()),
        NodeKind::Contact
    );
    assert_eq!(classify_text("Skills: me@x.io", &config()), NodeKind::Contact);
}

#[test]
fn test_education_is_level_one_section() {
    let nodes = assemble(&[Line::plain("EDUCATION", 0.0)], &config());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].kind, NodeKind::SectionHeader);
    assert_eq!(nodes[0].heading_level, Some(1));
}

#[test]
fn test_job_title_and_company_date() {
    assert_eq!(classify_text("UI/UX Designer", &config()), NodeKind::JobTitle);
    assert_eq!(
        classify_text("Acme Solutions — 2021-Present", &config()),
        NodeKind::CompanyDate
    );
}

#[test]
fn test_bullet_breaks_after_sentence() {
    let lines = [
        Line::plain("Worked on a great many things over the years.", 0.0),
        Line::plain("• Led a team of 5 engineers", 1.0),
    ];
    let nodes = assemble(&lines, &config());
    let kinds: Vec<NodeKind> = nodes.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::Paragraph, NodeKind::ListItem]);
    assert_eq!(nodes[1].text, "• Led a team of 5 engineers");
}

#[test]
fn test_paragraph_merge_respects_length_cap() {
    let chunk = "the quick brown fox jumps over the lazy dog ".repeat(5);
    let chunk = chunk.trim();
    assert!(chunk.len() > 200 && chunk.len() < 250);

    let lines = [
        Line::plain(chunk, 0.0),
        Line::plain(chunk, 1.0),
        Line::plain(chunk, 2.0),
    ];
    let nodes = assemble(&lines, &config());

    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|n| n.kind == NodeKind::Paragraph));
    assert_eq!(nodes[0].format.merged_lines, 2);
    assert_eq!(nodes[1].format.merged_lines, 1);
    assert!(nodes[0].text.chars().count() <= 500);
}

#[test]
fn test_zero_lines_is_no_content() {
    assert!(assemble(&[], &config()).is_empty());

    let result =
        StructureBuilder::new().build(vec![PageInput::plain_text(1, Vec::<String>::new())]);
    assert!(matches!(result, Err(Error::NoContent)));
}

#[test]
fn test_short_nodes_are_dropped() {
    let lines = [
        Line::plain("ab", 0.0),
        Line::plain("", 1.0),
        Line::plain("Enough text here", 2.0),
    ];
    let nodes = assemble(&lines, &config());
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].text, "Enough text here");
}

#[test]
fn test_records_to_lines_to_nodes() {
    let records = vec![
        CharRecord::new("Doe", 125.0, 700.0)
            .with_font("Helvetica-Bold", 20.0)
            .with_width(15.0),
        CharRecord::new("Jane", 100.0, 700.0)
            .with_font("Helvetica-Bold", 20.0)
            .with_width(20.0),
        CharRecord::new("SKILLS", 72.0, 650.0)
            .with_font("Helvetica-Bold", 14.0)
            .with_width(40.0),
    ];
    let lines = lines_from_records(&records, VerticalAxis::Up);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].text, "Jane Doe");
    assert!(lines[0].bold);
    assert_eq!(lines[0].font_size, Some(20.0));

    let doc = StructureBuilder::new()
        .build(vec![PageInput::positioned(1, records)])
        .unwrap();
    let kinds: Vec<NodeKind> = doc.nodes().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::Name, NodeKind::SectionHeader]);
}

#[test]
fn test_custom_merge_cap() {
    let config = StructureConfig::default().with_merge_max_chars(20);
    let lines = [
        Line::plain("first short line", 0.0),
        Line::plain("second short line", 1.0),
    ];
    let nodes = assemble(&lines, &config);
    assert_eq!(nodes.len(), 2);
}
