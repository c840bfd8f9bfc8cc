//! Static node-kind to presentation mapping shared by every writer.

use crate::model::{ContentNode, NodeKind};

/// Horizontal alignment of a rendered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn css(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "justify",
        }
    }

    /// WordprocessingML `w:jc` value.
    pub fn docx(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// How a node participates in the heading outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingRole {
    /// Not a heading
    None,
    /// Document title (the person's name)
    Title,
    /// Section heading at the node's heading level
    Section,
}

/// Presentation of one node kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub alignment: Alignment,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points
    pub size_pt: f32,
    /// Indentation level (0 = none)
    pub indent: u8,
    pub heading: HeadingRole,
    /// Stylesheet class / paragraph style name
    pub class: &'static str,
}

impl NodeStyle {
    /// Font size in half-points, as WordprocessingML expects.
    pub fn half_points(&self) -> u32 {
        (self.size_pt * 2.0).round() as u32
    }
}

const fn style(
    alignment: Alignment,
    bold: bool,
    italic: bool,
    size_pt: f32,
    indent: u8,
    heading: HeadingRole,
    class: &'static str,
) -> NodeStyle {
    NodeStyle {
        alignment,
        bold,
        italic,
        size_pt,
        indent,
        heading,
        class,
    }
}

const NAME: NodeStyle = style(
    Alignment::Center,
    true,
    false,
    18.0,
    0,
    HeadingRole::Title,
    "resume-name",
);
const CONTACT: NodeStyle = style(
    Alignment::Center,
    false,
    false,
    10.0,
    0,
    HeadingRole::None,
    "contact-info",
);
const SECTION_HEADER: NodeStyle = style(
    Alignment::Left,
    true,
    false,
    14.0,
    0,
    HeadingRole::Section,
    "section-header",
);
const JOB_TITLE: NodeStyle = style(
    Alignment::Left,
    true,
    false,
    12.0,
    0,
    HeadingRole::None,
    "job-title",
);
const COMPANY_DATE: NodeStyle = style(
    Alignment::Right,
    false,
    true,
    10.0,
    0,
    HeadingRole::None,
    "company-info",
);
const LIST_ITEM: NodeStyle = style(
    Alignment::Left,
    false,
    false,
    11.0,
    1,
    HeadingRole::None,
    "bullet-point",
);
const NUMBERED_ITEM: NodeStyle = style(
    Alignment::Left,
    false,
    false,
    11.0,
    1,
    HeadingRole::None,
    "numbered-item",
);
const PARAGRAPH: NodeStyle = style(
    Alignment::Justify,
    false,
    false,
    11.0,
    0,
    HeadingRole::None,
    "resume-paragraph",
);
const TABLE: NodeStyle = style(
    Alignment::Left,
    false,
    false,
    10.0,
    0,
    HeadingRole::None,
    "resume-table",
);

/// Style of a node kind.
pub fn style_for(kind: NodeKind) -> NodeStyle {
    match kind {
        NodeKind::Name => NAME,
        NodeKind::Contact => CONTACT,
        NodeKind::SectionHeader => SECTION_HEADER,
        NodeKind::JobTitle => JOB_TITLE,
        NodeKind::CompanyDate => COMPANY_DATE,
        NodeKind::ListItem => LIST_ITEM,
        NodeKind::NumberedItem => NUMBERED_ITEM,
        NodeKind::Paragraph => PARAGRAPH,
        NodeKind::Table => TABLE,
    }
}

/// Outline level of a node in the output (1 = title).
///
/// Section headers sit one level below the title: heading level 1 becomes
/// outline level 2.
pub fn outline_level(node: &ContentNode) -> Option<u8> {
    match style_for(node.kind).heading {
        HeadingRole::None => None,
        HeadingRole::Title => Some(1),
        HeadingRole::Section => Some(node.heading_level.unwrap_or(2).clamp(1, 5) + 1),
    }
}

/// Strip a leading bullet glyph and the whitespace after it.
pub fn strip_bullet(text: &str) -> &str {
    let trimmed = text.trim_start();
    match trimmed.chars().next() {
        Some(c) if crate::structure::classify::BULLET_GLYPHS.contains(&c) => {
            trimmed[c.len_utf8()..].trim_start()
        }
        _ => trimmed,
    }
}
