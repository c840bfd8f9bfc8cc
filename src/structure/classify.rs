//! Line classification.
//!
//! Rules are evaluated in a fixed order and the first match wins:
//! name, contact, section header, job title, company/date, list item,
//! numbered item, paragraph. Formatting-dependent clauses only apply when
//! the line carries font metrics; without them classification falls back
//! to the textual rules.

use super::config::StructureConfig;
use crate::model::{Line, NodeKind};
use regex::Regex;
use std::sync::LazyLock;

/// Glyphs that open a bulleted list item.
pub const BULLET_GLYPHS: [char; 8] = ['•', '▪', '▫', '◦', '‣', '⁃', '-', '*'];

const CONTACT_MARKERS: [&str; 4] = ["@", "http", "linkedin", "behance"];

const NAME_EXCLUDED_WORDS: [&str; 5] = ["experience", "education", "skills", "summary", "work"];

const SECTION_KEYWORDS: [&str; 7] = [
    "work experience",
    "experience",
    "education",
    "skills",
    "projects",
    "summary",
    "objective",
];

const LEVEL_ONE_KEYWORDS: [&str; 3] = ["experience", "education", "skills"];

const ROLE_KEYWORDS: [&str; 6] = [
    "designer",
    "developer",
    "engineer",
    "manager",
    "analyst",
    "specialist",
];

const ORGANIZATION_WORDS: [&str; 5] = ["solutions", "technologies", "systems", "inc", "ltd"];

const COMPANY_DATE_WORDS: [&str; 14] = [
    "solutions",
    "technologies",
    "present",
    "remote",
    "current",
    "inc",
    "ltd",
    "llc",
    "corp",
    "company",
    "group",
    "university",
    "college",
    "freelance",
];

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]\d{4}\b|\b\d{3}[-.]\d{3}[-.]?\d{4}\b")
        .unwrap()
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());

static MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
    )
    .unwrap()
});

static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.)]|\(\d+\)|[A-Za-z][.)]\s)").unwrap());

/// Classify a single line.
pub fn classify_line(line: &Line, config: &StructureConfig) -> NodeKind {
    let text = line.trimmed();

    if is_name(line, text, config) {
        NodeKind::Name
    } else if is_contact(text, config) {
        NodeKind::Contact
    } else if is_section_header(text, config) {
        NodeKind::SectionHeader
    } else if is_job_title(text, config) {
        NodeKind::JobTitle
    } else if is_company_date(line, text) {
        NodeKind::CompanyDate
    } else if starts_with_bullet(text) {
        NodeKind::ListItem
    } else if starts_with_numbering(text) {
        NodeKind::NumberedItem
    } else {
        NodeKind::Paragraph
    }
}

/// Classify bare text as a line without metrics.
pub fn classify_text(text: &str, config: &StructureConfig) -> NodeKind {
    classify_line(&Line::plain(text, 0.0), config)
}

/// Heading level of a section header: 1 for the core resume sections, else 2.
pub fn heading_level(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if LEVEL_ONE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        1
    } else {
        2
    }
}

fn is_name(line: &Line, text: &str, config: &StructureConfig) -> bool {
    if line.is_first_line {
        return true;
    }

    // Without metrics there is no formatting evidence to satisfy this clause
    let Some(size) = line.font_size else {
        return false;
    };
    if !(line.bold || size > config.name_min_font_size) {
        return false;
    }

    let count = word_count(text);
    count > 0
        && count <= config.name_max_words
        && text
            .chars()
            .all(|c| c.is_alphabetic() || c == ' ' || c == '.')
        && is_title_or_upper(text)
        && !words(text).any(|w| NAME_EXCLUDED_WORDS.contains(&w.as_str()))
}

fn is_contact(text: &str, config: &StructureConfig) -> bool {
    let lower = text.to_lowercase();
    if CONTACT_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }
    if PHONE.is_match(text) {
        return true;
    }

    // Short digit-bearing lines (street addresses, zip codes) that are not
    // list entries or dated employment lines
    text.chars().any(|c| c.is_ascii_digit())
        && word_count(text) <= config.contact_max_words
        && !starts_with_bullet(text)
        && !starts_with_numbering(text)
        && !has_year(text)
}

fn is_section_header(text: &str, config: &StructureConfig) -> bool {
    text.chars().count() <= config.heading_max_chars && has_section_keyword(text)
}

fn is_job_title(text: &str, config: &StructureConfig) -> bool {
    has_role_keyword(text)
        && word_count(text) <= config.job_title_max_words
        && !words(text).any(|w| ORGANIZATION_WORDS.contains(&w.as_str()))
        && !text.chars().any(|c| c.is_ascii_digit())
}

fn is_company_date(line: &Line, text: &str) -> bool {
    if !has_year(text) {
        return false;
    }
    words(text).any(|w| COMPANY_DATE_WORDS.contains(&w.as_str()))
        || MONTH.is_match(text)
        || (line.has_metrics() && line.italic)
}

/// Whether the text contains a section keyword.
pub(crate) fn has_section_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether the text contains a role keyword.
pub(crate) fn has_role_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    ROLE_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Whether the text contains a four-digit year.
pub(crate) fn has_year(text: &str) -> bool {
    YEAR.is_match(text)
}

/// Whether the trimmed text opens with a bullet glyph.
pub fn starts_with_bullet(text: &str) -> bool {
    text.trim_start()
        .chars()
        .next()
        .is_some_and(|c| BULLET_GLYPHS.contains(&c))
}

/// Whether the trimmed text opens with a numbering marker.
pub fn starts_with_numbering(text: &str) -> bool {
    NUMBERED.is_match(text.trim_start())
}

/// Number of whitespace-separated words.
pub(crate) fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Lowercased alphanumeric words, punctuation stripped.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

fn is_title_or_upper(text: &str) -> bool {
    let letters: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return false;
    }
    if letters.iter().all(|c| c.is_uppercase()) {
        return true;
    }
    text.split_whitespace().all(|word| {
        word.chars()
            .find(|c| c.is_alphabetic())
            .map_or(true, char::is_uppercase)
    })
}
