//! Paragraph break decisions.

use super::classify::{
    has_role_keyword, has_section_keyword, has_year, starts_with_bullet, word_count,
};
use super::config::StructureConfig;
use crate::model::Line;
use serde::Serialize;

/// Why a line starts a new node instead of extending the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakReason {
    /// The line is blank
    BlankLine,
    /// Font size changed by more than the configured delta
    FontSizeChange,
    /// Boldness toggled on a line that opens a new section
    BoldSectionStart,
    /// The previous line ended a sentence and this one starts a new one
    SentenceEnd,
    /// The line opens with a bullet glyph
    Bullet,
}

/// Decide whether `line` starts a new node after `accumulated`.
///
/// Rules are checked in order and the first match is returned. Rules that
/// compare formatting only fire when both lines carry font metrics.
pub fn break_reason(
    line: &Line,
    accumulated: &[Line],
    config: &StructureConfig,
) -> Option<BreakReason> {
    if line.is_blank() {
        return Some(BreakReason::BlankLine);
    }

    let last = accumulated.last()?;
    let both_styled = line.has_metrics() && last.has_metrics();

    if both_styled {
        let delta = (line.effective_font_size() - last.effective_font_size()).abs();
        if delta > config.font_delta {
            return Some(BreakReason::FontSizeChange);
        }

        if line.bold != last.bold && is_clear_section_start(line.trimmed(), config) {
            return Some(BreakReason::BoldSectionStart);
        }
    }

    if accumulated.len() > config.sentence_break_min_lines
        && ends_sentence(last.trimmed())
        && starts_uppercase(line.trimmed())
    {
        return Some(BreakReason::SentenceEnd);
    }

    if starts_with_bullet(line.trimmed()) {
        return Some(BreakReason::Bullet);
    }

    None
}

/// A section keyword, a dated role line, or a short "Label:" line.
fn is_clear_section_start(text: &str, config: &StructureConfig) -> bool {
    has_section_keyword(text)
        || (has_year(text) && has_role_keyword(text))
        || (text.ends_with(':') && word_count(text) <= config.colon_header_max_words)
}

fn ends_sentence(text: &str) -> bool {
    text.ends_with(['.', '!', '?'])
}

fn starts_uppercase(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> StructureConfig {
        StructureConfig::default()
    }

    #[test]
    fn test_blank_line() {
        let acc = vec![Line::plain("text", 0.0)];
        assert_eq!(
            break_reason(&Line::plain("  ", 1.0), &acc, &config()),
            Some(BreakReason::BlankLine)
        );
        assert_eq!(
            break_reason(&Line::plain("", 0.0), &[], &config()),
            Some(BreakReason::BlankLine)
        );
    }

    #[test]
    fn test_empty_accumulation_never_breaks() {
        assert_eq!(break_reason(&Line::plain("• item", 0.0), &[], &config()), None);
    }

    #[test]
    fn test_font_size_change() {
        let acc = vec![Line::styled("body", 11.0, false, 0.0)];
        assert_eq!(
            break_reason(&Line::styled("big", 14.0, false, 1.0), &acc, &config()),
            Some(BreakReason::FontSizeChange)
        );
        assert_eq!(
            break_reason(&Line::styled("same-ish", 13.0, false, 1.0), &acc, &config()),
            None
        );
    }

    #[test]
    fn test_font_rules_need_metrics_on_both_lines() {
        let acc = vec![Line::plain("body", 0.0)];
        assert_eq!(
            break_reason(&Line::styled("Skills:", 20.0, true, 1.0), &acc, &config()),
            None
        );
    }

    #[test]
    fn test_bold_toggle_section() {
        let acc = vec![Line::styled("some text", 11.0, false, 0.0)];
        let reason = |text: &str| {
            break_reason(&Line::styled(text, 11.0, true, 1.0), &acc, &config())
        };
        assert_eq!(reason("Technical Skills"), Some(BreakReason::BoldSectionStart));
        assert_eq!(reason("Lead Developer 2019"), Some(BreakReason::BoldSectionStart));
        assert_eq!(reason("Tools I use:"), Some(BreakReason::BoldSectionStart));
        assert_eq!(reason("A bold phrase in a paragraph"), None);
    }

    #[test]
    fn test_sentence_end_needs_three_lines() {
        let two = vec![
            Line::plain("First line of text", 0.0),
            Line::plain("ends here.", 1.0),
        ];
        let next = Line::plain("Another sentence", 2.0);
        assert_eq!(break_reason(&next, &two, &config()), None);

        let mut three = two.clone();
        three.insert(0, Line::plain("Opening line", 0.0));
        assert_eq!(
            break_reason(&next, &three, &config()),
            Some(BreakReason::SentenceEnd)
        );
        assert_eq!(
            break_reason(&Line::plain("lowercase continues", 3.0), &three, &config()),
            None
        );
    }

    #[test]
    fn test_bullet_forces_break() {
        let acc = vec![Line::plain("A sentence that ends.", 0.0)];
        assert_eq!(
            break_reason(&Line::plain("• Led a team of 5 engineers", 1.0), &acc, &config()),
            Some(BreakReason::Bullet)
        );
    }
}
