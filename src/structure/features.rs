//! Line feature extraction.
//!
//! Turns positioned text fragments into [`Line`]s: fragments sharing a
//! vertical position (rounded to one decimal place) form one line, ordered
//! left to right with gap-based word spacing. Lines come out in reading
//! order, top of the page first.

use crate::model::{clamp_position, CharRecord, Line};
use std::collections::BTreeMap;

/// Direction of the vertical axis used by an extraction backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAxis {
    /// y grows upward (PDF user space); larger y is higher on the page
    #[default]
    Up,
    /// y grows downward; larger y is lower on the page
    Down,
}

/// Gap (as a fraction of average character width) that counts as a space.
const SPACE_GAP_RATIO: f32 = 0.2;

/// Character width estimate when a fragment has no usable width.
const FALLBACK_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Group positioned fragments into lines.
pub fn lines_from_records(records: &[CharRecord], axis: VerticalAxis) -> Vec<Line> {
    let mut rows: BTreeMap<i64, Vec<&CharRecord>> = BTreeMap::new();
    for record in records {
        rows.entry(y_key(record.y)).or_default().push(record);
    }

    let mut lines: Vec<Line> = rows
        .into_iter()
        .filter_map(|(key, mut row)| {
            row.sort_by(|a, b| {
                clamp_position(a.x)
                    .partial_cmp(&clamp_position(b.x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
            build_line(&row, key as f32 / 10.0)
        })
        .collect();

    // BTreeMap iteration is ascending y
    if axis == VerticalAxis::Up {
        lines.reverse();
    }

    log::debug!(
        "Grouped {} fragments into {} lines",
        records.len(),
        lines.len()
    );
    lines
}

/// Build lines from pre-segmented plain text without metrics.
///
/// Blank entries are kept; they act as paragraph break markers.
pub fn lines_from_text<S: AsRef<str>>(texts: &[S]) -> Vec<Line> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| Line::plain(text.as_ref(), i as f32))
        .collect()
}

/// Split a block of plain text into lines without metrics.
pub fn lines_from_plain_text(text: &str) -> Vec<Line> {
    let texts: Vec<&str> = text.lines().collect();
    lines_from_text(&texts)
}

fn y_key(y: f32) -> i64 {
    (clamp_position(y) * 10.0).round() as i64
}

fn build_line(row: &[&CharRecord], y: f32) -> Option<Line> {
    let text = join_fragments(row);
    if text.trim().is_empty() {
        return None;
    }

    let sizes: Vec<f32> = row.iter().filter_map(|r| r.valid_font_size()).collect();
    let font_size = if sizes.is_empty() {
        None
    } else {
        Some(sizes.iter().sum::<f32>() / sizes.len() as f32)
    };

    let x = row.first().map(|r| clamp_position(r.x));

    Some(Line {
        text,
        font_size,
        bold: row.iter().any(|r| r.is_bold()),
        italic: row.iter().any(|r| r.is_italic()),
        y,
        x,
        is_first_line: false,
    })
}

fn join_fragments(row: &[&CharRecord]) -> String {
    let mut result = String::new();

    for (i, frag) in row.iter().enumerate() {
        if i > 0 {
            let prev = row[i - 1];
            if needs_space(prev, frag) {
                result.push(' ');
            }
        }
        result.push_str(&frag.text);
    }

    result
}

fn needs_space(prev: &CharRecord, curr: &CharRecord) -> bool {
    let prev_width = match prev.width.filter(|w| w.is_finite() && *w >= 0.0) {
        Some(w) => w,
        None => return false,
    };
    if curr.width.is_none() {
        return false;
    }

    let gap = clamp_position(curr.x) - (clamp_position(prev.x) + prev_width);
    let threshold = avg_char_width(curr) * SPACE_GAP_RATIO;
    if gap <= threshold {
        return false;
    }

    if prev.text.ends_with(char::is_whitespace) || curr.text.starts_with(char::is_whitespace) {
        return false;
    }

    let prev_spaceless = prev
        .text
        .chars()
        .last()
        .map(is_spaceless_script_char)
        .unwrap_or(false);
    let curr_spaceless = curr
        .text
        .chars()
        .next()
        .map(is_spaceless_script_char)
        .unwrap_or(false);

    !(prev_spaceless && curr_spaceless)
}

fn avg_char_width(record: &CharRecord) -> f32 {
    let chars = record.text.chars().count();
    match record.width.filter(|w| w.is_finite() && *w > 0.0) {
        Some(w) if chars > 0 => w / chars as f32,
        _ => {
            record.valid_font_size().unwrap_or(crate::model::DEFAULT_FONT_SIZE)
                * FALLBACK_CHAR_WIDTH_RATIO
        }
    }
}

/// Scripts written without word spaces (Han, kana, CJK punctuation).
///
/// Hangul is excluded; Korean uses spaces between words.
pub(crate) fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    (0x4E00..=0x9FFF).contains(&code)
        || (0x3400..=0x4DBF).contains(&code)
        || (0x20000..=0x2EBEF).contains(&code)
        || (0x3040..=0x309F).contains(&code)
        || (0x30A0..=0x30FF).contains(&code)
        || (0x3000..=0x303F).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(text: &str, x: f32, y: f32, width: f32) -> CharRecord {
        CharRecord::new(text, x, y)
            .with_font("Helvetica", 10.0)
            .with_width(width)
    }

    #[test]
    fn test_groups_by_rounded_y() {
        let records = vec![
            rec("World", 40.0, 700.02, 25.0),
            rec("Hello", 10.0, 699.98, 25.0),
            rec("Next", 10.0, 680.0, 20.0),
        ];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello World");
        assert_eq!(lines[1].text, "Next");
        assert_eq!(lines[0].x, Some(10.0));
    }

    #[test]
    fn test_axis_down_orders_ascending() {
        let records = vec![rec("second", 0.0, 50.0, 30.0), rec("first", 0.0, 10.0, 25.0)];
        let lines = lines_from_records(&records, VerticalAxis::Down);
        assert_eq!(lines[0].text, "first");
        assert_eq!(lines[1].text, "second");
    }

    #[test]
    fn test_no_space_for_adjacent_glyphs() {
        let records = vec![
            rec("a", 0.0, 0.0, 5.0),
            rec("b", 5.0, 0.0, 5.0),
            rec("c", 10.5, 0.0, 5.0),
        ];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines[0].text, "abc");
    }

    #[test]
    fn test_no_space_between_cjk() {
        let records = vec![rec("漢", 0.0, 0.0, 10.0), rec("字", 20.0, 0.0, 10.0)];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines[0].text, "漢字");
    }

    #[test]
    fn test_without_widths_concatenates_verbatim() {
        let records = vec![
            CharRecord::new("Jane", 0.0, 0.0),
            CharRecord::new(" Doe", 100.0, 0.0),
        ];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines[0].text, "Jane Doe");
        assert_eq!(lines[0].font_size, None);
    }

    #[test]
    fn test_font_metrics() {
        let records = vec![
            CharRecord::new("Big", 0.0, 0.0)
                .with_font("Arial-BoldMT", 18.0)
                .with_width(30.0),
            CharRecord::new("Name", 40.0, 0.0)
                .with_font("Arial-ItalicMT", 14.0)
                .with_width(40.0),
            CharRecord::new("!", 81.0, 0.0).with_font("Arial", f32::NAN),
        ];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        let line = &lines[0];
        assert_eq!(line.font_size, Some(16.0));
        assert!(line.bold);
        assert!(line.italic);
    }

    #[test]
    fn test_nan_position_clamped() {
        let records = vec![rec("x", f32::NAN, f32::NAN, 5.0)];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].y, 0.0);
        assert_eq!(lines[0].x, Some(0.0));
    }

    #[test]
    fn test_whitespace_rows_dropped() {
        let records = vec![rec("   ", 0.0, 5.0, 5.0), rec("text", 0.0, 0.0, 20.0)];
        let lines = lines_from_records(&records, VerticalAxis::Up);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_lines_from_text_keeps_blanks() {
        let lines = lines_from_plain_text("Jane Doe\n\nSummary");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].is_blank());
        assert!(lines.iter().all(|l| !l.has_metrics()));
        assert_eq!(lines[2].y, 2.0);
    }

    #[test]
    fn test_empty_input() {
        assert!(lines_from_records(&[], VerticalAxis::Up).is_empty());
    }
}
