//! Text normalization for node text.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// "infor-" + "mation" joins without the hyphen; "full-" + "Stack" keeps it.
static TRAILING_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]-$").unwrap());

const LIGATURES: [(char, &str); 7] = [
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    ('\u{FB05}', "st"),
    ('\u{FB06}', "st"),
];

/// Normalize text for a content node.
///
/// Applies NFC, expands ligatures, removes replacement and private-use
/// characters, collapses whitespace runs to one space and trims.
pub fn normalize_text(text: &str) -> String {
    let nfc: String = text.nfc().collect();

    let mut cleaned = String::with_capacity(nfc.len());
    for c in nfc.chars() {
        if let Some((_, expansion)) = LIGATURES.iter().find(|(lig, _)| *lig == c) {
            cleaned.push_str(expansion);
        } else if c == '\u{FFFD}' || is_private_use(c) {
            continue;
        } else {
            cleaned.push(c);
        }
    }

    WHITESPACE_RUN
        .replace_all(&cleaned, " ")
        .trim()
        .to_string()
}

/// Append a line to accumulated paragraph text.
///
/// Lines are joined with a single space, except that a word hyphenated at
/// the end of `acc` is rejoined when `next` continues in lowercase.
pub fn join_line(acc: &mut String, next: &str) {
    let next = next.trim();
    if next.is_empty() {
        return;
    }
    if acc.is_empty() {
        acc.push_str(next);
        return;
    }

    let continues_lower = next.chars().next().is_some_and(|c| c.is_lowercase());
    if continues_lower && TRAILING_HYPHEN.is_match(acc) {
        acc.pop();
    } else if !acc.ends_with(' ') {
        acc.push(' ');
    }
    acc.push_str(next);
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}
