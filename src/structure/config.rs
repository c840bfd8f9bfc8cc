//! Thresholds for line classification and paragraph assembly.

/// Font-size change (points) that starts a new node.
pub const FONT_DELTA: f32 = 2.0;

/// Maximum words in a name line.
pub const NAME_MAX_WORDS: usize = 3;

/// Font size a name line must exceed when it is not bold.
pub const NAME_MIN_FONT_SIZE: f32 = 14.0;

/// Maximum words in a digit-bearing contact line.
pub const CONTACT_MAX_WORDS: usize = 8;

/// Maximum words in a job title line.
pub const JOB_TITLE_MAX_WORDS: usize = 6;

/// Maximum words in a "Label:" line that counts as a new section.
pub const COLON_HEADER_MAX_WORDS: usize = 5;

/// A sentence end only breaks an accumulation longer than this many lines.
pub const SENTENCE_BREAK_MIN_LINES: usize = 2;

/// Maximum characters of a merged contact or paragraph node.
pub const MERGE_MAX_CHARS: usize = 500;

/// Longest text still accepted as a section header.
pub const HEADING_MAX_CHARS: usize = 100;

/// Nodes shorter than this are dropped.
pub const MIN_NODE_CHARS: usize = 3;

/// Tunable thresholds used by the classifier, break decider and merge pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureConfig {
    /// Font-size change that starts a new node
    pub font_delta: f32,

    /// Maximum words in a name line
    pub name_max_words: usize,

    /// Font size a non-bold name line must exceed
    pub name_min_font_size: f32,

    /// Maximum words in a digit-bearing contact line
    pub contact_max_words: usize,

    /// Maximum words in a job title
    pub job_title_max_words: usize,

    /// Maximum words in a colon-terminated section label
    pub colon_header_max_words: usize,

    /// Accumulated lines required before a sentence end breaks
    pub sentence_break_min_lines: usize,

    /// Maximum merged node length in characters
    pub merge_max_chars: usize,

    /// Longest section header in characters
    pub heading_max_chars: usize,

    /// Shortest node kept, in characters
    pub min_node_chars: usize,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            font_delta: FONT_DELTA,
            name_max_words: NAME_MAX_WORDS,
            name_min_font_size: NAME_MIN_FONT_SIZE,
            contact_max_words: CONTACT_MAX_WORDS,
            job_title_max_words: JOB_TITLE_MAX_WORDS,
            colon_header_max_words: COLON_HEADER_MAX_WORDS,
            sentence_break_min_lines: SENTENCE_BREAK_MIN_LINES,
            merge_max_chars: MERGE_MAX_CHARS,
            heading_max_chars: HEADING_MAX_CHARS,
            min_node_chars: MIN_NODE_CHARS,
        }
    }
}

impl StructureConfig {
    /// Create a config with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font-size delta.
    pub fn with_font_delta(mut self, delta: f32) -> Self {
        self.font_delta = delta;
        self
    }

    /// Set the merge length cap.
    pub fn with_merge_max_chars(mut self, chars: usize) -> Self {
        self.merge_max_chars = chars;
        self
    }

    /// Set the minimum node length.
    pub fn with_min_node_chars(mut self, chars: usize) -> Self {
        self.min_node_chars = chars;
        self
    }

    /// Set the job title word limit.
    pub fn with_job_title_max_words(mut self, words: usize) -> Self {
        self.job_title_max_words = words;
        self
    }

    /// Set the contact word limit.
    pub fn with_contact_max_words(mut self, words: usize) -> Self {
        self.contact_max_words = words;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = StructureConfig::default();
        assert_eq!(config.font_delta, FONT_DELTA);
        assert_eq!(config.merge_max_chars, 500);
        assert_eq!(config.min_node_chars, 3);
    }

    #[test]
    fn test_builder() {
        let config = StructureConfig::new()
            .with_merge_max_chars(80)
            .with_job_title_max_words(4);
        assert_eq!(config.merge_max_chars, 80);
        assert_eq!(config.job_title_max_words, 4);
        assert_eq!(config.name_max_words, NAME_MAX_WORDS);
    }
}
