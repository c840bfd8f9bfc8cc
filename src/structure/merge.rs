//! Paragraph merge pass.
//!
//! Lines are classified one at a time. Consecutive contact or paragraph
//! lines accumulate into one node until the break decider fires, the kind
//! changes, or the merged text would exceed the length cap. Every other
//! kind yields one node per line.

use super::breaks::break_reason;
use super::classify::{classify_line, heading_level};
use super::config::StructureConfig;
use super::normalize::{join_line, normalize_text};
use crate::model::{ContentNode, Line, NodeFormat, NodeKind, Table};

/// Lines waiting to become one node.
#[derive(Debug)]
struct Pending {
    kind: NodeKind,
    text: String,
    lines: Vec<Line>,
}

/// Builds the node sequence of a single page.
#[derive(Debug)]
pub struct PageAssembler<'a> {
    config: &'a StructureConfig,
    nodes: Vec<ContentNode>,
    pending: Option<Pending>,
    dropped: usize,
}

impl<'a> PageAssembler<'a> {
    /// Create an assembler for one page.
    pub fn new(config: &'a StructureConfig) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            pending: None,
            dropped: 0,
        }
    }

    /// Feed the next line in reading order.
    pub fn push(&mut self, line: &Line) {
        if line.is_blank() {
            self.flush();
            return;
        }

        let kind = classify_line(line, self.config);

        if let Some(pending) = self.pending.as_mut() {
            if pending.kind == kind && kind.is_mergeable() {
                let reason = break_reason(line, &pending.lines, self.config);
                let mut joined = pending.text.clone();
                join_line(&mut joined, &line.text);

                if reason.is_none() && joined.chars().count() <= self.config.merge_max_chars {
                    pending.text = joined;
                    pending.lines.push(line.clone());
                    return;
                }
                log::trace!("break before {:?}: {:?}", line.trimmed(), reason);
            }
        }

        self.flush();
        let mut text = String::new();
        join_line(&mut text, &line.text);
        self.pending = Some(Pending {
            kind,
            text,
            lines: vec![line.clone()],
        });
    }

    /// Append a table after the text seen so far.
    pub fn push_table(&mut self, table: Table) {
        self.flush();
        if !table.is_empty() {
            self.nodes.push(ContentNode::table(table));
        }
    }

    /// Finish the page and return its nodes.
    pub fn finish(mut self) -> Vec<ContentNode> {
        self.flush();
        if self.dropped > 0 {
            log::debug!("Dropped {} nodes below minimum length", self.dropped);
        }
        self.nodes
    }

    fn flush(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };

        let text = normalize_text(&pending.text);
        if text.chars().count() < self.config.min_node_chars {
            self.dropped += 1;
            return;
        }

        let sizes: Vec<f32> = pending.lines.iter().filter_map(|l| l.font_size).collect();
        let format = NodeFormat {
            bold: pending.lines.iter().any(|l| l.bold),
            italic: pending.lines.iter().any(|l| l.italic),
            font_size: if sizes.is_empty() {
                None
            } else {
                Some(sizes.iter().sum::<f32>() / sizes.len() as f32)
            },
            merged_lines: pending.lines.len(),
        };

        let level = (pending.kind == NodeKind::SectionHeader).then(|| heading_level(&text));
        let mut node = ContentNode::new(pending.kind, text).with_format(format);
        if let Some(level) = level {
            node = node.with_heading_level(level);
        }
        self.nodes.push(node);
    }
}

/// Assemble the nodes of one page from its lines.
pub fn assemble(lines: &[Line], config: &StructureConfig) -> Vec<ContentNode> {
    let mut assembler = PageAssembler::new(config);
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}
