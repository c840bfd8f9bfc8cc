//! Standalone HTML rendering for structured documents.

use crate::error::Result;
use crate::model::{ContentNode, NodeKind, PageContent, StructuredDocument, Table};

use super::style::{outline_level, strip_bullet, style_for};
use super::RenderOptions;

const STYLESHEET: &str = r#"body {
  font-family: "Segoe UI", Arial, sans-serif;
  max-width: 800px;
  margin: 0 auto;
  padding: 40px 20px;
  line-height: 1.5;
  color: #1F2937;
}
.pdf-page { margin-bottom: 40px; }
.page-break { page-break-after: always; border: none; }
.page-header { color: #3B82F6; font-size: 13px; text-transform: uppercase; }
.resume-name { font-size: 24px; font-weight: bold; margin-bottom: 4px; }
.contact-info { font-size: 11px; color: #6B7280; margin: 2px 0; }
.section-header { font-size: 16px; font-weight: 600; border-bottom: 1px solid #D1D5DB; padding-bottom: 4px; margin-top: 24px; }
.job-title { font-size: 14px; font-weight: bold; margin: 12px 0 2px; }
.company-info { font-style: italic; font-size: 12px; color: #4B5563; margin: 0 0 6px; }
.resume-paragraph { font-size: 12px; }
.bullet-point { margin-left: 20px; list-style-type: disc; font-size: 12px; }
.numbered-item { margin-left: 20px; font-size: 12px; }
.pdf-table { border-collapse: collapse; width: 100%; margin: 12px 0; font-size: 11px; }
.pdf-table th, .pdf-table td { border: 1px solid #D1D5DB; padding: 4px 8px; text-align: left; }
.pdf-table th { background-color: #F3F4F6; }
"#;

/// Convert a document to a standalone HTML page.
pub fn to_html(doc: &StructuredDocument, options: &RenderOptions) -> Result<String> {
    let title = options
        .title
        .as_deref()
        .or_else(|| doc.title())
        .unwrap_or("Document");

    let mut output = String::new();
    output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n");
    output.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    output.push_str("<style>\n");
    output.push_str(STYLESHEET);
    output.push_str(&alignment_rules());
    output.push_str("</style>\n</head>\n<body>\n");

    let pages: Vec<&PageContent> = doc
        .pages
        .iter()
        .filter(|p| options.page_selection.includes(p.number))
        .collect();

    for (i, page) in pages.iter().enumerate() {
        if i > 0 && options.page_breaks {
            output.push_str("<hr class=\"page-break\">\n");
        }
        render_page(&mut output, page, options);
    }

    output.push_str("</body>\n</html>\n");
    Ok(output)
}

/// One `text-align` rule per node class, taken from the style table.
fn alignment_rules() -> String {
    NodeKind::ALL
        .iter()
        .filter(|kind| **kind != NodeKind::Table)
        .map(|kind| {
            let style = style_for(*kind);
            format!(
                ".{} {{ text-align: {}; }}\n",
                style.class,
                style.alignment.css()
            )
        })
        .collect()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ListRun {
    None,
    Bullets,
    Numbers,
}

fn render_page(output: &mut String, page: &PageContent, options: &RenderOptions) {
    output.push_str(&format!(
        "<section class=\"pdf-page\" data-page=\"{}\">\n",
        page.number
    ));
    if options.page_headings {
        output.push_str(&format!(
            "<h4 class=\"page-header\">Page {}</h4>\n",
            page.number
        ));
    }

    let mut run = ListRun::None;
    for node in &page.nodes {
        let wanted = match node.kind {
            NodeKind::ListItem => ListRun::Bullets,
            NodeKind::NumberedItem => ListRun::Numbers,
            _ => ListRun::None,
        };
        if wanted != run {
            close_list(output, run);
            match wanted {
                ListRun::Bullets => output.push_str("<ul>\n"),
                ListRun::Numbers => output.push_str("<ol>\n"),
                ListRun::None => {}
            }
            run = wanted;
        }
        render_node(output, node);
    }
    close_list(output, run);

    output.push_str("</section>\n");
}

fn close_list(output: &mut String, run: ListRun) {
    match run {
        ListRun::Bullets => output.push_str("</ul>\n"),
        ListRun::Numbers => output.push_str("</ol>\n"),
        ListRun::None => {}
    }
}

fn render_node(output: &mut String, node: &ContentNode) {
    let class = style_for(node.kind).class;
    match node.kind {
        NodeKind::Name | NodeKind::SectionHeader => {
            let level = outline_level(node).unwrap_or(2).min(6);
            output.push_str(&format!(
                "<h{level} class=\"{class}\">{}</h{level}>\n",
                escape_html(&node.text)
            ));
        }
        NodeKind::ListItem => {
            output.push_str(&format!(
                "<li class=\"{class}\">{}</li>\n",
                escape_html(strip_bullet(&node.text))
            ));
        }
        NodeKind::NumberedItem => {
            output.push_str(&format!(
                "<li class=\"{class}\">{}</li>\n",
                escape_html(strip_numbering(&node.text))
            ));
        }
        NodeKind::Table => {
            if let Some(ref table) = node.table {
                render_table(output, table);
            }
        }
        _ => {
            output.push_str(&format!(
                "<p class=\"{class}\">{}</p>\n",
                escape_html(&node.text)
            ));
        }
    }
}

fn render_table(output: &mut String, table: &Table) {
    let col_count = table.column_count();
    output.push_str("<table class=\"pdf-table\">\n");

    if let Some(header) = table.header() {
        output.push_str("<thead>\n<tr>");
        for col in 0..col_count {
            let cell = header.get(col).map(String::as_str).unwrap_or("");
            output.push_str(&format!("<th>{}</th>", escape_html(cell)));
        }
        output.push_str("</tr>\n</thead>\n");
    }

    output.push_str("<tbody>\n");
    for row in table.body() {
        output.push_str("<tr>");
        for col in 0..col_count {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            output.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        output.push_str("</tr>\n");
    }
    output.push_str("</tbody>\n</table>\n");
}

/// Drop a leading "1." / "2)" / "(3)" / "a." marker; `<ol>` numbers items itself.
fn strip_numbering(text: &str) -> &str {
    let trimmed = text.trim_start();
    let rest = if let Some(inner) = trimmed.strip_prefix('(') {
        let digits = inner.len() - inner.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        match inner[digits..].strip_prefix(')') {
            Some(after) if digits > 0 => after,
            _ => return trimmed,
        }
    } else {
        let digits =
            trimmed.len() - trimmed.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        let marker = if digits > 0 {
            digits
        } else if trimmed.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            1
        } else {
            return trimmed;
        };
        match trimmed[marker..].chars().next() {
            Some('.') | Some(')') => &trimmed[marker + 1..],
            _ => return trimmed,
        }
    };
    rest.trim_start()
}

/// Escape text for HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
