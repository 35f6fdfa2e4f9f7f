//! Markdown report writer.

use crate::report::layout::{LineStyle, ReportLine};
use std::path::Path;

/// Characters that carry inline meaning wherever they appear.
const INLINE_META: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '|', '~'];

/// Backslash-escape inline Markdown syntax in `text`.
fn escape_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if INLINE_META.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Escape a marker at the start of `text` that would open a heading, a list
/// item or an ordered list item.
fn escape_block_start(text: String) -> String {
    let body = text.trim_start();
    let lead = text.len() - body.len();
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    let at = match body.as_bytes().get(digits) {
        Some(b'#' | b'-' | b'+') if digits == 0 => lead,
        Some(b'.' | b')') if digits > 0 => lead + digits,
        _ => return text,
    };
    let mut out = text;
    out.insert(at, '\\');
    out
}

/// Render report lines as Markdown text.
///
/// Title → `#`, headings → `##`, indented lines → nested list items,
/// bold spans → `**…**`. Record text is escaped so it renders literally.
pub fn render_markdown(lines: &[ReportLine]) -> String {
    let mut out = String::new();

    for line in lines {
        let text: String = line
            .spans
            .iter()
            .map(|s| {
                if s.bold && !s.text.trim().is_empty() {
                    let trailing = if s.text.ends_with(' ') { " " } else { "" };
                    format!("**{}**{}", escape_inline(s.text.trim_end()), trailing)
                } else {
                    escape_inline(&s.text)
                }
            })
            .collect();
        let text = escape_block_start(text);

        match line.style {
            LineStyle::Title => {
                out.push_str(&format!("# {}\n\n", text));
            }
            LineStyle::Heading => {
                if !out.ends_with("\n\n") {
                    out.push('\n');
                }
                out.push_str(&format!("## {}\n\n", escape_block_start(escape_inline(&line.text()))));
            }
            LineStyle::Body if line.indent == 0 => {
                out.push_str(&format!("{}\n", text));
            }
            LineStyle::Body => {
                let nesting = "  ".repeat(usize::from(line.indent - 1));
                out.push_str(&format!("{nesting}- {text}\n"));
            }
        }
    }

    out
}

/// Write the Markdown rendering of `lines` to `path`.
pub fn write_markdown(lines: &[ReportLine], path: &Path) -> Result<(), String> {
    std::fs::write(path, render_markdown(lines)).map_err(|e| e.to_string())
}
