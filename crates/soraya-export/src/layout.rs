//! Line layout for the PDF stage.
//!
//! Parses the rendered markdown-ish text into typed lines, wraps them
//! to the column width and breaks pages at a fixed content boundary.
//! Footers are attached after pagination, once the page count is known.

use crate::styles::DocumentStyles;

/// A4 in points.
pub const PAGE_WIDTH_PT: usize = 595;
pub const PAGE_HEIGHT_PT: usize = 842;

/// Vertical room reserved above the bottom margin so body text never
/// touches the footer block.
const FOOTER_CLEARANCE_PT: usize = 24;

const FOOTER_NOTE_MAX_CHARS: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading1,
    Heading2,
    Body,
    Bullet,
    Numbered,
    Highlight,
    Note,
    Spacer,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutLine {
    pub kind: LineKind,
    pub text: String,
    /// True for the second and later fragments of a wrapped source line.
    pub continuation: bool,
}

#[derive(Debug, Clone)]
pub struct PageFooter {
    /// Shortened disclaimer line; empty when the report carries none.
    pub disclaimer: String,
    pub page_label: String,
    pub version: String,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub lines: Vec<LayoutLine>,
    pub footer: PageFooter,
}

#[derive(Debug, Clone)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
}

/// Wrap and break the rendered text into pages.
///
/// `disclaimer` and `version` feed the per-page footer; the page label
/// is computed here because the total is only known after breaking.
pub fn paginate(
    rendered: &str,
    disclaimer: &str,
    version: &str,
    styles: &DocumentStyles,
) -> DocumentLayout {
    let lines = classify_and_wrap(rendered);
    let budget = PAGE_HEIGHT_PT.saturating_sub(margin_pt(styles) * 2 + FOOTER_CLEARANCE_PT);

    let mut pages: Vec<Vec<LayoutLine>> = Vec::new();
    let mut current: Vec<LayoutLine> = Vec::new();
    let mut used = 0usize;

    for line in lines {
        let height = leading(line.kind, styles);
        // A heading must not end a page; reserve room for one body line.
        let required = match line.kind {
            LineKind::Heading1 | LineKind::Heading2 => height + styles.body_size + 3,
            _ => height,
        };

        if used + required > budget && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            used = 0;
        }
        if line.kind == LineKind::Spacer && current.is_empty() {
            continue;
        }

        used += height;
        current.push(line);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    if pages.is_empty() {
        pages.push(Vec::new());
    }

    let excerpt = shorten(disclaimer, FOOTER_NOTE_MAX_CHARS);
    let version = if version.trim().is_empty() {
        "N/A".to_string()
    } else {
        version.trim().to_string()
    };

    let total = pages.len();
    let pages = pages
        .into_iter()
        .enumerate()
        .map(|(index, lines)| Page {
            lines,
            footer: PageFooter {
                disclaimer: excerpt.clone(),
                page_label: format!("Page {} of {}", index + 1, total),
                version: version.clone(),
            },
        })
        .collect();

    DocumentLayout { pages }
}

pub(crate) fn margin_pt(styles: &DocumentStyles) -> usize {
    (styles.margin_inches * 72.0) as usize
}

pub(crate) fn leading(kind: LineKind, styles: &DocumentStyles) -> usize {
    match kind {
        LineKind::Heading1 => styles.heading1_size + 8,
        LineKind::Heading2 => styles.heading2_size + 6,
        LineKind::Spacer => 8,
        _ => styles.body_size + 3,
    }
}

fn classify_and_wrap(rendered: &str) -> Vec<LayoutLine> {
    let mut out: Vec<LayoutLine> = Vec::new();

    for raw in rendered.lines() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            // Blank runs collapse into one spacer.
            if out.last().map(|line| line.kind) != Some(LineKind::Spacer) {
                out.push(LayoutLine {
                    kind: LineKind::Spacer,
                    text: String::new(),
                    continuation: false,
                });
            }
            continue;
        }

        let (kind, text) = classify(trimmed);
        for (index, piece) in wrap(text, max_chars(kind)).into_iter().enumerate() {
            out.push(LayoutLine {
                kind,
                text: piece,
                continuation: index > 0,
            });
        }
    }

    while out.last().map(|line| line.kind) == Some(LineKind::Spacer) {
        out.pop();
    }
    if out.first().map(|line| line.kind) == Some(LineKind::Spacer) {
        out.remove(0);
    }
    out
}

fn classify(trimmed: &str) -> (LineKind, &str) {
    if let Some(text) = trimmed.strip_prefix("## ") {
        (LineKind::Heading2, text)
    } else if let Some(text) = trimmed.strip_prefix("# ") {
        (LineKind::Heading1, text)
    } else if let Some(text) = trimmed.strip_prefix("- ") {
        (LineKind::Bullet, text)
    } else if let Some(text) = trimmed.strip_prefix("! ") {
        (LineKind::Highlight, text)
    } else if let Some(text) = trimmed.strip_prefix("> ") {
        (LineKind::Note, text)
    } else if is_numbered(trimmed) {
        (LineKind::Numbered, trimmed)
    } else {
        (LineKind::Body, trimmed)
    }
}

fn is_numbered(text: &str) -> bool {
    match text.split_once(". ") {
        Some((head, _)) => !head.is_empty() && head.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

/// Column widths in characters, tuned for A4 with one-inch margins and
/// the default sizes. Helvetica is proportional, so these are budgets,
/// not measurements.
fn max_chars(kind: LineKind) -> usize {
    match kind {
        LineKind::Heading1 => 40,
        LineKind::Heading2 => 56,
        LineKind::Note => 80,
        LineKind::Bullet | LineKind::Numbered | LineKind::Highlight => 82,
        LineKind::Body | LineKind::Spacer => 86,
    }
}

fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };

        if needed <= max_chars {
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
            continue;
        }

        if current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if word_len <= max_chars {
            current.push_str(word);
            current_len = word_len;
        } else {
            // A single token wider than the column splits hard.
            for c in word.chars() {
                if current_len == max_chars {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(c);
                current_len += 1;
            }
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

fn shorten(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push_str("...");
    out
}
