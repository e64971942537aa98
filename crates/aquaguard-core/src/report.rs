//! Document presenter: structured results to a paginated Latin-1 report.
//!
//! The layout is plain fixed-width text: a title block, a notices block, a
//! summary table and a detailed breakdown, chunked into fixed-height pages
//! with a page-number footer. Every dynamic string passes through the
//! sanitizer before encoding, so rendering never fails for character
//! content; [`RenderError`] covers layout misconfiguration only.

use thiserror::Error;

use aquaguard_types::{ComplianceStatus, ParameterResult};

use crate::render::ReportContext;
use crate::sanitize::{encode_latin1, sanitize};

const MIN_LINES_PER_PAGE: usize = 8;
const MIN_PAGE_WIDTH: usize = 60;

const PARAMETER_COL: usize = 30;
const VALUE_COL: usize = 20;

/// Page geometry for the document renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Total lines per page, footer included.
    pub lines_per_page: usize,
    /// Maximum columns per line; longer lines wrap.
    pub page_width: usize,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lines_per_page: 60,
            page_width: 78,
        }
    }
}

/// Rendering failures unrelated to content. Distinct from input validation
/// errors so the transport layer can map them to a different status.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("page layout too small: {lines_per_page} line(s) per page (minimum {MIN_LINES_PER_PAGE})")]
    PageTooSmall { lines_per_page: usize },

    #[error("page width too narrow: {page_width} column(s) (minimum {MIN_PAGE_WIDTH})")]
    PageTooNarrow { page_width: usize },
}

/// Render the complete downloadable report as Latin-1 bytes.
pub fn render_document(
    results: &[ParameterResult],
    warnings: &[String],
    ctx: &ReportContext,
    options: DocumentOptions,
) -> Result<Vec<u8>, RenderError> {
    if options.lines_per_page < MIN_LINES_PER_PAGE {
        return Err(RenderError::PageTooSmall {
            lines_per_page: options.lines_per_page,
        });
    }
    if options.page_width < MIN_PAGE_WIDTH {
        return Err(RenderError::PageTooNarrow {
            page_width: options.page_width,
        });
    }

    let mut buf = LineBuffer::new(options.page_width);

    title_block(&mut buf, ctx);
    notices_block(&mut buf, warnings);
    summary_table(&mut buf, results, options.page_width);
    detail_section(&mut buf, results);
    footer_note(&mut buf);

    let text = paginate(buf.lines, options.lines_per_page, options.page_width);
    Ok(encode_latin1(&text))
}

/// Accumulates sanitized, width-wrapped lines.
struct LineBuffer {
    width: usize,
    lines: Vec<String>,
}

impl LineBuffer {
    fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, text: &str) {
        let sanitized = sanitize(text);
        if sanitized.chars().count() <= self.width {
            self.lines.push(sanitized);
        } else {
            self.lines.extend(wrap(&sanitized, self.width));
        }
    }

    fn center(&mut self, text: &str) {
        let sanitized = sanitize(text);
        let len = sanitized.chars().count();
        if len >= self.width {
            self.push(text);
            return;
        }
        let pad = (self.width - len) / 2;
        self.lines.push(format!("{}{}", " ".repeat(pad), sanitized));
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }
}

fn title_block(buf: &mut LineBuffer, ctx: &ReportContext) {
    buf.center("Comprehensive Water Quality Report");
    buf.center(&format!("Generated: {}", ctx.generated_at));
    buf.center(&format!("Standards database: {}", ctx.catalog_version));
    buf.blank();
}

fn notices_block(buf: &mut LineBuffer, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }
    buf.push("NOTICES:");
    for warning in warnings {
        buf.push(&format!("  - {warning}"));
    }
    buf.blank();
}

fn summary_table(buf: &mut LineBuffer, results: &[ParameterResult], width: usize) {
    buf.push("1. SUMMARY OF RESULTS");
    buf.push(&format!(
        "{}{}{}",
        pad(PARAMETER_COL, "Parameter"),
        pad(VALUE_COL, "Value"),
        "Overall Status"
    ));
    buf.push(&"-".repeat(width));

    for result in results {
        let overall = match result.overall_status() {
            ComplianceStatus::Fail => "FLAGGED -- see details below",
            _ => "PASSED ALL STANDARDS",
        };
        buf.push(&format!(
            "{}{}{}",
            pad(PARAMETER_COL, &sanitize(&result.parameter)),
            pad(VALUE_COL, &sanitize(&format!("{} {}", result.value, result.unit))),
            overall
        ));
    }

    buf.blank();
}

fn detail_section(buf: &mut LineBuffer, results: &[ParameterResult]) {
    buf.push("2. DETAILED ANALYSIS & SOLUTIONS");

    for result in results {
        buf.blank();
        buf.push(&format!(
            "  {}  (Result: {} {})",
            result.parameter, result.value, result.unit
        ));

        for entry in &result.standards {
            let mut status_line = format!(
                "    [{}]  {}  --  Limit: {}  (Standard dated: {})",
                entry.authority,
                entry.status.as_str(),
                entry.limit,
                entry.standard_date
            );
            if entry.status == ComplianceStatus::Fail {
                if let Some(violation) = &entry.violation {
                    status_line.push_str(&format!("  Violation: {violation}"));
                }
            }
            buf.push(&status_line);

            if entry.status == ComplianceStatus::Fail {
                buf.push(&format!(
                    "        Risk:     {}",
                    entry.consequence.as_deref().unwrap_or("")
                ));
                buf.push(&format!(
                    "        Solution: {}",
                    entry.solution.as_deref().unwrap_or("")
                ));
            }
        }
    }

    buf.blank();
}

fn footer_note(buf: &mut LineBuffer) {
    buf.center(
        "Report generated by the aquaguard compliance suite  |  \
         Always verify against the latest published standards.",
    );
}

/// Truncate-or-pad a field to a fixed column width.
fn pad(width: usize, text: &str) -> String {
    let mut out: String = text.chars().take(width.saturating_sub(2)).collect();
    while out.chars().count() < width {
        out.push(' ');
    }
    out
}

/// Word-wrap a line; words longer than the width are hard-split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current.is_empty() {
            if word_len <= width {
                current.push_str(word);
            } else {
                for chunk in split_chars(word, width) {
                    lines.push(chunk);
                }
                current = lines.pop().unwrap_or_default();
            }
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = String::new();
            if word_len <= width {
                current.push_str(word);
            } else {
                for chunk in split_chars(word, width) {
                    lines.push(chunk);
                }
                current = lines.pop().unwrap_or_default();
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_chars(word: &str, width: usize) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Chunk lines into fixed-height pages, each ending in a blank line and a
/// centered page-number footer.
fn paginate(lines: Vec<String>, lines_per_page: usize, width: usize) -> String {
    let body_per_page = lines_per_page - 2;
    let total_pages = lines.len().div_ceil(body_per_page).max(1);

    let mut out = String::new();
    for (page_index, chunk) in lines.chunks(body_per_page).enumerate() {
        for line in chunk {
            out.push_str(line);
            out.push('\n');
        }
        for _ in chunk.len()..body_per_page {
            out.push('\n');
        }
        out.push('\n');

        let footer = format!("Page {} of {}", page_index + 1, total_pages);
        let pad = (width.saturating_sub(footer.chars().count())) / 2;
        out.push_str(&" ".repeat(pad));
        out.push_str(&footer);
        out.push('\n');
    }
    out
}
