use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::config::PipelineSettings;
use crate::models::{Article, SummaryResult};

/// Blank lines above the first line of every page
pub const TOP_MARGIN_LINES: usize = 2;
/// Columns of indentation before every line
pub const LEFT_MARGIN_COLUMNS: usize = 4;

const PAGE_BREAK: u8 = 0x0c;

/// A summary laid out as fixed-width, paginated lines
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub pages: Vec<Vec<String>>,
    /// Characters replaced because the target encoding lacks them
    pub substitutions: usize,
}

impl Document {
    /// Latin-1 bytes: margins applied, pages separated by form feeds.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        let indent = " ".repeat(LEFT_MARGIN_COLUMNS);

        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                bytes.push(PAGE_BREAK);
            }
            bytes.extend(std::iter::repeat(b'\n').take(TOP_MARGIN_LINES));
            for line in page {
                if !line.is_empty() {
                    bytes.extend_from_slice(indent.as_bytes());
                }
                // Every char is <= U+00FF after encoding fallback
                bytes.extend(line.chars().map(|c| u8::try_from(c).unwrap_or(b'?')));
                bytes.push(b'\n');
            }
        }

        bytes
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

pub struct Exporter {
    delimiter: char,
    citation_cap: usize,
    wrap_width: usize,
    lines_per_page: usize,
}

impl Exporter {
    pub fn new(settings: &PipelineSettings) -> Self {
        Self {
            delimiter: settings.delimiter,
            citation_cap: settings.citation_cap,
            wrap_width: settings.wrap_width.max(1),
            lines_per_page: settings.lines_per_page.max(1),
        }
    }

    /// Bullets one per line, followed by a sources block when there are any.
    pub fn to_plain_text(&self, result: &SummaryResult) -> String {
        let mut text = result.formatted(self.delimiter);

        let sources: Vec<&Article> = result.sources.iter().take(self.citation_cap).collect();
        if sources.is_empty() {
            return text;
        }

        text.push_str("\n\nSources:\n");
        for (index, article) in sources.iter().enumerate() {
            text.push_str(&format!("{}. {}\n", index + 1, article.title));
            text.push_str(&format!(
                "   {} | {}\n",
                article.source_name,
                Self::format_date(article.published_at)
            ));
            text.push_str(&format!("   {}\n", article.url));
        }

        text.trim_end().to_string()
    }

    fn format_date(date: Option<DateTime<chrono::Utc>>) -> String {
        date.map(|d| d.format("%-d %b %Y %H:%M UTC").to_string())
            .unwrap_or_else(|| "date unknown".to_string())
    }

    /// Wrap every logical line of `text` to the configured width.
    pub fn to_document_lines(&self, text: &str) -> Vec<String> {
        wrap_lines(text, self.wrap_width)
    }

    /// Full document layout: encoding fallback, wrapping, pagination.
    pub fn to_document(&self, text: &str) -> Document {
        let (encodable, substitutions) = to_latin1(text);
        if substitutions > 0 {
            warn!(substitutions, "Replaced characters unsupported by the document encoding");
        }

        let lines = self.to_document_lines(&encodable);
        let pages = lines
            .chunks(self.lines_per_page)
            .map(|chunk| chunk.to_vec())
            .collect();

        Document {
            pages,
            substitutions,
        }
    }

    pub fn save_plain_text(content: &str, dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
        let filename = format!("summary-{}.txt", at.format("%Y-%m-%d-%H%M%S"));
        let filepath = dir.join(filename);

        fs::write(&filepath, content).context("Failed to write plain-text summary")?;

        Ok(filepath)
    }

    pub fn save_document(document: &Document, dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
        let filename = format!("summary-{}.doc.txt", at.format("%Y-%m-%d-%H%M%S"));
        let filepath = dir.join(filename);

        fs::write(&filepath, document.to_bytes()).context("Failed to write summary document")?;

        Ok(filepath)
    }
}

/// Break each line at the last space within `width` columns, or hard-break
/// when a single word is longer than the width.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut wrapped = Vec::new();

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            wrapped.push(String::new());
            continue;
        }

        let mut rest: Vec<char> = line.chars().collect();
        while rest.len() > width {
            let (head, tail_start) = if rest[width] == ' ' {
                (width, width + 1)
            } else {
                match rest[..width].iter().rposition(|&c| c == ' ') {
                    Some(space) if space > 0 => (space, space + 1),
                    _ => (width, width),
                }
            };

            let piece: String = rest[..head].iter().collect();
            wrapped.push(piece.trim_end().to_string());

            let skip = rest[tail_start..]
                .iter()
                .take_while(|&&c| c == ' ')
                .count();
            rest.drain(..tail_start + skip);
        }

        if !rest.is_empty() {
            wrapped.push(rest.into_iter().collect());
        }
    }

    wrapped
}

/// Map `text` into Latin-1, substituting what cannot be represented.
///
/// Returns the converted text and the number of characters replaced.
pub fn to_latin1(text: &str) -> (String, usize) {
    let mut out = String::with_capacity(text.len());
    let mut substitutions = 0;

    for c in text.chars() {
        if u32::from(c) <= 0xFF {
            out.push(c);
            continue;
        }
        substitutions += 1;
        match c {
            '•' | '‣' | '◦' | '–' | '—' | '‐' | '‑' | '−' => out.push('-'),
            '‘' | '’' | '‚' | '′' => out.push('\''),
            '“' | '”' | '„' | '″' => out.push('"'),
            '…' => out.push_str("..."),
            '€' => out.push_str("EUR"),
            '™' => out.push_str("(TM)"),
            _ => out.push('?'),
        }
    }

    (out, substitutions)
}
