use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator::clean_text;

/// Shown in place of bullets when no fetched article carried usable text.
pub const NO_CONTENT_MESSAGE: &str = "No content found to summarize. Try another topic.";

/// A news article as returned by the search service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub source_name: String,
    pub published_at: Option<DateTime<Utc>>,
    pub url: String,
}

impl Article {
    /// First text field that is non-blank once markup is removed, preferring
    /// the description.
    pub fn usable_text(&self) -> Option<String> {
        [self.description.as_deref(), self.content.as_deref()]
            .into_iter()
            .flatten()
            .map(clean_text)
            .find(|text| !text.is_empty())
    }

    pub fn is_usable(&self) -> bool {
        self.usable_text().is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SummaryKind {
    Generated,
    NoUsableContent,
}

/// Outcome of one successful pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResult {
    pub kind: SummaryKind,
    pub bullets: Vec<String>,
    pub sources: Vec<Article>,
}

impl SummaryResult {
    pub fn generated(bullets: Vec<String>, sources: Vec<Article>) -> Self {
        Self {
            kind: SummaryKind::Generated,
            bullets,
            sources,
        }
    }

    pub fn no_usable_content() -> Self {
        Self {
            kind: SummaryKind::NoUsableContent,
            bullets: vec![NO_CONTENT_MESSAGE.to_string()],
            sources: Vec::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.kind == SummaryKind::NoUsableContent
    }

    /// Bullets prefixed with the delimiter, ready for display.
    ///
    /// The sentinel message is returned bare since it is not a summary point.
    pub fn bullet_lines(&self, delimiter: char) -> Vec<String> {
        if self.is_sentinel() {
            return self.bullets.clone();
        }
        self.bullets
            .iter()
            .map(|bullet| format!("{} {}", delimiter, bullet))
            .collect()
    }

    pub fn formatted(&self, delimiter: char) -> String {
        self.bullet_lines(delimiter).join("\n")
    }
}

/// One retained (query, summary) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub formatted_summary: String,
    pub sequence_number: u64,
}

impl HistoryEntry {
    /// The first `limit` characters of the summary, with `...` when cut short.
    pub fn preview(&self, limit: usize) -> String {
        match self.formatted_summary.char_indices().nth(limit) {
            Some((end, _)) => format!("{}...", &self.formatted_summary[..end]),
            None => self.formatted_summary.clone(),
        }
    }
}
