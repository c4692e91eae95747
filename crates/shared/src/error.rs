use thiserror::Error;

/// Failures that end a single pipeline run.
///
/// An empty article set is not represented here: it produces a sentinel
/// `SummaryResult` instead. Export-time encoding problems never surface as
/// errors either, they are substituted in place.
#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Please enter a query first")]
    EmptyQuery,

    #[error("Failed to fetch news articles: {message}")]
    FetchFailure { message: String },

    #[error("Failed to generate summary: {message}")]
    GenerationFailure { message: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DigestError {
    pub fn fetch(message: impl Into<String>) -> Self {
        DigestError::FetchFailure {
            message: message.into(),
        }
    }

    pub fn generation(message: impl Into<String>) -> Self {
        DigestError::GenerationFailure {
            message: message.into(),
        }
    }

    /// Whether the failure is a user input problem rather than a service error.
    pub fn is_warning(&self) -> bool {
        matches!(self, DigestError::EmptyQuery)
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
