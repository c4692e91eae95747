// Public modules
pub mod aggregator;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod models;
pub mod newsapi;
pub mod parser;
pub mod pipeline;
pub mod prompt;
pub mod session;
pub mod summarizer;

// Re-export commonly used types
pub use aggregator::{aggregate, Corpus};
pub use auth::{AllowAll, Authenticator, Credentials, StaticCredentials};
pub use config::{Config, PipelineSettings};
pub use error::DigestError;
pub use export::{Document, Exporter};
pub use history::HistoryLog;
pub use models::{Article, HistoryEntry, SummaryKind, SummaryResult};
pub use newsapi::{ArticleSource, NewsApiClient};
pub use parser::ResponseParser;
pub use pipeline::DigestPipeline;
pub use prompt::PromptTemplate;
pub use session::SessionContext;
pub use summarizer::{GroqGenerator, TextGenerator};
