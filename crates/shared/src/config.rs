use anyhow::{Context, Result};
use std::env;
use url::Url;

pub const DEFAULT_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_INTRO_PREFIX: &str = "Here is a factual and unbiased summary of the situation:";

#[derive(Debug, Clone)]
pub struct Config {
    pub news_api_key: String,
    pub groq_api_key: String,
    pub model: String,
    pub news_api_base_url: String,
    pub groq_base_url: String,
    pub login: Option<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let news_api_key = env::var("NEWS_API_KEY").context(
            "NEWS_API_KEY not found.\n\n\
            To fix this, create ~/.config/news-digest/.env with:\n  \
            NEWS_API_KEY=your_key_here\n  \
            GROQ_API_KEY=your_key_here\n\n\
            Get your NewsAPI key from: https://newsapi.org/",
        )?;

        let groq_api_key = env::var("GROQ_API_KEY").context(
            "GROQ_API_KEY not found.\n\n\
            To fix this, create ~/.config/news-digest/.env with:\n  \
            NEWS_API_KEY=your_key_here\n  \
            GROQ_API_KEY=your_key_here\n\n\
            Get your Groq API key from: https://console.groq.com/keys",
        )?;

        let model = env::var("NEWS_DIGEST_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let news_api_base_url = Self::base_url("NEWS_API_BASE_URL", DEFAULT_NEWS_API_BASE_URL)?;
        let groq_base_url = Self::base_url("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL)?;

        let login = match (
            env::var("NEWS_DIGEST_USERNAME"),
            env::var("NEWS_DIGEST_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            news_api_key,
            groq_api_key,
            model,
            news_api_base_url,
            groq_base_url,
            login,
        })
    }

    fn base_url(var: &str, default: &str) -> Result<String> {
        let value = env::var(var).unwrap_or_else(|_| default.to_string());
        Url::parse(&value).with_context(|| format!("{} is not a valid URL: {}", var, value))?;
        Ok(value.trim_end_matches('/').to_string())
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/news-digest/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("news-digest").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

/// Knobs shared by every stage of the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Character the model prefixes each point with, and the parser splits on
    pub delimiter: char,
    /// Maximum number of source articles attached to a summary
    pub citation_cap: usize,
    pub history_cap: usize,
    pub max_query_chars: usize,
    pub max_corpus_chars: usize,
    pub page_size: u32,
    pub wrap_width: usize,
    pub lines_per_page: usize,
    /// Label sentence models sometimes emit before the first bullet
    pub intro_prefix: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            delimiter: '•',
            citation_cap: 3,
            history_cap: 5,
            max_query_chars: 500,
            max_corpus_chars: 10_000,
            page_size: 10,
            wrap_width: 90,
            lines_per_page: 27,
            intro_prefix: DEFAULT_INTRO_PREFIX.to_string(),
        }
    }
}
