use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{DigestError, Result};
use crate::models::Article;

/// Anything that can turn a topic query into candidate articles
#[async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<Article>>;
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<NewsApiArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsApiArticle {
    #[serde(default)]
    source: NewsApiSource,
    #[serde(default)]
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NewsApiSource {
    #[serde(default)]
    name: Option<String>,
}

impl From<NewsApiArticle> for Article {
    fn from(raw: NewsApiArticle) -> Self {
        let published_at = raw
            .published_at
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Article {
            title: raw.title.unwrap_or_default(),
            description: raw.description,
            content: raw.content,
            source_name: raw.source.name.unwrap_or_default(),
            published_at,
            url: raw.url.unwrap_or_default(),
        }
    }
}

/// Client for the NewsAPI `everything` endpoint
pub struct NewsApiClient {
    client: Client,
    api_key: String,
    base_url: String,
    page_size: u32,
}

impl NewsApiClient {
    pub fn new(api_key: String, base_url: impl Into<String>, page_size: u32) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("news-digest/0.1")
            .build()
            .map_err(|e| DigestError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            page_size,
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/v2/everything?q={}&language=en&sortBy=publishedAt&pageSize={}",
            self.base_url,
            urlencoding::encode(query),
            self.page_size
        )
    }
}

#[async_trait]
impl ArticleSource for NewsApiClient {
    async fn fetch(&self, query: &str) -> Result<Vec<Article>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        info!(query, page_size = self.page_size, "Searching news");

        let response = self
            .client
            .get(self.search_url(query))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| DigestError::fetch(format!("request to News API failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            return Err(DigestError::fetch(format!(
                "News API returned error: {} - {}",
                status, error_text
            )));
        }

        let news_response = response
            .json::<NewsApiResponse>()
            .await
            .map_err(|e| DigestError::fetch(format!("failed to parse News API response: {}", e)))?;

        let articles: Vec<Article> = news_response
            .articles
            .into_iter()
            .map(Article::from)
            .collect();

        debug!(count = articles.len(), "News API returned articles");

        Ok(articles)
    }
}
