use tracing::{error, info, warn};

use crate::aggregator::{aggregate, truncate_chars};
use crate::config::{Config, PipelineSettings};
use crate::error::{DigestError, Result};
use crate::models::SummaryResult;
use crate::newsapi::{ArticleSource, NewsApiClient};
use crate::parser::ResponseParser;
use crate::prompt::PromptTemplate;
use crate::session::SessionContext;
use crate::summarizer::{GroqGenerator, TextGenerator};

/// Query-to-summary pipeline. Every stage runs to completion before the next.
pub struct DigestPipeline<S, G> {
    source: S,
    generator: G,
    prompt: PromptTemplate,
    parser: ResponseParser,
    settings: PipelineSettings,
}

impl DigestPipeline<NewsApiClient, GroqGenerator> {
    /// Wire the pipeline to NewsAPI and Groq.
    pub fn from_config(config: &Config, settings: PipelineSettings) -> Result<Self> {
        let source = NewsApiClient::new(
            config.news_api_key.clone(),
            config.news_api_base_url.clone(),
            settings.page_size,
        )?;
        let generator = GroqGenerator::new(
            config.groq_api_key.clone(),
            config.groq_base_url.clone(),
            config.model.clone(),
        )?;
        Ok(Self::new(source, generator, settings))
    }
}

impl<S: ArticleSource, G: TextGenerator> DigestPipeline<S, G> {
    pub fn new(source: S, generator: G, settings: PipelineSettings) -> Self {
        Self {
            source,
            generator,
            prompt: PromptTemplate::new(settings.delimiter),
            parser: ResponseParser::new(settings.delimiter, settings.intro_prefix.clone()),
            settings,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Answer `query` with a bullet summary and record it in the session history.
    ///
    /// History is only written once the summary is complete; a failed run or a
    /// sentinel result leaves it untouched.
    pub async fn run(&self, session: &mut SessionContext, query: &str) -> Result<SummaryResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(DigestError::EmptyQuery);
        }
        session.current_query = query.to_string();
        let query = truncate_chars(query, self.settings.max_query_chars);

        let articles = self.source.fetch(query).await.map_err(|e| {
            error!(error = %e, "Article fetch failed");
            e
        })?;
        info!(count = articles.len(), "Fetched articles");

        let corpus = aggregate(&articles);
        if corpus.is_empty() {
            warn!(query, fetched = articles.len(), "No usable article content");
            return Ok(SummaryResult::no_usable_content());
        }

        let summaries = truncate_chars(&corpus.text, self.settings.max_corpus_chars);
        let prompt = self.prompt.render(query, summaries);

        let raw = self.generator.generate(&prompt).await.map_err(|e| {
            error!(error = %e, "Summary generation failed");
            e
        })?;

        let bullets = self.parser.parse(&raw);
        if bullets.is_empty() {
            error!("Model response contained no summary text");
            return Err(DigestError::generation("model response contained no summary text"));
        }
        info!(bullets = bullets.len(), "Parsed summary");

        let sources = corpus
            .usable
            .into_iter()
            .take(self.settings.citation_cap)
            .collect();
        let result = SummaryResult::generated(bullets, sources);

        session
            .history
            .append(query, result.formatted(self.settings.delimiter));

        Ok(result)
    }
}
