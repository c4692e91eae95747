use html2text::render::text_renderer::TrivialDecorator;
use tracing::debug;

use crate::models::Article;

/// Text gathered from the usable articles of one fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub text: String,
    pub usable: Vec<Article>,
}

impl Corpus {
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Join the usable text of each article with a single space, in input order.
pub fn aggregate(articles: &[Article]) -> Corpus {
    let mut pieces = Vec::new();
    let mut usable = Vec::new();

    for article in articles {
        let Some(text) = article.usable_text() else {
            continue;
        };
        pieces.push(text);
        usable.push(article.clone());
    }

    debug!(
        fetched = articles.len(),
        usable = usable.len(),
        "Aggregated article text"
    );

    Corpus {
        text: pieces.join(" "),
        usable,
    }
}

/// Strip markup from a text field. Plain text is only trimmed.
///
/// Links keep their anchor text only; no footnote markers or URLs are emitted.
pub(crate) fn clean_text(text: &str) -> String {
    if !looks_like_markup(text) {
        return text.trim().to_string();
    }
    match html2text::config::with_decorator(TrivialDecorator::new())
        .string_from_read(text.as_bytes(), 10_000)
    {
        Ok(rendered) => rendered.split_whitespace().collect::<Vec<_>>().join(" "),
        Err(e) => {
            debug!(error = %e, "Markup conversion failed, keeping raw text");
            text.trim().to_string()
        }
    }
}

fn looks_like_markup(text: &str) -> bool {
    match (text.find('<'), text.rfind('>')) {
        (Some(open), Some(close)) => open < close,
        _ => false,
    }
}

/// Cut `text` to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, description: Option<&str>, content: Option<&str>) -> Article {
        Article {
            title: title.to_string(),
            description: description.map(String::from),
            content: content.map(String::from),
            source_name: "Wire".to_string(),
            published_at: None,
            url: format!("https://example.com/{}", title),
        }
    }

    // ==================== Aggregation Tests ====================

    #[test]
    fn test_aggregate_keeps_only_usable_articles() {
        let articles = vec![
            article("a", Some("First."), None),
            article("b", None, None),
            article("c", Some("  "), Some("Third.")),
            article("d", Some(""), Some("\t")),
        ];

        let corpus = aggregate(&articles);

        assert_eq!(corpus.text, "First. Third.");
        let titles: Vec<_> = corpus.usable.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert!(corpus.usable.iter().all(|a| a.is_usable()));
    }

    #[test]
    fn test_aggregate_prefers_description() {
        let articles = vec![article("a", Some("Description"), Some("Content"))];
        assert_eq!(aggregate(&articles).text, "Description");
    }

    #[test]
    fn test_aggregate_no_usable_articles() {
        let articles = vec![article("a", None, None), article("b", Some(" "), None)];
        let corpus = aggregate(&articles);
        assert!(corpus.is_empty());
        assert!(corpus.usable.is_empty());
    }

    #[test]
    fn test_aggregate_empty_input() {
        assert_eq!(aggregate(&[]), Corpus::default());
    }

    #[test]
    fn test_aggregate_strips_markup() {
        let articles = vec![article(
            "a",
            None,
            Some("<p>Markets rallied\n   today.</p>"),
        )];
        assert_eq!(aggregate(&articles).text, "Markets rallied today.");
    }

    #[test]
    fn test_empty_markup_description_uses_content() {
        let articles = vec![article("a", Some("<p></p>"), Some("Real content here."))];
        let corpus = aggregate(&articles);

        assert_eq!(corpus.text, "Real content here.");
        assert_eq!(corpus.usable.len(), 1);
    }

    #[test]
    fn test_links_keep_anchor_text_only() {
        let articles = vec![article(
            "a",
            Some(r#"<p>Read <a href="https://x.com/a">more</a> now</p>"#),
            None,
        )];
        let text = aggregate(&articles).text;

        assert_eq!(text, "Read more now");
        assert!(!text.contains("[1]"));
        assert!(!text.contains("https://"));
    }

    #[test]
    fn test_plain_text_with_comparison_is_untouched() {
        let articles = vec![article("a", Some("Growth was > 3% and < 5%."), None)];
        assert_eq!(aggregate(&articles).text, "Growth was > 3% and < 5%.");
    }

    // ==================== Truncation Tests ====================

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 50), "short");
        assert_eq!(truncate_chars("", 3), "");
    }
}
