/// Instructions sent to the model. `{query}` and `{summaries}` are filled
/// in by [`PromptTemplate::render`]; `{delimiter}` is fixed when the template
/// is constructed.
const DIGEST_TEMPLATE: &str = r#"You are an intelligent and unbiased news summarizer.

Summarize the recent news in the articles below as it relates to the user query.

RULES:
1. The first bullet states the actual incident: what happened, when and where, as precisely as the articles allow.
2. Every bullet presents a distinct, concrete fact from the articles: new developments, official statements, investigations, eyewitness details and responses.
3. Cover who was involved, how it unfolded, the impact, the authorities' response, public reaction and any follow-up, where the articles mention them.
4. Use a neutral, factual newswire tone. No storytelling, opinions, conclusions or emotional language.
5. Never invent or assume anything. If it is not in the articles, do not include it.
6. Write 4 to 8 bullets. Start every bullet with "{delimiter}" and use no other bullet character.
7. Do not add an introduction, heading, label or closing remark outside the bullets.

User Query:
{query}

News Article Content:
{summaries}

Return only the bullet-point summary:
"#;

/// A fixed instructional document with `query` and `summaries` slots
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(delimiter: char) -> Self {
        Self::from_template(DIGEST_TEMPLATE, delimiter)
    }

    /// Build from a custom template body. Both `{query}` and `{summaries}`
    /// should appear exactly once.
    pub fn from_template(template: &str, delimiter: char) -> Self {
        Self {
            template: template.replace("{delimiter}", &delimiter.to_string()),
        }
    }

    /// Substitute the query and corpus. No truncation happens here.
    pub fn render(&self, query: &str, summaries: &str) -> String {
        // Split around the query slot first so a corpus that happens to
        // contain "{query}" is never substituted.
        match self.template.split_once("{query}") {
            Some((before, after)) => format!(
                "{}{}{}",
                before.replace("{summaries}", summaries),
                query,
                after.replace("{summaries}", summaries)
            ),
            None => self.template.replace("{summaries}", summaries),
        }
    }
}
