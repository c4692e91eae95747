use tracing::debug;

/// Where the scanner is within the model output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Before the first delimiter. Text here is preamble, never a bullet.
    Leading,
    /// After at least one delimiter. Each segment is a candidate bullet.
    Bullets,
}

/// Splits raw model output into ordered bullet statements.
///
/// The contract:
/// - Segments are separated by the delimiter character only.
/// - Every segment is trimmed and empty segments are dropped.
/// - Whatever precedes the first delimiter is preamble and is discarded.
/// - Without any delimiter the whole trimmed text is a single bullet, after
///   removing a leading intro sentence if one is present.
/// - Order and duplicates are preserved.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    delimiter: char,
    intro_prefix: String,
}

impl ResponseParser {
    pub fn new(delimiter: char, intro_prefix: impl Into<String>) -> Self {
        Self {
            delimiter,
            intro_prefix: intro_prefix.into(),
        }
    }

    pub fn parse(&self, raw: &str) -> Vec<String> {
        let mut state = ParseState::Leading;
        let mut bullets = Vec::new();
        let mut segment = String::new();

        for c in raw.chars() {
            if c != self.delimiter {
                segment.push(c);
                continue;
            }
            match state {
                ParseState::Leading => {
                    self.discard_leading(&segment);
                    state = ParseState::Bullets;
                }
                ParseState::Bullets => Self::emit(&mut bullets, &segment),
            }
            segment.clear();
        }

        match state {
            ParseState::Bullets => Self::emit(&mut bullets, &segment),
            ParseState::Leading => {
                let text = self.strip_intro(segment.trim());
                Self::emit(&mut bullets, text);
            }
        }

        bullets
    }

    fn emit(bullets: &mut Vec<String>, segment: &str) {
        let trimmed = segment.trim();
        if !trimmed.is_empty() {
            bullets.push(trimmed.to_string());
        }
    }

    fn discard_leading(&self, segment: &str) {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            return;
        }
        if self.is_intro(trimmed) {
            debug!("Discarding intro sentence before first bullet");
        } else {
            debug!(preamble = trimmed, "Discarding preamble before first bullet");
        }
    }

    fn is_intro(&self, text: &str) -> bool {
        !self.intro_prefix.is_empty() && text.starts_with(self.intro_prefix.as_str())
    }

    fn strip_intro<'a>(&self, text: &'a str) -> &'a str {
        if self.is_intro(text) {
            text[self.intro_prefix.len()..].trim_start()
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_INTRO_PREFIX;

    fn parser() -> ResponseParser {
        ResponseParser::new('•', DEFAULT_INTRO_PREFIX)
    }

    // ==================== Clean Input Tests ====================

    #[test]
    fn test_parse_simple_bullets() {
        let raw = "• First point.\n• Second point.\n• Third point.";
        assert_eq!(
            parser().parse(raw),
            vec!["First point.", "Second point.", "Third point."]
        );
    }

    #[test]
    fn test_parse_single_bullet() {
        assert_eq!(
            parser().parse("• Event X happened in City Y on Jan 1."),
            vec!["Event X happened in City Y on Jan 1."]
        );
    }

    #[test]
    fn test_parse_preserves_order_and_duplicates() {
        let raw = "• B\n• A\n• B";
        assert_eq!(parser().parse(raw), vec!["B", "A", "B"]);
    }

    #[test]
    fn test_round_trip_clean_input() {
        let bullets = vec![
            "Markets fell 3% on Monday.".to_string(),
            "The central bank held rates.".to_string(),
            "Analysts expect volatility.".to_string(),
        ];
        let joined = bullets
            .iter()
            .map(|b| format!("• {}", b))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parser().parse(&joined), bullets);
    }

    // ==================== Dirty Input Tests ====================

    #[test]
    fn test_consecutive_delimiters_collapse() {
        let raw = "• One •• Two •  • Three •";
        assert_eq!(parser().parse(raw), vec!["One", "Two", "Three"]);
    }

    #[test]
    fn test_bullet_count_bounded_by_delimiter_count() {
        let inputs = [
            "• a • b • c",
            "intro • a • b",
            "•••",
            "• a •\n\n• ",
            "text without bullets",
            "",
        ];
        for raw in inputs {
            let k = raw.matches('•').count();
            let bullets = parser().parse(raw);
            if k > 0 {
                assert!(bullets.len() <= k, "{:?} gave {:?}", raw, bullets);
            }
            assert!(bullets.iter().all(|b| !b.is_empty() && b.trim() == b));
        }
    }

    // ==================== Preamble Tests ====================

    #[test]
    fn test_intro_sentence_is_discarded() {
        let raw = format!("{}\n\n• Point one\n• Point two", DEFAULT_INTRO_PREFIX);
        assert_eq!(parser().parse(&raw), vec!["Point one", "Point two"]);
    }

    #[test]
    fn test_other_preamble_is_not_a_bullet() {
        let raw = "Summary of today's news:\n• Point one";
        assert_eq!(parser().parse(raw), vec!["Point one"]);
    }

    #[test]
    fn test_intro_match_is_case_sensitive() {
        let raw = "here is a factual and unbiased summary of the situation: the text";
        assert_eq!(parser().parse(raw), vec![raw]);
    }

    // ==================== No Delimiter Tests ====================

    #[test]
    fn test_no_delimiter_yields_single_bullet() {
        assert_eq!(
            parser().parse("  Just one plain sentence.  \n"),
            vec!["Just one plain sentence."]
        );
    }

    #[test]
    fn test_no_delimiter_strips_intro() {
        let raw = format!("{} Only one fact.", DEFAULT_INTRO_PREFIX);
        assert_eq!(parser().parse(&raw), vec!["Only one fact."]);
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert!(parser().parse("").is_empty());
        assert!(parser().parse("   \n ").is_empty());
        assert!(parser().parse(DEFAULT_INTRO_PREFIX).is_empty());
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = ResponseParser::new('-', "");
        assert_eq!(parser.parse("- a\n- b"), vec!["a", "b"]);
    }
}
