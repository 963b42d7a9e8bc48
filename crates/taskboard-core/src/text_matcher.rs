use regex::{Regex, RegexBuilder};

use crate::task::Task;

/// Case-insensitive substring matcher for task text.
#[derive(Debug, Clone)]
pub struct TextMatcher {
    needle: String,
    pattern: Option<Regex>,
}

impl TextMatcher {
    /// Build a matcher for `query`. Returns `None` for the empty query, which
    /// matches every task.
    ///
    /// The query is taken literally; surrounding whitespace is significant.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        let pattern = RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .ok();
        Some(Self {
            needle: query.to_lowercase(),
            pattern,
        })
    }

    /// Determine whether the title, or the description when present, contains
    /// the query.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.matches_field(&task.title)
            || task
                .description
                .as_deref()
                .is_some_and(|description| self.matches_field(description))
    }

    // Same folding rule as `segments`, so every match has a highlight.
    fn matches_field(&self, value: &str) -> bool {
        self.pattern.as_ref().map_or_else(
            || value.to_lowercase().contains(&self.needle),
            |pattern| pattern.is_match(value),
        )
    }

    /// Split `text` into plain and matched segments.
    #[must_use]
    pub fn segments<'a>(&self, text: &'a str) -> Vec<Segment<'a>> {
        let Some(pattern) = &self.pattern else {
            return vec![Segment::plain(text)];
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for found in pattern.find_iter(text) {
            if found.start() > cursor {
                segments.push(Segment::plain(&text[cursor..found.start()]));
            }
            segments.push(Segment::matched(found.as_str()));
            cursor = found.end();
        }
        if cursor < text.len() || segments.is_empty() {
            segments.push(Segment::plain(&text[cursor..]));
        }
        segments
    }
}

/// A slice of display text, either emphasized as a search hit or plain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Borrowed text of the segment.
    pub text: &'a str,
    /// True when the segment matched the search query.
    pub matched: bool,
}

impl<'a> Segment<'a> {
    const fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }

    const fn matched(text: &'a str) -> Self {
        Self {
            text,
            matched: true,
        }
    }
}

/// Segment `text` around every case-insensitive occurrence of `query`.
///
/// An empty query passes the text through as one plain segment.
#[must_use]
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    TextMatcher::new(query).map_or_else(|| vec![Segment::plain(text)], |m| m.segments(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::TaskId;
    use crate::task::NewTask;
    use time::OffsetDateTime;

    fn task(title: &str, description: Option<&str>) -> Task {
        let mut input = NewTask::new(title);
        if let Some(body) = description {
            input = input.with_description(body);
        }
        Task::create(input, TaskId::generate(), OffsetDateTime::UNIX_EPOCH)
    }

    fn matcher(query: &str) -> TextMatcher {
        TextMatcher::new(query)
            .unwrap_or_else(|| panic!("matcher must exist for queries with content"))
    }

    #[test]
    fn matcher_skips_empty_queries() {
        assert!(TextMatcher::new("").is_none());
        assert!(TextMatcher::new(" ").is_some());
    }

    #[test]
    fn matcher_respects_case_insensitive_search() {
        let milk = task("Buy milk", None);
        assert!(matcher("milk").matches(&milk));
        assert!(matcher("MILK").matches(&milk));
        assert!(matcher("Buy M").matches(&milk));
        assert!(!matcher("dog").matches(&milk));
    }

    #[test]
    fn matcher_checks_description_when_present() {
        let with_body = task("Chores", Some("Walk the DOG"));
        let without_body = task("Chores", None);
        assert!(matcher("dog").matches(&with_body));
        assert!(!matcher("dog").matches(&without_body));
    }

    #[test]
    fn matching_and_highlighting_share_case_folding() {
        let trip = task("İstanbul trip", None);
        let dotted = matcher("i\u{307}");
        let highlighted = dotted.segments(&trip.title).iter().any(|segment| segment.matched);
        assert_eq!(dotted.matches(&trip), highlighted);

        assert!(matcher("STANBUL").matches(&trip));
        assert_eq!(
            highlight(&trip.title, "STANBUL"),
            vec![
                Segment::plain("İ"),
                Segment::matched("stanbul"),
                Segment::plain(" trip"),
            ]
        );
    }

    #[test]
    fn highlight_passes_through_on_empty_query() {
        assert_eq!(highlight("Buy milk", ""), vec![Segment::plain("Buy milk")]);
    }

    #[test]
    fn highlight_marks_every_occurrence_preserving_case() {
        let segments = highlight("Milk and more milk", "milk");
        assert_eq!(
            segments,
            vec![
                Segment::matched("Milk"),
                Segment::plain(" and more "),
                Segment::matched("milk"),
            ]
        );
    }

    #[test]
    fn highlight_treats_query_literally() {
        let segments = highlight("cost (est.) 5$", "(est.)");
        assert_eq!(
            segments,
            vec![
                Segment::plain("cost "),
                Segment::matched("(est.)"),
                Segment::plain(" 5$"),
            ]
        );
        assert_eq!(highlight("abc", ".*"), vec![Segment::plain("abc")]);
    }

    #[test]
    fn highlight_without_hits_is_single_plain_segment() {
        assert_eq!(highlight("Walk dog", "milk"), vec![Segment::plain("Walk dog")]);
        assert_eq!(highlight("", "milk"), vec![Segment::plain("")]);
    }

    #[test]
    fn segments_rejoin_to_original_text() {
        let text = "Report: QUARTERLY report draft";
        let joined: String = highlight(text, "report")
            .iter()
            .map(|segment| segment.text)
            .collect();
        assert_eq!(joined, text);
    }
}
