use crate::error::{Result, SearchError};
use crate::tokenizer::{is_valid_word, split_into_words, StopWords};
use std::collections::BTreeSet;

/// A parsed query. Plus and minus words are disjoint; a word given both ways
/// is kept only as a minus word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query<'a> {
    pub plus_words: BTreeSet<&'a str>,
    pub minus_words: BTreeSet<&'a str>,
}

struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

fn parse_query_word<'a>(text: &'a str, stop_words: &StopWords) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(SearchError::invalid(format!("query word {text:?} is invalid")));
    }
    Ok(QueryWord { data, is_minus, is_stop: stop_words.contains(data) })
}

impl<'a> Query<'a> {
    pub fn parse(text: &'a str, stop_words: &StopWords) -> Result<Self> {
        let mut query = Query::default();
        for token in split_into_words(text) {
            let word = parse_query_word(token, stop_words)?;
            if word.is_stop {
                continue;
            }
            if word.is_minus {
                query.minus_words.insert(word.data);
            } else {
                query.plus_words.insert(word.data);
            }
        }
        let Query { plus_words, minus_words } = &mut query;
        plus_words.retain(|w| !minus_words.contains(w));
        tracing::trace!(plus = plus_words.len(), minus = minus_words.len(), "query parsed");
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Query<'_>> {
        Query::parse(text, &StopWords::from_text("in the").unwrap())
    }

    #[test]
    fn separates_plus_and_minus_words() {
        let q = parse("fluffy -dog cat cat").unwrap();
        assert_eq!(q.plus_words.into_iter().collect::<Vec<_>>(), vec!["cat", "fluffy"]);
        assert_eq!(q.minus_words.into_iter().collect::<Vec<_>>(), vec!["dog"]);
    }

    #[test]
    fn drops_stop_words_on_both_sides() {
        let q = parse("in -the city").unwrap();
        assert!(q.minus_words.is_empty());
        assert_eq!(q.plus_words.len(), 1);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(parse("cat -").is_err());
        assert!(parse("cat --dog").is_err());
        assert!(parse("ca\x11t").is_err());
        assert!(parse("-ca\x11t").is_err());
    }

    #[test]
    fn repeated_spaces_do_not_make_empty_words() {
        let q = parse("  cat   -dog  ").unwrap();
        assert_eq!(q.plus_words.into_iter().collect::<Vec<_>>(), vec!["cat"]);
        assert_eq!(q.minus_words.into_iter().collect::<Vec<_>>(), vec!["dog"]);
        assert_eq!(parse("   ").unwrap(), Query::default());
    }

    #[test]
    fn minus_wins_over_plus() {
        let q = parse("cat -cat dog").unwrap();
        assert!(!q.plus_words.contains("cat"));
        assert!(q.minus_words.contains("cat"));
        assert!(q.plus_words.contains("dog"));
    }

    #[test]
    fn inner_dash_is_allowed() {
        let q = parse("well-known -x-ray").unwrap();
        assert!(q.plus_words.contains("well-known"));
        assert!(q.minus_words.contains("x-ray"));
    }
}
