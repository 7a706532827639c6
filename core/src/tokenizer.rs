use crate::error::{Result, SearchError};
use std::collections::HashSet;

/// Split text on the space character, dropping empty pieces.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|w| !w.is_empty())
}

/// A word is valid when it holds no control characters (anything below U+0020).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

/// Words excluded from both indexing and querying. Fixed at construction.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = HashSet::new();
        for word in words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(SearchError::invalid(format!("stop word {word:?} is invalid")));
            }
            set.insert(word.to_string());
        }
        Ok(Self { words: set })
    }

    /// Parse a space-separated list of stop words.
    pub fn from_text(text: &str) -> Result<Self> {
        Self::new(split_into_words(text))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Tokenize document content: split, validate every token, drop stop words.
///
/// Validation covers the whole text before anything is returned, so a caller
/// never indexes a partially accepted document.
pub fn tokenize<'a>(text: &'a str, stop_words: &StopWords) -> Result<Vec<&'a str>> {
    let mut words = Vec::new();
    for word in split_into_words(text) {
        if !is_valid_word(word) {
            return Err(SearchError::invalid(format!("word {word:?} is invalid")));
        }
        if !stop_words.contains(word) {
            words.push(word);
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_spaces_only() {
        let words: Vec<_> = split_into_words("  cat  in the\tcity ").collect();
        assert_eq!(words, vec!["cat", "in", "the\tcity"]);
    }

    #[test]
    fn rejects_control_characters() {
        let stop = StopWords::default();
        assert!(tokenize("cat in the\tcity", &stop).is_err());
        assert!(tokenize("big do\x12g", &stop).is_err());
        assert!(StopWords::new(["a\x01"]).is_err());
    }

    #[test]
    fn empty_stop_words_are_dropped() {
        let stop = StopWords::new(["", "in", "", "the"]).unwrap();
        assert_eq!(stop.len(), 2);
        assert!(stop.contains("in"));
        assert!(!stop.contains(""));
    }
}
