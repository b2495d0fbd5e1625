//! Stop word removal.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::token_filter::Filter;
//! use dvstring::analysis::token_filter::stop::StopFilter;
//! use dvstring::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![Token::new("the", 0), Token::new("thing", 1)];
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 1);
//! assert_eq!(result[0].text, "thing");
//! ```

use std::sync::Arc;

use ahash::AHashSet;
use lazy_static::lazy_static;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// English stop words, as shipped with Lucene's `StopAnalyzer`.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

lazy_static! {
    static ref DEFAULT_ENGLISH_STOP_WORDS_SET: Arc<AHashSet<String>> = Arc::new(
        DEFAULT_ENGLISH_STOP_WORDS
            .iter()
            .map(|word| word.to_string())
            .collect()
    );
}

/// A filter that removes stop words, or marks them as stopped.
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
    // Drop stop words, or only mark them.
    remove_stopped: bool,
}

impl StopFilter {
    /// Create a new stop filter with the default English stop words.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_ENGLISH_STOP_WORDS_SET),
            remove_stopped: true,
        }
    }

    /// Create a new stop filter from a list of stop words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
            remove_stopped: true,
        }
    }

    /// Keep stopped tokens in the stream, marked with [`Token::stop`](crate::analysis::token::Token::stop).
    pub fn remove_stopped(mut self, remove: bool) -> Self {
        self.remove_stopped = remove;
        self
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        let remove_stopped = self.remove_stopped;

        Ok(Box::new(tokens.filter_map(move |token| {
            if token.is_stopped() || !stop_words.contains(&token.text) {
                Some(token)
            } else if remove_stopped {
                None
            } else {
                Some(token.stop())
            }
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<Token> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, word)| Token::new(*word, i))
            .collect();
        filter.filter(Box::new(tokens.into_iter())).unwrap().collect()
    }

    #[test]
    fn test_stop_words_removed() {
        let filter = StopFilter::from_words(vec!["the", "of"]);
        let result = run(&filter, &["the", "guardians", "of", "the", "galaxy"]);

        let texts: Vec<&str> = result.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(texts, vec!["guardians", "galaxy"]);
        assert_eq!(result[1].position, 4);
    }

    #[test]
    fn test_stop_words_marked() {
        let filter = StopFilter::from_words(vec!["the"]).remove_stopped(false);
        let result = run(&filter, &["the", "punisher"]);

        assert_eq!(result.len(), 2);
        assert!(result[0].is_stopped());
        assert!(!result[1].is_stopped());
    }

    #[test]
    fn test_default_stop_words() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), 33);
        assert!(filter.is_stop_word("the"));
        assert!(!filter.is_stop_word("woman"));
    }
}
