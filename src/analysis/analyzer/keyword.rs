//! Verbatim analyzer for `not_analyzed` fields.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::analyzer::{Analyzer, KeywordAnalyzer};
//!
//! let analyzer = KeywordAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Spider-Man 2099").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "Spider-Man 2099");
//! ```

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::Result;

/// Emits the value as one token, case and punctuation untouched.
#[derive(Clone, Debug, Default)]
pub struct KeywordAnalyzer {
    tokenizer: WholeTokenizer,
}

impl KeywordAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Analyzer for KeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_value_is_kept_verbatim() {
        let analyzer = KeywordAnalyzer::new();

        let tokens: Vec<Token> = analyzer.analyze("The Incredible Hulk").unwrap().collect();

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "The Incredible Hulk");
        assert_eq!(analyzer.name(), "keyword");
    }

    #[test]
    fn test_offsets_are_byte_based() {
        let tokens: Vec<Token> = KeywordAnalyzer::new().analyze("Łódź").unwrap().collect();

        assert_eq!(tokens[0].start_offset, 0);
        assert_eq!(tokens[0].end_offset, 7);
    }
}
