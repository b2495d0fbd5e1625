//! Tokenizer-only analyzer.

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// Runs a tokenizer and nothing else. Backs the built-in `whitespace`
/// analyzer.
#[derive(Clone)]
pub struct SimpleAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl SimpleAnalyzer {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        SimpleAnalyzer { tokenizer }
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}

impl Analyzer for SimpleAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.tokenizer.tokenize(text)
    }

    fn name(&self) -> &'static str {
        "simple"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for SimpleAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SimpleAnalyzer")
            .field(&self.tokenizer.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    #[test]
    fn test_case_is_preserved() {
        let analyzer = SimpleAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));

        let tokens: Vec<Token> = analyzer.analyze("Moon  Knight").unwrap().collect();

        let texts: Vec<&str> = tokens.iter().map(|token| token.text.as_str()).collect();
        assert_eq!(texts, vec!["Moon", "Knight"]);
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_debug_names_the_tokenizer() {
        let analyzer = SimpleAnalyzer::new(Arc::new(WhitespaceTokenizer::new()));
        assert_eq!(format!("{analyzer:?}"), "SimpleAnalyzer(\"whitespace\")");
    }
}
