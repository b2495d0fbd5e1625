//! Analyzer without output.

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Never emits a token.
///
/// As a doc values analyzer it turns derivation off for a field that stays
/// searchable.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAnalyzer;

impl NoOpAnalyzer {
    pub fn new() -> Self {
        NoOpAnalyzer
    }
}

impl Analyzer for NoOpAnalyzer {
    fn analyze(&self, _text: &str) -> Result<TokenStream> {
        Ok(Box::new(std::iter::empty()))
    }

    fn name(&self) -> &'static str {
        "noop"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_tokens_for_any_input() {
        let analyzer = NoOpAnalyzer::new();
        for value in ["Vision", "", "Scarlet Witch"] {
            assert_eq!(analyzer.analyze(value).unwrap().count(), 0);
        }
    }
}
