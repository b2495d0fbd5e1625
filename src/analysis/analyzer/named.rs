//! Named analyzers, as referenced from mappings.

use std::fmt;
use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::token::TokenStream;
use crate::error::Result;

/// An analyzer registered under a name, plus the position gap inserted
/// between consecutive values of a multi-valued field.
///
/// Cloning is cheap; the analyzer itself is shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use dvstring::analysis::analyzer::{KeywordAnalyzer, NamedAnalyzer};
///
/// let keyword = NamedAnalyzer::new("keyword", Arc::new(KeywordAnalyzer::new()));
/// let gapped = keyword.with_position_offset_gap(100);
///
/// assert_eq!(gapped.name(), "keyword");
/// assert_eq!(gapped.position_increment_gap(), 100);
/// assert_eq!(keyword.position_increment_gap(), 0);
/// ```
#[derive(Clone)]
pub struct NamedAnalyzer {
    name: String,
    analyzer: Arc<dyn Analyzer>,
    position_offset_gap: Option<u32>,
}

impl NamedAnalyzer {
    /// Register `analyzer` under `name`.
    pub fn new<S: Into<String>>(name: S, analyzer: Arc<dyn Analyzer>) -> Self {
        NamedAnalyzer {
            name: name.into(),
            analyzer,
            position_offset_gap: None,
        }
    }

    /// Re-wrap this analyzer with a position offset gap, keeping its name.
    pub fn with_position_offset_gap(&self, gap: u32) -> Self {
        NamedAnalyzer {
            name: self.name.clone(),
            analyzer: Arc::clone(&self.analyzer),
            position_offset_gap: Some(gap),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The wrapped analyzer.
    pub fn analyzer(&self) -> &Arc<dyn Analyzer> {
        &self.analyzer
    }

    /// Positions skipped between two values of the same field.
    pub fn position_increment_gap(&self) -> u32 {
        self.position_offset_gap.unwrap_or(0)
    }

    /// Run the wrapped analyzer over `text`.
    pub fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.analyzer.analyze(text)
    }
}

impl fmt::Debug for NamedAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedAnalyzer")
            .field("name", &self.name)
            .field("analyzer", &self.analyzer.name())
            .field("position_offset_gap", &self.position_offset_gap)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::StandardAnalyzer;

    #[test]
    fn test_named_analyzer_delegates() {
        let analyzer = NamedAnalyzer::new(
            "standard",
            Arc::new(StandardAnalyzer::without_stop_words()),
        );

        let tokens: Vec<_> = analyzer.analyze("Bat Man").unwrap().collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "bat");
    }

    #[test]
    fn test_gap_rewrap_shares_analyzer() {
        let analyzer = NamedAnalyzer::new(
            "standard",
            Arc::new(StandardAnalyzer::without_stop_words()),
        );
        let gapped = analyzer.with_position_offset_gap(10);

        assert!(Arc::ptr_eq(analyzer.analyzer(), gapped.analyzer()));
        assert_eq!(gapped.position_increment_gap(), 10);
    }
}
