//! Lower-casing keyword analyzer, the default doc values analyzer.
//!
//! The whole input stays one token and is case-folded, so the token sorts
//! the way the original value sorts case-insensitively.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::analyzer::{Analyzer, LowercaseKeywordAnalyzer};
//!
//! let analyzer = LowercaseKeywordAnalyzer::new();
//! let tokens: Vec<_> = analyzer.analyze("Wonder Woman").unwrap().collect();
//!
//! assert_eq!(tokens.len(), 1);
//! assert_eq!(tokens[0].text, "wonder woman");
//! ```

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::tokenizer::whole::WholeTokenizer;
use crate::error::Result;

/// Whole-input tokenizer followed by a lowercase filter.
pub struct LowercaseKeywordAnalyzer {
    inner: PipelineAnalyzer,
}

impl LowercaseKeywordAnalyzer {
    /// Create a new lower-casing keyword analyzer.
    pub fn new() -> Self {
        let analyzer = PipelineAnalyzer::new(Arc::new(WholeTokenizer::new()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .with_name("lowercase_keyword");

        LowercaseKeywordAnalyzer { inner: analyzer }
    }
}

impl Default for LowercaseKeywordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for LowercaseKeywordAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "lowercase_keyword"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for LowercaseKeywordAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LowercaseKeywordAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
