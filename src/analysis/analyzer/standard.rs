//! Standard analyzer that provides good defaults for most use cases.
//!
//! # Pipeline
//!
//! 1. RegexTokenizer (`\w+`)
//! 2. LowercaseFilter
//! 3. StopFilter (English stop words, optional)

use std::sync::Arc;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::analyzer::pipeline::PipelineAnalyzer;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::stop::StopFilter;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::Result;

/// Word tokenization and lower-casing, optionally followed by English stop
/// words.
pub struct StandardAnalyzer {
    inner: PipelineAnalyzer,
}

impl StandardAnalyzer {
    /// With English stop words removed.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// Every word kept. The registry serves this one as `standard`.
    pub fn without_stop_words() -> Self {
        Self::build(false)
    }

    fn build(stop_words: bool) -> Self {
        let mut pipeline = PipelineAnalyzer::new(Arc::new(RegexTokenizer::words()))
            .add_filter(Arc::new(LowercaseFilter::new()));
        if stop_words {
            pipeline = pipeline.add_filter(Arc::new(StopFilter::new()));
        }

        StandardAnalyzer {
            inner: pipeline.with_name(if stop_words { "standard" } else { "standard_no_stop" }),
        }
    }
}

impl Analyzer for StandardAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.inner.analyze(text)
    }

    fn name(&self) -> &'static str {
        "standard"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl std::fmt::Debug for StandardAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StandardAnalyzer")
            .field("inner", &self.inner)
            .finish()
    }
}
