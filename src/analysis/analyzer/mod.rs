//! Analyzer implementations that combine tokenizers and filters.

mod analyzer;
mod keyword;
mod lowercase_keyword;
mod named;
mod noop;
mod pipeline;
mod simple;
mod standard;

pub use analyzer::Analyzer;
pub use keyword::KeywordAnalyzer;
pub use lowercase_keyword::LowercaseKeywordAnalyzer;
pub use named::NamedAnalyzer;
pub use noop::NoOpAnalyzer;
pub use pipeline::PipelineAnalyzer;
pub use simple::SimpleAnalyzer;
pub use standard::StandardAnalyzer;
