//! Text analysis for dvstring fields.
//!
//! Analysis turns a raw field value into tokens:
//!
//! ```text
//! Raw Text → Tokenizer → Token Stream → Filters → Tokens
//! ```
//!
//! The index analyzer of a field produces the terms used for full-text
//! search; the doc values analyzer produces the single sortable token.
//!
//! # Modules
//!
//! - [`analyzer`]: Analyzer trait and built-in analyzers
//! - [`tokenizer`]: Tokenization strategies
//! - [`token_filter`]: Token transformation and removal
//! - [`token`]: Token representation
//! - [`token_stream`]: Scoped reset/increment/end/close access to a stream
//! - [`registry`]: Analyzer lookup by name, built from analysis settings

pub mod analyzer;
pub mod registry;
pub mod token;
pub mod token_filter;
pub mod token_stream;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, NamedAnalyzer};
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
