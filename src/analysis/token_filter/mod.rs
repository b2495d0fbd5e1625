//! Token filter implementations for token transformation.
//!
//! Filters receive the token stream of a tokenizer (or of the previous
//! filter) and return a new stream.
//!
//! # Available Filters
//!
//! - [`lowercase::LowercaseFilter`] - Converts tokens to lowercase
//! - [`stop::StopFilter`] - Removes stop words
//! - [`limit::LimitFilter`] - Limits the number of tokens
//!
//! Filters are applied lazily, so a consumer that stops after the first
//! token never pulls the rest of the stream through the chain.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::token_filter::Filter;
//! use dvstring::analysis::token_filter::lowercase::LowercaseFilter;
//! use dvstring::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Hello", 0), Token::new("WORLD", 1)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "hello");
//! assert_eq!(filtered[1].text, "world");
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for filters that transform token streams.
///
/// The trait requires `Send + Sync` to allow use in concurrent contexts.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod limit;
pub mod lowercase;
pub mod stop;
