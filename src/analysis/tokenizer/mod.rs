//! Tokenizer implementations for text analysis.
//!
//! Tokenizers are the first step of an analyzer: they split the input text
//! into tokens that filters then transform.
//!
//! # Available Tokenizers
//!
//! - [`whole::WholeTokenizer`] - Treats the entire input as a single token (`keyword`)
//! - [`whitespace::WhitespaceTokenizer`] - Splits on whitespace
//! - [`regex::RegexTokenizer`] - Extracts regex matches, or the gaps between them
//! - [`unicode_word::UnicodeWordTokenizer`] - Uses Unicode word boundaries
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::tokenizer::Tokenizer;
//! use dvstring::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so analyzers can be shared between
/// indexing threads.
///
/// # Examples
///
/// Implementing a custom tokenizer:
///
/// ```
/// use dvstring::analysis::token::{Token, TokenStream};
/// use dvstring::analysis::tokenizer::Tokenizer;
/// use dvstring::error::Result;
///
/// struct CommaTokenizer;
///
/// impl Tokenizer for CommaTokenizer {
///     fn tokenize(&self, text: &str) -> Result<TokenStream> {
///         let tokens: Vec<Token> = text
///             .split(',')
///             .enumerate()
///             .map(|(i, s)| Token::new(s.trim(), i))
///             .collect();
///         Ok(Box::new(tokens.into_iter()))
///     }
///
///     fn name(&self) -> &'static str {
///         "comma"
///     }
/// }
/// ```
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;
pub mod whitespace;
pub mod whole;
