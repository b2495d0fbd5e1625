//! Single-token tokenizer.

use super::Tokenizer;

use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// Emits the whole input as one token at position 0.
///
/// Registered as both `keyword` and `whole`. Empty input emits nothing, so a
/// doc values analyzer built on it derives no value for `""`.
#[derive(Clone, Copy, Debug, Default)]
pub struct WholeTokenizer;

impl WholeTokenizer {
    pub fn new() -> Self {
        WholeTokenizer
    }
}

impl Tokenizer for WholeTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let token = (!text.is_empty()).then(|| Token::with_offsets(text, 0, 0, text.len()));
        Ok(Box::new(token.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whole"
    }
}
