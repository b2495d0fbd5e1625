//! Token count limit.

use super::Filter;

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Passes at most `max_token_count` live tokens.
///
/// Stopped tokens are passed through without counting, so a limit of one
/// after a stop filter that only marks tokens still yields the first real
/// word.
#[derive(Clone, Debug)]
pub struct LimitFilter {
    max_token_count: usize,
}

impl LimitFilter {
    pub fn new(max_token_count: usize) -> Self {
        LimitFilter { max_token_count }
    }

    pub fn limit(&self) -> usize {
        self.max_token_count
    }
}

impl Filter for LimitFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let max = self.max_token_count;
        let mut live = 0;

        Ok(Box::new(tokens.take_while(move |token| {
            if token.is_stopped() {
                return live < max;
            }
            live += 1;
            live <= max
        })))
    }

    fn name(&self) -> &'static str {
        "limit"
    }
}
