//! Case folding.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::token_filter::Filter;
//! use dvstring::analysis::token_filter::lowercase::LowercaseFilter;
//! use dvstring::analysis::token::Token;
//!
//! let filter = LowercaseFilter::new();
//! let tokens = vec![Token::new("Wonder Woman", 0)];
//! let filtered: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(filtered[0].text, "wonder woman");
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::util::simd;

/// Lower-cases token text. Stopped tokens pass through unchanged.
#[derive(Clone, Debug, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|token| {
            if token.is_stopped() {
                token
            } else {
                let lowered = simd::ascii::to_lowercase(&token.text);
                token.with_text(lowered)
            }
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn lowered(tokens: Vec<Token>) -> Vec<Token> {
        LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect()
    }

    #[test]
    fn test_ascii_and_unicode() {
        let result = lowered(vec![
            Token::with_offsets("WOLVERINE", 0, 0, 9),
            Token::with_offsets("ŁÓDŹ", 1, 10, 18),
            Token::new("THE INCREDIBLE HULK SMASHES", 2),
        ]);

        assert_eq!(result[0].text, "wolverine");
        assert_eq!(result[0].end_offset, 9);
        assert_eq!(result[1].text, "łódź");
        assert_eq!(result[2].text, "the incredible hulk smashes");
    }

    #[test]
    fn test_stopped_tokens_untouched() {
        let result = lowered(vec![Token::new("The", 0).stop()]);

        assert_eq!(result[0].text, "The");
        assert!(result[0].is_stopped());
    }
}
