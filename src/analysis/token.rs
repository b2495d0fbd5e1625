//! Tokens flowing through the analysis chain.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::token::Token;
//!
//! let token = Token::with_offsets("woman", 1, 7, 12);
//! assert_eq!(token.text, "woman");
//! assert_eq!(token.end_offset - token.start_offset, 5);
//! assert!(!token.is_stopped());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// One unit of analyzed text.
///
/// Offsets are byte offsets into the analyzed value. `position` counts tokens
/// from 0 within one value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,

    pub position: usize,

    pub start_offset: usize,

    pub end_offset: usize,

    /// Scoring weight, 1.0 unless a filter changes it.
    pub boost: f32,

    /// Set by a stop filter that keeps stop words in the stream. Consumers
    /// that want one token skip stopped ones.
    pub stopped: bool,

    /// Distance to the previous token; 1 for adjacent tokens.
    pub position_increment: usize,
}

impl Token {
    pub fn new<S: Into<String>>(text: S, position: usize) -> Self {
        Self::with_offsets(text, position, 0, 0)
    }

    pub fn with_offsets<S: Into<String>>(
        text: S,
        position: usize,
        start_offset: usize,
        end_offset: usize,
    ) -> Self {
        Token {
            text: text.into(),
            position,
            start_offset,
            end_offset,
            boost: 1.0,
            stopped: false,
            position_increment: 1,
        }
    }

    /// Mark the token as a stop word.
    pub fn stop(mut self) -> Self {
        self.stopped = true;
        self
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// A copy carrying `text`; offsets still point at the original value.
    pub fn with_text<S: Into<String>>(&self, text: S) -> Self {
        Token {
            text: text.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Tokens produced by a tokenizer or analyzer, pulled lazily.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let token = Token::new("storm", 0);

        assert_eq!(token.boost, 1.0);
        assert_eq!(token.position_increment, 1);
        assert_eq!((token.start_offset, token.end_offset), (0, 0));
        assert!(!token.stopped);
    }

    #[test]
    fn test_with_text_keeps_offsets_and_stop_flag() {
        let token = Token::with_offsets("The", 0, 0, 3).stop();
        let lowered = token.with_text("the");

        assert_eq!(lowered.text, "the");
        assert_eq!(lowered.end_offset, 3);
        assert!(lowered.is_stopped());
    }

    #[test]
    fn test_display_and_serde() {
        let token = Token::with_offsets("rogue", 2, 10, 15);
        assert_eq!(token.to_string(), "rogue");

        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["position"], 2);
        let back: Token = serde_json::from_value(json).unwrap();
        assert_eq!(back, token);
    }
}
