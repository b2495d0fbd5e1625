//! Regex-based tokenizer implementation.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;

use super::Tokenizer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{DvStringError, Result};

lazy_static! {
    static ref WORD_PATTERN: Arc<Regex> = Arc::new(Regex::new(r"\w+").expect("word pattern"));
    static ref LETTER_PATTERN: Arc<Regex> =
        Arc::new(Regex::new(r"\p{L}+").expect("letter pattern"));
}

/// A tokenizer that emits regex matches, or the text between matches when
/// built with [`RegexTokenizer::with_gaps`].
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    pattern: Arc<Regex>,
    gaps: bool,
}

impl RegexTokenizer {
    /// Create a tokenizer that extracts `\w+` runs.
    pub fn new() -> Result<Self> {
        Ok(Self::words())
    }

    /// A `\w+` tokenizer sharing one compiled pattern.
    pub fn words() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&WORD_PATTERN),
            gaps: false,
        }
    }

    /// A tokenizer emitting runs of letters, splitting on digits and punctuation.
    pub fn letters() -> Self {
        RegexTokenizer {
            pattern: Arc::clone(&LETTER_PATTERN),
            gaps: false,
        }
    }

    /// Create a tokenizer that extracts matches of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            gaps: false,
        })
    }

    /// Create a tokenizer that splits on `pattern`.
    pub fn with_gaps(pattern: &str) -> Result<Self> {
        Ok(RegexTokenizer {
            pattern: Arc::new(Self::compile(pattern)?),
            gaps: true,
        })
    }

    fn compile(pattern: &str) -> Result<Regex> {
        Regex::new(pattern)
            .map_err(|e| DvStringError::analysis(format!("Invalid regex pattern: {e}")))
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn gaps(&self) -> bool {
        self.gaps
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = if self.gaps {
            let mut tokens = Vec::new();
            let mut last_end = 0;

            for mat in self.pattern.find_iter(text) {
                if mat.start() > last_end {
                    tokens.push(Token::with_offsets(
                        &text[last_end..mat.start()],
                        tokens.len(),
                        last_end,
                        mat.start(),
                    ));
                }
                last_end = mat.end();
            }

            if last_end < text.len() {
                tokens.push(Token::with_offsets(
                    &text[last_end..],
                    tokens.len(),
                    last_end,
                    text.len(),
                ));
            }

            tokens
        } else {
            self.pattern
                .find_iter(text)
                .enumerate()
                .map(|(position, mat)| {
                    Token::with_offsets(mat.as_str(), position, mat.start(), mat.end())
                })
                .collect()
        };

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}
