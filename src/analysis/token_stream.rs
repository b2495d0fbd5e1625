//! Scoped access to an analyzer's token stream.
//!
//! A token stream has a strict lifecycle:
//!
//! ```text
//! open → reset → increment_token* → end → close
//! ```
//!
//! [`ScopedTokenStream`] enforces that order and releases the underlying
//! stream when it goes out of scope, so the stream is closed exactly once on
//! every path: after the last token, after an early exit, and when an error
//! propagates through `?`.
//!
//! # Examples
//!
//! ```
//! use dvstring::analysis::registry::AnalyzerRegistry;
//! use dvstring::analysis::token_stream::ScopedTokenStream;
//!
//! let registry = AnalyzerRegistry::new();
//! let analyzer = registry.analyzer("standard").unwrap();
//!
//! let mut stream = ScopedTokenStream::open(&analyzer, "Bruce Wayne");
//! stream.reset().unwrap();
//! let first = stream.increment_token().unwrap().unwrap();
//! stream.end().unwrap();
//! stream.close();
//!
//! assert_eq!(first.text, "bruce");
//! ```

use log::trace;

use crate::analysis::analyzer::NamedAnalyzer;
use crate::analysis::token::{Token, TokenStream};
use crate::error::{DvStringError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    Opened,
    Reset,
    Ended,
    Closed,
}

/// A token stream guard bound to one analyzer and one input value.
pub struct ScopedTokenStream<'a> {
    analyzer: &'a NamedAnalyzer,
    text: &'a str,
    tokens: Option<TokenStream>,
    state: StreamState,
    consumed: usize,
}

impl<'a> ScopedTokenStream<'a> {
    /// Bind `analyzer` to `text`. Analysis starts on [`reset`](Self::reset).
    pub fn open(analyzer: &'a NamedAnalyzer, text: &'a str) -> Self {
        trace!("opening token stream of analyzer [{}]", analyzer.name());
        ScopedTokenStream {
            analyzer,
            text,
            tokens: None,
            state: StreamState::Opened,
            consumed: 0,
        }
    }

    /// Prepare the stream for consumption by running the analyzer.
    pub fn reset(&mut self) -> Result<()> {
        if self.state != StreamState::Opened {
            return Err(DvStringError::token_stream(format!(
                "reset called on a {:?} stream of analyzer [{}]",
                self.state,
                self.analyzer.name()
            )));
        }
        self.tokens = Some(self.analyzer.analyze(self.text)?);
        self.state = StreamState::Reset;
        Ok(())
    }

    /// Pull the next token, skipping tokens a filter marked as stopped.
    ///
    /// Returns `Ok(None)` once the stream is exhausted.
    pub fn increment_token(&mut self) -> Result<Option<Token>> {
        if self.state != StreamState::Reset {
            return Err(DvStringError::token_stream(format!(
                "increment_token called on a {:?} stream of analyzer [{}]",
                self.state,
                self.analyzer.name()
            )));
        }
        let Some(tokens) = self.tokens.as_mut() else {
            return Ok(None);
        };
        let next = tokens.find(|token| !token.is_stopped());
        if next.is_some() {
            self.consumed += 1;
        }
        Ok(next)
    }

    /// Signal end of consumption. Remaining tokens are not pulled.
    pub fn end(&mut self) -> Result<()> {
        if self.state != StreamState::Reset {
            return Err(DvStringError::token_stream(format!(
                "end called on a {:?} stream of analyzer [{}]",
                self.state,
                self.analyzer.name()
            )));
        }
        self.state = StreamState::Ended;
        Ok(())
    }

    /// Number of tokens handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Close the stream now instead of at the end of the scope.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.state == StreamState::Closed {
            return;
        }
        // Dropping the iterator releases whatever the analyzer holds.
        self.tokens = None;
        trace!(
            "closed token stream of analyzer [{}] after {} token(s), state was {:?}",
            self.analyzer.name(),
            self.consumed,
            self.state
        );
        self.state = StreamState::Closed;
    }
}

impl Drop for ScopedTokenStream<'_> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Return the first token `analyzer` produces for `text`, if any.
///
/// Only one token is pulled; the stream is ended and closed before returning,
/// and also when the analyzer fails.
pub fn first_token(analyzer: &NamedAnalyzer, text: &str) -> Result<Option<Token>> {
    let mut stream = ScopedTokenStream::open(analyzer, text);
    stream.reset()?;
    let token = stream.increment_token()?;
    stream.end()?;
    stream.close();
    Ok(token)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::analysis::analyzer::{
        LowercaseKeywordAnalyzer, NoOpAnalyzer, PipelineAnalyzer, SimpleAnalyzer,
    };
    use crate::analysis::token_filter::stop::StopFilter;
    use crate::analysis::tokenizer::Tokenizer;
    use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;

    /// Counts how many tokens were pulled and how often the stream was released.
    #[derive(Default)]
    struct Tracker {
        pulled: AtomicUsize,
        closed: AtomicUsize,
    }

    struct TrackerStream {
        inner: std::vec::IntoIter<Token>,
        tracker: Arc<Tracker>,
    }

    impl Iterator for TrackerStream {
        type Item = Token;

        fn next(&mut self) -> Option<Token> {
            let next = self.inner.next();
            if next.is_some() {
                self.tracker.pulled.fetch_add(1, Ordering::SeqCst);
            }
            next
        }
    }

    impl Drop for TrackerStream {
        fn drop(&mut self) {
            self.tracker.closed.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct TrackerTokenizer {
        tracker: Arc<Tracker>,
    }

    impl Tokenizer for TrackerTokenizer {
        fn tokenize(&self, text: &str) -> Result<TokenStream> {
            let tokens: Vec<Token> = WhitespaceTokenizer::new().tokenize(text)?.collect();
            Ok(Box::new(TrackerStream {
                inner: tokens.into_iter(),
                tracker: Arc::clone(&self.tracker),
            }))
        }

        fn name(&self) -> &'static str {
            "tracker"
        }
    }

    struct FailingTokenizer;

    impl Tokenizer for FailingTokenizer {
        fn tokenize(&self, _text: &str) -> Result<TokenStream> {
            Err(io::Error::new(io::ErrorKind::UnexpectedEof, "reader exhausted").into())
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn tracker_analyzer() -> (NamedAnalyzer, Arc<Tracker>) {
        let tracker = Arc::new(Tracker::default());
        let tokenizer = Arc::new(TrackerTokenizer {
            tracker: Arc::clone(&tracker),
        });
        let analyzer = NamedAnalyzer::new("tracker", Arc::new(SimpleAnalyzer::new(tokenizer)));
        (analyzer, tracker)
    }

    #[test]
    fn test_first_token_pulls_once_and_closes_once() {
        let (analyzer, tracker) = tracker_analyzer();

        let token = first_token(&analyzer, "peter benjamin parker").unwrap();

        assert_eq!(token.unwrap().text, "peter");
        assert_eq!(tracker.pulled.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_empty_stream_still_closes() {
        let (analyzer, tracker) = tracker_analyzer();

        assert!(first_token(&analyzer, "   ").unwrap().is_none());
        assert_eq!(tracker.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_without_end_closes() {
        let (analyzer, tracker) = tracker_analyzer();
        {
            let mut stream = ScopedTokenStream::open(&analyzer, "a b c");
            stream.reset().unwrap();
            let _ = stream.increment_token().unwrap();
        }
        assert_eq!(tracker.closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_analyzer_failure_propagates() {
        let analyzer = NamedAnalyzer::new(
            "failing",
            Arc::new(SimpleAnalyzer::new(Arc::new(FailingTokenizer))),
        );

        let err = first_token(&analyzer, "anything").unwrap_err();
        assert!(matches!(err, DvStringError::Io(_)));
    }

    #[test]
    fn test_increment_before_reset_is_rejected() {
        let analyzer = NamedAnalyzer::new("noop", Arc::new(NoOpAnalyzer::new()));
        let mut stream = ScopedTokenStream::open(&analyzer, "x");

        let err = stream.increment_token().unwrap_err();
        assert!(matches!(err, DvStringError::TokenStream(_)));
        assert!(stream.end().is_err());
    }

    #[test]
    fn test_reset_twice_is_rejected() {
        let analyzer = NamedAnalyzer::new("dvlwc", Arc::new(LowercaseKeywordAnalyzer::new()));
        let mut stream = ScopedTokenStream::open(&analyzer, "x");
        stream.reset().unwrap();
        assert!(stream.reset().is_err());
    }

    #[test]
    fn test_stopped_tokens_are_skipped() {
        let analyzer = NamedAnalyzer::new(
            "marking",
            Arc::new(
                PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
                    .add_filter(Arc::new(StopFilter::new().remove_stopped(false))),
            ),
        );

        let token = first_token(&analyzer, "the Thing").unwrap().unwrap();
        assert_eq!(token.text, "Thing");
    }
}
