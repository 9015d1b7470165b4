//! Transient recognition state threaded through the state machine.
//!
//! A [`TokenState`] exists only within a single tokenization attempt: each
//! byte produces a new state superseding the previous one, and the final
//! state in a chain converts into an immutable output [`Token`]. States are
//! never mutated in place.

use crate::pattern::{Token, TokenKind, TokenPattern};

/// Progress of the current recognition attempt.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReadState {
    /// More bytes are needed to resolve the token.
    Continue,
    /// The token completed on its first byte.
    Complete,
    /// A multi-byte token (or text run) has finished.
    EndOfRun,
    /// The attempted catalog path failed to extend; the driver must rewind
    /// the stream to the start of the attempt and retry with the next
    /// candidate. Never surfaced outside the read loop.
    Retry,
}

impl ReadState {
    /// True for states that end the recognition attempt
    /// ([`Complete`](ReadState::Complete) and
    /// [`EndOfRun`](ReadState::EndOfRun)).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, ReadState::Complete | ReadState::EndOfRun)
    }
}

/// In-progress or completed recognition of one token.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenState {
    kind: TokenKind,
    read_state: ReadState,
    bytes: Vec<u8>,
    end_marker: Option<TokenPattern>,
    retry_index: usize,
}

impl TokenState {
    pub(crate) fn new(kind: TokenKind, read_state: ReadState, bytes: Vec<u8>) -> Self {
        Self {
            kind,
            read_state,
            bytes,
            end_marker: None,
            retry_index: 0,
        }
    }

    pub(crate) fn with_end_marker(mut self, end_marker: TokenPattern) -> Self {
        self.end_marker = Some(end_marker);
        self
    }

    pub(crate) fn with_retry_index(mut self, retry_index: usize) -> Self {
        self.retry_index = retry_index;
        self
    }

    /// Classification of the in-progress match.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Progress of the match.
    #[inline]
    pub fn read_state(&self) -> ReadState {
        self.read_state
    }

    /// Bytes accumulated so far.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// End marker to scan forward to, present only when the match belongs
    /// to a paired pattern's start.
    #[inline]
    pub fn end_marker(&self) -> Option<&TokenPattern> {
        self.end_marker.as_ref()
    }

    /// Ordinal count of candidate matches already rejected at the current
    /// stream position; the disambiguation resumes after this many.
    #[inline]
    pub fn retry_index(&self) -> usize {
        self.retry_index
    }

    /// Demote an in-progress match to [`ReadState::Retry`], keeping its
    /// accumulated bytes and retry index. Used by the driver when the
    /// stream ends mid-match and the attempt must be replayed against the
    /// next candidate after rewinding.
    pub fn into_retry(mut self) -> Self {
        self.read_state = ReadState::Retry;
        self.end_marker = None;
        self
    }

    /// Convert a finished state into its output token.
    ///
    /// The accumulated bytes move into the token unchanged; any attached
    /// end marker is dropped here and must be consumed by the caller
    /// beforehand (the driver scans to the marker before converting).
    pub fn into_token(self) -> Token {
        Token::new(self.kind, self.bytes)
    }

    /// Split a finished state into its output token and the end marker the
    /// driver still has to scan to, if any.
    pub fn into_token_and_end_marker(self) -> (Token, Option<TokenPattern>) {
        (Token::new(self.kind, self.bytes), self.end_marker)
    }
}
