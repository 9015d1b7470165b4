//! The streaming token reader.
//!
//! Drives byte-by-byte consumption from a [`ByteSource`] through the core
//! state machine and assembles complete tokens. The source's position is
//! the only undo state: a failed prefix match rewinds to the start of the
//! attempt and replays against the next-priority catalog candidate, and a
//! finished text run rewinds one byte so the lookahead byte stays with the
//! next token. Nothing is buffered beyond the current token's bytes.
//!
//! Execution is cooperative: the read loops suspend via
//! [`tokio::task::yield_now`] after a configurable number of consumed
//! bytes, and an optional cancel signal is observed at loop boundaries —
//! never mid-byte, never mid-token.

use bytelex_core::machine;
use bytelex_core::{dialect, ReadState, Token, TokenCatalog, TokenKind, TokenPattern, TokenState};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::TokenReadError;
use crate::source::{ByteSource, FileSource};

/// Number of consumed bytes between cooperative yields, unless
/// overridden. Small enough that very large files never monopolize the
/// runtime for long stretches.
pub const DEFAULT_ITERATIONS_UNTIL_YIELD: u32 = 50;

/// Reader tuning knobs.
#[derive(Clone, Debug)]
pub struct ReaderOptions {
    /// Bytes consumed before the read loop yields to the scheduler.
    /// Zero yields on every iteration.
    pub iterations_until_yield: u32,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            iterations_until_yield: DEFAULT_ITERATIONS_UNTIL_YIELD,
        }
    }
}

/// Streaming tokenizer over one exclusively-owned byte source.
///
/// Each [`read_token`](Self::read_token) call yields exactly one [`Token`]
/// or the end-of-stream sentinel; callers loop until the sentinel.
/// Independent sources get independent readers — there is no shared
/// mutable state.
#[derive(Debug)]
pub struct TokenReader<S: ByteSource> {
    source: S,
    catalog: TokenCatalog,
    options: ReaderOptions,
    cancel: Option<watch::Receiver<bool>>,
}

impl TokenReader<FileSource> {
    /// Open the file at `path` with the reference C-like dialect.
    pub async fn open(path: impl AsRef<std::path::Path>) -> Result<Self, TokenReadError> {
        let catalog = dialect::c_like()?;
        Ok(Self::new(FileSource::open(path).await?, catalog))
    }

    /// Open the file at `path` with a caller-supplied catalog and options.
    pub async fn open_with(
        path: impl AsRef<std::path::Path>,
        catalog: TokenCatalog,
        options: ReaderOptions,
    ) -> Result<Self, TokenReadError> {
        Ok(Self::with_options(
            FileSource::open(path).await?,
            catalog,
            options,
        ))
    }
}

impl<S: ByteSource> TokenReader<S> {
    /// Build a reader over `source` with default options.
    pub fn new(source: S, catalog: TokenCatalog) -> Self {
        Self::with_options(source, catalog, ReaderOptions::default())
    }

    /// Build a reader over `source` with explicit options.
    pub fn with_options(source: S, catalog: TokenCatalog, options: ReaderOptions) -> Self {
        Self {
            source,
            catalog,
            options,
            cancel: None,
        }
    }

    /// Attach a cooperative cancel signal. When the watched value flips to
    /// `true`, in-flight reads fail with [`TokenReadError::Cancelled`] at
    /// the next loop boundary.
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The catalog this reader classifies with.
    pub fn catalog(&self) -> &TokenCatalog {
        &self.catalog
    }

    /// Give the source back, consuming the reader.
    pub fn into_source(self) -> S {
        self.source
    }

    /// Read the next complete token from the source.
    ///
    /// Returns the end-of-stream sentinel once the source is exhausted
    /// (and on every call thereafter). Ignorable bytes are dropped and
    /// never surface. A token whose match carries an end marker (e.g. a
    /// comment start) is scanned through its terminator before being
    /// returned, so it never surfaces standalone.
    pub async fn read_token(&mut self) -> Result<Token, TokenReadError> {
        if self.source.is_empty() {
            return Ok(Token::end_of_file());
        }

        let mut budget = self.options.iterations_until_yield;
        let mut previous: Option<TokenState> = None;
        loop {
            self.check_cancelled()?;
            if budget == 0 {
                tokio::task::yield_now().await;
                budget = self.options.iterations_until_yield;
            }

            let Some(byte) = self.source.read_byte().await? else {
                match previous {
                    // Exhausted with nothing in flight.
                    None => return Ok(Token::end_of_file()),
                    // A text run simply ends at the end of the stream.
                    Some(state) if state.kind() == TokenKind::Text => {
                        return Ok(state.into_token());
                    }
                    // A partial catalog match cannot extend past the end:
                    // rewind to the start of the attempt and replay it
                    // against the next-priority candidate.
                    Some(state) => {
                        let rewind = state.bytes().len() as u64;
                        let pos = self.source.position() - rewind;
                        debug!(pos, "stream ended mid-match, backtracking");
                        self.source.seek_to(pos).await?;
                        previous = Some(state.into_retry());
                        continue;
                    }
                }
            };
            budget = budget.saturating_sub(1);

            let state = machine::advance(&self.catalog, previous.as_ref(), byte);
            match state.read_state() {
                ReadState::Complete | ReadState::EndOfRun => {
                    if state.kind() == TokenKind::Ignore {
                        previous = None;
                        continue;
                    }
                    if state.kind() == TokenKind::Text {
                        // The lookahead byte belongs to the next token.
                        self.source.seek_to(self.source.position() - 1).await?;
                    }
                    let (token, end_marker) = state.into_token_and_end_marker();
                    let Some(end_marker) = end_marker else {
                        trace!(kind = %token.kind(), len = token.bytes().len(), "token");
                        return Ok(token);
                    };
                    debug!(kind = %token.kind(), "scanning to end marker");
                    return self.scan_to_marker(token, &end_marker).await;
                }
                ReadState::Continue => previous = Some(state),
                ReadState::Retry => {
                    if previous.is_none() {
                        return Err(TokenReadError::BacktrackUnderflow);
                    }
                    // Un-read the failed candidate's bytes plus the byte
                    // that killed it; the next advance restarts
                    // classification with one more candidate skipped.
                    let rewind = state.bytes().len() as u64 + 1;
                    let pos = self.source.position() - rewind;
                    debug!(
                        retry_index = state.retry_index(),
                        pos, "match failed, backtracking"
                    );
                    self.source.seek_to(pos).await?;
                    previous = Some(state);
                }
            }
        }
    }

    /// Scan forward to the end marker paired with an already-produced
    /// token, appending everything scanned (terminator included).
    ///
    /// A token with no configured end marker is returned unchanged. If the
    /// source is already exhausted, the end-of-stream sentinel is
    /// returned; if it runs out mid-scan, the construct is unterminated
    /// and the read fails.
    pub async fn read_to_end_marker(&mut self, token: Token) -> Result<Token, TokenReadError> {
        let Some(end_marker) =
            machine::end_marker_for(&self.catalog, token.kind(), token.bytes()).cloned()
        else {
            return Ok(token);
        };
        if self.source.is_empty() {
            return Ok(Token::end_of_file());
        }
        self.scan_to_marker(token, &end_marker).await
    }

    /// Rolling byte-sequence search for `end_marker`, appending every
    /// scanned byte to `token`. The match cursor advances on each expected
    /// byte and resets to zero on mismatch.
    async fn scan_to_marker(
        &mut self,
        token: Token,
        end_marker: &TokenPattern,
    ) -> Result<Token, TokenReadError> {
        let (kind, mut bytes) = token.into_parts();
        let marker = end_marker.bytes();
        let mut cursor = 0;
        let mut budget = self.options.iterations_until_yield;
        loop {
            self.check_cancelled()?;
            if budget == 0 {
                tokio::task::yield_now().await;
                budget = self.options.iterations_until_yield;
            }

            let Some(byte) = self.source.read_byte().await? else {
                return Err(TokenReadError::Unterminated { kind });
            };
            budget = budget.saturating_sub(1);

            bytes.push(byte);
            if marker[cursor] == byte {
                cursor += 1;
                if cursor >= marker.len() {
                    let token = Token::new(kind, bytes);
                    trace!(kind = %token.kind(), len = token.bytes().len(), "token");
                    return Ok(token);
                }
            } else {
                cursor = 0;
            }
        }
    }

    fn check_cancelled(&self) -> Result<(), TokenReadError> {
        match &self.cancel {
            Some(rx) if *rx.borrow() => Err(TokenReadError::Cancelled),
            _ => Ok(()),
        }
    }
}
