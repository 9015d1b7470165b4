//! The token state machine: pure functions over (catalog, state, byte).
//!
//! Each step maps the previous [`TokenState`] and one byte to a new state.
//! Keeping the step a pure function of its inputs makes prefix
//! disambiguation trivially unit-testable without any stream: the driver
//! owns the stream position, the machine owns the decision.
//!
//! # Disambiguation and retry
//!
//! Catalog order is the sole priority. When a prefix is shared by several
//! entries, the earliest declared wins the first attempt; if that path
//! fails to extend, the step yields [`ReadState::Retry`] and the driver
//! rewinds the stream, after which [`advance`] restarts classification at
//! the failed position skipping one more previously-rejected candidate.
//! The retry index threads through the states so re-running the same
//! prefix is deterministic.

use crate::catalog::TokenCatalog;
use crate::pattern::{TokenKind, TokenPattern};
use crate::state::{ReadState, TokenState};

/// Classify the first byte of a new token, skipping the first
/// `retry_index` candidate matches.
///
/// Resolution order: single patterns, then paired starts (the skip budget
/// spans both), then the catalog's text predicate. A byte accepted by the
/// predicate opens a [`TokenKind::Text`] run; anything else becomes an
/// [`TokenKind::Ignore`] token the driver drops.
pub fn initial(catalog: &TokenCatalog, byte: u8, retry_index: usize) -> TokenState {
    let candidate = [byte];
    let mut skip = retry_index;

    for pattern in catalog.singles() {
        if !pattern.matches(&candidate, true) {
            continue;
        }
        if skip > 0 {
            skip -= 1;
            continue;
        }
        return start_state(pattern, byte, retry_index);
    }
    for pair in catalog.pairs() {
        if !pair.start().matches(&candidate, true) {
            continue;
        }
        if skip > 0 {
            skip -= 1;
            continue;
        }
        return start_state(pair.start(), byte, retry_index).with_end_marker(pair.end().clone());
    }

    if catalog.is_text_byte(byte) {
        TokenState::new(TokenKind::Text, ReadState::Continue, vec![byte])
    } else {
        TokenState::new(TokenKind::Ignore, ReadState::Complete, vec![byte])
    }
}

/// Extend a recognition attempt with one more byte.
///
/// - No previous state: delegates to [`initial`] at retry index 0.
/// - Previous text run: the byte is reclassified; a text byte extends the
///   run, anything else ends it with [`ReadState::EndOfRun`] carrying the
///   run *without* the new byte (the driver un-reads it).
/// - Previous [`ReadState::Retry`]: restart classification at the same
///   position with the next-priority candidate.
/// - Previous terminal state: returned unchanged.
/// - Otherwise the extended bytes are searched against same-kind single
///   patterns, then same-kind paired starts; no match yields
///   [`ReadState::Retry`].
pub fn advance(catalog: &TokenCatalog, previous: Option<&TokenState>, byte: u8) -> TokenState {
    let Some(previous) = previous else {
        return initial(catalog, byte, 0);
    };

    if previous.kind() == TokenKind::Text && previous.read_state() == ReadState::Continue {
        let reclassified = initial(catalog, byte, 0);
        if reclassified.kind() == TokenKind::Text {
            let mut bytes = previous.bytes().to_vec();
            bytes.push(byte);
            return TokenState::new(TokenKind::Text, ReadState::Continue, bytes);
        }
        // The run has ended; the new byte belongs to the next token.
        return TokenState::new(
            TokenKind::Text,
            ReadState::EndOfRun,
            previous.bytes().to_vec(),
        );
    }

    if previous.read_state() == ReadState::Retry {
        return initial(catalog, byte, previous.retry_index() + 1);
    }
    if previous.read_state().is_terminal() {
        return previous.clone();
    }

    let mut extended = previous.bytes().to_vec();
    extended.push(byte);

    for pattern in catalog.singles() {
        if pattern.kind() != previous.kind() || !pattern.matches(&extended, true) {
            continue;
        }
        return extend_state(pattern, extended, previous.retry_index());
    }
    for pair in catalog.pairs() {
        if pair.start().kind() != previous.kind() || !pair.start().matches(&extended, true) {
            continue;
        }
        return extend_state(pair.start(), extended, previous.retry_index())
            .with_end_marker(pair.end().clone());
    }

    // Nothing in the catalog extends this path; the driver must rewind to
    // the start of the attempt and try the next candidate.
    TokenState::new(previous.kind(), ReadState::Retry, previous.bytes().to_vec())
        .with_retry_index(previous.retry_index())
}

/// Look up the end marker for a completed start-of-pair token.
///
/// The completed token's kind and bytes must match a paired start exactly
/// (not partially); returns the pair's end marker, or `None` when the
/// token opens nothing.
pub fn end_marker_for<'a>(
    catalog: &'a TokenCatalog,
    kind: TokenKind,
    bytes: &[u8],
) -> Option<&'a TokenPattern> {
    catalog
        .pairs()
        .iter()
        .find(|pair| pair.start().kind() == kind && pair.start().matches(bytes, false))
        .map(|pair| pair.end())
}

fn start_state(pattern: &TokenPattern, byte: u8, retry_index: usize) -> TokenState {
    let read_state = if pattern.bytes().len() == 1 {
        ReadState::Complete
    } else {
        ReadState::Continue
    };
    TokenState::new(pattern.kind(), read_state, vec![byte]).with_retry_index(retry_index)
}

fn extend_state(pattern: &TokenPattern, extended: Vec<u8>, retry_index: usize) -> TokenState {
    let read_state = if extended.len() == pattern.bytes().len() {
        ReadState::EndOfRun
    } else {
        ReadState::Continue
    };
    TokenState::new(pattern.kind(), read_state, extended).with_retry_index(retry_index)
}
