//! Sample dialect: a catalog covering the common C-like source shape.
//!
//! This is a reference configuration, not part of the core contract —
//! callers with other grammars build their own catalog with
//! [`TokenCatalog::builder`].
//!
//! Two configuration conventions worth noting:
//!
//! - Closure markers (`(`, `{`, ...) are declared both as singles and as
//!   pairs. The single entry wins classification, so a closure start is
//!   emitted standalone; the pair entry exists so the end marker is
//!   reachable through end-marker lookup when a caller wants to skip a
//!   whole closure.
//! - Comment starts are declared *only* as pairs, so the state machine
//!   attaches the end marker and the reader consumes the comment through
//!   its terminator in one token.
//! - `\r\n` is declared before the lone `\r` entry: a carriage return is
//!   first tried as CRLF, and the single-byte newline is reached through
//!   the retry path when no line feed follows.

use crate::catalog::{CatalogError, TokenCatalog};
use crate::pattern::{TokenKind, TokenPattern};

/// Catalog for a C-like source grammar: `;` statements, `=` assignment,
/// whitespace and `:` delimiters, `,` separator, `()`/`{}` closures,
/// `//`-to-newline and `/* */` comments, CR-LF aware newlines.
pub fn c_like() -> Result<TokenCatalog, CatalogError> {
    TokenCatalog::builder()
        .single(TokenKind::EndOfStatement, vec![b';'])
        .single(TokenKind::Assignment, vec![b'='])
        .single(TokenKind::Delimiter, vec![b' '])
        .single(TokenKind::Delimiter, vec![b':'])
        .single(TokenKind::Delimiter, vec![b'\t'])
        .single(TokenKind::Separator, vec![b','])
        .single(TokenKind::Newline, vec![b'\r', b'\n'])
        .single(TokenKind::Newline, vec![b'\n'])
        .single(TokenKind::Newline, vec![b'\r'])
        .single(TokenKind::ClosureStart, vec![b'('])
        .single(TokenKind::ClosureEnd, vec![b')'])
        .single(TokenKind::ClosureStart, vec![b'{'])
        .single(TokenKind::ClosureEnd, vec![b'}'])
        .pair(
            TokenPattern::new(TokenKind::ClosureStart, vec![b'(']),
            TokenPattern::new(TokenKind::ClosureEnd, vec![b')']),
        )
        .pair(
            TokenPattern::new(TokenKind::ClosureStart, vec![b'{']),
            TokenPattern::new(TokenKind::ClosureEnd, vec![b'}']),
        )
        .pair(
            TokenPattern::new(TokenKind::Comment, vec![b'/', b'/']),
            TokenPattern::new(TokenKind::Comment, vec![b'\n']),
        )
        .pair(
            TokenPattern::new(TokenKind::Comment, vec![b'/', b'*']),
            TokenPattern::new(TokenKind::Comment, vec![b'*', b'/']),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{advance, end_marker_for, initial};
    use crate::state::ReadState;
    use pretty_assertions::assert_eq;

    #[test]
    fn closure_start_classifies_standalone() {
        let catalog = c_like().unwrap();
        let state = initial(&catalog, b'(', 0);
        assert_eq!(state.kind(), TokenKind::ClosureStart);
        assert_eq!(state.read_state(), ReadState::Complete);
        // The single entry wins: no end marker attached, so the reader
        // emits the start standalone.
        assert_eq!(state.end_marker(), None);
    }

    #[test]
    fn closure_end_marker_is_reachable_by_lookup() {
        let catalog = c_like().unwrap();
        let marker = end_marker_for(&catalog, TokenKind::ClosureStart, b"(");
        assert_eq!(
            marker,
            Some(&TokenPattern::new(TokenKind::ClosureEnd, vec![b')']))
        );
        let marker = end_marker_for(&catalog, TokenKind::ClosureStart, b"{");
        assert_eq!(
            marker,
            Some(&TokenPattern::new(TokenKind::ClosureEnd, vec![b'}']))
        );
    }

    #[test]
    fn line_comment_start_carries_newline_end_marker() {
        let catalog = c_like().unwrap();
        let one = initial(&catalog, b'/', 0);
        assert_eq!(one.kind(), TokenKind::Comment);
        assert_eq!(one.read_state(), ReadState::Continue);
        let two = advance(&catalog, Some(&one), b'/');
        assert_eq!(two.read_state(), ReadState::EndOfRun);
        assert_eq!(
            two.end_marker(),
            Some(&TokenPattern::new(TokenKind::Comment, vec![b'\n']))
        );
    }

    #[test]
    fn block_comment_start_carries_close_end_marker() {
        let catalog = c_like().unwrap();
        let one = initial(&catalog, b'/', 0);
        let two = advance(&catalog, Some(&one), b'*');
        assert_eq!(two.kind(), TokenKind::Comment);
        assert_eq!(two.read_state(), ReadState::EndOfRun);
        assert_eq!(
            two.end_marker(),
            Some(&TokenPattern::new(TokenKind::Comment, vec![b'*', b'/']))
        );
    }

    #[test]
    fn crlf_wins_before_lone_cr() {
        let catalog = c_like().unwrap();
        let one = initial(&catalog, b'\r', 0);
        assert_eq!(one.kind(), TokenKind::Newline);
        assert_eq!(one.read_state(), ReadState::Continue);
        let two = advance(&catalog, Some(&one), b'\n');
        assert_eq!(two.read_state(), ReadState::EndOfRun);
        assert_eq!(two.bytes(), b"\r\n");
    }

    #[test]
    fn lone_cr_resolves_through_retry() {
        let catalog = c_like().unwrap();
        let one = initial(&catalog, b'\r', 0);
        let failed = advance(&catalog, Some(&one), b'x');
        assert_eq!(failed.read_state(), ReadState::Retry);

        // After the driver rewinds, the carriage return replays against
        // the next candidate: the single-byte Newline entry.
        let retried = advance(&catalog, Some(&failed), b'\r');
        assert_eq!(retried.kind(), TokenKind::Newline);
        assert_eq!(retried.read_state(), ReadState::Complete);
        assert_eq!(retried.bytes(), b"\r");
    }
}
