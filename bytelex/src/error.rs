//! Reader error kinds.
//!
//! None of these are retried by the engine: the internal retry machinery
//! (prefix disambiguation) is fully resolved before any token or error
//! reaches the caller. Cancellation is a distinct signal, never conflated
//! with data errors.

use bytelex_core::{CatalogError, TokenKind};

/// Fatal conditions surfaced by the token reader.
#[derive(Debug, thiserror::Error)]
pub enum TokenReadError {
    /// The underlying byte source failed.
    #[error("byte source error: {0}")]
    Io(#[from] std::io::Error),

    /// The token catalog was rejected at construction.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A retry read-state was produced with no previous state to rewind
    /// from — an internal state-machine/catalog inconsistency.
    #[error("cannot backtrack: no previous token state has been read")]
    BacktrackUnderflow,

    /// A paired construct's terminator scan hit end-of-stream before the
    /// end marker matched. Malformed input; the caller must correct it.
    #[error("unterminated {kind} construct: end of stream before its end marker")]
    Unterminated {
        /// Classification of the unterminated token.
        kind: TokenKind,
    },

    /// Cooperative cancellation was observed at a loop boundary.
    #[error("tokenization cancelled")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unterminated_names_the_kind() {
        let err = TokenReadError::Unterminated {
            kind: TokenKind::Comment,
        };
        assert_eq!(
            err.to_string(),
            "unterminated comment construct: end of stream before its end marker"
        );
    }
}
