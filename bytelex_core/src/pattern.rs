//! Catalog entry and output token value types.
//!
//! A [`TokenPattern`] describes one recognizable byte sequence and the
//! classification it produces. A [`PairedPattern`] ties a start pattern to
//! the end pattern that terminates it (e.g., `/*` ... `*/`). A [`Token`] is
//! the immutable output of one read: a classification plus the complete raw
//! bytes that produced it.
//!
//! Matching is by leading-byte comparison, never by identity: two patterns
//! with the same kind and bytes are interchangeable.

use std::fmt;

/// Classification attached to every catalog entry and emitted token.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TokenKind {
    /// Start of a byte-delimited scope, e.g. `(` or `{`.
    ClosureStart,
    /// End of a byte-delimited scope, e.g. `)` or `}`.
    ClosureEnd,
    /// A byte that ends a run of textual input without other meaning,
    /// e.g. space or tab.
    Delimiter,
    /// Separates items in a list, e.g. the comma in `a,b,c`.
    Separator,
    /// Free textual input to be interpreted by a later stage.
    Text,
    /// End-of-stream sentinel; carries no bytes.
    EndOfFile,
    /// A line break (`\n`, `\r\n`, or lone `\r` in the reference dialect).
    Newline,
    /// Descriptive text bounded by a terminating sequence.
    Comment,
    /// Operator marking the following input as an assignment, e.g. `=`.
    Assignment,
    /// Final end of a syntax statement, e.g. `;`.
    EndOfStatement,
    /// A byte the catalog classifies as droppable; never surfaced as output.
    Ignore,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::ClosureStart => "closure start",
            TokenKind::ClosureEnd => "closure end",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Separator => "separator",
            TokenKind::Text => "text",
            TokenKind::EndOfFile => "end of file",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Assignment => "assignment",
            TokenKind::EndOfStatement => "end of statement",
            TokenKind::Ignore => "ignore",
        };
        f.write_str(name)
    }
}

/// A classification plus the non-empty byte sequence it represents.
///
/// Non-emptiness is enforced at catalog construction, not here: a
/// free-standing pattern is just data until it enters a
/// [`TokenCatalog`](crate::TokenCatalog).
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TokenPattern {
    kind: TokenKind,
    bytes: Vec<u8>,
}

impl TokenPattern {
    /// Create a pattern for `kind` matching exactly `bytes`.
    pub fn new(kind: TokenKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    /// The classification this pattern produces.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The byte sequence this pattern matches.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Compare `candidate` against this pattern's leading bytes.
    ///
    /// A candidate longer than the pattern never matches. With
    /// `allow_partial` false the lengths must be equal (exact match); with
    /// `allow_partial` true the candidate may be a strict prefix — for a
    /// pattern over `[1, 2, 3]`, the candidates `[1]` and `[1, 2]` are
    /// partial matches. Every compared position must be equal either way.
    pub fn matches(&self, candidate: &[u8], allow_partial: bool) -> bool {
        if candidate.len() > self.bytes.len() {
            return false;
        }
        if !allow_partial && candidate.len() < self.bytes.len() {
            return false;
        }
        self.bytes[..candidate.len()] == *candidate
    }
}

/// A start pattern tied to the end pattern that terminates it.
///
/// Models constructs whose start and end markers differ: a line comment
/// opened by `//` and closed by a line break, or a block comment bounded by
/// `/*` and `*/`.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct PairedPattern {
    start: TokenPattern,
    end: TokenPattern,
}

impl PairedPattern {
    /// Pair `start` with its terminating `end` pattern.
    pub fn new(start: TokenPattern, end: TokenPattern) -> Self {
        Self { start, end }
    }

    /// The pattern that opens the construct.
    #[inline]
    pub fn start(&self) -> &TokenPattern {
        &self.start
    }

    /// The pattern that terminates the construct.
    #[inline]
    pub fn end(&self) -> &TokenPattern {
        &self.end
    }
}

/// A completed output token: classification plus complete raw bytes.
///
/// One `Token` is the result of exactly one read call; for a paired
/// construct the terminator-scan bytes are appended before the token is
/// returned, so the bytes always span start marker, interior, and end
/// marker. Owned by the caller once returned.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Token {
    kind: TokenKind,
    bytes: Vec<u8>,
}

impl Token {
    /// Build a token from a classification and its raw bytes.
    pub fn new(kind: TokenKind, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            kind,
            bytes: bytes.into(),
        }
    }

    /// The end-of-stream sentinel: [`TokenKind::EndOfFile`] with no bytes.
    pub fn end_of_file() -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            bytes: Vec::new(),
        }
    }

    /// The token's classification.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The complete raw bytes this token was read from.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// True for the end-of-stream sentinel.
    #[inline]
    pub fn is_end_of_file(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    /// Recover the raw parts; used by the driver when terminator-scan
    /// bytes must be appended to an already-produced token.
    pub fn into_parts(self) -> (TokenKind, Vec<u8>) {
        (self.kind, self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn matches_exact_requires_equal_length() {
        let pattern = TokenPattern::new(TokenKind::Assignment, vec![1, 2, 3]);
        assert!(pattern.matches(&[1, 2, 3], false));
        assert!(!pattern.matches(&[1, 2], false));
        assert!(!pattern.matches(&[1, 2, 3, 4], false));
    }

    #[test]
    fn matches_partial_accepts_strict_prefixes() {
        let pattern = TokenPattern::new(TokenKind::Assignment, vec![1, 2, 3]);
        assert!(pattern.matches(&[1], true));
        assert!(pattern.matches(&[1, 2], true));
        assert!(pattern.matches(&[1, 2, 3], true));
    }

    #[test]
    fn matches_rejects_diverging_bytes() {
        let pattern = TokenPattern::new(TokenKind::Assignment, vec![1, 2, 3]);
        assert!(!pattern.matches(&[1, 9], true));
        assert!(!pattern.matches(&[9], true));
        assert!(!pattern.matches(&[1, 2, 9], false));
    }

    #[test]
    fn matches_longer_candidate_never_matches() {
        let pattern = TokenPattern::new(TokenKind::Separator, vec![1]);
        assert!(!pattern.matches(&[1, 1], true));
        assert!(!pattern.matches(&[1, 1], false));
    }

    #[test]
    fn matches_empty_candidate_is_partial_match() {
        let pattern = TokenPattern::new(TokenKind::Separator, vec![1]);
        assert!(pattern.matches(&[], true));
        assert!(!pattern.matches(&[], false));
    }

    #[test]
    fn token_equality_is_by_value() {
        let a = Token::new(TokenKind::Text, b"abc".to_vec());
        let b = Token::new(TokenKind::Text, b"abc".to_vec());
        assert_eq!(a, b);
        assert_ne!(a, Token::new(TokenKind::Comment, b"abc".to_vec()));
    }

    #[test]
    fn end_of_file_sentinel_has_no_bytes() {
        let token = Token::end_of_file();
        assert!(token.is_end_of_file());
        assert!(token.bytes().is_empty());
    }

    mod proptest_matches {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn exact_match_iff_elementwise_equal(
                pattern in proptest::collection::vec(any::<u8>(), 1..16),
                candidate in proptest::collection::vec(any::<u8>(), 0..20),
            ) {
                let token = TokenPattern::new(TokenKind::Text, pattern.clone());
                prop_assert_eq!(token.matches(&candidate, false), pattern == candidate);
            }

            #[test]
            fn partial_match_iff_prefix(
                pattern in proptest::collection::vec(any::<u8>(), 1..16),
                candidate in proptest::collection::vec(any::<u8>(), 0..20),
            ) {
                let token = TokenPattern::new(TokenKind::Text, pattern.clone());
                prop_assert_eq!(token.matches(&candidate, true), pattern.starts_with(&candidate));
            }

            #[test]
            fn own_bytes_always_match(pattern in proptest::collection::vec(any::<u8>(), 1..16)) {
                let token = TokenPattern::new(TokenKind::Text, pattern.clone());
                prop_assert!(token.matches(&pattern, false));
                prop_assert!(token.matches(&pattern, true));
            }
        }
    }
}
