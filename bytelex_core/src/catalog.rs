//! Immutable token catalog: the dialect a tokenizer is configured with.
//!
//! A catalog is two ordered collections — single-sequence patterns and
//! paired patterns — fixed at construction. Order matters: declaration
//! order is the deterministic priority used to resolve ambiguous byte
//! prefixes, so `\r\n` declared before `\r` wins the first attempt at a
//! carriage return and the shorter entry is only reached by backtracking.
//!
//! The original design kept these tables in shared mutable dictionaries;
//! here they are built once, validated, and read-only afterwards. Searches
//! are linear scans — the collections are small and fixed, and matching
//! needs prefix logic rather than exact-key lookup.

use crate::pattern::{PairedPattern, TokenKind, TokenPattern};

/// Default text predicate: any 7-bit byte not otherwise classified is
/// valid free text. Multi-byte encoded content is deliberately not
/// handled; override via [`CatalogBuilder::text_predicate`] if a dialect
/// needs a different range.
fn is_seven_bit(byte: u8) -> bool {
    byte <= 0x7F
}

/// Invalid catalog configuration, detected at construction.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// A pattern was declared with an empty byte sequence.
    #[error("catalog pattern for {kind} has an empty byte sequence")]
    EmptySequence {
        /// Classification of the offending pattern.
        kind: TokenKind,
    },
}

/// Immutable description of every byte sequence a tokenizer recognizes.
///
/// Constructed through [`TokenCatalog::builder`]; read-only for the life
/// of the catalog. One catalog can back any number of readers.
#[derive(Clone, Debug)]
pub struct TokenCatalog {
    singles: Vec<TokenPattern>,
    pairs: Vec<PairedPattern>,
    is_text_byte: fn(u8) -> bool,
}

impl TokenCatalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder {
            singles: Vec::new(),
            pairs: Vec::new(),
            is_text_byte: is_seven_bit,
        }
    }

    /// Single-sequence patterns, in declaration (= priority) order.
    #[inline]
    pub fn singles(&self) -> &[TokenPattern] {
        &self.singles
    }

    /// Paired patterns, in declaration (= priority) order.
    #[inline]
    pub fn pairs(&self) -> &[PairedPattern] {
        &self.pairs
    }

    /// Whether `byte` counts as free text when nothing else matches.
    #[inline]
    pub fn is_text_byte(&self, byte: u8) -> bool {
        (self.is_text_byte)(byte)
    }
}

/// Builder for [`TokenCatalog`]; entries keep their declaration order.
#[derive(Clone, Debug)]
pub struct CatalogBuilder {
    singles: Vec<TokenPattern>,
    pairs: Vec<PairedPattern>,
    is_text_byte: fn(u8) -> bool,
}

impl CatalogBuilder {
    /// Add a single-sequence pattern.
    pub fn single(mut self, kind: TokenKind, bytes: impl Into<Vec<u8>>) -> Self {
        self.singles.push(TokenPattern::new(kind, bytes));
        self
    }

    /// Add a paired pattern from its start and end markers.
    pub fn pair(mut self, start: TokenPattern, end: TokenPattern) -> Self {
        self.pairs.push(PairedPattern::new(start, end));
        self
    }

    /// Replace the free-text byte predicate (default: `byte <= 0x7F`).
    pub fn text_predicate(mut self, predicate: fn(u8) -> bool) -> Self {
        self.is_text_byte = predicate;
        self
    }

    /// Validate and freeze the catalog.
    ///
    /// Fails if any pattern (single, or either side of a pair) has an
    /// empty byte sequence.
    pub fn build(self) -> Result<TokenCatalog, CatalogError> {
        for pattern in &self.singles {
            validate(pattern)?;
        }
        for pair in &self.pairs {
            validate(pair.start())?;
            validate(pair.end())?;
        }
        Ok(TokenCatalog {
            singles: self.singles,
            pairs: self.pairs,
            is_text_byte: self.is_text_byte,
        })
    }
}

fn validate(pattern: &TokenPattern) -> Result<(), CatalogError> {
    if pattern.bytes().is_empty() {
        return Err(CatalogError::EmptySequence {
            kind: pattern.kind(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_preserves_declaration_order() {
        let catalog = TokenCatalog::builder()
            .single(TokenKind::EndOfStatement, vec![b';'])
            .single(TokenKind::Assignment, vec![b'='])
            .build()
            .unwrap();

        assert_eq!(catalog.singles().len(), 2);
        assert_eq!(catalog.singles()[0].kind(), TokenKind::EndOfStatement);
        assert_eq!(catalog.singles()[1].kind(), TokenKind::Assignment);
    }

    #[test]
    fn empty_single_sequence_is_rejected() {
        let result = TokenCatalog::builder()
            .single(TokenKind::Separator, Vec::new())
            .build();

        assert_eq!(
            result.unwrap_err(),
            CatalogError::EmptySequence {
                kind: TokenKind::Separator
            }
        );
    }

    #[test]
    fn empty_pair_end_sequence_is_rejected() {
        let result = TokenCatalog::builder()
            .pair(
                TokenPattern::new(TokenKind::Comment, vec![b'/', b'/']),
                TokenPattern::new(TokenKind::Comment, Vec::new()),
            )
            .build();

        assert_eq!(
            result.unwrap_err(),
            CatalogError::EmptySequence {
                kind: TokenKind::Comment
            }
        );
    }

    #[test]
    fn empty_catalog_is_valid() {
        let catalog = TokenCatalog::builder().build().unwrap();
        assert!(catalog.singles().is_empty());
        assert!(catalog.pairs().is_empty());
    }

    #[test]
    fn default_text_predicate_is_seven_bit() {
        let catalog = TokenCatalog::builder().build().unwrap();
        assert!(catalog.is_text_byte(0x00));
        assert!(catalog.is_text_byte(b'a'));
        assert!(catalog.is_text_byte(0x7F));
        assert!(!catalog.is_text_byte(0x80));
        assert!(!catalog.is_text_byte(0xFF));
    }

    #[test]
    fn text_predicate_is_overridable() {
        let catalog = TokenCatalog::builder()
            .text_predicate(|b| b.is_ascii_alphanumeric())
            .build()
            .unwrap();
        assert!(catalog.is_text_byte(b'a'));
        assert!(!catalog.is_text_byte(b' '));
    }
}
