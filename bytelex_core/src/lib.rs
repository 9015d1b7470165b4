//! Catalog model and token state machine for the bytelex engine.
//!
//! This crate is standalone: no async, no I/O, no internal dependencies.
//! It holds the immutable [`TokenCatalog`] describing a dialect's
//! recognizable byte sequences, the transient [`TokenState`] values a
//! recognition attempt moves through, and the pure state-machine step
//! functions in [`machine`] that map (catalog, state, byte) to the next
//! state.
//!
//! The streaming driver that feeds bytes from a seekable source and turns
//! terminal states into emitted tokens lives in the `bytelex` crate; this
//! split keeps the disambiguation logic testable without any stream.

pub mod catalog;
pub mod dialect;
pub mod machine;
pub mod pattern;
pub mod state;

pub use catalog::{CatalogBuilder, CatalogError, TokenCatalog};
pub use pattern::{PairedPattern, Token, TokenKind, TokenPattern};
pub use state::{ReadState, TokenState};
