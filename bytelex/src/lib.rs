//! Asynchronous streaming tokenizer over seekable byte sources.
//!
//! This crate drives the pure classification engine from [`bytelex_core`]
//! against real byte streams: files, in-memory buffers, or any type
//! implementing [`ByteSource`]. Bytes are consumed one at a time, the
//! source's seek position doubles as backtracking state, and the read
//! loops yield to the async scheduler on a configurable cadence so large
//! inputs stay cooperative.
//!
//! ```no_run
//! use bytelex::TokenReader;
//!
//! # async fn demo() -> Result<(), bytelex::TokenReadError> {
//! let mut reader = TokenReader::open("input.src").await?;
//! loop {
//!     let token = reader.read_token().await?;
//!     if token.is_end_of_file() {
//!         break;
//!     }
//!     println!("{}: {} bytes", token.kind(), token.bytes().len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod reader;
pub mod source;

pub use error::TokenReadError;
pub use reader::{ReaderOptions, TokenReader, DEFAULT_ITERATIONS_UNTIL_YIELD};
pub use source::{ByteSource, BytesSource, FileSource};

pub use bytelex_core::{
    dialect, CatalogBuilder, CatalogError, Token, TokenCatalog, TokenKind, TokenPattern,
};
