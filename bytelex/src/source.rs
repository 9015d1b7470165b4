//! Seekable byte sources the token reader pulls from.
//!
//! The reader needs three things from a source: the current absolute
//! position, the total length, and the ability to move the position
//! backward. Backward seeks are the engine's only undo state — the
//! text-run lookahead un-read and the prefix-disambiguation backtrack are
//! both plain position decrements, so sources that cannot seek backward
//! cannot support this design. The reader never seeks forward past the
//! naturally read position.

use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, BufReader, SeekFrom};

/// A position-tracked, backward-seekable stream of bytes.
#[async_trait]
pub trait ByteSource: Send {
    /// Current absolute position, in bytes from the start.
    fn position(&self) -> u64;

    /// Total length of the source, in bytes.
    fn len(&self) -> u64;

    /// True when every byte has been consumed.
    fn is_empty(&self) -> bool {
        self.position() >= self.len()
    }

    /// Read the next byte, advancing the position by one; `None` at end.
    async fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Move the position. Only ever called with `pos` at or before the
    /// naturally read position.
    async fn seek_to(&mut self, pos: u64) -> io::Result<()>;
}

/// File-backed source: a buffered `tokio::fs::File` with explicit
/// position bookkeeping.
///
/// Seeks go through the buffer (discarding it), so backtracks are correct
/// at the cost of a refill — backtracks are short and rare next to the
/// forward reads.
#[derive(Debug)]
pub struct FileSource {
    reader: BufReader<File>,
    path: PathBuf,
    position: u64,
    len: u64,
}

impl FileSource {
    /// Open the file at `path` for tokenization.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).await?;
        let len = file.metadata().await?.len();
        Ok(Self {
            reader: BufReader::new(file),
            path,
            position: 0,
            len,
        })
    }

    /// The location this source is pulling data from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ByteSource for FileSource {
    fn position(&self) -> u64 {
        self.position
    }

    fn len(&self) -> u64 {
        self.len
    }

    async fn read_byte(&mut self) -> io::Result<Option<u8>> {
        if self.position >= self.len {
            return Ok(None);
        }
        let byte = self.reader.read_u8().await?;
        self.position += 1;
        Ok(Some(byte))
    }

    async fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        self.reader.seek(SeekFrom::Start(pos)).await?;
        self.position = pos;
        Ok(())
    }
}

/// In-memory source over a byte buffer.
///
/// The unit-test vehicle, and useful for callers that already hold the
/// input in memory.
#[derive(Clone, Debug)]
pub struct BytesSource {
    bytes: Vec<u8>,
    position: u64,
}

impl BytesSource {
    /// Wrap `bytes` as a source positioned at the start.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            position: 0,
        }
    }
}

#[async_trait]
impl ByteSource for BytesSource {
    fn position(&self) -> u64 {
        self.position
    }

    #[allow(clippy::cast_possible_truncation)]
    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    async fn read_byte(&mut self) -> io::Result<Option<u8>> {
        #[allow(clippy::cast_possible_truncation)]
        let Some(&byte) = self.bytes.get(self.position as usize) else {
            return Ok(None);
        };
        self.position += 1;
        Ok(Some(byte))
    }

    async fn seek_to(&mut self, pos: u64) -> io::Result<()> {
        if pos > self.len() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek past end of buffer",
            ));
        }
        self.position = pos;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn bytes_source_reads_in_order() {
        let mut source = BytesSource::new(b"ab".to_vec());
        assert_eq!(source.read_byte().await.unwrap(), Some(b'a'));
        assert_eq!(source.read_byte().await.unwrap(), Some(b'b'));
        assert_eq!(source.read_byte().await.unwrap(), None);
        assert_eq!(source.position(), 2);
    }

    #[tokio::test]
    async fn bytes_source_seeks_backward() {
        let mut source = BytesSource::new(b"abc".to_vec());
        source.read_byte().await.unwrap();
        source.read_byte().await.unwrap();
        source.seek_to(1).await.unwrap();
        assert_eq!(source.position(), 1);
        assert_eq!(source.read_byte().await.unwrap(), Some(b'b'));
    }

    #[tokio::test]
    async fn bytes_source_rejects_seek_past_end() {
        let mut source = BytesSource::new(b"a".to_vec());
        assert!(source.seek_to(5).await.is_err());
    }

    #[tokio::test]
    async fn empty_bytes_source_is_empty() {
        let source = BytesSource::new(Vec::new());
        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
    }

    #[tokio::test]
    async fn file_source_reads_and_seeks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.src");
        std::fs::write(&path, b"xyz").unwrap();

        let mut source = FileSource::open(&path).await.unwrap();
        assert_eq!(source.len(), 3);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.read_byte().await.unwrap(), Some(b'x'));
        assert_eq!(source.read_byte().await.unwrap(), Some(b'y'));
        source.seek_to(0).await.unwrap();
        assert_eq!(source.read_byte().await.unwrap(), Some(b'x'));
        source.seek_to(2).await.unwrap();
        assert_eq!(source.read_byte().await.unwrap(), Some(b'z'));
        assert_eq!(source.read_byte().await.unwrap(), None);
    }
}
