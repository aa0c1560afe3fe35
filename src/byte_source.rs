//! Sequential byte-oriented reader used by the rest of the decoder.
//!
//! Mirrors the `R: io::Read + io::Seek` bound the teacher's `dalvik::dex`
//! types read through, generalized into its own trait so the decoder can
//! also run directly over an in-memory slice without the indirection of
//! an `io::Cursor`.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{BeveError, Result};

/// A sequential source of octets with current-position tracking and the
/// ability to rewind a small, fixed number of bytes.
///
/// All reads are sequential; implementations must buffer lazily, but
/// correctness never depends on the buffering strategy.
pub trait ByteSource {
    /// Read and return exactly `n` bytes, advancing the position by `n`.
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Read and return a single byte, advancing the position by one.
    fn read_one(&mut self) -> Result<u8> {
        let bytes = self.read_exact(1)?;
        Ok(bytes[0])
    }

    /// Move the position back by `n` bytes. `n` is small (bounded by 1 in
    /// current use) and must not move the position before the start of
    /// the stream.
    fn rewind(&mut self, n: usize) -> Result<()>;

    /// The current byte offset from the start of the stream.
    fn position(&self) -> u64;
}

/// A [`ByteSource`] over an in-memory byte slice.
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        SliceSource { data, pos: 0 }
    }
}

impl<'a> ByteSource for SliceSource<'a> {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let end = self.pos.checked_add(n).ok_or(BeveError::UnexpectedEndOfInput {
            offset: self.pos as u64,
        })?;
        if end > self.data.len() {
            return Err(BeveError::UnexpectedEndOfInput {
                offset: self.pos as u64,
            });
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice.to_vec())
    }

    fn rewind(&mut self, n: usize) -> Result<()> {
        self.pos = self.pos.saturating_sub(n);
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos as u64
    }
}

/// A [`ByteSource`] over any `io::Read + io::Seek`, e.g. an open [`std::fs::File`].
pub struct ReaderSource<R> {
    inner: R,
    pos: u64,
}

impl<R: Read + Seek> ReaderSource<R> {
    pub fn new(inner: R) -> Self {
        ReaderSource { inner, pos: 0 }
    }
}

impl<R: Read + Seek> ByteSource for ReaderSource<R> {
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => {
                self.pos += n as u64;
                Ok(buf)
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                Err(BeveError::UnexpectedEndOfInput { offset: self.pos })
            }
            Err(e) => Err(BeveError::Io(e)),
        }
    }

    fn rewind(&mut self, n: usize) -> Result<()> {
        let n = n as u64;
        let target = self.pos.saturating_sub(n);
        self.inner
            .seek(SeekFrom::Start(target))
            .map_err(|_| BeveError::UnexpectedEndOfInput { offset: self.pos })?;
        self.pos = target;
        Ok(())
    }

    fn position(&self) -> u64 {
        self.pos
    }
}
