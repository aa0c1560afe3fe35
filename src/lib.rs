//! A decoder for BEVE (Binary Extensible Value Encoding), a self-describing
//! binary interchange format isomorphic in expressive power to JSON,
//! extended with fixed-width numeric types, homogeneous typed arrays,
//! column-major matrices, and complex numbers.
//!
//! This crate covers the reader side only: given an octet stream holding
//! one top-level BEVE value, [`decode`]/[`decode_slice`]/[`decode_file`]
//! produce an owned [`Value`] tree. Encoding (the writer side), schema
//! validation beyond tag consistency, and any output projection (e.g. to
//! JSON) are out of scope.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

pub mod byte_source;
pub mod compressed_size;
pub mod error;
pub mod extension;
pub mod numeric;
pub mod options;
pub mod reader;
pub mod value;

pub use error::{BeveError, Result};
pub use options::DecodeOptions;
pub use value::Value;

use byte_source::{ReaderSource, SliceSource};

/// Decode one BEVE value from an in-memory byte slice.
///
/// Trailing bytes after the top-level value are neither read nor
/// validated (§6 "Wire format").
pub fn decode_slice(data: &[u8]) -> Result<Value> {
    decode_slice_with_options(data, &DecodeOptions::default())
}

/// Like [`decode_slice`], with explicit [`DecodeOptions`].
pub fn decode_slice_with_options(data: &[u8], opts: &DecodeOptions) -> Result<Value> {
    let mut src = SliceSource::new(data);
    reader::read_value(&mut src, opts, 0)
}

/// Decode one BEVE value from any `Read + Seek` source, e.g. an open file.
pub fn decode<R: Read + Seek>(source: R) -> Result<Value> {
    decode_with_options(source, &DecodeOptions::default())
}

/// Like [`decode`], with explicit [`DecodeOptions`].
pub fn decode_with_options<R: Read + Seek>(source: R, opts: &DecodeOptions) -> Result<Value> {
    let mut src = ReaderSource::new(source);
    reader::read_value(&mut src, opts, 0)
}

/// Convenience wrapper that opens `path` and decodes one value from it.
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<Value> {
    let file = File::open(path)?;
    decode(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use value::{ScalarUInt, Value};

    #[test]
    fn decode_slice_matches_reader() {
        let v = decode_slice(&[0x51, 0x04, 0x03, 0x02, 0x01]).unwrap();
        assert_eq!(v, Value::UInt(ScalarUInt::U32(0x01020304)));
    }

    #[test]
    fn decode_over_a_cursor() {
        let data = [0x00u8];
        let cursor = std::io::Cursor::new(&data[..]);
        let v = decode(cursor).unwrap();
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn decode_file_reports_io_error() {
        let err = decode_file("/nonexistent/path/does-not-exist.beve").unwrap_err();
        assert!(matches!(err, BeveError::Io(_)));
    }
}
