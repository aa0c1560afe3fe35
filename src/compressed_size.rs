//! Variable-length unsigned size encoding shared by strings, arrays,
//! objects and typed arrays.
//!
//! The scheme is this format's own, not DWARF LEB128 — but the
//! peek-then-reread idiom below is the same tiny state machine the
//! teacher implements for `ULeb128`/`SLeb128` in `dalvik::dex::types`.

use crate::byte_source::ByteSource;
use crate::error::{BeveError, Result};

/// Width in bytes selected by each value of the low two bits of the
/// first byte of a compressed size.
const WIDTH_TABLE: [usize; 4] = [1, 2, 4, 8];

/// Decode one variable-length unsigned size.
///
/// Peeks the first byte; its low two bits select a width in
/// `{1, 2, 4, 8}` bytes. The same starting offset is then read again as
/// a little-endian unsigned integer of that width, and the decoded size
/// is that integer right-shifted by 2.
pub fn read_compressed_size(src: &mut dyn ByteSource) -> Result<u64> {
    let first = src.read_one()?;
    let width = WIDTH_TABLE[(first & 0b11) as usize];
    src.rewind(1)?;

    let bytes = src.read_exact(width)?;
    let mut raw: u64 = 0;
    for (i, b) in bytes.iter().enumerate() {
        raw |= (*b as u64) << (8 * i);
    }
    Ok(raw >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::SliceSource;

    #[test]
    fn one_byte_width() {
        // 0x08 -> wi=0 -> width 1, value = 0x08 >> 2 = 2
        let mut src = SliceSource::new(&[0x08]);
        assert_eq!(read_compressed_size(&mut src).unwrap(), 2);
        assert_eq!(src.position(), 1);
    }

    #[test]
    fn zero_is_zero_length() {
        let mut src = SliceSource::new(&[0x00]);
        assert_eq!(read_compressed_size(&mut src).unwrap(), 0);
    }

    #[test]
    fn two_byte_width() {
        // wi = 1 selects 2-byte width.
        let value: u16 = 100;
        let full = (value << 2) | 0b01;
        let bytes = full.to_le_bytes();
        let mut src = SliceSource::new(&bytes);
        assert_eq!(read_compressed_size(&mut src).unwrap(), value as u64);
        assert_eq!(src.position(), 2);
    }

    #[test]
    fn four_byte_width() {
        // wi = 2 selects 4-byte width.
        let value: u32 = 70_000;
        let full = (value << 2) | 0b10;
        let bytes = full.to_le_bytes();
        let mut src = SliceSource::new(&bytes);
        assert_eq!(read_compressed_size(&mut src).unwrap(), value as u64);
        assert_eq!(src.position(), 4);
    }

    #[test]
    fn eight_byte_width() {
        // wi = 3 selects 8-byte width.
        let value: u64 = 123456;
        let full = (value << 2) | 0b11;
        let bytes = full.to_le_bytes();
        let mut src = SliceSource::new(&bytes);
        assert_eq!(read_compressed_size(&mut src).unwrap(), value);
        assert_eq!(src.position(), 8);
    }

    #[test]
    fn truncated_stream_fails() {
        let mut src = SliceSource::new(&[0x03]); // wi=3 -> width 8, only 1 byte present
        assert!(matches!(
            read_compressed_size(&mut src),
            Err(BeveError::UnexpectedEndOfInput { .. })
        ));
    }
}
