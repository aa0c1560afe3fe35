//! Fixed-width numeric element decoding.
//!
//! Given a `(kind, width, count)` triple this reads `width * count` bytes
//! little-endian and assembles them into a typed buffer, the way the
//! teacher's `EncodedValue::read_options` assembles a single scalar via
//! `reader.read_uint::<LittleEndian>(value_size)` — generalized here to a
//! run of `count` elements instead of exactly one.

use byteorder::{ByteOrder, LittleEndian};

use crate::byte_source::ByteSource;
use crate::error::{BeveError, Result};

/// Which of the three numeric families a header's `sub` field selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    Float,
    Signed,
    Unsigned,
}

/// A homogeneous run of fixed-width numeric elements, tagged with its own
/// element kind and width so a round-trip never silently widens or
/// narrows the value.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericBuffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

impl NumericBuffer {
    pub fn len(&self) -> usize {
        match self {
            NumericBuffer::F32(v) => v.len(),
            NumericBuffer::F64(v) => v.len(),
            NumericBuffer::I8(v) => v.len(),
            NumericBuffer::I16(v) => v.len(),
            NumericBuffer::I32(v) => v.len(),
            NumericBuffer::I64(v) => v.len(),
            NumericBuffer::U8(v) => v.len(),
            NumericBuffer::U16(v) => v.len(),
            NumericBuffer::U32(v) => v.len(),
            NumericBuffer::U64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Interpret this buffer as a run of non-negative integers, for the
    /// matrix-extents special case (§4.5 "Matrix"). Fails if any element
    /// would not fit a `usize` or the buffer holds floats.
    pub fn as_usize_vec(&self) -> Option<Vec<usize>> {
        match self {
            NumericBuffer::I8(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::I16(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::I32(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::I64(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::U8(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::U16(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::U32(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::U64(v) => Some(v.iter().map(|&x| x as usize).collect()),
            NumericBuffer::F32(_) | NumericBuffer::F64(_) => None,
        }
    }
}

fn assemble_unsigned(bytes: &[u8]) -> u64 {
    match bytes.len() {
        1 => bytes[0] as u64,
        2 => LittleEndian::read_u16(bytes) as u64,
        4 => LittleEndian::read_u32(bytes) as u64,
        8 => LittleEndian::read_u64(bytes),
        _ => unreachable!("width is always one of 1, 2, 4, 8"),
    }
}

/// Read `count` elements of `(kind, width)` from `src`, returning a typed
/// buffer. `offset` is the position to blame in a reported error (callers
/// pass the header-byte offset, i.e. the start of the value being read).
pub fn read_numeric_buffer(
    src: &mut dyn ByteSource,
    kind: NumericKind,
    width: usize,
    count: u64,
) -> Result<NumericBuffer> {
    let offset = src.position();
    match (kind, width) {
        (NumericKind::Float, 4) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(4)?;
                out.push(f32::from_bits(LittleEndian::read_u32(&bytes)));
            }
            Ok(NumericBuffer::F32(out))
        }
        (NumericKind::Float, 8) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(8)?;
                out.push(f64::from_bits(LittleEndian::read_u64(&bytes)));
            }
            Ok(NumericBuffer::F64(out))
        }
        (NumericKind::Signed, 1) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                out.push(src.read_one()? as i8);
            }
            Ok(NumericBuffer::I8(out))
        }
        (NumericKind::Signed, 2) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(2)?;
                out.push(assemble_unsigned(&bytes) as u16 as i16);
            }
            Ok(NumericBuffer::I16(out))
        }
        (NumericKind::Signed, 4) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(4)?;
                out.push(assemble_unsigned(&bytes) as u32 as i32);
            }
            Ok(NumericBuffer::I32(out))
        }
        (NumericKind::Signed, 8) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(8)?;
                out.push(assemble_unsigned(&bytes) as i64);
            }
            Ok(NumericBuffer::I64(out))
        }
        (NumericKind::Unsigned, 1) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                out.push(src.read_one()?);
            }
            Ok(NumericBuffer::U8(out))
        }
        (NumericKind::Unsigned, 2) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(2)?;
                out.push(assemble_unsigned(&bytes) as u16);
            }
            Ok(NumericBuffer::U16(out))
        }
        (NumericKind::Unsigned, 4) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(4)?;
                out.push(assemble_unsigned(&bytes) as u32);
            }
            Ok(NumericBuffer::U32(out))
        }
        (NumericKind::Unsigned, 8) => {
            let mut out = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let bytes = src.read_exact(8)?;
                out.push(assemble_unsigned(&bytes));
            }
            Ok(NumericBuffer::U64(out))
        }
        _ => Err(BeveError::UnsupportedNumericWidth { offset }),
    }
}
