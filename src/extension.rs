//! Sub-dispatch for the extension family (type = 6): variants, matrices,
//! and complex scalars/arrays.
//!
//! Mirrors the way the teacher's `EncodedValue::read_options` delegates
//! to a nested reader for its own compound payloads (`EncodedArray::read`,
//! `EncodedAnnotation::read`) instead of inlining their formats.

use crate::byte_source::ByteSource;
use crate::error::{BeveError, Result};
use crate::numeric::{read_numeric_buffer, NumericBuffer, NumericKind};
use crate::options::DecodeOptions;
use crate::reader::{read_value, WIDTH_TABLE};
use crate::value::{ComplexArrayBuffer, ComplexScalar, Matrix, Value};

/// Dispatch on the 5-bit extension code drawn from header bits `7:3`.
pub fn read_extension(
    src: &mut dyn ByteSource,
    code: u8,
    opts: &DecodeOptions,
    depth: usize,
    header_offset: u64,
) -> Result<Value> {
    match code {
        1 => read_variant(src, opts, depth),
        2 => read_matrix(src, opts, depth, header_offset),
        3 => read_complex(src, header_offset),
        _ => Err(BeveError::UnsupportedExtension {
            code,
            offset: header_offset,
        }),
    }
}

/// Extension code 1: a value wrapped with an external variant tag/index.
/// The tag is read only to stay in sync with the stream; the decoder
/// discards it (see DESIGN.md for the Open Question this resolves).
fn read_variant(src: &mut dyn ByteSource, opts: &DecodeOptions, depth: usize) -> Result<Value> {
    let _tag = crate::compressed_size::read_compressed_size(src)?;
    read_value(src, opts, depth + 1)
}

/// Extension code 2: a column-major matrix. Row-major matrices are a
/// reserved, unimplemented wire shape (§4.5).
fn read_matrix(
    src: &mut dyn ByteSource,
    opts: &DecodeOptions,
    depth: usize,
    header_offset: u64,
) -> Result<Value> {
    let layout_byte = src.read_one()?;
    if layout_byte & 1 == 0 {
        return Err(BeveError::UnsupportedMatrixLayout {
            offset: header_offset,
        });
    }

    let extents_value = read_value(src, opts, depth + 1)?;
    let extents_buf = match extents_value {
        Value::TypedArray(buf) => buf,
        other => {
            return Err(BeveError::MatrixShapeMismatch {
                offset: header_offset,
                detail: format!(
                    "matrix extents must be a typed array, got {}",
                    other.type_name()
                ),
            })
        }
    };
    let extents = extents_buf.as_usize_vec().ok_or_else(|| BeveError::MatrixShapeMismatch {
        offset: header_offset,
        detail: "matrix extents typed array must hold integers, not floats".to_string(),
    })?;
    if extents.len() != 2 {
        return Err(BeveError::MatrixShapeMismatch {
            offset: header_offset,
            detail: format!("expected exactly 2 extents, got {}", extents.len()),
        });
    }
    let (rows, cols) = (extents[0], extents[1]);

    let data_value = read_value(src, opts, depth + 1)?;
    let data_buf = match data_value {
        Value::TypedArray(buf) => buf,
        other => {
            return Err(BeveError::MatrixShapeMismatch {
                offset: header_offset,
                detail: format!(
                    "matrix data must be a typed array, got {}",
                    other.type_name()
                ),
            })
        }
    };
    let expected_len = rows.checked_mul(cols).ok_or_else(|| BeveError::MatrixShapeMismatch {
        offset: header_offset,
        detail: format!("extents {rows} x {cols} overflow"),
    })?;
    if data_buf.len() != expected_len {
        return Err(BeveError::MatrixShapeMismatch {
            offset: header_offset,
            detail: format!(
                "matrix data length {} does not equal rows*cols ({})",
                data_buf.len(),
                expected_len
            ),
        });
    }

    Ok(Value::Matrix(Matrix {
        rows,
        cols,
        column_major: true,
        data: data_buf,
    }))
}

/// Extension code 3: complex scalar or complex array. Reads one header
/// byte with the same bit layout as a Number header (§4.5).
fn read_complex(src: &mut dyn ByteSource, _outer_offset: u64) -> Result<Value> {
    let header_offset = src.position();
    let header = src.read_one()?;
    let kind_tag = header & 0b111;
    let sub = (header >> 3) & 0b11;
    let widx = (header >> 5) & 0b111;
    let width = WIDTH_TABLE[widx as usize];

    let kind = match sub {
        0 => NumericKind::Float,
        1 => NumericKind::Signed,
        2 => NumericKind::Unsigned,
        _ => {
            return Err(BeveError::UnsupportedComplexType {
                offset: header_offset,
            })
        }
    };

    match kind_tag {
        0 => {
            let buf = read_numeric_buffer(src, kind, width, 2)?;
            let scalar = match buf {
                NumericBuffer::F32(v) => ComplexScalar::F32(v[0], v[1]),
                NumericBuffer::F64(v) => ComplexScalar::F64(v[0], v[1]),
                NumericBuffer::I8(v) => ComplexScalar::I8(v[0], v[1]),
                NumericBuffer::I16(v) => ComplexScalar::I16(v[0], v[1]),
                NumericBuffer::I32(v) => ComplexScalar::I32(v[0], v[1]),
                NumericBuffer::I64(v) => ComplexScalar::I64(v[0], v[1]),
                NumericBuffer::U8(v) => ComplexScalar::U8(v[0], v[1]),
                NumericBuffer::U16(v) => ComplexScalar::U16(v[0], v[1]),
                NumericBuffer::U32(v) => ComplexScalar::U32(v[0], v[1]),
                NumericBuffer::U64(v) => ComplexScalar::U64(v[0], v[1]),
            };
            Ok(Value::Complex(scalar))
        }
        1 => {
            if kind != NumericKind::Float {
                return Err(BeveError::UnsupportedComplexInteger {
                    offset: header_offset,
                });
            }
            let n = crate::compressed_size::read_compressed_size(src)?;
            let flat = read_numeric_buffer(src, kind, width, n * 2)?;
            match flat {
                NumericBuffer::F32(flat) => {
                    let mut re = Vec::with_capacity(n as usize);
                    let mut im = Vec::with_capacity(n as usize);
                    for pair in flat.chunks_exact(2) {
                        re.push(pair[0]);
                        im.push(pair[1]);
                    }
                    Ok(Value::ComplexArray(ComplexArrayBuffer::F32 { re, im }))
                }
                NumericBuffer::F64(flat) => {
                    let mut re = Vec::with_capacity(n as usize);
                    let mut im = Vec::with_capacity(n as usize);
                    for pair in flat.chunks_exact(2) {
                        re.push(pair[0]);
                        im.push(pair[1]);
                    }
                    Ok(Value::ComplexArray(ComplexArrayBuffer::F64 { re, im }))
                }
                _ => unreachable!("kind == Float guarantees an F32 or F64 buffer"),
            }
        }
        _ => Err(BeveError::UnsupportedComplexType {
            offset: header_offset,
        }),
    }
}
