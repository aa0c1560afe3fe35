//! The recursive core: consumes one header byte, dispatches on its
//! bit-fields, reads the payload (possibly re-entering itself), and
//! returns a [`Value`].
//!
//! Mirrors the header-byte dispatch in the teacher's
//! `EncodedValue::read_options` (`src/dalvik/dex/encoded_value.rs`):
//! there, `value_type = byte & 0x1F` and `value_size = (byte >> 5) + 1`
//! select among a dozen payload shapes read from the same reader; here,
//! three separate bit-fields (`type`, `sub`, `widx`) do the same job over
//! a richer tag space.

use crate::byte_source::ByteSource;
use crate::compressed_size::read_compressed_size;
use crate::error::{BeveError, Result};
use crate::numeric::{read_numeric_buffer, NumericBuffer, NumericKind};
use crate::options::DecodeOptions;
use crate::value::{Object, ScalarFloat, ScalarInt, ScalarUInt, Value};

/// Width in bytes selected by each value of the 3-bit `widx` header
/// field. Only the first four entries (1, 2, 4, 8) are ever legal for a
/// Number/TypedArray payload; the rest exist only so `widx` can be
/// decoded without a bounds check before the numeric reader rejects it.
pub(crate) const WIDTH_TABLE: [usize; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

fn numeric_kind(sub: u8) -> Option<NumericKind> {
    match sub {
        0 => Some(NumericKind::Float),
        1 => Some(NumericKind::Signed),
        2 => Some(NumericKind::Unsigned),
        // spec §4.4 only defines sub in {0,1,2}; load_beve.py treats 3 as
        // unsigned too, but we deliberately reject it as unmapped instead
        // of guessing past what the spec pins down.
        _ => None,
    }
}

/// Read one [`Value`] from `src`, recursing into itself for nested
/// containers. `depth` is the nesting level of the value about to be
/// read; callers pass 0 for the top-level value.
pub fn read_value(src: &mut dyn ByteSource, opts: &DecodeOptions, depth: usize) -> Result<Value> {
    if depth > opts.max_depth {
        return Err(BeveError::NestingLimitExceeded {
            offset: src.position(),
            max_depth: opts.max_depth,
        });
    }

    let header_offset = src.position();
    let header = src.read_one()?;

    let type_tag = header & 0b111;
    let sub = (header >> 3) & 0b11;
    let widx = (header >> 5) & 0b111;

    match type_tag {
        0 => {
            if header & 0b0000_1000 == 0 {
                Ok(Value::Null)
            } else {
                Ok(Value::Bool(header & 0b0001_0000 != 0))
            }
        }

        1 => {
            let kind = numeric_kind(sub).ok_or(BeveError::UnsupportedNumericWidth {
                offset: header_offset,
            })?;
            let width = WIDTH_TABLE[widx as usize];
            let buf = read_numeric_buffer(src, kind, width, 1)?;
            Ok(scalar_from_buffer(buf))
        }

        2 => read_string(src).map(Value::String),

        3 => match sub {
            0 => read_object(src, opts, depth),
            _ => Err(BeveError::UnsupportedObjectKey {
                offset: header_offset,
            }),
        },

        4 => read_typed_array(src, sub, widx, header, header_offset),

        5 => read_untyped_array(src, opts, depth),

        6 => {
            let code = header >> 3;
            crate::extension::read_extension(src, code, opts, depth, header_offset)
        }

        _ => Err(BeveError::UnknownType {
            offset: header_offset,
        }),
    }
}

fn scalar_from_buffer(buf: NumericBuffer) -> Value {
    match buf {
        NumericBuffer::F32(v) => Value::Float(ScalarFloat::F32(v[0])),
        NumericBuffer::F64(v) => Value::Float(ScalarFloat::F64(v[0])),
        NumericBuffer::I8(v) => Value::Int(ScalarInt::I8(v[0])),
        NumericBuffer::I16(v) => Value::Int(ScalarInt::I16(v[0])),
        NumericBuffer::I32(v) => Value::Int(ScalarInt::I32(v[0])),
        NumericBuffer::I64(v) => Value::Int(ScalarInt::I64(v[0])),
        NumericBuffer::U8(v) => Value::UInt(ScalarUInt::U8(v[0])),
        NumericBuffer::U16(v) => Value::UInt(ScalarUInt::U16(v[0])),
        NumericBuffer::U32(v) => Value::UInt(ScalarUInt::U32(v[0])),
        NumericBuffer::U64(v) => Value::UInt(ScalarUInt::U64(v[0])),
    }
}

fn read_string(src: &mut dyn ByteSource) -> Result<String> {
    let n = read_compressed_size(src)?;
    let offset = src.position();
    let bytes = src.read_exact(n as usize)?;
    String::from_utf8(bytes).map_err(|_| BeveError::InvalidUtf8 { offset })
}

fn read_object(src: &mut dyn ByteSource, opts: &DecodeOptions, depth: usize) -> Result<Value> {
    let n = read_compressed_size(src)?;
    let mut obj = Object::with_capacity(n as usize);
    for _ in 0..n {
        let key = read_string(src)?;
        let value = read_value(src, opts, depth + 1)?;
        obj.push(key, value);
    }
    Ok(Value::Object(obj))
}

fn read_untyped_array(src: &mut dyn ByteSource, opts: &DecodeOptions, depth: usize) -> Result<Value> {
    let n = read_compressed_size(src)?;
    let mut values = Vec::with_capacity(n as usize);
    for _ in 0..n {
        values.push(read_value(src, opts, depth + 1)?);
    }
    Ok(Value::Array(values))
}

fn read_typed_array(
    src: &mut dyn ByteSource,
    sub: u8,
    widx: u8,
    header: u8,
    header_offset: u64,
) -> Result<Value> {
    match sub {
        0 | 1 | 2 => {
            let kind = numeric_kind(sub).expect("sub in {0,1,2} always maps to a NumericKind");
            let width = WIDTH_TABLE[widx as usize];
            let n = read_compressed_size(src)?;
            let buf = read_numeric_buffer(src, kind, width, n)?;
            Ok(Value::TypedArray(buf))
        }
        3 => {
            let strflag = (header >> 5) & 1;
            if strflag == 1 {
                let n = read_compressed_size(src)?;
                let mut strings = Vec::with_capacity(n as usize);
                for _ in 0..n {
                    strings.push(read_string(src)?);
                }
                Ok(Value::StringArray(strings))
            } else {
                Err(BeveError::UnsupportedBoolArray {
                    offset: header_offset,
                })
            }
        }
        _ => unreachable!("sub is a 2-bit field, always in 0..=3"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byte_source::SliceSource;
    use crate::value::{ScalarUInt, Value};

    fn decode(bytes: &[u8]) -> (Value, u64) {
        let opts = DecodeOptions::default();
        let mut src = SliceSource::new(bytes);
        let value = read_value(&mut src, &opts, 0).unwrap();
        (value, src.position())
    }

    #[test]
    fn null_scenario() {
        let (v, consumed) = decode(&[0x00]);
        assert_eq!(v, Value::Null);
        assert_eq!(consumed, 1);
    }

    #[test]
    fn true_scenario() {
        let (v, consumed) = decode(&[0x18]);
        assert_eq!(v, Value::Bool(true));
        assert_eq!(consumed, 1);
    }

    #[test]
    fn false_is_distinct_from_null() {
        let (v, _) = decode(&[0x08]);
        assert_eq!(v, Value::Bool(false));
    }

    #[test]
    fn uint32_scenario() {
        let (v, consumed) = decode(&[0x51, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(v, Value::UInt(ScalarUInt::U32(0x01020304)));
        assert_eq!(consumed, 5);
    }

    #[test]
    fn string_hi_scenario() {
        let (v, consumed) = decode(&[0x02, 0x08, b'h', b'i']);
        assert_eq!(v, Value::String("hi".to_string()));
        assert_eq!(consumed, 4);
    }

    #[test]
    fn empty_string_scenario() {
        let (v, consumed) = decode(&[0x02, 0x00]);
        assert_eq!(v, Value::String(String::new()));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn object_with_one_entry_scenario() {
        let (v, consumed) = decode(&[0x03, 0x04, 0x04, b'a', 0x00]);
        match v {
            Value::Object(obj) => {
                assert_eq!(obj.len(), 1);
                assert_eq!(obj.get("a"), Some(&Value::Null));
            }
            other => panic!("expected object, got {other:?}"),
        }
        assert_eq!(consumed, 5);
    }

    #[test]
    fn empty_object_and_array() {
        let (v, _) = decode(&[0x03, 0x00]);
        assert_eq!(v, Value::Object(Object::new()));
        let (v, _) = decode(&[0x05, 0x00]);
        assert_eq!(v, Value::Array(Vec::new()));
    }

    #[test]
    fn float32_typed_array_scenario() {
        let mut bytes = vec![0x44, 0x08];
        bytes.extend_from_slice(&1.0f32.to_le_bytes());
        bytes.extend_from_slice(&2.0f32.to_le_bytes());
        let (v, consumed) = decode(&bytes);
        match v {
            Value::TypedArray(NumericBuffer::F32(items)) => {
                assert_eq!(items, vec![1.0, 2.0]);
            }
            other => panic!("expected f32 typed array, got {other:?}"),
        }
        assert_eq!(consumed, 10);
    }

    #[test]
    fn string_array_scenario() {
        // type=4, sub=3 (bool-or-string), widx's low bit (strflag) set = 1
        let header = (1u8 << 5) | (3u8 << 3) | 4u8;
        let mut bytes = vec![header, 0x08]; // 2 strings
        bytes.push(0x08);
        bytes.extend_from_slice(b"hi");
        bytes.push(0x0C);
        bytes.extend_from_slice(b"bye");
        let (v, _) = decode(&bytes);
        assert_eq!(
            v,
            Value::StringArray(vec!["hi".to_string(), "bye".to_string()])
        );
    }

    #[test]
    fn packed_bool_array_is_unsupported() {
        let header = (3u8 << 3) | 4u8; // type=4, sub=3, strflag (widx low bit) = 0
        let mut src = SliceSource::new(&[header]);
        let err = read_value(&mut src, &DecodeOptions::default(), 0).unwrap_err();
        assert!(matches!(err, BeveError::UnsupportedBoolArray { .. }));
    }

    #[test]
    fn integer_object_keys_are_unsupported() {
        let header = 0b0000_1_011u8; // type=3, sub=1 (signed keys)
        let mut src = SliceSource::new(&[header]);
        let err = read_value(&mut src, &DecodeOptions::default(), 0).unwrap_err();
        assert!(matches!(err, BeveError::UnsupportedObjectKey { .. }));
    }

    #[test]
    fn reserved_type_tag_fails() {
        let mut src = SliceSource::new(&[0b0000_0111]);
        let err = read_value(&mut src, &DecodeOptions::default(), 0).unwrap_err();
        assert!(matches!(err, BeveError::UnknownType { .. }));
    }

    #[test]
    fn truncated_number_fails_with_position() {
        let mut src = SliceSource::new(&[0x51, 0x04, 0x03]); // needs 4 bytes, only 2 given
        let err = read_value(&mut src, &DecodeOptions::default(), 0).unwrap_err();
        assert!(matches!(err, BeveError::UnexpectedEndOfInput { .. }));
    }

    #[test]
    fn invalid_utf8_string_body_fails() {
        let mut src = SliceSource::new(&[0x02, 0x04, 0xFF]);
        let err = read_value(&mut src, &DecodeOptions::default(), 0).unwrap_err();
        assert!(matches!(err, BeveError::InvalidUtf8 { .. }));
    }

    #[test]
    fn nesting_limit_is_enforced() {
        let opts = DecodeOptions { max_depth: 1 };
        // array -> array -> array: depths 0 and 1 are within the limit,
        // the third (depth 2) exceeds max_depth=1.
        let bytes = [0x05, 0x04, 0x05, 0x04, 0x05, 0x00];
        let mut src = SliceSource::new(&bytes);
        let err = read_value(&mut src, &opts, 0).unwrap_err();
        assert!(matches!(err, BeveError::NestingLimitExceeded { .. }));
    }
}
