//! The decoded value tree.
//!
//! Mirrors the shape of the teacher's `DexValue` (`src/dalvik/file/value.rs`):
//! a tagged sum built bottom-up from already-decoded components, owned
//! outright by the tree once construction finishes. Unlike `DexValue`,
//! nothing here is a lazy index into a backing file — every BEVE value is
//! produced and owned in a single top-to-bottom pass (§3 "Lifecycle").

use crate::numeric::NumericBuffer;

/// A signed integer of one of the widths the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarInt {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
}

/// An unsigned integer of one of the widths the format allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarUInt {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

/// An IEEE-754 float of one of the widths the format allows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarFloat {
    F32(f32),
    F64(f64),
}

/// A single complex scalar. Floating-point components are the common
/// case; integer components are accepted here because the writer may
/// emit them for a scalar (§4.5 "Complex sub-parser"), even though the
/// array form restricts itself to float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComplexScalar {
    F32(f32, f32),
    F64(f64, f64),
    I8(i8, i8),
    I16(i16, i16),
    I32(i32, i32),
    I64(i64, i64),
    U8(u8, u8),
    U16(u16, u16),
    U32(u32, u32),
    U64(u64, u64),
}

/// A homogeneous run of complex numbers. Only float components are
/// defined for the array form (§4.5).
#[derive(Debug, Clone, PartialEq)]
pub enum ComplexArrayBuffer {
    F32 { re: Vec<f32>, im: Vec<f32> },
    F64 { re: Vec<f64>, im: Vec<f64> },
}

impl ComplexArrayBuffer {
    pub fn len(&self) -> usize {
        match self {
            ComplexArrayBuffer::F32 { re, .. } => re.len(),
            ComplexArrayBuffer::F64 { re, .. } => re.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A two-dimensional numeric buffer with extents and a layout flag.
///
/// `column_major` is always `true`: row-major matrices are rejected by
/// the reader before a `Matrix` value is ever constructed
/// (`UnsupportedMatrixLayout`), but the flag is kept on the value itself
/// because the wire format carries it and a future writer-side layout
/// could in principle add the other case.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub column_major: bool,
    pub data: NumericBuffer,
}

/// An ordered `string -> Value` mapping that preserves insertion order
/// and does not enforce key uniqueness (§3 invariants, §9 duplicate-key
/// open question — see DESIGN.md for the resolution). Lookups return the
/// first match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Object {
    entries: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Object { entries: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Object {
            entries: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, key: String, value: Value) {
        self.entries.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.entries.iter()
    }
}

/// The decoded in-memory tree produced by the decoder (§3).
///
/// Every value is produced by exactly one header byte plus its payload,
/// and once returned the tree is immutable — the decoder never mutates a
/// `Value` after constructing it and retains no references into it.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(ScalarInt),
    UInt(ScalarUInt),
    Float(ScalarFloat),
    String(String),
    Object(Object),
    Array(Vec<Value>),
    TypedArray(NumericBuffer),
    StringArray(Vec<String>),
    Matrix(Matrix),
    Complex(ComplexScalar),
    ComplexArray(ComplexArrayBuffer),
}

impl Value {
    /// A short, stable name for the active variant — handy for error
    /// messages and the `beve-dump` pretty-printer.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::UInt(_) => "uint",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::TypedArray(_) => "typed_array",
            Value::StringArray(_) => "string_array",
            Value::Matrix(_) => "matrix",
            Value::Complex(_) => "complex",
            Value::ComplexArray(_) => "complex_array",
        }
    }
}
