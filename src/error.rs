use thiserror::Error;

/// Errors raised while decoding a BEVE document.
///
/// Every variant carries the byte offset at which the problem was
/// detected (see [`crate::byte_source::ByteSource::position`]), so a
/// caller can point a user at the exact spot in the file.
#[derive(Error)]
pub enum BeveError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEndOfInput { offset: u64 },

    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: u64 },

    #[error("unsupported numeric width/kind combination at offset {offset}")]
    UnsupportedNumericWidth { offset: u64 },

    #[error("unsupported object key kind at offset {offset} (only string keys are implemented)")]
    UnsupportedObjectKey { offset: u64 },

    #[error("packed boolean arrays are not implemented, at offset {offset}")]
    UnsupportedBoolArray { offset: u64 },

    #[error("row-major matrices are not implemented, at offset {offset}")]
    UnsupportedMatrixLayout { offset: u64 },

    #[error("unsupported complex value type at offset {offset}")]
    UnsupportedComplexType { offset: u64 },

    #[error("complex arrays with integer components are not implemented, at offset {offset}")]
    UnsupportedComplexInteger { offset: u64 },

    #[error("unsupported extension code {code} at offset {offset}")]
    UnsupportedExtension { code: u8, offset: u64 },

    #[error("reserved/unknown type tag at offset {offset}")]
    UnknownType { offset: u64 },

    #[error("nesting limit exceeded at offset {offset} (max_depth={max_depth})")]
    NestingLimitExceeded { offset: u64, max_depth: usize },

    #[error("matrix shape mismatch at offset {offset}: {detail}")]
    MatrixShapeMismatch { offset: u64, detail: String },

    #[error("failed to open input: {0}")]
    Io(#[from] std::io::Error),
}

impl BeveError {
    /// The byte offset at which this error was detected.
    pub fn offset(&self) -> u64 {
        match self {
            BeveError::UnexpectedEndOfInput { offset }
            | BeveError::InvalidUtf8 { offset }
            | BeveError::UnsupportedNumericWidth { offset }
            | BeveError::UnsupportedObjectKey { offset }
            | BeveError::UnsupportedBoolArray { offset }
            | BeveError::UnsupportedMatrixLayout { offset }
            | BeveError::UnsupportedComplexType { offset }
            | BeveError::UnsupportedComplexInteger { offset }
            | BeveError::UnsupportedExtension { offset, .. }
            | BeveError::UnknownType { offset }
            | BeveError::NestingLimitExceeded { offset, .. }
            | BeveError::MatrixShapeMismatch { offset, .. } => *offset,
            BeveError::Io(_) => 0,
        }
    }
}

impl std::fmt::Debug for BeveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

pub type Result<T> = std::result::Result<T, BeveError>;
