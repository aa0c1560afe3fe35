//! Decoder tunables.
//!
//! Grounded on the teacher's habit of exposing a small options/preset
//! type for a knob that affects decoding (`verifier::VerifyPreset` in
//! `src/file/verifier.rs`) rather than reaching for global state.

/// The only tunable the decoder needs: how deep a value tree may nest
/// before decoding gives up (§5 "Memory").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum nesting depth of containers (Object/Array/TypedArray
    /// payload recursion/Extension). Recommended limit is at least 1024
    /// nesting levels before failing `NestingLimitExceeded`.
    pub max_depth: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { max_depth: 1024 }
    }
}
