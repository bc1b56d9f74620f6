//! Error types for the codec, matching the taxonomy in spec §7.

use thiserror::Error;

/// Errors produced by [`crate::encode`] and [`crate::decode`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// `k`, `m`, or `block_bytes` was zero.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),

    /// `k + m > 256`.
    #[error("total block count {total} exceeds 256 (k={k}, m={m})")]
    SizeExceeded { k: usize, m: usize, total: usize },

    /// A required slice was empty or shorter than `block_bytes`.
    #[error("required input `{0}` was missing or too short")]
    NullInput(&'static str),

    /// Two input descriptors shared the same original index, or an index
    /// was out of the valid `[0, k+m)` range.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// `init` was called with a version token this build does not
    /// recognize.
    #[error("version mismatch: requested {requested}, supported {supported}")]
    VersionMismatch { requested: u32, supported: u32 },

    /// Allocation for the decoder's scratch matrix failed.
    #[error("out of memory allocating {0} bytes for decoder scratch")]
    OutOfMemory(usize),
}

impl CodecError {
    /// The stable integer status code from spec §6/§7.
    pub fn status_code(&self) -> i32 {
        match self {
            CodecError::InvalidParameter(_) => -1,
            CodecError::SizeExceeded { .. } => -2,
            CodecError::NullInput(_) => -3,
            CodecError::MalformedInput(_) => -5,
            CodecError::VersionMismatch { .. } => -10,
            CodecError::OutOfMemory(_) => -4,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Status code for a successful call (spec §6).
pub const STATUS_SUCCESS: i32 = 0;
