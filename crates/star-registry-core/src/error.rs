//! Error types for the Star Registry Core.

use thiserror::Error;

use crate::types::BlockHash;

/// Core errors that can occur while encoding, decoding, or verifying data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid signature")]
    InvalidSignature,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid hash: {0}")]
    InvalidHash(String),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Validation errors found while auditing blocks.
///
/// These are reported values, never panics. The chain validator collects
/// them into a report; a single block check returns the first one it finds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The stored hash does not match the recomputed hash.
    #[error("integrity error at height {height}: stored hash {stored}, computed {computed}")]
    Integrity {
        height: u64,
        stored: BlockHash,
        computed: BlockHash,
    },

    /// The previous-hash pointer does not match the predecessor's hash.
    #[error("linkage error at height {height}: expected previous hash {expected:?}, found {found:?}")]
    Linkage {
        height: u64,
        expected: Option<BlockHash>,
        found: Option<BlockHash>,
    },

    /// The block's height field disagrees with its position in the chain.
    #[error("height mismatch at index {index}: block claims height {found}")]
    HeightMismatch { index: u64, found: u64 },
}

impl ValidationError {
    /// The chain position this error was reported for.
    pub fn height(&self) -> u64 {
        match self {
            ValidationError::Integrity { height, .. } | ValidationError::Linkage { height, .. } => {
                *height
            }
            ValidationError::HeightMismatch { index, .. } => *index,
        }
    }

    /// Whether this is a self-integrity (hash mismatch) error.
    pub fn is_integrity(&self) -> bool {
        matches!(self, ValidationError::Integrity { .. })
    }

    /// Whether this is a linkage (previous-hash pointer) error.
    pub fn is_linkage(&self) -> bool {
        matches!(self, ValidationError::Linkage { .. })
    }
}
