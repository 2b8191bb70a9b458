//! Error types for the registry.

use star_registry_core::CoreError;
use thiserror::Error;

use crate::validator::ValidationReport;

/// Errors that can occur while appending a block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppendError {
    /// The existing chain failed validation; nothing was appended.
    #[error("chain corrupted, append refused: {0}")]
    ChainCorrupted(ValidationReport),

    /// The body could not be encoded.
    #[error("encoding error: {0}")]
    Encoding(#[from] CoreError),
}

/// Errors that can occur while verifying and registering an ownership claim.
///
/// Every variant is terminal for the request: the chain is left unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerificationError {
    /// The challenge message could not be parsed.
    #[error("malformed message: {0}")]
    MalformedMessage(String),

    /// The challenge window elapsed before submission.
    #[error("challenge expired: {elapsed}s elapsed, window is {window}s")]
    ChallengeExpired { elapsed: u64, window: u64 },

    /// The signature does not verify against the address.
    #[error("signature invalid")]
    SignatureInvalid,

    /// The append itself was refused.
    #[error(transparent)]
    Append(#[from] AppendError),
}

/// Errors surfaced by the registry facade.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Append error.
    #[error("append error: {0}")]
    Append(#[from] AppendError),

    /// Verification error.
    #[error("verification error: {0}")]
    Verification(#[from] VerificationError),

    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
