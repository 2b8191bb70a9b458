//! # Star Registry Core
//!
//! Pure primitives for the Star Registry: blocks, block bodies, canonical
//! encoding, and the hashing and signature capabilities the ledger relies on.
//!
//! This crate contains no I/O, no locking, no clock. It is pure computation
//! over tamper-evident data structures.
//!
//! ## Key Types
//!
//! - [`Block`] - One sealed entry of the hash chain
//! - [`BlockHash`] - 32-byte Blake3 digest identifying a block
//! - [`BlockBody`] - The decoded payload: genesis marker or star record
//! - [`EncodedBody`] - The opaque, hex-encoded body stored in a block
//! - [`StarRecord`] - An ownership claim `{address, message, signature, star}`
//!
//! ## Canonicalization
//!
//! Block hashes are computed over deterministic CBOR. See [`canonical`] module.

pub mod block;
pub mod body;
pub mod canonical;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validation;

pub use block::{Block, GENESIS_HEIGHT};
pub use body::{BlockBody, EncodedBody, StarRecord, GENESIS_MARKER};
pub use canonical::canonical_block_bytes;
pub use crypto::{Ed25519Verifier, SignatureVerifier, WalletKeypair};
pub use error::{CoreError, ValidationError};
pub use types::BlockHash;
pub use validation::{check_height, check_linkage, validate_block};
