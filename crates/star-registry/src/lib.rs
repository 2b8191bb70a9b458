//! # Star Registry
//!
//! An in-memory, tamper-evident ledger of star ownership claims.
//!
//! ## Overview
//!
//! A wallet proves control of an address by signing a time-limited
//! challenge. Each verified claim becomes a block in an append-only,
//! hash-linked chain:
//!
//! - **Blocks**: Immutable. The hash covers height, timestamp, previous hash
//!   and body, so any edit is detectable.
//! - **Chain**: Dense heights from 0 (genesis). Appends are serialized and
//!   refused while the existing chain fails validation.
//! - **Challenges**: `<address>:<issued_at>:starRegistry`, valid for 300
//!   seconds by default.
//! - **Queries**: By hash, by height, and by owner address.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use star_registry::{RegistryConfig, StarRegistry};
//! use star_registry::core::WalletKeypair;
//!
//! let registry = StarRegistry::new(RegistryConfig::default()).unwrap();
//! let wallet = WalletKeypair::generate();
//!
//! let address = wallet.address();
//! let message = registry.request_challenge(&address);
//! let signature = wallet.sign(&message);
//!
//! let block = registry
//!     .submit_star(&address, &message, &signature, serde_json::json!({ "ra": "16h 29m 1.0s" }))
//!     .unwrap();
//! assert_eq!(block.height, 1);
//! ```
//!
//! ## Re-exports
//!
//! - `star_registry::core` - Core primitives (Block, BlockHash, StarRecord, etc.)

pub mod chain;
pub mod clock;
pub mod config;
pub mod error;
pub mod ownership;
pub mod query;
pub mod registry;
pub mod validator;

// Re-export component crates
pub use star_registry_core as core;

// Re-export main types for convenience
pub use chain::ChainManager;
pub use clock::{Clock, SystemClock};
pub use config::{RegistryConfig, DEFAULT_CHALLENGE_SUFFIX, DEFAULT_VALIDATION_WINDOW_SECS};
pub use error::{AppendError, RegistryError, Result, VerificationError};
pub use ownership::{parse_challenge, Challenge, OwnershipVerifier};
pub use registry::StarRegistry;
pub use validator::{validate_chain, ValidationReport};

// Re-export commonly used core types
pub use star_registry_core::{
    Block, BlockBody, BlockHash, Ed25519Verifier, SignatureVerifier, StarRecord, ValidationError,
    WalletKeypair,
};
