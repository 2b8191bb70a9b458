//! The registry: unified API over the chain, queries and ownership checks.
//!
//! `StarRegistry` wires a [`ChainManager`] to an [`OwnershipVerifier`] and
//! exposes the calls a service layer needs. It holds no state of its own
//! beyond the shared chain, so it can be wrapped in an `Arc` and used from
//! any number of threads.

use std::sync::Arc;

use star_registry_core::{Block, BlockHash, Ed25519Verifier, SignatureVerifier, StarRecord};

use crate::chain::ChainManager;
use crate::clock::{Clock, SystemClock};
use crate::config::RegistryConfig;
use crate::error::{Result, VerificationError};
use crate::ownership::OwnershipVerifier;
use crate::validator::ValidationReport;

/// The main registry struct.
///
/// Provides:
/// - Challenge issuance and signed star submission
/// - Lookups by hash, height and owner address
/// - Whole-chain validation
pub struct StarRegistry {
    chain: Arc<ChainManager>,
    ownership: OwnershipVerifier,
    config: RegistryConfig,
}

impl StarRegistry {
    /// Create a registry using wall-clock time and Ed25519 signatures.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        Self::with_parts(config, Arc::new(SystemClock), Arc::new(Ed25519Verifier))
    }

    /// Create a registry with explicit time and signature capabilities.
    pub fn with_parts(
        config: RegistryConfig,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        Self::restore(config, Vec::new(), clock, verifier)
    }

    /// Rebuild a registry from exported blocks.
    ///
    /// The blocks are taken as-is; call [`validate_chain`](Self::validate_chain)
    /// to audit them. Submissions are refused while the chain is invalid.
    pub fn restore(
        config: RegistryConfig,
        blocks: Vec<Block>,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
    ) -> Result<Self> {
        let chain = Arc::new(ChainManager::restore(blocks, Arc::clone(&clock))?);
        let ownership =
            OwnershipVerifier::new(Arc::clone(&chain), clock, verifier, config.clone());
        Ok(Self {
            chain,
            ownership,
            config,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Get the underlying chain.
    pub fn chain(&self) -> &Arc<ChainManager> {
        &self.chain
    }

    /// Current tip height (0 for a genesis-only chain).
    pub fn height(&self) -> u64 {
        self.chain.height()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a challenge message for `address` to sign.
    pub fn request_challenge(&self, address: &str) -> String {
        self.ownership.request_challenge(address)
    }

    /// Seconds left before a challenge message expires.
    pub fn validation_window_remaining(
        &self,
        message: &str,
    ) -> std::result::Result<u64, VerificationError> {
        self.ownership.validation_window_remaining(message)
    }

    /// Submit a signed challenge and register `star` for `address`.
    pub fn submit_star(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: serde_json::Value,
    ) -> std::result::Result<Block, VerificationError> {
        self.ownership.submit(address, message, signature, star)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query
    // ─────────────────────────────────────────────────────────────────────────

    /// Look up a block by its hex hash. Unparsable hex is a miss.
    pub fn get_block_by_hash(&self, hash: &str) -> Option<Block> {
        let hash = BlockHash::from_hex(hash).ok()?;
        self.chain.get_by_hash(&hash)
    }

    /// Look up a block by height.
    pub fn get_block_by_height(&self, height: u64) -> Option<Block> {
        self.chain.get_by_height(height)
    }

    /// Star records registered by `address`, in append order.
    pub fn get_stars_by_address(&self, address: &str) -> Vec<StarRecord> {
        self.chain.get_stars_by_address(address)
    }

    /// The star record stored in the block with the given hex hash.
    pub fn get_star_by_hash(&self, hash: &str) -> Option<StarRecord> {
        let hash = BlockHash::from_hex(hash).ok()?;
        self.chain.get_star_by_hash(&hash)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation and export
    // ─────────────────────────────────────────────────────────────────────────

    /// Audit every block and link.
    pub fn validate_chain(&self) -> ValidationReport {
        self.chain.validate()
    }

    /// Snapshot of all blocks, genesis first.
    pub fn blocks(&self) -> Vec<Block> {
        self.chain.blocks()
    }
}

impl std::fmt::Debug for StarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StarRegistry")
            .field("chain", &self.chain)
            .field("config", &self.config)
            .finish()
    }
}
