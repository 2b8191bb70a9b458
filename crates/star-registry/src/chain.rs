//! Chain manager: owner of the block sequence and its only mutator.
//!
//! Reads share an `RwLock` read guard. Appends are serialized by a separate
//! mutex so that validate-then-append runs as one critical section, and the
//! new block becomes visible in a single push under the write guard.

use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use star_registry_core::{Block, BlockBody, GENESIS_HEIGHT};
use tracing::{info, warn};

use crate::clock::Clock;
use crate::error::AppendError;
use crate::validator::{validate_chain, ValidationReport};

/// The in-memory chain.
///
/// Never empty once constructed: the genesis block is appended during
/// initialization. Blocks are never edited or removed.
pub struct ChainManager {
    blocks: RwLock<Vec<Block>>,
    append_lock: Mutex<()>,
    clock: Arc<dyn Clock>,
}

impl ChainManager {
    /// Create a chain holding only a fresh genesis block.
    pub fn new(clock: Arc<dyn Clock>) -> Result<Self, AppendError> {
        Self::restore(Vec::new(), clock)
    }

    /// Rebuild a chain from previously exported blocks.
    ///
    /// The blocks are not validated here; `validate` audits them and
    /// `append` refuses to grow a corrupted chain. An empty list is
    /// initialized with a genesis block.
    pub fn restore(blocks: Vec<Block>, clock: Arc<dyn Clock>) -> Result<Self, AppendError> {
        let chain = Self {
            blocks: RwLock::new(blocks),
            append_lock: Mutex::new(()),
            clock,
        };
        chain.initialize()?;
        Ok(chain)
    }

    /// Append the genesis block if the chain is empty.
    fn initialize(&self) -> Result<(), AppendError> {
        if self.read().is_empty() {
            let genesis = self.append(BlockBody::Genesis)?;
            info!(hash = %genesis.hash, "created genesis block");
        }
        Ok(())
    }

    /// Current tip height.
    pub fn height(&self) -> u64 {
        self.read().len().saturating_sub(1) as u64
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Always false once constructed.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The tip block.
    pub fn tip(&self) -> Option<Block> {
        self.read().last().cloned()
    }

    /// Append a new block carrying `body`.
    ///
    /// The existing chain is validated first; any error refuses the append
    /// with [`AppendError::ChainCorrupted`] and leaves the chain untouched.
    pub fn append(&self, body: BlockBody) -> Result<Block, AppendError> {
        let _guard = self.append_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let (height, previous_block_hash) = {
            let blocks = self.read();
            let report = validate_chain(&blocks);
            if !report.is_valid() {
                warn!(
                    errors = report.len(),
                    corrupted = ?report.corrupted_heights(),
                    "refusing to append to corrupted chain"
                );
                return Err(AppendError::ChainCorrupted(report));
            }
            match blocks.last() {
                Some(tip) => (tip.height + 1, Some(tip.hash)),
                None => (GENESIS_HEIGHT, None),
            }
        };

        let encoded = body.encode()?;
        let block = Block::new(height, self.clock.now(), previous_block_hash, encoded);

        // Only this critical section writes, so the tip read above is
        // still the tip.
        self.write().push(block.clone());

        info!(height = block.height, hash = %block.hash, "appended block");
        Ok(block)
    }

    /// Audit the whole chain.
    pub fn validate(&self) -> ValidationReport {
        validate_chain(&self.read())
    }

    /// Snapshot of every block, for export to a storage collaborator.
    pub fn blocks(&self) -> Vec<Block> {
        self.read().clone()
    }

    /// Run `f` against a consistent view of the chain.
    pub fn with_blocks<R>(&self, f: impl FnOnce(&[Block]) -> R) -> R {
        f(self.read().as_slice())
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Block>> {
        self.blocks.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Block>> {
        self.blocks.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChainManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainManager")
            .field("height", &self.height())
            .finish()
    }
}
