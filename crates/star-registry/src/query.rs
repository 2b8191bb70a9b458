//! Read-only lookups over the chain.
//!
//! Absence is a normal result (`None` or an empty vector), never an error.

use star_registry_core::{Block, BlockBody, BlockHash, StarRecord};
use tracing::warn;

use crate::chain::ChainManager;

/// First block (by height) whose hash equals `hash`.
pub fn block_by_hash<'a>(blocks: &'a [Block], hash: &BlockHash) -> Option<&'a Block> {
    blocks.iter().find(|b| &b.hash == hash)
}

/// Block at `height`, if the chain is that tall.
pub fn block_by_height(blocks: &[Block], height: u64) -> Option<&Block> {
    usize::try_from(height).ok().and_then(|h| blocks.get(h))
}

/// Star records registered by `address`, in height order.
///
/// Bodies that fail to decode are skipped; reporting corruption is the
/// validator's job.
pub fn stars_by_address(blocks: &[Block], address: &str) -> Vec<StarRecord> {
    blocks
        .iter()
        .filter(|b| !b.is_genesis())
        .filter_map(|b| match b.decode_body() {
            Ok(BlockBody::Star(record)) if record.address == address => Some(record),
            Ok(_) => None,
            Err(e) => {
                warn!(height = b.height, error = %e, "skipping undecodable block body");
                None
            }
        })
        .collect()
}

/// The star record stored in the block with `hash`, if any.
pub fn star_by_hash(blocks: &[Block], hash: &BlockHash) -> Option<StarRecord> {
    block_by_hash(blocks, hash)?.decode_body().ok()?.into_star()
}

impl ChainManager {
    /// Look up a block by hash.
    pub fn get_by_hash(&self, hash: &BlockHash) -> Option<Block> {
        self.with_blocks(|blocks| block_by_hash(blocks, hash).cloned())
    }

    /// Look up a block by height.
    pub fn get_by_height(&self, height: u64) -> Option<Block> {
        self.with_blocks(|blocks| block_by_height(blocks, height).cloned())
    }

    /// Star records registered by `address`, in append order.
    pub fn get_stars_by_address(&self, address: &str) -> Vec<StarRecord> {
        self.with_blocks(|blocks| stars_by_address(blocks, address))
    }

    /// The star record stored in the block with `hash`.
    pub fn get_star_by_hash(&self, hash: &BlockHash) -> Option<StarRecord> {
        self.with_blocks(|blocks| star_by_hash(blocks, hash))
    }
}
