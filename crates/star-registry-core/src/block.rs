//! Block: one sealed entry of the hash chain.
//!
//! A block is immutable once appended. Its hash covers every other field, so
//! any out-of-band change is detectable by recomputing it.

use serde::{Deserialize, Serialize};

use crate::body::{BlockBody, EncodedBody};
use crate::canonical::canonical_block_bytes;
use crate::error::{CoreError, ValidationError};
use crate::types::BlockHash;

/// Height of the genesis block.
pub const GENESIS_HEIGHT: u64 = 0;

/// A block of the chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Zero-based position in the chain.
    pub height: u64,

    /// Append time (Unix seconds).
    pub timestamp: i64,

    /// Hash of the block at `height - 1` (None for genesis).
    pub previous_block_hash: Option<BlockHash>,

    /// The encoded payload.
    pub body: EncodedBody,

    /// Blake3 hash of the canonical encoding of the fields above.
    pub hash: BlockHash,
}

impl Block {
    /// Build a block and seal it with its hash.
    pub fn new(
        height: u64,
        timestamp: i64,
        previous_block_hash: Option<BlockHash>,
        body: EncodedBody,
    ) -> Self {
        let mut block = Self {
            height,
            timestamp,
            previous_block_hash,
            body,
            hash: BlockHash::ZERO,
        };
        block.hash = block.compute_hash();
        block
    }

    /// Build the genesis block.
    pub fn genesis(timestamp: i64) -> Result<Self, CoreError> {
        let body = BlockBody::Genesis.encode()?;
        Ok(Self::new(GENESIS_HEIGHT, timestamp, None, body))
    }

    /// Recompute the hash from `(height, timestamp, previous_block_hash, body)`.
    pub fn compute_hash(&self) -> BlockHash {
        let bytes = canonical_block_bytes(
            self.height,
            self.timestamp,
            self.previous_block_hash.as_ref(),
            &self.body,
        );
        BlockHash::digest(&bytes)
    }

    /// Check that the stored hash matches the recomputed one.
    ///
    /// Linkage to neighbours is not checked here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let computed = self.compute_hash();
        if computed != self.hash {
            return Err(ValidationError::Integrity {
                height: self.height,
                stored: self.hash,
                computed,
            });
        }
        Ok(())
    }

    /// Boolean form of [`Block::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Decode the body into the genesis marker or a star record.
    pub fn decode_body(&self) -> Result<BlockBody, CoreError> {
        self.body.decode()
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.height == GENESIS_HEIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::StarRecord;
    use serde_json::json;

    fn star_body() -> EncodedBody {
        BlockBody::Star(StarRecord::new(
            "addr1",
            "addr1:1700000000:starRegistry",
            "00",
            json!({"name": "Polaris"}),
        ))
        .encode()
        .unwrap()
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        assert_eq!(genesis.height, 0);
        assert!(genesis.previous_block_hash.is_none());
        assert!(genesis.is_genesis());
        assert_eq!(genesis.decode_body().unwrap(), BlockBody::Genesis);
        assert!(genesis.is_valid());
    }

    #[test]
    fn test_hash_deterministic() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let b1 = Block::new(1, 1_700_000_100, Some(genesis.hash), star_body());
        let b2 = Block::new(1, 1_700_000_100, Some(genesis.hash), star_body());
        assert_eq!(b1.hash, b2.hash);
        assert_eq!(b1.compute_hash(), b1.hash);
    }

    #[test]
    fn test_every_field_is_covered() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let base = Block::new(1, 1_700_000_100, Some(genesis.hash), star_body());

        let mut changed = base.clone();
        changed.height = 2;
        assert!(!changed.is_valid());

        let mut changed = base.clone();
        changed.timestamp += 1;
        assert!(!changed.is_valid());

        let mut changed = base.clone();
        changed.previous_block_hash = None;
        assert!(!changed.is_valid());

        let mut changed = base.clone();
        changed.body = BlockBody::Genesis.encode().unwrap();
        assert!(!changed.is_valid());
    }

    #[test]
    fn test_tampered_hash_reports_integrity_error() {
        let mut block = Block::genesis(1_700_000_000).unwrap();
        let original = block.hash;
        block.hash = BlockHash::from_bytes([0xee; 32]);

        match block.validate() {
            Err(ValidationError::Integrity {
                height,
                stored,
                computed,
            }) => {
                assert_eq!(height, 0);
                assert_eq!(stored, BlockHash::from_bytes([0xee; 32]));
                assert_eq!(computed, original);
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_roundtrip_preserves_fields() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let block = Block::new(1, 1_700_000_100, Some(genesis.hash), star_body());
        let json = serde_json::to_string(&block).unwrap();
        let restored: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, restored);
        assert!(restored.is_valid());
    }
}
