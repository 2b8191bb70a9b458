//! Block validation: self-integrity, position, and linkage checks.
//!
//! Each check looks at one block (and at most its predecessor). Walking a
//! whole chain and collecting a report is the registry's job.

use crate::block::Block;
use crate::error::ValidationError;

/// Validate a block's self-integrity (stored hash == recomputed hash).
pub fn validate_block(block: &Block) -> Result<(), ValidationError> {
    block.validate()
}

/// Check that a block sits at the position it claims.
pub fn check_height(index: u64, block: &Block) -> Result<(), ValidationError> {
    if block.height != index {
        return Err(ValidationError::HeightMismatch {
            index,
            found: block.height,
        });
    }
    Ok(())
}

/// Check a block's previous-hash pointer against its predecessor.
///
/// `previous` is `None` only for the block at index 0, which must not carry
/// a previous hash.
pub fn check_linkage(
    index: u64,
    previous: Option<&Block>,
    block: &Block,
) -> Result<(), ValidationError> {
    let expected = previous.map(|p| p.hash);
    if block.previous_block_hash != expected {
        return Err(ValidationError::Linkage {
            height: index,
            expected,
            found: block.previous_block_hash,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BlockBody, StarRecord};
    use crate::types::BlockHash;
    use serde_json::json;

    fn next_block(prev: &Block) -> Block {
        let body = BlockBody::Star(StarRecord::new(
            "addr1",
            "addr1:1700000000:starRegistry",
            "00",
            json!({"name": "Vega"}),
        ))
        .encode()
        .unwrap();
        Block::new(prev.height + 1, prev.timestamp + 10, Some(prev.hash), body)
    }

    #[test]
    fn test_valid_pair() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let block = next_block(&genesis);

        assert!(validate_block(&genesis).is_ok());
        assert!(validate_block(&block).is_ok());
        assert!(check_height(0, &genesis).is_ok());
        assert!(check_height(1, &block).is_ok());
        assert!(check_linkage(0, None, &genesis).is_ok());
        assert!(check_linkage(1, Some(&genesis), &block).is_ok());
    }

    #[test]
    fn test_broken_pointer() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let mut block = next_block(&genesis);
        block.previous_block_hash = Some(BlockHash::from_bytes([0x01; 32]));

        let err = check_linkage(1, Some(&genesis), &block).unwrap_err();
        assert!(err.is_linkage());
        assert_eq!(err.height(), 1);
    }

    #[test]
    fn test_genesis_with_previous_hash() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let mut fake = genesis.clone();
        fake.previous_block_hash = Some(genesis.hash);

        assert!(matches!(
            check_linkage(0, None, &fake),
            Err(ValidationError::Linkage { height: 0, expected: None, .. })
        ));
    }

    #[test]
    fn test_height_mismatch() {
        let genesis = Block::genesis(1_700_000_000).unwrap();
        let block = next_block(&genesis);

        assert_eq!(
            check_height(2, &block),
            Err(ValidationError::HeightMismatch { index: 2, found: 1 })
        );
    }
}
