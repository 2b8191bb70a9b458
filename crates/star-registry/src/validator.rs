//! Chain validator: full-chain audit.
//!
//! The validator never stops at the first problem. Every corrupted block and
//! every broken link ends up in the [`ValidationReport`].

use std::fmt;

use star_registry_core::{check_height, check_linkage, validate_block, Block, ValidationError};

/// The outcome of auditing a chain. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Create a report from collected errors.
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// Check if the audited chain is valid.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The errors, in chain order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Same as [`ValidationReport::is_valid`].
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterate over the errors.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Heights of blocks that failed the self-integrity check.
    pub fn corrupted_heights(&self) -> Vec<u64> {
        self.errors
            .iter()
            .filter(|e| e.is_integrity())
            .map(ValidationError::height)
            .collect()
    }

    /// Consume into the error list.
    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            return write!(f, "chain is valid");
        }
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

/// Audit every block of a chain.
///
/// For each index `i`: the block must sit at height `i`, its stored hash must
/// match the recomputed one, and its previous-hash pointer must equal the hash
/// of block `i - 1` (or be absent at `i == 0`).
pub fn validate_chain(blocks: &[Block]) -> ValidationReport {
    let mut errors = Vec::new();

    for (i, block) in blocks.iter().enumerate() {
        let index = i as u64;

        if let Err(e) = check_height(index, block) {
            errors.push(e);
        }

        match validate_block(block) {
            Ok(()) => {}
            Err(ValidationError::Integrity {
                stored, computed, ..
            }) => errors.push(ValidationError::Integrity {
                height: index,
                stored,
                computed,
            }),
            Err(e) => errors.push(e),
        }

        let previous = i.checked_sub(1).map(|p| &blocks[p]);
        if let Err(e) = check_linkage(index, previous, block) {
            errors.push(e);
        }
    }

    ValidationReport::new(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use star_registry_core::{BlockBody, BlockHash, StarRecord};

    fn build_chain(len: usize) -> Vec<Block> {
        let mut blocks = vec![Block::genesis(1_700_000_000).unwrap()];
        for i in 1..len {
            let prev = &blocks[i - 1];
            let body = BlockBody::Star(StarRecord::new(
                "addr1",
                "addr1:1700000000:starRegistry",
                "00",
                json!({"name": format!("star-{}", i)}),
            ))
            .encode()
            .unwrap();
            let block = Block::new(i as u64, prev.timestamp + 1, Some(prev.hash), body);
            blocks.push(block);
        }
        blocks
    }

    #[test]
    fn test_untampered_chain_is_valid() {
        let report = validate_chain(&build_chain(5));
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "chain is valid");
    }

    #[test]
    fn test_empty_chain_is_valid() {
        assert!(validate_chain(&[]).is_valid());
    }

    #[test]
    fn test_tampered_hash_reports_integrity_and_next_linkage() {
        let mut blocks = build_chain(4);
        blocks[2].hash = BlockHash::from_bytes([0xee; 32]);

        let report = validate_chain(&blocks);
        assert_eq!(report.corrupted_heights(), vec![2]);
        // Block 3 still points at the original hash of block 2.
        assert!(report
            .iter()
            .any(|e| matches!(e, ValidationError::Linkage { height: 3, .. })));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn test_collects_every_error() {
        let mut blocks = build_chain(6);
        blocks[1].hash = BlockHash::from_bytes([0x01; 32]);
        blocks[4].hash = BlockHash::from_bytes([0x04; 32]);

        let report = validate_chain(&blocks);
        assert_eq!(report.corrupted_heights(), vec![1, 4]);
        let linkage: Vec<u64> = report
            .iter()
            .filter(|e| e.is_linkage())
            .map(ValidationError::height)
            .collect();
        assert_eq!(linkage, vec![2, 5]);
    }

    #[test]
    fn test_resealed_block_breaks_only_linkage() {
        let mut blocks = build_chain(3);
        // Rewrite block 1 and reseal it: self-integrity holds, the link to
        // block 2 does not.
        let forged = Block::new(1, blocks[1].timestamp + 5, Some(blocks[0].hash), blocks[1].body.clone());
        blocks[1] = forged;

        let report = validate_chain(&blocks);
        assert!(report.corrupted_heights().is_empty());
        assert_eq!(report.len(), 1);
        assert!(matches!(
            report.errors()[0],
            ValidationError::Linkage { height: 2, .. }
        ));
    }

    #[test]
    fn test_height_gap_is_reported() {
        let mut blocks = build_chain(3);
        blocks.remove(1);

        let report = validate_chain(&blocks);
        assert!(report
            .iter()
            .any(|e| matches!(e, ValidationError::HeightMismatch { index: 1, found: 2 })));
        assert!(report
            .iter()
            .any(|e| matches!(e, ValidationError::Linkage { height: 1, .. })));
    }

    #[test]
    fn test_report_display_lists_errors() {
        let mut blocks = build_chain(2);
        blocks[0].hash = BlockHash::from_bytes([0x00; 32]);
        let text = validate_chain(&blocks).to_string();
        assert!(text.starts_with("2 validation error(s)"));
        assert!(text.contains("integrity error at height 0"));
    }
}
