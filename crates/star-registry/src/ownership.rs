//! Ownership verification: challenge issuance and signed submissions.
//!
//! A wallet asks for a challenge, signs it out of band, and submits the
//! signature together with its star data. The submission is accepted only
//! while the challenge is younger than the validation window.

use std::sync::Arc;

use star_registry_core::{Block, BlockBody, SignatureVerifier, StarRecord};
use tracing::{debug, info, warn};

use crate::chain::ChainManager;
use crate::clock::Clock;
use crate::config::RegistryConfig;
use crate::error::VerificationError;

/// A parsed challenge message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge<'a> {
    /// The address the challenge was issued for.
    pub address: &'a str,
    /// Issue time (Unix seconds).
    pub issued_at: i64,
}

/// Parse `<address>:<issued_at>:<suffix>`.
///
/// The message is split from the right, so the address part is everything
/// before the last two separators.
pub fn parse_challenge<'a>(
    message: &'a str,
    suffix: &str,
) -> Result<Challenge<'a>, VerificationError> {
    let mut parts = message.rsplitn(3, ':');
    let (found_suffix, issued_at, address) = match (parts.next(), parts.next(), parts.next()) {
        (Some(s), Some(t), Some(a)) => (s, t, a),
        _ => {
            return Err(VerificationError::MalformedMessage(
                "expected <address>:<timestamp>:<suffix>".into(),
            ))
        }
    };

    if found_suffix != suffix {
        return Err(VerificationError::MalformedMessage(format!(
            "unexpected suffix {:?}",
            found_suffix
        )));
    }
    if address.is_empty() {
        return Err(VerificationError::MalformedMessage("empty address".into()));
    }
    let issued_at = issued_at.parse::<i64>().map_err(|e| {
        VerificationError::MalformedMessage(format!("bad timestamp {:?}: {}", issued_at, e))
    })?;

    Ok(Challenge { address, issued_at })
}

/// Issues challenges and registers verified ownership claims.
pub struct OwnershipVerifier {
    chain: Arc<ChainManager>,
    clock: Arc<dyn Clock>,
    verifier: Arc<dyn SignatureVerifier>,
    config: RegistryConfig,
}

impl OwnershipVerifier {
    /// Create a verifier that appends accepted claims to `chain`.
    pub fn new(
        chain: Arc<ChainManager>,
        clock: Arc<dyn Clock>,
        verifier: Arc<dyn SignatureVerifier>,
        config: RegistryConfig,
    ) -> Self {
        Self {
            chain,
            clock,
            verifier,
            config,
        }
    }

    /// Issue `<address>:<now>:<suffix>`.
    pub fn request_challenge(&self, address: &str) -> String {
        let issued_at = self.clock.now();
        debug!(address, issued_at, "issued ownership challenge");
        format!("{}:{}:{}", address, issued_at, self.config.challenge_suffix)
    }

    /// Seconds left before `message` expires (0 once expired).
    ///
    /// Never more than the window, even for a challenge dated in the future.
    pub fn validation_window_remaining(&self, message: &str) -> Result<u64, VerificationError> {
        let challenge = parse_challenge(message, &self.config.challenge_suffix)?;
        let elapsed = self.clock.now().saturating_sub(challenge.issued_at);
        let window = i64::try_from(self.config.validation_window_secs).unwrap_or(i64::MAX);
        Ok(window.saturating_sub(elapsed).clamp(0, window) as u64)
    }

    /// Verify a signed challenge and register `star` for `address`.
    ///
    /// Checks run in order: message shape, challenge window, signature.
    /// The first failure is returned and the chain is left unchanged.
    pub fn submit(
        &self,
        address: &str,
        message: &str,
        signature: &str,
        star: serde_json::Value,
    ) -> Result<Block, VerificationError> {
        let challenge = parse_challenge(message, &self.config.challenge_suffix).map_err(|e| {
            warn!(address, error = %e, "rejected submission");
            e
        })?;
        if challenge.address != address {
            warn!(address, challenged = challenge.address, "challenge address mismatch");
            return Err(VerificationError::MalformedMessage(
                "message was issued for a different address".into(),
            ));
        }

        let elapsed = self.clock.now().saturating_sub(challenge.issued_at);
        let window = self.config.validation_window_secs;
        if elapsed >= 0 && elapsed as u64 >= window {
            warn!(address, elapsed, window, "challenge expired");
            return Err(VerificationError::ChallengeExpired {
                elapsed: elapsed as u64,
                window,
            });
        }

        if !self.verifier.verify(message, address, signature) {
            warn!(address, "signature verification failed");
            return Err(VerificationError::SignatureInvalid);
        }

        let record = StarRecord::new(address, message, signature, star);
        let block = self.chain.append(BlockBody::Star(record))?;
        info!(address, height = block.height, "registered star");
        Ok(block)
    }
}
