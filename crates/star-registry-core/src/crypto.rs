//! Signature primitives for ownership proofs.
//!
//! A wallet address is the hex encoding of an Ed25519 verifying key and a
//! signature is the hex encoding of the 64-byte Ed25519 signature over the
//! UTF-8 bytes of the challenge message.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;

use crate::error::CoreError;

/// Capability for checking that `signature` signs `message` under `address`.
///
/// The registry depends on this contract only, so alternative wallet schemes
/// can be plugged in without touching chain logic.
pub trait SignatureVerifier: Send + Sync {
    /// Returns true iff the signature is valid for the message and address.
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 verification over hex-encoded addresses and signatures.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Verifier;

impl Ed25519Verifier {
    /// Verify and report why a check failed.
    pub fn check(&self, message: &str, address: &str, signature: &str) -> Result<(), CoreError> {
        let key_bytes: [u8; 32] = hex::decode(address)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or(CoreError::InvalidPublicKey)?;
        let verifying_key =
            VerifyingKey::from_bytes(&key_bytes).map_err(|_| CoreError::InvalidPublicKey)?;

        let sig_bytes: [u8; 64] = hex::decode(signature)
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or(CoreError::InvalidSignature)?;
        let sig = Signature::from_bytes(&sig_bytes);

        verifying_key
            .verify(message.as_bytes(), &sig)
            .map_err(|_| CoreError::InvalidSignature)
    }
}

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        self.check(message, address, signature).is_ok()
    }
}

/// A wallet keypair for signing challenge messages.
///
/// This wraps ed25519-dalek's SigningKey. The registry itself never signs;
/// wallets live on the client side and in tests.
#[derive(Clone)]
pub struct WalletKeypair {
    signing_key: SigningKey,
}

impl WalletKeypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let signing_key = SigningKey::generate(&mut rng);
        Self { signing_key }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(seed);
        Self { signing_key }
    }

    /// The wallet address: hex of the verifying key.
    pub fn address(&self) -> String {
        hex::encode(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message, returning the hex-encoded signature.
    pub fn sign(&self, message: &str) -> String {
        let sig = self.signing_key.sign(message.as_bytes());
        hex::encode(sig.to_bytes())
    }
}

impl fmt::Debug for WalletKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WalletKeypair({})", &self.address()[..16])
    }
}
