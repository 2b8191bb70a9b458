//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Once};

use star_registry::{Clock, RegistryConfig, StarRegistry, VerificationError};
use star_registry_core::{Block, Ed25519Verifier, WalletKeypair};

/// Fixed starting time for fixtures (2023-11-14T22:13:20Z).
pub const START_TIME: i64 = 1_700_000_000;

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    /// Create a clock reading `now`.
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    /// Jump to an absolute time.
    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    /// Move forward (or backward, for negative `secs`).
    pub fn advance(&self, secs: i64) {
        self.now.fetch_add(secs, Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(START_TIME)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// A registry wired to a manual clock and real Ed25519 verification.
pub struct TestFixture {
    pub registry: StarRegistry,
    pub clock: Arc<ManualClock>,
}

impl TestFixture {
    /// Create a fixture with the default configuration at [`START_TIME`].
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        let clock = Arc::new(ManualClock::default());
        let registry = StarRegistry::with_parts(
            config,
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(Ed25519Verifier),
        )
        .unwrap();
        Self { registry, clock }
    }

    /// Rebuild a registry from `blocks` on a fresh manual clock.
    pub fn restored(blocks: Vec<Block>) -> Self {
        let clock = Arc::new(ManualClock::default());
        let registry = StarRegistry::restore(
            RegistryConfig::default(),
            blocks,
            Arc::clone(&clock) as Arc<dyn Clock>,
            Arc::new(Ed25519Verifier),
        )
        .unwrap();
        Self { registry, clock }
    }

    /// Request a challenge for `wallet` and sign it.
    ///
    /// Returns `(address, message, signature)`.
    pub fn signed_challenge(&self, wallet: &WalletKeypair) -> (String, String, String) {
        let address = wallet.address();
        let message = self.registry.request_challenge(&address);
        let signature = wallet.sign(&message);
        (address, message, signature)
    }

    /// Run the whole claim flow for `wallet` without advancing the clock.
    pub fn claim(
        &self,
        wallet: &WalletKeypair,
        star: serde_json::Value,
    ) -> Result<Block, VerificationError> {
        let (address, message, signature) = self.signed_challenge(wallet);
        self.registry
            .submit_star(&address, &message, &signature, star)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a deterministic wallet from a one-byte seed.
pub fn wallet(seed: u8) -> WalletKeypair {
    let mut bytes = [0u8; 32];
    bytes[0] = seed;
    WalletKeypair::from_seed(&bytes)
}

/// Create multiple wallets for multi-owner tests.
pub fn multi_wallet_fixtures(count: usize) -> Vec<WalletKeypair> {
    (0..count).map(|i| wallet(i as u8)).collect()
}

/// A star payload with the given name.
pub fn star(name: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "ra": "16h 29m 1.0s",
        "dec": "-26° 29' 24.9\"",
        "story": format!("{} was found in the southern sky", name),
    })
}

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::default();
        assert_eq!(clock.now(), START_TIME);
        clock.advance(300);
        assert_eq!(clock.now(), START_TIME + 300);
        clock.set(5);
        assert_eq!(clock.now(), 5);
    }

    #[test]
    fn test_fixture_claim() {
        let fixture = TestFixture::new();
        let block = fixture.claim(&wallet(1), star("Antares")).unwrap();

        assert_eq!(block.height, 1);
        assert_eq!(block.timestamp, START_TIME);
        assert_eq!(fixture.registry.height(), 1);
    }

    #[test]
    fn test_multi_wallet() {
        let wallets = multi_wallet_fixtures(3);

        // Each wallet has a unique address
        let addresses: Vec<_> = wallets.iter().map(|w| w.address()).collect();
        assert_ne!(addresses[0], addresses[1]);
        assert_ne!(addresses[1], addresses[2]);
        assert_ne!(addresses[0], addresses[2]);
    }
}
