//! # Star Registry Testkit
//!
//! Testing utilities for the Star Registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A registry wired to a [`ManualClock`], deterministic wallets,
//!   and sample star payloads
//! - **Generators**: Proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use star_registry_testkit::fixtures::{star, wallet, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let block = fixture.claim(&wallet(1), star("Antares")).unwrap();
//! assert_eq!(block.height, 1);
//!
//! // Challenges expire once the window has fully elapsed
//! let (address, message, signature) = fixture.signed_challenge(&wallet(1));
//! fixture.clock.advance(300);
//! assert!(fixture
//!     .registry
//!     .submit_star(&address, &message, &signature, star("Vega"))
//!     .is_err());
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use star_registry_testkit::generators::{body_from_params, StarParams};
//!
//! proptest! {
//!     #[test]
//!     fn body_encoding_is_deterministic(params: StarParams) {
//!         let b1 = body_from_params(&params).encode().unwrap();
//!         let b2 = body_from_params(&params).encode().unwrap();
//!         prop_assert_eq!(b1, b2);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    init_tracing, multi_wallet_fixtures, star, wallet, ManualClock, TestFixture, START_TIME,
};
pub use generators::{body_from_params, record_from_params, StarParams};
