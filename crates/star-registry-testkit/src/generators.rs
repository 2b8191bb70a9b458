//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::{json, Value};

use star_registry_core::{BlockBody, BlockHash, StarRecord, WalletKeypair};

/// Generate a random wallet.
pub fn wallet() -> impl Strategy<Value = WalletKeypair> {
    any::<[u8; 32]>().prop_map(|seed| WalletKeypair::from_seed(&seed))
}

/// Generate a random BlockHash.
pub fn block_hash() -> impl Strategy<Value = BlockHash> {
    any::<[u8; 32]>().prop_map(BlockHash::from_bytes)
}

/// Generate a reasonable timestamp.
pub fn timestamp() -> impl Strategy<Value = i64> {
    0i64..=4_102_444_800i64
}

/// Generate a star name.
pub fn star_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{2,11}( [A-Z][a-z]{1,8})?".prop_map(String::from)
}

/// Generate a star payload: coordinates, a story and optional extras.
pub fn star_payload() -> impl Strategy<Value = Value> {
    (
        star_name(),
        (0u32..24, 0u32..60, 0u32..60),
        (-89i32..=89, 0u32..60),
        "[ -~]{0,120}",
        prop::option::of(-2i64..=20),
        prop::collection::vec("[a-z]{1,8}", 0..4),
    )
        .prop_map(|(name, (h, m, s), (deg, arcmin), story, magnitude, tags)| {
            let mut star = json!({
                "name": name,
                "ra": format!("{}h {}m {}s", h, m, s),
                "dec": format!("{}° {}'", deg, arcmin),
                "story": story,
                "tags": tags,
            });
            if let Some(mag) = magnitude {
                star["magnitude"] = json!(mag);
            }
            star
        })
}

/// Generate a string that is never a well-formed challenge.
pub fn malformed_message() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z0-9]{0,40}",
        "[a-z0-9]{1,20}:[a-z]{1,10}:starRegistry",
        "[a-z0-9]{1,20}:[0-9]{1,10}:[a-zA-Z]{1,11}",
    ]
    .prop_filter("must not end in the default suffix with a numeric timestamp", |m| {
        let parts: Vec<&str> = m.rsplitn(3, ':').collect();
        !(parts.len() == 3 && parts[0] == "starRegistry" && parts[1].parse::<i64>().is_ok())
    })
}

/// Parameters for generating a star record.
#[derive(Debug, Clone)]
pub struct StarParams {
    pub wallet: WalletKeypair,
    pub issued_at: i64,
    pub star: Value,
}

impl Arbitrary for StarParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), timestamp(), star_payload())
            .prop_map(|(seed, issued_at, star)| StarParams {
                wallet: WalletKeypair::from_seed(&seed),
                issued_at,
                star,
            })
            .boxed()
    }
}

/// Build a signed star record from parameters.
pub fn record_from_params(params: &StarParams) -> StarRecord {
    let address = params.wallet.address();
    let message = format!("{}:{}:starRegistry", address, params.issued_at);
    let signature = params.wallet.sign(&message);
    StarRecord::new(address, message, signature, params.star.clone())
}

/// Build a block body from parameters.
pub fn body_from_params(params: &StarParams) -> BlockBody {
    BlockBody::Star(record_from_params(params))
}
