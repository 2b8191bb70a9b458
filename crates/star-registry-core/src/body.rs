//! Block bodies: the genesis marker and star ownership records.
//!
//! The chain stores bodies as opaque hex strings ([`EncodedBody`]) so that
//! integrity logic never depends on the shape of star metadata. Decoding is
//! only needed by queries.

use ciborium::value::Value;
use serde::{Deserialize, Serialize};

use crate::canonical::{decode_value, encode_canonical};
use crate::error::CoreError;

/// The literal payload of the genesis block.
pub const GENESIS_MARKER: &str = "Genesis Block";

/// An ownership claim registered against a wallet address.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// The wallet address that owns the star.
    pub address: String,
    /// The challenge message that was signed.
    pub message: String,
    /// Signature over `message` under `address`.
    pub signature: String,
    /// Free-form star metadata. Never inspected by the ledger.
    pub star: serde_json::Value,
}

impl StarRecord {
    /// Create a record from its four fields.
    pub fn new(
        address: impl Into<String>,
        message: impl Into<String>,
        signature: impl Into<String>,
        star: serde_json::Value,
    ) -> Self {
        Self {
            address: address.into(),
            message: message.into(),
            signature: signature.into(),
            star,
        }
    }
}

/// The decoded payload of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockBody {
    /// The marker carried by the block at height 0.
    Genesis,
    /// An ownership record, carried by every other block.
    Star(StarRecord),
}

impl BlockBody {
    /// Encode to the canonical, hex-wrapped form stored in a block.
    ///
    /// Genesis encodes as the CBOR text string [`GENESIS_MARKER`]; a star
    /// record encodes as a CBOR map with keys in canonical order, so JSON key
    /// insertion order in `star` never changes the encoding.
    ///
    /// A body that would not decode again (for example, a `star` nested
    /// deeper than the CBOR reader accepts) is rejected here.
    pub fn encode(&self) -> Result<EncodedBody, CoreError> {
        let value = match self {
            BlockBody::Genesis => Value::Text(GENESIS_MARKER.to_string()),
            BlockBody::Star(record) => {
                Value::serialized(record).map_err(|e| CoreError::EncodingError(e.to_string()))?
            }
        };
        let encoded = EncodedBody(hex::encode(encode_canonical(&value)?));
        encoded
            .decode()
            .map_err(|e| CoreError::EncodingError(format!("body does not decode: {}", e)))?;
        Ok(encoded)
    }

    /// Check if this is the genesis marker.
    pub fn is_genesis(&self) -> bool {
        matches!(self, BlockBody::Genesis)
    }

    /// Get the star record, if any.
    pub fn as_star(&self) -> Option<&StarRecord> {
        match self {
            BlockBody::Star(record) => Some(record),
            BlockBody::Genesis => None,
        }
    }

    /// Consume into the star record, if any.
    pub fn into_star(self) -> Option<StarRecord> {
        match self {
            BlockBody::Star(record) => Some(record),
            BlockBody::Genesis => None,
        }
    }
}

impl From<StarRecord> for BlockBody {
    fn from(record: StarRecord) -> Self {
        BlockBody::Star(record)
    }
}

/// A block body as stored: lowercase hex of its canonical CBOR bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedBody(String);

impl EncodedBody {
    /// Wrap an already-encoded hex string.
    ///
    /// Only the hex alphabet is checked; the contents are checked by
    /// [`EncodedBody::decode`].
    pub fn from_hex(s: impl Into<String>) -> Result<Self, CoreError> {
        let s = s.into();
        if s.len() % 2 != 0 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::DecodingError("body is not valid hex".into()));
        }
        Ok(Self(s))
    }

    /// The stored hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into the structured payload.
    pub fn decode(&self) -> Result<BlockBody, CoreError> {
        let bytes = hex::decode(&self.0).map_err(|e| CoreError::DecodingError(e.to_string()))?;
        match decode_value(&bytes)? {
            Value::Text(marker) if marker == GENESIS_MARKER => Ok(BlockBody::Genesis),
            value @ Value::Map(_) => value
                .deserialized::<StarRecord>()
                .map(BlockBody::Star)
                .map_err(|e| CoreError::DecodingError(e.to_string())),
            _ => Err(CoreError::DecodingError(
                "body is neither the genesis marker nor a star record".into(),
            )),
        }
    }
}
