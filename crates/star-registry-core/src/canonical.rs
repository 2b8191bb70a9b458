//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Floats always as 64-bit (no preferred-size reduction)
//!
//! Block hashes are computed over [`canonical_block_bytes`], whose field order
//! is fixed by the key schema below and never by collection iteration order.

use ciborium::value::Value;

use crate::body::EncodedBody;
use crate::error::CoreError;
use crate::types::BlockHash;

/// Block field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const HEIGHT: u64 = 0;
    pub const TIMESTAMP: u64 = 1;
    pub const PREVIOUS_BLOCK_HASH: u64 = 2;
    pub const BODY: u64 = 3;
}

/// Encode the hashed fields of a block to canonical CBOR bytes.
///
/// The hash itself is never part of its own input.
pub fn canonical_block_bytes(
    height: u64,
    timestamp: i64,
    previous_block_hash: Option<&BlockHash>,
    body: &EncodedBody,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(48 + body.as_str().len());

    // Keys are emitted in ascending order, which is already the
    // encoded-byte order for single-byte integer keys.
    encode_uint(&mut buf, 5, 4);

    // 0: height
    encode_uint(&mut buf, 0, keys::HEIGHT);
    encode_uint(&mut buf, 0, height);

    // 1: timestamp
    encode_uint(&mut buf, 0, keys::TIMESTAMP);
    encode_signed(&mut buf, timestamp.into());

    // 2: previous_block_hash (null or bytes)
    encode_uint(&mut buf, 0, keys::PREVIOUS_BLOCK_HASH);
    match previous_block_hash {
        Some(hash) => encode_bytes(&mut buf, hash.as_bytes()),
        None => buf.push(0xf6),
    }

    // 3: body
    encode_uint(&mut buf, 0, keys::BODY);
    encode_text(&mut buf, body.as_str());

    buf
}

/// Encode an arbitrary CBOR value canonically.
///
/// Tags and simple values other than booleans and null are rejected.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Decode a single CBOR value from bytes.
pub fn decode_value(bytes: &[u8]) -> Result<Value, CoreError> {
    ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => encode_signed(buf, (*i).into()),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr)?,
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        Value::Float(f) => {
            buf.push(0xfb);
            buf.extend_from_slice(&f.to_be_bytes());
        }
        Value::Tag(tag, _) => {
            return Err(CoreError::EncodingError(format!(
                "tagged values are not canonical (tag {})",
                tag
            )))
        }
        _ => {
            return Err(CoreError::EncodingError(
                "unsupported CBOR value type".into(),
            ))
        }
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_signed(buf: &mut Vec<u8>, n: i128) {
    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: negative integer
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<(), CoreError> {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    let mut key_value_pairs = entries
        .iter()
        .map(|(k, v)| encode_canonical(k).map(|key_bytes| (key_bytes, v)))
        .collect::<Result<Vec<_>, _>>()?;

    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, key_value_pairs.len() as u64);

    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}
