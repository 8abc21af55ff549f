//! Content fingerprints over record lists.
//!
//! Fast, deterministic, non-cryptographic. Gateway nodes compare the hex
//! string byte-for-byte to decide whether to re-pull a group.
//!
//! Canonical form:
//! - each record serialized with serde_json (struct fields in declaration
//!   order; record types carry no maps)
//! - serialized records sorted bytewise, so listing order does not matter
//! - joined into one JSON array and hashed with xxh3-128

use serde::Serialize;
use xxhash_rust::xxh3::xxh3_128;

use crate::error::SyncResult;

/// Fingerprint `records` as 32 lowercase hex characters.
pub fn fingerprint<T: Serialize>(records: &[T]) -> SyncResult<String> {
    let bytes = canonical_bytes(records)?;
    Ok(format!("{:032x}", xxh3_128(&bytes)))
}

/// Canonical serialization the fingerprint is computed over.
pub fn canonical_bytes<T: Serialize>(records: &[T]) -> SyncResult<Vec<u8>> {
    let mut encoded = records
        .iter()
        .map(serde_json::to_vec)
        .collect::<Result<Vec<_>, _>>()?;
    encoded.sort_unstable();

    let mut out = Vec::with_capacity(2 + encoded.iter().map(|e| e.len() + 1).sum::<usize>());
    out.push(b'[');
    for (i, record) in encoded.iter().enumerate() {
        if i > 0 {
            out.push(b',');
        }
        out.extend_from_slice(record);
    }
    out.push(b']');
    Ok(out)
}
