//! Endian byte/integer codecs.
//!
//! Grounded in `original_source/util.py` (`le2int`/`be2int`/`int2le`/
//! `int2be`), which the teacher's `elliptic/edwards.rs` also hand-rolls
//! inline (`encodeint`/`decodeint`) for Ed25519 — this module gives that
//! logic one home instead of duplicating it per curve family.

use num_bigint::BigUint;

use crate::errors::{Error, Result};

/// Interprets `bytes` as a little-endian unsigned integer.
pub fn le_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_le(bytes)
}

/// Interprets `bytes` as a big-endian unsigned integer.
pub fn be_to_int(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Encodes `n` as exactly `pad` little-endian bytes.
///
/// A zero integer with `pad = 0` still yields a single zero byte, matching
/// `original_source/util.py::int2le`'s `if not buf: return '\x00'` fallback.
pub fn int_to_le(n: &BigUint, pad: usize) -> Result<Vec<u8>> {
    use num_traits::Zero;

    if pad == 0 {
        return if n.is_zero() {
            Ok(vec![0u8])
        } else {
            Err(Error::OutOfRange {
                what: "integer",
                value: n.clone(),
                low: BigUint::from(0u32),
                high: BigUint::from(0u32),
            })
        };
    }

    let mut bytes = n.to_bytes_le();
    if bytes.len() > pad {
        return Err(Error::OutOfRange {
            what: "integer",
            value: n.clone(),
            low: BigUint::from(0u32),
            high: (BigUint::from(1u32) << (8 * pad)) - 1u32,
        });
    }
    bytes.resize(pad, 0);
    Ok(bytes)
}

/// Encodes `n` as exactly `pad` big-endian bytes.
pub fn int_to_be(n: &BigUint, pad: usize) -> Result<Vec<u8>> {
    let mut le = int_to_le(n, pad)?;
    le.reverse();
    Ok(le)
}
