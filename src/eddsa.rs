//! Ed25519 / Ed41417 (spec §4.7's "EdDSA" column), ported from
//! `original_source/eddsa.py`'s `Ed25519`/`Ed41417` classes.
//!
//! Ed41417 is not simply Ed25519 run over different constants: its nonce
//! derivation differs (`generate_random_k_from_seed` hashes `"seed" + sk`
//! instead of reusing the second half of `SHA-512(sk)`), so the two are
//! kept as separate schemes, each parameterized by its own curve, base
//! point, order, encoded-point byte width (`b/8`) and clamp shape, rather
//! than one generic struct.

use num_bigint::BigUint;

use crate::codec::{int_to_le, le_to_int};
use crate::curve::edwards::{EdwardsCurve, Point as EdwardsPoint};
use crate::curve::twisted_edwards::{Point as TwistedPoint, TwistedEdwardsCurve};
use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::hasher::sha512;
use crate::scalarmul::scalar_mul_affine;
use crate::schemes::{Ed25519Scheme, Ed41417Scheme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}

/// `2^(b-2) + (bits 3..b-2 of h, little-endian-ish as in RFC 8032)`, i.e.
/// "clamp `seed_hash[..byte_len]` and read it back as a little-endian
/// integer" — `h[0] &= 0xf8; h[last] &= 0x7f; h[last] |= 0x40`.
fn clamp_scalar(mut seed_hash_prefix: Vec<u8>) -> BigUint {
    let last = seed_hash_prefix.len() - 1;
    seed_hash_prefix[0] &= 0xf8;
    seed_hash_prefix[last] &= 0x7f;
    seed_hash_prefix[last] |= 0x40;
    le_to_int(&seed_hash_prefix)
}

/// Compressed point encoding: `y` little-endian over `byte_len` bytes, with
/// the top bit of the last byte replaced by `x`'s LSB.
fn encode_point(x: &BigUint, y: &BigUint, byte_len: usize) -> Vec<u8> {
    let bit_len = byte_len * 8;
    let x_bit: u32 = if x.bit(0) { 1 } else { 0 };
    let packed = y + (BigUint::from(x_bit) << (bit_len - 1));
    int_to_le(&packed, byte_len).expect("packed value fits in byte_len by construction")
}

/// Decodes a compressed point: the curve's `get_x(y)` is expected to return
/// exactly one root's absolute value; the top bit picks which of `x`/`p-x`
/// matches the encoded sign.
fn decode_point_edwards(curve: &EdwardsCurve, bytes: &[u8], byte_len: usize) -> Result<EdwardsPoint> {
    if bytes.len() != byte_len {
        return Err(Error::DecodingError("point encoding has the wrong length".into()));
    }
    let bit_len = byte_len * 8;
    let packed = le_to_int(bytes);
    let sign_bit = packed.bit((bit_len - 1) as u64);
    let y = &packed % (BigUint::from(1u32) << (bit_len - 1));

    let candidates = curve.get_x(&y);
    let x = candidates.into_iter().next().ok_or(Error::NotOnCurve)?.x;
    let x_is_odd = x.bit(0);
    let x = if x_is_odd != sign_bit { &curve.field.p - &x } else { x };

    let point = EdwardsPoint { x, y };
    if !curve.point_on_curve(&point) {
        return Err(Error::NotOnCurve);
    }
    Ok(point)
}

fn decode_point_twisted(curve: &TwistedEdwardsCurve, bytes: &[u8], byte_len: usize) -> Result<TwistedPoint> {
    if bytes.len() != byte_len {
        return Err(Error::DecodingError("point encoding has the wrong length".into()));
    }
    let bit_len = byte_len * 8;
    let packed = le_to_int(bytes);
    let sign_bit = packed.bit((bit_len - 1) as u64);
    let y = &packed % (BigUint::from(1u32) << (bit_len - 1));

    let candidates = curve.get_x(&y);
    let x = candidates.into_iter().next().ok_or(Error::NotOnCurve)?.x;
    let x_is_odd = x.bit(0);
    let x = if x_is_odd != sign_bit { &curve.field.p - &x } else { x };

    let point = TwistedPoint { x, y };
    if !curve.point_on_curve(&point) {
        return Err(Error::NotOnCurve);
    }
    Ok(point)
}

/// `b = 256`, encoded points/scalars are 32 bytes.
pub const ED25519_BYTE_LEN: usize = 32;
/// `b = 416`, encoded points/scalars are 52 bytes.
pub const ED41417_BYTE_LEN: usize = 52;

pub struct Ed25519 {
    pub scheme: Ed25519Scheme,
}

impl Ed25519 {
    pub fn new() -> Self {
        Ed25519 { scheme: Ed25519Scheme::new() }
    }

    /// Derives `(public_key_bytes, clamped_private_scalar)` from a 32-byte seed.
    pub fn generate_key_pair_from_seed(&self, seed: &[u8]) -> (Vec<u8>, BigUint) {
        let h = sha512(seed);
        let private = clamp_scalar(h[..ED25519_BYTE_LEN].to_vec());
        let public_point = scalar_mul_affine(&self.scheme.curve, &private, &self.scheme.base_point);
        let public_bytes = encode_point(&public_point.x, &public_point.y, ED25519_BYTE_LEN);
        (public_bytes, private)
    }

    fn nonce(&self, seed: &[u8], message: &[u8]) -> BigUint {
        let h = sha512(seed);
        let mut buf = h[ED25519_BYTE_LEN..ED25519_BYTE_LEN * 2].to_vec();
        buf.extend_from_slice(message);
        le_to_int(&sha512(&buf)) % &self.scheme.order
    }

    /// `sig = R || S` with `R = rG`, `S = r + H(R||A||m)*a mod L`, where `r`
    /// is derived deterministically from `seed` and `m` (no external nonce
    /// source — this is what makes EdDSA signing deterministic).
    pub fn sign(&self, message: &[u8], seed: &[u8]) -> Signature {
        let (public_bytes, a) = self.generate_key_pair_from_seed(seed);
        let r = self.nonce(seed, message);
        let r_point = scalar_mul_affine(&self.scheme.curve, &r, &self.scheme.base_point);
        let r_bytes = encode_point(&r_point.x, &r_point.y, ED25519_BYTE_LEN);

        let mut hash_input = r_bytes.clone();
        hash_input.extend_from_slice(&public_bytes);
        hash_input.extend_from_slice(message);
        let h = le_to_int(&sha512(&hash_input)) % &self.scheme.order;

        let s = (r + h * &a) % &self.scheme.order;
        let s_bytes = int_to_le(&s, ED25519_BYTE_LEN).expect("s < order fits in the encoded width");

        Signature { r: r_bytes, s: s_bytes }
    }

    pub fn verify(&self, message: &[u8], public_key: &[u8], signature: &Signature) -> Result<bool> {
        if signature.r.len() != ED25519_BYTE_LEN || signature.s.len() != ED25519_BYTE_LEN {
            return Err(Error::DecodingError("Ed25519 signature has the wrong length".into()));
        }
        if public_key.len() != ED25519_BYTE_LEN {
            return Err(Error::DecodingError("Ed25519 public key has the wrong length".into()));
        }

        let r_point = decode_point_twisted(&self.scheme.curve, &signature.r, ED25519_BYTE_LEN)?;
        let a_point = decode_point_twisted(&self.scheme.curve, public_key, ED25519_BYTE_LEN)?;
        let s = le_to_int(&signature.s);

        let mut hash_input = signature.r.clone();
        hash_input.extend_from_slice(public_key);
        hash_input.extend_from_slice(message);
        let h = le_to_int(&sha512(&hash_input)) % &self.scheme.order;

        let lhs = scalar_mul_affine(&self.scheme.curve, &s, &self.scheme.base_point);
        let rhs = self.scheme.curve.add(&r_point, &scalar_mul_affine(&self.scheme.curve, &h, &a_point));

        Ok(lhs == rhs)
    }
}

impl Default for Ed25519 {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Ed41417 {
    pub scheme: Ed41417Scheme,
}

impl Ed41417 {
    pub fn new() -> Self {
        Ed41417 { scheme: Ed41417Scheme::new() }
    }

    pub fn generate_key_pair_from_seed(&self, seed: &[u8]) -> (Vec<u8>, BigUint) {
        let h = sha512(seed);
        let private = clamp_scalar(h[..ED41417_BYTE_LEN].to_vec());
        let public_point = scalar_mul_affine(&self.scheme.curve, &private, &self.scheme.base_point);
        let public_bytes = encode_point(&public_point.x, &public_point.y, ED41417_BYTE_LEN);
        (public_bytes, private)
    }

    /// Unlike Ed25519 (which reuses the second half of `SHA-512(seed)` for
    /// its nonce prefix), Ed41417 hashes a distinct input,
    /// `SHA-512("seed" + seed)`, and takes its first 52 bytes.
    fn nonce(&self, seed: &[u8], message: &[u8]) -> BigUint {
        let mut prefix_input = b"seed".to_vec();
        prefix_input.extend_from_slice(seed);
        let prefix = &sha512(&prefix_input)[..ED41417_BYTE_LEN];

        let mut buf = prefix.to_vec();
        buf.extend_from_slice(message);
        le_to_int(&sha512(&buf)) % &self.scheme.order
    }

    pub fn sign(&self, message: &[u8], seed: &[u8]) -> Signature {
        let (public_bytes, a) = self.generate_key_pair_from_seed(seed);
        let r = self.nonce(seed, message);
        let r_point = scalar_mul_affine(&self.scheme.curve, &r, &self.scheme.base_point);
        let r_bytes = encode_point(&r_point.x, &r_point.y, ED41417_BYTE_LEN);

        let mut hash_input = r_bytes.clone();
        hash_input.extend_from_slice(&public_bytes);
        hash_input.extend_from_slice(message);
        let h = le_to_int(&sha512(&hash_input)) % &self.scheme.order;

        let s = (r + h * &a) % &self.scheme.order;
        let s_bytes = int_to_le(&s, ED41417_BYTE_LEN).expect("s < order fits in the encoded width");

        Signature { r: r_bytes, s: s_bytes }
    }

    pub fn verify(&self, message: &[u8], public_key: &[u8], signature: &Signature) -> Result<bool> {
        if signature.r.len() != ED41417_BYTE_LEN || signature.s.len() != ED41417_BYTE_LEN {
            return Err(Error::DecodingError("Ed41417 signature has the wrong length".into()));
        }
        if public_key.len() != ED41417_BYTE_LEN {
            return Err(Error::DecodingError("Ed41417 public key has the wrong length".into()));
        }

        let r_point = decode_point_edwards(&self.scheme.curve, &signature.r, ED41417_BYTE_LEN)?;
        let a_point = decode_point_edwards(&self.scheme.curve, public_key, ED41417_BYTE_LEN)?;
        let s = le_to_int(&signature.s);

        let mut hash_input = signature.r.clone();
        hash_input.extend_from_slice(public_key);
        hash_input.extend_from_slice(message);
        let h = le_to_int(&sha512(&hash_input)) % &self.scheme.order;

        let lhs = scalar_mul_affine(&self.scheme.curve, &s, &self.scheme.base_point);
        let rhs = self.scheme.curve.add(&r_point, &scalar_mul_affine(&self.scheme.curve, &h, &a_point));

        Ok(lhs == rhs)
    }
}

impl Default for Ed41417 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ed25519_sign_then_verify_round_trips() {
        let scheme = Ed25519::new();
        let seed = [7u8; 32];
        let (public_key, _) = scheme.generate_key_pair_from_seed(&seed);
        let message = b"hello world";

        let sig = scheme.sign(message, &seed);
        assert!(scheme.verify(message, &public_key, &sig).unwrap());
    }

    #[test]
    fn ed25519_verify_rejects_tampered_message() {
        let scheme = Ed25519::new();
        let seed = [3u8; 32];
        let (public_key, _) = scheme.generate_key_pair_from_seed(&seed);

        let sig = scheme.sign(b"original message", &seed);
        assert!(!scheme.verify(b"tampered message", &public_key, &sig).unwrap());
    }

    #[test]
    fn ed25519_signing_is_deterministic() {
        let scheme = Ed25519::new();
        let seed = [9u8; 32];
        let message = b"repeat me";

        let sig1 = scheme.sign(message, &seed);
        let sig2 = scheme.sign(message, &seed);
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn ed41417_sign_then_verify_round_trips() {
        let scheme = Ed41417::new();
        let seed = [11u8; 52];
        let (public_key, _) = scheme.generate_key_pair_from_seed(&seed);
        let message = b"Curve41417 test message";

        let sig = scheme.sign(message, &seed);
        assert!(scheme.verify(message, &public_key, &sig).unwrap());
    }

    #[test]
    fn ed41417_and_ed25519_nonce_derivations_differ() {
        // Same seed bytes (truncated/padded), different schemes: the
        // deterministic nonces must not coincidentally match, since
        // Ed41417 hashes `"seed" + seed` while Ed25519 reuses half of
        // `SHA-512(seed)` directly.
        let ed25519 = Ed25519::new();
        let ed41417 = Ed41417::new();
        let seed25519 = [4u8; 32];
        let seed41417 = [4u8; 52];

        let r1 = ed25519.nonce(&seed25519, b"msg");
        let r2 = ed41417.nonce(&seed41417, b"msg");
        assert_ne!(r1, r2);
    }
}
