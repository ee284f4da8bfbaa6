//! Generic Diffie–Hellman shared-secret derivation (spec §4.5).
//!
//! Shaped after the teacher's `crypto::dh::DiffieHellmanFn` trait
//! (`pkg/crypto/src/dh.rs`), made synchronous: spec §5 rules out an async
//! runtime, and nothing in ECDH here needs to suspend or block.

use num_bigint::BigUint;

use crate::errors::Result;
use crate::random::RandomScalarSource;

/// A Diffie–Hellman-capable scheme: something that can mint a private
/// scalar, derive the matching public value, and combine a private scalar
/// with a peer's public value into a shared secret.
pub trait DiffieHellman {
    fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint;
    fn derive_public_key(&self, private: &BigUint) -> Result<Vec<u8>>;
    fn shared_secret(&self, private: &BigUint, peer_public: &[u8]) -> Result<Vec<u8>>;
}
