//! Educational elliptic-curve cryptography toolkit.
//!
//! Finite-field arithmetic, four curve families (short Weierstrass,
//! Montgomery, Edwards, twisted Edwards), scalar multiplication via a
//! Montgomery ladder, birational conversions between curve forms, ECDH,
//! ECDSA (including nonce-reuse key recovery), Ed25519/Ed41417, and
//! Elligator 2.
//!
//! None of this is constant-time or otherwise hardened against
//! side-channel attacks, and the default random-scalar source is not a
//! CSPRNG — see `random` and each module's doc comments.

pub mod codec;
pub mod curve;
pub mod dh;
pub mod ecdsa;
pub mod eddsa;
pub mod elligator;
pub mod errors;
pub mod hasher;
pub mod numtheory;
pub mod random;
pub mod scalarmul;
pub mod schemes;

mod field;
pub use field::Field;
