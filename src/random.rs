//! The abstract random-scalar source named by spec §1/§9.
//!
//! The teacher's `crypto::random` (`pkg/crypto/src/random.rs`) is a global,
//! `async-std`-backed singleton that reseeds a ChaCha20 stream from
//! `/dev/random` every gigabyte. Spec §5 rules out ambient singletons and
//! I/O; §9 "Randomness" asks only for "the default scalar sampler is not
//! cryptographically secure[, exposed] as an injected collaborator so
//! callers can plug in a CSPRNG". This module keeps exactly that shape —
//! the `RandomScalarSource` trait is the injection point, and
//! `InsecureRng` is one small, explicitly-insecure, non-singleton default
//! implementation (a splitmix64 stream), rather than the teacher's global
//! reseeding machinery.

use num_bigint::BigUint;

use crate::errors::{Error, Result};

/// A source of random bytes, injected wherever the library needs a scalar
/// or nonce. Implementations make no guarantee about quality; this crate
/// does not, and cannot, advertise cryptographic strength for the default
/// implementation (spec §1 Non-goals: "cryptographically strong
/// randomness").
pub trait RandomScalarSource {
    fn fill_bytes(&mut self, buf: &mut [u8]);
}

/// `splitmix64`, seeded explicitly by the caller. Deliberately NOT a CSPRNG
/// — callers who need one should implement `RandomScalarSource` over a real
/// CSPRNG crate and pass that in instead.
pub struct InsecureRng {
    state: u64,
}

impl InsecureRng {
    pub fn new(seed: u64) -> Self {
        InsecureRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^ (z >> 31)
    }
}

impl RandomScalarSource for InsecureRng {
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        let chunks = buf.chunks_mut(8);
        for chunk in chunks {
            let word = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }
}

/// Draws a uniformly-distributed integer in `[lower, upper]` via rejection
/// sampling, mirroring the teacher's `secure_random_range` (minus the
/// async/file-backed entropy source).
pub fn random_range(
    rng: &mut dyn RandomScalarSource,
    lower: &BigUint,
    upper: &BigUint,
) -> Result<BigUint> {
    if lower > upper {
        return Err(Error::InvalidParameters(
            "random_range: lower bound exceeds upper bound".into(),
        ));
    }

    let span = upper - lower + 1u32;
    let num_bytes = ((span.bits() + 7) / 8).max(1) as usize;
    let mut buf = vec![0u8; num_bytes];

    rng.fill_bytes(&mut buf);
    let candidate = BigUint::from_bytes_le(&buf) % &span;
    Ok(lower + candidate)
}
