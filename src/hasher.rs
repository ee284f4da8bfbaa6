//! The abstract hash collaborator named by spec §1, backed by concrete
//! SHA-2 implementations.
//!
//! Shaped after the teacher's `crypto::hasher::Hasher` trait
//! (`pkg/crypto/src/hasher.rs`), trimmed of the `alloc`/`std` feature gating
//! and the `Factory`/`TruncatedHasher`/`HashReader` machinery this crate has
//! no use for (no streaming `io::Read` wrapper is needed anywhere in ECC
//! signing/verification). The teacher hand-rolls its own `sha256.rs`/
//! `sha512.rs`; this crate uses the `sha2` crate instead (already the
//! teacher's own dev-dependency for cross-checking test vectors) since
//! SHA-512 is load-bearing for the Ed25519/Ed41417 key schedule, not just
//! test tooling.

use sha2::Digest;

/// A byte-oriented cryptographic hash with incremental `update`.
pub trait Hasher {
    fn output_size(&self) -> usize;
    fn update(&mut self, data: &[u8]);

    /// Finalizes the hash without consuming the hasher, so further
    /// `update`/`finish` calls remain valid and cumulative.
    fn finish(&self) -> Vec<u8>;

    fn finish_with(&mut self, data: &[u8]) -> Vec<u8> {
        self.update(data);
        self.finish()
    }
}

macro_rules! sha2_hasher {
    ($name:ident, $inner:ty) => {
        #[derive(Clone, Default)]
        pub struct $name($inner);

        impl Hasher for $name {
            fn output_size(&self) -> usize {
                <$inner as Digest>::output_size()
            }

            fn update(&mut self, data: &[u8]) {
                Digest::update(&mut self.0, data);
            }

            fn finish(&self) -> Vec<u8> {
                self.0.clone().finalize().to_vec()
            }
        }
    };
}

sha2_hasher!(Sha256Hasher, sha2::Sha256);
sha2_hasher!(Sha384Hasher, sha2::Sha384);
sha2_hasher!(Sha512Hasher, sha2::Sha512);

/// One-shot SHA-512, used throughout the Ed25519/Ed41417 key schedule.
pub fn sha512(data: &[u8]) -> Vec<u8> {
    let mut h = Sha512Hasher::default();
    h.finish_with(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha256_of_empty_string() {
        let mut h = Sha256Hasher::default();
        let digest = h.finish_with(b"");
        assert_eq!(
            digest,
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn sha512_matches_rfc_8032_seed_hash_length() {
        let digest = sha512(b"");
        assert_eq!(digest.len(), 64);
    }
}
