//! Arithmetic in `Z/pZ`.
//!
//! Shaped directly after the teacher's `math::big::Modulo<'a>`
//! (`pkg/math/src/big/modulo.rs`): the same five operations, the same
//! extended-Euclid-based `inv`. The one deliberate divergence is that `inv`
//! and `div` return `Result<_, Error>` here instead of panicking — spec §7
//! requires a `NotInvertible` error value, and the teacher's
//! `panic!("Not invertible")` is not an option for a library that "performs
//! no retry or logging; every failure is surfaced to the caller verbatim."

use num_bigint::BigUint;

use crate::errors::Result;
use crate::numtheory::inverse_of;

/// An immutable descriptor of the prime field `Z/pZ`. All operations reduce
/// modulo `p` and return canonical representatives in `[0, p)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub p: BigUint,
}

impl Field {
    pub fn new(p: BigUint) -> Self {
        Field { p }
    }

    pub fn normalize(&self, n: &BigUint) -> BigUint {
        n % &self.p
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = a % &self.p;
        let b = b % &self.p;
        if a >= b {
            a - b
        } else {
            &self.p - (b - a)
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// `n^e mod p`.
    pub fn pow(&self, n: &BigUint, e: &BigUint) -> BigUint {
        n.modpow(e, &self.p)
    }

    /// `-a mod p`.
    pub fn negate(&self, a: &BigUint) -> BigUint {
        self.sub(&self.p, a)
    }

    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        inverse_of(a, &self.p)
    }

    pub fn div(&self, a: &BigUint, b: &BigUint) -> Result<BigUint> {
        Ok(self.mul(a, &self.inv(b)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_teacher_modulo_test_vector() {
        let f = Field::new(BigUint::from(7u32));
        assert_eq!(f.inv(&BigUint::from(2u32)).unwrap(), BigUint::from(4u32));
        assert_eq!(
            f.div(&BigUint::from(1u32), &BigUint::from(2u32)).unwrap(),
            BigUint::from(4u32)
        );
    }

    #[test]
    fn sub_never_underflows() {
        let f = Field::new(BigUint::from(101u32));
        assert_eq!(f.sub(&BigUint::from(3u32), &BigUint::from(5u32)), BigUint::from(99u32));
    }

    #[test]
    fn div_by_zero_is_not_invertible() {
        let f = Field::new(BigUint::from(101u32));
        assert!(f.div(&BigUint::from(3u32), &BigUint::from(0u32)).is_err());
    }
}
