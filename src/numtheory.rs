//! Number-theoretic primitives: Legendre symbol, modular square root,
//! extended-Euclid modular inverse, bit length.
//!
//! Ported from `original_source/numbertheory.py`, which this crate follows
//! branch-for-branch rather than the teacher's `math` crate (the teacher
//! doesn't carry a standalone Tonelli–Shanks implementation at all — its
//! `SecureModulo` wrapper only exponentiates and never needs a square root
//! outside the one broken `isqrt` call documented in DESIGN.md).

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::errors::{Error, Result};

/// The Legendre symbol `(n/p)`, one of `-1`, `0`, `1`.
///
/// `0` exactly when `p` divides `n`.
pub fn legendre(n: &BigUint, p: &BigUint) -> i8 {
    let n = n % p;
    let exponent = (p - 1u32) / 2u32;
    let ls = n.modpow(&exponent, p);
    if ls.is_zero() {
        0
    } else if ls == p - 1u32 {
        -1
    } else {
        1
    }
}

/// General modular square root via Tonelli–Shanks. Assumes `p` is an odd
/// prime and `n` is a nonzero quadratic residue mod `p`.
fn tonelli_shanks(n: &BigUint, p: &BigUint) -> (BigUint, BigUint) {
    let one = BigUint::one();

    let mut q = p - &one;
    let mut s: u32 = 0;
    while (&q).is_even() {
        s += 1;
        q /= 2u32;
    }

    let mut z = BigUint::one();
    while legendre(&z, p) != -1 {
        z += 1u32;
    }
    let mut c = z.modpow(&q, p);

    let mut x = n.modpow(&((&q + &one) / 2u32), p);
    let mut t = n.modpow(&q, p);
    let mut m = s;

    while t != one {
        // Find the smallest i in (0, m) with t^(2^i) == 1.
        let mut e = BigUint::from(2u32);
        let mut i = m;
        for candidate in 1..m {
            if t.modpow(&e, p) == one {
                i = candidate;
                break;
            }
            e *= 2u32;
        }

        let b = c.modpow(&BigUint::from(2u32).pow(m - i - 1), p);
        x = (&x * &b) % p;
        t = (&t * &b * &b) % p;
        c = (&b * &b) % p;
        m = i;
    }

    let neg_x = p - &x;
    (x, neg_x)
}

/// All square roots of `n` modulo `p`, as canonical representatives in
/// `[0, p)`. Zero or one roots if `p == 2` or `n` is the additive identity,
/// two roots otherwise, empty if `n` is a non-residue.
pub fn sqrt_mod_p(n: &BigUint, p: &BigUint) -> Vec<BigUint> {
    let n = n % p;

    if n.is_zero() {
        return vec![BigUint::zero()];
    }

    if p == &BigUint::from(2u32) {
        return vec![n];
    }

    if legendre(&n, p) != 1 {
        return vec![];
    }

    let four = BigUint::from(4u32);
    let eight = BigUint::from(8u32);

    // p ≡ 3 (mod 4)
    if (p % &four) == BigUint::from(3u32) {
        let exponent = (p + 1u32) / &four;
        let x = n.modpow(&exponent, p);
        return vec![x.clone(), p - &x];
    }

    // p ≡ 5 (mod 8)
    if (p % &eight) == BigUint::from(5u32) {
        let exponent = (p + 3u32) / &four;
        if n == n.modpow(&exponent, p) {
            let x = n.modpow(&((p + 3u32) / &eight), p);
            return vec![x.clone(), p - &x];
        }

        let s = n.modpow(&((p + 3u32) / &eight), p);
        let sqrt_neg_one = tonelli_shanks(&(p - 1u32), p).0;
        let x = (&sqrt_neg_one * &s) % p;
        return vec![x.clone(), p - &x];
    }

    // General case.
    let (x, neg_x) = tonelli_shanks(&n, p);
    vec![x, neg_x]
}

/// Modular inverse of `n` modulo `p` via the extended Euclidean algorithm.
/// Fails with `NotInvertible` if `gcd(n, p) != 1`.
pub fn inverse_of(n: &BigUint, p: &BigUint) -> Result<BigUint> {
    use num_bigint::BigInt;

    let a = BigInt::from((n % p).clone());
    let m = BigInt::from(p.clone());
    let (gcd, x, _y) = extended_euclid(&a, &m);

    if gcd != BigInt::one() {
        return Err(Error::NotInvertible(n.clone()));
    }

    let x = ((x % &m) + &m) % &m;
    Ok(x.to_biguint().expect("reduced value is non-negative"))
}

/// `(gcd, x, y)` with `a*x + b*y = gcd`, via the extended Euclidean
/// algorithm — ported from `original_source/numbertheory.py::extended_euclid`.
fn extended_euclid(
    a: &num_bigint::BigInt,
    b: &num_bigint::BigInt,
) -> (num_bigint::BigInt, num_bigint::BigInt, num_bigint::BigInt) {
    use num_bigint::BigInt;

    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while r != BigInt::zero() {
        let q = &old_r / &r;

        let new_r = &old_r - &q * &r;
        old_r = r;
        r = new_r;

        let new_s = &old_s - &q * &s;
        old_s = s;
        s = new_s;

        let new_t = &old_t - &q * &t;
        old_t = t;
        t = new_t;
    }

    (old_r, old_s, old_t)
}

/// Bit length of `n` (`floor(log2(n)) + 1`; `0` for `n == 0`).
pub fn count_bits(n: &BigUint) -> u64 {
    n.bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_mod_p_branch_p_3_mod_4() {
        let p = BigUint::from(7919u32);
        let roots = sqrt_mod_p(&BigUint::from(4u32), &p);
        assert!(roots.contains(&BigUint::from(2u32)));
    }

    #[test]
    fn sqrt_mod_p_branch_p_5_mod_8() {
        let p = BigUint::from(7901u32);
        let roots = sqrt_mod_p(&BigUint::from(4u32), &p);
        assert!(roots.contains(&BigUint::from(2u32)));
    }

    #[test]
    fn sqrt_mod_p_branch_tonelli_shanks() {
        let p = BigUint::from(7873u32);
        let roots = sqrt_mod_p(&BigUint::from(4u32), &p);
        assert!(roots.contains(&BigUint::from(2u32)));
    }

    #[test]
    fn sqrt_mod_p_nonresidue_is_empty() {
        let p = BigUint::from(7919u32);
        // 7919 is prime; 3 is a quadratic non-residue mod 7919 (checked via
        // legendre directly rather than hardcoding an external claim).
        let mut y = BigUint::from(2u32);
        while legendre(&y, &p) != -1 {
            y += 1u32;
        }
        assert!(sqrt_mod_p(&y, &p).is_empty());
    }

    #[test]
    fn inverse_of_matches_definition() {
        let p = BigUint::from(101u32);
        for n in 1u32..101 {
            let n = BigUint::from(n);
            let inv = inverse_of(&n, &p).unwrap();
            assert_eq!((&n * &inv) % &p, BigUint::one());
        }
    }

    #[test]
    fn count_bits_matches_bit_length() {
        assert_eq!(count_bits(&BigUint::zero()), 0);
        assert_eq!(count_bits(&BigUint::from(1u32)), 1);
        assert_eq!(count_bits(&BigUint::from(255u32)), 8);
        assert_eq!(count_bits(&BigUint::from(256u32)), 9);
    }
}
