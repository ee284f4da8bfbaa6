//! Generic scalar multiplication via the Montgomery ladder (spec §4.4),
//! written once against the `EllipticCurve` trait and monomorphized per
//! curve family, rather than branching on a runtime variant tag.
//!
//! Ported from `original_source/curve.py::montgomery_ladder` /
//! `montgomery_ladder_projective`. This is the curve-agnostic ladder that
//! walks `Affine`/`Projective` add+double — distinct from
//! `curve::montgomery::MontgomeryCurve::x_ladder`, which is the dedicated
//! x-only RFC 7748 fast path used by Curve25519/Curve41417 ECDH.

use num_bigint::BigUint;

use crate::curve::EllipticCurve;

/// `R0 = neutral, R1 = P`; scan `n`'s bits MSB to LSB, conditionally
/// swapping before each add+double step. Constant-*shape* in its control
/// flow but not constant-*time* in its field arithmetic — spec's Non-goals
/// explicitly exclude side-channel resistance.
pub fn scalar_mul_affine<C: EllipticCurve>(curve: &C, n: &BigUint, p: &C::Affine) -> C::Affine {
    let mut r0 = curve.neutral();
    let mut r1 = p.clone();

    for i in (0..bit_length(n)).rev() {
        if bit_at(n, i) == 0 {
            r1 = curve.add(&r0, &r1);
            r0 = curve.double(&r0);
        } else {
            r0 = curve.add(&r0, &r1);
            r1 = curve.double(&r1);
        }
    }

    r0
}

/// The same ladder, operating on projective coordinates throughout and
/// converting back to affine only once at the end.
pub fn scalar_mul_projective<C: EllipticCurve>(curve: &C, n: &BigUint, p: &C::Affine) -> C::Affine {
    let mut r0 = curve.neutral_projective();
    let mut r1 = curve.affine_to_projective(p);

    for i in (0..bit_length(n)).rev() {
        if bit_at(n, i) == 0 {
            r1 = curve.add_projective(&r0, &r1);
            r0 = curve.double_projective(&r0);
        } else {
            r0 = curve.add_projective(&r0, &r1);
            r1 = curve.double_projective(&r1);
        }
    }

    curve.projective_to_affine(&r0)
}

fn bit_length(n: &BigUint) -> u64 {
    n.bits().max(1)
}

fn bit_at(n: &BigUint, i: u64) -> u8 {
    let bytes = n.to_bytes_le();
    let (byte_idx, bit_idx) = ((i / 8) as usize, (i % 8) as u8);
    match bytes.get(byte_idx) {
        Some(byte) => (byte >> bit_idx) & 1,
        None => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::weierstrass::WeierstrassCurve;

    fn toy() -> WeierstrassCurve {
        WeierstrassCurve::new(BigUint::from(2u32), BigUint::from(3u32), BigUint::from(97u32)).unwrap()
    }

    #[test]
    fn scalar_mul_affine_matches_repeated_addition() {
        let c = toy();
        let g = c.get_y(&BigUint::from(3u32)).into_iter().next().unwrap();

        let via_ladder = scalar_mul_affine(&c, &BigUint::from(5u32), &g);

        let mut via_repeated = c.neutral();
        for _ in 0..5 {
            via_repeated = c.add(&via_repeated, &g);
        }

        assert_eq!(via_ladder, via_repeated);
    }

    #[test]
    fn scalar_mul_projective_matches_affine_ladder() {
        let c = toy();
        let g = c.get_y(&BigUint::from(3u32)).into_iter().next().unwrap();

        let n = BigUint::from(9u32);
        let affine = scalar_mul_affine(&c, &n, &g);
        let projective = scalar_mul_projective(&c, &n, &g);

        assert_eq!(affine, projective);
    }

    #[test]
    fn scalar_mul_by_zero_is_neutral() {
        let c = toy();
        let g = c.get_y(&BigUint::from(3u32)).into_iter().next().unwrap();
        assert_eq!(scalar_mul_affine(&c, &BigUint::from(0u32), &g), c.neutral());
    }
}
