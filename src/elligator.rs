//! Elligator 2: maps uniformly-random field elements to/from points on a
//! Montgomery curve with `B = 1`, so that curve points can be represented
//! indistinguishably from random bitstrings.
//!
//! Ported from `original_source/elligator.py::Elligator2`.

use num_bigint::BigUint;
use num_traits::One;

use crate::curve::montgomery::{MontgomeryCurve, Point};
use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::numtheory::{legendre, sqrt_mod_p};

pub struct Elligator2 {
    curve: MontgomeryCurve,
    /// A fixed non-square element of the field, used as the "twist"
    /// constant in both maps: `-1` when `p ≡ 3 (mod 4)`, `2` when
    /// `p ≡ 5 (mod 8)`.
    u: BigUint,
}

impl Elligator2 {
    pub fn new(curve: MontgomeryCurve) -> Result<Self> {
        if curve.b != BigUint::from(1u32) {
            return Err(Error::Unsupported("Elligator2 requires a Montgomery curve with B = 1"));
        }

        let p = &curve.field.p;
        let u = if (p % &BigUint::from(4u32)) == BigUint::from(3u32) {
            curve.field.negate(&BigUint::from(1u32))
        } else if (p % &BigUint::from(8u32)) == BigUint::from(5u32) {
            BigUint::from(2u32)
        } else {
            return Err(Error::Unsupported(
                "Elligator2 needs p = 3 mod 4 or p = 5 mod 8 to pick a nonsquare constant",
            ));
        };

        Ok(Elligator2 { curve, u })
    }

    /// Maps a curve point to one of the (up to two) field elements that
    /// `random_to_point` would map back to it. Returns the smaller root
    /// when both exist (spec §9 square-root-arbitrariness convention).
    pub fn point_to_random(&self, p: &Point) -> Result<BigUint> {
        let (x, y) = match p {
            Point::Affine { x, y } => (x, y),
            Point::Infinity => {
                return Err(Error::InvalidParameters(
                    "Elligator2 cannot map the point at infinity".into(),
                ))
            }
        };

        let f = &self.curve.field;
        let half = (&f.p - BigUint::one()) / 2u32;

        let candidate = if *y <= half {
            f.div(&f.negate(x), &f.mul(&f.add(x, &self.curve.a), &self.u))?
        } else {
            f.div(&f.negate(&f.add(x, &self.curve.a)), &f.mul(x, &self.u))?
        };

        let mut roots = sqrt_mod_p(&candidate, &f.p);
        roots.sort();
        roots.into_iter().next().ok_or(Error::NotOnCurve)
    }

    /// Maps a field element `r` to a point on the curve.
    pub fn random_to_point(&self, r: &BigUint) -> Result<Point> {
        let f = &self.curve.field;
        let one = BigUint::one();

        let denom = f.add(&one, &f.mul(&self.u, &f.pow(r, &BigUint::from(2u32))));
        let v = f.div(&f.negate(&self.curve.a), &denom)?;

        let rhs = f.add(
            &f.add(&f.pow(&v, &BigUint::from(3u32)), &f.mul(&self.curve.a, &f.pow(&v, &BigUint::from(2u32)))),
            &f.mul(&self.curve.b, &v),
        );
        let epsilon = legendre(&rhs, &f.p);

        let eps = if epsilon >= 0 { BigUint::one() } else { f.negate(&BigUint::one()) };
        let one_minus_eps = if epsilon >= 0 { BigUint::from(0u32) } else { BigUint::from(2u32) };

        let x = f.sub(
            &f.mul(&eps, &v),
            &f.div(&f.mul(&one_minus_eps, &self.curve.a), &BigUint::from(2u32))?,
        );

        let xxx_axx_bx = f.add(
            &f.add(&f.pow(&x, &BigUint::from(3u32)), &f.mul(&self.curve.a, &f.pow(&x, &BigUint::from(2u32)))),
            &f.mul(&self.curve.b, &x),
        );
        let mut roots = sqrt_mod_p(&xxx_axx_bx, &f.p);
        roots.sort();
        let sqrt_val = roots.into_iter().next().ok_or(Error::NotOnCurve)?;
        let y = f.mul(&f.negate(&eps), &sqrt_val);

        let point = Point::Affine { x: f.normalize(&x), y: f.normalize(&y) };
        if !self.curve.point_on_curve(&point) {
            return Err(Error::NotOnCurve);
        }
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve25519() -> MontgomeryCurve {
        let p = (BigUint::from(1u32) << 255) - BigUint::from(19u32);
        MontgomeryCurve::new(BigUint::from(486662u32), BigUint::from(1u32), p).unwrap()
    }

    #[test]
    fn random_to_point_yields_a_point_on_curve() {
        let elligator = Elligator2::new(curve25519()).unwrap();
        let r = BigUint::from(12345u32);
        let point = elligator.random_to_point(&r).unwrap();
        assert!(elligator.curve.point_on_curve(&point));
    }

    #[test]
    fn rejects_curves_with_b_not_one() {
        let p = (BigUint::from(1u32) << 255) - BigUint::from(19u32);
        let curve = MontgomeryCurve::new(BigUint::from(486662u32), BigUint::from(7u32), p).unwrap();
        assert!(Elligator2::new(curve).is_err());
    }

    #[test]
    fn point_to_random_and_back_lands_on_a_point_on_curve() {
        let elligator = Elligator2::new(curve25519()).unwrap();
        let r = BigUint::from(999u32);
        let point = elligator.random_to_point(&r).unwrap();
        let recovered_r = elligator.point_to_random(&point).unwrap();
        let roundtrip_point = elligator.random_to_point(&recovered_r).unwrap();
        assert!(elligator.curve.point_on_curve(&roundtrip_point));
    }
}
