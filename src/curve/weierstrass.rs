//! Short Weierstrass curves: `y^2 = x^3 + ax + b`.
//!
//! Ported from `original_source/curve.py::ShortWeierstrass`, cross-checked
//! against the teacher's `elliptic/normal.rs` (`EllipticCurve`,
//! `EllipticCurvePoint`, `add_points`/`double_point`/`scalar_mul_point_impl`)
//! for the projective law naming (`add-2007-bl`/`dbl-2007-bl`).

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::montgomery::MontgomeryCurve;
use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::field::Field;
use crate::numtheory::sqrt_mod_p;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn affine(x: BigUint, y: BigUint) -> Self {
        Point::Affine { x, y }
    }
}

/// `(X, Y, Z)`; the affine point is `(X/Z, Y/Z)`. Infinity is `(0, 1, 0)`.
pub type Projective = (BigUint, BigUint, BigUint);

#[derive(Debug, Clone)]
pub struct WeierstrassCurve {
    pub a: BigUint,
    pub b: BigUint,
    pub field: Field,
}

impl WeierstrassCurve {
    pub fn new(a: BigUint, b: BigUint, p: BigUint) -> Result<Self> {
        let field = Field::new(p);
        let discriminant = field.add(
            &field.mul(&BigUint::from(4u32), &field.pow(&a, &BigUint::from(3u32))),
            &field.mul(&BigUint::from(27u32), &field.pow(&b, &BigUint::from(2u32))),
        );
        if discriminant.is_zero() {
            return Err(Error::InvalidParameters(
                "short Weierstrass curve is singular: 4a^3 + 27b^2 = 0".into(),
            ));
        }
        Ok(WeierstrassCurve { a, b, field })
    }

    /// Returns the on-curve `y` values for a given `x`, smaller root first.
    pub fn get_y(&self, x: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let rhs = f.normalize(&f.add(&f.pow(x, &BigUint::from(3u32)), &f.mul(&self.a, x)));
        let rhs = f.add(&rhs, &self.b);
        let mut roots = sqrt_mod_p(&rhs, &f.p);
        roots.sort();
        roots
            .into_iter()
            .map(|y| Point::Affine { x: x.clone(), y })
            .filter(|p| self.point_on_curve(p))
            .collect()
    }
}

impl EllipticCurve for WeierstrassCurve {
    type Affine = Point;
    type Projective = Projective;

    fn neutral(&self) -> Point {
        Point::Infinity
    }

    fn neutral_projective(&self) -> Projective {
        (BigUint::zero(), BigUint::from(1u32), BigUint::zero())
    }

    fn point_on_curve(&self, p: &Point) -> bool {
        match p {
            Point::Infinity => true,
            Point::Affine { x, y } => {
                let f = &self.field;
                let lhs = f.pow(y, &BigUint::from(2u32));
                let rhs = f.add(&f.add(&f.pow(x, &BigUint::from(3u32)), &f.mul(&self.a, x)), &self.b);
                f.normalize(&f.sub(&lhs, &rhs)).is_zero()
            }
        }
    }

    fn invert(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: x.clone(),
                y: self.field.negate(y),
            },
        }
    }

    fn add(&self, p: &Point, q: &Point) -> Point {
        let f = &self.field;
        match (p, q) {
            (Point::Infinity, other) | (other, Point::Infinity) => other.clone(),
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if *p == self.invert(q) {
                    return Point::Infinity;
                }
                let dx = f.sub(x2, x1);
                let dy = f.sub(y2, y1);
                let lambda = f
                    .div(&dy, &dx)
                    .expect("add() requires P != Q and P != -Q; see double()");
                let x3 = f.sub(&f.sub(&f.pow(&lambda, &BigUint::from(2u32)), x1), x2);
                let y3 = f.sub(&f.mul(&lambda, &f.sub(x1, &x3)), y1);
                Point::Affine {
                    x: f.normalize(&x3),
                    y: f.normalize(&y3),
                }
            }
        }
    }

    fn double(&self, p: &Point) -> Point {
        let f = &self.field;
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => {
                if y.is_zero() {
                    return Point::Infinity;
                }
                let three_xx = f.mul(&BigUint::from(3u32), &f.pow(x, &BigUint::from(2u32)));
                let num = f.add(&three_xx, &self.a);
                let den = f.mul(&BigUint::from(2u32), y);
                let lambda = f.div(&num, &den).expect("double() requires y != 0");
                let x3 = f.sub(&f.sub(&f.pow(&lambda, &BigUint::from(2u32)), x), x);
                let y3 = f.sub(&f.mul(&lambda, &f.sub(x, &x3)), y);
                Point::Affine {
                    x: f.normalize(&x3),
                    y: f.normalize(&y3),
                }
            }
        }
    }

    fn affine_to_projective(&self, p: &Point) -> Projective {
        match p {
            Point::Infinity => self.neutral_projective(),
            Point::Affine { x, y } => (x.clone(), y.clone(), BigUint::from(1u32)),
        }
    }

    fn projective_to_affine(&self, p: &Projective) -> Point {
        let (x, y, z) = p;
        if z.is_zero() {
            return Point::Infinity;
        }
        let f = &self.field;
        Point::Affine {
            x: f.div(x, z).expect("z != 0 checked above"),
            y: f.div(y, z).expect("z != 0 checked above"),
        }
    }

    /// `add-2007-bl`.
    fn add_projective(&self, p: &Projective, q: &Projective) -> Projective {
        let f = &self.field;
        let neutral = self.neutral_projective();
        if *p == neutral {
            return q.clone();
        }
        if *q == neutral {
            return p.clone();
        }

        let (x1, y1, z1) = p;
        let (x2, y2, z2) = q;

        let u1 = f.mul(x1, z2);
        let u2 = f.mul(x2, z1);
        let s1 = f.mul(y1, z2);
        let s2 = f.mul(y2, z1);
        let zz = f.mul(z1, z2);
        let t = f.add(&u1, &u2);
        let tt = f.mul(&t, &t);
        let m = f.add(&s1, &s2);
        let r = f.add(&f.sub(&tt, &f.mul(&u1, &u2)), &f.mul(&self.a, &f.mul(&zz, &zz)));
        let ff = f.mul(&zz, &m);
        let l = f.mul(&m, &ff);
        let ll = f.mul(&l, &l);
        let g = f.sub(&f.sub(&f.mul(&f.add(&t, &l), &f.add(&t, &l)), &tt), &ll);
        let w = f.sub(&f.mul(&BigUint::from(2u32), &f.mul(&r, &r)), &g);
        let x3 = f.mul(&BigUint::from(2u32), &f.mul(&ff, &w));
        let y3 = f.sub(&f.mul(&r, &f.sub(&g, &f.mul(&BigUint::from(2u32), &w))), &f.mul(&BigUint::from(2u32), &ll));
        let z3 = f.mul(&BigUint::from(4u32), &f.mul(&ff, &f.mul(&ff, &ff)));

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }

    /// `dbl-2007-bl`.
    fn double_projective(&self, p: &Projective) -> Projective {
        let f = &self.field;
        if *p == self.neutral_projective() {
            return self.neutral_projective();
        }

        let (x1, y1, z1) = p;

        let xx = f.mul(x1, x1);
        let zz = f.mul(z1, z1);
        let w = f.add(&f.mul(&self.a, &zz), &f.mul(&BigUint::from(3u32), &xx));
        let s = f.mul(&BigUint::from(2u32), &f.mul(y1, z1));
        let ss = f.mul(&s, &s);
        let sss = f.mul(&s, &ss);
        let r = f.mul(y1, &s);
        let rr = f.mul(&r, &r);
        let b = f.sub(&f.mul(&f.add(x1, &r), &f.add(x1, &r)), &f.add(&xx, &rr));
        let h = f.sub(&f.mul(&w, &w), &f.mul(&BigUint::from(2u32), &b));
        let x3 = f.mul(&h, &s);
        let y3 = f.sub(&f.mul(&w, &f.sub(&b, &h)), &f.mul(&BigUint::from(2u32), &rr));
        let z3 = sss;

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }
}

/// Montgomery → short Weierstrass via `x = Bu - A/3`, `y = Bv`
/// (spec §4.3). Grounded in `MontgomeryCurve::to_short_weierstrass`.
impl WeierstrassCurve {
    pub fn from_montgomery(mc: &MontgomeryCurve) -> Result<Self> {
        let f = &mc.field;
        let three = BigUint::from(3u32);
        let a = f.div(
            &f.sub(&three, &f.pow(&mc.a, &BigUint::from(2u32))),
            &f.mul(&three, &f.pow(&mc.b, &BigUint::from(2u32))),
        )?;
        let b = f.div(
            &f.sub(
                &f.mul(&BigUint::from(2u32), &f.pow(&mc.a, &BigUint::from(3u32))),
                &f.mul(&BigUint::from(9u32), &mc.a),
            ),
            &f.mul(&BigUint::from(27u32), &f.pow(&mc.b, &BigUint::from(3u32))),
        )?;
        WeierstrassCurve::new(a, b, f.p.clone())
    }

    /// Forward map `(u, v) -> (x, y)`.
    pub fn point_from_montgomery(
        mc: &MontgomeryCurve,
        p: &crate::curve::montgomery::Point,
    ) -> Result<Point> {
        let f = &mc.field;
        match p {
            crate::curve::montgomery::Point::Infinity => Ok(Point::Infinity),
            crate::curve::montgomery::Point::Affine { x, y } => {
                let a3 = f.div(&mc.a, &BigUint::from(3u32))?;
                let x_ = f.div(&f.add(x, &a3), &mc.b)?;
                let y_ = f.div(y, &mc.b)?;
                Ok(Point::Affine { x: x_, y: y_ })
            }
        }
    }

    /// Inverse map `(x, y) -> (u, v)`.
    pub fn point_to_montgomery(
        mc: &MontgomeryCurve,
        p: &Point,
    ) -> Result<crate::curve::montgomery::Point> {
        let f = &mc.field;
        match p {
            Point::Infinity => Ok(crate::curve::montgomery::Point::Infinity),
            Point::Affine { x: x_, y: y_ } => {
                let a3 = f.div(&mc.a, &BigUint::from(3u32))?;
                let x = f.sub(&f.mul(x_, &mc.b), &a3);
                let y = f.mul(y_, &mc.b);
                Ok(crate::curve::montgomery::Point::Affine { x, y })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy_curve() -> WeierstrassCurve {
        // y^2 = x^3 + 2x + 3 over F_97, as used in several textbook examples.
        WeierstrassCurve::new(BigUint::from(2u32), BigUint::from(3u32), BigUint::from(97u32)).unwrap()
    }

    #[test]
    fn identity_laws() {
        let c = toy_curve();
        let g = c.get_y(&BigUint::from(3u32)).remove(0);
        assert_eq!(c.add(&g, &Point::Infinity), g);
        assert_eq!(c.add(&Point::Infinity, &g), g);
        assert_eq!(c.double(&Point::Infinity), Point::Infinity);
    }

    #[test]
    fn commutativity() {
        let c = toy_curve();
        let p = c.get_y(&BigUint::from(3u32)).remove(0);
        let q = c.get_y(&BigUint::from(10u32)).remove(0);
        assert_eq!(c.add(&p, &q), c.add(&q, &p));
    }

    #[test]
    fn inverse_law() {
        let c = toy_curve();
        let p = c.get_y(&BigUint::from(3u32)).remove(0);
        let inv = c.invert(&p);
        assert_eq!(c.add(&p, &inv), Point::Infinity);
    }

    #[test]
    fn curve_membership_of_add_and_double() {
        let c = toy_curve();
        let p = c.get_y(&BigUint::from(3u32)).remove(0);
        let q = c.get_y(&BigUint::from(10u32)).remove(0);
        assert!(c.point_on_curve(&c.add(&p, &q)));
        assert!(c.point_on_curve(&c.double(&p)));
    }

    #[test]
    fn projective_round_trip() {
        let c = toy_curve();
        let p = c.get_y(&BigUint::from(3u32)).remove(0);
        let proj = c.affine_to_projective(&p);
        assert_eq!(c.projective_to_affine(&proj), p);
    }

    #[test]
    fn projective_add_matches_affine_add() {
        let c = toy_curve();
        let p = c.get_y(&BigUint::from(3u32)).remove(0);
        let q = c.get_y(&BigUint::from(10u32)).remove(0);

        let expected = c.add(&p, &q);
        let sum_proj = c.add_projective(&c.affine_to_projective(&p), &c.affine_to_projective(&q));
        assert_eq!(c.projective_to_affine(&sum_proj), expected);

        let expected_double = c.double(&p);
        let double_proj = c.double_projective(&c.affine_to_projective(&p));
        assert_eq!(c.projective_to_affine(&double_proj), expected_double);
    }

    #[test]
    fn singular_curve_is_rejected() {
        // a=0, b=0 makes 4a^3+27b^2 = 0.
        assert!(WeierstrassCurve::new(BigUint::zero(), BigUint::zero(), BigUint::from(97u32)).is_err());
    }
}
