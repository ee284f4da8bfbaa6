//! Edwards curves (c = 1): `x^2 + y^2 = 1 + d x^2 y^2`.
//!
//! Ported from `original_source/curve.py::EdwardsCurve`. The neutral
//! element `(0, 1)` is a normal point on these curves (no point-at-infinity
//! special case), so `Point` carries no `Infinity` variant — unlike
//! `weierstrass`/`montgomery`, whose laws are not complete at the origin.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::curve::montgomery;
use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::field::Field;
use crate::numtheory::{legendre, sqrt_mod_p};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

/// `(X, Y, Z)`, affine recovered by `(X/Z, Y/Z)`.
pub type Projective = (BigUint, BigUint, BigUint);

#[derive(Debug, Clone)]
pub struct EdwardsCurve {
    pub d: BigUint,
    pub field: Field,
    /// Non-fatal diagnostic (spec §9): true when `d` is not a square mod
    /// `p`, in which case the curve's addition law is complete (every pair
    /// of points adds without an exceptional case). A curve with `is_complete
    /// == false` still works, it just has the usual Edwards exceptional
    /// points to watch for.
    pub is_complete: bool,
}

impl EdwardsCurve {
    pub fn new(d: BigUint, p: BigUint) -> Result<Self> {
        let field = Field::new(p);
        let check = field.mul(&d, &field.sub(&BigUint::from(1u32), &d));
        if check.is_zero() {
            return Err(Error::InvalidParameters(
                "Edwards curve is singular: d(1 - d) = 0".into(),
            ));
        }
        let is_complete = legendre(&d, &field.p) == -1;
        Ok(EdwardsCurve { d, field, is_complete })
    }

    pub fn neutral_point(&self) -> Point {
        Point {
            x: BigUint::zero(),
            y: BigUint::one(),
        }
    }

    /// `x^2 = (1 - y^2) / (1 - d y^2)`, then a square root mod `p`.
    pub fn get_x(&self, y: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let yy = f.pow(y, &BigUint::from(2u32));
        let top = f.sub(&BigUint::from(1u32), &yy);
        let bottom = f.sub(&BigUint::from(1u32), &f.mul(&self.d, &yy));
        let xx = match f.div(&top, &bottom) {
            Ok(v) => v,
            Err(_) => return vec![],
        };
        let mut roots = sqrt_mod_p(&xx, &f.p);
        roots.sort();
        roots
            .into_iter()
            .map(|x| Point { x, y: y.clone() })
            .filter(|p| self.point_on_curve(p))
            .collect()
    }

    /// `y^2 = (1 - x^2) / (1 - d x^2)`, by the curve's `x <-> y` symmetry.
    pub fn get_y(&self, x: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let xx = f.pow(x, &BigUint::from(2u32));
        let top = f.sub(&BigUint::from(1u32), &xx);
        let bottom = f.sub(&BigUint::from(1u32), &f.mul(&self.d, &xx));
        let yy = match f.div(&top, &bottom) {
            Ok(v) => v,
            Err(_) => return vec![],
        };
        let mut roots = sqrt_mod_p(&yy, &f.p);
        roots.sort();
        roots
            .into_iter()
            .map(|y| Point { x: x.clone(), y })
            .filter(|p| self.point_on_curve(p))
            .collect()
    }

    /// Point map to the birationally-equivalent Montgomery curve, per
    /// `EdwardsCurve.to_montgomery` in `curve.py`: `A = 2(1+d)/(1-d)`,
    /// `B = 4/(1-d)`.
    pub fn to_montgomery(&self) -> Result<montgomery::MontgomeryCurve> {
        let f = &self.field;
        let one_minus_d = f.sub(&BigUint::from(1u32), &self.d);
        let a = f.div(&f.mul(&BigUint::from(2u32), &f.add(&BigUint::from(1u32), &self.d)), &one_minus_d)?;
        let b = f.div(&BigUint::from(4u32), &one_minus_d)?;
        montgomery::MontgomeryCurve::new(a, b, f.p.clone())
    }

    /// `(x, y) -> ((1+y)/(1-y), (1+y)/((1-y)x))`.
    pub fn point_to_montgomery(&self, p: &Point) -> Result<montgomery::Point> {
        let f = &self.field;
        if p.y == BigUint::from(1u32) {
            return Ok(montgomery::Point::Infinity);
        }
        let one_minus_y = f.sub(&BigUint::from(1u32), &p.y);
        let one_plus_y = f.add(&BigUint::from(1u32), &p.y);
        let mx = f.div(&one_plus_y, &one_minus_y)?;
        let my = f.div(&one_plus_y, &f.mul(&one_minus_y, &p.x))?;
        Ok(montgomery::Point::Affine { x: mx, y: my })
    }

    /// Inverse map: `(u, v) -> (u/v, (u-1)/(u+1))`.
    pub fn point_from_montgomery(&self, p: &montgomery::Point) -> Result<Point> {
        match p {
            montgomery::Point::Infinity => Ok(self.neutral_point()),
            montgomery::Point::Affine { x: u, y: v } => {
                let f = &self.field;
                let ex = f.div(u, v)?;
                let ey = f.div(&f.sub(u, &BigUint::from(1u32)), &f.add(u, &BigUint::from(1u32)))?;
                Ok(Point { x: ex, y: ey })
            }
        }
    }
}

impl EllipticCurve for EdwardsCurve {
    type Affine = Point;
    type Projective = Projective;

    fn neutral(&self) -> Point {
        self.neutral_point()
    }

    fn neutral_projective(&self) -> Projective {
        (BigUint::zero(), BigUint::from(1u32), BigUint::from(1u32))
    }

    fn point_on_curve(&self, p: &Point) -> bool {
        let f = &self.field;
        let xx = f.pow(&p.x, &BigUint::from(2u32));
        let yy = f.pow(&p.y, &BigUint::from(2u32));
        let lhs = f.add(&xx, &yy);
        let rhs = f.add(&BigUint::from(1u32), &f.mul(&self.d, &f.mul(&xx, &yy)));
        f.normalize(&f.sub(&lhs, &rhs)).is_zero()
    }

    fn invert(&self, p: &Point) -> Point {
        Point {
            x: self.field.negate(&p.x),
            y: p.y.clone(),
        }
    }

    /// Complete affine addition law (curve.py's `EdwardsCurve.add_points`).
    fn add(&self, p: &Point, q: &Point) -> Point {
        let f = &self.field;
        let x1y2 = f.mul(&p.x, &q.y);
        let y1x2 = f.mul(&p.y, &q.x);
        let y1y2 = f.mul(&p.y, &q.y);
        let x1x2 = f.mul(&p.x, &q.x);
        let dxxyy = f.mul(&self.d, &f.mul(&f.mul(&p.x, &q.x), &f.mul(&p.y, &q.y)));

        let x3 = f
            .div(&f.add(&x1y2, &y1x2), &f.add(&BigUint::from(1u32), &dxxyy))
            .expect("Edwards addition is complete for d a non-square");
        let y3 = f
            .div(
                &f.sub(&y1y2, &x1x2),
                &f.sub(&BigUint::from(1u32), &dxxyy),
            )
            .expect("Edwards addition is complete for d a non-square");

        Point {
            x: f.normalize(&x3),
            y: f.normalize(&y3),
        }
    }

    /// `curve.py` leaves doubling as `add_points(P, P)` (`# XXX`) — kept
    /// verbatim rather than specializing the formula.
    fn double(&self, p: &Point) -> Point {
        self.add(p, p)
    }

    fn affine_to_projective(&self, p: &Point) -> Projective {
        (p.x.clone(), p.y.clone(), BigUint::from(1u32))
    }

    fn projective_to_affine(&self, p: &Projective) -> Point {
        let (x, y, z) = p;
        let f = &self.field;
        Point {
            x: f.div(x, z).expect("z != 0 on an Edwards projective point"),
            y: f.div(y, z).expect("z != 0 on an Edwards projective point"),
        }
    }

    /// `add-2007-bl-2`, ported field-operation-by-field-operation from
    /// `curve.py::EdwardsCurve.add_points_projective`.
    fn add_projective(&self, p: &Projective, q: &Projective) -> Projective {
        let f = &self.field;
        let (x1, y1, z1) = p;
        let (x2, y2, z2) = q;

        let a = f.mul(z1, z2);
        let b = f.pow(&a, &BigUint::from(2u32));
        let c = f.mul(x1, x2);
        let d = f.mul(y1, y2);
        let e = f.mul(&self.d, &f.mul(&c, &d));
        let f_ = f.sub(&b, &e);
        let g = f.add(&b, &e);
        let x3 = f.mul(&a, &f.mul(&f_, &f.sub(&f.mul(&f.add(x1, y1), &f.add(x2, y2)), &f.add(&c, &d))));
        let y3 = f.mul(&a, &f.mul(&g, &f.sub(&d, &c)));
        let z3 = f.mul(&f_, &g);

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }

    /// `dbl-2007-bl-2`.
    fn double_projective(&self, p: &Projective) -> Projective {
        let f = &self.field;
        let (x1, y1, z1) = p;

        let b = f.pow(&f.add(x1, y1), &BigUint::from(2u32));
        let c = f.pow(x1, &BigUint::from(2u32));
        let d = f.pow(y1, &BigUint::from(2u32));
        let e = f.add(&c, &d);
        let h = f.pow(z1, &BigUint::from(2u32));
        let j = f.sub(&e, &f.mul(&BigUint::from(2u32), &h));

        let x3 = f.mul(&f.sub(&b, &e), &j);
        let y3 = f.mul(&e, &f.sub(&c, &d));
        let z3 = f.mul(&e, &j);

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Toy curve: x^2 + y^2 = 1 - 3 x^2 y^2 mod 4141 (4141 is prime), with
    // d = -3 mod 4141 chosen so it is a quadratic non-residue (complete law).
    fn toy() -> EdwardsCurve {
        let p = BigUint::from(4141u32);
        let d = &p - BigUint::from(3u32);
        EdwardsCurve::new(d, p).unwrap()
    }

    #[test]
    fn neutral_is_identity() {
        let c = toy();
        let n = c.neutral_point();
        let any_point = c.get_y(&BigUint::from(2u32));
        if let Some(p) = any_point.first() {
            assert_eq!(c.add(&n, p), p.clone());
        }
    }

    #[test]
    fn point_is_on_curve_after_get_y() {
        let c = toy();
        for x in 2u32..30 {
            for p in c.get_y(&BigUint::from(x)) {
                assert!(c.point_on_curve(&p));
            }
        }
    }

    #[test]
    fn add_matches_invert_law() {
        let c = toy();
        if let Some(p) = c.get_y(&BigUint::from(5u32)).into_iter().next() {
            let neg_p = c.invert(&p);
            let sum = c.add(&p, &neg_p);
            assert_eq!(sum, c.neutral_point());
        }
    }

    #[test]
    fn projective_round_trip_matches_affine_add() {
        let c = toy();
        let ps = c.get_y(&BigUint::from(7u32));
        let qs = c.get_y(&BigUint::from(11u32));
        if let (Some(p), Some(q)) = (ps.into_iter().next(), qs.into_iter().next()) {
            let affine_sum = c.add(&p, &q);
            let proj_sum = c.add_projective(&c.affine_to_projective(&p), &c.affine_to_projective(&q));
            assert_eq!(c.projective_to_affine(&proj_sum), affine_sum);
        }
    }

    #[test]
    fn to_montgomery_and_back_is_identity() {
        let c = toy();
        if let Some(p) = c.get_y(&BigUint::from(7u32)).into_iter().next() {
            let mc = c.to_montgomery().unwrap();
            let mp = c.point_to_montgomery(&p).unwrap();
            assert!(mc.point_on_curve(&mp));
            let back = c.point_from_montgomery(&mp).unwrap();
            assert_eq!(back, p);
        }
    }

    #[test]
    fn singular_curve_is_rejected() {
        assert!(EdwardsCurve::new(BigUint::from(1u32), BigUint::from(4141u32)).is_err());
    }
}
