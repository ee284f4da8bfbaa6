//! Twisted Edwards curves: `a x^2 + y^2 = 1 + d x^2 y^2`.
//!
//! Ported from `original_source/curve.py::TwistedEdwardsCurve`. The source
//! carries a stale inline comment claiming `x^2(a - 2y^2) = 1 - y^2`; the
//! actual code computes `bottom = sqrt(a - d*y**2)`, which is what
//! `get_x` below follows.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::curve::montgomery;
use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::field::Field;
use crate::numtheory::sqrt_mod_p;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub x: BigUint,
    pub y: BigUint,
}

/// `(X, Y, Z)`, affine recovered by `(X/Z, Y/Z)`.
pub type Projective = (BigUint, BigUint, BigUint);

#[derive(Debug, Clone)]
pub struct TwistedEdwardsCurve {
    pub a: BigUint,
    pub d: BigUint,
    pub field: Field,
}

impl TwistedEdwardsCurve {
    pub fn new(a: BigUint, d: BigUint, p: BigUint) -> Result<Self> {
        let field = Field::new(p);
        if field.normalize(&a).is_zero() || field.normalize(&d).is_zero() || field.normalize(&field.sub(&a, &d)).is_zero() {
            return Err(Error::InvalidParameters(
                "twisted Edwards curve requires a, d nonzero and a != d".into(),
            ));
        }
        Ok(TwistedEdwardsCurve { a, d, field })
    }

    pub fn neutral_point(&self) -> Point {
        Point {
            x: BigUint::zero(),
            y: BigUint::one(),
        }
    }

    /// `x^2 = (1 - y^2) / (a - d y^2)`.
    pub fn get_x(&self, y: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let yy = f.pow(y, &BigUint::from(2u32));
        let top = f.sub(&BigUint::from(1u32), &yy);
        let bottom = f.sub(&self.a, &f.mul(&self.d, &yy));
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

    /// `y^2 = (1 - a x^2) / (1 - d x^2)`.
    pub fn get_y(&self, x: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let xx = f.pow(x, &BigUint::from(2u32));
        let top = f.sub(&BigUint::from(1u32), &f.mul(&self.a, &xx));
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

    /// `map_affine_to` in `curve.py`: `(x, y) -> ((1+y)/(1-y), (1+y)/((1-y)x))`,
    /// identical in shape to the untwisted Edwards map (the twist only
    /// changes which Montgomery `(A, B)` the map lands on).
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

    /// `map_affine_from`: `(u, v) -> (u/v, (u-1)/(u+1))`.
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

    /// `A = 2(a+d)/(a-d)`, `B = 4/(a-d)`.
    pub fn to_montgomery(&self) -> Result<montgomery::MontgomeryCurve> {
        let f = &self.field;
        let a_minus_d = f.sub(&self.a, &self.d);
        let ma = f.div(&f.mul(&BigUint::from(2u32), &f.add(&self.a, &self.d)), &a_minus_d)?;
        let mb = f.div(&BigUint::from(4u32), &a_minus_d)?;
        montgomery::MontgomeryCurve::new(ma, mb, f.p.clone())
    }
}

impl EllipticCurve for TwistedEdwardsCurve {
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
        let lhs = f.add(&f.mul(&self.a, &xx), &yy);
        let rhs = f.add(&BigUint::from(1u32), &f.mul(&self.d, &f.mul(&xx, &yy)));
        f.normalize(&f.sub(&lhs, &rhs)).is_zero()
    }

    fn invert(&self, p: &Point) -> Point {
        Point {
            x: self.field.negate(&p.x),
            y: p.y.clone(),
        }
    }

    fn add(&self, p: &Point, q: &Point) -> Point {
        let f = &self.field;
        let x1y2 = f.mul(&p.x, &q.y);
        let y1x2 = f.mul(&p.y, &q.x);
        let y1y2 = f.mul(&p.y, &q.y);
        let x1x2 = f.mul(&p.x, &q.x);
        let dxxyy = f.mul(&self.d, &f.mul(&f.mul(&p.x, &q.x), &f.mul(&p.y, &q.y)));

        let x3 = f
            .div(&f.add(&x1y2, &y1x2), &f.add(&BigUint::from(1u32), &dxxyy))
            .expect("add() requires a non-exceptional point pair");
        let y3 = f
            .div(&f.sub(&y1y2, &f.mul(&self.a, &x1x2)), &f.sub(&BigUint::from(1u32), &dxxyy))
            .expect("add() requires a non-exceptional point pair");

        Point {
            x: f.normalize(&x3),
            y: f.normalize(&y3),
        }
    }

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
            x: f.div(x, z).expect("z != 0 on a twisted Edwards projective point"),
            y: f.div(y, z).expect("z != 0 on a twisted Edwards projective point"),
        }
    }

    /// `add-2008-bbjlp`, ported from `curve.py::TwistedEdwardsCurve.add_points_projective`.
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
        let y3 = f.mul(&a, &f.mul(&g, &f.sub(&d, &f.mul(&self.a, &c))));
        let z3 = f.mul(&f_, &g);

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }

    /// `dbl-2008-bbjlp`.
    fn double_projective(&self, p: &Projective) -> Projective {
        let f = &self.field;
        let (x1, y1, z1) = p;

        let b = f.pow(&f.add(x1, y1), &BigUint::from(2u32));
        let c = f.pow(x1, &BigUint::from(2u32));
        let d = f.pow(y1, &BigUint::from(2u32));
        let e = f.mul(&self.a, &c);
        let f_ = f.add(&e, &d);
        let h = f.pow(z1, &BigUint::from(2u32));
        let j = f.sub(&f_, &f.mul(&BigUint::from(2u32), &h));

        let x3 = f.mul(&f.sub(&b, &f.add(&c, &d)), &j);
        let y3 = f.mul(&f_, &f.sub(&e, &d));
        let z3 = f.mul(&f_, &j);

        (f.normalize(&x3), f.normalize(&y3), f.normalize(&z3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Toy curve mod 4141: a = -1 (so 2x^2... ), d = 2. Small illustrative
    // parameters, not a cryptographic scheme.
    fn toy() -> TwistedEdwardsCurve {
        let p = BigUint::from(4141u32);
        let a = &p - BigUint::from(1u32);
        let d = BigUint::from(2u32);
        TwistedEdwardsCurve::new(a, d, p).unwrap()
    }

    #[test]
    fn neutral_is_on_curve() {
        let c = toy();
        assert!(c.point_on_curve(&c.neutral_point()));
    }

    #[test]
    fn points_from_get_y_are_on_curve() {
        let c = toy();
        for x in 2u32..30 {
            for p in c.get_y(&BigUint::from(x)) {
                assert!(c.point_on_curve(&p));
            }
        }
    }

    #[test]
    fn add_with_invert_yields_neutral() {
        let c = toy();
        if let Some(p) = c.get_y(&BigUint::from(5u32)).into_iter().next() {
            let neg_p = c.invert(&p);
            assert_eq!(c.add(&p, &neg_p), c.neutral_point());
        }
    }

    #[test]
    fn projective_add_matches_affine_add() {
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
    fn to_montgomery_round_trips() {
        let c = toy();
        if let Some(p) = c.get_y(&BigUint::from(7u32)).into_iter().next() {
            let mc = c.to_montgomery().unwrap();
            let mp = c.point_to_montgomery(&p).unwrap();
            assert!(mc.point_on_curve(&mp));
            assert_eq!(c.point_from_montgomery(&mp).unwrap(), p);
        }
    }

    #[test]
    fn degenerate_parameters_are_rejected() {
        let p = BigUint::from(4141u32);
        assert!(TwistedEdwardsCurve::new(BigUint::zero(), BigUint::from(2u32), p.clone()).is_err());
        assert!(TwistedEdwardsCurve::new(BigUint::from(3u32), BigUint::from(3u32), p).is_err());
    }
}
