//! Montgomery curves: `By^2 = x^3 + Ax^2 + x`.
//!
//! Ported from `original_source/curve.py::MontgomeryCurve`, cross-checked
//! against the teacher's `elliptic/montgomery.rs` for the RFC 7748 x-only
//! ladder (`curve_mul`) used by the Curve25519/Curve41417 schemes.
//!
//! Montgomery's "projective" coordinates are the two-coordinate `(X, Z)`
//! system (the glossary: "the Montgomery variant uses (X, Z) with the y
//! coordinate discarded"). Differential addition needs a third point,
//! `P - Q`, which does not fit the uniform two-argument `add_projective`
//! signature the other three curve families share — `original_source`'s
//! own `diffadd_points_xy` is broken for exactly this reason (it references
//! an undefined third point `P3`/`X3`/`Z3`; see DESIGN.md open question
//! (b)). This module exposes `diff_add` as its own three-argument method
//! instead of forcing it through `EllipticCurve::add_projective`, which is
//! implemented here using the *other* well-defined Montgomery projective
//! operation: a full `(X, Y, Z)` add/double built from the affine law,
//! analogous to the other three curve families, while `diff_add`/`x_ladder`
//! remain the dedicated x-only fast path used by ECDH.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::curve::EllipticCurve;
use crate::errors::{Error, Result};
use crate::field::Field;
use crate::numtheory::sqrt_mod_p;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

/// `(X, Y, Z)`, the affine point recovered by `(X/Z, Y/Z)`.
pub type Projective = (BigUint, BigUint, BigUint);

/// `(X, Z)` x-only coordinates used by the RFC 7748-style ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xz {
    pub x: BigUint,
    pub z: BigUint,
}

#[derive(Debug, Clone)]
pub struct MontgomeryCurve {
    pub a: BigUint,
    pub b: BigUint,
    pub field: Field,
}

impl MontgomeryCurve {
    pub fn new(a: BigUint, b: BigUint, p: BigUint) -> Result<Self> {
        let field = Field::new(p);
        let check = field.mul(&b, &field.sub(&field.pow(&a, &BigUint::from(2u32)), &BigUint::from(4u32)));
        if check.is_zero() {
            return Err(Error::InvalidParameters(
                "Montgomery curve is singular: B(A^2 - 4) = 0".into(),
            ));
        }
        Ok(MontgomeryCurve { a, b, field })
    }

    pub fn get_y(&self, x: &BigUint) -> Vec<Point> {
        let f = &self.field;
        let b_yy = f.normalize(&f.add(&f.pow(x, &BigUint::from(3u32)), &f.mul(&self.a, &f.pow(x, &BigUint::from(2u32)))));
        let b_yy = f.add(&b_yy, x);
        let yy = match f.div(&b_yy, &self.b) {
            Ok(v) => v,
            Err(_) => return vec![],
        };
        let mut roots = sqrt_mod_p(&yy, &f.p);
        roots.sort();
        roots
            .into_iter()
            .map(|y| Point::Affine { x: x.clone(), y })
            .filter(|p| self.point_on_curve(p))
            .collect()
    }

    /// Unsupported: recovering `x` from a bare `y` requires solving a
    /// generic cubic in `x`, which `original_source/curve.py` itself leaves
    /// as `raise NotImplementedError('get_x')`. Spec's Non-goals explicitly
    /// exclude "recovery of a full point from a bare x-coordinate on
    /// Montgomery curves" — the same asymmetry, mirrored here for `y`.
    pub fn get_x(&self, _y: &BigUint) -> Result<Vec<Point>> {
        Err(Error::Unsupported("Montgomery curve get_x"))
    }

    fn half_b_coeff(&self) -> (BigUint, BigUint) {
        let f = &self.field;
        (f.mul(&BigUint::from(2u32), &self.b), f.pow(&self.b, &BigUint::from(2u32)))
    }

    /// `x_ladder`: the RFC 7748 Montgomery-ladder-with-swap on x-only
    /// coordinates, assuming `B = 1`. Ported from the teacher's
    /// `elliptic/montgomery.rs::curve_mul`. `a24 = (A - 2) / 4`.
    pub fn x_ladder(&self, k: &BigUint, u: &BigUint, bits: u64) -> BigUint {
        let f = &self.field;
        let a24 = f
            .div(&f.sub(&self.a, &BigUint::from(2u32)), &BigUint::from(4u32))
            .expect("4 is invertible modulo an odd prime");

        let (mut x1, mut x2, mut z2, mut x3, mut z3) = (
            u.clone(),
            BigUint::from(1u32),
            BigUint::zero(),
            u.clone(),
            BigUint::from(1u32),
        );
        let mut swap = 0u8;

        for t in (0..bits).rev() {
            let k_t = bit_at(k, t);
            swap ^= k_t;
            if swap == 1 {
                core::mem::swap(&mut x2, &mut x3);
                core::mem::swap(&mut z2, &mut z3);
            }
            swap = k_t;

            let a = f.add(&x2, &z2);
            let aa = f.mul(&a, &a);
            let b = f.sub(&x2, &z2);
            let bb = f.mul(&b, &b);
            let e = f.sub(&aa, &bb);
            let c = f.add(&x3, &z3);
            let d = f.sub(&x3, &z3);
            let da = f.mul(&d, &a);
            let cb = f.mul(&c, &b);

            x3 = f.pow(&f.add(&da, &cb), &BigUint::from(2u32));
            z3 = f.mul(&x1, &f.pow(&f.sub(&da, &cb), &BigUint::from(2u32)));
            x2 = f.mul(&aa, &bb);
            z2 = f.mul(&e, &f.add(&aa, &f.mul(&a24, &e)));
        }

        if swap == 1 {
            core::mem::swap(&mut x2, &mut x3);
            core::mem::swap(&mut z2, &mut z3);
        }

        f.div(&x2, &z2).unwrap_or_else(|_| BigUint::zero())
    }

    /// `(X, Y, Z) -> (X/Z, Y/Z)`, recovering `y` via `get_y` and picking the
    /// smaller root (spec §9 square-root arbitrariness).
    pub fn xz_to_affine(&self, xz: &Xz) -> Result<Point> {
        if xz.z.is_zero() {
            return Ok(Point::Infinity);
        }
        let f = &self.field;
        let x = f.div(&xz.x, &xz.z)?;
        let mut ys = self.get_y(&x);
        ys.sort_by(|a, b| match (a, b) {
            (Point::Affine { y: ya, .. }, Point::Affine { y: yb, .. }) => ya.cmp(yb),
            _ => core::cmp::Ordering::Equal,
        });
        ys.into_iter()
            .next()
            .ok_or_else(|| Error::NotOnCurve)
    }

    pub fn affine_to_xz(&self, p: &Point) -> Xz {
        match p {
            Point::Infinity => Xz {
                x: BigUint::from(1u32),
                z: BigUint::zero(),
            },
            Point::Affine { x, .. } => Xz {
                x: x.clone(),
                z: BigUint::from(1u32),
            },
        }
    }

    /// `dadd-1987-m-3`: differential addition, recovering `P + Q` from `P`,
    /// `Q` and `P - Q` (see module docs and DESIGN.md open question (b)).
    pub fn diff_add(&self, p: &Xz, q: &Xz, p_minus_q: &Xz) -> Xz {
        let f = &self.field;
        let a = f.add(&p.x, &p.z);
        let b = f.sub(&p.x, &p.z);
        let c = f.add(&q.x, &q.z);
        let d = f.sub(&q.x, &q.z);
        let da = f.mul(&d, &a);
        let cb = f.mul(&c, &b);
        let x5 = f.mul(&p_minus_q.z, &f.pow(&f.add(&da, &cb), &BigUint::from(2u32)));
        let z5 = f.mul(&p_minus_q.x, &f.pow(&f.sub(&da, &cb), &BigUint::from(2u32)));
        Xz { x: x5, z: z5 }
    }

    /// x-only doubling: `X3 = (X^2-Z^2)^2`, `Z3 = 4XZ(X^2+AXZ+Z^2)`.
    pub fn double_xz(&self, p: &Xz) -> Xz {
        let f = &self.field;
        let xx = f.pow(&p.x, &BigUint::from(2u32));
        let zz = f.pow(&p.z, &BigUint::from(2u32));
        let x3 = f.pow(&f.sub(&xx, &zz), &BigUint::from(2u32));
        let axz = f.mul(&self.a, &f.mul(&p.x, &p.z));
        let z3 = f.mul(
            &BigUint::from(4u32),
            &f.mul(&f.mul(&p.x, &p.z), &f.add(&f.add(&xx, &axz), &zz)),
        );
        Xz { x: x3, z: z3 }
    }
}

fn bit_at(n: &BigUint, i: u64) -> u8 {
    let bytes = n.to_bytes_le();
    let (byte_idx, bit_idx) = ((i / 8) as usize, (i % 8) as u8);
    match bytes.get(byte_idx) {
        Some(byte) => (byte >> bit_idx) & 1,
        None => 0,
    }
}

impl EllipticCurve for MontgomeryCurve {
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
                let lhs = f.mul(&self.b, &f.pow(y, &BigUint::from(2u32)));
                let rhs = f.add(&f.add(&f.pow(x, &BigUint::from(3u32)), &f.mul(&self.a, &f.pow(x, &BigUint::from(2u32)))), x);
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
                let dy = f.sub(y2, y1);
                let dx = f.sub(x2, x1);
                let x3 = f.sub(
                    &f.sub(
                        &f.div(&f.mul(&self.b, &f.mul(&dy, &dy)), &f.mul(&dx, &dx))
                            .expect("add() requires P != Q and P != -Q"),
                        &self.a,
                    ),
                    &f.add(x1, x2),
                );
                let num2 = f.mul(&f.add(&f.add(x1, x1), &f.add(x2, &self.a)), &dy);
                let den2b = f.mul(&self.b, &f.mul(&dy, &f.mul(&dy, &dy)));
                let y3 = f.sub(
                    &f.sub(
                        &f.div(&num2, &dx).expect("dx != 0"),
                        &f.div(&den2b, &f.mul(&dx, &f.mul(&dx, &dx))).expect("dx != 0"),
                    ),
                    y1,
                );
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
            Point::Affine { x: x1, y: y1 } => {
                if y1.is_zero() {
                    return Point::Infinity;
                }
                let (two_b, _) = self.half_b_coeff();
                let three_xx = f.mul(&BigUint::from(3u32), &f.pow(x1, &BigUint::from(2u32)));
                let two_a_x = f.mul(&BigUint::from(2u32), &f.mul(&self.a, x1));
                let slope_num = f.add(&f.add(&three_xx, &two_a_x), &BigUint::from(1u32));
                let den = f.mul(&two_b, y1);

                let x3 = f.sub(
                    &f.sub(
                        &f.div(&f.mul(&self.b, &f.mul(&slope_num, &slope_num)), &f.mul(&den, &den))
                            .expect("double() requires y != 0"),
                        &self.a,
                    ),
                    &f.add(x1, x1),
                );
                let num2 = f.mul(&f.add(&f.add(x1, x1), &f.add(x1, &self.a)), &slope_num);
                let den2b = f.mul(&self.b, &f.mul(&slope_num, &f.mul(&slope_num, &slope_num)));
                let y3 = f.sub(
                    &f.sub(
                        &f.div(&num2, &den).expect("y != 0"),
                        &f.div(&den2b, &f.mul(&den, &f.mul(&den, &den))).expect("y != 0"),
                    ),
                    y1,
                );
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

    /// Full `(X, Y, Z)` addition, built from the affine law; used by the
    /// generic scalar-mul ladder (spec §4.4), distinct from the x-only
    /// `diff_add`/`x_ladder` fast path used by ECDH.
    fn add_projective(&self, p: &Projective, q: &Projective) -> Projective {
        let pa = self.projective_to_affine(p);
        let qa = self.projective_to_affine(q);
        self.affine_to_projective(&self.add(&pa, &qa))
    }

    fn double_projective(&self, p: &Projective) -> Projective {
        let pa = self.projective_to_affine(p);
        self.affine_to_projective(&self.double(&pa))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn curve25519() -> MontgomeryCurve {
        let p = (BigUint::from(1u32) << 255) - BigUint::from(19u32);
        MontgomeryCurve::new(BigUint::from(486662u32), BigUint::from(1u32), p).unwrap()
    }

    #[test]
    fn rfc7748_x25519_scalar_mult_vector_1() {
        let c = curve25519();
        let k = BigUint::from_bytes_le(&hex!(
            "a546e36bf0527c9d3b16154b82465edd62144c0ac1fc5a18506a2244ba449ac4"
        ));
        let u = BigUint::from_bytes_le(&hex!(
            "e6db6867583030db3594c1a424b15f7c726624ec26b3353b10a903a6d0ab1c4c"
        ));
        let expected = BigUint::from_bytes_le(&hex!(
            "c3da55379de9c6908e94ea4df28d084f32eccf03491c71f754b4075577a28552"
        ));
        assert_eq!(c.x_ladder(&k, &u, 255), expected);
    }

    #[test]
    fn point_on_curve_holds_for_base_point() {
        let c = curve25519();
        let base_x = BigUint::from(9u32);
        let points = c.get_y(&base_x);
        assert!(!points.is_empty());
        for p in &points {
            assert!(c.point_on_curve(p));
        }
    }

    #[test]
    fn get_x_is_unsupported() {
        let c = curve25519();
        assert!(c.get_x(&BigUint::from(1u32)).is_err());
    }
}
