//! The four curve families (spec §4.3), reached through one shared
//! operation surface.
//!
//! The teacher's `elliptic` module (`pkg/crypto/src/elliptic/mod.rs`) is a
//! flat `pub use self::{edwards,montgomery,normal}::*` re-export with no
//! common trait at all — each curve struct's methods just happen to share
//! names. Design note "dispatch statically on the variant tag" asks for a
//! sum type with a shared surface; the idiomatic Rust reading of that (given
//! each variant's point representation genuinely differs in shape) is a
//! trait with associated types, so that `scalarmul`'s generic ladder
//! functions are written once and monomorphized per curve, instead of
//! matching on a runtime tag at every step.

pub mod edwards;
pub mod montgomery;
pub mod twisted_edwards;
pub mod weierstrass;

pub use edwards::EdwardsCurve;
pub use montgomery::MontgomeryCurve;
pub use twisted_edwards::TwistedEdwardsCurve;
pub use weierstrass::WeierstrassCurve;

/// The operation surface every curve family exposes (spec §4.3's table).
///
/// `get_x`/`get_y` return 0, 1 or 2 points (duplicates may appear if the
/// coordinate is a curve-defined constant; callers that need a set should
/// dedupe). Square-root arbitrariness (spec §9) is resolved the same way
/// everywhere in this crate: when an operation must pick one of two roots,
/// it picks the smaller `BigUint` value.
pub trait EllipticCurve {
    type Affine: Clone + PartialEq + core::fmt::Debug;
    type Projective: Clone + PartialEq + core::fmt::Debug;

    fn neutral(&self) -> Self::Affine;
    fn neutral_projective(&self) -> Self::Projective;

    fn point_on_curve(&self, p: &Self::Affine) -> bool;

    fn add(&self, p: &Self::Affine, q: &Self::Affine) -> Self::Affine;
    fn double(&self, p: &Self::Affine) -> Self::Affine;
    fn invert(&self, p: &Self::Affine) -> Self::Affine;

    fn affine_to_projective(&self, p: &Self::Affine) -> Self::Projective;
    fn projective_to_affine(&self, p: &Self::Projective) -> Self::Affine;

    fn add_projective(&self, p: &Self::Projective, q: &Self::Projective) -> Self::Projective;
    fn double_projective(&self, p: &Self::Projective) -> Self::Projective;
}
