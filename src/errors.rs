//! The crate's error type.
//!
//! Every fallible operation returns one of the seven variants below; none of
//! them overlap in meaning, and none of them are retried or logged inside the
//! library — a caller always sees the failure that actually occurred.

use num_bigint::BigUint;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A curve or scheme constructor received parameters violating its
    /// defining invariants (e.g. a singular Weierstrass curve, or
    /// `d(1-d) = 0` for an Edwards curve).
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A scalar, signature component, or encoded integer does not lie in the
    /// interval it is required to.
    #[error("{what} = {value} is out of range [{low}, {high}]")]
    OutOfRange {
        what: &'static str,
        value: BigUint,
        low: BigUint,
        high: BigUint,
    },

    /// A point failed `point_on_curve`.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// Division or modular inverse by zero, or by an operand not coprime to
    /// the modulus.
    #[error("{0} has no inverse modulo the given modulus")]
    NotInvertible(BigUint),

    /// A compressed or little-endian encoding was the wrong length, or
    /// decodes to no valid point.
    #[error("decoding error: {0}")]
    DecodingError(String),

    /// An operation that is not implemented for the given curve family
    /// (e.g. Curve25519 public-key recovery from a bare x-coordinate).
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// A signature did not satisfy the verification equation.
    ///
    /// Note: this is only ever produced by `break_ecdsa` and friends that
    /// must distinguish "verification failed" from other errors; plain
    /// signature verification returns a `bool`, not this variant (spec §7:
    /// "verifiers return a boolean ... on signature mismatch").
    #[error("signature verification failed")]
    VerificationFailed,
}

pub type Result<T> = core::result::Result<T, Error>;
