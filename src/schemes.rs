//! Named curve/parameter bundles (spec §4.6), each a plain, immutable
//! struct rather than a runtime registry — mirrors `original_source/
//! asymmetric.py`'s `ECC_Curve25519`/`ECC_Ed25519`/`ECC_NISTP256`/
//! `ECC_NISTP384`/`ECC_Curve41417` class hierarchy, minus the inheritance
//! (`ECC_Ed25519(ECC_Curve25519)` mostly exists there to reuse
//! `canonical_binary_form_*`; this crate gives each scheme its own
//! constructor instead).

use num_bigint::BigUint;
use num_traits::One;

use crate::curve::edwards::{EdwardsCurve, Point as EdwardsPoint};
use crate::curve::montgomery::{MontgomeryCurve, Point as MontgomeryPointT};
use crate::curve::twisted_edwards::{Point as TwistedPoint, TwistedEdwardsCurve};
use crate::curve::weierstrass::{Point as WeierstrassPoint, WeierstrassCurve};
use crate::curve::EllipticCurve;
use crate::dh::DiffieHellman;
use crate::errors::{Error, Result};
use crate::random::{random_range, RandomScalarSource};
use crate::scalarmul::scalar_mul_affine;

fn biguint_dec(s: &str) -> BigUint {
    s.parse().expect("scheme constants are fixed, valid decimal literals")
}

/// Curve25519: `y^2 = x^3 + 486662x^2 + x` over `2^255 - 19`.
pub struct Curve25519 {
    pub curve: MontgomeryCurve,
    pub order: BigUint,
    pub base_point_x: BigUint,
}

impl Curve25519 {
    pub fn new() -> Self {
        let p = (BigUint::from(1u32) << 255) - BigUint::from(19u32);
        let curve = MontgomeryCurve::new(BigUint::from(486662u32), BigUint::from(1u32), p).expect("Curve25519 parameters are valid");
        let order = biguint_dec("7237005577332262213973186563042994240857116359379907606001950938285454250989");
        Curve25519 {
            curve,
            order,
            base_point_x: BigUint::from(9u32),
        }
    }

    /// Cofactor-8 clamped private-key sampler: `2^254 + 8 * random(0, 2^251 - 1)`.
    pub fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        let lower = BigUint::from(0u32);
        let upper = (BigUint::from(1u32) << 251) - BigUint::from(1u32);
        let r = random_range(rng, &lower, &upper).expect("lower <= upper by construction");
        (BigUint::from(1u32) << 254) + BigUint::from(8u32) * r
    }
}

impl Default for Curve25519 {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffieHellman for Curve25519 {
    fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        Curve25519::generate_private_key(self, rng)
    }

    fn derive_public_key(&self, private: &BigUint) -> Result<Vec<u8>> {
        let x = self.curve.x_ladder(private, &self.base_point_x, self.curve.field.p.bits());
        crate::codec::int_to_le(&x, 32)
    }

    fn shared_secret(&self, private: &BigUint, peer_public: &[u8]) -> Result<Vec<u8>> {
        let u = crate::codec::le_to_int(peer_public);
        let x = self.curve.x_ladder(private, &u, self.curve.field.p.bits());
        crate::codec::int_to_le(&x, 32)
    }
}

/// Ed25519: the twisted Edwards curve birationally equivalent to Curve25519.
pub struct Ed25519Scheme {
    pub curve: TwistedEdwardsCurve,
    pub order: BigUint,
    pub base_point: TwistedPoint,
}

impl Ed25519Scheme {
    pub fn new() -> Self {
        let p = (BigUint::from(1u32) << 255) - BigUint::from(19u32);
        let field = crate::field::Field::new(p.clone());
        let d = field.div(&field.negate(&BigUint::from(121665u32)), &BigUint::from(121666u32)).expect("-121665/121666 is well-defined mod 2^255-19");
        let a = field.negate(&BigUint::from(1u32));
        let curve = TwistedEdwardsCurve::new(a, d, p).expect("Ed25519 parameters are valid");
        let order = biguint_dec("7237005577332262213973186563042994240857116359379907606001950938285454250989");
        let base_point = TwistedPoint {
            x: biguint_dec("15112221349535400772501151409588531511454012693041857206046113283949847762202"),
            y: biguint_dec("46316835694926478169428394003475163141307993866256225615783033603165251855960"),
        };
        Ed25519Scheme { curve, order, base_point }
    }
}

impl Default for Ed25519Scheme {
    fn default() -> Self {
        Self::new()
    }
}

/// NIST P-256 (secp256r1).
pub struct NistP256 {
    pub curve: WeierstrassCurve,
    pub order: BigUint,
    pub base_point: WeierstrassPoint,
}

impl NistP256 {
    pub fn new() -> Self {
        let p = biguint_dec("115792089210356248762697446949407573530086143415290314195533631308867097853951");
        let a = &p - BigUint::from(3u32);
        let b = biguint_dec("41058363725152142129326129780047268409114441015993725554835256314039467401291");
        let curve = WeierstrassCurve::new(a, b, p).expect("NIST P-256 parameters are valid");
        let order = biguint_dec("115792089210356248762697446949407573529996955224135760342422259061068512044369");
        let base_point = WeierstrassPoint::Affine {
            x: biguint_dec("48439561293906451759052585252797914202762949526041747995844080717082404635286"),
            y: biguint_dec("36134250956749795798585127919587881956611106672985015071877198253568414405109"),
        };
        NistP256 { curve, order, base_point }
    }
}

impl Default for NistP256 {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffieHellman for NistP256 {
    fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        random_range(rng, &BigUint::one(), &(&self.order - BigUint::one())).expect("1 <= order - 1 for any real curve order")
    }

    fn derive_public_key(&self, private: &BigUint) -> Result<Vec<u8>> {
        let pub_point = scalar_mul_affine(&self.curve, private, &self.base_point);
        encode_weierstrass_point(&pub_point)
    }

    fn shared_secret(&self, private: &BigUint, peer_public: &[u8]) -> Result<Vec<u8>> {
        let peer = decode_weierstrass_point(&self.curve, peer_public)?;
        let shared = scalar_mul_affine(&self.curve, private, &peer);
        encode_weierstrass_point(&shared)
    }
}

/// NIST P-384 (secp384r1).
pub struct NistP384 {
    pub curve: WeierstrassCurve,
    pub order: BigUint,
    pub base_point: WeierstrassPoint,
}

impl NistP384 {
    pub fn new() -> Self {
        let p = biguint_dec("39402006196394479212279040100143613805079739270465446667948293404245721771496870329047266088258938001861606973112319");
        let a = &p - BigUint::from(3u32);
        let b = biguint_dec("27580193559959705877849011840389048093056905856361568521428707301988689241309860865136260764883745107765439761230575");
        let curve = WeierstrassCurve::new(a, b, p).expect("NIST P-384 parameters are valid");
        let order = biguint_dec("39402006196394479212279040100143613805079739270465446667946905279627659399113263569398956308152294913554433653942643");
        let base_point = WeierstrassPoint::Affine {
            x: biguint_dec("26247035095799689268623156744566981891852923491109213387815615900925518854738050089022388053975719786650872476732087"),
            y: biguint_dec("8325710961489029985546751289520108179287853048861315594709205902480503199884419224438643760392947333078086511627871"),
        };
        NistP384 { curve, order, base_point }
    }
}

impl Default for NistP384 {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffieHellman for NistP384 {
    fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        random_range(rng, &BigUint::one(), &(&self.order - BigUint::one())).expect("1 <= order - 1 for any real curve order")
    }

    fn derive_public_key(&self, private: &BigUint) -> Result<Vec<u8>> {
        let pub_point = scalar_mul_affine(&self.curve, private, &self.base_point);
        encode_weierstrass_point(&pub_point)
    }

    fn shared_secret(&self, private: &BigUint, peer_public: &[u8]) -> Result<Vec<u8>> {
        let peer = decode_weierstrass_point(&self.curve, peer_public)?;
        let shared = scalar_mul_affine(&self.curve, private, &peer);
        encode_weierstrass_point(&shared)
    }
}

/// Curve41417: the (untwisted, `c=1`) Edwards curve `x^2+y^2=1+3617x^2y^2`
/// over `2^414 - 17`, cofactor 8.
pub struct Curve41417 {
    pub curve: EdwardsCurve,
    pub order: BigUint,
    pub base_point: EdwardsPoint,
}

impl Curve41417 {
    pub fn new() -> Self {
        let p = (BigUint::from(1u32) << 414) - BigUint::from(17u32);
        let curve = EdwardsCurve::new(BigUint::from(3617u32), p).expect("Curve41417 parameters are valid");
        let order = biguint_dec("2007432957655307616804920221712960400092694487169743464571637060786432412650382169357019636721762385516102266813436407");
        let base_point = EdwardsPoint {
            x: biguint_dec("17319886477121189177719202498822615443556957307604340815256226171904769976866975908866528699294134494857887698432266169206165"),
            y: BigUint::from(34u32),
        };
        Curve41417 { curve, order, base_point }
    }

    pub fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        let lower = BigUint::from(0u32);
        let upper = (BigUint::from(1u32) << 410) - BigUint::from(1u32);
        let r = random_range(rng, &lower, &upper).expect("lower <= upper by construction");
        (BigUint::from(1u32) << 413) + BigUint::from(8u32) * r
    }
}

impl Default for Curve41417 {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffieHellman for Curve41417 {
    fn generate_private_key(&self, rng: &mut dyn RandomScalarSource) -> BigUint {
        Curve41417::generate_private_key(self, rng)
    }

    fn derive_public_key(&self, private: &BigUint) -> Result<Vec<u8>> {
        let pub_point = scalar_mul_affine(&self.curve, private, &self.base_point);
        crate::codec::int_to_le(&pub_point.x, 52)
    }

    fn shared_secret(&self, private: &BigUint, peer_public: &[u8]) -> Result<Vec<u8>> {
        let peer_x = crate::codec::le_to_int(peer_public);
        let peer = self
            .curve
            .get_y(&peer_x)
            .into_iter()
            .next()
            .ok_or(Error::NotOnCurve)?;
        let shared = scalar_mul_affine(&self.curve, private, &peer);
        crate::codec::int_to_le(&shared.x, 52)
    }
}

/// Ed41417: the signature scheme built on Curve41417's Edwards form.
pub struct Ed41417Scheme {
    pub curve: EdwardsCurve,
    pub order: BigUint,
    pub base_point: EdwardsPoint,
}

impl Ed41417Scheme {
    pub fn new() -> Self {
        let inner = Curve41417::new();
        Ed41417Scheme {
            curve: inner.curve,
            order: inner.order,
            base_point: inner.base_point,
        }
    }
}

impl Default for Ed41417Scheme {
    fn default() -> Self {
        Self::new()
    }
}

/// Uncompressed-style encoding used for NIST curve ECDH: `x` then `y`, each
/// zero-padded to the field's byte width, big-endian (no `04` prefix byte —
/// spec's Non-goals exclude X.509/SEC1 framing; this is this crate's own
/// canonical form).
fn encode_weierstrass_point(p: &WeierstrassPoint) -> Result<Vec<u8>> {
    match p {
        WeierstrassPoint::Infinity => Err(Error::DecodingError("cannot encode the point at infinity".into())),
        WeierstrassPoint::Affine { x, y } => {
            let width = 48; // generous fixed width; callers needing an exact field width should encode directly.
            let mut out = crate::codec::int_to_be(x, width)?;
            out.extend(crate::codec::int_to_be(y, width)?);
            Ok(out)
        }
    }
}

fn decode_weierstrass_point(curve: &WeierstrassCurve, bytes: &[u8]) -> Result<WeierstrassPoint> {
    if bytes.len() % 2 != 0 {
        return Err(Error::DecodingError("point encoding must have even length".into()));
    }
    let half = bytes.len() / 2;
    let x = crate::codec::be_to_int(&bytes[..half]);
    let y = crate::codec::be_to_int(&bytes[half..]);
    let p = WeierstrassPoint::Affine { x, y };
    if !curve.point_on_curve(&p) {
        return Err(Error::NotOnCurve);
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve25519_base_point_is_on_curve() {
        let scheme = Curve25519::new();
        let points = scheme.curve.get_y(&scheme.base_point_x);
        assert!(!points.is_empty());
    }

    #[test]
    fn nistp256_base_point_is_on_curve() {
        let scheme = NistP256::new();
        assert!(scheme.curve.point_on_curve(&scheme.base_point));
    }

    #[test]
    fn nistp384_base_point_is_on_curve() {
        let scheme = NistP384::new();
        assert!(scheme.curve.point_on_curve(&scheme.base_point));
    }

    #[test]
    fn curve41417_base_point_is_on_curve() {
        let scheme = Curve41417::new();
        assert!(scheme.curve.point_on_curve(&scheme.base_point));
    }

    #[test]
    fn ed25519_base_point_is_on_curve() {
        let scheme = Ed25519Scheme::new();
        assert!(scheme.curve.point_on_curve(&scheme.base_point));
    }

    #[test]
    fn ed41417_shares_curve41417_parameters() {
        let scheme = Ed41417Scheme::new();
        assert!(scheme.curve.point_on_curve(&scheme.base_point));
    }

    /// Concrete scenario 1: `k = 112233445566778899`; `k*G` on NIST P-256
    /// has this exact affine `x`.
    #[test]
    fn nistp256_scalar_mult_matches_known_vector() {
        let scheme = NistP256::new();
        let k = biguint_dec("112233445566778899");
        let result = scalar_mul_affine(&scheme.curve, &k, &scheme.base_point);
        let expected_x = BigUint::parse_bytes(
            b"339150844EC15234807FE862A86BE77977DBFB3AE3D96F4C22795513AEAAB82F",
            16,
        )
        .unwrap();
        match result {
            WeierstrassPoint::Affine { x, .. } => assert_eq!(x, expected_x),
            WeierstrassPoint::Infinity => panic!("expected an affine point"),
        }
    }

    /// Concrete scenario 5: converting Curve41417 to Montgomery to short
    /// Weierstrass yields these exact `a`/`b` constants, and the base
    /// point's image under both maps lands on the resulting curve.
    #[test]
    fn curve41417_birational_chain_matches_known_constants() {
        let scheme = Curve41417::new();
        let mc = scheme.curve.to_montgomery().unwrap();
        let wc = WeierstrassCurve::from_montgomery(&mc).unwrap();

        let expected_a = biguint_dec(
            "42307582002575910332922579714097346549017899709713998034217522897561970639123926132812109468141778230245837569601494931198756",
        );
        let expected_b = biguint_dec(
            "42307582002575910332922579714097346549017899709713998034217522897561970639123926132812109468141778230245837569601494877203573",
        );
        assert_eq!(wc.a, expected_a);
        assert_eq!(wc.b, expected_b);

        let mp = scheme.curve.point_to_montgomery(&scheme.base_point).unwrap();
        let wp = WeierstrassCurve::point_from_montgomery(&mc, &mp).unwrap();
        assert!(wc.point_on_curve(&wp));
    }
}
