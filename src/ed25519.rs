//! Edwards25519 curve implementation.
//!
//! This module implements the group operations on the twisted Edwards
//! curve of equation `-x^2 + y^2 = 1 + d*x^2*y^2`, over the finite field
//! GF(2^255 - 19), for the constant `d` = -121665/121666. This curve is
//! described in [RFC 7748] and [RFC 8032]; here it is the internal
//! representation of the Ristretto255 group (see the `ristretto255`
//! module).
//!
//! The curve has order `8*L` for a given prime integer `L` (which is
//! slightly greater than 2^252). A conventional base point is defined,
//! that generates the subgroup of order `L`.
//!
//! A curve point is represented by the `Point` structure, in extended
//! coordinates (X:Y:Z:T) with x = X/Z, y = Y/Z and T*Z = X*Y. `Point`
//! instances can be used in additions and subtractions with the usual
//! `+` and `-` operators; all combinations of raw values and references
//! are accepted, as well as compound assignment operators `+=` and `-=`.
//! Multiplication by a scalar (`Scalar` structure) is also accepted,
//! using the `*` and `*=` operators. Scalars are integers modulo `L`.
//!
//! All point additions (including doublings) use the unified formulas
//! from RFC 8032, section 5.1.4, which are complete on this curve. Point
//! multiplication is a double-and-add ladder over all 256 bits of the
//! multiplier, with constant-time conditional swaps; its running time
//! does not depend on the multiplier or the point.
//!
//! Points can be encoded over 32 bytes (the y coordinate, and the sign
//! of x in the top bit), and decoded back. Encoding is always canonical,
//! and canonicality is verified upon decoding.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use super::field::{GF25519, ModL};

/// A point on the twisted Edwards curve edwards25519.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

/// Integers modulo L = 2^252 + 27742317777372353535851937790883648493.
///
/// L is the prime order of the subgroup of interest in edwards25519.
/// The complete curve contains 8*L points.
pub type Scalar = ModL;

impl Point {

    /// The group neutral (identity point) in the curve.
    ///
    /// Affine coordinates of the neutral are (0,1).
    pub const NEUTRAL: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The conventional base point in the curve.
    ///
    /// This point generates the subgroup of prime order L (integers
    /// modulo L are represented by the `Scalar` type).
    pub const BASE: Self = Self {
        X: GF25519::w64be(
            0x216936D3CD6E53FE, 0xC0A4E231FDD6DC5C,
            0x692CC7609525A7B2, 0xC9562D608F25D51A),
        Y: GF25519::w64be(
            0x6666666666666666, 0x6666666666666666,
            0x6666666666666666, 0x6666666666666658),
        Z: GF25519::ONE,
        T: GF25519::w64be(
            0x67875F0FD78B7665, 0x66EA4E8E64ABE37D,
            0x20F09F80775152F5, 0x6DDE8AB3A5B7DDA3),
    };

    /// Curve equation parameter d = -121665 / 121666.
    pub(crate) const D: GF25519 = GF25519::w64be(
        0x52036CEE2B6FFE73,
        0x8CC740797779E898,
        0x00700A4D4141D8AB,
        0x75EB4DCA135978A3,
    );

    /// Double of the curve equation parameter: 2*d
    const D2: GF25519 = GF25519::w64be(
        0x2406D9DC56DFFCE7,
        0x198E80F2EEF3D130,
        0x00E0149A8283B156,
        0xEBD69B9426B2F159,
    );

    /// 2^((p-1)/4), which is a square root of -1 in GF(2^255-19)
    pub(crate) const SQRT_M1: GF25519 = GF25519::SQRT_M1;

    /// Tries to decode a point from bytes.
    ///
    /// If the source slice has not length exactly 32 bytes, then
    /// decoding fails. If the source bytes are not a valid, canonical
    /// encoding of a curve point, then decoding fails. On success,
    /// 0xFFFFFFFF is returned; on failure, 0x00000000 is returned. On
    /// failure, this point is set to the neutral.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        // We follow the steps from RFC 8032, section 5.1.3.
        *self = Self::NEUTRAL;
        if buf.len() != 32 {
            return 0;
        }

        // Extract and clear the sign-of-x bit.
        let mut bb = [0u8; 32];
        bb[..].copy_from_slice(buf);
        let sign_x = bb[31] >> 7;
        bb[31] &= 0x7F;

        // Decode y; this fails if the value is not in the 0..p-1 range.
        let (y, mut r) = GF25519::decode32(&bb[..]);

        // x^2 = (y^2 - 1) / (d*y^2 + 1); sqrt_ratio_m1() returns the
        // nonnegative root, if there is one.
        let y2 = y.square();
        let u = y2 - GF25519::ONE;
        let v = Self::D * y2 + GF25519::ONE;
        let (mut x, was_square) = GF25519::sqrt_ratio_m1(&u, &v);
        r &= was_square;

        // Apply the requested sign. A zero x with sign bit 1 is
        // not canonical.
        let nx = (sign_x as u32).wrapping_neg();
        r &= !(x.iszero() & nx);
        x.set_condneg(nx);

        let P = Self { X: x, Y: y, Z: GF25519::ONE, T: x * y };
        self.set_cond(&P, r);
        r
    }

    /// Tries to decode a point from some bytes.
    ///
    /// Decoding succeeds only if the source slice has length exactly 32
    /// bytes, and contains the canonical encoding of a valid curve
    /// point. Since this method returns an `Option<Point>`, it
    /// inherently leaks (through timing-based side channels) whether
    /// decoding succeeded or not; to avoid that, consider using
    /// `set_decode()`. The decoded point itself, however, does not leak.
    pub fn decode(buf: &[u8]) -> Option<Point> {
        let mut P = Point::NEUTRAL;
        if P.set_decode(buf) != 0 {
            Some(P)
        } else {
            None
        }
    }

    /// Encodes this point into exactly 32 bytes.
    ///
    /// Encoding is always canonical.
    pub fn encode(self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let (x, y) = (self.X * iZ, self.Y * iZ);
        let mut r = y.encode();
        r[31] |= x.encode()[0] << 7;
        r
    }

    /// Adds another point (`rhs`) to this point.
    fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);
        let (X2, Y2, Z2, T2) = (&rhs.X, &rhs.Y, &rhs.Z, &rhs.T);

        // Formulas from RFC 8032, section 5.1.4. They also work when
        // both operands are the same point.
        let A = (Y1 - X1) * (Y2 - X2);
        let B = (Y1 + X1) * (Y2 + X2);
        let C = T1 * Self::D2 * T2;
        let D = (Z1 + Z1) * Z2;
        let E = B - A;
        let F = D - C;
        let G = D + C;
        let H = B + A;
        self.X = E * F;
        self.Y = G * H;
        self.T = E * H;
        self.Z = F * G;
    }

    /// Doubles this point (in place).
    #[inline(always)]
    pub fn set_double(&mut self) {
        let P = *self;
        self.set_add(&P);
    }

    /// Doubles this point.
    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Subtract another point (`rhs`) from this point.
    fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).equals(rhs.X * self.Z)
        & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral (identity point on the
    /// curve).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000
    /// otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        // The neutral is the only point with x == 0 and y == 1.
        self.X.iszero() & self.Y.equals(self.Z)
    }

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    ///  - If `ctl` = 0xFFFFFFFF, then the value of `P` is copied into `self`.
    ///
    ///  - If `ctl` = 0x00000000, then the value of `self` is unchanged.
    ///
    /// `ctl` MUST be equal to 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T.set_cond(&P.T, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Exchanges points `P` and `Q` if `ctl` = 0xFFFFFFFF, or leaves
    /// them unchanged if `ctl` = 0x00000000.
    #[inline]
    pub fn cswap(P: &mut Self, Q: &mut Self, ctl: u32) {
        GF25519::cswap(&mut P.X, &mut Q.X, ctl);
        GF25519::cswap(&mut P.Y, &mut Q.Y, ctl);
        GF25519::cswap(&mut P.Z, &mut Q.Z, ctl);
        GF25519::cswap(&mut P.T, &mut Q.T, ctl);
    }

    /// Conditionally negates this point.
    ///
    /// This point is negated if `ctl` = 0xFFFFFFFF, but kept unchanged
    /// if `ctl` = 0x00000000. `ctl` MUST be equal to 0x00000000 or
    /// 0xFFFFFFFF.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        self.X.set_condneg(ctl);
        self.T.set_condneg(ctl);
    }

    /// Multiplies this point by an integer given as 32 bytes (unsigned
    /// little-endian).
    ///
    /// The multiplier is used as is, without any reduction modulo L: all
    /// 256 bits are processed, from the top bit down. In particular, the
    /// encoding of L itself maps any point of the prime order subgroup
    /// to the neutral. The sequence of operations does not depend on the
    /// multiplier value.
    pub fn set_mul_bytes(&mut self, n: &[u8; 32]) {
        let mut P = Self::NEUTRAL;
        let mut Q = *self;
        for i in (0..256).rev() {
            let b = (((n[i >> 3] >> (i & 7)) & 1) as u32).wrapping_neg();
            Self::cswap(&mut P, &mut Q, b);
            Q.set_add(&P);
            P.set_double();
            Self::cswap(&mut P, &mut Q, b);
        }
        *self = P;
    }

    /// Returns the product of this point by an integer given as 32
    /// bytes (see `set_mul_bytes()`).
    #[inline(always)]
    pub fn mul_bytes(self, n: &[u8; 32]) -> Self {
        let mut r = self;
        r.set_mul_bytes(n);
        r
    }

    /// Multiplies this point by a scalar (in place).
    #[inline(always)]
    pub fn set_mul(&mut self, n: &Scalar) {
        self.set_mul_bytes(&n.encode());
    }

    /// Sets this point to n times the conventional base (`Self::BASE`),
    /// for a multiplier given as 32 bytes (see `set_mul_bytes()`).
    #[inline(always)]
    pub fn set_mulgen_bytes(&mut self, n: &[u8; 32]) {
        *self = Self::BASE;
        self.set_mul_bytes(n);
    }

    /// Sets this point to n times the conventional base (`Self::BASE`).
    #[inline(always)]
    pub fn set_mulgen(&mut self, n: &Scalar) {
        self.set_mulgen_bytes(&n.encode());
    }

    /// Returns the product of the conventional base (`Self::BASE`) by
    /// the provided scalar.
    #[inline(always)]
    pub fn mulgen(n: &Scalar) -> Self {
        let mut P = Self::NEUTRAL;
        P.set_mulgen(n);
        P
    }
}

impl Add<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: Point) -> Point {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn add(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: Point) {
        self.set_add(&other);
    }
}

impl AddAssign<&Point> for Point {
    #[inline(always)]
    fn add_assign(&mut self, other: &Point) {
        self.set_add(other);
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<Scalar> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&Scalar> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: Scalar) {
        self.set_mul(&other);
    }
}

impl MulAssign<&Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: &Scalar) {
        self.set_mul(other);
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        let mut r = other;
        r.set_mul(&self);
        r
    }
}

impl Mul<&Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        let mut r = *other;
        r.set_mul(&self);
        r
    }
}

impl Mul<Point> for &Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        let mut r = other;
        r.set_mul(self);
        r
    }
}

impl Mul<&Point> for &Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        let mut r = *other;
        r.set_mul(self);
        r
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &Point {
    type Output = Point;

    #[inline(always)]
    fn neg(self) -> Point {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: Point) -> Point {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&Point> for &Point {
    type Output = Point;

    #[inline(always)]
    fn sub(self, other: &Point) -> Point {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: Point) {
        self.set_sub(&other);
    }
}

impl SubAssign<&Point> for Point {
    #[inline(always)]
    fn sub_assign(&mut self, other: &Point) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::{Point, Scalar};
    use sha2::{Sha512, Digest};

    // Encoding of L, the order of the base point.
    const L_BYTES: &str =
        "edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010";

    fn bytes32(s: &str) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&hex::decode(s).unwrap());
        r
    }

    #[test]
    fn base_encoding() {
        let enc = Point::BASE.encode();
        assert!(enc == bytes32("5866666666666666666666666666666666666666666666666666666666666666"));
        let P = Point::decode(&enc).unwrap();
        assert!(P.equals(Point::BASE) == 0xFFFFFFFF);
        assert!(Point::NEUTRAL.encode() == bytes32("0100000000000000000000000000000000000000000000000000000000000000"));

        // Sign bit set on x = 0 is not canonical.
        let mut bad = Point::NEUTRAL.encode();
        bad[31] |= 0x80;
        assert!(Point::decode(&bad).is_none());

        // y = p is not canonical.
        let bad = bytes32("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(Point::decode(&bad).is_none());
        assert!(Point::decode(&enc[..31]).is_none());

        // y = 2 is not on the curve.
        let mut bad = [0u8; 32];
        bad[0] = 2;
        assert!(Point::decode(&bad).is_none());
    }

    #[test]
    fn group_ops() {
        let B = Point::BASE;
        let B2 = B.double();
        let B3 = B2 + B;
        assert!((B + B).equals(B2) == 0xFFFFFFFF);
        assert!((B3 - B).equals(B2) == 0xFFFFFFFF);
        assert!((B3 - B3).isneutral() == 0xFFFFFFFF);
        assert!(B3.isneutral() == 0);
        assert!((B + Point::NEUTRAL).equals(B) == 0xFFFFFFFF);
        assert!((B + (-B)).isneutral() == 0xFFFFFFFF);

        let mut P = Point::NEUTRAL;
        for i in 0..20u32 {
            let Q = Point::mulgen(&Scalar::from_u32(i));
            assert!(P.equals(Q) == 0xFFFFFFFF);
            let R = Point::decode(&Q.encode()).unwrap();
            assert!(R.equals(Q) == 0xFFFFFFFF);
            P += B;
        }

        let mut P = B3;
        P.set_condneg(0);
        assert!(P.equals(B3) == 0xFFFFFFFF);
        P.set_condneg(0xFFFFFFFF);
        assert!(P.equals(-B3) == 0xFFFFFFFF);
        let mut Q = B2;
        Point::cswap(&mut P, &mut Q, 0xFFFFFFFF);
        assert!(P.equals(B2) == 0xFFFFFFFF && Q.equals(-B3) == 0xFFFFFFFF);
        assert!(Point::select(&P, &Q, 0).equals(B2) == 0xFFFFFFFF);
    }

    #[test]
    fn mul_order() {
        // L*B = 0, (L-1)*B = -B, raw multipliers are not reduced.
        let l = bytes32(L_BYTES);
        assert!(Point::BASE.mul_bytes(&l).isneutral() == 0xFFFFFFFF);
        let m1 = -Scalar::ONE;
        assert!(Point::mulgen(&m1).equals(-Point::BASE) == 0xFFFFFFFF);
        let mut l1 = l;
        l1[0] += 1;
        assert!(Point::BASE.mul_bytes(&l1).equals(Point::BASE) == 0xFFFFFFFF);

        let s = Scalar::from_u32(123456789);
        let t = Scalar::from_u32(987654321);
        let P = Point::mulgen(&s);
        assert!((P * t).equals(Point::mulgen(&(s * t))) == 0xFFFFFFFF);
        assert!((t * P).equals(P * t) == 0xFFFFFFFF);
        assert!((Point::mulgen(&s) + Point::mulgen(&t)).equals(
            Point::mulgen(&(s + t))) == 0xFFFFFFFF);
    }

    #[test]
    fn rfc8032_public_keys() {
        // Public key derivation from RFC 8032, section 7.1 (tests 1 to 3):
        // the clamped secret scalar is used as a raw multiplier.
        let kat = [
            ("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
             "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
            ("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
             "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
            ("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
             "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        ];
        for (seed, pk) in kat.iter() {
            let mut sh = Sha512::new();
            sh.update(&hex::decode(seed).unwrap());
            let h = sh.finalize();
            let mut s = [0u8; 32];
            s.copy_from_slice(&h[..32]);
            s[0] &= 0xF8;
            s[31] &= 0x7F;
            s[31] |= 0x40;
            let mut A = Point::NEUTRAL;
            A.set_mulgen_bytes(&s);
            assert!(A.encode() == bytes32(pk));
            let A2 = Point::decode(&bytes32(pk)).unwrap();
            assert!(A.equals(A2) == 0xFFFFFFFF);
        }
    }
}
