//! Ristretto255 implementation.
//!
//! The Ristretto255 group is a prime order group specified in [RFC 9496]
//! (see also <https://ristretto.group>). It is internally defined over
//! the curve Edwards25519, which is a twisted Edwards curve with cofactor
//! 8. Users of Ristretto255 should not, in general, think about the
//! underlying curve points; the group has prime order and that is the
//! abstraction that is convenient for building cryptographic protocols.
//!
//! The `Point` structure represents a Ristretto255 element. Internally,
//! it holds one of the (several) curve points that represent the
//! element; `equals()` and `encode()` do not depend on which one. Such
//! elements can be encoded into 32 bytes, and decoded back; encoding is
//! always canonical, and this is enforced upon decoding (top bit and
//! least significant bit of the encoding must be zero, and the encoded
//! field element must be lower than 2^255 - 19).
//!
//! `Point::from_hash()` maps 64 bytes (normally the output of a secure
//! hash function such as SHA-512) to an element, with two applications
//! of the Elligator2 map. `Point::random()` produces a uniformly random
//! element from a cryptographically secure RNG.
//!
//! The `Scalar` type is an alias for the `ed25519::Scalar` type, which
//! represents integers modulo the Ristretto255 order `L`.
//!
//! [RFC 9496]: https://datatracker.ietf.org/doc/html/rfc9496

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::convert::TryFrom;
use super::field::GF25519;
use super::ed25519::{Point as Ed25519Point, Scalar as Ed25519Scalar};
use super::{CryptoRng, RngCore};

/// A Ristretto255 point.
#[derive(Clone, Copy, Debug)]
pub struct Point(Ed25519Point);

/// A Ristretto255 scalar (integer modulo the group prime order `L`).
pub type Scalar = Ed25519Scalar;

impl Point {

    /// The neutral element (identity point) in the group.
    pub const NEUTRAL: Self = Self(Ed25519Point::NEUTRAL);

    /// The conventional base point in the group.
    pub const BASE: Self = Self(Ed25519Point::BASE);

    /// The d constant from the twisted Edwards curve equation.
    const D: GF25519 = Ed25519Point::D;

    // Some constants defined in RFC 9496, section 4.1.

    const SQRT_M1: GF25519 = Ed25519Point::SQRT_M1;

    const SQRT_AD_MINUS_ONE: GF25519 = GF25519::w64be(
        0x376931BF2B8348AC,
        0x0F3CFCC931F5D1FD,
        0xAF9D8E0C1B7854BD,
        0x7E97F6A0497B2E1B,
    );
    const INVSQRT_A_MINUS_D: GF25519 = GF25519::w64be(
        0x786C8905CFAFFCA2,
        0x16C27B91FE01D840,
        0x9D2F16175A4172BE,
        0x99C8FDAA805D40EA,
    );
    const ONE_MINUS_D_SQ: GF25519 = GF25519::w64be(
        0x029072A8B2B3E0D7,
        0x9994ABDDBE70DFE4,
        0x2C81A138CD5E350F,
        0xE27C09C1945FC176,
    );
    const D_MINUS_ONE_SQ: GF25519 = GF25519::w64be(
        0x5968B37AF66C2241,
        0x4CDCD32F529B4EEB,
        0xD29E4A2CB01E1999,
        0x31AD5AAA44ED4D20,
    );

    /// Checks that 32 bytes are a canonical, nonnegative field encoding.
    ///
    /// Returned value is 0xFFFFFFFF if the top bit of the last byte is
    /// zero, the least significant bit of the first byte is zero, and the
    /// value is lower than 2^255 - 19; otherwise, 0x00000000 is returned.
    /// The only 255-bit values which are not lower than the modulus have
    /// bytes 1 to 30 equal to 0xFF, byte 31 equal to 0x7F, and byte 0 at
    /// least 0xED; all bytes are always read.
    fn is_canonical(s: &[u8; 32]) -> u32 {
        let mut c = ((s[31] & 0x7F) ^ 0x7F) as u32;
        for i in (1..31).rev() {
            c |= (s[i] ^ 0xFF) as u32;
        }
        let c = c.wrapping_sub(1) >> 8;
        let d = (0xEC as u32).wrapping_sub(s[0] as u32) >> 8;
        let bad = (((c & d) | (s[0] as u32)) & 1) | ((s[31] >> 7) as u32);
        bad.wrapping_sub(1)
    }

    /// Sets this element by decoding its binary representation.
    ///
    /// If the input does not have length exactly 32 bytes, or if the
    /// input has length 32 bytes but is not the valid, canonical encoding
    /// of a Ristretto255 point, then this function sets `self` to the
    /// neutral element and returns 0x00000000; otherwise, it sets `self`
    /// to the decoded element and returns 0xFFFFFFFF.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        *self = Self::NEUTRAL;
        let bb = match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => bb,
            Err(_) => return 0,
        };

        let mut r = Self::is_canonical(bb);
        let s = GF25519::decode_reduce(bb);

        let ss = s.square();
        let u1 = GF25519::ONE - ss;
        let u2 = GF25519::ONE + ss;
        let u2_sqr = u2.square();

        let v = -(Self::D * u1.square()) - u2_sqr;

        let (invsqrt, was_square) =
            GF25519::sqrt_ratio_m1(&GF25519::ONE, &(v * u2_sqr));

        let den_x = invsqrt * u2;
        let den_y = invsqrt * den_x * v;

        let x = ((s + s) * den_x).abs();
        let y = u1 * den_y;
        let t = x * y;

        // All failure conditions are merged without branching.
        r &= was_square & !(t.is_negative() | y.iszero());

        self.0.set_cond(&Ed25519Point { X: x, Y: y, Z: GF25519::ONE, T: t }, r);
        r
    }

    /// Decodes an element from its binary representation.
    ///
    /// If the input does not have length exactly 32 bytes, or if the
    /// input has length 32 bytes but is not the valid, canonical encoding
    /// of a Ristretto255 point, then this function returns `None`.
    /// Otherwise, it returns the decoded element.
    ///
    /// Since this function uses an option type, outsiders may detect
    /// through side-channels whether decoding succeeded or failed;
    /// however, the decoded value should not leak.
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let mut r = Self::NEUTRAL;
        if r.set_decode(buf) != 0 {
            Some(r)
        } else {
            None
        }
    }

    /// Encodes this element into bytes.
    ///
    /// Encoding is always canonical.
    pub fn encode(self) -> [u8; 32] {
        let (x0, y0, z0, t0) = (&self.0.X, &self.0.Y, &self.0.Z, &self.0.T);

        let u1 = (z0 + y0) * (z0 - y0);
        let u2 = x0 * y0;

        let (invsqrt, _) =
            GF25519::sqrt_ratio_m1(&GF25519::ONE, &(u1 * u2.square()));

        let den1 = invsqrt * u1;
        let den2 = invsqrt * u2;
        let z_inv = den1 * den2 * t0;

        let ix0 = x0 * Self::SQRT_M1;
        let iy0 = y0 * Self::SQRT_M1;
        let enchanted_denominator = den1 * Self::INVSQRT_A_MINUS_D;

        let rotate = (t0 * z_inv).is_negative();

        let x = GF25519::select(x0, &iy0, rotate);
        let mut y = GF25519::select(y0, &ix0, rotate);
        let den_inv = GF25519::select(&den2, &enchanted_denominator, rotate);

        y.set_condneg((x * z_inv).is_negative());

        let s = (den_inv * (z0 - y)).abs();
        s.encode()
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    ///
    /// Note: this function is vastly faster than encoding the two elements
    /// and comparing the two encodings.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let (x1, y1) = (&self.0.X, &self.0.Y);
        let (x2, y2) = (&rhs.0.X, &rhs.0.Y);
        (x1 * y2).equals(y1 * x2) | (y1 * y2).equals(x1 * x2)
    }

    /// Tests whether this element is the neutral (identity point).
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000 for
    /// all other elements.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        // The four curve points that represent the neutral are the
        // points with x = 0 or y = 0.
        let (x1, y1) = (&self.0.X, &self.0.Y);
        x1.iszero() | y1.iszero()
    }

    /// Conditionally copies the provided element (`P`) into `self`.
    ///
    ///  - If `ctl` = 0xFFFFFFFF, then the value of `P` is copied into `self`.
    ///
    ///  - If `ctl` = 0x00000000, then the value of `self` is unchanged.
    ///
    /// Value `ctl` MUST be equal to either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.0.set_cond(&P.0, ctl);
    }

    /// Returns an element equal to `P0` (if `ctl` = 0x00000000) or to
    /// `P1` (if `ctl` = 0xFFFFFFFF).
    ///
    /// Value `ctl` MUST be equal to either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Conditionally negates this point.
    ///
    /// This point is negated if `ctl` = 0xFFFFFFFF, but kept unchanged if
    /// `ctl` = 0x00000000.
    ///
    /// Value `ctl` MUST be equal to either 0x00000000 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn set_condneg(&mut self, ctl: u32) {
        self.0.set_condneg(ctl);
    }

    /// Elligator2 map from a field element to a curve point.
    ///
    /// Its output is not uniformly distributed; it is used only through
    /// `from_hash()`, which invokes it twice (on distinct inputs) and
    /// adds the two results.
    fn elligator(t: &GF25519) -> Self {
        let r = Self::SQRT_M1 * t.square();
        let u = (r + GF25519::ONE) * Self::ONE_MINUS_D_SQ;
        let v = (GF25519::MINUS_ONE - r * Self::D) * (r + Self::D);

        let (s, was_square) = GF25519::sqrt_ratio_m1(&u, &v);
        let s_prime = -(s * t).abs();
        let s = GF25519::select(&s_prime, &s, was_square);
        let c = GF25519::select(&r, &GF25519::MINUS_ONE, was_square);

        let N = c * (r - GF25519::ONE) * Self::D_MINUS_ONE_SQ - v;

        let s2 = s.square();
        let w0 = (s + s) * v;
        let w1 = N * Self::SQRT_AD_MINUS_ONE;
        let w2 = GF25519::ONE - s2;
        let w3 = GF25519::ONE + s2;

        Self(Ed25519Point { X: w0 * w3, Y: w2 * w1, Z: w1 * w3, T: w0 * w2 })
    }

    /// Maps 64 bytes to a Ristretto255 element.
    ///
    /// Each half of the input is interpreted as a field element (with
    /// the top bit of the last byte ignored) and mapped with Elligator2;
    /// the two points are added. If the input is itself a 64-byte output
    /// of a secure hash function (e.g. SHA-512) then this constitutes a
    /// hash function with output in Ristretto255 (output is then
    /// indistinguishable from random uniform selection).
    pub fn from_hash(h: &[u8; 64]) -> Self {
        let mut b1 = [0u8; 32];
        let mut b2 = [0u8; 32];
        b1[..].copy_from_slice(&h[..32]);
        b2[..].copy_from_slice(&h[32..]);
        let t1 = GF25519::decode_reduce(&b1);
        let t2 = GF25519::decode_reduce(&b2);
        Self::elligator(&t1) + Self::elligator(&t2)
    }

    /// Generates a uniformly random element, by mapping 64 bytes
    /// obtained from the provided RNG.
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        let mut h = [0u8; 64];
        rng.fill_bytes(&mut h);
        Self::from_hash(&h)
    }

    /// Adds `rhs` to `self`.
    #[inline(always)]
    fn set_add(&mut self, rhs: &Self) {
        self.0 += &rhs.0;
    }

    /// Subtracts `rhs` from `self`.
    #[inline(always)]
    fn set_sub(&mut self, rhs: &Self) {
        self.0 -= &rhs.0;
    }

    /// Negates this element.
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.0.set_neg();
    }

    /// Multiplies this element by a scalar.
    #[inline(always)]
    fn set_mul(&mut self, n: &Scalar) {
        self.0 *= n;
    }

    /// Multiplies this element by an integer provided as 32 bytes
    /// (unsigned little-endian), used without any reduction.
    #[inline(always)]
    pub fn set_mul_bytes(&mut self, n: &[u8; 32]) {
        self.0.set_mul_bytes(n);
    }

    /// Returns the product of this element by an integer provided as 32
    /// bytes (unsigned little-endian), used without any reduction.
    #[inline(always)]
    pub fn mul_bytes(self, n: &[u8; 32]) -> Self {
        Self(self.0.mul_bytes(n))
    }

    /// Sets this element to n times the conventional base (`Self::BASE`).
    #[inline(always)]
    pub fn set_mulgen(&mut self, n: &Scalar) {
        self.0.set_mulgen(n);
    }

    /// Returns the product of the conventional base (`Self::BASE`) by
    /// the provided scalar.
    #[inline(always)]
    pub fn mulgen(n: &Scalar) -> Self {
        Self(Ed25519Point::mulgen(n))
    }

    /// Returns the product of the conventional base (`Self::BASE`) by
    /// an integer provided as 32 bytes (unsigned little-endian), used
    /// without any reduction.
    #[inline(always)]
    pub fn mulgen_bytes(n: &[u8; 32]) -> Self {
        let mut P = Ed25519Point::NEUTRAL;
        P.set_mulgen_bytes(n);
        Self(P)
    }

    /// Doubles this element (in place).
    #[inline(always)]
    pub fn set_double(&mut self) {
        self.0.set_double();
    }

    /// Doubles this element.
    #[inline(always)]
    pub fn double(self) -> Self {
        Self(self.0.double())
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
