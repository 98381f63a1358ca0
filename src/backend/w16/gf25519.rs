use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::convert::TryFrom;

/// Element of the field of integers modulo p = 2^255 - 19.
///
/// The value is held in 16 signed limbs; limb `i` has weight 2^(16*i).
/// After a multiplication, all limbs are in the 0 to 2^16-1 range
/// (limb 0 may slightly exceed it); additions and subtractions are lazy
/// and leave limbs that may be larger or negative. The representation is
/// not unique; canonicality is enforced only by `encode()`.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([i64; 16]);

impl GF25519 {

    // Field modulus, in the same limb representation.
    const MODULUS: [i64; 16] = [
        0xFFED, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF,
        0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0x7FFF,
    ];

    pub const ZERO: GF25519 = GF25519([0; 16]);
    pub const ONE: GF25519 = GF25519([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);
    pub const MINUS_ONE: GF25519 = GF25519([
        0xFFEC, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF,
        0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0xFFFF, 0x7FFF,
    ]);

    /// A square root of -1 (the one whose encoding is even).
    pub const SQRT_M1: GF25519 = GF25519::w64be(
        0x2B8324804FC1DF0B,
        0x2B4D00993DFBD7A7,
        0x2F431806AD2FE478,
        0xC4EE1B274A0EA0B0,
    );

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in low-to-high order).
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        // Bit 255 has weight 2^255 = 19 mod p.
        let top = 19 * ((x3 >> 63) as i64);
        Self([
            (x0 & 0xFFFF) as i64 + top,
            ((x0 >> 16) & 0xFFFF) as i64,
            ((x0 >> 32) & 0xFFFF) as i64,
            (x0 >> 48) as i64,
            (x1 & 0xFFFF) as i64,
            ((x1 >> 16) & 0xFFFF) as i64,
            ((x1 >> 32) & 0xFFFF) as i64,
            (x1 >> 48) as i64,
            (x2 & 0xFFFF) as i64,
            ((x2 >> 16) & 0xFFFF) as i64,
            ((x2 >> 32) & 0xFFFF) as i64,
            (x2 >> 48) as i64,
            (x3 & 0xFFFF) as i64,
            ((x3 >> 16) & 0xFFFF) as i64,
            ((x3 >> 32) & 0xFFFF) as i64,
            ((x3 >> 48) & 0x7FFF) as i64,
        ])
    }

    // Create an element from a 256-bit value (implicitly reduced modulo
    // the field order) provided as four 64-bit limbs (in high-to-low order).
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    // Create an element from a small nonnegative integer.
    #[inline]
    pub fn from_u32(x: u32) -> Self {
        let mut r = Self::ZERO;
        r.0[0] = (x & 0xFFFF) as i64;
        r.0[1] = (x >> 16) as i64;
        r
    }

    // One carry propagation pass. Each limb keeps its low 16 bits and
    // pushes the rest (floor division, so negative limbs borrow) into the
    // next limb; the excess of the top limb wraps around with factor 38
    // (2^256 = 38 mod p).
    #[inline(always)]
    fn set_carry(&mut self) {
        for i in 0..15 {
            let c = self.0[i] >> 16;
            self.0[i] &= 0xFFFF;
            self.0[i + 1] += c;
        }
        let c = self.0[15] >> 16;
        self.0[15] &= 0xFFFF;
        self.0[0] += 38 * c;
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        for i in 0..16 {
            self.0[i] += rhs.0[i];
        }
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        for i in 0..16 {
            self.0[i] -= rhs.0[i];
        }
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        for i in 0..16 {
            self.0[i] = -self.0[i];
        }
    }

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        debug_assert!(ctl == 0 || ctl == 0xFFFFFFFF);
        let cw = (ctl as i32) as i64;
        for i in 0..16 {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    // Return a value equal to either a0 (if ctl == 0) or a1 (if
    // ctl == 0xFFFFFFFF). Value ctl MUST be either 0 or 0xFFFFFFFF.
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    // Conditionally swap two elements: values a and b are exchanged if
    // ctl == 0xFFFFFFFF, or not exchanged if ctl == 0x00000000. Value
    // ctl MUST be either 0x00000000 or 0xFFFFFFFF.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        debug_assert!(ctl == 0 || ctl == 0xFFFFFFFF);
        let cw = (ctl as i32) as i64;
        for i in 0..16 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    // Negate this value if ctl == 0xFFFFFFFF, leave it unchanged if
    // ctl == 0x00000000.
    #[inline]
    pub fn set_condneg(&mut self, ctl: u32) {
        let t = -*self;
        self.set_cond(&t, ctl);
    }

    #[inline]
    fn set_mul(&mut self, rhs: &Self) {
        let a = self.0;
        let b = rhs.0;

        // Schoolbook product over 31 positions; limbs are at most about
        // 2^18 in absolute value, so every sum fits comfortably.
        let mut t = [0i64; 31];
        for i in 0..16 {
            for j in 0..16 {
                t[i + j] += a[i] * b[j];
            }
        }

        // Fold the upper half: 2^256 = 38 mod p.
        for i in 0..15 {
            t[i] += 38 * t[i + 16];
        }
        self.0.copy_from_slice(&t[..16]);
        self.set_carry();
        self.set_carry();
    }

    // Square this value (in place).
    #[inline(always)]
    pub fn set_square(&mut self) {
        let a = *self;
        self.set_mul(&a);
    }

    // Square this value.
    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    // Square this value n times (in place).
    #[inline]
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    // Square this value n times.
    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    // Invert this value (in place); zero is mapped to zero.
    //
    // This raises the value to the power p-2 = 2^255 - 21. The exponent
    // bits are scanned from bit 253 down to bit 0 (bit 254 is the initial
    // value); all bits are set, except bits 2 and 4. The sequence of
    // operations is fixed.
    pub fn set_invert(&mut self) {
        let x = *self;
        for i in (0..254).rev() {
            self.set_square();
            if i != 2 && i != 4 {
                self.set_mul(&x);
            }
        }
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    // Raise this value to the power (p-5)/8 = 2^252 - 3 (in place). The
    // exponent bits are scanned from 250 down to 0; only bit 1 is clear.
    pub fn set_pow2523(&mut self) {
        let x = *self;
        for i in (0..251).rev() {
            self.set_square();
            if i != 1 {
                self.set_mul(&x);
            }
        }
    }

    #[inline(always)]
    pub fn pow2523(self) -> Self {
        let mut r = self;
        r.set_pow2523();
        r
    }

    /// Square root of a ratio.
    ///
    /// This returns (x, r) such that:
    ///
    ///  - If u and v are non-zero, and u/v is a square, then
    ///    r = 0xFFFFFFFF and x = sqrt(u/v).
    ///
    ///  - If u is zero, then r = 0xFFFFFFFF and x = 0 (regardless of
    ///    the value of v).
    ///
    ///  - If u is non-zero but v is zero, then r = 0x00000000 and x = 0.
    ///
    ///  - If u and v are non-zero, and u/v is not a square, then
    ///    r = 0x00000000 and x = sqrt(SQRT_M1*(u/v)).
    ///
    /// The returned root is always the nonnegative one (as per
    /// `is_negative()`).
    pub fn sqrt_ratio_m1(u: &Self, v: &Self) -> (Self, u32) {
        let v3 = v.square() * v;
        let v7 = v3.square() * v;
        let x = ((u * v7).pow2523() * v3) * u;

        // All three comparisons are always computed.
        let vxx = x.square() * v;
        let correct_sign = vxx.equals(*u);
        let flipped_sign = vxx.equals(-u);
        let flipped_sign_i = vxx.equals(-u * Self::SQRT_M1);

        let mut x = Self::select(&x, &(x * Self::SQRT_M1),
            flipped_sign | flipped_sign_i);
        x.set_abs();

        (x, correct_sign | flipped_sign)
    }

    /// Tests whether this element is "negative".
    ///
    /// An element is "negative" if the least significant bit of its
    /// canonical encoding is 1. Returned value is 0xFFFFFFFF for a
    /// negative element, 0x00000000 otherwise.
    #[inline]
    pub fn is_negative(self) -> u32 {
        ((self.encode()[0] & 1) as u32).wrapping_neg()
    }

    /// Replaces this element with its absolute value (negates it if it
    /// is negative).
    #[inline]
    pub fn set_abs(&mut self) {
        let n = self.is_negative();
        self.set_condneg(n);
    }

    #[inline(always)]
    pub fn abs(self) -> Self {
        let mut r = self;
        r.set_abs();
        r
    }

    // Compare this value with another one; returned value is 0xFFFFFFFF
    // on equality, 0 otherwise.
    #[inline(always)]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }

    // Compare this value with zero (constant-time); returned value
    // is 0xFFFFFFFF if this element is zero, 0 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        let bb = self.encode();
        let mut t = 0u32;
        for i in 0..32 {
            t |= bb[i] as u32;
        }
        ((t | t.wrapping_neg()) >> 31).wrapping_sub(1)
    }

    // Encode this value over exactly 32 bytes. Encoding is always canonical
    // (little-endian encoding of the value in the 0..p-1 range, top bit
    // of the last byte is always 0).
    pub fn encode(self) -> [u8; 32] {
        let mut t = self;
        t.set_carry();
        t.set_carry();
        t.set_carry();

        // Limbs now fit on 16 bits and the value is lower than 2*p + 2^16;
        // two conditional subtractions of p yield the canonical value.
        let mut t = t.0;
        for _ in 0..2 {
            let mut m = [0i64; 16];
            m[0] = t[0] - Self::MODULUS[0];
            for i in 1..15 {
                m[i] = t[i] - Self::MODULUS[i] - ((m[i - 1] >> 16) & 1);
                m[i - 1] &= 0xFFFF;
            }
            m[15] = t[15] - Self::MODULUS[15] - ((m[14] >> 16) & 1);
            m[14] &= 0xFFFF;

            // Keep t - p only if the subtraction did not borrow.
            let borrow = (m[15] >> 16) & 1;
            let cw = borrow - 1;
            for i in 0..16 {
                t[i] ^= cw & (t[i] ^ m[i]);
            }
        }

        let mut d = [0u8; 32];
        for i in 0..16 {
            d[2 * i] = t[i] as u8;
            d[2 * i + 1] = (t[i] >> 8) as u8;
        }
        d
    }

    // Decode 32 bytes (unsigned little-endian), ignoring the top bit of
    // the last byte. The resulting 255-bit value is not reduced; all
    // operations accept it as is.
    #[inline]
    pub fn set_decode_reduce(&mut self, buf: &[u8; 32]) {
        for i in 0..16 {
            self.0[i] = (buf[2 * i] as i64) | ((buf[2 * i + 1] as i64) << 8);
        }
        self.0[15] &= 0x7FFF;
    }

    #[inline(always)]
    pub fn decode_reduce(buf: &[u8; 32]) -> Self {
        let mut r = Self::ZERO;
        r.set_decode_reduce(buf);
        r
    }

    // Decode the field element from the provided bytes. If the source
    // slice does not have length exactly 32 bytes, or if the encoding
    // is non-canonical (top bit set, or value not lower than p), then
    // this element is set to zero, and 0 is returned. Otherwise, this
    // element is set to the decoded value, and 0xFFFFFFFF is returned.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        let bb = match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => bb,
            Err(_) => {
                *self = Self::ZERO;
                return 0;
            }
        };
        self.set_decode_reduce(bb);

        // The encoding is canonical if and only if it matches the
        // re-encoding of the decoded value.
        let ee = self.encode();
        let mut t = 0u32;
        for i in 0..32 {
            t |= (ee[i] ^ bb[i]) as u32;
        }
        let cc = ((t | t.wrapping_neg()) >> 31).wrapping_sub(1);
        self.set_cond(&Self::ZERO, !cc);
        cc
    }

    // Decode a field element from 32 bytes. On success, this returns
    // (r, cc), where cc has value 0xFFFFFFFF. If the source encoding is not
    // canonical, then this returns (0, 0).
    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut r = Self::ZERO;
        let cc = r.set_decode32(buf);
        (r, cc)
    }

    // Decode a field element from 32 bytes. If the source slice has length
    // exactly 32 bytes and contains a valid canonical encoding of a field
    // element, then that element is returned. Otherwise, `None` is
    // returned. Side-channel analysis may reveal to outsiders whether the
    // decoding succeeded.
    #[inline(always)]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let (r, cc) = Self::decode32(buf);
        if cc != 0 {
            Some(r)
        } else {
            None
        }
    }
}

// ========================================================================
// Implementations of all the traits needed to use the simple operators
// (+, *, -...) on field element instances, with or without references.

impl Add<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn add(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: GF25519) {
        self.set_add(&other);
    }
}

impl AddAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn add_assign(&mut self, other: &GF25519) {
        self.set_add(other);
    }
}

impl Mul<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn mul(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: GF25519) {
        self.set_mul(&other);
    }
}

impl MulAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn mul_assign(&mut self, other: &GF25519) {
        self.set_mul(other);
    }
}

impl Neg for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn neg(self) -> GF25519 {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: GF25519) -> GF25519 {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GF25519> for GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: &GF25519) -> GF25519 {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: GF25519) -> GF25519 {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&GF25519> for &GF25519 {
    type Output = GF25519;

    #[inline(always)]
    fn sub(self, other: &GF25519) -> GF25519 {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: GF25519) {
        self.set_sub(&other);
    }
}

impl SubAssign<&GF25519> for GF25519 {
    #[inline(always)]
    fn sub_assign(&mut self, other: &GF25519) {
        self.set_sub(other);
    }
}

// ========================================================================
