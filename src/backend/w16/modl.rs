use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use core::convert::TryFrom;
use rand_core::{CryptoRng, RngCore};

/// Integer modulo L = 2^252 + 27742317777372353535851937790883648493.
///
/// The value is kept as its canonical 32-byte little-endian encoding
/// (always lower than L). Arithmetic widens the bytes into signed 64-bit
/// accumulators and reduces them back with `reduce()`.
#[derive(Clone, Copy, Debug)]
pub struct ModL([u8; 32]);

impl ModL {

    // The modulus, one byte per word (little-endian).
    const L: [i64; 32] = [
        0xED, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
        0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ];

    // L - 2, the exponent for inversion.
    const L_MINUS_2: [u8; 32] = [
        0xEB, 0xD3, 0xF5, 0x5C, 0x1A, 0x63, 0x12, 0x58,
        0xD6, 0x9C, 0xF7, 0xA2, 0xDE, 0xF9, 0xDE, 0x14,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
    ];

    // 2^256 mod L, for reduction of inputs larger than 64 bytes.
    const T256: ModL = ModL([
        0x1D, 0x95, 0x98, 0x8D, 0x74, 0x31, 0xEC, 0xD6,
        0x70, 0xCF, 0x7D, 0x73, 0xF4, 0x5B, 0xEF, 0xC6,
        0xFE, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x0F,
    ]);

    pub const ZERO: ModL = ModL([0; 32]);
    pub const ONE: ModL = ModL([
        1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    ]);

    /// Encoded length of a scalar, in bytes.
    pub const ENC_LEN: usize = 32;

    // Create an element by converting the provided integer.
    #[inline]
    pub fn from_u32(x: u32) -> Self {
        let mut r = Self::ZERO;
        r.0[..4].copy_from_slice(&x.to_le_bytes());
        r
    }

    // Reduce the signed accumulator x (64 words of weight 2^(8*i), each
    // of moderate size, possibly negative) modulo L, and return the
    // canonical encoding of the result.
    //
    // The top words are folded downwards using 2^252 = -(L - 2^252)
    // mod L, keeping words small with a signed carry; the final pass
    // removes the remaining multiple of L from the top nibble, then a
    // last correction and carry propagation yield bytes in 0..255.
    fn reduce(x: &mut [i64; 64]) -> [u8; 32] {
        for i in (32..64).rev() {
            let mut carry = 0i64;
            for j in (i - 32)..(i - 12) {
                x[j] += carry - 16 * x[i] * Self::L[j - (i - 32)];
                carry = (x[j] + 128) >> 8;
                x[j] -= carry << 8;
            }
            x[i - 12] += carry;
            x[i] = 0;
        }

        let mut carry = 0i64;
        for j in 0..32 {
            x[j] += carry - (x[31] >> 4) * Self::L[j];
            carry = x[j] >> 8;
            x[j] &= 0xFF;
        }
        for j in 0..32 {
            x[j] -= carry * Self::L[j];
        }

        let mut r = [0u8; 32];
        for i in 0..32 {
            x[i + 1] += x[i] >> 8;
            r[i] = (x[i] & 0xFF) as u8;
        }
        r
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        let mut t = [0i64; 64];
        for i in 0..32 {
            t[i] = (self.0[i] as i64) + (rhs.0[i] as i64);
        }
        self.0 = Self::reduce(&mut t);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    // Negate this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        let mut t = [0i64; 64];
        for i in 0..32 {
            t[i] = -(self.0[i] as i64);
        }
        self.0 = Self::reduce(&mut t);
    }

    fn set_mul(&mut self, rhs: &Self) {
        let mut t = [0i64; 64];
        for i in 0..32 {
            for j in 0..32 {
                t[i + j] += (self.0[i] as i64) * (rhs.0[j] as i64);
            }
        }
        self.0 = Self::reduce(&mut t);
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

    /// Inverts this value (in place).
    ///
    /// This computes x^(L-2) with a fixed sequence of 252 squarings and
    /// multiplications at the (public) non-zero bits of L-2. The
    /// "inverse" of zero is zero.
    pub fn set_invert(&mut self) {
        let x = *self;
        for i in (0..252).rev() {
            self.set_square();
            if ((Self::L_MINUS_2[i >> 3] >> (i & 7)) & 1) != 0 {
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

    // Conditionally copy the provided value ('a') into self:
    //  - If ctl == 0xFFFFFFFF, then the value of 'a' is copied into self.
    //  - If ctl == 0, then the value of self is unchanged.
    // ctl MUST be equal to 0 or 0xFFFFFFFF.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = ctl as u8;
        for i in 0..32 {
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

    // Compare this value with another one; returned value is 0xFFFFFFFF
    // on equality, 0 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let mut t = 0u32;
        for i in 0..32 {
            t |= (self.0[i] ^ rhs.0[i]) as u32;
        }
        ((t | t.wrapping_neg()) >> 31).wrapping_sub(1)
    }

    // Compare this value with zero; returned value is 0xFFFFFFFF if
    // this element is zero, 0 otherwise.
    #[inline(always)]
    pub fn iszero(self) -> u32 {
        self.equals(Self::ZERO)
    }

    // Encode this value over exactly 32 bytes (canonical, little-endian).
    #[inline(always)]
    pub fn encode(self) -> [u8; 32] {
        self.0
    }

    // Decode the scalar from exactly 32 bytes. If the source slice
    // does not have length 32, or if the value is not lower than L,
    // then this element is set to zero and 0 is returned; otherwise,
    // 0xFFFFFFFF is returned.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        let bb = match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => bb,
            Err(_) => {
                *self = Self::ZERO;
                return 0;
            }
        };

        // Constant-time lexicographic comparison with L, from the top
        // byte: c is set at the first differing byte if it is lower
        // than the corresponding byte of L.
        let mut c = 0i32;
        let mut n = 1i32;
        for i in (0..32).rev() {
            let b = bb[i] as i32;
            let l = Self::L[i] as i32;
            c |= ((b - l) >> 8) & n;
            n &= ((b ^ l) - 1) >> 8;
        }
        let cc = (c as u32).wrapping_neg();
        self.0 = *bb;
        self.set_cond(&Self::ZERO, !cc);
        cc
    }

    // Decode the scalar from exactly 32 bytes, with canonicality check.
    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut r = Self::ZERO;
        let cc = r.set_decode(buf);
        (r, cc)
    }

    // Decode a scalar from 32 bytes. If the slice does not have length
    // 32, or the encoding is not canonical, then `None` is returned.
    // Side-channel analysis may reveal whether the decoding succeeded.
    #[inline(always)]
    pub fn decode(buf: &[u8]) -> Option<Self> {
        let (r, cc) = Self::decode32(buf);
        if cc != 0 {
            Some(r)
        } else {
            None
        }
    }

    // Decode some bytes (unsigned little-endian, any length) with
    // reduction modulo L. This never fails.
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        let n = buf.len();
        if n <= 64 {
            let mut t = [0i64; 64];
            for i in 0..n {
                t[i] = buf[i] as i64;
            }
            self.0 = Self::reduce(&mut t);
            return;
        }

        // Longer inputs: Horner evaluation over 32-byte chunks, starting
        // with the (possibly partial) top chunk.
        let mut k = n & 31;
        if k == 0 {
            k = 32;
        }
        let mut off = n - k;
        self.set_decode_reduce(&buf[off..]);
        while off > 0 {
            off -= 32;
            self.set_mul(&Self::T256);
            let mut t = [0i64; 64];
            for i in 0..32 {
                t[i] = (self.0[i] as i64) + (buf[off + i] as i64);
            }
            self.0 = Self::reduce(&mut t);
        }
    }

    #[inline(always)]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut r = Self::ZERO;
        r.set_decode_reduce(buf);
        r
    }

    /// Generates a uniformly random scalar.
    ///
    /// Candidates of 253 bits (top three bits of the last byte cleared)
    /// are drawn from `rng` until one is lower than L; the comparison
    /// with L is constant-time. About one candidate in two is rejected;
    /// the number of draws is observable through timing, but it carries
    /// no information about the accepted value. Zero is a possible (if
    /// unlikely) output.
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> Self {
        loop {
            let mut r = [0u8; 32];
            rng.fill_bytes(&mut r);
            r[31] &= 0x1F;
            let (s, cc) = Self::decode32(&r);
            if cc != 0 {
                return s;
            }
        }
    }
}

// ========================================================================
// Implementations of all the traits needed to use the simple operators
// (+, *, -...) on scalars, with or without references.

impl Add<ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn add(self, other: ModL) -> ModL {
        let mut r = self;
        r.set_add(&other);
        r
    }
}

impl Add<&ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn add(self, other: &ModL) -> ModL {
        let mut r = self;
        r.set_add(other);
        r
    }
}

impl Add<ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn add(self, other: ModL) -> ModL {
        let mut r = *self;
        r.set_add(&other);
        r
    }
}

impl Add<&ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn add(self, other: &ModL) -> ModL {
        let mut r = *self;
        r.set_add(other);
        r
    }
}

impl AddAssign<ModL> for ModL {
    #[inline(always)]
    fn add_assign(&mut self, other: ModL) {
        self.set_add(&other);
    }
}

impl AddAssign<&ModL> for ModL {
    #[inline(always)]
    fn add_assign(&mut self, other: &ModL) {
        self.set_add(other);
    }
}

impl Mul<ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn mul(self, other: ModL) -> ModL {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn mul(self, other: &ModL) -> ModL {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl Mul<ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn mul(self, other: ModL) -> ModL {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl Mul<&ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn mul(self, other: &ModL) -> ModL {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl MulAssign<ModL> for ModL {
    #[inline(always)]
    fn mul_assign(&mut self, other: ModL) {
        self.set_mul(&other);
    }
}

impl MulAssign<&ModL> for ModL {
    #[inline(always)]
    fn mul_assign(&mut self, other: &ModL) {
        self.set_mul(other);
    }
}

impl Neg for ModL {
    type Output = ModL;

    #[inline(always)]
    fn neg(self) -> ModL {
        let mut r = self;
        r.set_neg();
        r
    }
}

impl Neg for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn neg(self) -> ModL {
        let mut r = *self;
        r.set_neg();
        r
    }
}

impl Sub<ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn sub(self, other: ModL) -> ModL {
        let mut r = self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&ModL> for ModL {
    type Output = ModL;

    #[inline(always)]
    fn sub(self, other: &ModL) -> ModL {
        let mut r = self;
        r.set_sub(other);
        r
    }
}

impl Sub<ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn sub(self, other: ModL) -> ModL {
        let mut r = *self;
        r.set_sub(&other);
        r
    }
}

impl Sub<&ModL> for &ModL {
    type Output = ModL;

    #[inline(always)]
    fn sub(self, other: &ModL) -> ModL {
        let mut r = *self;
        r.set_sub(other);
        r
    }
}

impl SubAssign<ModL> for ModL {
    #[inline(always)]
    fn sub_assign(&mut self, other: ModL) {
        self.set_sub(&other);
    }
}

impl SubAssign<&ModL> for ModL {
    #[inline(always)]
    fn sub_assign(&mut self, other: &ModL) {
        self.set_sub(other);
    }
}

// ========================================================================

#[cfg(test)]
mod tests {

    use super::ModL;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};
    use crate::test_rng::{DRNG, SeqRng};

    fn order() -> BigInt {
        (BigInt::from(1u32) << 252)
            + BigInt::parse_bytes(b"27742317777372353535851937790883648493", 10)
                .unwrap()
    }

    fn to_bigint(x: ModL) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.encode())
    }

    fn check_modl_ops(va: &[u8], vb: &[u8]) {
        let zl = order();
        let a = ModL::decode_reduce(va);
        let b = ModL::decode_reduce(vb);
        let za = BigInt::from_bytes_le(Sign::Plus, va) % &zl;
        let zb = BigInt::from_bytes_le(Sign::Plus, vb) % &zl;

        assert!(to_bigint(a) == za);
        assert!(to_bigint(b) == zb);
        assert!(to_bigint(a + b) == (&za + &zb) % &zl);
        assert!(to_bigint(a - b) == ((&zl + &za) - &zb) % &zl);
        assert!(to_bigint(-a) == (&zl - &za) % &zl);
        assert!(to_bigint(a * b) == (&za * &zb) % &zl);
        assert!(to_bigint(a.square()) == (&za * &za) % &zl);

        let c = a.invert();
        if a.iszero() != 0 {
            assert!(c.iszero() == 0xFFFFFFFF);
        } else {
            assert!((a * c).equals(ModL::ONE) == 0xFFFFFFFF);
        }

        let (d, cc) = ModL::decode32(&a.encode());
        assert!(cc == 0xFFFFFFFF);
        assert!(d.equals(a) == 0xFFFFFFFF);
    }

    #[test]
    fn modl_ops() {
        let mut sh = Sha256::new();
        check_modl_ops(&[0u8; 32], &[0u8; 32]);
        check_modl_ops(&[0xFFu8; 32], &[0xFFu8; 32]);
        check_modl_ops(&[0xFFu8; 64], &[0x80u8; 48]);
        for i in 0..300 {
            sh.update(((3 * i + 0) as u64).to_le_bytes());
            let v1 = sh.finalize_reset();
            sh.update(((3 * i + 1) as u64).to_le_bytes());
            let v2 = sh.finalize_reset();
            sh.update(((3 * i + 2) as u64).to_le_bytes());
            let v3 = sh.finalize_reset();
            let mut wide = [0u8; 64];
            wide[..32].copy_from_slice(&v1);
            wide[32..].copy_from_slice(&v2);
            check_modl_ops(&v1, &v2);
            check_modl_ops(&wide, &v3);
            check_modl_ops(&v3[..(i % 33)], &wide[..(i % 65)]);
        }
    }

    #[test]
    fn modl_decode_reduce_long() {
        let zl = order();
        let mut buf = [0u8; 200];
        for i in 0..buf.len() {
            buf[i] = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        for k in 60..201 {
            let c = ModL::decode_reduce(&buf[..k]);
            let zd = BigInt::from_bytes_le(Sign::Plus, &buf[..k]) % &zl;
            assert!(to_bigint(c) == zd);
        }
    }

    #[test]
    fn modl_border() {
        // x = L - 1
        let vx = hex::decode("ecd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010").unwrap();
        let x = ModL::decode(&vx).unwrap();
        assert!(x.equals(-ModL::ONE) == 0xFFFFFFFF);
        let ix = x.invert();
        assert!(ix.equals(x) == 0xFFFFFFFF);
        assert!((x * ix).equals(ModL::ONE) == 0xFFFFFFFF);
        assert!((x + ModL::ONE).iszero() == 0xFFFFFFFF);
        assert!((ModL::ZERO - ModL::ONE).equals(x) == 0xFFFFFFFF);
        assert!((ModL::ZERO - ModL::ONE).encode() == &vx[..]);
        assert!(ModL::ZERO.invert().iszero() == 0xFFFFFFFF);
        assert!((-ModL::ZERO).iszero() == 0xFFFFFFFF);

        // L and L + 1 are not canonical; both reduce properly.
        let mut vl = [0u8; 32];
        vl.copy_from_slice(&vx);
        vl[0] = 0xED;
        assert!(ModL::decode(&vl).is_none());
        assert!(ModL::decode_reduce(&vl).iszero() == 0xFFFFFFFF);
        vl[0] = 0xEE;
        assert!(ModL::decode(&vl).is_none());
        assert!(ModL::decode_reduce(&vl).equals(ModL::ONE) == 0xFFFFFFFF);
        assert!(ModL::decode(&[0u8; 31]).is_none());
        assert!(ModL::decode(&[0xFFu8; 32]).is_none());

        let two = ModL::from_u32(2);
        assert!((two * two.invert()).equals(ModL::ONE) == 0xFFFFFFFF);
        assert!(ModL::from_u32(0x01020304).encode()[..5] == [4, 3, 2, 1, 0]);
    }

    #[test]
    fn modl_random() {
        let zl = order();
        let mut rng = DRNG::from_seed(b"modl random");
        let s0 = ModL::random(&mut rng);
        for _ in 0..100 {
            let s = ModL::random(&mut rng);
            assert!(BigInt::from_bytes_le(Sign::Plus, &s.encode()) < zl);
            assert!(s.equals(s0) == 0);
        }

        // Candidates not lower than L are rejected.
        let mut big = [0xFFu8; 32];
        big[31] = 0x1F;
        let mut vl = [0u8; 32];
        vl.copy_from_slice(&hex::decode("edd3f55c1a631258d69cf7a2def9de1400000000000000000000000000000010").unwrap());
        let mut ok = [0x42u8; 32];
        ok[31] = 0x0F;
        let mut rng = SeqRng::new(&[big, vl, ok]);
        let s = ModL::random(&mut rng);
        assert!(s.encode() == ok);
        assert!(rng.draws() == 3);
    }
}
