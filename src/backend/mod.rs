//! Portable implementations of the two finite fields used by the group.
//!
//! This module provides type aliases for the structures that implement
//! the base field of Curve25519 (integers modulo p = 2^255 - 19) and the
//! scalar field of the prime order subgroup (integers modulo
//! L = 2^252 + 27742317777372353535851937790883648493). There is a single
//! backend (`w16`), which uses 16-bit limbs held in 64-bit signed words;
//! all intermediate values stay exactly representable, so the same code
//! runs unchanged on 32-bit and 64-bit targets.
//!
//! In general, the following properties apply to the field implementations:
//!
//!  - An instance encapsulates a field element.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used on field elements (`+`, `-`,
//!    `*`, unary `-`, and the compound assignments `+=`, `-=` and `*=`).
//!    Operators can use both the raw types, and references thereof.
//!
//!  - Function `set_square(&mut self)` squares a field element (in place).
//!    Corresponding function `square(self) -> Self` returns the result
//!    as a new instance. Sequences of multiple squarings can be performed
//!    with `set_xsquare(&mut self, n: u32)` (and a corresponding
//!    `xsquare()` to get the result as a new instance).
//!
//!  - Function `set_neg(&mut self)` negates the instance on which it is
//!    applied.
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` sets
//!    the instance to the value of the other instance `a` if `ctl` is
//!    equal to 0xFFFFFFFF, or leaves the instance value unmodified if
//!    `ctl` is equal to 0x00000000.
//!
//!  - Function `select(a0: &Self, a1: &Self, ctl: u32) -> Self` returns
//!    a copy of `a0` if `ctl` is 0x00000000, or a copy of `a1` if
//!    `ctl` is 0xFFFFFFFF.
//!
//!  - Function `cswap(a: &mut Self, b: &mut Self, ctl: u32)`
//!    exchanges the contents of `a` and `b` if `ctl` is 0xFFFFFFFF,
//!    or leaves them unmodified if `ctl` is 0x00000000.
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF
//!    if `self` and `rhs` represent the same value, or 0x00000000
//!    otherwise. Function `iszero(self) -> u32` is a specialized
//!    subcase that compares `self` with zero.
//!
//!  - Function `set_invert(&mut self)` (and `invert(self) -> Self`)
//!    computes the inverse by exponentiation with a fixed sequence of
//!    squarings and multiplications. The "inverse" of zero is zero.
//!
//!  - Function `encode(self) -> [u8; 32]` encodes an element as
//!    exactly 32 bytes. Unsigned little-endian convention is used.
//!    Encoding is always canonical (i.e. the encoding always uses
//!    the integer which is lower than the field modulus).
//!
//!  - Function `decode32(buf: &[u8]) -> (Self, u32)` decodes some bytes
//!    with little-endian convention. If the source slice does not have
//!    length exactly 32 bytes, or if the bytes yield a non-canonical
//!    value, then the decoding fails. On success, the decoded value and
//!    0xFFFFFFFF are returned; on failure, zero and 0x00000000 are
//!    returned.
//!
//!  - Function `decode_reduce()` decodes some bytes with unsigned
//!    little-endian convention, and reduces the obtained integer. This
//!    process never fails. The base field takes a `&[u8; 32]` and only
//!    uses its low 255 bits (the top bit is ignored), while the scalar
//!    field accepts a slice of any length (normally 32 or 64 bytes).

pub mod w16;

/// Finite field: integers modulo p = 2^255 - 19.
///
/// Internal representation is 16 signed limbs of nominal width 16 bits.
/// This type implements `is_negative()`, `abs()`, `pow2523()` and
/// `sqrt_ratio_m1()`, which are needed by the ristretto255 formulas.
pub type GF25519 = w16::gf25519::GF25519;

/// Finite field: integers modulo L (prime order of the ristretto255 group).
///
/// Internal representation is the canonical 32-byte little-endian
/// encoding; products are reduced with a signed 64-entry accumulator
/// that exploits the special shape of L (2^252 plus a 125-bit value).
pub type ModL = w16::modl::ModL;
