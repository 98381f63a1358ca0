//! Byte-oriented ristretto255 API.
//!
//! Functions in this module take and return group elements and scalars
//! as 32-byte arrays, in the manner of the libsodium
//! `crypto_core_ristretto255_*()` and `crypto_scalarmult_ristretto255*()`
//! functions. They are thin wrappers around `ristretto255::Point` and
//! `ristretto255::Scalar`.
//!
//! Element operands are decoded with the canonical checks; if an operand
//! is not valid, the operation returns `Error::InvalidElement`. Scalar
//! operands of the `scalar` submodule are reduced modulo L (any 32-byte
//! value is accepted) and results are always canonical. Multipliers of
//! `scalar_mult()` and `scalar_mult_base()` are used as raw 256-bit
//! integers, without reduction.

#![allow(non_snake_case)]

use super::ristretto255::Point;
use super::{CryptoRng, Error, RngCore};

/// Encoding of the conventional generator of ristretto255.
pub const BASE_POINT: [u8; 32] = [
    0xe2, 0xf2, 0xae, 0x0a, 0x6a, 0xbc, 0x4e, 0x71,
    0xa8, 0x84, 0xa9, 0x61, 0xc5, 0x00, 0x51, 0x5f,
    0x58, 0xe3, 0x0b, 0x6a, 0xa5, 0x82, 0xdd, 0x8d,
    0xb6, 0xa6, 0x59, 0x45, 0xe0, 0x8d, 0x2d, 0x76,
];

#[inline]
fn decode_element(buf: &[u8]) -> Result<Point, Error> {
    Point::decode(buf).ok_or(Error::InvalidElement)
}

/// Returns the encoding of a uniformly random element.
pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> [u8; 32] {
    Point::random(rng).encode()
}

/// Tests whether some bytes are the canonical encoding of an element.
pub fn is_valid(buf: &[u8]) -> bool {
    Point::decode(buf).is_some()
}

/// Maps 64 bytes (normally a SHA-512 output) to an encoded element.
pub fn from_hash(h: &[u8; 64]) -> [u8; 32] {
    Point::from_hash(h).encode()
}

/// Adds two encoded elements.
pub fn add(p: &[u8], q: &[u8]) -> Result<[u8; 32], Error> {
    let P = decode_element(p)?;
    let Q = decode_element(q)?;
    Ok((P + Q).encode())
}

/// Subtracts encoded element `q` from encoded element `p`.
pub fn sub(p: &[u8], q: &[u8]) -> Result<[u8; 32], Error> {
    let P = decode_element(p)?;
    let Q = decode_element(q)?;
    Ok((P - Q).encode())
}

/// Multiplies the conventional generator by `n` (unsigned little-endian,
/// not reduced) and returns the encoded result.
pub fn scalar_mult_base(n: &[u8; 32]) -> [u8; 32] {
    Point::mulgen_bytes(n).encode()
}

/// Multiplies encoded element `p` by `n` (unsigned little-endian, not
/// reduced) and returns the encoded result.
pub fn scalar_mult(n: &[u8; 32], p: &[u8]) -> Result<[u8; 32], Error> {
    Ok(decode_element(p)?.mul_bytes(n).encode())
}

/// Scalars modulo L, as 32 bytes.
pub mod scalar {

    use crate::ristretto255::Scalar;
    use crate::{CryptoRng, RngCore};

    /// Returns a uniformly random scalar (canonical encoding).
    pub fn random<T: CryptoRng + RngCore>(rng: &mut T) -> [u8; 32] {
        Scalar::random(rng).encode()
    }

    /// Returns the inverse of `a` modulo L; zero is mapped to zero.
    pub fn invert(a: &[u8; 32]) -> [u8; 32] {
        Scalar::decode_reduce(a).invert().encode()
    }

    /// Returns `-a` modulo L.
    pub fn negate(a: &[u8; 32]) -> [u8; 32] {
        (-Scalar::decode_reduce(a)).encode()
    }

    /// Returns `a + b` modulo L.
    pub fn add(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        (Scalar::decode_reduce(a) + Scalar::decode_reduce(b)).encode()
    }

    /// Returns `a - b` modulo L.
    pub fn sub(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        (Scalar::decode_reduce(a) - Scalar::decode_reduce(b)).encode()
    }

    /// Returns `a * b` modulo L.
    pub fn mul(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
        (Scalar::decode_reduce(a) * Scalar::decode_reduce(b)).encode()
    }
}

// ========================================================================
