//! Finite fields.
//!
//! The base field of Curve25519 (integers modulo p = 2^255 - 19) and
//! the scalar field (integers modulo the prime order L of the
//! ristretto255 group). These are the backend-provided types.

pub use crate::backend::GF25519;
pub use crate::backend::ModL;
