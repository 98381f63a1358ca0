//! Ristretto255 is a prime order group built over Curve25519.
//!
//! This library implements the ristretto255 group (RFC 9496) with
//! portable, constant-time code, and a convenient API so that scalars,
//! group elements and field elements may be used in straightforward
//! expressions with normal arithmetic operators.
//!
//! Arithmetic modulo p = 2^255 - 19 and modulo the group order L is
//! provided by the `backend` (a portable representation over sixteen
//! 16-bit limbs, one per `i64` word) and exported in `field`. Curve
//! Edwards25519, in extended coordinates, is implemented in the
//! `ed25519` module. The ristretto255 group itself is in `ristretto255`;
//! the `encoded` module offers the same operations on 32-byte encodings
//! (element addition and subtraction, multiplication, hash-to-group,
//! random generation, and scalar arithmetic), reporting invalid operands
//! through `Error`.
//!
//! # Usage
//!
//! The library is `no_std`. By default, the `std` feature is enabled; it
//! only makes `Error` implement `std::error::Error`. The `getrandom`
//! feature re-exports `OsRng`, which can be used with all `random()`
//! functions; any other RNG implementing `CryptoRng` and `RngCore` can
//! be used as well.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, except
//! that the `Option` and `Result` returned by decoding functions reveal
//! whether decoding succeeded. In order to avoid unwanted side-channel
//! leaks, Booleans are avoided (compilers tend to "optimize" things a bit
//! too eagerly when handling `bool` values). All functions that return or
//! use a potentially secret Boolean value use the `u32` type; the
//! convention is that 0xFFFFFFFF means "true", and 0x00000000 means
//! "false". No other value shall be used, for they would lead to
//! unpredictable results. Similarly, the `Eq` or `PartialEq` traits are
//! not implemented.
//!
//! Algebraic operations on field elements, scalars and group elements
//! are performed with the usual operators (e.g. `+`); appropriate traits
//! are defined so that structure types and pointers to structure types
//! can be used more or less interchangeably. Throughout the code,
//! functions that modify the object on which they are called tend to
//! have a name in `set_*()` (e.g. for a point `P`, `P.set_double()`
//! modifies the point structure in place, while `P.double()` leaves `P`
//! unmodified and returns the double as a new structure instance).
//!
//! No logging is performed; the library has no I/O and no global state.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

#[cfg(feature = "getrandom")]
pub use rand_core::OsRng;

pub mod backend;
pub mod field;
pub mod ed25519;
pub mod ristretto255;
pub mod encoded;

mod error;
pub use error::Error;

#[cfg(test)]
mod test_rng;
