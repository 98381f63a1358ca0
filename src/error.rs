//! Error type for the byte-oriented API.

use thiserror::Error;

/// Failure of a composite operation on encoded group elements.
///
/// The low-level decoding functions report failure with a `u32` mask or
/// an `Option`; this type is only used by the functions of the
/// `encoded` module, which take their operands as bytes and must reject
/// malformed input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An operand is not the canonical encoding of a ristretto255 element.
    #[error("invalid ristretto255 element encoding")]
    InvalidElement,
}
