// Module gf25519 defines the base field (mod 2^255 - 19) with 16-bit
// limbs in signed 64-bit words; module modl defines the scalars
// (mod L) over a byte-oriented representation.

pub mod gf25519;
pub mod modl;
