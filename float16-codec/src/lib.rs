//! # float16-codec
//!
//! Bit-exact conversion between IEEE 754 binary16 words and `f64`.
//!
//! [`encode`] rounds any `f64` to the nearest binary16 value (ties-to-even) and
//! returns its 16-bit pattern; [`decode`] reconstructs the exact `f64` for a
//! pattern. Both are total: no input fails.
//!
//! Layout: `sign:1 | exponent:5 (bias 15) | mantissa:10`.
//!
//! `no_std`, no dependencies.

#![no_std]

pub mod classify;
pub mod codec;

pub use classify::{is_finite_bits, is_infinite_bits, is_nan_bits, is_sign_negative_bits};
pub use codec::{decode, decode_slice, encode, encode_slice, round};

/// Size of one encoded element in bytes.
pub const BYTES_PER_ELEMENT: usize = 2;

pub const SIGN_MASK: u16 = 0x8000;
pub const EXPONENT_MASK: u16 = 0x7c00;
pub const MANTISSA_MASK: u16 = 0x03ff;
pub const EXPONENT_BIAS: i32 = 15;

/// The single NaN pattern produced by [`encode`].
pub const CANONICAL_NAN: u16 = 0x7e00;
pub const POSITIVE_INFINITY: u16 = 0x7c00;
pub const NEGATIVE_INFINITY: u16 = 0xfc00;

/// Largest finite binary16 value.
pub const MAX: f64 = 65504.0;
/// Smallest positive normal binary16 value (2^-14).
pub const MIN_POSITIVE: f64 = 6.103515625e-5;
/// Smallest positive subnormal binary16 value (2^-24).
pub const MIN_POSITIVE_SUBNORMAL: f64 = 5.960464477539063e-8;
