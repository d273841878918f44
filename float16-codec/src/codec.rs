use crate::{CANONICAL_NAN, EXPONENT_MASK, MANTISSA_MASK, POSITIVE_INFINITY, SIGN_MASK};

const F64_EXPONENT_BIAS: i32 = 1023;
const F64_MANTISSA_BITS: u32 = 52;
const F64_MANTISSA_MASK: u64 = (1 << F64_MANTISSA_BITS) - 1;
const F64_HIDDEN_BIT: u64 = 1 << F64_MANTISSA_BITS;

/// Mantissa bits dropped when narrowing a normal f64 to binary16.
const NORMAL_SHIFT: u32 = F64_MANTISSA_BITS - 10;

/// 2^-24, the weight of one subnormal mantissa step.
const SUBNORMAL_SCALE: f64 = 1.0 / 16_777_216.0;

/// Encode an `f64` as binary16 bits, rounding to nearest with ties to even.
///
/// NaN encodes to [`CANONICAL_NAN`] regardless of sign or payload. Magnitudes
/// that round above 65504 become signed infinity, magnitudes at or below 2^-25
/// become signed zero.
pub fn encode(value: f64) -> u16 {
    let x = value.to_bits();
    let sign = ((x >> 48) as u16) & SIGN_MASK;
    let exp = ((x >> F64_MANTISSA_BITS) & 0x7ff) as i32;
    let man = x & F64_MANTISSA_MASK;

    if exp == 0x7ff {
        return if man != 0 { CANONICAL_NAN } else { sign | POSITIVE_INFINITY };
    }

    // f64 subnormals land here too (e = -1023) and flush to zero below.
    let e = exp - F64_EXPONENT_BIAS;

    if e > 15 {
        return sign | POSITIVE_INFINITY;
    }

    if e >= -14 {
        let half_exp = ((e + 15) as u16) << 10;
        let half_man = (man >> NORMAL_SHIFT) as u16;
        let round_bit = 1u64 << (NORMAL_SHIFT - 1);
        let out = sign | half_exp | half_man;
        // round up when above the halfway point, or exactly halfway with an odd lsb;
        // a mantissa carry walks into the exponent (0x7bff + 1 is infinity)
        if man & round_bit != 0 && man & (3 * round_bit - 1) != 0 {
            return out + 1;
        }
        return out;
    }

    if e < -25 {
        return sign;
    }

    // subnormal: value = m * 2^-24 with m in 0..=1023 after rounding
    let full = man | F64_HIDDEN_BIT;
    let shift = (28 - e) as u32; // 43..=53
    let half_man = (full >> shift) as u16;
    let round_bit = 1u64 << (shift - 1);
    let out = sign | half_man;
    if full & round_bit != 0 && full & (3 * round_bit - 1) != 0 {
        return out + 1;
    }
    out
}

/// Decode binary16 bits to the exact `f64` they denote.
///
/// Every NaN pattern decodes to the platform quiet NaN.
pub fn decode(bits: u16) -> f64 {
    let negative = bits & SIGN_MASK != 0;
    let exp = (bits & EXPONENT_MASK) >> 10;
    let man = bits & MANTISSA_MASK;

    let magnitude = match exp {
        0 => f64::from(man) * SUBNORMAL_SCALE,
        0x1f if man != 0 => return f64::NAN,
        0x1f => f64::INFINITY,
        _ => {
            let biased = (i32::from(exp) - crate::EXPONENT_BIAS + F64_EXPONENT_BIAS) as u64;
            f64::from_bits((biased << F64_MANTISSA_BITS) | (u64::from(man) << NORMAL_SHIFT))
        }
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Nearest binary16 value to `value`, as an `f64`.
#[inline]
pub fn round(value: f64) -> f64 {
    decode(encode(value))
}

/// Encode `src` into `dst` element by element.
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn encode_slice(src: &[f64], dst: &mut [u16]) {
    assert_eq!(src.len(), dst.len(), "encode_slice length mismatch");
    for (out, &value) in dst.iter_mut().zip(src) {
        *out = encode(value);
    }
}

/// Decode `src` into `dst` element by element.
///
/// # Panics
///
/// Panics if the two slices have different lengths.
pub fn decode_slice(src: &[u16], dst: &mut [f64]) {
    assert_eq!(src.len(), dst.len(), "decode_slice length mismatch");
    for (out, &bits) in dst.iter_mut().zip(src) {
        *out = decode(bits);
    }
}
