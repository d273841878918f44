//! Classification of raw binary16 words without decoding them.

use crate::{EXPONENT_MASK, MANTISSA_MASK, SIGN_MASK};

#[inline]
pub const fn is_nan_bits(bits: u16) -> bool {
    bits & EXPONENT_MASK == EXPONENT_MASK && bits & MANTISSA_MASK != 0
}

#[inline]
pub const fn is_infinite_bits(bits: u16) -> bool {
    bits & !SIGN_MASK == EXPONENT_MASK
}

/// True for zeros, subnormals and normals.
#[inline]
pub const fn is_finite_bits(bits: u16) -> bool {
    bits & EXPONENT_MASK != EXPONENT_MASK
}

/// Sign bit set. NaN patterns report their raw sign bit.
#[inline]
pub const fn is_sign_negative_bits(bits: u16) -> bool {
    bits & SIGN_MASK != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CANONICAL_NAN, NEGATIVE_INFINITY, POSITIVE_INFINITY};

    #[test]
    fn test_classify() {
        assert!(is_nan_bits(CANONICAL_NAN));
        assert!(is_nan_bits(0xfc01));
        assert!(!is_nan_bits(POSITIVE_INFINITY));

        assert!(is_infinite_bits(POSITIVE_INFINITY));
        assert!(is_infinite_bits(NEGATIVE_INFINITY));
        assert!(!is_infinite_bits(0x7bff));

        assert!(is_finite_bits(0x7bff));
        assert!(is_finite_bits(0x8001));
        assert!(!is_finite_bits(CANONICAL_NAN));

        assert!(is_sign_negative_bits(0x8000));
        assert!(!is_sign_negative_bits(0x0000));
    }
}
