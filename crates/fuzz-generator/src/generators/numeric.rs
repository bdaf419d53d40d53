//! Numeric scalar generators.

use crate::stream::RandomStream;
use fuzz_core::Scalar;

/// Inclusive bounds of generated integers.
pub const INT_RANGE: (i64, i64) = (-100_000, 100_000);

/// Largest numerator of a generated float.
pub const FLOAT_NUMERATOR_MAX: i64 = i32::MAX as i64;

/// Inclusive bounds of a generated float's divisor.
pub const FLOAT_DIVISOR_RANGE: (i64, i64) = (1, 1000);

/// Generate an integer in [`INT_RANGE`].
pub fn generate_int(stream: &mut RandomStream) -> Scalar {
    Scalar::Int(stream.next_int(INT_RANGE.0, INT_RANGE.1))
}

/// Generate a float as `n / d` with `n` in `[0, 2^31 - 1]` and `d` in `[1, 1000]`.
///
/// The numerator is drawn before the divisor.
pub fn generate_float(stream: &mut RandomStream) -> Scalar {
    let numerator = stream.next_int(0, FLOAT_NUMERATOR_MAX);
    let divisor = stream.next_int(FLOAT_DIVISOR_RANGE.0, FLOAT_DIVISOR_RANGE.1);
    Scalar::Float(numerator as f64 / divisor as f64)
}
