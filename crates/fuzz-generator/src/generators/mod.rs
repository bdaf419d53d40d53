//! Value generators for `set` commands.
//!
//! Draw order is part of the determinism contract: changing the order or
//! number of draws here changes every sequence generated from a given seed.

pub mod numeric;
pub mod string;

use crate::stream::RandomStream;
use fuzz_core::{FieldMap, Scalar, Value};

/// Number of scalar kinds the scalar draw chooses between.
const SCALAR_KINDS: i64 = 5;

/// Generate a `set` value: a scalar with probability 4/5, otherwise a field
/// map of `[1, max_fields]` scalars named `field:0`, `field:1`, ...
pub fn generate_value(stream: &mut RandomStream, max_string_len: u32, max_fields: u32) -> Value {
    if stream.next_int(0, 4) < 4 {
        return Value::Scalar(generate_scalar(stream, max_string_len));
    }

    let count = stream.next_int(1, i64::from(max_fields.max(1)));
    let mut fields = FieldMap::with_capacity(count as usize);
    for i in 0..count {
        fields.push(format!("field:{i}"), generate_scalar(stream, max_string_len));
    }
    Value::Map(fields)
}

/// Generate one scalar, choosing uniformly between integer, float, string,
/// boolean and null.
pub fn generate_scalar(stream: &mut RandomStream, max_string_len: u32) -> Scalar {
    match stream.next_int(0, SCALAR_KINDS - 1) {
        0 => numeric::generate_int(stream),
        1 => numeric::generate_float(stream),
        2 => string::generate_alphanumeric(stream, max_string_len),
        3 => Scalar::Bool(stream.next_bool()),
        _ => Scalar::Null,
    }
}
