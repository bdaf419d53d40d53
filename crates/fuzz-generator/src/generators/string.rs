//! String scalar generator.

use crate::stream::RandomStream;
use fuzz_core::Scalar;

/// Alphabet of generated strings: 62 case-sensitive alphanumerics.
pub const ALPHANUMERIC: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate an alphanumeric string of length `[1, max_len]`.
///
/// The length is drawn first, then one symbol per character.
pub fn generate_alphanumeric(stream: &mut RandomStream, max_len: u32) -> Scalar {
    let len = stream.next_int(1, i64::from(max_len.max(1))) as usize;
    let value = (0..len)
        .map(|_| ALPHANUMERIC[stream.next_choice(ALPHANUMERIC.len())] as char)
        .collect();
    Scalar::Str(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_alphabet() {
        let mut stream = RandomStream::new(1);
        for _ in 0..500 {
            let Scalar::Str(s) = generate_alphanumeric(&mut stream, 24) else {
                panic!("Expected Str scalar");
            };
            assert!((1..=24).contains(&s.len()));
            assert!(s.bytes().all(|b| b.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn test_max_len_one() {
        let mut stream = RandomStream::new(1);
        for _ in 0..50 {
            let Scalar::Str(s) = generate_alphanumeric(&mut stream, 1) else {
                panic!("Expected Str scalar");
            };
            assert_eq!(s.len(), 1);
        }
    }
}
