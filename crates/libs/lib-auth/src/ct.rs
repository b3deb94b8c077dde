//! # Constant-Time Comparison
//!
//! Byte comparison whose running time does not depend on where the inputs differ.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Slices of different length compare unequal. Length is not treated as secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal() {
        assert!(constant_time_eq(b"hello", b"hello"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_differs_at_any_position() {
        let base = [0x5a_u8; 64];
        for i in 0..base.len() {
            let mut other = base;
            other[i] ^= 0x01;
            assert!(!constant_time_eq(&base, &other), "difference at byte {i} not detected");
        }
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_eq(b"short", b"shorter"));
    }
}
