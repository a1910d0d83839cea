//! Int-or-float heuristic for unlabeled 4-byte fields
//!
//! When working out the layout of an undocumented record, most 4-byte fields
//! are either an `i32` or an `f32`. [`classify`] reinterprets the bytes both
//! ways and flags the ones that plausibly hold a float. The flag is advisory:
//! the returned value is always the plain `i32` reinterpretation.
//!
//! Rules, in order:
//! 1. NaN or infinity: integer
//! 2. all-zero integer: integer (zero fields are conventionally integers)
//! 3. `f32::MIN` / `f32::MAX` are accepted as plausible sentinels and fall through
//! 4. magnitude outside `0..=f32::MAX`: integer
//! 5. otherwise: float-like, with a [`FloatCandidate`] attached for review
//!
//! Rule 4 cannot trigger for a finite float. It is kept so the thresholds stay
//! exactly as the existing tooling applies them.

use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Width of a classified field
pub const FIELD_WIDTH: usize = 4;

/// Diagnostic record for a field that looks like a float
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatCandidate {
    /// Absolute byte offset of the field
    pub offset: usize,
    /// The four bytes in stream order, e.g. `C3 F5 48 40`
    pub raw_hex: String,
    /// The bytes read as a little-endian `f32`
    pub value: f32,
}

/// Result of classifying one 4-byte field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedField {
    pub offset: usize,
    pub bytes: [u8; FIELD_WIDTH],
    /// Little-endian `i32` reinterpretation, never altered by the heuristic
    pub value: i32,
    pub looks_like_float: bool,
    /// Present exactly when `looks_like_float` is set
    pub candidate: Option<FloatCandidate>,
}

/// Classify four bytes located at `offset`
pub fn classify(bytes: [u8; FIELD_WIDTH], offset: usize) -> ClassifiedField {
    let value = i32::from_le_bytes(bytes);
    let float = f32::from_le_bytes(bytes);
    let looks_like_float = is_float_like(value, float);

    let candidate = looks_like_float.then(|| FloatCandidate {
        offset,
        raw_hex: hex_bytes(&bytes),
        value: float,
    });

    ClassifiedField {
        offset,
        bytes,
        value,
        looks_like_float,
        candidate,
    }
}

/// Read and classify the next field, using the cursor position as its offset
pub fn classify_next(cursor: &mut ByteCursor<'_>) -> Result<ClassifiedField> {
    let offset = cursor.position();
    let bytes = cursor.take_array::<FIELD_WIDTH>()?;
    Ok(classify(bytes, offset))
}

/// Classify every whole 4-byte slot of `region`.
///
/// `base_offset` is the absolute offset of `region[0]`. A trailing partial
/// slot is ignored.
pub fn scan(region: &[u8], base_offset: usize) -> Vec<ClassifiedField> {
    region
        .chunks_exact(FIELD_WIDTH)
        .enumerate()
        .map(|(i, chunk)| {
            classify(
                [chunk[0], chunk[1], chunk[2], chunk[3]],
                base_offset + i * FIELD_WIDTH,
            )
        })
        .collect()
}

fn is_float_like(int: i32, float: f32) -> bool {
    if float.is_nan() || float.is_infinite() {
        return false;
    }
    if int == 0 {
        return false;
    }
    // f32::MIN and f32::MAX are not rejected here; they go through the range check
    let magnitude = float.abs();
    if !(0.0..=f32::MAX).contains(&magnitude) {
        return false;
    }
    true
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_integer() {
        let field = classify([0, 0, 0, 0], 0);
        assert_eq!(field.value, 0);
        assert!(!field.looks_like_float);
        assert!(field.candidate.is_none());
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn test_pi_is_float_like() {
        let bytes = 3.14f32.to_le_bytes();
        let field = classify(bytes, 0x40);

        assert_eq!(field.value, 3.14f32.to_bits() as i32);
        assert!(field.looks_like_float);

        let candidate = field.candidate.unwrap();
        assert_eq!(candidate.offset, 0x40);
        assert_eq!(candidate.raw_hex, "C3 F5 48 40");
        assert_eq!(candidate.value, 3.14f32);
    }

    #[test]
    fn test_nan_and_infinity_are_integers() {
        for float in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let bytes = float.to_le_bytes();
            let field = classify(bytes, 0);
            assert!(!field.looks_like_float);
            assert_eq!(field.value, i32::from_le_bytes(bytes));
        }
    }

    #[test]
    fn test_float_extremes_are_float_like() {
        for float in [f32::MAX, f32::MIN] {
            assert!(classify(float.to_le_bytes(), 0).looks_like_float);
        }
    }

    #[test]
    fn test_small_integers_read_as_subnormal_floats() {
        // Heuristic quirk: 1 is a subnormal float bit pattern and is flagged
        let field = classify(1i32.to_le_bytes(), 0);
        assert_eq!(field.value, 1);
        assert!(field.looks_like_float);
    }

    #[test]
    fn test_negative_zero_is_float_like() {
        let field = classify((-0.0f32).to_le_bytes(), 0);
        assert_eq!(field.value, i32::MIN);
        assert!(field.looks_like_float);
    }

    #[test]
    fn test_classify_is_pure() {
        let bytes = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(classify(bytes, 8), classify(bytes, 8));
        assert_eq!(classify(bytes, 8).value, 0x7856_3412);
    }

    #[test]
    fn test_classify_next_uses_cursor_offset() {
        let mut data = vec![0u8; 4];
        data.extend_from_slice(&1.5f32.to_le_bytes());
        let mut cursor = ByteCursor::new(&data);

        let first = classify_next(&mut cursor).unwrap();
        let second = classify_next(&mut cursor).unwrap();
        assert_eq!(first.offset, 0);
        assert!(!first.looks_like_float);
        assert_eq!(second.offset, 4);
        assert_eq!(second.candidate.unwrap().offset, 4);
        assert!(classify_next(&mut cursor).is_err());
    }

    #[test]
    fn test_scan_ignores_partial_slot() {
        let mut region = Vec::new();
        region.extend_from_slice(&7i32.to_le_bytes());
        region.extend_from_slice(&0i32.to_le_bytes());
        region.extend_from_slice(&[0xAA, 0xBB]);

        let fields = scan(&region, 0x100);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].offset, 0x100);
        assert_eq!(fields[0].value, 7);
        assert_eq!(fields[1].offset, 0x104);
        assert!(!fields[1].looks_like_float);
    }
}
