use proptest::prelude::*;

use rh_codec::{
    classify, read_fixed_ascii, read_length_prefixed, read_matrix4x4, read_quaternion,
    read_vector3, read_vector4, write_fixed_ascii, write_length_prefix,
    write_length_prefixed_payload, write_matrix4x4, write_quaternion, write_vector3,
    write_vector4, ByteCursor, Matrix4x4, MatrixOrientation, Quaternion, Vector3, Vector4,
};

// Any bit pattern, so NaN payloads and infinities are covered
fn any_f32() -> impl Strategy<Value = f32> {
    any::<u32>().prop_map(f32::from_bits)
}

fn any_matrix() -> impl Strategy<Value = Matrix4x4> {
    prop::array::uniform16(any_f32()).prop_map(|v| Matrix4x4::from_stream(v, MatrixOrientation::RowMajor))
}

fn any_orientation() -> impl Strategy<Value = MatrixOrientation> {
    prop_oneof![Just(MatrixOrientation::RowMajor), Just(MatrixOrientation::ColumnMajor)]
}

fn other(orientation: MatrixOrientation) -> MatrixOrientation {
    match orientation {
        MatrixOrientation::RowMajor => MatrixOrientation::ColumnMajor,
        MatrixOrientation::ColumnMajor => MatrixOrientation::RowMajor,
    }
}

proptest! {
    #[test]
    fn fixed_ascii_roundtrip(text in "[ -~]{0,16}", extra in 0usize..8) {
        // Printable ASCII never ends in a NUL, so nothing is trimmed
        let width = text.len() + extra;
        let mut out = Vec::new();
        write_fixed_ascii(&mut out, &text, width).unwrap();
        prop_assert_eq!(out.len(), width);

        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_fixed_ascii(&mut cursor, width).unwrap(), text);
        prop_assert!(cursor.is_empty());
    }

    #[test]
    fn fixed_ascii_always_writes_width(text in "\\PC{0,24}", width in 0usize..16) {
        let mut out = Vec::new();
        write_fixed_ascii(&mut out, &text, width).unwrap();
        prop_assert_eq!(out.len(), width);
    }

    #[test]
    fn length_prefixed_roundtrip(text in "\\PC{0,32}") {
        let mut out = Vec::new();
        write_length_prefix(&mut out, &text).unwrap();
        write_length_prefixed_payload(&mut out, &text).unwrap();

        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_length_prefixed(&mut cursor, false).unwrap(), text);
        prop_assert_eq!(cursor.position(), out.len());
    }

    #[test]
    fn vector3_roundtrip_is_bit_exact(x in any_f32(), y in any_f32(), z in any_f32()) {
        let v = Vector3::new(x, y, z);
        let mut out = Vec::new();
        write_vector3(&mut out, &v).unwrap();
        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_vector3(&mut cursor).unwrap().to_bits(), v.to_bits());
    }

    #[test]
    fn vector4_and_quaternion_roundtrip_are_bit_exact(values in prop::array::uniform4(any_f32())) {
        let [x, y, z, w] = values;

        let v = Vector4::new(x, y, z, w);
        let mut out = Vec::new();
        write_vector4(&mut out, &v).unwrap();
        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_vector4(&mut cursor).unwrap().to_bits(), v.to_bits());

        let q = Quaternion::new(x, y, z, w);
        let mut out = Vec::new();
        write_quaternion(&mut out, &q).unwrap();
        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_quaternion(&mut cursor).unwrap().to_bits(), q.to_bits());
    }

    #[test]
    fn matrix_roundtrip_is_bit_exact(m in any_matrix(), orientation in any_orientation()) {
        let mut out = Vec::new();
        write_matrix4x4(&mut out, &m, orientation).unwrap();
        let mut cursor = ByteCursor::new(&out);
        prop_assert_eq!(read_matrix4x4(&mut cursor, orientation).unwrap().to_bits(), m.to_bits());
    }

    #[test]
    fn mismatched_orientation_reads_the_transpose(m in any_matrix(), orientation in any_orientation()) {
        let mut out = Vec::new();
        write_matrix4x4(&mut out, &m, orientation).unwrap();
        let mut cursor = ByteCursor::new(&out);
        let read_back = read_matrix4x4(&mut cursor, other(orientation)).unwrap();

        prop_assert_eq!(read_back.to_bits(), m.transpose().to_bits());
        if m.to_bits() != m.transpose().to_bits() {
            prop_assert_ne!(read_back.to_bits(), m.to_bits());
        }
    }

    #[test]
    fn classifier_never_alters_the_integer(bytes in any::<[u8; 4]>(), offset in any::<usize>()) {
        let field = classify(bytes, offset);
        prop_assert_eq!(field.value, i32::from_le_bytes(bytes));
        prop_assert_eq!(field.candidate.is_some(), field.looks_like_float);
        prop_assert_eq!(&field, &classify(bytes, offset));
    }
}
