//! # rh-codec
//!
//! A Rust library for reading and writing the fixed-layout binary fields of
//! RH table files and model assets.
//!
//! ## Overview
//!
//! The table files have no schema in the stream: the caller knows the record
//! layout and decodes it field by field. This library provides the field
//! codecs:
//!
//! - Length-prefixed UTF-16, fixed-width ASCII, null-terminated ASCII and
//!   fixed UTF-16 block strings ([`strings`])
//! - Vector, quaternion and 4x4 matrix blocks in row-major or column-major
//!   layout ([`geometry`])
//! - An int-or-float heuristic for unlabeled 4-byte fields ([`classify`])
//!
//! All readers go through a [`ByteCursor`]; all writers accept any
//! [`std::io::Write`].
//!
//! ## Example - Reading
//!
//! ```rust
//! use rh_codec::{read_fixed_ascii, read_length_prefixed, read_matrix4x4, ByteCursor, MatrixOrientation};
//!
//! fn main() -> rh_codec::Result<()> {
//!     let mut record = vec![0x02, 0x00, b'.', 0, b'\\', 0];
//!     record.extend_from_slice(b"sword\0\0\0");
//!     for v in [1.0f32, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0] {
//!         record.extend_from_slice(&v.to_le_bytes());
//!     }
//!
//!     let mut cursor = ByteCursor::new(&record);
//!     let path = read_length_prefixed(&mut cursor, true)?;
//!     let name = read_fixed_ascii(&mut cursor, 8)?;
//!     let transform = read_matrix4x4(&mut cursor, MatrixOrientation::ColumnMajor)?;
//!
//!     assert_eq!(path, "");
//!     assert_eq!(name, "sword");
//!     assert_eq!(transform, rh_codec::Matrix4x4::identity());
//!     Ok(())
//! }
//! ```
//!
//! ## Example - Writing
//!
//! ```rust
//! use rh_codec::{write_fixed_ascii, write_length_prefix, write_length_prefixed_payload};
//!
//! fn main() -> rh_codec::Result<()> {
//!     let mut out = Vec::new();
//!
//!     // The payload writer never emits the count; write it first
//!     write_length_prefix(&mut out, "ABC")?;
//!     write_length_prefixed_payload(&mut out, "ABC")?;
//!     write_fixed_ascii(&mut out, "HI", 5)?;
//!
//!     assert_eq!(out, [3, 0, b'A', 0, b'B', 0, b'C', 0, b'H', b'I', 0, 0, 0]);
//!     Ok(())
//! }
//! ```

pub mod classify;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod strings;

pub use classify::{classify, classify_next, scan, ClassifiedField, FloatCandidate, FIELD_WIDTH};
pub use cursor::ByteCursor;
pub use error::{Error, Result};
pub use geometry::{
    read_matrix4x4, read_quaternion, read_vector3, read_vector4, write_matrix4x4,
    write_matrix_column_major, write_matrix_row_major, write_quaternion, write_vector3,
    write_vector4, Matrix4x4, MatrixOrientation, Quaternion, Vector3, Vector4,
};
pub use strings::{
    read_fixed_ascii, read_fixed_utf16_block, read_length_prefixed, read_null_terminated_ascii,
    read_utf16z, write_fixed_ascii, write_fixed_utf16_block, write_length_prefix,
    write_length_prefixed_payload, StringEncoding, DEFAULT_UTF16_BLOCK_SIZE, SENTINEL_PATH,
};
