//! Vector, quaternion and matrix blocks
//!
//! Geometry values are stored as consecutive little-endian `f32` values with
//! no header. Reading and writing only move bit patterns around: no value is
//! ever computed, so NaN payloads, infinities and negative zero survive a
//! round trip unchanged.
//!
//! ## Matrix layout
//!
//! A 4x4 matrix is 16 floats, but the files use two layouts and the bytes do
//! not say which one is in use:
//!
//! ```text
//! RowMajor:    f0  f1  f2  f3  | f4 ... f7  | f8 ... f11 | f12 ... f15   (rows)
//! ColumnMajor: f0  f1  f2  f3  | f4 ... f7  | ...                        (columns)
//!              row 1 = f0, f4, f8, f12
//! ```
//!
//! [`Matrix4x4`] always holds the logical matrix by rows. The orientation is a
//! required argument of every matrix read and write.

use std::io::Write;

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Encoded size of a [`Vector3`]
pub const VECTOR3_SIZE: usize = 12;
/// Encoded size of a [`Vector4`] or [`Quaternion`]
pub const VECTOR4_SIZE: usize = 16;
/// Encoded size of a [`Matrix4x4`]
pub const MATRIX4X4_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vector4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// How the 16 stream floats of a matrix map onto its rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatrixOrientation {
    RowMajor,
    ColumnMajor,
}

/// 4x4 matrix stored by logical rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Matrix4x4 {
    pub rows: [[f32; 4]; 4],
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Raw bit patterns, for exact comparison
    pub fn to_bits(&self) -> [u32; 3] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits()]
    }
}

impl Vector4 {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_bits(&self) -> [u32; 4] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits(), self.w.to_bits()]
    }
}

impl Quaternion {
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub fn to_bits(&self) -> [u32; 4] {
        [self.x.to_bits(), self.y.to_bits(), self.z.to_bits(), self.w.to_bits()]
    }
}

impl Matrix4x4 {
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn identity() -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    pub fn row(&self, index: usize) -> [f32; 4] {
        self.rows[index]
    }

    /// Swap rows and columns. Values are copied, never recomputed.
    pub fn transpose(&self) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.rows[c][r];
            }
        }
        Self { rows }
    }

    /// Build a matrix from the 16 floats in stream order
    pub fn from_stream(values: [f32; 16], orientation: MatrixOrientation) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = values[stream_index(r, c, orientation)];
            }
        }
        Self { rows }
    }

    /// The 16 floats in the order they are stored for `orientation`
    pub fn to_stream(&self, orientation: MatrixOrientation) -> [f32; 16] {
        let mut values = [0.0; 16];
        for (r, row) in self.rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                values[stream_index(r, c, orientation)] = value;
            }
        }
        values
    }

    pub fn to_bits(&self) -> [[u32; 4]; 4] {
        self.rows.map(|row| row.map(f32::to_bits))
    }
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::identity()
    }
}

fn stream_index(row: usize, col: usize, orientation: MatrixOrientation) -> usize {
    match orientation {
        MatrixOrientation::RowMajor => row * 4 + col,
        MatrixOrientation::ColumnMajor => col * 4 + row,
    }
}

// Takes all N*4 bytes up front so a short buffer fails without a partial read
fn read_floats<const N: usize>(cursor: &mut ByteCursor<'_>) -> Result<[f32; N]> {
    let bytes = cursor.take(N * 4)?;
    let mut values = [0.0f32; N];
    for (value, chunk) in values.iter_mut().zip(bytes.chunks_exact(4)) {
        *value = f32::from_bits(LittleEndian::read_u32(chunk));
    }
    Ok(values)
}

fn write_floats<W: Write>(sink: &mut W, values: &[f32]) -> Result<()> {
    let mut bytes = vec![0u8; values.len() * 4];
    for (chunk, value) in bytes.chunks_exact_mut(4).zip(values) {
        LittleEndian::write_u32(chunk, value.to_bits());
    }
    sink.write_all(&bytes)?;
    Ok(())
}

/// Read X, Y, Z
pub fn read_vector3(cursor: &mut ByteCursor<'_>) -> Result<Vector3> {
    let [x, y, z] = read_floats::<3>(cursor)?;
    Ok(Vector3 { x, y, z })
}

/// Read X, Y, Z, W
pub fn read_vector4(cursor: &mut ByteCursor<'_>) -> Result<Vector4> {
    let [x, y, z, w] = read_floats::<4>(cursor)?;
    Ok(Vector4 { x, y, z, w })
}

/// Read X, Y, Z, W
pub fn read_quaternion(cursor: &mut ByteCursor<'_>) -> Result<Quaternion> {
    let [x, y, z, w] = read_floats::<4>(cursor)?;
    Ok(Quaternion { x, y, z, w })
}

/// Read 16 floats laid out according to `orientation`
pub fn read_matrix4x4(cursor: &mut ByteCursor<'_>, orientation: MatrixOrientation) -> Result<Matrix4x4> {
    let values = read_floats::<16>(cursor)?;
    Ok(Matrix4x4::from_stream(values, orientation))
}

pub fn write_vector3<W: Write>(sink: &mut W, v: &Vector3) -> Result<()> {
    write_floats(sink, &[v.x, v.y, v.z])
}

pub fn write_vector4<W: Write>(sink: &mut W, v: &Vector4) -> Result<()> {
    write_floats(sink, &[v.x, v.y, v.z, v.w])
}

pub fn write_quaternion<W: Write>(sink: &mut W, q: &Quaternion) -> Result<()> {
    write_floats(sink, &[q.x, q.y, q.z, q.w])
}

/// Write rows in order: row 1 first, then row 2, ...
pub fn write_matrix_row_major<W: Write>(sink: &mut W, m: &Matrix4x4) -> Result<()> {
    write_floats(sink, &m.to_stream(MatrixOrientation::RowMajor))
}

/// Write columns in order: column 1 first, then column 2, ...
pub fn write_matrix_column_major<W: Write>(sink: &mut W, m: &Matrix4x4) -> Result<()> {
    write_floats(sink, &m.to_stream(MatrixOrientation::ColumnMajor))
}

pub fn write_matrix4x4<W: Write>(sink: &mut W, m: &Matrix4x4, orientation: MatrixOrientation) -> Result<()> {
    match orientation {
        MatrixOrientation::RowMajor => write_matrix_row_major(sink, m),
        MatrixOrientation::ColumnMajor => write_matrix_column_major(sink, m),
    }
}
