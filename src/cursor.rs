//! Advance-only byte cursor
//!
//! Every decoder in this crate reads through a [`ByteCursor`]: a borrowed byte
//! slice plus a position counter. The cursor never seeks backwards, and the
//! position is only used to attach offsets to errors and diagnostics.
//!
//! Reads are all-or-nothing: a read that needs more bytes than remain fails
//! with [`Error::UnexpectedEndOfStream`] and leaves the position untouched.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{Error, Result};

/// Sequential reader over an in-memory buffer
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Start reading at `pos`. A position past the end is clamped to the end.
    pub fn with_position(data: &'a [u8], pos: usize) -> Self {
        Self {
            data,
            pos: pos.min(data.len()),
        }
    }

    /// Absolute offset of the next byte to be read
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying buffer
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Consume exactly `n` bytes
    pub fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            tracing::trace!(offset = self.pos, needed = n, available, "short read");
            return Err(Error::UnexpectedEndOfStream {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Consume exactly `N` bytes into a fixed-size array
    pub fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Consume everything that is left (possibly nothing)
    pub fn take_rest(&mut self) -> &'a [u8] {
        let bytes = &self.data[self.pos..];
        self.pos = self.data.len();
        bytes
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    /// Read an IEEE754 single. The bit pattern is kept as-is, NaN payloads included.
    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_bits(self.read_u32()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_reads_advance_position() {
        let data = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u16().unwrap(), 0x1234);
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.read_u8().unwrap(), 0xff);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_short_read_reports_offset_and_keeps_position() {
        let data = [1u8, 2, 3];
        let mut cursor = ByteCursor::new(&data);
        cursor.skip(1).unwrap();

        let err = cursor.read_i32().unwrap_err();
        match err {
            Error::UnexpectedEndOfStream {
                offset,
                needed,
                available,
            } => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_f32_keeps_nan_payload() {
        let bits: u32 = 0x7fc0_1234;
        let data = bits.to_le_bytes();
        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_f32().unwrap().to_bits(), bits);
    }

    #[test]
    fn test_with_position_and_take_rest() {
        let data = [9u8, 8, 7, 6];
        let mut cursor = ByteCursor::with_position(&data, 1);
        assert_eq!(cursor.take_rest(), &[8, 7, 6]);
        assert_eq!(cursor.take_rest(), &[] as &[u8]);

        let clamped = ByteCursor::with_position(&data, 100);
        assert_eq!(clamped.position(), 4);
    }
}
