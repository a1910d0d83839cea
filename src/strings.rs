//! String encodings used by RH table files
//!
//! The table files mix several incompatible string representations, often
//! within the same record:
//!
//! - **Length-prefixed**: `u16` character count, then that many UTF-16LE code units
//! - **Fixed ASCII**: a fixed-width field, right-padded with zero bytes
//! - **Null-terminated ASCII**: bytes up to the first `0x00`
//! - **Fixed UTF-16 block**: a fixed-size block (usually 512 bytes) holding
//!   UTF-16LE text terminated by a `0x0000` code unit
//!
//! Nothing in the stream says which representation a field uses; the caller
//! picks the reader from its knowledge of the record layout.
//!
//! Writers are not all exact inverses of the readers. In particular
//! [`write_length_prefixed_payload`] emits only the character data. The count
//! is written separately with [`write_length_prefix`], so the record-level
//! code always spells out both halves of the field.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Default size of a fixed UTF-16 block
pub const DEFAULT_UTF16_BLOCK_SIZE: usize = 512;

/// Path value meaning "no path"
pub const SENTINEL_PATH: &str = ".\\";

/// On-disk string representation of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// `u16` count followed by UTF-16LE code units
    LengthPrefixed { collapse_sentinel: bool },
    /// Exactly `width` bytes, zero padded
    FixedAscii(usize),
    /// ASCII up to the first zero byte
    NullTerminatedAscii,
    /// `size` bytes of UTF-16LE terminated by `0x0000`
    FixedUtf16Block(usize),
    /// UTF-16LE terminated by `0x0000`, empty when unterminated
    Utf16ZFromBuffer,
}

impl StringEncoding {
    /// Decode one field from `cursor`.
    ///
    /// The buffer-based encodings (`NullTerminatedAscii`, `Utf16ZFromBuffer`)
    /// treat everything left in the cursor as the field and consume it, so the
    /// cursor should be positioned over exactly that field's bytes.
    pub fn read(&self, cursor: &mut ByteCursor<'_>) -> Result<String> {
        match *self {
            StringEncoding::LengthPrefixed { collapse_sentinel } => {
                read_length_prefixed(cursor, collapse_sentinel)
            }
            StringEncoding::FixedAscii(width) => read_fixed_ascii(cursor, width),
            StringEncoding::NullTerminatedAscii => Ok(read_null_terminated_ascii(cursor.take_rest())),
            StringEncoding::FixedUtf16Block(size) => read_fixed_utf16_block(cursor, size),
            StringEncoding::Utf16ZFromBuffer => Ok(read_utf16z(cursor.take_rest())),
        }
    }
}

/// Read a `u16`-count-prefixed UTF-16LE string.
///
/// A count of zero consumes only the two prefix bytes. Trailing NUL code
/// units are trimmed. With `collapse_sentinel`, the value `.\` reads as empty.
///
/// A count that runs past the end of the data fails with
/// [`Error::InvalidLengthPrefix`] and the cursor is not advanced.
pub fn read_length_prefixed(cursor: &mut ByteCursor<'_>, collapse_sentinel: bool) -> Result<String> {
    let prefix_offset = cursor.position();
    let mut probe = cursor.clone();

    let count = probe.read_u16()? as usize;
    if count == 0 {
        *cursor = probe;
        return Ok(String::new());
    }

    let available = probe.remaining();
    if count * 2 > available {
        tracing::debug!(offset = prefix_offset, count, available, "length prefix past end of data");
        return Err(Error::InvalidLengthPrefix {
            offset: prefix_offset,
            count,
            available,
        });
    }

    let text = decode_utf16le(probe.take(count * 2)?);
    *cursor = probe;

    let text = text.trim_end_matches('\0');
    if collapse_sentinel && text == SENTINEL_PATH {
        return Ok(String::new());
    }
    Ok(text.to_string())
}

/// Read a zero-padded ASCII field of exactly `width` bytes
pub fn read_fixed_ascii(cursor: &mut ByteCursor<'_>, width: usize) -> Result<String> {
    let bytes = cursor.take(width)?;
    Ok(match bytes.iter().rposition(|&b| b != 0) {
        Some(last) => decode_ascii(&bytes[..=last]),
        None => String::new(),
    })
}

/// Decode ASCII up to the first zero byte, or the whole buffer if there is none
pub fn read_null_terminated_ascii(buffer: &[u8]) -> String {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    decode_ascii(&buffer[..end])
}

/// Read a `size`-byte block of `0x0000`-terminated UTF-16LE text.
///
/// Bytes after the terminator are ignored. An unterminated block decodes in
/// full, minus a dangling final byte when `size` is odd.
pub fn read_fixed_utf16_block(cursor: &mut ByteCursor<'_>, size: usize) -> Result<String> {
    let block = cursor.take(size)?;
    let end = utf16_terminator(block).unwrap_or(block.len() & !1);
    Ok(decode_utf16le(&block[..end]))
}

/// Decode `0x0000`-terminated UTF-16LE from a buffer.
///
/// Unlike [`read_fixed_utf16_block`], an unterminated buffer yields an empty
/// string.
pub fn read_utf16z(buffer: &[u8]) -> String {
    match utf16_terminator(buffer) {
        Some(end) => decode_utf16le(&buffer[..end]),
        None => String::new(),
    }
}

/// Write the UTF-16LE code units of `text`. No length prefix is written.
pub fn write_length_prefixed_payload<W: Write>(sink: &mut W, text: &str) -> Result<()> {
    sink.write_all(&encode_utf16le(text))?;
    Ok(())
}

/// Write the `u16` code-unit count that precedes a length-prefixed payload
pub fn write_length_prefix<W: Write>(sink: &mut W, text: &str) -> Result<()> {
    let units = text.encode_utf16().count();
    let count = u16::try_from(units).map_err(|_| Error::StringTooLong { units })?;
    sink.write_u16::<LittleEndian>(count)?;
    Ok(())
}

/// Write `text` as ASCII into exactly `width` bytes.
///
/// Longer text is truncated, shorter text is zero padded. Non-ASCII
/// characters are written as `?`.
pub fn write_fixed_ascii<W: Write>(sink: &mut W, text: &str, width: usize) -> Result<()> {
    let mut encoded = encode_ascii(text);
    encoded.resize(width, 0);
    sink.write_all(&encoded)?;
    Ok(())
}

/// Write `text` as a `size`-byte UTF-16LE block.
///
/// The text is cut at a code-unit boundary so that a `0x0000` terminator
/// always fits, and the rest of the block is zero filled.
pub fn write_fixed_utf16_block<W: Write>(sink: &mut W, text: &str, size: usize) -> Result<()> {
    let max_payload = size.saturating_sub(2) & !1;
    let mut block = encode_utf16le(text);
    block.truncate(max_payload);
    block.resize(size, 0);
    sink.write_all(&block)?;
    Ok(())
}

/// Byte offset of the first aligned `00 00` pair
fn utf16_terminator(bytes: &[u8]) -> Option<usize> {
    bytes
        .chunks_exact(2)
        .position(|pair| pair == [0, 0])
        .map(|unit| unit * 2)
}

fn decode_utf16le(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn encode_utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

// Legacy ASCII codec: anything outside 7-bit ASCII becomes '?'
fn decode_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { '?' })
        .collect()
}

fn encode_ascii(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}
