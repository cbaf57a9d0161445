//! Fixed-offset field extraction from packet bytes.
use crate::prelude::*;

/// Byte order of a multi-byte field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

fn window(buf: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
    match offset.checked_add(width) {
        Some(end) if end <= buf.len() => Ok(&buf[offset..end]),
        _ => Err(Error::OutOfRange {
            offset,
            width,
            len: buf.len(),
        }),
    }
}

/// Read a `width` byte integer starting at `offset`.
///
/// Signed values are sign-extended from their most significant bit, so a 2 byte
/// signed read of `[0xff, 0xff]` produces -1 rather than 65535.
///
/// # Errors
/// [Error::UnsupportedWidth] if `width` is not 1 through 8 or an unsigned 8 byte value
/// does not fit in an `i64`, [Error::OutOfRange] if the field extends past the end
/// of `buf`.
pub fn read_int(
    buf: &[u8],
    offset: usize,
    width: usize,
    order: ByteOrder,
    signed: bool,
) -> Result<i64> {
    if !(1..=8).contains(&width) {
        return Err(Error::UnsupportedWidth(width));
    }
    let bytes = window(buf, offset, width)?;

    let mut raw = [0u8; 8];
    match order {
        ByteOrder::Little => raw[..width].copy_from_slice(bytes),
        ByteOrder::Big => {
            for (dst, src) in raw[..width].iter_mut().zip(bytes.iter().rev()) {
                *dst = *src;
            }
        }
    }
    let value = u64::from_le_bytes(raw);

    let bits = width as u32 * 8;
    if signed {
        let shift = 64 - bits;
        Ok(((value << shift) as i64) >> shift)
    } else {
        i64::try_from(value).map_err(|_| Error::UnsupportedWidth(width))
    }
}

// The typed readers below only narrow values that already fit their type.

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    Ok(read_int(buf, offset, 1, ByteOrder::Little, false)? as u8)
}

pub fn read_i16(buf: &[u8], offset: usize) -> Result<i16> {
    Ok(read_int(buf, offset, 2, ByteOrder::Little, true)? as i16)
}

pub fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    Ok(read_int(buf, offset, 2, ByteOrder::Little, false)? as u16)
}

pub fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    Ok(read_int(buf, offset, 4, ByteOrder::Little, true)? as i32)
}

pub fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    Ok(read_int(buf, offset, 4, ByteOrder::Little, false)? as u32)
}

/// Read a little-endian IEEE-754 single precision float.
///
/// # Errors
/// [Error::OutOfRange] if fewer than 4 bytes are available at `offset`.
pub fn read_f32(buf: &[u8], offset: usize) -> Result<f32> {
    let bytes = window(buf, offset, 4)?;
    Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}
