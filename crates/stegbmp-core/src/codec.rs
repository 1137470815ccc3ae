//! The bit codec: maps payload bytes onto the least significant bits of
//! carrier bytes and back.
//!
//! One payload bit occupies one carrier byte. Bit order is LSB-first:
//! bit `i` of the value lands in the LSB of `window[i]`. Encode and
//! decode share that convention through `bitstream_io::LittleEndian`,
//! so the two directions cannot drift apart.

use std::io::Cursor;

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};

/// carrier bytes consumed per hidden payload byte
pub const BYTE_WINDOW: usize = 8;

/// carrier bytes consumed per hidden 32 bit length field
pub const SIZE_WINDOW: usize = 32;

/// Hides `value` in the LSBs of the first 8 bytes of `window`.
/// All other bits of the carrier bytes stay untouched.
pub fn encode_byte(value: u8, window: &mut [u8]) {
    spread_bits(&[value], window);
}

/// Reconstructs the byte hidden in the LSBs of the first 8 bytes of `window`.
/// Exact inverse of [`encode_byte`].
pub fn decode_byte(window: &[u8]) -> u8 {
    let mut value = [0u8; 1];
    collect_bits(window, &mut value);
    value[0]
}

/// Hides a 32 bit length field in the LSBs of the first 32 bytes of `window`.
pub fn encode_size(value: u32, window: &mut [u8]) {
    spread_bits(&value.to_le_bytes(), window);
}

/// Reconstructs a 32 bit length field from the LSBs of the first 32 bytes of `window`.
/// Exact inverse of [`encode_size`].
pub fn decode_size(window: &[u8]) -> u32 {
    let mut value = [0u8; 4];
    collect_bits(window, &mut value);
    u32::from_le_bytes(value)
}

fn spread_bits(value: &[u8], window: &mut [u8]) {
    debug_assert!(window.len() >= value.len() * 8);

    let mut bits = BitReader::endian(Cursor::new(value), LittleEndian);
    for carrier in window.iter_mut().take(value.len() * 8) {
        let bit = bits
            .read_bit()
            .expect("in-memory bit source never runs dry within the window");
        *carrier = (*carrier & 0xFE) | u8::from(bit);
    }
}

fn collect_bits(window: &[u8], value: &mut [u8]) {
    debug_assert!(window.len() >= value.len() * 8);

    let bit_count = value.len() * 8;
    let mut bits = BitWriter::endian(Cursor::new(&mut value[..]), LittleEndian);
    for carrier in window.iter().take(bit_count) {
        bits.write_bit(carrier & 0x01 == 0x01)
            .expect("in-memory bit sink never overflows within the window");
    }
}
