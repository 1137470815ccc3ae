//! Minimal model of the 54 byte BMP header.
//!
//! Nothing here decodes pixels. The carrier is treated as a raw byte
//! stream: a fixed-size header followed by `width * height * 3` bytes
//! of 24 bit pixel data.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::StegbmpError;
use crate::result::Result;

/// length of the BMP header that is copied verbatim, never LSB-encoded
pub const HEADER_LEN: usize = 54;

/// byte offset of the little-endian u32 width field; height follows at 22
const WIDTH_OFFSET: usize = 18;

const BYTES_PER_PIXEL: u64 = 3;

/// The raw header of a carrier bitmap plus the two fields we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    pub raw: [u8; HEADER_LEN],
    pub width: u32,
    pub height: u32,
}

impl BmpHeader {
    /// Reads the leading 54 bytes from `input` and extracts the image
    /// dimensions. The reader is left positioned right at the first
    /// pixel byte.
    pub fn from_reader(input: &mut impl Read) -> Result<Self> {
        let mut raw = [0u8; HEADER_LEN];
        input
            .read_exact(&mut raw)
            .map_err(|source| StegbmpError::ReadError { source })?;

        let mut fields = &raw[WIDTH_OFFSET..];
        let width = fields.read_u32::<LittleEndian>()?;
        let height = fields.read_u32::<LittleEndian>()?;

        Ok(Self { raw, width, height })
    }

    /// Usable pixel bytes of the carrier, header excluded.
    pub fn capacity(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height) * BYTES_PER_PIXEL
    }
}
