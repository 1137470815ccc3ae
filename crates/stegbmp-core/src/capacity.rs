//! The capacity planner: decides whether a secret fits into a carrier
//! before the first destination byte is written.

use crate::bmp::HEADER_LEN;
use crate::codec::{BYTE_WINDOW, SIZE_WINDOW};
use crate::error::StegbmpError;
use crate::result::Result;

/// Carrier bytes needed to hold the whole stego layout: verbatim
/// header, magic string, extension length field, extension, payload
/// length field and the payload itself.
pub fn required_bytes(magic_len: usize, extension_len: usize, secret_len: u64) -> u64 {
    HEADER_LEN as u64
        + (magic_len * BYTE_WINDOW) as u64
        + SIZE_WINDOW as u64
        + (extension_len * BYTE_WINDOW) as u64
        + SIZE_WINDOW as u64
        + secret_len * BYTE_WINDOW as u64
}

/// The carrier must hold strictly more than the required bytes. An
/// exact fit is rejected, matching the original tool.
pub fn check_capacity(
    capacity: u64,
    magic_len: usize,
    extension_len: usize,
    secret_len: u64,
) -> Result<()> {
    let required = required_bytes(magic_len, extension_len, secret_len);
    if capacity > required {
        Ok(())
    } else {
        Err(StegbmpError::CapacityError { capacity, required })
    }
}
