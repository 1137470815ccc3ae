//! # stegbmp core
//!
//! Hides an arbitrary secret file inside the pixel data of an
//! uncompressed 24 bit BMP image via least-significant-bit substitution
//! and recovers it later.
//!
//! The carrier is treated as a raw byte stream: the 54 byte header is
//! copied verbatim, then each hidden byte claims the LSBs of 8 carrier
//! bytes and each 32 bit length field the LSBs of 32 carrier bytes.
//! The layout after the header is: magic string, extension length,
//! extension, payload length, payload, untouched carrier tail.
//!
//! # Usage Examples
//!
//! ## Hide data in a carrier and recover it
//!
//! ```rust
//! use std::io::Cursor;
//! use stegbmp_core::decoder::DecodeSession;
//! use stegbmp_core::encoder::EncodeSession;
//! use stegbmp_core::extension::Extension;
//!
//! // a 20x20 24 bit carrier: 54 header bytes + 1200 pixel bytes
//! let mut carrier = vec![0u8; 54 + 20 * 20 * 3];
//! carrier[0] = b'B';
//! carrier[1] = b'M';
//! carrier[18..22].copy_from_slice(&20u32.to_le_bytes());
//! carrier[22..26].copy_from_slice(&20u32.to_le_bytes());
//!
//! let mut stego = Vec::new();
//! EncodeSession::new(
//!     Cursor::new(&carrier[..]),
//!     &mut stego,
//!     "#*",
//!     Extension::new(".txt")?,
//!     b"attack at dawn".to_vec(),
//! )
//! .run()?;
//!
//! let mut recovered = Vec::new();
//! let extension = DecodeSession::new(Cursor::new(&stego[..]), &mut recovered, "#*").run()?;
//!
//! assert_eq!(recovered, b"attack at dawn");
//! assert_eq!(extension.as_str(), ".txt");
//! # Ok::<(), stegbmp_core::StegbmpError>(())
//! ```
//!
//! ## Work on files
//!
//! [`commands::encode`] and [`commands::decode`] do the same against
//! paths, including the capacity check and an atomic rename of the
//! output file.

#![warn(clippy::redundant_else)]

pub mod bmp;
pub mod capacity;
pub mod codec;
pub mod commands;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod extension;
pub mod result;

pub use crate::commands::DEFAULT_MAGIC;
pub use crate::error::StegbmpError;
pub use crate::extension::Extension;
pub use crate::result::Result;
