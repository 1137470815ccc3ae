//! The decoder pipeline: recovers the hidden payload from a stego
//! carrier, read-only, with a single forward cursor.
//!
//! Mirror of the encoder's stage machine. Payload bytes stream straight
//! to the output writer; only the small metadata fields are buffered.

use std::io::{self, Read, Write};

use crate::bmp::HEADER_LEN;
use crate::codec::{decode_byte, decode_size, BYTE_WINDOW, SIZE_WINDOW};
use crate::error::StegbmpError;
use crate::extension::{Extension, MAX_EXTENSION_LEN};
use crate::result::Result;

/// Stages of the decode pipeline, in the exact order the carrier is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// skip the 54 header bytes, they carry no hidden data
    SkipHeader,
    /// decode and verify the magic string
    Magic,
    /// decode the extension character count
    ExtensionLength,
    /// decode the extension characters
    Extension,
    /// decode the payload byte count
    PayloadLength,
    /// decode the payload and stream it to the output
    Payload,
    Done,
}

impl DecodeStage {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::SkipHeader => "header skip",
            Self::Magic => "magic string",
            Self::ExtensionLength => "extension length",
            Self::Extension => "extension",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
            Self::Done => "done",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::SkipHeader => Self::Magic,
            Self::Magic => Self::ExtensionLength,
            Self::ExtensionLength => Self::Extension,
            Self::Extension => Self::PayloadLength,
            Self::PayloadLength => Self::Payload,
            Self::Payload | Self::Done => Self::Done,
        }
    }
}

/// One decoding run: owns the stego carrier reader and the output
/// writer, and collects the decoded metadata field by field.
pub struct DecodeSession<R, W> {
    carrier: R,
    output: W,
    magic: Vec<u8>,
    extension_len: u32,
    extension: Option<Extension>,
    payload_len: u32,
    stage: DecodeStage,
}

impl<R: Read, W: Write> DecodeSession<R, W> {
    /// `carrier` must be positioned at the very first carrier byte.
    pub fn new(carrier: R, output: W, magic: &str) -> Self {
        Self {
            carrier,
            output,
            magic: magic.as_bytes().to_vec(),
            extension_len: 0,
            extension: None,
            payload_len: 0,
            stage: DecodeStage::SkipHeader,
        }
    }

    pub fn stage(&self) -> DecodeStage {
        self.stage
    }

    /// The extension decoded so far, available once the Extension stage ran.
    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    /// The payload length decoded so far, available once the PayloadLength stage ran.
    pub fn payload_len(&self) -> u32 {
        self.payload_len
    }

    /// Executes the current stage and returns the stage that follows.
    /// Calling it on a finished session is a no-op.
    pub fn step(&mut self) -> Result<DecodeStage> {
        let stage = self.stage;
        match stage {
            DecodeStage::SkipHeader => {
                let mut header = [0u8; HEADER_LEN];
                read_window(&mut self.carrier, &mut header, stage)?;
            }
            DecodeStage::Magic => {
                let decoded = unveil_bytes(&mut self.carrier, self.magic.len(), stage)?;
                if decoded != self.magic {
                    return Err(StegbmpError::MagicMismatch);
                }
            }
            DecodeStage::ExtensionLength => {
                let len = unveil_length(&mut self.carrier, stage)?;
                if len as usize > MAX_EXTENSION_LEN {
                    return Err(StegbmpError::ExtensionTooLong {
                        len: len as usize,
                        max: MAX_EXTENSION_LEN,
                    });
                }
                self.extension_len = len;
            }
            DecodeStage::Extension => {
                let decoded = unveil_bytes(&mut self.carrier, self.extension_len as usize, stage)?;
                self.extension = Some(Extension::from_decoded(&decoded)?);
            }
            DecodeStage::PayloadLength => {
                self.payload_len = unveil_length(&mut self.carrier, stage)?;
            }
            DecodeStage::Payload => {
                let mut window = [0u8; BYTE_WINDOW];
                for _ in 0..self.payload_len {
                    read_window(&mut self.carrier, &mut window, stage)?;
                    let byte = decode_byte(&window);
                    self.output
                        .write_all(&[byte])
                        .map_err(|source| StegbmpError::WriteError { source })?;
                }
            }
            DecodeStage::Done => {}
        }

        self.stage = stage.next();
        Ok(self.stage)
    }

    /// Runs all remaining stages, flushes the output and hands back the
    /// recovered extension.
    pub fn run(mut self) -> Result<Extension> {
        while self.stage != DecodeStage::Done {
            self.step()?;
        }
        self.output
            .flush()
            .map_err(|source| StegbmpError::WriteError { source })?;

        Ok(self
            .extension
            .expect("extension is decoded before the pipeline can reach Done"))
    }
}

fn unveil_bytes(carrier: &mut impl Read, count: usize, stage: DecodeStage) -> Result<Vec<u8>> {
    let mut window = [0u8; BYTE_WINDOW];
    let mut decoded = Vec::with_capacity(count);
    for _ in 0..count {
        read_window(carrier, &mut window, stage)?;
        decoded.push(decode_byte(&window));
    }
    Ok(decoded)
}

fn unveil_length(carrier: &mut impl Read, stage: DecodeStage) -> Result<u32> {
    let mut window = [0u8; SIZE_WINDOW];
    read_window(carrier, &mut window, stage)?;
    Ok(decode_size(&window))
}

fn read_window(carrier: &mut impl Read, window: &mut [u8], stage: DecodeStage) -> Result<()> {
    carrier.read_exact(window).map_err(|source| {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            StegbmpError::ShortRead {
                stage: stage.name(),
            }
        } else {
            StegbmpError::ReadError { source }
        }
    })
}
