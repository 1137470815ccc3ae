//! The encoder pipeline: writes a stego carrier by walking the source
//! carrier window by window with a single forward cursor.
//!
//! The pipeline is an explicit stage machine. [`EncodeSession::step`]
//! runs exactly one stage, so tests can pin down per-stage pre and post
//! conditions; [`EncodeSession::run`] drives it to completion.

use std::io::{self, Read, Write};

use crate::bmp::HEADER_LEN;
use crate::codec::{encode_byte, encode_size, BYTE_WINDOW, SIZE_WINDOW};
use crate::error::StegbmpError;
use crate::extension::Extension;
use crate::result::Result;

/// Stages of the encode pipeline, in the exact order the carrier is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeStage {
    /// copy the 54 header bytes verbatim, no LSB encoding
    CopyHeader,
    /// stamp the magic string, 8 carrier bytes per character
    Magic,
    /// hide the extension character count as a 32 bit field
    ExtensionLength,
    /// hide the extension characters
    Extension,
    /// hide the payload byte count as a 32 bit field
    PayloadLength,
    /// hide the payload bytes
    Payload,
    /// copy the unconsumed carrier tail verbatim until EOF
    CopyTail,
    Done,
}

impl EncodeStage {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::CopyHeader => "header copy",
            Self::Magic => "magic string",
            Self::ExtensionLength => "extension length",
            Self::Extension => "extension",
            Self::PayloadLength => "payload length",
            Self::Payload => "payload",
            Self::CopyTail => "tail copy",
            Self::Done => "done",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::CopyHeader => Self::Magic,
            Self::Magic => Self::ExtensionLength,
            Self::ExtensionLength => Self::Extension,
            Self::Extension => Self::PayloadLength,
            Self::PayloadLength => Self::Payload,
            Self::Payload => Self::CopyTail,
            Self::CopyTail | Self::Done => Self::Done,
        }
    }
}

/// One encoding run: owns the source carrier reader, the destination
/// writer, the magic, the validated extension and the fully loaded
/// payload for the duration of the run.
pub struct EncodeSession<R, W> {
    source: R,
    dest: W,
    magic: Vec<u8>,
    extension: Extension,
    payload: Vec<u8>,
    stage: EncodeStage,
}

impl<R: Read, W: Write> EncodeSession<R, W> {
    /// `source` must be positioned at the very first carrier byte.
    pub fn new(source: R, dest: W, magic: &str, extension: Extension, payload: Vec<u8>) -> Self {
        Self {
            source,
            dest,
            magic: magic.as_bytes().to_vec(),
            extension,
            payload,
            stage: EncodeStage::CopyHeader,
        }
    }

    pub fn stage(&self) -> EncodeStage {
        self.stage
    }

    /// The destination written so far, for inspecting partial progress.
    pub fn dest(&self) -> &W {
        &self.dest
    }

    /// Executes the current stage and returns the stage that follows.
    /// Calling it on a finished session is a no-op.
    pub fn step(&mut self) -> Result<EncodeStage> {
        let stage = self.stage;
        match stage {
            EncodeStage::CopyHeader => {
                let mut header = [0u8; HEADER_LEN];
                read_window(&mut self.source, &mut header, stage)?;
                write_out(&mut self.dest, &header)?;
            }
            EncodeStage::Magic => {
                hide_bytes(&mut self.source, &mut self.dest, &self.magic, stage)?;
            }
            EncodeStage::ExtensionLength => {
                hide_length(
                    &mut self.source,
                    &mut self.dest,
                    self.extension.len() as u32,
                    stage,
                )?;
            }
            EncodeStage::Extension => {
                hide_bytes(
                    &mut self.source,
                    &mut self.dest,
                    self.extension.as_bytes(),
                    stage,
                )?;
            }
            EncodeStage::PayloadLength => {
                hide_length(
                    &mut self.source,
                    &mut self.dest,
                    self.payload.len() as u32,
                    stage,
                )?;
            }
            EncodeStage::Payload => {
                hide_bytes(&mut self.source, &mut self.dest, &self.payload, stage)?;
            }
            EncodeStage::CopyTail => {
                io::copy(&mut self.source, &mut self.dest)?;
            }
            EncodeStage::Done => {}
        }

        self.stage = stage.next();
        Ok(self.stage)
    }

    /// Runs all remaining stages and flushes the destination.
    pub fn run(mut self) -> Result<()> {
        while self.stage != EncodeStage::Done {
            self.step()?;
        }
        self.dest
            .flush()
            .map_err(|source| StegbmpError::WriteError { source })
    }
}

fn hide_bytes(
    source: &mut impl Read,
    dest: &mut impl Write,
    data: &[u8],
    stage: EncodeStage,
) -> Result<()> {
    let mut window = [0u8; BYTE_WINDOW];
    for &byte in data {
        read_window(source, &mut window, stage)?;
        encode_byte(byte, &mut window);
        write_out(dest, &window)?;
    }
    Ok(())
}

fn hide_length(
    source: &mut impl Read,
    dest: &mut impl Write,
    value: u32,
    stage: EncodeStage,
) -> Result<()> {
    let mut window = [0u8; SIZE_WINDOW];
    read_window(source, &mut window, stage)?;
    encode_size(value, &mut window);
    write_out(dest, &window)
}

fn read_window(source: &mut impl Read, window: &mut [u8], stage: EncodeStage) -> Result<()> {
    source.read_exact(window).map_err(|source| {
        if source.kind() == io::ErrorKind::UnexpectedEof {
            StegbmpError::ShortRead {
                stage: stage.name(),
            }
        } else {
            StegbmpError::ReadError { source }
        }
    })
}

fn write_out(dest: &mut impl Write, window: &[u8]) -> Result<()> {
    dest.write_all(window)
        .map_err(|source| StegbmpError::WriteError { source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{decode_byte, decode_size};
    use std::io::Cursor;

    fn carrier(pixel_bytes: usize) -> Vec<u8> {
        let mut c = vec![0u8; HEADER_LEN + pixel_bytes];
        c[0] = b'B';
        c[1] = b'M';
        c
    }

    fn session<'a>(
        source: &'a [u8],
        dest: &'a mut Vec<u8>,
        payload: &[u8],
    ) -> EncodeSession<Cursor<&'a [u8]>, &'a mut Vec<u8>> {
        EncodeSession::new(
            Cursor::new(source),
            dest,
            "#*",
            Extension::new(".txt").unwrap(),
            payload.to_vec(),
        )
    }

    #[test]
    fn stages_advance_one_at_a_time() {
        let source = carrier(4096);
        let mut dest = Vec::new();
        let mut s = session(&source, &mut dest, b"hi");

        assert_eq!(s.stage(), EncodeStage::CopyHeader);
        assert_eq!(s.step().unwrap(), EncodeStage::Magic);
        assert_eq!(s.step().unwrap(), EncodeStage::ExtensionLength);
        assert_eq!(s.step().unwrap(), EncodeStage::Extension);
        assert_eq!(s.step().unwrap(), EncodeStage::PayloadLength);
        assert_eq!(s.step().unwrap(), EncodeStage::Payload);
        assert_eq!(s.step().unwrap(), EncodeStage::CopyTail);
        assert_eq!(s.step().unwrap(), EncodeStage::Done);
        assert_eq!(s.step().unwrap(), EncodeStage::Done, "Done must be sticky");
    }

    #[test]
    fn header_is_copied_verbatim() {
        let mut source = carrier(4096);
        source[2..6].copy_from_slice(&0xCAFE_BABEu32.to_le_bytes());
        let mut dest = Vec::new();

        let mut s = session(&source, &mut dest, b"hi");
        s.step().unwrap();

        assert_eq!(&dest[..], &source[..HEADER_LEN]);
    }

    #[test]
    fn each_stage_consumes_its_exact_window() {
        let source = carrier(4096);
        let mut s = EncodeSession::new(
            Cursor::new(&source[..]),
            Vec::new(),
            "#*",
            Extension::new(".txt").unwrap(),
            b"hi".to_vec(),
        );

        s.step().unwrap(); // header
        assert_eq!(s.dest().len(), 54);
        s.step().unwrap(); // magic, 2 chars
        assert_eq!(s.dest().len(), 54 + 16);
        s.step().unwrap(); // extension length
        assert_eq!(s.dest().len(), 54 + 16 + 32);
        s.step().unwrap(); // extension, 4 chars
        assert_eq!(s.dest().len(), 54 + 16 + 32 + 32);
        s.step().unwrap(); // payload length
        assert_eq!(s.dest().len(), 54 + 16 + 32 + 32 + 32);
        s.step().unwrap(); // payload, 2 bytes
        assert_eq!(s.dest().len(), 54 + 16 + 32 + 32 + 32 + 16);
    }

    #[test]
    fn layout_fields_decode_back() {
        let source = carrier(4096);
        let mut dest = Vec::new();
        session(&source, &mut dest, b"ok").run().unwrap();

        let mut at = HEADER_LEN;
        assert_eq!(decode_byte(&dest[at..at + 8]), b'#');
        at += 8;
        assert_eq!(decode_byte(&dest[at..at + 8]), b'*');
        at += 8;
        assert_eq!(decode_size(&dest[at..at + 32]), 4, "extension length");
        at += 32;
        for expected in b".txt" {
            assert_eq!(decode_byte(&dest[at..at + 8]), *expected);
            at += 8;
        }
        assert_eq!(decode_size(&dest[at..at + 32]), 2, "payload length");
        at += 32;
        assert_eq!(decode_byte(&dest[at..at + 8]), b'o');
        assert_eq!(decode_byte(&dest[at + 8..at + 16]), b'k');
    }

    #[test]
    fn tail_is_copied_to_the_end() {
        let mut source = carrier(4096);
        let last = source.len() - 1;
        source[last] = 0x7E;
        let mut dest = Vec::new();

        session(&source, &mut dest, b"hi").run().unwrap();

        assert_eq!(dest.len(), source.len());
        assert_eq!(dest[last], 0x7E);
    }

    #[test]
    fn short_source_fails_in_the_payload_stage() {
        // room for header, magic, both length fields and the extension,
        // but only one of the two payload windows
        let source = carrier(16 + 32 + 32 + 32 + 8);
        let mut dest = Vec::new();

        let result = session(&source, &mut dest, b"hi").run();

        match result {
            Err(StegbmpError::ShortRead { stage }) => assert_eq!(stage, "payload"),
            other => panic!("expected ShortRead, got {other:?}"),
        }
    }

    #[test]
    fn source_without_full_header_fails_in_the_header_stage() {
        let source = vec![0u8; HEADER_LEN - 10];
        let mut dest = Vec::new();

        let result = session(&source, &mut dest, b"hi").run();

        match result {
            Err(StegbmpError::ShortRead { stage }) => assert_eq!(stage, "header copy"),
            other => panic!("expected ShortRead, got {other:?}"),
        }
    }
}
