//! Path-level entry points: open the files, plan capacity, run the
//! pipelines. The destination is written through a temp file in the
//! target directory and renamed only on full success, so an aborted
//! run never leaves a half-written output behind.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::bmp::BmpHeader;
use crate::capacity::check_capacity;
use crate::decoder::DecodeSession;
use crate::encoder::EncodeSession;
use crate::error::StegbmpError;
use crate::extension::Extension;
use crate::result::Result;

/// Default format signature stamped right after the copied header.
pub const DEFAULT_MAGIC: &str = "#*";

/// Hides `secret` inside `carrier` and writes the stego image to `output`.
pub fn encode(carrier: &Path, secret: &Path, output: &Path, magic: &str) -> Result<()> {
    let extension = Extension::from_path(secret)?;

    let mut carrier_file =
        File::open(carrier).map_err(|source| StegbmpError::ReadError { source })?;
    let header = BmpHeader::from_reader(&mut carrier_file)?;
    debug!(
        "carrier {} is {}x{}, capacity {} bytes",
        carrier.display(),
        header.width,
        header.height,
        header.capacity()
    );

    let mut payload = Vec::new();
    File::open(secret)
        .and_then(|mut f| f.read_to_end(&mut payload))
        .map_err(|source| StegbmpError::ReadError { source })?;

    if u32::try_from(payload.len()).is_err() {
        return Err(StegbmpError::PayloadTooLarge {
            len: payload.len() as u64,
            max: u64::from(u32::MAX),
        });
    }

    check_capacity(
        header.capacity(),
        magic.len(),
        extension.len(),
        payload.len() as u64,
    )?;

    // the session copies the header itself, so rewind to the first byte
    carrier_file
        .seek(SeekFrom::Start(0))
        .map_err(|source| StegbmpError::ReadError { source })?;

    let mut staged = named_temp_next_to(output)?;
    EncodeSession::new(
        BufReader::new(carrier_file),
        BufWriter::new(staged.as_file_mut()),
        magic,
        extension,
        payload,
    )
    .run()?;

    staged
        .persist(output)
        .map_err(|e| StegbmpError::WriteError { source: e.error })?;

    info!(
        "hid {} inside {} as {}",
        secret.display(),
        carrier.display(),
        output.display()
    );
    Ok(())
}

/// Recovers the hidden payload from `stego` into `output` and returns
/// the recovered extension.
pub fn decode(stego: &Path, output: &Path, magic: &str) -> Result<Extension> {
    let stego_file = File::open(stego).map_err(|source| StegbmpError::ReadError { source })?;

    let mut staged = named_temp_next_to(output)?;
    let extension = DecodeSession::new(
        BufReader::new(stego_file),
        BufWriter::new(staged.as_file_mut()),
        magic,
    )
    .run()?;

    staged
        .persist(output)
        .map_err(|e| StegbmpError::WriteError { source: e.error })?;

    info!(
        "recovered a {} payload from {} into {}",
        extension,
        stego.display(),
        output.display()
    );
    Ok(extension)
}

fn named_temp_next_to(output: &Path) -> Result<NamedTempFile> {
    let dir = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|source| StegbmpError::WriteError { source })
}
