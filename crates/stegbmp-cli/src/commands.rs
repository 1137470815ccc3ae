pub mod decode;
pub mod encode;

use std::path::Path;

use stegbmp_core::StegbmpError;

use crate::CliResult;

/// Secret file types the tool accepts for hiding.
const SUPPORTED_SECRET_EXTENSIONS: [&str; 4] = ["txt", "c", "h", "sh"];

fn ensure_bmp(path: &Path) -> CliResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("bmp") => Ok(()),
        _ => Err(StegbmpError::NotABitmap(path.display().to_string())),
    }
}

fn ensure_supported_secret(path: &Path) -> CliResult<()> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext)
            if SUPPORTED_SECRET_EXTENSIONS
                .iter()
                .any(|s| ext.eq_ignore_ascii_case(s)) =>
        {
            Ok(())
        }
        _ => Err(StegbmpError::UnsupportedSecretExtension(
            path.display().to_string(),
        )),
    }
}
