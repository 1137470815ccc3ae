//! Bounded secret file extension, leading dot included.

use std::fmt;
use std::path::Path;

use crate::error::StegbmpError;
use crate::result::Result;

/// Longest accepted extension including the leading dot. The classic
/// tool stored extensions in a 10 byte buffer with a terminator, so
/// anything longer never round-tripped; here it is rejected up front.
pub const MAX_EXTENSION_LEN: usize = 9;

/// A validated secret file extension such as `".txt"`.
///
/// Always starts with a dot, is plain ASCII and never exceeds
/// [`MAX_EXTENSION_LEN`] bytes, which keeps the encoded length field
/// honest on both sides of the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension(String);

impl Extension {
    pub fn new(ext: &str) -> Result<Self> {
        if !ext.starts_with('.') || ext.len() < 2 || !ext.is_ascii() {
            return Err(StegbmpError::InvalidExtension(ext.to_owned()));
        }
        if ext.len() > MAX_EXTENSION_LEN {
            return Err(StegbmpError::ExtensionTooLong {
                len: ext.len(),
                max: MAX_EXTENSION_LEN,
            });
        }

        Ok(Self(ext.to_owned()))
    }

    /// Derives the extension from a secret file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| StegbmpError::InvalidExtension(path.display().to_string()))?;

        Self::new(&format!(".{ext}"))
    }

    /// Rebuilds an extension from bytes recovered out of a carrier.
    pub fn from_decoded(bytes: &[u8]) -> Result<Self> {
        let ext = std::str::from_utf8(bytes)
            .map_err(|_| StegbmpError::InvalidExtension(String::from_utf8_lossy(bytes).into()))?;

        Self::new(ext)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Character count including the leading dot.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_accept_common_extensions() {
        for ext in [".txt", ".c", ".h", ".sh", ".markdown"] {
            let e = Extension::new(ext).unwrap();
            assert_eq!(e.as_str(), ext);
            assert_eq!(e.len(), ext.len());
        }
    }

    #[test]
    fn should_reject_a_missing_dot() {
        assert!(matches!(
            Extension::new("txt"),
            Err(StegbmpError::InvalidExtension(_))
        ));
    }

    #[test]
    fn should_reject_a_bare_dot() {
        assert!(matches!(
            Extension::new("."),
            Err(StegbmpError::InvalidExtension(_))
        ));
    }

    #[test]
    fn should_reject_an_oversized_extension() {
        let result = Extension::new(".markdownx");
        assert!(matches!(
            result,
            Err(StegbmpError::ExtensionTooLong { len: 10, max: 9 })
        ));
    }

    #[test]
    fn boundary_length_is_still_accepted() {
        assert!(Extension::new(".12345678").is_ok());
    }

    #[test]
    fn should_derive_from_a_path() {
        let e = Extension::from_path(Path::new("/tmp/secret.txt")).unwrap();
        assert_eq!(e.as_str(), ".txt");
    }

    #[test]
    fn should_reject_a_path_without_extension() {
        assert!(Extension::from_path(Path::new("/tmp/secret")).is_err());
    }

    #[test]
    fn should_reject_non_utf8_decoded_bytes() {
        assert!(matches!(
            Extension::from_decoded(&[b'.', 0xff, 0xfe]),
            Err(StegbmpError::InvalidExtension(_))
        ));
    }
}
