use thiserror::Error;

#[derive(Error, Debug)]
pub enum StegbmpError {
    /// Represents a secret file whose type is not on the accepted list
    #[error("Unsupported secret file type: {0}")]
    UnsupportedSecretExtension(String),

    /// Represents a path that does not look like a bitmap file at all
    #[error("Not a bitmap file: {0}")]
    NotABitmap(String),

    /// Represents a malformed secret file extension, for example one without a leading dot
    #[error("Invalid secret file extension: {0}")]
    InvalidExtension(String),

    /// Represents an extension that does not fit the bounded extension field
    #[error("Secret file extension is {len} bytes long, the maximum is {max}")]
    ExtensionTooLong { len: usize, max: usize },

    /// Represents a payload larger than the 32 bit length field can describe
    #[error("Secret file is {len} bytes long, the maximum supported payload is {max} bytes")]
    PayloadTooLarge { len: u64, max: u64 },

    /// Represents a carrier too small for the data it should hide
    #[error("Capacity error: the carrier holds {capacity} usable bytes but {required} are required")]
    CapacityError { capacity: u64, required: u64 },

    /// Represents a carrier that ended before a pipeline stage got its full window
    #[error("Carrier ended early during the {stage} stage")]
    ShortRead { stage: &'static str },

    /// Represents a decoded signature that does not match the expected magic string
    #[error("Magic string mismatch: not a valid stego carrier or wrong format")]
    MagicMismatch,

    /// Represents a failure to read from input.
    #[error("Read error")]
    ReadError { source: std::io::Error },

    /// Represents a failure to write the target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}
