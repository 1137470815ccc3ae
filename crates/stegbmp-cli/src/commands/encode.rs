use std::path::PathBuf;

use clap::Args;

use super::{ensure_bmp, ensure_supported_secret};
use crate::CliResult;

/// Hides a secret file inside a BMP carrier image
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Carrier bitmap, used readonly
    #[arg(value_name = "carrier.bmp")]
    pub carrier: PathBuf,

    /// File to hide inside the carrier
    #[arg(value_name = "secret-file")]
    pub secret: PathBuf,

    /// Where the stego image is written
    #[arg(value_name = "output.bmp", default_value = "stego.bmp")]
    pub output: PathBuf,
}

impl EncodeArgs {
    pub fn run(self, magic: &str) -> CliResult<()> {
        ensure_bmp(&self.carrier)?;
        ensure_bmp(&self.output)?;
        ensure_supported_secret(&self.secret)?;

        stegbmp_core::commands::encode(&self.carrier, &self.secret, &self.output, magic)?;

        println!(
            "INFO: encoding completed, stego image written to {}",
            self.output.display()
        );
        Ok(())
    }
}
