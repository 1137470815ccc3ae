use std::path::PathBuf;

use clap::Args;

use super::ensure_bmp;
use crate::CliResult;

/// Recovers a hidden file from a stego BMP image
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Stego image that holds hidden data
    #[arg(value_name = "stego.bmp")]
    pub stego: PathBuf,

    /// Where the recovered payload is written
    #[arg(value_name = "output-file", default_value = "decoded.txt")]
    pub output: PathBuf,
}

impl DecodeArgs {
    pub fn run(self, magic: &str) -> CliResult<()> {
        ensure_bmp(&self.stego)?;

        let extension = stegbmp_core::commands::decode(&self.stego, &self.output, magic)?;

        println!(
            "INFO: decoding completed, recovered a {} payload into {}",
            extension,
            self.output.display()
        );
        Ok(())
    }
}
