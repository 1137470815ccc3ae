use clap::{Parser, Subcommand};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Format signature stamped into the carrier right after the header
    #[arg(long, global = true, default_value = stegbmp_core::DEFAULT_MAGIC)]
    pub magic: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Decode(decode::DecodeArgs),
}
