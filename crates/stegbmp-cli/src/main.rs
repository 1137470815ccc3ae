use clap::Parser;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub(crate) type CliResult<T> = Result<T, stegbmp_core::StegbmpError>;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    let result = match args.command {
        Commands::Encode(cmd) => cmd.run(&args.magic),
        Commands::Decode(cmd) => cmd.run(&args.magic),
    };

    if let Err(err) = result {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
