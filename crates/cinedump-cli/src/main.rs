use std::process::ExitCode;

use clap::Parser;

use cinedump_cli::{run, Cli};
use cinedump_core::errors::CinedumpErrorCode;
use cinedump_core::tracing::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(cli, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}
