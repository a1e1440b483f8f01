//! cinedump-cli: argument parsing and command execution for the `cinedump`
//! binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::run;
