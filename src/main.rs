#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! object-retriever: retrieve configuration objects from remote terminals.

mod cli;
mod commands;
mod config;
mod helper;
mod logging;
mod retrieve;
mod types;

use std::process::ExitCode;

use clap::Parser;

use cli::{Cli, write_error};
use retrieve::RetrieveError;
use retrieve::errors::EXIT_STARTUP;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = cli.format();

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            write_error(&err, format);
            let code = err
                .downcast_ref::<RetrieveError>()
                .map_or(EXIT_STARTUP, RetrieveError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
