//! questlog CLI
//!
//! Turns a game catalog CSV into one markdown document per game, using
//! metadata from IGDB.

mod cli_types;
mod commands;
mod error;
mod events;
mod logging;
mod spinner;

use std::process::ExitCode;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Generate(args) => commands::generate::run_generate(&cli.catalog, args, cli.quiet),
        Commands::Single { name, save, output } => {
            commands::single::run_single(&cli.catalog, &name, save, &output, cli.quiet)
        }
        Commands::Token { refresh } => commands::token::run_token(refresh, cli.quiet),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!(
                "{} {}",
                "\u{2718}".if_supports_color(Stderr, |t| t.red()),
                e,
            );
            if e.is_configuration() {
                commands::print_credential_help();
            }
            ExitCode::FAILURE
        }
    }
}
