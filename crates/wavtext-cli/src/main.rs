//! wavtext CLI - Inspect PCM WAV files and export their samples as text

use clap::Parser;
use std::process::ExitCode;

use wavtext_cli::commands;
use wavtext_cli::commands::export::ExportOverrides;
use wavtext_cli::logging;

mod cli_args;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Info { input, hash, json } => commands::info::run(&input, hash, json),
        Commands::Chunks { input, json } => commands::chunks::run(&input, json),
        Commands::Export {
            input,
            output,
            config,
            separator,
            line_ending,
            header,
            eight_bit,
        } => {
            let overrides = ExportOverrides {
                separator,
                line_ending,
                channel_header: header,
                eight_bit,
            };
            commands::export::run(&input, output.as_deref(), config.as_deref(), &overrides)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
