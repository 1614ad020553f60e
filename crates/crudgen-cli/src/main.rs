//! `crudgen`: turns one-line field declarations into Laravel resource
//! fragments (migration, rules, factory, model and view snippets).
//!
//! Exit codes: `0` success, `1` internal or I/O failure, `2` bad input,
//! `3` unknown kind or artifact, `4` configuration problem.

use std::{io::IsTerminal as _, process::ExitCode};

use clap::Parser;
use tracing::{debug, instrument};

use crate::{
    cli::{Cli, Commands},
    config::AppConfig,
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Optional: `.env` may carry CRUDGEN_* settings.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // also the path for --help and --version, which exit 0
            let _ = e.print();
            return ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2));
        }
    };

    if let Err(e) = init_logging(&cli.global) {
        eprintln!("crudgen: {e:#}");
        return ExitCode::from(1);
    }

    let verbose = cli.global.is_verbose();
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            let err = CliError::Config {
                message: format!("{e:#}"),
                source: None,
            };
            return report(err, verbose, !cli.global.no_color);
        }
    };
    debug!(?config, "configuration loaded");

    let output = OutputManager::new(&cli.global, &config);
    let colored = output.supports_color();

    match dispatch(cli.command, config, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report(err, verbose, colored),
    }
}

#[instrument(skip_all)]
fn dispatch(command: Commands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, config, output),
        Commands::Interactive(args) => commands::interactive::execute(args, config, output),
        Commands::Kinds(args) => commands::kinds::execute(args, config, output),
        Commands::Check(args) => commands::check::execute(args, config, output),
        Commands::Init(args) => commands::init::execute(args, output),
        Commands::Completions(args) => commands::completions::execute(args),
        Commands::Config(cmd) => commands::config::execute(cmd, config, output),
    }
}

/// Log the error, print it to stderr and pick the exit code.
fn report(err: CliError, verbose: bool, colored: bool) -> ExitCode {
    err.log();
    let colored = colored && std::io::stderr().is_terminal();
    eprint!("{}", err.render(verbose, colored));
    ExitCode::from(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn version_and_author_come_from_cargo() {
        let cmd = Cli::command();
        assert_eq!(cmd.get_version(), Some(env!("CARGO_PKG_VERSION")));
        assert!(cmd.get_author().is_some());
    }

    #[test]
    fn every_command_is_dispatched() {
        let names: Vec<String> = Cli::command()
            .get_subcommands()
            .map(|c| c.get_name().to_string())
            .collect();
        for expected in ["generate", "interactive", "kinds", "check", "init", "completions", "config"] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }
}
