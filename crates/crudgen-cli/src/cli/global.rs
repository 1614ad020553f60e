//! Flags shared by every subcommand, flattened into [`super::Cli`].

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// `-v` logs catalog loading and the session summary, `-vv` every
    /// accepted entry, `-vvv` everything.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "More log output on stderr (-v, -vv, -vvv)"
    )]
    pub verbose: u8,

    /// Only generated content and errors are printed.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print generated content and errors only"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(long = "no-color", global = true, env = "NO_COLOR", help = "Disable colored output")]
    pub no_color: bool,

    /// Replaces the platform config file and `.crudgen.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read configuration from FILE"
    )]
    pub config: Option<PathBuf>,

    /// `auto` follows `output.format` from the config, then the terminal.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Log level for crudgen's own crates; `--quiet` wins over `-v`.
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    /// Whether error output should include the source chain.
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` otherwise.
    #[default]
    Auto,
    /// Headers, colours, dimmed signatures.
    Human,
    /// The same layout without ANSI codes.
    Plain,
    /// One pretty-printed JSON document on stdout.
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn levels_follow_the_verbose_count() {
        let levels: Vec<LevelFilter> = (0..=4).map(|v| args(v, false).log_level()).collect();
        assert_eq!(
            levels,
            [
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::TRACE,
                LevelFilter::TRACE
            ]
        );
    }

    #[test]
    fn quiet_only_logs_errors() {
        assert_eq!(args(0, true).log_level(), LevelFilter::ERROR);
        assert_eq!(args(2, true).log_level(), LevelFilter::ERROR);
        assert!(!args(0, true).is_verbose());
    }
}
