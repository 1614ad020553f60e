//! Where and how command results are printed.
//!
//! Generated artifacts and JSON go to stdout and survive `--quiet`. Status
//! lines (`✓`, `ℹ`, headers) go to stdout and are silenced by `--quiet`.
//! Warnings and errors go to stderr.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::{AnsiColors, OwoColorize};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Leading glyph of a status line and its colour.
#[derive(Debug, Clone, Copy)]
enum Mark {
    Success,
    Info,
    Warning,
    Error,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Self::Success => "\u{2713}",
            Self::Info => "\u{2139}",
            Self::Warning => "\u{26a0}",
            Self::Error => "\u{2717}",
        }
    }

    fn color(self) -> AnsiColors {
        match self {
            Self::Success => AnsiColors::Green,
            Self::Info => AnsiColors::Blue,
            Self::Warning => AnsiColors::Yellow,
            Self::Error => AnsiColors::Red,
        }
    }

    /// Errors are printed even under `--quiet`.
    fn always_shown(self) -> bool {
        matches!(self, Self::Error)
    }

    fn on_stderr(self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`; `auto` becomes `human`
    /// on a terminal and `plain` when piped. Only `human` is coloured.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };
        let format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            no_color: args.no_color || config.output.no_color || format != OutputFormat::Human,
            format,
            quiet: args.quiet,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    // ── Results ───────────────────────────────────────────────────────────

    /// Generated text.
    pub fn content(&self, body: &str) -> io::Result<()> {
        self.stdout.write_line(body)
    }

    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.stdout.write_line(&rendered)
    }

    // ── Status lines ──────────────────────────────────────────────────────

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.stdout.write_line(msg)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.stdout.write_line(text)
        } else {
            self.stdout.write_line(&text.cyan().bold().to_string())
        }
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Success, msg)
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Info, msg)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Warning, msg)
    }

    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.marked(Mark::Error, msg)
    }

    fn marked(&self, mark: Mark, msg: &str) -> io::Result<()> {
        if self.quiet && !mark.always_shown() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{} {msg}", mark.glyph())
        } else {
            format!(
                "{} {}",
                mark.glyph().color(mark.color()).bold(),
                msg.color(mark.color())
            )
        };
        let term = if mark.on_stderr() { &self.stderr } else { &self.stdout };
        term.write_line(&line)
    }

    /// Secondary text, e.g. a kind's signature next to its name.
    pub fn dim(&self, text: &str) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            text.dimmed().to_string()
        }
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(config: &AppConfig, quiet: bool, no_color: bool, format: OutputFormat) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn only_human_output_is_coloured() {
        let config = AppConfig::default();
        assert!(manager(&config, false, false, OutputFormat::Human).supports_color());
        assert!(!manager(&config, false, true, OutputFormat::Human).supports_color());
        assert!(!manager(&config, false, false, OutputFormat::Plain).supports_color());
        assert!(!manager(&config, false, false, OutputFormat::Json).supports_color());
    }

    #[test]
    fn config_no_color_applies_to_human_output() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        assert!(!manager(&config, false, false, OutputFormat::Human).supports_color());
    }

    #[test]
    fn config_format_is_used_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "JSON".into();
        assert!(manager(&config, false, false, OutputFormat::Auto).is_json());

        // an explicit flag wins
        assert!(!manager(&config, false, false, OutputFormat::Plain).is_json());
    }

    #[test]
    fn unknown_config_format_falls_back_to_auto() {
        let mut config = AppConfig::default();
        config.output.format = "fancy".into();
        assert!(!manager(&config, false, false, OutputFormat::Auto).is_json());
    }

    #[test]
    fn quiet_keeps_errors_only() {
        assert!(Mark::Error.always_shown());
        assert!(!Mark::Warning.always_shown());
        assert!(Mark::Warning.on_stderr());
        assert!(!Mark::Info.on_stderr());

        let out = manager(&AppConfig::default(), true, true, OutputFormat::Plain);
        assert!(out.print("hidden").is_ok());
        assert!(out.error("shown").is_ok());
    }

    #[test]
    fn dim_without_colour_is_identity() {
        let out = manager(&AppConfig::default(), false, true, OutputFormat::Plain);
        assert_eq!(out.dim("{column}"), "{column}");
    }
}
