//! Tracing subscriber setup. The binary is the only place a subscriber is
//! installed; the library crates just emit events.
//!
//! Without `RUST_LOG`, crudgen's crates log at [`GlobalArgs::log_level`] and
//! every other crate stays silent. Events always go to stderr so stdout only
//! carries generated content. Under `--output-format json` they are JSON lines.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

const CRATES: [&str; 3] = ["crudgen", "crudgen_core", "crudgen_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => crate_filter(args.log_level())?,
    };

    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match args.output_format {
        OutputFormat::Json => registry.with(fmt.json().with_ansi(false)).try_init(),
        _ => {
            let ansi = !args.no_color && std::io::stderr().is_terminal();
            registry.with(fmt.with_ansi(ansi)).try_init()
        }
    };

    installed.map_err(|e| anyhow::anyhow!("tracing subscriber already installed: {e}"))
}

/// `off` for everything, `level` for crudgen's crates.
fn crate_filter(level: LevelFilter) -> anyhow::Result<EnvFilter> {
    let directives: Vec<String> = CRATES.iter().map(|name| format!("{name}={level}")).collect();
    Ok(EnvFilter::try_new(format!("off,{}", directives.join(",")))?)
}
