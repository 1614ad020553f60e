//! `crudgen init`: create a default configuration file.

use std::path::PathBuf;

use crate::{
    cli::InitArgs,
    config::{AppConfig, LOCAL_CONFIG},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Write the default configuration to the platform config directory, or to
/// `.crudgen.toml` with `--local`.
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let config_path = if args.local {
        PathBuf::from(LOCAL_CONFIG)
    } else {
        AppConfig::config_path()
    };

    if config_path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = render_default()?;

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }

    std::fs::write(&config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;

    Ok(())
}

fn render_default() -> CliResult<String> {
    toml::to_string_pretty(&AppConfig::default()).map_err(|e| CliError::Config {
        message: format!("Failed to serialise default config: {e}"),
        source: Some(Box::new(e)),
    })
}
