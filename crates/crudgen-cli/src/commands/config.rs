//! `crudgen config`: inspect configuration values.

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(cmd: ConfigCommands, config: AppConfig, output: OutputManager) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.content(&format!("{key} = {value}"))?;
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
                return Ok(());
            }
            output.header("Effective configuration:")?;
            let serialised =
                toml::to_string_pretty(&config).map_err(|e| CliError::Config {
                    message: format!("Failed to serialise config: {e}"),
                    source: Some(Box::new(e)),
                })?;
            output.content(&serialised)?;
        }

        ConfigCommands::Path => {
            output.content(&AppConfig::config_path().display().to_string())?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "catalog.dir" => Ok(config
            .catalog
            .dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_default()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "generate.placeholder" => Ok(config.generate.placeholder.clone()),
        "generate.artifacts" => Ok(config.generate.artifacts.join(",")),
        _ => Err(CliError::Config {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_key() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "generate.placeholder").unwrap(), "// TODO");
        assert_eq!(get_config_value(&cfg, "catalog.dir").unwrap(), "");
    }

    #[test]
    fn artifacts_are_comma_joined() {
        let mut cfg = AppConfig::default();
        cfg.generate.artifacts = vec!["migration".into(), "rules".into()];
        assert_eq!(get_config_value(&cfg, "generate.artifacts").unwrap(), "migration,rules");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::Config { .. })
        ));
    }
}
