//! Implementation of the `crudgen interactive` command.
//!
//! Prompts for one entry line at a time. A rejected line prints the error and
//! its suggestions and prompts again; accepted entries are kept. An empty
//! line finishes the session, `?` browses the catalog.

use crudgen_core::application::GenerationSession;

use crate::{
    cli::InteractiveArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// What the prompt loop does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    BrowseKinds,
    Finish,
}

#[cfg(feature = "interactive")]
#[tracing::instrument(skip_all, fields(model = %args.model))]
pub fn execute(args: InteractiveArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    use dialoguer::{FuzzySelect, Input, theme::ColorfulTheme};

    use crate::commands::{load_service, print_artifacts, resolve_artifacts};

    let artifacts = resolve_artifacts(&args.artifacts, &config)?;
    let service = load_service(&args.catalog, &config)?;
    let mut session = service.session(&args.model)?;

    output.header(&format!(
        "Declaring {} (table '{}')",
        session.names().model,
        session.names().table
    ))?;
    output.info("One entry per line, e.g. `string title --nullable`.")?;
    output.info("Empty line to finish, `?` to browse kinds.")?;

    let theme = ColorfulTheme::default();
    let kinds: Vec<String> = service
        .catalog()
        .definitions()
        .map(|d| format!("{:<20} {}", d.kind(), d.grammar()))
        .collect();

    loop {
        let line: String = Input::with_theme(&theme)
            .with_prompt(format!("{} entry", session.names().model))
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_error)?;

        match apply_line(&mut session, &line, &output)? {
            Step::Continue => {}
            Step::Finish => break,
            Step::BrowseKinds => {
                let picked = FuzzySelect::with_theme(&theme)
                    .with_prompt("Kind")
                    .items(&kinds)
                    .default(0)
                    .interact_opt()
                    .map_err(prompt_error)?;
                if let Some(index) = picked {
                    output.info(&kinds[index])?;
                }
            }
        }
    }

    let generated = session.finish(&artifacts, &config.generate.placeholder);
    print_artifacts(&output, &generated)
}

#[cfg(not(feature = "interactive"))]
pub fn execute(_args: InteractiveArgs, _config: AppConfig, _output: OutputManager) -> CliResult<()> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

/// Feed one prompted line to the session. Recoverable errors are shown and
/// swallowed so the loop prompts again.
#[cfg_attr(not(feature = "interactive"), allow(dead_code))]
fn apply_line(
    session: &mut GenerationSession<'_>,
    line: &str,
    output: &OutputManager,
) -> CliResult<Step> {
    let line = line.trim();
    match line {
        "" => return Ok(Step::Finish),
        "?" => return Ok(Step::BrowseKinds),
        _ => {}
    }

    match session.add_line(line) {
        Ok(entry) => {
            output.success(&format!("added {}", entry.name()))?;
            Ok(Step::Continue)
        }
        Err(e) if e.is_recoverable() => {
            output.error(&e.to_string())?;
            for suggestion in e.suggestions() {
                output.warning(&suggestion)?;
            }
            Ok(Step::Continue)
        }
        Err(e) => Err(CliError::Core(e)),
    }
}

#[cfg(feature = "interactive")]
fn prompt_error(err: dialoguer::Error) -> CliError {
    match err {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            CliError::Cancelled
        }
        other => CliError::Prompt {
            message: "failed to read from the terminal".into(),
            source: Some(Box::new(other)),
        },
    }
}
