//! Implementation of the `crudgen check` command.

use std::collections::BTreeMap;

use serde::Serialize;

use crudgen_core::domain::{Entry, KindGroup, Value};

use crate::{
    cli::CheckArgs, commands::load_service, config::AppConfig, error::CliResult,
    output::OutputManager,
};

/// What one entry line binds to.
#[derive(Debug, Serialize)]
struct EntryReport<'a> {
    kind: &'a str,
    group: KindGroup,
    name: &'a str,
    label: &'a str,
    columns: &'a [String],
    arguments: &'a BTreeMap<String, Value>,
    options: &'a BTreeMap<String, Value>,
}

impl<'a> From<&'a Entry> for EntryReport<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            kind: entry.kind(),
            group: entry.group(),
            name: entry.name(),
            label: entry.label(),
            columns: entry.columns(),
            arguments: &entry.bound().arguments,
            options: &entry.bound().options,
        }
    }
}

pub fn execute(args: CheckArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = load_service(&args.catalog, &config)?;
    let entry = service.check(&args.line)?;
    let report = EntryReport::from(&entry);

    if output.is_json() {
        output.json(&report)?;
        return Ok(());
    }

    output.success(&format!("{} ({} {})", report.name, report.group, report.kind))?;
    output.content(&format!("  label:   {}", report.label))?;
    output.content(&format!(
        "  columns: {}",
        if report.columns.is_empty() {
            "-".to_string()
        } else {
            report.columns.join(", ")
        }
    ))?;
    for (name, value) in report.arguments {
        output.content(&format!("  {name} = {}", value.to_php()))?;
    }
    for (name, value) in report.options.iter().filter(|(_, v)| v.is_set()) {
        output.content(&format!("  --{name} = {}", value.to_php()))?;
    }

    Ok(())
}
