//! Implementation of the `crudgen kinds` command.

use serde::Serialize;

use crudgen_core::domain::{EntryKindDefinition, KindGroup};

use crate::{
    cli::KindsArgs,
    commands::load_service,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// One catalog kind as printed by `kinds --output-format json`.
#[derive(Debug, Serialize)]
struct KindRow<'a> {
    kind: &'a str,
    group: KindGroup,
    signature: &'a str,
}

impl<'a> From<&'a EntryKindDefinition> for KindRow<'a> {
    fn from(definition: &'a EntryKindDefinition) -> Self {
        Self {
            kind: definition.kind(),
            group: definition.group(),
            signature: definition.grammar(),
        }
    }
}

pub fn execute(args: KindsArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = load_service(&args.catalog, &config)?;
    let catalog = service.catalog();
    let group = args.group.map(KindGroup::from);

    let rows: Vec<KindRow<'_>> = catalog
        .all_kinds(group)
        .into_iter()
        .filter_map(|kind| catalog.get(kind))
        .map(KindRow::from)
        .collect();

    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    let width = rows.iter().map(|r| r.kind.len()).max().unwrap_or(0);
    let groups: &[KindGroup] = match &group {
        Some(g) => std::slice::from_ref(g),
        None => &KindGroup::ALL,
    };

    for &g in groups {
        let in_group: Vec<&KindRow<'_>> = rows.iter().filter(|r| r.group == g).collect();
        if in_group.is_empty() {
            continue;
        }
        output.header(&format!("{g} kinds:"))?;
        for row in in_group {
            output.content(&format!(
                "  {:<width$}  {}",
                row.kind,
                output.dim(row.signature)
            ))?;
        }
        output.print("")?;
    }

    Ok(())
}
