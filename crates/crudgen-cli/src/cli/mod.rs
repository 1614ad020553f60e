//! Command-line grammar of `crudgen` (clap derive). Handlers live in
//! [`crate::commands`]; nothing here touches the core.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crudgen_core::domain::KindGroup;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crudgen",
    bin_name = "crudgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Resource scaffolding from terse field signatures",
    long_about = "crudgen turns one-line field declarations such as \
                  \"string email --unique\" into migration, validation, factory, \
                  model and view fragments.",
    after_help = "EXAMPLES:\n\
        \x20 crudgen generate Post -e \"string title\" -e \"text body --n\" -e \"belongsTo User\"\n\
        \x20 crudgen generate Post --from post.toml --artifact migration\n\
        \x20 crudgen kinds --group relation\n\
        \x20 crudgen check \"decimal price 10 2 --unsigned\"",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate artifact fragments for a model.
    #[command(
        visible_alias = "g",
        about = "Generate artifact fragments for a model",
        after_help = "EXAMPLES:\n\
            \x20 crudgen generate Post -e \"string title 120\" -e \"timestamps\"\n\
            \x20 crudgen generate Post --from post.toml -a migration -a rules\n\
            \x20 crudgen generate Post -e \"money price\" --catalog ./kinds"
    )]
    Generate(GenerateArgs),

    /// Build a model's entries one prompt at a time.
    #[command(
        visible_alias = "i",
        about = "Declare entries interactively",
        after_help = "EXAMPLES:\n\
            \x20 crudgen interactive Post\n\
            \x20 crudgen interactive Post -a migration"
    )]
    Interactive(InteractiveArgs),

    /// List entry kinds in the catalog.
    #[command(
        visible_alias = "ls",
        about = "List available entry kinds",
        after_help = "EXAMPLES:\n\
            \x20 crudgen kinds\n\
            \x20 crudgen kinds --group index\n\
            \x20 crudgen kinds --catalog ./kinds"
    )]
    Kinds(KindsArgs),

    /// Parse a single entry line and show what it binds to.
    #[command(
        about = "Check a single entry line",
        after_help = "EXAMPLES:\n\
            \x20 crudgen check \"string email --unique\"\n\
            \x20 crudgen check \"belongsTo User --foreign=author_id\""
    )]
    Check(CheckArgs),

    /// Initialise a crudgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 crudgen init           # platform config directory\n\
            \x20 crudgen init --local   # .crudgen.toml in the current directory"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crudgen completions bash > ~/.local/share/bash-completion/completions/crudgen\n\
            \x20 crudgen completions zsh  > ~/.zfunc/_crudgen\n\
            \x20 crudgen completions fish > ~/.config/fish/completions/crudgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the crudgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 crudgen config get generate.placeholder\n\
            \x20 crudgen config list\n\
            \x20 crudgen config path"
    )]
    Config(ConfigCommands),
}

// ── shared ────────────────────────────────────────────────────────────────────

/// Where entry kinds come from.
#[derive(Debug, Clone, Args)]
pub struct CatalogArgs {
    /// Directory of catalog manifests merged over the built-in kinds.
    #[arg(
        long = "catalog",
        value_name = "DIR",
        help = "Directory of catalog manifests (*.toml)"
    )]
    pub catalog: Option<PathBuf>,
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `crudgen generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Model name in StudlyCase, e.g. `BlogPost`.
    #[arg(value_name = "MODEL", help = "Model name, e.g. Post")]
    pub model: String,

    /// One entry line: `<kind> <arguments> [options]`.
    #[arg(
        short = 'e',
        long = "entry",
        value_name = "LINE",
        action = clap::ArgAction::Append,
        help = "Entry line, e.g. \"string email --unique\" (repeatable)"
    )]
    pub entries: Vec<String>,

    /// TOML file with an `entries = [...]` array of entry lines.
    #[arg(
        short = 'f',
        long = "from",
        value_name = "FILE",
        help = "Read entry lines from a TOML file"
    )]
    pub from: Option<PathBuf>,

    /// Artifacts to print. Defaults to `generate.artifacts` from the config.
    #[arg(
        short = 'a',
        long = "artifact",
        value_name = "NAME",
        action = clap::ArgAction::Append,
        help = "Artifact to generate (repeatable)"
    )]
    pub artifacts: Vec<String>,

    /// Text printed for an artifact with no entries.
    #[arg(long = "placeholder", value_name = "TEXT", help = "Body for empty artifacts")]
    pub placeholder: Option<String>,

    /// Fail on the first rejected entry instead of skipping it.
    #[arg(long = "strict", help = "Fail on the first rejected entry")]
    pub strict: bool,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

// ── interactive ───────────────────────────────────────────────────────────────

/// Arguments for `crudgen interactive`.
#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Model name in StudlyCase.
    #[arg(value_name = "MODEL", help = "Model name, e.g. Post")]
    pub model: String,

    /// Artifacts to print once the entries are complete.
    #[arg(
        short = 'a',
        long = "artifact",
        value_name = "NAME",
        action = clap::ArgAction::Append,
        help = "Artifact to generate (repeatable)"
    )]
    pub artifacts: Vec<String>,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

// ── kinds ─────────────────────────────────────────────────────────────────────

/// Arguments for `crudgen kinds`.
#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Only list kinds of this group.
    #[arg(short = 'g', long = "group", value_enum, help = "Filter by group")]
    pub group: Option<GroupArg>,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

/// Kind groups as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GroupArg {
    Column,
    Relation,
    Index,
}

impl From<GroupArg> for KindGroup {
    fn from(group: GroupArg) -> Self {
        match group {
            GroupArg::Column => KindGroup::Column,
            GroupArg::Relation => KindGroup::Relation,
            GroupArg::Index => KindGroup::Index,
        }
    }
}

// ── check ─────────────────────────────────────────────────────────────────────

/// Arguments for `crudgen check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// The entry line to parse.
    #[arg(value_name = "LINE", help = "Entry line, e.g. \"string email --unique\"")]
    pub line: String,

    #[command(flatten)]
    pub catalog: CatalogArgs,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `crudgen init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.crudgen.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crudgen completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `crudgen config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value.
    Get {
        /// Dotted key path, e.g. `generate.placeholder`.
        key: String,
    },
    /// The merged configuration (defaults, files, environment).
    List,
    /// Location of the platform config file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
