//! Application ports (traits) for external dependencies.
//!
//! Adapters in `crudgen-adapters` implement these.
//!
//! - [`CatalogSource`]: where the entry kind catalog comes from (built-in
//!   table, manifest directory).
//! - [`Inflector`]: the naming service, declared in the domain because the
//!   compilers consume it directly.

use crate::application::ApplicationError;
use crate::domain::EntryKindCatalog;

pub use crate::domain::Inflector;

/// Port for obtaining an entry kind catalog.
///
/// Implemented by:
/// - `crudgen_adapters::BuiltinCatalog` (embedded kinds)
/// - `crudgen_adapters::DirectoryCatalog` (TOML manifests merged over a base)
#[cfg_attr(test, mockall::automock)]
pub trait CatalogSource: Send + Sync {
    /// Human-readable origin, used in errors and logs.
    fn describe(&self) -> String;

    /// Build the catalog.
    fn load(&self) -> Result<EntryKindCatalog, ApplicationError>;
}
