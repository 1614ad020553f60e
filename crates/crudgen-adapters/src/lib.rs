//! Infrastructure adapters for crudgen.
//!
//! This crate implements the ports defined in `crudgen_core::application::ports`
//! and the naming port of the domain. It owns all filesystem I/O.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod inflector;

pub use builtin_catalog::{BuiltinCatalog, builtin_catalog};
pub use catalog_loader::{CatalogLoader, CatalogManifest, DirectoryCatalog, ManifestError};
pub use inflector::EnglishInflector;
