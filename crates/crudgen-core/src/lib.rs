//! crudgen core - entry kind catalog, signature parsing and compilers.
//!
//! Turns terse entry lines such as `string email --n --q` into validated
//! entries, collects them per resource, and projects the collection into
//! artifact bodies (migration statements, validation rules, factory values,
//! model and view fragments).
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            crudgen-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │ (GenerationService, GenerationSession)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     Ports (CatalogSource, Inflector)    │
//! │   implemented by crudgen-adapters       │
//! └──────────────────┬──────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (Catalog, Signature, Entry, Compilers)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use crudgen_core::prelude::*;
//!
//! # fn run(catalog: EntryKindCatalog, inflector: Box<dyn Inflector>) -> CrudgenResult<()> {
//! let service = GenerationService::new(catalog, inflector);
//! let mut session = service.session("Post")?;
//! session.add_line("string title")?;
//! session.add_line("text body --n")?;
//! session.add_line("timestamps")?;
//!
//! let output = session.finish(&[Artifact::Migration], "// TODO");
//! println!("{}", output.get(Artifact::Migration).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Artifact, CatalogSource, GeneratedArtifacts, GenerationService, GenerationSession,
    };
    pub use crate::domain::{
        Entry, EntryCollection, EntryKindCatalog, EntryKindDefinition, Inflector, KindGroup,
        Value,
    };
    pub use crate::error::{CrudgenError, CrudgenResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
