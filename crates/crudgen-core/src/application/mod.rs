//! Application layer for crudgen.
//!
//! This layer contains:
//! - **Services**: the generation use case (`GenerationService`, `GenerationSession`)
//! - **Ports**: interfaces implemented by adapters (`CatalogSource`, `Inflector`)
//! - **Errors**: orchestration failures
//!
//! No business rules live here; they are all in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::{CatalogSource, Inflector};
pub use services::{
    Artifact, GeneratedArtifact, GeneratedArtifacts, GenerationService, GenerationSession,
    split_entry_line,
};
