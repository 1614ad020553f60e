//! Application services - orchestrate use cases.
//!
//! A [`GenerationService`] holds the catalog and the naming service; each
//! resource being generated gets its own [`GenerationSession`].

pub mod artifact;
pub mod generation_service;

pub use artifact::{Artifact, GeneratedArtifact, GeneratedArtifacts};
pub use generation_service::{GenerationService, GenerationSession, split_entry_line};
