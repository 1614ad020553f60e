//! Core domain layer for crudgen.
//!
//! Pure logic over in-memory values: the entry kind catalog, the signature
//! mini-language, entries and their collection, and the compilers that turn
//! a collection into artifact bodies. Nothing here performs I/O or logs.
//!
//! ```text
//! EntryKindCatalog ──► parse_grammar / bind ──► Entry::create
//!                                                   │
//!                                                   ▼
//!                      Compiler::compile_all ◄── EntryCollection
//! ```

pub mod catalog;
pub mod compilers;
pub mod entities;
pub mod error;
pub mod inflector;
pub mod signature;
pub mod validation;
pub mod value_objects;

pub use catalog::{CatalogBuilder, EntryKindCatalog, EntryKindDefinition, EntryKindDefinitionBuilder, KindTemplates};
pub use compilers::{CompileContext, CompileFn, Compiler, substitute};
pub use entities::{Entry, EntryCollection, PRIMARY_KEY};
pub use error::{DomainError, ErrorCategory};
pub use inflector::{Inflector, ResourceNames, table_name};
pub use signature::{
    ArgumentSpec, BindError, BoundInput, GrammarError, OptionSpec, ParsedSignature, bind,
    parse_grammar,
};
pub use validation::{RuleSet, RuleViolation, ValidationRule, is_model_name};
pub use value_objects::{ColumnShape, KindGroup, KindRole, Value};

#[cfg(test)]
pub use inflector::MockInflector;
