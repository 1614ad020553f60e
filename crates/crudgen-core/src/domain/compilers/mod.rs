//! Compilers: projections of an entry collection into artifact bodies.
//!
//! Every artifact is one [`Compiler`] (an override table plus a default).
//! Override tables are derived from the catalog by group, role and column
//! shape, so a kind added through a manifest is handled like a built-in one.
//!
//! ```text
//! EntryCollection ──► Compiler::compile_all ──► artifact body
//!                        │
//!                        ├── overrides[kind](entry)   (if registered)
//!                        └── default(entry)           (otherwise)
//! ```

pub mod dispatch;
pub mod factory;
pub mod literal;
pub mod migration;
pub mod model;
pub mod request;
pub mod view;

pub use dispatch::{CompileFn, Compiler};
pub use literal::substitute;

use crate::domain::{
    catalog::{EntryKindCatalog, EntryKindDefinition, KindTemplates},
    entities::Entry,
    inflector::{Inflector, ResourceNames, table_name},
    value_objects::{ColumnShape, KindGroup, Value},
};

/// Everything a compiler may consult besides the entry itself.
#[derive(Clone, Copy)]
pub struct CompileContext<'a> {
    pub catalog: &'a EntryKindCatalog,
    pub inflector: &'a dyn Inflector,
    pub names: &'a ResourceNames,
}

impl<'a> CompileContext<'a> {
    pub fn new(
        catalog: &'a EntryKindCatalog,
        inflector: &'a dyn Inflector,
        names: &'a ResourceNames,
    ) -> Self {
        Self {
            catalog,
            inflector,
            names,
        }
    }

    pub fn templates(&self, entry: &Entry) -> Option<&'a KindTemplates> {
        self.catalog.get(entry.kind()).map(EntryKindDefinition::templates)
    }

    pub fn shape(&self, entry: &Entry) -> Option<&'a ColumnShape> {
        self.catalog.get(entry.kind()).map(EntryKindDefinition::shape)
    }

    pub fn is_singleton(&self, entry: &Entry) -> bool {
        self.shape(entry).is_some_and(ColumnShape::is_singleton)
    }

    /// Resolve template placeholders: the entry's bound values, then
    /// `%model` and `%table` of the resource being generated.
    pub fn lookup<'e>(self, entry: &'e Entry) -> impl Fn(&str) -> Option<Value> + 'e
    where
        'a: 'e,
    {
        let names = self.names;
        move |name| {
            entry.get(name).cloned().or_else(|| match name {
                "model" => Some(Value::from(names.model.as_str())),
                "table" => Some(Value::from(names.table.as_str())),
                _ => None,
            })
        }
    }

    /// Table of the model a relation entry points at.
    pub fn related_table(&self, entry: &Entry) -> String {
        entry
            .first_argument()
            .map(|related| table_name(&related, self.inflector))
            .unwrap_or_default()
    }

    fn kinds_where(&self, keep: impl Fn(&EntryKindDefinition) -> bool) -> Vec<String> {
        self.catalog
            .definitions()
            .filter(|d| keep(d))
            .map(|d| d.kind().to_string())
            .collect()
    }

    pub fn index_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| d.group() == KindGroup::Index)
    }

    pub fn relation_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| d.group() == KindGroup::Relation)
    }

    /// Kinds with a fixed column set (timestamps, soft deletes, remember token).
    pub fn singleton_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| d.shape().is_singleton())
    }

    /// Relations whose columns live on another table (`hasMany`, `morphOne`...).
    pub fn detached_relation_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| d.group() == KindGroup::Relation && *d.shape() == ColumnShape::None)
    }

    pub fn foreign_key_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| *d.shape() == ColumnShape::ForeignKey)
    }

    pub fn morph_kinds(&self) -> Vec<String> {
        self.kinds_where(|d| *d.shape() == ColumnShape::Morphs)
    }
}
