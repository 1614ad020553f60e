//! Per-kind compiler dispatch.
//!
//! A [`Compiler`] projects each entry of a collection into one fragment of a
//! target artifact. It holds an explicit override table keyed by kind name
//! and a single default function. Dispatch is a map lookup: a kind without
//! an override goes to the default, which is the normal path and never an
//! error.
//!
//! Both overrides and the default return `Option<String>`; `None` means
//! "emit nothing for this entry".

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::domain::entities::{Entry, EntryCollection};

/// A compilation function for one entry.
pub type CompileFn<'a> = Arc<dyn Fn(&Entry) -> Option<String> + Send + Sync + 'a>;

/// Override table plus default for one artifact.
///
/// The lifetime lets compile functions borrow context (the catalog, the
/// resource names) instead of cloning it.
#[derive(Clone)]
pub struct Compiler<'a> {
    name: String,
    overrides: BTreeMap<String, CompileFn<'a>>,
    default: CompileFn<'a>,
}

impl<'a> Compiler<'a> {
    /// A compiler with no overrides. The default is required, so a compiler
    /// can never be missing its fallback.
    pub fn new<F>(name: impl Into<String>, default: F) -> Self
    where
        F: Fn(&Entry) -> Option<String> + Send + Sync + 'a,
    {
        Self {
            name: name.into(),
            overrides: BTreeMap::new(),
            default: Arc::new(default),
        }
    }

    /// Register an override for one kind, replacing any previous one.
    pub fn with_override<F>(mut self, kind: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Entry) -> Option<String> + Send + Sync + 'a,
    {
        self.overrides.insert(kind.into(), Arc::new(f));
        self
    }

    /// Register the same override for several kinds.
    pub fn with_overrides<I, S, F>(mut self, kinds: I, f: F) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&Entry) -> Option<String> + Send + Sync + 'a,
    {
        let f: CompileFn<'a> = Arc::new(f);
        for kind in kinds {
            self.overrides.insert(kind.into(), Arc::clone(&f));
        }
        self
    }

    /// Emit nothing for the given kinds.
    pub fn suppress<I, S>(self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_overrides(kinds, |_| None)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_override(&self, kind: &str) -> bool {
        self.overrides.contains_key(kind)
    }

    /// Kinds with an override, sorted.
    pub fn overridden_kinds(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    /// Compile one entry: its kind's override if registered, else the default.
    pub fn compile(&self, entry: &Entry) -> Option<String> {
        match self.overrides.get(entry.kind()) {
            Some(f) => f(entry),
            None => (self.default)(entry),
        }
    }

    /// Compile every entry in collection order, dropping `None` results and
    /// joining the rest with newlines. An empty result becomes `placeholder`.
    pub fn compile_all(&self, entries: &EntryCollection, placeholder: &str) -> String {
        let lines: Vec<String> = entries.iter().filter_map(|e| self.compile(e)).collect();
        if lines.is_empty() {
            placeholder.to_string()
        } else {
            lines.join("\n")
        }
    }
}

impl fmt::Debug for Compiler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compiler")
            .field("name", &self.name)
            .field("overrides", &self.overrides.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        catalog::{EntryKindCatalog, EntryKindDefinition},
        value_objects::{ColumnShape, KindGroup, KindRole},
    };

    fn catalog() -> EntryKindCatalog {
        let kinds = [
            EntryKindDefinition::builder("string", KindGroup::Column).signature("{column}"),
            EntryKindDefinition::builder("uuid", KindGroup::Column).signature("{column}"),
            EntryKindDefinition::builder("softDeletes", KindGroup::Column)
                .role(KindRole::SoftDeletes)
                .shape(ColumnShape::fixed(["deleted_at"])),
        ];
        kinds
            .into_iter()
            .try_fold(EntryKindCatalog::builder(), |b, k| b.add(k.build()?))
            .unwrap()
            .build()
    }

    fn default_compiler<'a>() -> Compiler<'a> {
        Compiler::new("test", |e: &Entry| Some(format!("DEFAULT:{}", e.name())))
    }

    #[test]
    fn falls_back_to_default() {
        let entry = Entry::create("uuid", "id", &catalog()).unwrap();
        assert_eq!(default_compiler().compile(&entry).as_deref(), Some("DEFAULT:id"));
    }

    #[test]
    fn override_wins() {
        let entry = Entry::create("string", "title", &catalog()).unwrap();
        let compiler = default_compiler().with_override("string", |e| Some(format!("S:{}", e.name())));
        assert!(compiler.has_override("string"));
        assert_eq!(compiler.compile(&entry).as_deref(), Some("S:title"));
    }

    #[test]
    fn suppressed_entries_emit_nothing() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(Entry::create("string", "title", &cat).unwrap()).unwrap();
        entries.add(Entry::create("softDeletes", "", &cat).unwrap()).unwrap();
        entries.add(Entry::create("uuid", "ref", &cat).unwrap()).unwrap();

        let compiler = default_compiler().suppress(["softDeletes"]);
        assert_eq!(compiler.compile_all(&entries, "// TODO"), "DEFAULT:title\nDEFAULT:ref");
    }

    #[test]
    fn empty_collection_yields_placeholder() {
        let entries = EntryCollection::new();
        assert_eq!(default_compiler().compile_all(&entries, "// TODO"), "// TODO");
    }

    #[test]
    fn all_suppressed_yields_placeholder() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(Entry::create("softDeletes", "", &cat).unwrap()).unwrap();

        let compiler = default_compiler().suppress(["softDeletes"]);
        assert_eq!(compiler.compile_all(&entries, ""), "");
        assert_eq!(compiler.compile_all(&entries, "//"), "//");
    }

    #[test]
    fn shared_override_registers_every_kind() {
        let compiler = default_compiler().with_overrides(["b", "a"], |_| None);
        assert_eq!(compiler.overridden_kinds().collect::<Vec<_>>(), ["a", "b"]);
        assert!(format!("{compiler:?}").contains("overrides"));
    }
}
