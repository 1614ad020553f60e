//! `EntryCollection`: the ordered set of entries for one resource.
//!
//! # Invariants
//!
//! - No two entries share a `name`.
//! - No two non-index entries share a column, including the implicit `id`
//!   and the timestamp / soft-delete columns once those are present.
//! - An index may only reference columns already in the collection, or `id`.
//!
//! A failed [`add`](EntryCollection::add) leaves the collection untouched.

use std::collections::HashSet;

use crate::domain::{
    entities::entry::Entry,
    error::DomainError,
    value_objects::{KindGroup, KindRole},
};

/// The implicit primary key every table has.
pub const PRIMARY_KEY: &str = "id";

const TIMESTAMP_COLUMNS: [&str; 2] = ["created_at", "updated_at"];
const SOFT_DELETE_COLUMN: &str = "deleted_at";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryCollection {
    entries: Vec<Entry>,
    timestamps_kind: Option<String>,
    soft_deletes_kind: Option<String>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry, enforcing the collection invariants.
    pub fn add(&mut self, entry: Entry) -> Result<(), DomainError> {
        if self.contains(entry.name()) {
            return Err(DomainError::DuplicateName {
                name: entry.name().to_string(),
                index: entry.is_index(),
            });
        }

        if entry.is_index() {
            let known = self.occupied_columns();
            if let Some(missing) = entry
                .referenced_columns()
                .iter()
                .find(|c| !known.contains(c.as_str()))
            {
                return Err(DomainError::UnknownColumn {
                    index: entry.name().to_string(),
                    column: missing.clone(),
                });
            }
        } else {
            let existing = self.occupied_columns();
            let conflicts: Vec<String> = entry
                .columns()
                .iter()
                .filter(|c| existing.contains(c.as_str()))
                .cloned()
                .collect();
            if !conflicts.is_empty() {
                return Err(DomainError::ColumnConflict {
                    name: entry.name().to_string(),
                    columns: conflicts,
                });
            }
        }

        match entry.role() {
            KindRole::Timestamps => self.timestamps_kind = Some(entry.kind().to_string()),
            KindRole::SoftDeletes => self.soft_deletes_kind = Some(entry.kind().to_string()),
            KindRole::Plain => {}
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Stable-sort into canonical order: relations, plain columns,
    /// timestamps, soft deletes, indexes.
    pub fn reorder(&mut self) {
        self.entries.sort_by_key(bucket);
    }

    /// `id` followed by the columns of every plain column and relation
    /// entry, in collection order. Not de-duplicated.
    pub fn columns(&self) -> Vec<String> {
        std::iter::once(PRIMARY_KEY.to_string())
            .chain(
                self.entries
                    .iter()
                    .filter(|e| !e.is_index() && e.role() == KindRole::Plain)
                    .flat_map(|e| e.columns().iter().cloned()),
            )
            .collect()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Which timestamps variant was added (`timestamps` or `timestampsTz`).
    pub fn timestamps_kind(&self) -> Option<&str> {
        self.timestamps_kind.as_deref()
    }

    /// Which soft-delete variant was added (`softDeletes` or `softDeletesTz`).
    pub fn soft_deletes_kind(&self) -> Option<&str> {
        self.soft_deletes_kind.as_deref()
    }

    pub fn relations(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| e.is_relation())
    }

    /// Every column already taken: non-index entry columns, `id`, and the
    /// timestamp / soft-delete columns once those kinds are present.
    fn occupied_columns(&self) -> HashSet<&str> {
        let mut taken: HashSet<&str> = self
            .entries
            .iter()
            .filter(|e| !e.is_index())
            .flat_map(|e| e.columns().iter().map(String::as_str))
            .collect();
        taken.insert(PRIMARY_KEY);
        if self.timestamps_kind.is_some() {
            taken.extend(TIMESTAMP_COLUMNS);
        }
        if self.soft_deletes_kind.is_some() {
            taken.insert(SOFT_DELETE_COLUMN);
        }
        taken
    }
}

impl<'a> IntoIterator for &'a EntryCollection {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn bucket(entry: &Entry) -> u8 {
    match (entry.group(), entry.role()) {
        (KindGroup::Relation, _) => 0,
        (KindGroup::Column, KindRole::Plain) => 1,
        (KindGroup::Column, KindRole::Timestamps) => 2,
        (KindGroup::Column, KindRole::SoftDeletes) => 3,
        (KindGroup::Index, _) => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        catalog::{EntryKindCatalog, EntryKindDefinition},
        value_objects::ColumnShape,
    };

    fn catalog() -> EntryKindCatalog {
        let kinds = [
            EntryKindDefinition::builder("string", KindGroup::Column).signature("{column}"),
            EntryKindDefinition::builder("timestamps", KindGroup::Column)
                .role(KindRole::Timestamps)
                .shape(ColumnShape::fixed(["created_at", "updated_at"])),
            EntryKindDefinition::builder("timestampsTz", KindGroup::Column)
                .role(KindRole::Timestamps)
                .shape(ColumnShape::fixed(["created_at", "updated_at"])),
            EntryKindDefinition::builder("softDeletes", KindGroup::Column)
                .role(KindRole::SoftDeletes)
                .shape(ColumnShape::fixed(["deleted_at"])),
            EntryKindDefinition::builder("belongsTo", KindGroup::Relation)
                .signature("{related} {--f|foreign=}")
                .shape(ColumnShape::ForeignKey),
            EntryKindDefinition::builder("index", KindGroup::Index).signature("{columns*}"),
        ];
        kinds
            .into_iter()
            .try_fold(EntryKindCatalog::builder(), |b, k| b.add(k.build()?))
            .unwrap()
            .build()
    }

    fn entry(cat: &EntryKindCatalog, kind: &str, raw: &str) -> Entry {
        Entry::create(kind, raw, cat).unwrap()
    }

    #[test]
    fn duplicate_name_leaves_collection_unchanged() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "string", "email")).unwrap();

        let err = entries.add(entry(&cat, "string", "email")).unwrap_err();
        assert_eq!(
            err,
            DomainError::DuplicateName {
                name: "email".into(),
                index: false
            }
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn duplicate_index_is_flagged_as_index() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "string", "a")).unwrap();
        entries.add(entry(&cat, "string", "b")).unwrap();
        entries.add(entry(&cat, "index", "a b")).unwrap();

        let err = entries.add(entry(&cat, "index", "b a")).unwrap_err();
        assert!(matches!(err, DomainError::DuplicateName { index: true, .. }));
    }

    #[test]
    fn index_must_reference_known_columns() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "string", "title")).unwrap();

        entries.add(entry(&cat, "index", "id title")).unwrap();
        let err = entries.add(entry(&cat, "index", "title slug")).unwrap_err();
        assert_eq!(
            err,
            DomainError::UnknownColumn {
                index: "index:slug,title".into(),
                column: "slug".into()
            }
        );
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn column_conflict_lists_every_clash() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "string", "name")).unwrap();

        let err = entries
            .add(entry(&cat, "belongsTo", "User --foreign=name"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::ColumnConflict {
                name: "belongsTo:User".into(),
                columns: vec!["name".into()]
            }
        );
        assert_eq!(entries.len(), 1);

        assert!(matches!(
            entries.add(entry(&cat, "string", "id")),
            Err(DomainError::ColumnConflict { .. })
        ));
    }

    #[test]
    fn timestamp_variants_conflict() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "timestamps", "")).unwrap();
        assert_eq!(entries.timestamps_kind(), Some("timestamps"));

        let err = entries.add(entry(&cat, "timestampsTz", "")).unwrap_err();
        assert!(matches!(err, DomainError::ColumnConflict { columns, .. } if columns.len() == 2));
        assert!(matches!(
            entries.add(entry(&cat, "string", "created_at")),
            Err(DomainError::ColumnConflict { .. })
        ));
        assert_eq!(entries.timestamps_kind(), Some("timestamps"));
    }

    #[test]
    fn reorder_buckets_stably() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "string", "title")).unwrap();
        entries.add(entry(&cat, "index", "title")).unwrap();
        entries.add(entry(&cat, "softDeletes", "")).unwrap();
        entries.add(entry(&cat, "timestamps", "")).unwrap();
        entries.add(entry(&cat, "string", "body")).unwrap();
        entries.add(entry(&cat, "belongsTo", "User")).unwrap();

        entries.reorder();
        let names: Vec<_> = entries.iter().map(Entry::name).collect();
        assert_eq!(
            names,
            ["belongsTo:User", "title", "body", "timestamps", "softDeletes", "index:title"]
        );
        assert_eq!(entries.soft_deletes_kind(), Some("softDeletes"));
    }

    #[test]
    fn columns_start_with_id_and_skip_indexes() {
        let cat = catalog();
        let mut entries = EntryCollection::new();
        entries.add(entry(&cat, "belongsTo", "User")).unwrap();
        entries.add(entry(&cat, "string", "title")).unwrap();
        entries.add(entry(&cat, "timestamps", "")).unwrap();
        entries.add(entry(&cat, "index", "title")).unwrap();

        assert_eq!(entries.columns(), ["id", "user_id", "title"]);
        assert_eq!(entries.relations().count(), 1);
    }
}
