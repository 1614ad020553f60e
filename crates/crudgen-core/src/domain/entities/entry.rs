//! The `Entry` entity: one user-declared column, relation or index.
//!
//! An entry is built from a kind name and the raw text the user typed for it.
//! Construction binds the text against the kind's signature, runs its
//! validation rules and derives the entry's identity:
//!
//! | Kind shape | `name` | `columns` |
//! |------------|--------|-----------|
//! | index | `index:` + sorted columns | none |
//! | singleton (`timestamps`) | the kind | fixed set |
//! | relation | `kind:` + first argument | foreign key / morphs / none |
//! | column | the `column` argument | one (two for morphs) |
//!
//! Construction has no side effects; adding to a collection is a separate
//! step.

use heck::{ToSnakeCase, ToTitleCase};

use crate::domain::{
    catalog::{EntryKindCatalog, EntryKindDefinition},
    error::DomainError,
    signature::{BoundInput, bind},
    validation::{RuleViolation, apply_rules},
    value_objects::{ColumnShape, KindGroup, KindRole, Value},
};

/// One declared field, relation or index. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    kind: String,
    group: KindGroup,
    role: KindRole,
    raw_input: String,
    bound: BoundInput,
    argument_order: Vec<String>,
    name: String,
    label: String,
    columns: Vec<String>,
    referenced_columns: Vec<String>,
}

impl Entry {
    /// Build an entry of `kind` from the user's raw argument text.
    ///
    /// # Errors
    ///
    /// - `UnknownKind` if the catalog has no such kind
    /// - `Bind` if the text does not fit the kind's signature
    /// - `Validation` with every failing rule if bound values are rejected
    pub fn create(kind: &str, raw_input: &str, catalog: &EntryKindCatalog) -> Result<Self, DomainError> {
        let definition = catalog.lookup(kind)?;
        let mut bound = bind(definition.signature(), raw_input)?;

        let violations = apply_rules(definition.rules(), &mut bound);
        if !violations.is_empty() {
            return Err(DomainError::Validation {
                kind: kind.to_string(),
                violations,
            });
        }

        let identity = Identity::derive(definition, &bound)?;

        Ok(Self {
            kind: definition.kind().to_string(),
            group: definition.group(),
            role: definition.role(),
            raw_input: raw_input.to_string(),
            argument_order: definition
                .signature()
                .arguments
                .iter()
                .map(|a| a.name.clone())
                .collect(),
            bound,
            label: identity.name.to_title_case(),
            name: identity.name,
            columns: identity.columns,
            referenced_columns: identity.referenced_columns,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn group(&self) -> KindGroup {
        self.group
    }

    pub fn role(&self) -> KindRole {
        self.role
    }

    pub fn is_index(&self) -> bool {
        self.group == KindGroup::Index
    }

    pub fn is_relation(&self) -> bool {
        self.group == KindGroup::Relation
    }

    /// Plain columns: not a relation, not an index, not timestamps/soft deletes.
    pub fn is_plain_column(&self) -> bool {
        self.group == KindGroup::Column && self.role == KindRole::Plain
    }

    /// The text the user typed, kept for redisplay.
    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn bound(&self) -> &BoundInput {
        &self.bound
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Physical columns this entry adds to the table.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Columns an index entry points at, in the order typed.
    pub fn referenced_columns(&self) -> &[String] {
        &self.referenced_columns
    }

    /// Bound value of an argument or option.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bound.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.bound.get_str(name)
    }

    pub fn is_set(&self, option: &str) -> bool {
        self.bound.is_set(option)
    }

    /// Positional argument values in declaration order.
    pub fn positional_values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.argument_order
            .iter()
            .filter_map(|name| self.bound.argument(name).map(|v| (name.as_str(), v)))
    }

    /// The first positional argument as text (the related model for relations).
    pub fn first_argument(&self) -> Option<String> {
        self.positional_values()
            .next()
            .map(|(_, v)| v.to_text())
            .filter(|s| !s.is_empty())
    }
}

// ── Identity derivation ──────────────────────────────────────────────────────

struct Identity {
    name: String,
    columns: Vec<String>,
    referenced_columns: Vec<String>,
}

impl Identity {
    fn derive(definition: &EntryKindDefinition, bound: &BoundInput) -> Result<Self, DomainError> {
        let primary = definition.primary_argument();
        let primary_value = primary.and_then(|p| bound.argument(p));

        if definition.is_index() {
            let referenced_columns = primary_value.map(Value::to_string_list).unwrap_or_default();
            let mut sorted = referenced_columns.clone();
            sorted.sort();
            return Ok(Self {
                name: format!("index:{}", sorted.join(",")),
                columns: Vec::new(),
                referenced_columns,
            });
        }

        if let ColumnShape::Fixed(columns) = definition.shape() {
            return Ok(Self {
                name: definition.kind().to_string(),
                columns: columns.clone(),
                referenced_columns: Vec::new(),
            });
        }

        let required = |field: &str| DomainError::Validation {
            kind: definition.kind().to_string(),
            violations: vec![RuleViolation {
                field: field.to_string(),
                message: "is required".into(),
            }],
        };
        let base = primary_value
            .map(Value::to_text)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| required(primary.unwrap_or("column")))?;

        let name = if definition.group() == KindGroup::Relation {
            format!("{}:{base}", definition.kind())
        } else {
            base.clone()
        };

        let columns = match definition.shape() {
            ColumnShape::Argument => vec![base],
            ColumnShape::Morphs => vec![format!("{base}_id"), format!("{base}_type")],
            ColumnShape::ForeignKey => match bound.option("foreign").filter(|v| v.is_set()) {
                Some(foreign) => vec![foreign.to_text()],
                None => vec![format!("{}_id", base.to_snake_case())],
            },
            ColumnShape::Fixed(columns) => columns.clone(),
            ColumnShape::None => Vec::new(),
        };

        Ok(Self {
            name,
            columns,
            referenced_columns: Vec::new(),
        })
    }
}
