//! The entry kind catalog: every kind a user can declare, with its grammar,
//! validation rules and per-artifact templates.
//!
//! # Design
//!
//! The catalog is a value, built once at startup and passed by reference.
//! There is no global registry. Grammar strings and rule strings are parsed
//! when a definition is built, so a broken kind fails at catalog build time
//! rather than when a user first types it.
//!
//! ```rust
//! use crudgen_core::domain::{EntryKindCatalog, EntryKindDefinition, KindGroup};
//!
//! let catalog = EntryKindCatalog::builder()
//!     .add(
//!         EntryKindDefinition::builder("string", KindGroup::Column)
//!             .signature("{column} {--n|nullable}")
//!             .rule("column", "identifier")
//!             .statement("$table->string(%column)")
//!             .build()?,
//!     )?
//!     .modifier("nullable", "->nullable()")
//!     .build();
//!
//! assert_eq!(catalog.all_kinds(None), ["string"]);
//! # Ok::<(), crudgen_core::domain::DomainError>(())
//! ```

use crate::domain::{
    error::DomainError,
    signature::{ParsedSignature, parse_grammar},
    validation::RuleSet,
    value_objects::{ColumnShape, KindGroup, KindRole},
};
use std::collections::{BTreeMap, HashMap};

// ── Per-kind templates ───────────────────────────────────────────────────────

/// Artifact templates attached to a kind. All optional; compilers fall back
/// to generic output when a template is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KindTemplates {
    /// Migration statement, e.g. `$table->string(%column[, %length])`.
    pub statement: Option<String>,
    /// Request validation rule fragment, e.g. `string|max:255`.
    pub rule: Option<String>,
    /// Factory faker expression, e.g. `fake()->sentence()`.
    pub faker: Option<String>,
    /// Eloquent cast, e.g. `boolean`.
    pub cast: Option<String>,
    /// PHP doc type, e.g. `string` or `\Illuminate\Support\Carbon`.
    pub php_type: Option<String>,
    /// Form widget: `text`, `textarea`, `number`, `checkbox`, `date`, `select`...
    pub widget: Option<String>,
}

// ── EntryKindDefinition ──────────────────────────────────────────────────────

/// One kind in the catalog.
#[derive(Debug, Clone)]
pub struct EntryKindDefinition {
    kind: String,
    group: KindGroup,
    role: KindRole,
    shape: ColumnShape,
    grammar: String,
    signature: ParsedSignature,
    rules: BTreeMap<String, RuleSet>,
    templates: KindTemplates,
}

impl EntryKindDefinition {
    pub fn builder(kind: impl Into<String>, group: KindGroup) -> EntryKindDefinitionBuilder {
        EntryKindDefinitionBuilder::new(kind, group)
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

    pub fn shape(&self) -> &ColumnShape {
        &self.shape
    }

    /// The grammar string as written.
    pub fn grammar(&self) -> &str {
        &self.grammar
    }

    pub fn signature(&self) -> &ParsedSignature {
        &self.signature
    }

    pub fn rules(&self) -> &BTreeMap<String, RuleSet> {
        &self.rules
    }

    pub fn templates(&self) -> &KindTemplates {
        &self.templates
    }

    pub fn is_index(&self) -> bool {
        self.group == KindGroup::Index
    }

    /// The argument that names the entry: `column` if declared, else the
    /// first positional argument.
    pub fn primary_argument(&self) -> Option<&str> {
        self.signature
            .argument("column")
            .or_else(|| self.signature.arguments.first())
            .map(|a| a.name.as_str())
    }
}

/// Builder for [`EntryKindDefinition`]. `build` parses the grammar and rules.
#[derive(Debug, Clone)]
pub struct EntryKindDefinitionBuilder {
    kind: String,
    group: KindGroup,
    role: KindRole,
    shape: Option<ColumnShape>,
    grammar: String,
    rules: Vec<(String, String)>,
    templates: KindTemplates,
}

impl EntryKindDefinitionBuilder {
    fn new(kind: impl Into<String>, group: KindGroup) -> Self {
        Self {
            kind: kind.into(),
            group,
            role: KindRole::Plain,
            shape: None,
            grammar: String::new(),
            rules: Vec::new(),
            templates: KindTemplates::default(),
        }
    }

    pub fn signature(mut self, grammar: impl Into<String>) -> Self {
        self.grammar = grammar.into();
        self
    }

    pub fn role(mut self, role: KindRole) -> Self {
        self.role = role;
        self
    }

    pub fn shape(mut self, shape: ColumnShape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn rule(mut self, field: impl Into<String>, rule: impl Into<String>) -> Self {
        self.rules.push((field.into(), rule.into()));
        self
    }

    pub fn templates(mut self, templates: KindTemplates) -> Self {
        self.templates = templates;
        self
    }

    pub fn statement(mut self, template: impl Into<String>) -> Self {
        self.templates.statement = Some(template.into());
        self
    }

    pub fn request_rule(mut self, rule: impl Into<String>) -> Self {
        self.templates.rule = Some(rule.into());
        self
    }

    pub fn faker(mut self, expr: impl Into<String>) -> Self {
        self.templates.faker = Some(expr.into());
        self
    }

    pub fn cast(mut self, cast: impl Into<String>) -> Self {
        self.templates.cast = Some(cast.into());
        self
    }

    pub fn php_type(mut self, ty: impl Into<String>) -> Self {
        self.templates.php_type = Some(ty.into());
        self
    }

    pub fn widget(mut self, widget: impl Into<String>) -> Self {
        self.templates.widget = Some(widget.into());
        self
    }

    pub fn build(self) -> Result<EntryKindDefinition, DomainError> {
        let invalid =
            |reason: String| DomainError::InvalidCatalog(format!("kind '{}': {reason}", self.kind));

        if self.kind.trim().is_empty() || self.kind.contains(char::is_whitespace) {
            return Err(DomainError::InvalidCatalog(format!(
                "invalid kind name '{}'",
                self.kind
            )));
        }

        let signature =
            parse_grammar(&self.grammar).map_err(|source| DomainError::InvalidSignature {
                kind: self.kind.clone(),
                source,
            })?;

        let mut rules = BTreeMap::new();
        for (field, rule) in &self.rules {
            if !signature.declares(field) {
                return Err(invalid(format!("rule for undeclared field '{field}'")));
            }
            rules.insert(field.clone(), rule.parse::<RuleSet>()?);
        }

        if self.role != KindRole::Plain && self.group != KindGroup::Column {
            return Err(invalid(format!("role '{}' requires the column group", self.role)));
        }

        let shape = match (self.group, self.shape.clone()) {
            (KindGroup::Index, None | Some(ColumnShape::None)) => ColumnShape::None,
            (KindGroup::Index, Some(_)) => {
                return Err(invalid("index kinds contribute no columns".into()));
            }
            (_, Some(shape)) => shape,
            (KindGroup::Column, None) => ColumnShape::Argument,
            (KindGroup::Relation, None) => ColumnShape::None,
        };

        if self.role != KindRole::Plain && !shape.is_singleton() {
            return Err(invalid("timestamp and soft-delete kinds need fixed columns".into()));
        }

        let singleton_column = self.group == KindGroup::Column && shape.is_singleton();
        if !singleton_column && signature.arguments.is_empty() {
            return Err(invalid("no positional argument to derive a name from".into()));
        }

        Ok(EntryKindDefinition {
            kind: self.kind,
            group: self.group,
            role: self.role,
            shape,
            grammar: self.grammar,
            signature,
            rules,
            templates: self.templates,
        })
    }
}

// ── EntryKindCatalog ─────────────────────────────────────────────────────────

/// Registry of every known entry kind plus the option modifier table.
#[derive(Debug, Clone, Default)]
pub struct EntryKindCatalog {
    kinds: Vec<EntryKindDefinition>,
    positions: HashMap<String, usize>,
    modifiers: BTreeMap<String, String>,
}

impl EntryKindCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Reopen the catalog for extension (e.g. merging manifests over built-ins).
    pub fn into_builder(self) -> CatalogBuilder {
        CatalogBuilder { catalog: self }
    }

    pub fn lookup(&self, kind: &str) -> Result<&EntryKindDefinition, DomainError> {
        self.get(kind).ok_or_else(|| DomainError::UnknownKind {
            kind: kind.to_string(),
        })
    }

    pub fn get(&self, kind: &str) -> Option<&EntryKindDefinition> {
        self.positions.get(kind).map(|&i| &self.kinds[i])
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.positions.contains_key(kind)
    }

    /// Kind names in registration order, optionally restricted to one group.
    pub fn all_kinds(&self, group: Option<KindGroup>) -> Vec<&str> {
        self.definitions()
            .filter(|d| group.is_none_or(|g| d.group == g))
            .map(|d| d.kind.as_str())
            .collect()
    }

    pub fn definitions(&self) -> impl Iterator<Item = &EntryKindDefinition> {
        self.kinds.iter()
    }

    /// The modifier template for an option name, e.g. `nullable` → `->nullable()`.
    pub fn modifier(&self, option: &str) -> Option<&str> {
        self.modifiers.get(option).map(String::as_str)
    }

    pub fn modifiers(&self) -> &BTreeMap<String, String> {
        &self.modifiers
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

/// Builder for [`EntryKindCatalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: EntryKindCatalog,
}

impl CatalogBuilder {
    /// Register a new kind. Fails if the kind is already registered.
    pub fn add(mut self, definition: EntryKindDefinition) -> Result<Self, DomainError> {
        if self.catalog.contains(&definition.kind) {
            return Err(DomainError::DuplicateKind {
                kind: definition.kind,
            });
        }
        self.insert(definition);
        Ok(self)
    }

    /// Register a kind, replacing any existing definition in place.
    pub fn replace(mut self, definition: EntryKindDefinition) -> Self {
        match self.catalog.positions.get(&definition.kind) {
            Some(&i) => self.catalog.kinds[i] = definition,
            None => self.insert(definition),
        }
        self
    }

    pub fn modifier(mut self, option: impl Into<String>, template: impl Into<String>) -> Self {
        self.catalog.modifiers.insert(option.into(), template.into());
        self
    }

    pub fn build(self) -> EntryKindCatalog {
        self.catalog
    }

    fn insert(&mut self, definition: EntryKindDefinition) {
        self.catalog
            .positions
            .insert(definition.kind.clone(), self.catalog.kinds.len());
        self.catalog.kinds.push(definition);
    }
}
