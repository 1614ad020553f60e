//! Bound argument values and the small enums a catalog uses to describe a
//! kind: [`KindGroup`], [`KindRole`] and [`ColumnShape`].
//!
//! Which kind belongs to which group is decided by the catalog, not here.
//! A new group also needs a bucket in the collection's ordering.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Value ────────────────────────────────────────────────────────────────────

/// A bound argument or option value.
///
/// Everything a user types arrives as a string; validation rules may coerce
/// it into one of the typed variants (`Int`, `Float`, `Bool`). Variadic
/// arguments produce a `List`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether an option carrying this value counts as "set".
    ///
    /// Flags are set when `true`; value-taking options are set when they
    /// carry anything other than `null`.
    pub fn is_set(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            _ => true,
        }
    }

    /// Flatten into a list of strings (a scalar becomes a one-element list).
    pub fn to_string_list(&self) -> Vec<String> {
        match self {
            Self::Null => Vec::new(),
            Self::List(items) => items.iter().map(Value::to_text).collect(),
            other => vec![other.to_text()],
        }
    }

    /// Encode as a PHP literal.
    ///
    /// | Value | Output |
    /// |-------|--------|
    /// | `Null` | `null` |
    /// | `Bool(true)` | `true` |
    /// | `Int(8)` | `8` |
    /// | `Float(8.0)` | `8.0` |
    /// | `Str("it's")` | `'it\'s'` |
    /// | `List([a, b])` | `['a', 'b']` |
    pub fn to_php(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => {
                let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
                format!("'{escaped}'")
            }
            Self::List(items) => {
                let inner: Vec<String> = items.iter().map(Value::to_php).collect();
                format!("[{}]", inner.join(", "))
            }
        }
    }

    /// Plain text rendering, used where values are spliced into non-PHP
    /// text such as validation rule strings. Lists are comma-joined.
    pub fn to_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Value::to_text)
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Self::List(items.into_iter().map(Value::Str).collect())
    }
}

// ── KindGroup ────────────────────────────────────────────────────────────────

/// The mutually exclusive partition every entry kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindGroup {
    Column,
    Relation,
    Index,
}

impl KindGroup {
    pub const ALL: [KindGroup; 3] = [Self::Column, Self::Relation, Self::Index];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Relation => "relation",
            Self::Index => "index",
        }
    }
}

impl fmt::Display for KindGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindGroup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "column" | "columns" => Ok(Self::Column),
            "relation" | "relations" => Ok(Self::Relation),
            "index" | "indexes" | "indices" => Ok(Self::Index),
            other => Err(DomainError::InvalidCatalog(format!(
                "unknown kind group: {other}"
            ))),
        }
    }
}

// ── KindRole ─────────────────────────────────────────────────────────────────

/// Special meaning a column kind carries for ordering and conflict checks.
///
/// Timestamp and soft-delete kinds are singletons: their entry name is the
/// kind itself and they are ordered after every plain column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KindRole {
    #[default]
    Plain,
    Timestamps,
    SoftDeletes,
}

impl KindRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Timestamps => "timestamps",
            Self::SoftDeletes => "soft-deletes",
        }
    }
}

impl fmt::Display for KindRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KindRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "timestamps" => Ok(Self::Timestamps),
            "soft-deletes" | "softdeletes" | "soft_deletes" => Ok(Self::SoftDeletes),
            other => Err(DomainError::InvalidCatalog(format!(
                "unknown kind role: {other}"
            ))),
        }
    }
}

// ── ColumnShape ──────────────────────────────────────────────────────────────

/// How an entry of a given kind derives the physical columns it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnShape {
    /// One column, named by the `column` argument.
    #[default]
    Argument,
    /// Two columns, `<column>_id` and `<column>_type`.
    Morphs,
    /// One foreign key column: the `foreign` option, or `<related>_id`.
    ForeignKey,
    /// A fixed set of columns, independent of input. Marks a singleton kind.
    Fixed(Vec<String>),
    /// No columns on this table (indexes, has-many style relations).
    None,
}

impl ColumnShape {
    pub fn fixed<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fixed(columns.into_iter().map(Into::into).collect())
    }

    pub const fn is_singleton(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

impl FromStr for ColumnShape {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "argument" | "column" => Ok(Self::Argument),
            "morphs" => Ok(Self::Morphs),
            "foreign-key" | "foreign_key" | "foreignkey" => Ok(Self::ForeignKey),
            "none" => Ok(Self::None),
            other => Err(DomainError::InvalidCatalog(format!(
                "unknown column shape: {other}"
            ))),
        }
    }
}
