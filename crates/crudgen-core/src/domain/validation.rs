//! Validation rules checked against bound values after binding.
//!
//! Rules use a pipe syntax, one rule set per argument or option name:
//!
//! ```text
//! nullable|integer
//! required|identifier
//! list|regex:^[a-z]+$
//! ```
//!
//! Checking collects every violation instead of stopping at the first one,
//! and coerces string input into typed values where a rule asks for it
//! (`integer`, `numeric`, `boolean`). Format rules apply to each element
//! of a list value.

use crate::domain::{error::DomainError, signature::BoundInput, value_objects::Value};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]*$").unwrap_or_else(|e| unreachable!("identifier pattern: {e}"))
});

static MODEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap_or_else(|e| unreachable!("model pattern: {e}"))
});

/// Whether `name` is a valid model name (`Post`, `BlogPost`).
pub fn is_model_name(name: &str) -> bool {
    MODEL.is_match(name)
}

/// A single rule in a rule set.
#[derive(Debug, Clone)]
pub enum ValidationRule {
    Nullable,
    Required,
    String,
    Integer,
    Numeric,
    Boolean,
    List,
    /// Lower snake case identifier: `^[a-z][a-z0-9_]*$`.
    Identifier,
    /// Capitalised model name: `^[A-Z][A-Za-z0-9]*$`.
    Model,
    Pattern(Regex),
}

impl ValidationRule {
    fn parse(rule: &str) -> Result<Self, DomainError> {
        let invalid = |reason: String| DomainError::InvalidRule {
            rule: rule.to_string(),
            reason,
        };

        if let Some(pattern) = rule.strip_prefix("regex:") {
            let regex = Regex::new(pattern).map_err(|e| invalid(e.to_string()))?;
            return Ok(Self::Pattern(regex));
        }

        match rule {
            "nullable" => Ok(Self::Nullable),
            "required" => Ok(Self::Required),
            "string" => Ok(Self::String),
            "integer" | "int" => Ok(Self::Integer),
            "numeric" => Ok(Self::Numeric),
            "boolean" | "bool" => Ok(Self::Boolean),
            "list" | "array" => Ok(Self::List),
            "identifier" => Ok(Self::Identifier),
            "model" => Ok(Self::Model),
            other => Err(invalid(format!("unknown rule '{other}'"))),
        }
    }

    /// Check (and possibly coerce) a single scalar. Returns the failure message.
    fn check_scalar(&self, value: &mut Value) -> Option<String> {
        match self {
            Self::Nullable | Self::Required | Self::List => None,
            Self::String => match value {
                Value::Str(_) => None,
                _ => Some("must be a string".into()),
            },
            Self::Integer => match value {
                Value::Int(_) => None,
                Value::Str(s) => match s.trim().parse::<i64>() {
                    Ok(i) => {
                        *value = Value::Int(i);
                        None
                    }
                    Err(_) => Some(format!("must be an integer, got '{s}'")),
                },
                other => Some(format!("must be an integer, got '{other}'")),
            },
            Self::Numeric => match value {
                Value::Int(_) | Value::Float(_) => None,
                Value::Str(s) => {
                    let trimmed = s.trim();
                    if let Ok(i) = trimmed.parse::<i64>() {
                        *value = Value::Int(i);
                        None
                    } else if let Ok(f) = trimmed.parse::<f64>() {
                        *value = Value::Float(f);
                        None
                    } else {
                        Some(format!("must be numeric, got '{s}'"))
                    }
                }
                other => Some(format!("must be numeric, got '{other}'")),
            },
            Self::Boolean => match value {
                Value::Bool(_) => None,
                Value::Str(s) => match s.to_ascii_lowercase().as_str() {
                    "true" | "1" | "yes" | "on" => {
                        *value = Value::Bool(true);
                        None
                    }
                    "false" | "0" | "no" | "off" => {
                        *value = Value::Bool(false);
                        None
                    }
                    _ => Some(format!("must be a boolean, got '{s}'")),
                },
                other => Some(format!("must be a boolean, got '{other}'")),
            },
            Self::Identifier => matches_pattern(
                value,
                &IDENTIFIER,
                "must be a lower snake case identifier",
            ),
            Self::Model => matches_pattern(value, &MODEL, "must be a capitalised model name"),
            Self::Pattern(regex) => {
                matches_pattern(value, regex, &format!("must match /{}/", regex.as_str()))
            }
        }
    }
}

fn matches_pattern(value: &Value, regex: &Regex, message: &str) -> Option<String> {
    match value {
        Value::Str(s) if regex.is_match(s) => None,
        other => Some(format!("{message}, got '{other}'")),
    }
}

/// One failed rule for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// The parsed form of a pipe-separated rule string.
#[derive(Debug, Clone)]
pub struct RuleSet {
    source: String,
    rules: Vec<ValidationRule>,
}

impl RuleSet {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    fn has(&self, wanted: fn(&ValidationRule) -> bool) -> bool {
        self.rules.iter().any(wanted)
    }

    /// Check one field's value, coercing it in place.
    ///
    /// `null` passes unless the set is `required`; a `nullable` set accepts
    /// `null` even then.
    pub fn check(&self, field: &str, value: &mut Value) -> Vec<RuleViolation> {
        let violation = |message: String| RuleViolation {
            field: field.to_string(),
            message,
        };
        let required = self.has(|r| matches!(r, ValidationRule::Required));
        let nullable = self.has(|r| matches!(r, ValidationRule::Nullable));

        let empty = match value {
            Value::Null => true,
            Value::List(items) => items.is_empty(),
            _ => false,
        };
        if empty {
            return if required && !nullable {
                vec![violation("is required".into())]
            } else {
                Vec::new()
            };
        }

        let mut violations = Vec::new();
        match value {
            Value::List(items) => {
                for item in items.iter_mut() {
                    for rule in &self.rules {
                        if let Some(message) = rule.check_scalar(item) {
                            violations.push(violation(message));
                        }
                    }
                }
            }
            scalar => {
                if self.has(|r| matches!(r, ValidationRule::List)) {
                    violations.push(violation("must be a list".into()));
                }
                for rule in &self.rules {
                    if let Some(message) = rule.check_scalar(scalar) {
                        violations.push(violation(message));
                    }
                }
            }
        }
        violations
    }
}

impl FromStr for RuleSet {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rules = s
            .split('|')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(ValidationRule::parse)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source: s.to_string(),
            rules,
        })
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Apply every rule set to the bound input, collecting all violations.
///
/// Fields missing from `bound` are skipped; the catalog guarantees that
/// every rule names a declared argument or option.
pub fn apply_rules(rules: &BTreeMap<String, RuleSet>, bound: &mut BoundInput) -> Vec<RuleViolation> {
    let mut violations = Vec::new();
    for (field, set) in rules {
        if let Some(value) = bound.get_mut(field) {
            violations.extend(set.check(field, value));
        }
    }
    violations
}
