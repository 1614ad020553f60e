//! Signature grammar parsing.
//!
//! A grammar is a whitespace-separated list of brace tokens:
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `{name}` | required positional argument |
//! | `{name?}` | optional positional argument |
//! | `{name=default}` | optional positional argument with a default |
//! | `{name*}` | required variadic argument (one or more) |
//! | `{name?*}` | optional variadic argument (zero or more) |
//! | `{--name}` / `{--a\|name}` | boolean flag, with optional short alias |
//! | `{--name=}` / `{--a\|name=default}` | value-taking option |
//!
//! Parsing is pure: the same grammar string always yields the same
//! [`ParsedSignature`].

use std::collections::HashSet;
use thiserror::Error;

/// A malformed signature grammar. Fatal to the catalog entry that carries it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("malformed grammar token '{token}': {reason}")]
    Malformed { token: String, reason: String },

    #[error("only one variadic argument is allowed ('{first}' and '{second}')")]
    MultipleVariadic { first: String, second: String },

    #[error("required argument '{name}' follows an optional argument")]
    RequiredAfterOptional { name: String },

    #[error("argument '{name}' follows the variadic argument '{variadic}'")]
    VariadicNotLast { name: String, variadic: String },

    #[error("duplicate argument or option name '{name}'")]
    DuplicateName { name: String },
}

/// One declared positional argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentSpec {
    pub name: String,
    pub required: bool,
    pub variadic: bool,
    pub default: Option<String>,
}

/// One declared named option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub alias: Option<String>,
    pub takes_value: bool,
    pub default: Option<String>,
}

/// The structured form of a grammar string.
///
/// Arguments and options are kept in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedSignature {
    pub arguments: Vec<ArgumentSpec>,
    pub options: Vec<OptionSpec>,
}

impl ParsedSignature {
    pub fn argument(&self, name: &str) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Resolve an option token (without dashes). Full names win over aliases.
    pub fn find_option(&self, key: &str) -> Option<&OptionSpec> {
        self.option(key)
            .or_else(|| self.options.iter().find(|o| o.alias.as_deref() == Some(key)))
    }

    /// Whether `name` is a declared argument or option.
    pub fn declares(&self, name: &str) -> bool {
        self.argument(name).is_some() || self.option(name).is_some()
    }

    pub fn variadic(&self) -> Option<&ArgumentSpec> {
        self.arguments.iter().find(|a| a.variadic)
    }

    /// Every declared name: arguments first, then options.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .map(|a| a.name.as_str())
            .chain(self.options.iter().map(|o| o.name.as_str()))
    }
}

/// Parse a grammar string into a [`ParsedSignature`].
pub fn parse_grammar(grammar: &str) -> Result<ParsedSignature, GrammarError> {
    let mut sig = ParsedSignature::default();
    let mut names: HashSet<String> = HashSet::new();
    let mut option_keys: HashSet<String> = HashSet::new();

    for token in split_tokens(grammar)? {
        if let Some(body) = token.strip_prefix("--") {
            let option = parse_option(&token, body)?;
            if !names.insert(option.name.clone()) || !option_keys.insert(option.name.clone()) {
                return Err(GrammarError::DuplicateName { name: option.name });
            }
            if let Some(alias) = &option.alias {
                if !option_keys.insert(alias.clone()) {
                    return Err(GrammarError::DuplicateName {
                        name: alias.clone(),
                    });
                }
            }
            sig.options.push(option);
        } else {
            let argument = parse_argument(&token)?;
            if !names.insert(argument.name.clone()) {
                return Err(GrammarError::DuplicateName {
                    name: argument.name,
                });
            }
            check_argument_order(&sig.arguments, &argument)?;
            sig.arguments.push(argument);
        }
    }

    Ok(sig)
}

// ── Internals ────────────────────────────────────────────────────────────────

/// Split a grammar into the contents of its `{...}` tokens.
fn split_tokens(grammar: &str) -> Result<Vec<String>, GrammarError> {
    let mut tokens = Vec::new();
    let mut chars = grammar.chars().peekable();

    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c != '{' {
            let stray: String = std::iter::once(c)
                .chain(std::iter::from_fn(|| chars.next_if(|n| !n.is_whitespace())))
                .collect();
            return Err(GrammarError::Malformed {
                token: stray,
                reason: "tokens must be wrapped in braces".into(),
            });
        }

        let mut body = String::new();
        let mut closed = false;
        for inner in chars.by_ref() {
            match inner {
                '}' => {
                    closed = true;
                    break;
                }
                '{' => {
                    return Err(GrammarError::Malformed {
                        token: format!("{{{body}{{"),
                        reason: "nested braces".into(),
                    });
                }
                other => body.push(other),
            }
        }
        if !closed {
            return Err(GrammarError::Malformed {
                token: format!("{{{body}"),
                reason: "missing closing brace".into(),
            });
        }
        tokens.push(body.trim().to_string());
    }

    Ok(tokens)
}

fn parse_option(token: &str, body: &str) -> Result<OptionSpec, GrammarError> {
    let malformed = |reason: &str| GrammarError::Malformed {
        token: format!("{{{token}}}"),
        reason: reason.into(),
    };

    let (alias, rest) = match body.split_once('|') {
        Some((alias, rest)) => (Some(alias.trim()), rest.trim()),
        None => (None, body.trim()),
    };
    let (name, takes_value, default) = match rest.split_once('=') {
        Some((name, default)) => {
            let default = (!default.is_empty()).then(|| default.to_string());
            (name.trim(), true, default)
        }
        None => (rest, false, None),
    };

    if !is_identifier(name) {
        return Err(malformed("option name must be an identifier"));
    }
    if let Some(alias) = alias {
        if !is_identifier(alias) {
            return Err(malformed("option alias must be an identifier"));
        }
    }

    Ok(OptionSpec {
        name: name.to_string(),
        alias: alias.map(str::to_string),
        takes_value,
        default,
    })
}

fn parse_argument(token: &str) -> Result<ArgumentSpec, GrammarError> {
    let malformed = |reason: &str| GrammarError::Malformed {
        token: format!("{{{token}}}"),
        reason: reason.into(),
    };

    if let Some((name, default)) = token.split_once('=') {
        let name = name.trim();
        if !is_identifier(name) {
            return Err(malformed("argument name must be an identifier"));
        }
        return Ok(ArgumentSpec {
            name: name.to_string(),
            required: false,
            variadic: false,
            default: Some(default.to_string()),
        });
    }

    let mut name = token;
    let mut optional = false;
    let mut variadic = false;
    loop {
        if let Some(stripped) = name.strip_suffix('*') {
            if variadic {
                return Err(malformed("repeated '*' marker"));
            }
            variadic = true;
            name = stripped;
        } else if let Some(stripped) = name.strip_suffix('?') {
            if optional {
                return Err(malformed("repeated '?' marker"));
            }
            optional = true;
            name = stripped;
        } else {
            break;
        }
    }

    if !is_identifier(name) {
        return Err(malformed("argument name must be an identifier"));
    }

    Ok(ArgumentSpec {
        name: name.to_string(),
        required: !optional,
        variadic,
        default: None,
    })
}

fn check_argument_order(existing: &[ArgumentSpec], next: &ArgumentSpec) -> Result<(), GrammarError> {
    if let Some(variadic) = existing.iter().find(|a| a.variadic) {
        return Err(if next.variadic {
            GrammarError::MultipleVariadic {
                first: variadic.name.clone(),
                second: next.name.clone(),
            }
        } else {
            GrammarError::VariadicNotLast {
                name: next.name.clone(),
                variadic: variadic.name.clone(),
            }
        });
    }
    if next.required && existing.iter().any(|a| !a.required) {
        return Err(GrammarError::RequiredAfterOptional {
            name: next.name.clone(),
        });
    }
    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
