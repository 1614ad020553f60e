//! Binding raw user text against a [`ParsedSignature`].

use super::grammar::ParsedSignature;
use crate::domain::value_objects::Value;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Malformed user input. Recoverable: the caller reports it and re-prompts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("missing required argument '{argument}'")]
    MissingRequiredArgument { argument: String },

    #[error("too many arguments (expected at most {expected}, unexpected: {})", .extra.join(" "))]
    TooManyArguments { expected: usize, extra: Vec<String> },

    #[error("unknown option '{option}'")]
    UnknownOption { option: String },

    #[error("option '--{option}' expects a value")]
    MissingOptionValue { option: String },

    #[error("option '--{option}' is a flag and does not take a value")]
    UnexpectedOptionValue { option: String },

    #[error("unterminated quote in input")]
    UnterminatedQuote,
}

/// Values bound to every declared argument and option of a signature.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BoundInput {
    pub arguments: BTreeMap<String, Value>,
    pub options: BTreeMap<String, Value>,
}

impl BoundInput {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options.get(name)
    }

    /// Look up a name among arguments, then options.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.argument(name).or_else(|| self.option(name))
    }

    /// String value of an argument or option, if it is a string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Whether an option is set (flag true, or value non-null).
    pub fn is_set(&self, option: &str) -> bool {
        self.option(option).is_some_and(Value::is_set)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        if self.arguments.contains_key(name) {
            self.arguments.get_mut(name)
        } else {
            self.options.get_mut(name)
        }
    }
}

/// One lexical token of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub text: String,
    /// The token started with a quote, so it is never read as an option.
    pub quoted: bool,
}

/// Split input on whitespace, honouring single and double quotes.
///
/// Inside double quotes a backslash escapes the next character; single
/// quotes are literal.
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, BindError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars();
    let mut current: Option<Token> = None;

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if let Some(token) = current.take() {
                    tokens.push(token);
                }
            }
            '\'' | '"' => {
                let token = current.get_or_insert_with(|| Token {
                    text: String::new(),
                    quoted: true,
                });
                let mut closed = false;
                while let Some(inner) = chars.next() {
                    if inner == c {
                        closed = true;
                        break;
                    }
                    if c == '"' && inner == '\\' {
                        match chars.next() {
                            Some(escaped) => token.text.push(escaped),
                            None => break,
                        }
                    } else {
                        token.text.push(inner);
                    }
                }
                if !closed {
                    return Err(BindError::UnterminatedQuote);
                }
            }
            other => current
                .get_or_insert_with(|| Token {
                    text: String::new(),
                    quoted: false,
                })
                .text
                .push(other),
        }
    }
    if let Some(token) = current {
        tokens.push(token);
    }

    Ok(tokens)
}

/// Bind raw input against a parsed signature.
///
/// Every declared argument and option ends up populated, either with the
/// bound value or with its default:
///
/// - flags default to `false`
/// - value options default to their declared default, or `null`
/// - optional arguments default to their declared default, or `null`
/// - optional variadics default to an empty list
///
/// Options may appear anywhere; `--` ends option parsing.
pub fn bind(signature: &ParsedSignature, input: &str) -> Result<BoundInput, BindError> {
    let mut bound = BoundInput::default();
    for option in &signature.options {
        let value = if option.takes_value {
            option.default.clone().map_or(Value::Null, Value::Str)
        } else {
            Value::Bool(false)
        };
        bound.options.insert(option.name.clone(), value);
    }

    let mut positionals: Vec<String> = Vec::new();
    let mut tokens = tokenize(input)?.into_iter().peekable();
    let mut options_done = false;

    while let Some(token) = tokens.next() {
        if !options_done && !token.quoted {
            if token.text == "--" {
                options_done = true;
                continue;
            }
            if let Some((key, attached)) = option_parts(&token.text) {
                let spec = signature
                    .find_option(key)
                    .ok_or_else(|| BindError::UnknownOption {
                        option: token.text.clone(),
                    })?;

                let value = match (spec.takes_value, attached) {
                    (true, Some(value)) => Value::Str(value.to_string()),
                    (true, None) => match tokens
                        .next_if(|next| next.quoted || option_parts(&next.text).is_none())
                    {
                        Some(next) => Value::Str(next.text),
                        None => {
                            return Err(BindError::MissingOptionValue {
                                option: spec.name.clone(),
                            });
                        }
                    },
                    (false, Some(_)) => {
                        return Err(BindError::UnexpectedOptionValue {
                            option: spec.name.clone(),
                        });
                    }
                    (false, None) => Value::Bool(true),
                };
                bound.options.insert(spec.name.clone(), value);
                continue;
            }
        }
        positionals.push(token.text);
    }

    let mut rest = positionals.into_iter();
    for argument in &signature.arguments {
        let value = if argument.variadic {
            let items: Vec<String> = rest.by_ref().collect();
            if items.is_empty() && argument.required {
                return Err(BindError::MissingRequiredArgument {
                    argument: argument.name.clone(),
                });
            }
            Value::from(items)
        } else {
            match rest.next() {
                Some(text) => Value::Str(text),
                None if argument.required => {
                    return Err(BindError::MissingRequiredArgument {
                        argument: argument.name.clone(),
                    });
                }
                None => argument.default.clone().map_or(Value::Null, Value::Str),
            }
        };
        bound.arguments.insert(argument.name.clone(), value);
    }

    let extra: Vec<String> = rest.collect();
    if !extra.is_empty() {
        return Err(BindError::TooManyArguments {
            expected: signature.arguments.len(),
            extra,
        });
    }

    Ok(bound)
}

/// Split an option token into its key and `=`-attached value.
///
/// `-5` and `-` are positional, so negative numbers pass through.
fn option_parts(text: &str) -> Option<(&str, Option<&str>)> {
    let body = if let Some(long) = text.strip_prefix("--") {
        long
    } else {
        let short = text.strip_prefix('-')?;
        if short.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
            return None;
        }
        short
    };
    if body.is_empty() {
        return None;
    }
    Some(match body.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (body, None),
    })
}
