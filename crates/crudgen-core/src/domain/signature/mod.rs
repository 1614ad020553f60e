//! The signature mini-language.
//!
//! A kind's grammar string (e.g. `{column} {--n|nullable} {--d|default=}`)
//! is parsed once into a [`ParsedSignature`]; user text such as
//! `email --n --default=x` is then bound against it into a [`BoundInput`].

mod binding;
mod grammar;

pub use binding::{BindError, BoundInput, bind};
pub use grammar::{ArgumentSpec, GrammarError, OptionSpec, ParsedSignature, parse_grammar};
