//! Naming port: English plural/singular forms of model and relation names.
//!
//! The core only consumes this contract. `crudgen_adapters::EnglishInflector`
//! is the production implementation; tests use the generated `MockInflector`.

use heck::{ToLowerCamelCase, ToSnakeCase};

/// Pluralisation service.
///
/// Implementations must preserve the case style of the input word
/// (`Category` → `Categories`, `person` → `people`).
#[cfg_attr(test, mockall::automock)]
pub trait Inflector: Send + Sync {
    fn plural(&self, word: &str) -> String;

    /// Inverse of [`plural`](Inflector::plural). Used to suggest a model
    /// name when a table-style name was typed.
    fn singular(&self, word: &str) -> String;
}

/// Names derived from a model name, shared by every compiler.
///
/// | Field | `BlogPost` |
/// |-------|------------|
/// | `model` | `BlogPost` |
/// | `table` | `blog_posts` |
/// | `variable` | `blogPost` |
/// | `collection` | `blogPosts` |
/// | `route` | `blog-posts` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub model: String,
    pub table: String,
    pub variable: String,
    pub collection: String,
    pub route: String,
}

impl ResourceNames {
    pub fn new(model: &str, inflector: &dyn Inflector) -> Self {
        let plural = inflector.plural(model);
        Self {
            model: model.to_string(),
            table: table_name(model, inflector),
            variable: model.to_lower_camel_case(),
            collection: plural.to_lower_camel_case(),
            route: plural.to_snake_case().replace('_', "-"),
        }
    }
}

/// The conventional table name of a model: plural snake case.
pub fn table_name(model: &str, inflector: &dyn Inflector) -> String {
    inflector.plural(model).to_snake_case()
}
