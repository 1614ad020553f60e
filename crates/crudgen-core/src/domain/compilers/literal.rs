//! Template substitution.
//!
//! Templates are plain text with three constructs:
//!
//! - `%name` is replaced by the encoded value of `name`. Unknown names are
//!   left verbatim.
//! - `[ ... ]` is an optional section, emitted only when every placeholder
//!   inside it resolves to a non-null value. Sections may nest.
//! - `\[`, `\]`, `\%` and `\\` produce the literal character.
//!
//! ```text
//! $table->string(%column[, %length])
//! ```
//!
//! renders `$table->string('title')` when `length` is null and
//! `$table->string('title', 80)` when it is 80.

use crate::domain::value_objects::Value;

/// Substitute placeholders in `template`.
///
/// `lookup` resolves a name to its value (or `None` if unknown); `encode`
/// turns a value into output text, e.g. [`Value::to_php`] or
/// [`Value::to_text`].
pub fn substitute<L, E>(template: &str, lookup: L, encode: E) -> String
where
    L: Fn(&str) -> Option<Value>,
    E: Fn(&Value) -> String,
{
    let chars: Vec<char> = template.chars().collect();
    let mut pos = 0;
    let (out, _) = render(&chars, &mut pos, false, &lookup, &encode);
    out
}

/// Render until the end of input, or until the closing `]` of a section.
/// Returns the text and whether every placeholder resolved to non-null.
fn render<L, E>(chars: &[char], pos: &mut usize, in_section: bool, lookup: &L, encode: &E) -> (String, bool)
where
    L: Fn(&str) -> Option<Value>,
    E: Fn(&Value) -> String,
{
    let mut out = String::new();
    let mut complete = true;

    while let Some(&c) = chars.get(*pos) {
        *pos += 1;
        match c {
            '\\' => match chars.get(*pos) {
                Some(&escaped @ ('[' | ']' | '%' | '\\')) => {
                    out.push(escaped);
                    *pos += 1;
                }
                _ => out.push('\\'),
            },
            '[' => {
                let (section, section_complete) = render(chars, pos, true, lookup, encode);
                if section_complete {
                    out.push_str(&section);
                }
            }
            ']' if in_section => return (out, complete),
            '%' => {
                let start = *pos;
                while chars
                    .get(*pos)
                    .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '_')
                {
                    *pos += 1;
                }
                let name: String = chars[start..*pos].iter().collect();
                if name.is_empty() {
                    out.push('%');
                    continue;
                }
                match lookup(&name) {
                    Some(value) => {
                        if value.is_null() {
                            complete = false;
                        }
                        out.push_str(&encode(&value));
                    }
                    None => {
                        complete = false;
                        out.push('%');
                        out.push_str(&name);
                    }
                }
            }
            other => out.push(other),
        }
    }

    (out, complete)
}
