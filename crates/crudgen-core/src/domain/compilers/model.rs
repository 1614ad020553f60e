//! Eloquent model fragments: `$fillable`, `casts()`, `@property` doc lines
//! and relation methods.

use heck::{ToLowerCamelCase, ToUpperCamelCase};

use super::{CompileContext, Compiler, literal::substitute};
use crate::domain::{entities::Entry, value_objects::{ColumnShape, Value}};

const COLLECTION_TYPE: &str = "\\Illuminate\\Database\\Eloquent\\Collection";
const MODEL_TYPE: &str = "\\Illuminate\\Database\\Eloquent\\Model";

// ── $fillable ────────────────────────────────────────────────────────────────

pub fn fillable_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("fillable", |entry| {
        let quoted: Vec<String> = entry
            .columns()
            .iter()
            .map(|c| format!("{},", Value::from(c.as_str()).to_php()))
            .collect();
        (!quoted.is_empty()).then(|| quoted.join("\n"))
    })
    .suppress(ctx.singleton_kinds())
    .suppress(ctx.index_kinds())
    .suppress(ctx.detached_relation_kinds())
}

// ── casts() ──────────────────────────────────────────────────────────────────

pub fn casts_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("casts", move |entry| {
        let template = ctx.templates(entry)?.cast.as_deref()?;
        let cast = substitute(template, ctx.lookup(entry), Value::to_text);
        let lines: Vec<String> = entry
            .columns()
            .iter()
            .map(|c| format!("{} => {},", Value::from(c.as_str()).to_php(), Value::from(cast.as_str()).to_php()))
            .collect();
        (!lines.is_empty()).then(|| lines.join("\n"))
    })
    .suppress(ctx.singleton_kinds())
    .suppress(ctx.index_kinds())
}

// ── @property annotations ────────────────────────────────────────────────────

pub fn properties_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("properties", move |entry| column_properties(ctx, entry))
        .with_overrides(ctx.relation_kinds(), move |entry| relation_properties(ctx, entry))
        .suppress(ctx.index_kinds())
}

fn property(ty: &str, nullable: bool, column: &str) -> String {
    let null = if nullable { "|null" } else { "" };
    format!(" * @property {ty}{null} ${column}")
}

fn column_properties(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let ty = ctx
        .templates(entry)
        .and_then(|t| t.php_type.as_deref())
        .unwrap_or("mixed");
    let nullable = entry.is_set("nullable") || ctx.is_singleton(entry);
    let lines: Vec<String> = entry
        .columns()
        .iter()
        .map(|column| property(ty, nullable, column))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn relation_properties(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let method = relation_method(ctx, entry)?;
    let nullable = entry.is_set("nullable");
    let mut lines = Vec::new();

    let read_type = match ctx.shape(entry) {
        Some(ColumnShape::Morphs) => {
            if let [id, ty] = entry.columns() {
                lines.push(property("int", nullable, id));
                lines.push(property("string", nullable, ty));
            }
            format!("{MODEL_TYPE}|null")
        }
        Some(ColumnShape::ForeignKey) => {
            for column in entry.columns() {
                lines.push(property("int", nullable, column));
            }
            let related = entry.first_argument()?;
            if nullable { format!("{related}|null") } else { related }
        }
        _ if is_many(entry) => format!("{COLLECTION_TYPE}<int, {}>", entry.first_argument()?),
        _ => format!("{}|null", entry.first_argument()?),
    };

    lines.push(format!(" * @property-read {read_type} ${method}"));
    Some(lines.join("\n"))
}

// ── Relation methods ─────────────────────────────────────────────────────────

pub fn relations_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("relations", |_| None)
        .with_overrides(ctx.relation_kinds(), move |entry| relation_block(ctx, entry))
}

/// Relation kinds returning many models (`hasMany`, `belongsToMany`, ...).
fn is_many(entry: &Entry) -> bool {
    entry.kind().ends_with("Many")
}

/// Method name for a relation entry: `user`, `comments`, `commentable`.
pub fn relation_method(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let base = entry.first_argument()?;
    let name = if ctx.shape(entry) != Some(&ColumnShape::Morphs) && is_many(entry) {
        ctx.inflector.plural(&base)
    } else {
        base
    };
    Some(name.to_lower_camel_case())
}

fn relation_block(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let method = relation_method(ctx, entry)?;
    let return_type = entry.kind().to_upper_camel_case();

    let args = match ctx.shape(entry) {
        Some(ColumnShape::Morphs) => Vec::new(),
        Some(ColumnShape::ForeignKey) => {
            let mut args = vec![format!("{}::class", entry.first_argument()?)];
            let owner = entry.get("owner").filter(|v| v.is_set());
            if entry.is_set("foreign") || owner.is_some() {
                let column = entry.columns().first()?;
                args.push(Value::from(column.as_str()).to_php());
            }
            args.extend(owner.map(Value::to_php));
            args
        }
        _ => {
            let mut args = vec![format!("{}::class", entry.first_argument()?)];
            args.extend(
                entry
                    .positional_values()
                    .skip(1)
                    .filter(|(_, v)| !v.is_null())
                    .map(|(_, v)| v.to_php()),
            );
            if let Some(definition) = ctx.catalog.get(entry.kind()) {
                args.extend(
                    definition
                        .signature()
                        .options
                        .iter()
                        .filter(|o| o.takes_value)
                        .filter_map(|o| entry.get(&o.name).filter(|v| v.is_set()))
                        .map(Value::to_php),
                );
            }
            args
        }
    };

    Some(format!(
        "public function {method}(): {return_type}\n{{\n    return $this->{}({});\n}}",
        entry.kind(),
        args.join(", ")
    ))
}
