//! Blade view fragments: form fields, index table headers and cells.
//!
//! Only user-facing columns produce output. Singletons, indexes, morph
//! columns and relations without a local column are skipped.

use heck::{ToLowerCamelCase, ToTitleCase};

use super::{CompileContext, Compiler};
use crate::domain::{entities::Entry, value_objects::Value};

const DEFAULT_WIDGET: &str = "text";

fn user_facing<'a>(compiler: Compiler<'a>, ctx: CompileContext<'a>) -> Compiler<'a> {
    compiler
        .suppress(ctx.singleton_kinds())
        .suppress(ctx.index_kinds())
        .suppress(ctx.detached_relation_kinds())
        .suppress(ctx.morph_kinds())
}

/// Display label of a foreign key: the related model, title-cased.
fn related_label(entry: &Entry) -> String {
    entry
        .first_argument()
        .map(|m| m.to_title_case())
        .unwrap_or_else(|| entry.label().to_string())
}

// ── Form fields ──────────────────────────────────────────────────────────────

pub fn form_fields_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    let compiler = Compiler::new("form_fields", move |entry| {
        let column = entry.columns().first()?;
        let widget = ctx
            .templates(entry)
            .and_then(|t| t.widget.as_deref())
            .unwrap_or(DEFAULT_WIDGET);
        Some(field(widget, column, entry.label(), entry.get("values")))
    })
    .with_overrides(ctx.foreign_key_kinds(), move |entry| {
        let column = entry.columns().first()?;
        let options = ctx
            .inflector
            .plural(&entry.first_argument()?)
            .to_lower_camel_case();
        Some(format!(
            "<x-form.select name=\"{column}\" label=\"{}\" :options=\"${options}\" />",
            related_label(entry)
        ))
    });
    user_facing(compiler, ctx)
}

fn field(widget: &str, column: &str, label: &str, values: Option<&Value>) -> String {
    match widget {
        "textarea" => format!("<x-form.textarea name=\"{column}\" label=\"{label}\" />"),
        "checkbox" => format!("<x-form.checkbox name=\"{column}\" label=\"{label}\" />"),
        "select" => {
            let options = values.map_or_else(|| "[]".to_string(), Value::to_php);
            format!("<x-form.select name=\"{column}\" label=\"{label}\" :options=\"{options}\" />")
        }
        input => format!("<x-form.input type=\"{input}\" name=\"{column}\" label=\"{label}\" />"),
    }
}

// ── Index table ──────────────────────────────────────────────────────────────

pub fn table_headers_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    let compiler = Compiler::new("table_headers", |entry| Some(format!("<th>{}</th>", entry.label())))
        .with_overrides(ctx.foreign_key_kinds(), |entry| {
            Some(format!("<th>{}</th>", related_label(entry)))
        });
    user_facing(compiler, ctx)
}

pub fn table_cells_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    let compiler = Compiler::new("table_cells", move |entry| {
        let column = entry.columns().first()?;
        Some(format!("<td>{{{{ ${}->{column} }}}}</td>", ctx.names.variable))
    });
    user_facing(compiler, ctx)
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture;
    use super::*;

    fn run(build: for<'a> fn(CompileContext<'a>) -> Compiler<'a>, lines: &[&str]) -> String {
        let f = fixture();
        let entries = f.collection(lines);
        build(f.ctx()).compile_all(&entries, "")
    }

    const LINES: &[&str] = &[
        "belongsTo User",
        "string title",
        "text body",
        "boolean published",
        "enum status draft published",
        "decimal price",
        "morphs taggable",
        "timestamps",
        "index title",
    ];

    #[test]
    fn form_fields_pick_widgets() {
        assert_eq!(
            run(form_fields_compiler, LINES),
            "<x-form.select name=\"user_id\" label=\"User\" :options=\"$users\" />\n\
             <x-form.input type=\"text\" name=\"title\" label=\"Title\" />\n\
             <x-form.textarea name=\"body\" label=\"Body\" />\n\
             <x-form.checkbox name=\"published\" label=\"Published\" />\n\
             <x-form.select name=\"status\" label=\"Status\" :options=\"['draft', 'published']\" />\n\
             <x-form.input type=\"number\" name=\"price\" label=\"Price\" />"
        );
    }

    #[test]
    fn table_headers_and_cells() {
        assert_eq!(
            run(table_headers_compiler, LINES),
            "<th>User</th>\n<th>Title</th>\n<th>Body</th>\n<th>Published</th>\n<th>Status</th>\n<th>Price</th>"
        );
        assert_eq!(
            run(table_cells_compiler, &["string title", "belongsTo User"]),
            "<td>{{ $post->title }}</td>\n<td>{{ $post->user_id }}</td>"
        );
    }

    #[test]
    fn nothing_user_facing_yields_placeholder() {
        let f = fixture();
        let entries = f.collection(&["timestamps", "hasMany Comment"]);
        assert_eq!(form_fields_compiler(f.ctx()).compile_all(&entries, "{{-- none --}}"), "{{-- none --}}");
    }
}
