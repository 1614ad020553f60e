//! Migration statements: one `$table->...;` line per entry.

use super::{CompileContext, Compiler, literal::substitute};
use crate::domain::{entities::Entry, value_objects::Value};

/// Build the migration compiler.
///
/// - default: the kind's statement template (or `$table-><kind>(<args>)`),
///   then one modifier per set option, then `;`
/// - foreign key relations: `foreignId(...)->constrained(...)`
/// - relations without columns on this table: nothing
pub fn migration_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("migration", move |entry| Some(statement(ctx, entry)))
        .with_overrides(ctx.foreign_key_kinds(), move |entry| {
            Some(foreign_key_statement(ctx, entry))
        })
        .suppress(ctx.detached_relation_kinds())
}

/// The default statement for any entry.
pub fn statement(ctx: CompileContext<'_>, entry: &Entry) -> String {
    let lookup = ctx.lookup(entry);
    let mut out = match ctx.templates(entry).and_then(|t| t.statement.as_deref()) {
        Some(template) => substitute(template, &lookup, Value::to_php),
        None => {
            let args: Vec<String> = entry
                .positional_values()
                .filter(|(_, v)| !v.is_null() && v.as_list().is_none_or(|l| !l.is_empty()))
                .map(|(_, v)| v.to_php())
                .collect();
            format!("$table->{}({})", entry.kind(), args.join(", "))
        }
    };

    if let Some(definition) = ctx.catalog.get(entry.kind()) {
        for option in &definition.signature().options {
            let Some(modifier) = ctx.catalog.modifier(&option.name) else {
                continue;
            };
            // a value option set to `false` still carries a value
            let Some(value) = entry
                .bound()
                .option(&option.name)
                .filter(|v| if option.takes_value { !v.is_null() } else { v.is_set() })
            else {
                continue;
            };
            out.push_str(&substitute(
                modifier,
                |name| match name {
                    "value" => Some(value.clone()),
                    other => lookup(other),
                },
                Value::to_php,
            ));
        }
    }

    out.push(';');
    out
}

fn foreign_key_statement(ctx: CompileContext<'_>, entry: &Entry) -> String {
    let column = entry.columns().first().cloned().unwrap_or_default();
    let mut out = format!("$table->foreignId({})", Value::from(column).to_php());
    if entry.is_set("nullable") {
        out.push_str("->nullable()");
    }

    let table = Value::from(ctx.related_table(entry)).to_php();
    match entry.get("owner").filter(|v| v.is_set()) {
        Some(owner) => out.push_str(&format!("->constrained({table}, {})", owner.to_php())),
        None => out.push_str(&format!("->constrained({table})")),
    }
    if entry.is_set("cascade") {
        out.push_str("->cascadeOnDelete()");
    }

    out.push(';');
    out
}

#[cfg(test)]
mod tests {
    use super::super::tests::{Fixture, fixture};

    fn migration(f: &Fixture, lines: &[&str]) -> String {
        let entries = f.collection(lines);
        super::migration_compiler(f.ctx()).compile_all(&entries, "//")
    }

    #[test]
    fn template_arguments_and_modifiers() {
        let f = fixture();
        assert_eq!(
            migration(&f, &["string title 80 --n --q", "decimal price"]),
            "$table->string('title', 80)->nullable()->unique();\n$table->decimal('price', 8, 2);"
        );
    }

    #[test]
    fn value_modifiers_encode_their_value() {
        let f = fixture();
        assert_eq!(
            migration(&f, &["string status --default=draft --comment=\"it's\""]),
            r"$table->string('status')->default('draft')->comment('it\'s');"
        );
    }

    #[test]
    fn typed_value_modifiers_are_bare() {
        let f = fixture();
        assert_eq!(
            migration(&f, &["boolean active --default=false", "decimal price --default=0"]),
            "$table->boolean('active')->default(false);\n\
             $table->decimal('price', 8, 2)->default(0);"
        );
    }

    #[test]
    fn kinds_without_template_use_generic_form() {
        let f = fixture();
        assert_eq!(
            migration(&f, &["char a", "timestamps", "index a"]),
            "$table->char('a');\n$table->timestamps();\n$table->index(['a']);"
        );
    }

    #[test]
    fn foreign_keys_are_constrained() {
        let f = fixture();
        assert_eq!(
            migration(&f, &["belongsTo Category --n --c", "belongsTo User --f=author_id --o=uuid"]),
            "$table->foreignId('category_id')->nullable()->constrained('categories')->cascadeOnDelete();\n\
             $table->foreignId('author_id')->constrained('users', 'uuid');"
        );
    }

    #[test]
    fn detached_relations_emit_nothing() {
        let f = fixture();
        assert_eq!(migration(&f, &["hasMany Comment"]), "//");
    }
}
