//! Form request validation rules: `'<column>' => '<rules>',` per column.

use super::{CompileContext, Compiler, literal::substitute};
use crate::domain::{entities::Entry, value_objects::Value};

pub fn request_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("rules", move |entry| column_rules(ctx, entry))
        .with_overrides(ctx.foreign_key_kinds(), move |entry| foreign_key_rule(ctx, entry))
        .suppress(ctx.singleton_kinds())
        .suppress(ctx.index_kinds())
        .suppress(ctx.detached_relation_kinds())
}

fn presence(entry: &Entry) -> &'static str {
    if entry.is_set("nullable") {
        "nullable"
    } else {
        "required"
    }
}

fn rule_line(column: &str, parts: &[String]) -> String {
    format!(
        "{} => {},",
        Value::from(column).to_php(),
        Value::from(parts.join("|")).to_php()
    )
}

fn column_rules(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let kind_rule = ctx
        .templates(entry)
        .and_then(|t| t.rule.as_deref())
        .map(|template| substitute(template, ctx.lookup(entry), Value::to_text))
        .filter(|rule| !rule.is_empty());

    let lines: Vec<String> = entry
        .columns()
        .iter()
        .map(|column| {
            let mut parts = vec![presence(entry).to_string()];
            parts.extend(kind_rule.clone());
            if entry.is_set("unique") {
                parts.push(format!("unique:{},{column}", ctx.names.table));
            }
            rule_line(column, &parts)
        })
        .collect();

    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn foreign_key_rule(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let column = entry.columns().first()?;
    let owner = entry
        .get("owner")
        .filter(|v| v.is_set())
        .map_or_else(|| "id".to_string(), Value::to_text);
    let parts = [
        presence(entry).to_string(),
        format!("exists:{},{owner}", ctx.related_table(entry)),
    ];
    Some(rule_line(column, &parts))
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture;

    fn rules(lines: &[&str]) -> String {
        let f = fixture();
        let entries = f.collection(lines);
        super::request_compiler(f.ctx()).compile_all(&entries, "// none")
    }

    #[test]
    fn presence_kind_rule_and_unique() {
        assert_eq!(
            rules(&["string title 80 --q", "text body --n"]),
            "'title' => 'required|string|max:80|unique:posts,title',\n'body' => 'nullable|string',"
        );
    }

    #[test]
    fn optional_rule_sections_collapse() {
        assert_eq!(rules(&["string slug"]), "'slug' => 'required|string',");
    }

    #[test]
    fn enum_values_join_into_in_rule() {
        assert_eq!(
            rules(&["enum status draft published"]),
            "'status' => 'required|in:draft,published',"
        );
    }

    #[test]
    fn foreign_keys_check_existence() {
        assert_eq!(
            rules(&["belongsTo User --n"]),
            "'user_id' => 'nullable|exists:users,id',"
        );
    }

    #[test]
    fn singletons_indexes_and_detached_relations_are_skipped() {
        assert_eq!(
            rules(&["string title", "timestamps", "softDeletes", "rememberToken", "hasMany Comment", "index title"]),
            "'title' => 'required|string',"
        );
        assert_eq!(rules(&["timestamps"]), "// none");
    }
}
