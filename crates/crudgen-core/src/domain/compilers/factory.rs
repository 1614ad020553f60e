//! Model factory definition: `'<column>' => <faker expression>,` per column.

use super::{CompileContext, Compiler, literal::substitute};
use crate::domain::{entities::Entry, value_objects::Value};

const FALLBACK_FAKER: &str = "fake()->word()";

pub fn factory_compiler<'a>(ctx: CompileContext<'a>) -> Compiler<'a> {
    Compiler::new("factory", move |entry| faker_line(ctx, entry))
        .with_overrides(ctx.foreign_key_kinds(), |entry| {
            let column = entry.columns().first()?;
            let related = entry.first_argument()?;
            Some(format!("{} => {related}::factory(),", Value::from(column.as_str()).to_php()))
        })
        .suppress(ctx.singleton_kinds())
        .suppress(ctx.index_kinds())
        .suppress(ctx.detached_relation_kinds())
        .suppress(ctx.morph_kinds())
}

fn faker_line(ctx: CompileContext<'_>, entry: &Entry) -> Option<String> {
    let column = entry.columns().first()?;
    let expression = match ctx.templates(entry).and_then(|t| t.faker.as_deref()) {
        Some(template) => substitute(template, ctx.lookup(entry), Value::to_php),
        None => FALLBACK_FAKER.to_string(),
    };
    Some(format!("{} => {expression},", Value::from(column.as_str()).to_php()))
}

#[cfg(test)]
mod tests {
    use super::super::tests::fixture;

    fn factory(lines: &[&str]) -> String {
        let f = fixture();
        let entries = f.collection(lines);
        super::factory_compiler(f.ctx()).compile_all(&entries, "//")
    }

    #[test]
    fn faker_expressions_with_arguments() {
        assert_eq!(
            factory(&["text body", "enum status draft published", "decimal price 10 4"]),
            "'body' => fake()->paragraph(),\n\
             'status' => fake()->randomElement(['draft', 'published']),\n\
             'price' => fake()->randomFloat(4, 0, 1000),"
        );
    }

    #[test]
    fn missing_faker_falls_back() {
        assert_eq!(factory(&["char code"]), "'code' => fake()->word(),");
    }

    #[test]
    fn foreign_keys_use_related_factory() {
        assert_eq!(factory(&["belongsTo User"]), "'user_id' => User::factory(),");
    }

    #[test]
    fn skips_everything_without_a_fillable_value() {
        assert_eq!(
            factory(&["timestamps", "morphs taggable", "hasMany Comment", "morphTo commentable"]),
            "//"
        );
    }
}
