//! The built-in entry kind catalog.
//!
//! Laravel-flavoured column, relation and index kinds with their migration
//! statements, request rules, factory expressions, casts, doc types and form
//! widgets. Catalog manifests loaded by
//! [`DirectoryCatalog`](crate::catalog_loader::DirectoryCatalog) are merged
//! over this table.
//!
//! Kinds without a `statement` use the generic `$table-><kind>(<args>)` form,
//! which already covers most of the schema builder.

use tracing::instrument;

use crudgen_core::{
    application::{ApplicationError, CatalogSource},
    domain::{
        ColumnShape, DomainError, EntryKindCatalog, EntryKindDefinition,
        EntryKindDefinitionBuilder, KindGroup, KindRole,
    },
};

/// Option flags shared by every plain column kind.
const MODIFIERS: &str = "{--n|nullable} {--q|unique} {--i|index} {--d|default=} {--c|comment=}";

/// Numeric columns additionally accept `--unsigned`.
const NUMERIC_MODIFIERS: &str =
    "{--n|nullable} {--q|unique} {--i|index} {--u|unsigned} {--d|default=} {--c|comment=}";

const CARBON: &str = "\\Illuminate\\Support\\Carbon";

// ── Public API ────────────────────────────────────────────────────────────────

/// [`CatalogSource`] for the embedded catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn describe(&self) -> String {
        "builtin".to_string()
    }

    fn load(&self) -> Result<EntryKindCatalog, ApplicationError> {
        builtin_catalog().map_err(|e| ApplicationError::CatalogUnavailable {
            source_name: self.describe(),
            reason: e.to_string(),
        })
    }
}

/// Build the built-in catalog.
///
/// Fails only if a definition below is itself invalid, which the tests guard.
#[instrument]
pub fn builtin_catalog() -> Result<EntryKindCatalog, DomainError> {
    let builder = columns()
        .into_iter()
        .chain(relations())
        .chain(indexes())
        .try_fold(EntryKindCatalog::builder(), |catalog, kind| {
            catalog.add(kind.build()?)
        })?;

    Ok(builder
        .modifier("nullable", "->nullable()")
        .modifier("unique", "->unique()")
        .modifier("index", "->index()")
        .modifier("unsigned", "->unsigned()")
        .modifier("default", "->default(%value)")
        .modifier("comment", "->comment(%value)")
        .build())
}

// ── Columns ───────────────────────────────────────────────────────────────────

/// A plain column kind: `{column}`, extra positional arguments, modifiers.
fn column(kind: &str, arguments: &str, modifiers: &str) -> EntryKindDefinitionBuilder {
    let grammar = if arguments.is_empty() {
        format!("{{column}} {modifiers}")
    } else {
        format!("{{column}} {arguments} {modifiers}")
    };
    EntryKindDefinition::builder(kind, KindGroup::Column)
        .signature(grammar)
        .rule("column", "identifier")
}

fn text(kind: &str) -> EntryKindDefinitionBuilder {
    column(kind, "", MODIFIERS)
        .request_rule("string")
        .faker("fake()->paragraph()")
        .php_type("string")
        .widget("textarea")
}

fn integer(kind: &str, faker: &str) -> EntryKindDefinitionBuilder {
    column(kind, "", NUMERIC_MODIFIERS)
        .rule("default", "nullable|integer")
        .request_rule("integer")
        .faker(faker)
        .cast("integer")
        .php_type("int")
        .widget("number")
}

fn floating(kind: &str) -> EntryKindDefinitionBuilder {
    column(kind, "", NUMERIC_MODIFIERS)
        .rule("default", "nullable|numeric")
        .request_rule("numeric")
        .faker("fake()->randomFloat(2, 0, 1000)")
        .cast("float")
        .php_type("float")
        .widget("number")
}

fn morphs(kind: &str) -> EntryKindDefinitionBuilder {
    EntryKindDefinition::builder(kind, KindGroup::Column)
        .signature("{column}")
        .rule("column", "identifier")
        .shape(ColumnShape::Morphs)
}

fn singleton(kind: &str, role: KindRole, columns: &[&str]) -> EntryKindDefinitionBuilder {
    EntryKindDefinition::builder(kind, KindGroup::Column)
        .role(role)
        .shape(ColumnShape::fixed(columns.iter().copied()))
}

fn columns() -> Vec<EntryKindDefinitionBuilder> {
    vec![
        column("string", "{length?}", MODIFIERS)
            .rule("length", "nullable|integer")
            .statement("$table->string(%column[, %length])")
            .request_rule("string[|max:%length]")
            .faker("fake()->sentence(3)")
            .php_type("string")
            .widget("text"),
        column("char", "{length?}", MODIFIERS)
            .rule("length", "nullable|integer")
            .statement("$table->char(%column[, %length])")
            .request_rule("string[|size:%length]")
            .faker("fake()->lexify('????')")
            .php_type("string")
            .widget("text"),
        text("text"),
        text("mediumText"),
        text("longText"),
        integer("integer", "fake()->numberBetween(0, 1000)"),
        integer("bigInteger", "fake()->numberBetween(0, 100000)"),
        integer("smallInteger", "fake()->numberBetween(0, 1000)"),
        integer("tinyInteger", "fake()->numberBetween(0, 100)"),
        integer("unsignedBigInteger", "fake()->numberBetween(1, 100000)"),
        column("decimal", "{total=8} {places=2}", NUMERIC_MODIFIERS)
            .rule("total", "integer")
            .rule("places", "integer")
            .rule("default", "nullable|numeric")
            .request_rule("numeric")
            .faker("fake()->randomFloat(%places, 0, 1000)")
            .cast("decimal:%places")
            .php_type("string")
            .widget("number"),
        floating("float"),
        floating("double"),
        column("boolean", "", MODIFIERS)
            .rule("default", "nullable|boolean")
            .request_rule("boolean")
            .faker("fake()->boolean()")
            .cast("boolean")
            .php_type("bool")
            .widget("checkbox"),
        column("date", "", MODIFIERS)
            .request_rule("date")
            .faker("fake()->date()")
            .cast("date")
            .php_type(CARBON)
            .widget("date"),
        column("dateTime", "", MODIFIERS)
            .request_rule("date")
            .faker("fake()->dateTime()")
            .cast("datetime")
            .php_type(CARBON)
            .widget("datetime-local"),
        column("timestamp", "", MODIFIERS)
            .request_rule("date")
            .faker("fake()->dateTime()")
            .cast("datetime")
            .php_type(CARBON)
            .widget("datetime-local"),
        column("time", "", MODIFIERS)
            .request_rule("date_format:H:i:s")
            .faker("fake()->time()")
            .php_type("string")
            .widget("time"),
        column("year", "", MODIFIERS)
            .rule("default", "nullable|integer")
            .request_rule("integer|digits:4")
            .faker("fake()->year()")
            .cast("integer")
            .php_type("int")
            .widget("number"),
        column("json", "", MODIFIERS)
            .request_rule("array")
            .faker("\\[\\]")
            .cast("array")
            .php_type("array")
            .widget("textarea"),
        column("uuid", "", MODIFIERS)
            .request_rule("uuid")
            .faker("fake()->uuid()")
            .php_type("string"),
        column("ulid", "", MODIFIERS)
            .request_rule("ulid")
            .faker("(string) \\Illuminate\\Support\\Str::ulid()")
            .php_type("string"),
        column("ipAddress", "", MODIFIERS)
            .request_rule("ip")
            .faker("fake()->ipv4()")
            .php_type("string"),
        column("enum", "{values*}", MODIFIERS)
            .rule("values", "list|string")
            .statement("$table->enum(%column, %values)")
            .request_rule("in:%values")
            .faker("fake()->randomElement(%values)")
            .php_type("string")
            .widget("select"),
        morphs("morphs"),
        morphs("nullableMorphs"),
        morphs("uuidMorphs"),
        singleton("rememberToken", KindRole::Plain, &["remember_token"]).php_type("string"),
        singleton("timestamps", KindRole::Timestamps, &["created_at", "updated_at"])
            .php_type(CARBON),
        singleton("timestampsTz", KindRole::Timestamps, &["created_at", "updated_at"])
            .php_type(CARBON),
        singleton("softDeletes", KindRole::SoftDeletes, &["deleted_at"]).php_type(CARBON),
        singleton("softDeletesTz", KindRole::SoftDeletes, &["deleted_at"]).php_type(CARBON),
    ]
}

// ── Relations ─────────────────────────────────────────────────────────────────

fn relation(kind: &str, grammar: &str) -> EntryKindDefinitionBuilder {
    EntryKindDefinition::builder(kind, KindGroup::Relation)
        .signature(grammar)
        .rule("related", "model")
}

fn relations() -> Vec<EntryKindDefinitionBuilder> {
    vec![
        relation(
            "belongsTo",
            "{related} {--f|foreign=} {--o|owner=} {--n|nullable} {--c|cascade}",
        )
        .shape(ColumnShape::ForeignKey)
        .rule("foreign", "nullable|identifier")
        .rule("owner", "nullable|identifier"),
        relation("hasOne", "{related} {--f|foreign=}").rule("foreign", "nullable|identifier"),
        relation("hasMany", "{related} {--f|foreign=}").rule("foreign", "nullable|identifier"),
        relation("belongsToMany", "{related} {--t|table=}").rule("table", "nullable|identifier"),
        EntryKindDefinition::builder("morphTo", KindGroup::Relation)
            .signature("{name}")
            .rule("name", "identifier")
            .shape(ColumnShape::Morphs)
            .statement("$table->morphs(%name)"),
        relation("morphOne", "{related} {name}").rule("name", "identifier"),
        relation("morphMany", "{related} {name}").rule("name", "identifier"),
    ]
}

// ── Indexes ───────────────────────────────────────────────────────────────────

fn index(kind: &str, named: bool) -> EntryKindDefinitionBuilder {
    let builder = EntryKindDefinition::builder(kind, KindGroup::Index).rule("columns", "identifier");
    if named {
        builder
            .signature("{columns*} {--n|name=}")
            .rule("name", "nullable|identifier")
            .statement(format!("$table->{kind}(%columns[, %name])"))
    } else {
        builder.signature("{columns*}")
    }
}

fn indexes() -> Vec<EntryKindDefinitionBuilder> {
    vec![
        index("index", true),
        index("unique", true),
        index("fullText", false),
        index("spatialIndex", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnglishInflector;
    use crudgen_core::domain::{
        CompileContext, Entry, EntryCollection, ResourceNames, compilers::migration,
    };

    fn migration_of(lines: &[(&str, &str)]) -> String {
        let catalog = builtin_catalog().unwrap();
        let inflector = EnglishInflector::new();
        let names = ResourceNames::new("Post", &inflector);
        let mut entries = EntryCollection::new();
        for (kind, raw) in lines {
            entries.add(Entry::create(kind, raw, &catalog).unwrap()).unwrap();
        }
        let ctx = CompileContext::new(&catalog, &inflector, &names);
        migration::migration_compiler(ctx).compile_all(&entries, "//")
    }

    #[test]
    fn builtin_catalog_builds() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), columns().len() + relations().len() + indexes().len());
        assert_eq!(catalog.modifier("nullable"), Some("->nullable()"));
    }

    #[test]
    fn groups_are_partitioned() {
        let catalog = builtin_catalog().unwrap();
        let relations = catalog.all_kinds(Some(KindGroup::Relation));
        assert_eq!(
            relations,
            ["belongsTo", "hasOne", "hasMany", "belongsToMany", "morphTo", "morphOne", "morphMany"]
        );
        assert_eq!(
            catalog.all_kinds(Some(KindGroup::Index)),
            ["index", "unique", "fullText", "spatialIndex"]
        );
        assert!(catalog.all_kinds(Some(KindGroup::Column)).contains(&"string"));
    }

    #[test]
    fn column_arguments_are_coerced() {
        let catalog = builtin_catalog().unwrap();
        let entry = Entry::create("decimal", "price 10 4 --u", &catalog).unwrap();
        assert_eq!(entry.get("total"), Some(&crudgen_core::domain::Value::Int(10)));
        assert!(entry.is_set("unsigned"));
    }

    #[test]
    fn typed_defaults_are_emitted_bare() {
        assert_eq!(
            migration_of(&[
                ("boolean", "active --default=false"),
                ("integer", "views --default=0"),
                ("decimal", "price --default=9.5"),
                ("string", "status --default=draft"),
            ]),
            "$table->boolean('active')->default(false);\n\
             $table->integer('views')->default(0);\n\
             $table->decimal('price', 8, 2)->default(9.5);\n\
             $table->string('status')->default('draft');"
        );
    }

    #[test]
    fn mistyped_default_is_rejected() {
        let catalog = builtin_catalog().unwrap();
        assert!(matches!(
            Entry::create("boolean", "active --default=maybe", &catalog),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            Entry::create("integer", "views --default=many", &catalog),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn bad_names_are_rejected() {
        let catalog = builtin_catalog().unwrap();
        assert!(matches!(
            Entry::create("string", "Email", &catalog),
            Err(DomainError::Validation { .. })
        ));
        assert!(matches!(
            Entry::create("belongsTo", "user", &catalog),
            Err(DomainError::Validation { .. })
        ));
    }

    #[test]
    fn source_loads_builtin() {
        let catalog = BuiltinCatalog.load().unwrap();
        assert!(catalog.contains("morphTo"));
        assert_eq!(BuiltinCatalog.describe(), "builtin");
    }
}
