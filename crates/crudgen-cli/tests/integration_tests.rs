//! Integration tests for crudgen-cli: the binary end to end.

use std::fs;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the developer's own config files and `.env`.
fn crudgen(temp: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("crudgen");
    cmd.current_dir(temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .env("HOME", temp.path())
        .env_remove("RUST_LOG")
        .env_remove("NO_COLOR");
    cmd
}

fn write_money_manifest(temp: &TempDir) -> std::path::PathBuf {
    let dir = temp.path().join("kinds");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("money.toml"),
        r#"
[[kinds]]
kind      = "money"
group     = "column"
signature = "{column} {--n|nullable}"
columns   = "argument"
statement = "$table->decimal(%column, 12, 2)"
rule      = "numeric"

[kinds.rules]
column = "identifier"
"#,
    )
    .unwrap();
    dir
}

// ── help / version ────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("kinds"))
        .stdout(predicate::str::contains("EXAMPLES"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_prints_help() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp).assert().failure().code(2);
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn test_generate_migration() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args([
            "generate",
            "Post",
            "-e",
            "string title",
            "-e",
            "text body --n",
            "-e",
            "belongsTo User",
            "-a",
            "migration",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Post (posts)"))
        .stdout(predicate::str::contains("$table->string('title');"))
        .stdout(predicate::str::contains("$table->text('body')->nullable();"))
        .stdout(predicate::str::contains("$table->foreignId('user_id')"))
        .stdout(predicate::str::contains("rules").not());
}

#[test]
fn test_generate_from_entries_file() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("post.toml"),
        "entries = [\"string title\", \"\", \"timestamps\"]\n",
    )
    .unwrap();

    crudgen(&temp)
        .args(["generate", "Post", "--from", "post.toml", "-a", "fillable"])
        .assert()
        .success()
        .stdout(predicate::str::contains("'title'"))
        .stdout(predicate::str::contains("created_at").not());
}

#[test]
fn test_generate_skips_rejected_entries() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args([
            "generate",
            "Post",
            "-e",
            "strng title",
            "-e",
            "string title",
            "-a",
            "migration",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipped 'strng title'"))
        .stdout(predicate::str::contains("$table->string('title');"));
}

#[test]
fn test_generate_strict_fails_on_unknown_kind() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["generate", "Post", "--strict", "-e", "strng title"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown entry kind 'strng'"));
}

#[test]
fn test_generate_empty_artifact_uses_placeholder() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args([
            "generate",
            "Post",
            "-a",
            "relations",
            "--placeholder",
            "// nothing here",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("// nothing here"));
}

#[test]
fn test_generate_json_output() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args([
            "--output-format",
            "json",
            "generate",
            "BlogPost",
            "-e",
            "string title",
            "-a",
            "fillable",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"model\": \"BlogPost\""))
        .stdout(predicate::str::contains("\"table\": \"blog_posts\""))
        .stdout(predicate::str::contains("\"artifact\": \"fillable\""));
}

#[test]
fn test_generate_quiet_still_prints_content() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["-q", "generate", "Post", "-e", "string title", "-a", "migration"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$table->string('title');"))
        .stdout(predicate::str::contains("Post (posts)").not());
}

#[test]
fn test_generate_unknown_artifact() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["generate", "Post", "-a", "routes"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown artifact 'routes'"))
        .stderr(predicate::str::contains("migration"));
}

#[test]
fn test_generate_invalid_model_name() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["generate", "posts", "-e", "string title"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid model name 'posts'"));
}

#[test]
fn test_generate_with_catalog_directory() {
    let temp = TempDir::new().unwrap();
    let kinds = write_money_manifest(&temp);

    crudgen(&temp)
        .args(["generate", "Product", "-e", "money price", "-a", "migration", "--catalog"])
        .arg(&kinds)
        .assert()
        .success()
        .stdout(predicate::str::contains("$table->decimal('price', 12, 2);"));
}

#[test]
fn test_catalog_directory_from_config_file() {
    let temp = TempDir::new().unwrap();
    let kinds = write_money_manifest(&temp);
    fs::write(
        temp.path().join(".crudgen.toml"),
        format!("[catalog]\ndir = {:?}\n", kinds.display().to_string()),
    )
    .unwrap();

    crudgen(&temp)
        .args(["kinds", "--group", "column"])
        .assert()
        .success()
        .stdout(predicate::str::contains("money"));
}

#[test]
fn test_missing_catalog_directory_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["kinds", "--catalog", "does-not-exist"])
        .assert()
        .failure()
        .code(4);
}

// ── kinds / check ─────────────────────────────────────────────────────────────

#[test]
fn test_kinds_lists_every_group() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .arg("kinds")
        .assert()
        .success()
        .stdout(predicate::str::contains("column kinds:"))
        .stdout(predicate::str::contains("relation kinds:"))
        .stdout(predicate::str::contains("index kinds:"))
        .stdout(predicate::str::contains("belongsTo"));
}

#[test]
fn test_kinds_group_filter() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["ls", "--group", "relation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hasMany"))
        .stdout(predicate::str::contains("column kinds:").not());
}

#[test]
fn test_check_reports_binding() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["check", "decimal price 10 2 --unsigned"])
        .assert()
        .success()
        .stdout(predicate::str::contains("price (column decimal)"))
        .stdout(predicate::str::contains("--unsigned = true"));
}

#[test]
fn test_check_json_output() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["--output-format", "json", "check", "string email --unique"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"string\""))
        .stdout(predicate::str::contains("\"group\": \"column\""));
}

#[test]
fn test_check_unknown_kind_exit_code() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["check", "blob data"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::contains("unknown entry kind 'blob'"));
}

// ── config / init / completions ───────────────────────────────────────────────

#[test]
fn test_config_env_override() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .env("CRUDGEN_GENERATE__PLACEHOLDER", "// empty")
        .args(["config", "get", "generate.placeholder"])
        .assert()
        .success()
        .stdout(predicate::str::contains("generate.placeholder = // empty"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["config", "get", "nope"])
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_init_local_then_refuses_to_overwrite() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp).args(["init", "--local"]).assert().success();

    let written = fs::read_to_string(temp.path().join(".crudgen.toml")).unwrap();
    assert!(written.contains("placeholder"));

    crudgen(&temp)
        .args(["init", "--local"])
        .assert()
        .success()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_shell_completions() {
    let temp = TempDir::new().unwrap();
    crudgen(&temp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("crudgen"));
}
