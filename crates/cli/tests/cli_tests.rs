//! End-to-end tests driving the `graphql` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const SCHEMA: &str = r"
type Query { user(id: ID!): User }
type User { id: ID!, name: String }
";

const CONFIG: &str = r"
schema: schema.graphql
extensions:
  resolvers:
    output: generated/resolvers.ts
    models:
      User: UserModel
    modelsModule: ./models
";

fn setup(dir: &Path) {
    fs::write(dir.join("schema.graphql"), SCHEMA).unwrap();
    fs::write(dir.join(".graphqlrc.yml"), CONFIG).unwrap();
}

fn graphql(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_graphql"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn test_generate_then_check() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    let check = graphql(dir.path(), &["check"]);
    assert_eq!(check.status.code(), Some(1), "missing output is stale");

    let generate = graphql(dir.path(), &["generate"]);
    assert!(generate.status.success(), "{generate:?}");
    let written = fs::read_to_string(dir.path().join("generated/resolvers.ts")).unwrap();
    assert!(written.contains("UserModel"));

    let check = graphql(dir.path(), &["check"]);
    assert_eq!(check.status.code(), Some(0), "{check:?}");

    fs::write(
        dir.path().join("schema.graphql"),
        format!("{SCHEMA}\ntype Extra {{ id: ID! }}\n"),
    )
    .unwrap();
    let check = graphql(dir.path(), &["check"]);
    assert_eq!(check.status.code(), Some(1));
}

#[test]
fn test_generate_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    let output = graphql(dir.path(), &["generate", "--stdout"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Code generated by graphql-codegen"));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn test_missing_config_exits_with_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = graphql(
        dir.path(),
        &["--config", "missing.yml", "generate", "--stdout"],
    );
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_invalid_schema_exits_with_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());
    fs::write(dir.path().join("schema.graphql"), "type Query { me: Ghost }").unwrap();

    let output = graphql(dir.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Ghost"), "{stderr}");
}
