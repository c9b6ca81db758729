use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// An endpoint nothing listens on.
const DEAD_ENDPOINT: &str = "http://127.0.0.1:9/graphql";

fn shelf_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("shelf"));
    cmd.env_remove("SHELF_ENDPOINT").env_remove("RUST_LOG");
    cmd
}

/// A temp dir with `shelf init` already run in it
fn initialized_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    shelf_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();
    temp_dir
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    shelf_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL bookshelf"));
}

#[test]
fn test_version() {
    shelf_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("shelf"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    shelf_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    let config = std::fs::read_to_string(temp_dir.path().join(".shelf.toml")).unwrap();
    assert!(config.contains("poll_interval_ms = 5000"));
    assert!(config.contains("http://localhost:5173"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let temp_dir = initialized_dir();

    shelf_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_invalid_config_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join(".shelf.toml"),
        "[client]\nendpoint = \"not a url\"\n",
    )
    .unwrap();

    shelf_cmd()
        .args(["query", "{ allBooks { id } }"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid client endpoint"));
}

// =============================================================================
// Schema
// =============================================================================

#[test]
fn test_schema_sdl() {
    let temp_dir = TempDir::new().unwrap();

    shelf_cmd()
        .args(["schema", "--sdl"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("allBooks: [Book!]!"))
        .stdout(predicate::str::contains(
            "createBook(title: String!, author: String!, content: String!): Book!",
        ))
        .stdout(predicate::str::contains("id: ID!"));
}

// =============================================================================
// Local query / mutate
// =============================================================================

#[test]
fn test_mutate_then_query() {
    let temp_dir = initialized_dir();

    let mutation = r#"createBook(title: "Dune", author: "Herbert", content: "Desert planet saga") {
        id title
    }"#;

    shelf_cmd()
        .args(["mutate", mutation])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Dune""#));

    assert!(temp_dir.path().join("shelf.db").exists());

    shelf_cmd()
        .args(["query", "{ allBooks { title author content } }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""author": "Herbert""#))
        .stdout(predicate::str::contains("Desert planet saga"));
}

#[test]
fn test_mutate_duplicate_title() {
    let temp_dir = initialized_dir();
    let mutation =
        r#"createBook(title: "Dune", author: "X", content: "Y, at least 10 chars") { id }"#;

    shelf_cmd()
        .args(["mutate", mutation])
        .current_dir(temp_dir.path())
        .assert()
        .success();

    shelf_cmd()
        .args(["mutate", mutation])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Validation failed: Title has already been taken",
        ))
        .stdout(predicate::str::contains("VALIDATION_ERROR"));
}

#[test]
fn test_query_with_variables() {
    let temp_dir = initialized_dir();

    let mutation = r#"mutation Add($t: String!) {
        createBook(title: $t, author: "A", content: "Long enough content") { title }
    }"#;

    shelf_cmd()
        .args(["query", mutation, "--variables", r#"{"t": "Emma"}"#])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""title": "Emma""#));
}

#[test]
fn test_query_rejects_bad_variables() {
    let temp_dir = initialized_dir();

    shelf_cmd()
        .args(["query", "{ allBooks { id } }", "--variables", "[1, 2]"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variables must be a JSON object"));
}

// =============================================================================
// Client commands
// =============================================================================

#[test]
fn test_create_short_content_rejected_before_network() {
    let temp_dir = TempDir::new().unwrap();

    // Nothing listens on the endpoint, so reaching it would report a network error.
    shelf_cmd()
        .args(["--endpoint", DEAD_ENDPOINT])
        .args(["create", "Dune", "--author", "Herbert", "--content", "short"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Content must be at least 10 characters",
        ))
        .stderr(predicate::str::contains("Could not reach").not());
}

#[test]
fn test_create_reports_every_invalid_field() {
    let temp_dir = TempDir::new().unwrap();
    let long_title = "x".repeat(101);

    shelf_cmd()
        .args(["--endpoint", DEAD_ENDPOINT])
        .args(["create", &long_title, "-a", "", "-c", "Long enough"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Title must be at most 100 characters",
        ))
        .stderr(predicate::str::contains("Author is required"));
}

#[test]
fn test_books_unreachable_server() {
    let temp_dir = TempDir::new().unwrap();

    shelf_cmd()
        .args(["--endpoint", DEAD_ENDPOINT, "books"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Could not reach the bookshelf server",
        ));
}

#[test]
fn test_invalid_endpoint_flag() {
    shelf_cmd()
        .args(["--endpoint", "nope", "books"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid client endpoint"));
}
