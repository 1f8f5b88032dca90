//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

/// Run tessera in `dir` and return (stdout, stderr, success)
fn run_tessera(dir: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_tessera"))
        .current_dir(dir)
        .env_remove("TESSERA_LOG")
        .args(args)
        .output()
        .expect("Failed to execute tessera");

    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, success) = run_tessera(dir, args);
    assert!(success, "{:?} failed: {}", args, stderr);
    stdout
}

// ============================================================================
// Repository Initialization Tests
// ============================================================================

#[test]
fn test_cli_init_creates_layout() {
    let dir = tempdir().unwrap();

    let stdout = run_ok(dir.path(), &["init"]);

    assert_eq!(stdout.trim(), "Initialized git directory");
    assert!(dir.path().join(".git/objects").is_dir());
    assert!(dir.path().join(".git/refs").is_dir());
    assert_eq!(
        fs::read_to_string(dir.path().join(".git/HEAD")).unwrap(),
        "ref: refs/heads/main\n"
    );
}

#[test]
fn test_cli_init_twice_fails() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);

    let (_stdout, stderr, success) = run_tessera(dir.path(), &["init"]);
    assert!(!success, "second init should fail");
    assert!(stderr.contains("already initialized"));
}

#[test]
fn test_cli_init_json() {
    let dir = tempdir().unwrap();
    let stdout = run_ok(dir.path(), &["-f", "json", "init", "--compression", "zstd"]);

    assert!(stdout.contains("\"status\":\"ok\""));
    let config = fs::read_to_string(dir.path().join(".git/tessera.json")).unwrap();
    assert!(config.contains("zstd"));
}

// ============================================================================
// Object Commands
// ============================================================================

#[test]
fn test_cli_hash_object_and_cat_file() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("hello.txt"), "world\n\n").unwrap();

    let id = run_ok(dir.path(), &["hash-object", "-w", "hello.txt"]);
    let id = id.trim();
    assert_eq!(id.len(), 40);

    // Payload comes back byte-for-byte, trailing newlines included
    assert_eq!(run_ok(dir.path(), &["cat-file", "-p", id]), "world\n\n");
    assert_eq!(run_ok(dir.path(), &["cat-file", "-t", id]).trim(), "blob");
    assert_eq!(run_ok(dir.path(), &["cat-file", "-s", id]).trim(), "7");

    // Abbreviated ids resolve
    assert_eq!(run_ok(dir.path(), &["cat-file", "-p", &id[..8]]), "world\n\n");
}

#[test]
fn test_cli_hash_object_without_write() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("hello.txt"), "world").unwrap();

    let id = run_ok(dir.path(), &["hash-object", "hello.txt"]);
    assert_eq!(id.trim(), "04fea06420ca60892f73becee3614f6d023a4b7f");

    let (_stdout, _stderr, success) = run_tessera(dir.path(), &["cat-file", "-p", id.trim()]);
    assert!(!success, "unwritten object should not be readable");
}

#[test]
fn test_cli_cat_file_missing_object() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);

    let (_stdout, stderr, success) = run_tessera(
        dir.path(),
        &["cat-file", "-p", "0123456789abcdef0123456789abcdef01234567"],
    );
    assert!(!success);
    assert!(stderr.contains("Object not found"));
}

#[test]
fn test_cli_cat_file_requires_mode() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);

    let (_stdout, _stderr, success) = run_tessera(dir.path(), &["cat-file", "abcd"]);
    assert!(!success);
}

// ============================================================================
// Tree Commands
// ============================================================================

#[test]
fn test_cli_write_tree_and_ls_tree() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("a.txt"), "a").unwrap();
    fs::create_dir(dir.path().join("b")).unwrap();
    fs::write(dir.path().join("b").join("c.txt"), "c").unwrap();

    let root = run_ok(dir.path(), &["write-tree"]);
    let root = root.trim();

    let names = run_ok(dir.path(), &["ls-tree", "--name-only", root]);
    assert_eq!(names, "a.txt\nb\n");

    let listing = run_ok(dir.path(), &["ls-tree", root]);
    let lines: Vec<_> = listing.lines().collect();
    assert!(lines[0].starts_with("100644 blob "));
    assert!(lines[0].ends_with("\ta.txt"));
    assert!(lines[1].starts_with("040000 tree "));

    let recursive = run_ok(dir.path(), &["ls-tree", "-r", "--name-only", root]);
    assert_eq!(recursive, "a.txt\nb/c.txt\n");
}

#[test]
fn test_cli_write_tree_empty_repository() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);

    let root = run_ok(dir.path(), &["write-tree"]);
    assert_eq!(root.trim(), "4b825dc642cb6eb9a060e54bf8d69288fbee4904");
}

#[test]
fn test_cli_ls_tree_rejects_blob() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("f"), "f").unwrap();
    let blob = run_ok(dir.path(), &["hash-object", "-w", "f"]);

    let (_stdout, stderr, success) = run_tessera(dir.path(), &["ls-tree", blob.trim()]);
    assert!(!success);
    assert!(stderr.contains("expected a tree"));
}

#[test]
fn test_cli_ls_tree_json() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("hello.txt"), "world").unwrap();
    let root = run_ok(dir.path(), &["write-tree"]);

    let stdout = run_ok(dir.path(), &["-f", "json", "ls-tree", root.trim()]);
    assert!(stdout.contains("\"count\":1"));
    assert!(stdout.contains("\"name\":\"hello.txt\""));
    assert!(stdout.contains("04fea06420ca60892f73becee3614f6d023a4b7f"));
}

#[test]
fn test_cli_explicit_git_dir() {
    let dir = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let git_dir = dir.path().join(".git");
    let git_dir = git_dir.to_str().unwrap();
    run_ok(elsewhere.path(), &["-g", git_dir, "init"]);
    fs::write(dir.path().join("x"), "x").unwrap();

    let root = run_ok(elsewhere.path(), &["-g", git_dir, "write-tree"]);
    let names = run_ok(elsewhere.path(), &["-g", git_dir, "ls-tree", "--name-only", root.trim()]);
    assert_eq!(names, "x\n");
}

#[test]
fn test_cli_git_dir_as_current_directory() {
    let dir = tempdir().unwrap();
    run_ok(dir.path(), &["init"]);
    fs::write(dir.path().join("x"), "x").unwrap();
    fs::create_dir_all(dir.path().join("sub").join(".git")).unwrap();
    fs::write(dir.path().join("sub").join(".git").join("y"), "y").unwrap();

    // `-g .` has no file name; the metadata dir is still left out
    let git_dir = dir.path().join(".git");
    let root = run_ok(&git_dir, &["-g", ".", "write-tree"]);
    let names = run_ok(&git_dir, &["-g", ".", "ls-tree", "-r", "--name-only", root.trim()]);
    assert_eq!(names, "sub/.git/y\nx\n");
}

#[test]
fn test_cli_outside_repository() {
    let dir = tempdir().unwrap();
    let (_stdout, stderr, success) = run_tessera(dir.path(), &["write-tree"]);
    assert!(!success);
    assert!(stderr.contains("Not a repository"));
}
