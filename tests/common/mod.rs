// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Creates an empty project directory for a test run.
pub fn setup_project() -> TempDir {
    tempdir().expect("Failed to create temporary directory")
}

/// Writes a documentation file under the project root, creating parent
/// directories as needed.
pub fn write_doc(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create doc directory");
    }
    fs::write(&path, content).expect("Failed to write doc file");
    path
}

/// Writes a `DocSuite.toml` under the project root.
pub fn write_config(root: &Path, content: &str) -> PathBuf {
    let path = root.join("DocSuite.toml");
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// A minimal passing document: one example, one line of output.
pub const PASSING_DOC: &str = "A greeting example.\n\n  $ echo hello\n  hello\n";

/// A document whose expected output does not match what the command prints.
pub const FAILING_DOC: &str = "A broken example.\n\n  $ echo hello\n  goodbye\n";
