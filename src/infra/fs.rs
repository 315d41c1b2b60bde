//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as creating scratch directories, seeding fixtures, and
//! discovering documentation files.
//!
//! 此模块提供文件系统操作的实用功能，
//! 如创建临时工作目录、填充 fixtures 和发现文档文件。

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, copy};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Creates a unique scratch directory for a document run.
///
/// # Arguments
/// * `case_name` - Name of the document case, used in the directory prefix
///
/// # Returns
/// The scratch path and the `TempDir` guard that deletes it on drop
pub fn create_scratch_dir(case_name: &str) -> Result<(PathBuf, TempDir)> {
    let sanitized_name = case_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();

    let temp_dir = tempfile::Builder::new()
        .prefix(&format!("docsuite_{sanitized_name}_"))
        .tempdir()
        .or_else(|_| tempdir())
        .context("Failed to create scratch directory")?;

    let path = temp_dir.path().to_path_buf();
    Ok((path, temp_dir))
}

/// Copies the contents of a fixtures directory into a scratch directory.
///
/// # Arguments
/// * `from` - Fixtures directory
/// * `to` - Scratch directory the contents land in
pub fn copy_fixtures(from: &Path, to: &Path) -> Result<()> {
    let mut options = CopyOptions::new();
    options.overwrite = true;
    options.content_only = true;
    copy(from, to, &options)
        .with_context(|| format!("Failed to copy fixtures from {}", from.display()))?;
    Ok(())
}

/// Discovers candidate documentation files for the init wizard.
///
/// Looks for `.txt` and `.md` files under `docs/` and `tests/` (recursively)
/// relative to `root`, returning paths relative to `root` in sorted order.
///
/// 为初始化向导发现候选文档文件。
/// 在 `root` 下的 `docs/` 和 `tests/` 目录中递归查找 `.txt` 和 `.md` 文件，
/// 按排序顺序返回相对于 `root` 的路径。
pub fn find_doc_files(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for dir in ["docs", "tests"] {
        collect_doc_files(&root.join(dir), root, &mut found);
    }
    found.sort();
    found
}

fn collect_doc_files(dir: &Path, root: &Path, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        if path.is_dir() {
            collect_doc_files(&path, root, found);
        } else if matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("txt") | Some("md") | Some("markdown")
        ) {
            let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            found.push(relative);
        }
    }
}

/// Gets the absolute path from a potentially relative path.
///
/// # Arguments
/// * `path` - Path to canonicalize
///
/// # Returns
/// Canonicalized absolute path, or an error if the path doesn't exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).with_context(|| format!("Failed to resolve path: {}", path.display()))
}
