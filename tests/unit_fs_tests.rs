//! # File System Module Unit Tests / 文件系统模块单元测试
//!
//! This module contains unit tests for the `infra::fs` module,
//! testing scratch directory creation, fixture seeding and document discovery.
//!
//! 此模块包含 `infra::fs` 模块的单元测试，
//! 测试临时工作目录创建、fixtures 填充和文档发现。

use docsuite::infra::fs::{absolute_path, copy_fixtures, create_scratch_dir, find_doc_files};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// Helper function to create a fixtures directory structure
/// 创建 fixtures 目录结构的辅助函数
fn create_fixture_tree(base_path: &Path) -> std::io::Result<()> {
    // base_path/
    // ├── seed.txt
    // └── data/
    //     └── nested.txt
    fs::create_dir_all(base_path.join("data"))?;
    fs::write(base_path.join("seed.txt"), "seed content")?;
    fs::write(base_path.join("data").join("nested.txt"), "nested content")?;
    Ok(())
}

mod scratch_dir_tests {
    use super::*;

    #[test]
    fn test_create_scratch_dir() {
        let (path, guard) = create_scratch_dir("usage").unwrap();

        assert!(path.is_dir());
        let dir_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(dir_name.starts_with("docsuite_usage_"), "got: {dir_name}");

        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn test_scratch_dir_name_is_sanitized() {
        let (path, _guard) = create_scratch_dir("my doc/with:specials").unwrap();
        let dir_name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(
            dir_name.starts_with("docsuite_my_doc_with_specials_"),
            "got: {dir_name}"
        );
    }

    #[test]
    fn test_scratch_dirs_are_unique() {
        let (first, _g1) = create_scratch_dir("same").unwrap();
        let (second, _g2) = create_scratch_dir("same").unwrap();
        assert_ne!(first, second);
    }
}

mod fixtures_tests {
    use super::*;

    #[test]
    fn test_copy_fixtures_copies_contents_only() {
        let fixtures = tempdir().unwrap();
        create_fixture_tree(fixtures.path()).unwrap();
        let scratch = tempdir().unwrap();

        copy_fixtures(fixtures.path(), scratch.path()).unwrap();

        // The fixture directory itself must not be nested inside the scratch dir.
        assert!(scratch.path().join("seed.txt").is_file());
        assert!(scratch.path().join("data").join("nested.txt").is_file());
        assert_eq!(
            fs::read_to_string(scratch.path().join("seed.txt")).unwrap(),
            "seed content"
        );
    }

    #[test]
    fn test_copy_fixtures_overwrites_existing_files() {
        let fixtures = tempdir().unwrap();
        fs::write(fixtures.path().join("seed.txt"), "new").unwrap();
        let scratch = tempdir().unwrap();
        fs::write(scratch.path().join("seed.txt"), "old").unwrap();

        copy_fixtures(fixtures.path(), scratch.path()).unwrap();

        assert_eq!(
            fs::read_to_string(scratch.path().join("seed.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn test_copy_fixtures_missing_source_is_an_error() {
        let scratch = tempdir().unwrap();
        let result = copy_fixtures(Path::new("/definitely/not/there"), scratch.path());
        assert!(result.is_err());
    }
}

mod discovery_tests {
    use super::*;

    #[test]
    fn test_find_doc_files_scans_docs_and_tests() {
        let project = tempdir().unwrap();
        fs::create_dir_all(project.path().join("docs/sub")).unwrap();
        fs::create_dir_all(project.path().join("tests")).unwrap();
        fs::create_dir_all(project.path().join("src")).unwrap();
        fs::write(project.path().join("docs/usage.txt"), "").unwrap();
        fs::write(project.path().join("docs/sub/deep.md"), "").unwrap();
        fs::write(project.path().join("tests/cli.markdown"), "").unwrap();
        fs::write(project.path().join("src/ignored.txt"), "").unwrap();

        let found = find_doc_files(project.path());

        assert_eq!(
            found,
            vec![
                PathBuf::from("docs/sub/deep.md"),
                PathBuf::from("docs/usage.txt"),
                PathBuf::from("tests/cli.markdown"),
            ]
        );
    }

    #[test]
    fn test_find_doc_files_skips_other_extensions_and_dotfiles() {
        let project = tempdir().unwrap();
        fs::create_dir_all(project.path().join("docs")).unwrap();
        fs::write(project.path().join("docs/notes.rst"), "").unwrap();
        fs::write(project.path().join("docs/.hidden.txt"), "").unwrap();

        assert!(find_doc_files(project.path()).is_empty());
    }

    #[test]
    fn test_find_doc_files_with_no_candidate_dirs() {
        let project = tempdir().unwrap();
        assert!(find_doc_files(project.path()).is_empty());
    }
}

mod path_tests {
    use super::*;

    #[test]
    fn test_absolute_path_resolves_existing_paths() {
        let project = tempdir().unwrap();
        let resolved = absolute_path(project.path()).unwrap();
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_absolute_path_missing_is_an_error() {
        let result = absolute_path(Path::new("/definitely/not/there"));
        assert!(result.is_err());
    }
}
