//! # Error Handling Integration Tests / 错误处理集成测试
//!
//! This module contains integration tests for error handling scenarios,
//! testing various failure modes and edge cases.
//!
//! 此模块包含错误处理场景的集成测试，
//! 测试各种失败模式和边界情况。

mod common;

use assert_cmd::prelude::*;
use common::{PASSING_DOC, setup_project, write_config, write_doc};
use predicates::prelude::*;
use std::process::Command;

fn docsuite() -> Command {
    Command::cargo_bin("docsuite").unwrap()
}

mod config_error_tests {
    use super::*;

    #[test]
    fn test_invalid_toml_syntax() {
        let project = setup_project();
        write_config(
            project.path(),
            "language = \"en\"\n[[docs]\nfile = \"docs/usage.txt\"\n",
        );

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse the configuration"));
    }

    #[test]
    fn test_doc_entry_without_file_field() {
        let project = setup_project();
        write_config(project.path(), "[[docs]]\nname = \"nameless\"\n");

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse the configuration"));
    }

    #[test]
    fn test_missing_config_file() {
        let project = setup_project();

        docsuite()
            .current_dir(project.path())
            .args(["run", "--config", "nowhere.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("nowhere.toml"));
    }

    #[test]
    fn test_missing_project_dir() {
        let project = setup_project();
        write_doc(project.path(), "docs/usage.txt", PASSING_DOC);
        write_config(project.path(), "[[docs]]\nfile = \"docs/usage.txt\"\n");

        docsuite()
            .current_dir(project.path())
            .args(["run", "--project-dir", "does-not-exist"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("does-not-exist"));
    }

    #[test]
    fn test_empty_docs_list_is_not_an_error() {
        let project = setup_project();
        write_config(project.path(), "docs = []\n");

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::contains("No documents to run."));
    }
}

mod startup_error_tests {
    use super::*;

    /// A single broken document aborts the whole run before anything
    /// executes, even when other documents are fine.
    ///
    /// 单个损坏的文档会在执行任何内容之前中止整个运行，
    /// 即使其他文档没有问题。
    #[test]
    fn test_one_broken_document_aborts_everything() {
        let project = setup_project();
        write_doc(project.path(), "docs/good.txt", PASSING_DOC);
        write_doc(project.path(), "docs/bad.txt", "  [1]\n");
        write_config(
            project.path(),
            "[[docs]]\nfile = \"docs/good.txt\"\n\n[[docs]]\nfile = \"docs/bad.txt\"\n",
        );

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("bad.txt"))
            // No suite started, so no summary was printed.
            .stdout(predicate::str::contains("Doc Suite Summary").not());
    }

    #[test]
    fn test_unterminated_markdown_fence() {
        let project = setup_project();
        write_doc(project.path(), "docs/bad.md", "```console\n$ echo hi\nhi\n");
        write_config(project.path(), "[[docs]]\nfile = \"docs/bad.md\"\n");

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .failure()
            .stderr(predicate::str::contains("unterminated code fence"));
    }
}

mod sharding_error_tests {
    use super::*;

    #[test]
    fn test_runner_index_without_total_is_rejected_by_clap() {
        let project = setup_project();

        docsuite()
            .current_dir(project.path())
            .args(["run", "--runner-index", "0"])
            .assert()
            .failure();
    }

    #[test]
    fn test_total_runners_without_index_is_rejected_by_clap() {
        let project = setup_project();

        docsuite()
            .current_dir(project.path())
            .args(["run", "--total-runners", "2"])
            .assert()
            .failure();
    }
}

mod runtime_error_tests {
    use super::*;

    #[test]
    fn test_unspawnable_shell_override() {
        let project = setup_project();
        write_doc(project.path(), "docs/usage.txt", PASSING_DOC);
        write_config(
            project.path(),
            "[[docs]]\nfile = \"docs/usage.txt\"\nshell = \"this-shell-does-not-exist-12345\"\n",
        );

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .failure()
            .stdout(predicate::str::contains("UNEXPECTED FAILURE DETECTED"));
    }

    #[cfg(unix)]
    #[test]
    fn test_allowed_failure_does_not_fail_the_run() {
        let project = setup_project();
        write_doc(project.path(), "docs/flaky.txt", common::FAILING_DOC);
        write_config(
            project.path(),
            &format!(
                "[[docs]]\nfile = \"docs/flaky.txt\"\nallow_failure = [\"{}\"]\n",
                std::env::consts::OS
            ),
        );

        docsuite()
            .current_dir(project.path())
            .arg("run")
            .assert()
            .success()
            .stdout(predicate::str::contains("ALL DOC SUITES PASSED"));
    }
}
