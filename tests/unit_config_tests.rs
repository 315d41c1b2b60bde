//! # Config Module Unit Tests / Config 模块单元测试
//!
//! This module contains unit tests for the `config.rs` module,
//! testing the `DocCase` and `DocSuiteConfig` structures and their
//! serialization/deserialization.
//!
//! 此模块包含 `config.rs` 模块的单元测试，
//! 测试 `DocCase` 和 `DocSuiteConfig` 结构体及其序列化/反序列化。

use docsuite::core::config::{DocCase, DocSuiteConfig, load_config};
use std::path::{Path, PathBuf};

mod doc_case_tests {
    use super::*;

    #[test]
    fn test_doc_case_deserialization_minimal() {
        let toml_str = r#"
            file = "docs/usage.txt"
        "#;

        let case: DocCase = toml::from_str(toml_str).unwrap();

        assert_eq!(case.file, "docs/usage.txt");
        assert!(case.name.is_none());
        assert!(case.shell.is_none());
        assert!(case.timeout_secs.is_none());
        assert!(case.retries.is_none());
        assert!(case.allow_failure.is_empty());
        assert!(case.arch.is_empty());
        assert!(case.fixtures.is_none());
        assert!(case.env.is_empty());
    }

    #[test]
    fn test_doc_case_deserialization_full() {
        let toml_str = r#"
            file = "docs/usage.txt"
            name = "usage"
            shell = "bash"
            timeout_secs = 30
            retries = 2
            allow_failure = ["windows", "macos"]
            arch = ["x86_64"]
            fixtures = "tests/data"

            [env]
            GREETING = "hello"
        "#;

        let case: DocCase = toml::from_str(toml_str).unwrap();

        assert_eq!(case.file, "docs/usage.txt");
        assert_eq!(case.name, Some("usage".to_string()));
        assert_eq!(case.shell, Some("bash".to_string()));
        assert_eq!(case.timeout_secs, Some(30));
        assert_eq!(case.retries, Some(2));
        assert_eq!(case.allow_failure, vec!["windows", "macos"]);
        assert_eq!(case.arch, vec!["x86_64"]);
        assert_eq!(case.fixtures, Some("tests/data".to_string()));
        assert_eq!(case.env.get("GREETING"), Some(&"hello".to_string()));
    }

    #[test]
    fn test_doc_case_missing_file_is_an_error() {
        let toml_str = r#"
            name = "no-file"
        "#;

        let result: Result<DocCase, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_doc_case_unknown_field_is_an_error() {
        // A misspelled option must fail loudly, not silently drop the setting.
        let toml_str = r#"
            file = "docs/usage.txt"
            timeot_secs = 1
        "#;

        let result: Result<DocCase, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_effective_name_defaults_to_file_stem() {
        let case = DocCase::for_file(Path::new("docs/getting-started.md"));
        assert_eq!(case.effective_name(), "getting-started");
    }

    #[test]
    fn test_effective_name_prefers_explicit_name() {
        let case = DocCase {
            name: Some("intro".to_string()),
            ..DocCase::for_file(Path::new("docs/getting-started.md"))
        };
        assert_eq!(case.effective_name(), "intro");
    }

    #[test]
    fn test_doc_case_serialization() {
        let case = DocCase {
            timeout_secs: Some(60),
            ..DocCase::for_file(Path::new("docs/usage.txt"))
        };

        let toml_str = toml::to_string(&case).unwrap();

        assert!(toml_str.contains("file = \"docs/usage.txt\""));
        assert!(toml_str.contains("timeout_secs = 60"));
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_config_default_language() {
        let toml_str = r#"
            [[docs]]
            file = "docs/usage.txt"
        "#;

        let config: DocSuiteConfig = toml::from_str(toml_str).unwrap();

        // Should default to "en" when language is not specified
        assert_eq!(config.language, "en");
        assert_eq!(config.docs.len(), 1);
        assert_eq!(config.docs[0].file, "docs/usage.txt");
    }

    #[test]
    fn test_config_explicit_language() {
        let toml_str = r#"
            language = "zh-CN"

            [[docs]]
            file = "docs/usage.txt"
        "#;

        let config: DocSuiteConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.language, "zh-CN");
        assert_eq!(config.docs.len(), 1);
    }

    #[test]
    fn test_config_multiple_docs() {
        let toml_str = r#"
            language = "en"

            [[docs]]
            file = "docs/usage.txt"

            [[docs]]
            file = "docs/advanced.md"
            retries = 1

            [[docs]]
            file = "docs/windows.txt"
            allow_failure = ["windows"]
            arch = ["x86_64", "aarch64"]
        "#;

        let config: DocSuiteConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.docs.len(), 3);
        assert_eq!(config.docs[1].retries, Some(1));
        assert_eq!(config.docs[2].allow_failure, vec!["windows"]);
        assert_eq!(config.docs[2].arch, vec!["x86_64", "aarch64"]);
    }

    #[test]
    fn test_config_empty_docs() {
        let toml_str = r#"
            language = "en"
            docs = []
        "#;

        let config: DocSuiteConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.language, "en");
        assert!(config.docs.is_empty());
    }

    #[test]
    fn test_config_roundtrip_serialization() {
        let original = DocSuiteConfig {
            language: "zh-CN".to_string(),
            docs: vec![DocCase {
                name: Some("roundtrip".to_string()),
                timeout_secs: Some(10),
                retries: Some(2),
                allow_failure: vec!["windows".to_string()],
                ..DocCase::for_file(Path::new("docs/roundtrip.txt"))
            }],
        };

        let toml_str = toml::to_string_pretty(&original).unwrap();
        let deserialized: DocSuiteConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(original.language, deserialized.language);
        assert_eq!(original.docs.len(), deserialized.docs.len());

        let orig = &original.docs[0];
        let deser = &deserialized.docs[0];
        assert_eq!(orig.file, deser.file);
        assert_eq!(orig.name, deser.name);
        assert_eq!(orig.timeout_secs, deser.timeout_secs);
        assert_eq!(orig.retries, deser.retries);
        assert_eq!(orig.allow_failure, deser.allow_failure);
    }

    #[test]
    fn test_config_invalid_toml() {
        let invalid_toml = r#"
            language = "en"
            [[docs]
            file = "docs/usage.txt"
        "#;

        let result: Result<DocSuiteConfig, _> = toml::from_str(invalid_toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_top_level_field_is_an_error() {
        let toml_str = r#"
            langauge = "en"

            [[docs]]
            file = "docs/usage.txt"
        "#;

        let result: Result<DocSuiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_doc_field_is_an_error() {
        let toml_str = r#"
            [[docs]]
            file = "docs/usage.txt"
            timeot_secs = 1
        "#;

        let result: Result<DocSuiteConfig, _> = toml::from_str(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_for_files() {
        let files = vec![
            PathBuf::from("docs/one.txt"),
            PathBuf::from("docs/two.md"),
        ];
        let config = DocSuiteConfig::for_files(&files);

        assert_eq!(config.language, "en");
        assert_eq!(config.docs.len(), 2);
        assert_eq!(config.docs[0].file, "docs/one.txt");
        assert_eq!(config.docs[1].effective_name(), "two");
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DocSuite.toml");
        std::fs::write(
            &path,
            "language = \"en\"\n\n[[docs]]\nfile = \"docs/usage.txt\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.docs.len(), 1);
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_config_with_chinese_content() {
        let toml_str = r#"
            language = "zh-CN"

            [[docs]]
            file = "docs/用法.txt"
            name = "用法示例"
        "#;

        let config: DocSuiteConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.docs[0].file, "docs/用法.txt");
        assert_eq!(config.docs[0].effective_name(), "用法示例");
    }
}
