//! # Configuration Module / 配置模块
//!
//! Loading and shape of the `DocSuite.toml` configuration file: the list of
//! documents to run, plus per-document execution options.
//!
//! `DocSuite.toml` 配置文件的加载和结构：要运行的文档列表，
//! 以及每个文档的执行选项。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A single document entry in the configuration. Each `DocCase` names one
/// documentation file and the options its examples run under.
/// 配置中的单个文档条目。每个 `DocCase` 指定一个文档文件
/// 及其示例运行时的选项。
///
/// Unknown fields are rejected so a misspelled option surfaces as a config
/// error instead of being silently ignored.
/// 未知字段会被拒绝，拼写错误的选项会作为配置错误显示，而不是被静默忽略。
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocCase {
    /// Path to the documentation file, relative to the project directory.
    /// Tilde and environment variables are expanded.
    /// 文档文件的路径，相对于项目目录。支持波浪号和环境变量展开。
    pub file: String,
    /// Display name for the case. Defaults to the file stem.
    /// 用例的显示名称。默认为文件名主干。
    #[serde(default)]
    pub name: Option<String>,
    /// Shell used to run examples, overriding the platform default
    /// (`sh -c` on Unix, `cmd /C` on Windows). Split with shell rules,
    /// so embedded arguments are allowed, e.g. `"bash --posix"`.
    /// 运行示例所用的 shell，覆盖平台默认值。
    #[serde(default)]
    pub shell: Option<String>,
    /// An optional timeout in seconds covering the whole document run.
    /// 覆盖整个文档运行的可选超时时间（秒）。
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// The number of times to re-run a failed document before reporting it as
    /// failed. Timeouts are not retried.
    /// 文档失败后重试的次数。超时不重试。
    #[serde(default)]
    pub retries: Option<u8>,
    /// Operating systems (e.g. "windows", "linux") on which this document is
    /// allowed to fail without failing the overall run.
    /// 允许此文档失败而不影响整体运行的操作系统列表。
    #[serde(default)]
    pub allow_failure: Vec<String>,
    /// CPU architectures this document runs on. Empty means all.
    /// 此文档运行的 CPU 架构列表。空表示全部。
    #[serde(default)]
    pub arch: Vec<String>,
    /// Optional directory whose contents are copied into the scratch
    /// directory before the examples run.
    /// 可选目录，其内容在示例运行前被复制到临时工作目录中。
    #[serde(default)]
    pub fixtures: Option<String>,
    /// Extra environment variables for every example in the document.
    /// 文档中每个示例的额外环境变量。
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
}

impl DocCase {
    /// Builds a minimal case for a document given on the command line.
    pub fn for_file(file: &Path) -> Self {
        Self {
            file: file.display().to_string(),
            ..Self::default()
        }
    }

    /// The name the case is reported under.
    pub fn effective_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => Path::new(&self.file)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or("suite")
                .to_string(),
        }
    }
}

impl Default for DocCase {
    fn default() -> Self {
        Self {
            file: String::new(),
            name: None,
            shell: None,
            timeout_secs: None,
            retries: None,
            allow_failure: vec![],
            arch: vec![],
            fixtures: None,
            env: BTreeMap::new(),
        }
    }
}

/// The entire configuration, loaded from a TOML file.
/// 从 TOML 文件加载的完整配置。
#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DocSuiteConfig {
    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 运行器输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// The documents to run.
    /// 要运行的文档。
    #[serde(default)]
    pub docs: Vec<DocCase>,
}

impl DocSuiteConfig {
    /// Builds an ad-hoc configuration for documents given on the command
    /// line, bypassing `DocSuite.toml`.
    pub fn for_files(files: &[std::path::PathBuf]) -> Self {
        Self {
            language: default_language(),
            docs: files.iter().map(|file| DocCase::for_file(file)).collect(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

/// Loads the configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<DocSuiteConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: DocSuiteConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
