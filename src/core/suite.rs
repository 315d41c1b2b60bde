//! # Suite Construction Module / 套件构建模块
//!
//! A [`Suite`] is the collection of examples gathered from one documentation
//! file. Building a suite is the startup step of a run: an unreadable or
//! malformed document aborts here, before anything is executed.
//!
//! [`Suite`] 是从单个文档文件收集的示例集合。
//! 构建套件是运行的启动步骤：不可读或格式错误的文档会在此中止，
//! 不会执行任何内容。

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::parser::{self, DocFormat, Example};
use crate::infra::t;

/// The examples collected from one documentation file.
/// 从一个文档文件收集的示例。
#[derive(Debug, Clone)]
pub struct Suite {
    /// The suite name, derived from the file stem.
    /// 套件名称，来自文件名主干。
    pub name: String,
    /// The document the suite was built from.
    /// 构建套件所用的文档。
    pub path: PathBuf,
    /// The examples, in document order.
    /// 按文档顺序排列的示例。
    pub examples: Vec<Example>,
}

impl Suite {
    /// Builds a suite from a documentation file.
    ///
    /// The format is chosen from the file extension. Errors if the file
    /// cannot be read or does not parse.
    ///
    /// 从文档文件构建套件。格式由扩展名决定。
    /// 文件无法读取或解析失败时返回错误。
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| t!("suite.doc_read_failed", path = path.display()).to_string())?;
        let examples = parser::parse_document(&text, DocFormat::for_path(path))
            .with_context(|| t!("suite.doc_parse_failed", path = path.display()).to_string())?;

        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("suite")
            .to_string();

        Ok(Self {
            name,
            path: path.to_path_buf(),
            examples,
        })
    }

    /// `true` when the document contained no examples.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of examples in the suite.
    pub fn len(&self) -> usize {
        self.examples.len()
    }
}
