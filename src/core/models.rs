//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout docsuite.
//! It includes models for suite results, failure reasons, and the scratch
//! directory a document's examples execute in.
//!
//! 此模块定义了 docsuite 中使用的核心数据结构。
//! 它包括套件结果、失败原因以及文档示例执行所在的临时工作目录的模型。

use crate::core::config::DocCase;
use crate::infra::t;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

/// Enumerates the possible reasons for a document suite failure.
/// This helps in categorizing errors for reporting and handling.
/// 枚举文档套件失败的可能原因。
/// 这有助于对错误进行分类，以便报告和处理。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum FailureReason {
    /// An example's output did not match the document.
    /// 示例的输出与文档不匹配。
    Mismatch,
    /// An example exited with a status other than the one the document declares.
    /// 示例的退出状态与文档声明的不同。
    ExitStatus,
    /// The document run exceeded its configured timeout.
    /// 文档运行超出了其配置的超时时间。
    Timeout,
    /// An example's command could not be spawned at all.
    /// 示例的命令根本无法启动。
    Spawn,
    /// The runner itself failed (scratch dir, fixtures, task panic).
    /// 运行器本身失败（临时目录、fixtures、任务 panic）。
    Harness,
}

/// Represents the final result of running one document suite.
/// This enum captures all possible outcomes, including success,
/// various types of failures, and skipped documents.
///
/// 表示运行单个文档套件的最终结果。
/// 此枚举捕获所有可能的结果，包括成功、各种类型的失败和被跳过的文档。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SuiteResult {
    /// Every example in the document passed.
    /// 文档中的每个示例都通过了。
    Passed {
        /// The document case that was executed / 执行的文档用例
        case: DocCase,
        /// Informational output from the run / 运行的信息输出
        output: String,
        /// The time taken to run the document / 运行文档所花费的时间
        duration: Duration,
        /// The number of attempts it took to pass (1 means first try).
        /// 通过所需的尝试次数（1 表示第一次尝试就通过）。
        retries: u8,
    },
    /// The document failed.
    /// 文档运行失败。
    Failed {
        /// The document case that failed / 失败的文档用例
        case: DocCase,
        /// The rendered failure report (command, expected vs. actual)
        /// 渲染后的失败报告（命令、预期与实际输出）
        output: String,
        /// The specific reason for the failure / 失败的具体原因
        reason: FailureReason,
        /// The time taken before the failure occurred / 失败发生前所花费的时间
        duration: Duration,
    },
    /// The document was skipped (platform constraints or a cancelled run).
    /// 文档被跳过（平台约束或运行被取消）。
    Skipped,
}

impl SuiteResult {
    /// Checks if a result is a failure that was not explicitly allowed.
    /// A failure is "unexpected" if it's a `Failed` variant and the current OS
    /// is not in the case's `allow_failure` list.
    pub fn is_unexpected_failure(&self) -> bool {
        match self {
            SuiteResult::Failed { case, .. } => {
                !case.allow_failure.iter().any(|s| s == std::env::consts::OS)
            }
            _ => false, // Only failures can be unexpected.
        }
    }

    /// Checks if the result is a failure that was explicitly allowed for the current platform.
    pub fn is_allowed_failure(&self) -> bool {
        match self {
            SuiteResult::Failed { case, .. } => {
                case.allow_failure.iter().any(|s| s == std::env::consts::OS)
            }
            _ => false,
        }
    }

    /// Checks if the result is any kind of failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, SuiteResult::Failed { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SuiteResult::Failed { reason, .. } if *reason == FailureReason::Timeout)
    }

    /// Gets the appropriate CSS class for the suite status.
    pub fn get_status_class(&self) -> &str {
        match self {
            SuiteResult::Passed { .. } => "status-Passed",
            SuiteResult::Failed { reason, .. } => {
                if self.is_allowed_failure() {
                    "status-Allowed-Failure"
                } else if *reason == FailureReason::Timeout {
                    "status-Timeout"
                } else {
                    "status-Failed"
                }
            }
            SuiteResult::Skipped => "status-Skipped",
        }
    }

    /// Gets the name of the document case. Returns "Skipped" for skipped documents.
    /// 获取文档用例的名称。对于跳过的文档，返回 "Skipped"。
    pub fn case_name(&self) -> String {
        match self {
            SuiteResult::Passed { case, .. } => case.effective_name(),
            SuiteResult::Failed { case, .. } => case.effective_name(),
            SuiteResult::Skipped => "Skipped".to_string(),
        }
    }

    /// Gets the status of the result as a localized string for display.
    /// 以本地化字符串形式获取结果的状态以供显示。
    pub fn get_status_str(&self, locale: &str) -> String {
        match self {
            SuiteResult::Passed { .. } => t!("report.status_passed", locale = locale).to_string(),
            SuiteResult::Failed { case, reason, .. } => {
                if *reason == FailureReason::Timeout {
                    t!("report.status_timeout", locale = locale).to_string()
                } else if case.allow_failure.iter().any(|s| s == std::env::consts::OS) {
                    t!("report.status_allowed_failure", locale = locale).to_string()
                } else {
                    t!("report.status_failed", locale = locale).to_string()
                }
            }
            SuiteResult::Skipped => t!("report.status_skipped", locale = locale).to_string(),
        }
    }

    /// Gets the output of the run. Returns an empty string if there's no output.
    /// 获取运行的输出。如果没有输出，则返回空字符串。
    pub fn get_output(&self) -> String {
        match self {
            SuiteResult::Passed { output, .. } => output.clone(),
            SuiteResult::Failed { output, .. } => output.clone(),
            SuiteResult::Skipped => String::new(),
        }
    }

    /// Gets the duration of the run. Returns None if not applicable.
    /// 获取运行的持续时间。如果不适用，则返回 None。
    pub fn get_duration(&self) -> Option<Duration> {
        match self {
            SuiteResult::Passed { duration, .. } => Some(*duration),
            SuiteResult::Failed { duration, .. } => Some(*duration),
            SuiteResult::Skipped => None,
        }
    }

    /// Gets the number of attempts for a passed document. Returns 0 for other states.
    /// 获取通过文档的尝试次数。对于其他状态返回 0。
    pub fn get_retries(&self) -> u8 {
        match self {
            SuiteResult::Passed { retries, .. } => *retries,
            _ => 0,
        }
    }
}

impl fmt::Display for SuiteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.case_name(), self.get_status_class())
    }
}

/// The isolated working directory a document's examples execute in.
/// The directory on disk is deleted when this struct is dropped, so it must
/// be kept alive until the last example has finished.
///
/// 文档示例执行所在的隔离工作目录。
/// 当此结构体被丢弃时，磁盘上的目录将被删除，
/// 因此必须保持存活直到最后一个示例完成。
pub struct ScratchDir {
    /// The `TempDir` guard. When this goes out of scope, the directory on disk is deleted.
    /// `TempDir` 的 guard。当它超出作用域时，磁盘上的目录将被删除。
    _root: TempDir,
    /// The absolute path examples run in.
    /// 示例运行所在的绝对路径。
    pub path: PathBuf,
}

impl ScratchDir {
    pub fn new(case_name: &str) -> Result<Self> {
        let (path, root) = crate::infra::fs::create_scratch_dir(case_name)?;
        Ok(Self { _root: root, path })
    }
}

impl fmt::Debug for ScratchDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScratchDir")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}
