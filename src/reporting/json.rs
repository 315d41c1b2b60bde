//! # JSON Reporting Module / JSON 报告模块
//!
//! Machine-readable suite results for CI consumption.
//! 供 CI 使用的机器可读套件结果。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::SuiteResult;

/// The top-level JSON report document.
/// 顶层 JSON 报告文档。
#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub generated_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub suites: Vec<JsonSuite>,
}

/// One suite entry in the JSON report.
/// JSON 报告中的单个套件条目。
#[derive(Debug, Serialize)]
pub struct JsonSuite {
    pub name: String,
    /// "passed", "failed", "allowed-failure", "timeout" or "skipped".
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    pub retries: u8,
    /// Rendered failure detail, present only for failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl JsonSuite {
    fn from_result(result: &SuiteResult) -> Self {
        let status = match result {
            SuiteResult::Passed { .. } => "passed",
            SuiteResult::Failed { .. } => {
                if result.is_timeout() {
                    "timeout"
                } else if result.is_allowed_failure() {
                    "allowed-failure"
                } else {
                    "failed"
                }
            }
            SuiteResult::Skipped => "skipped",
        };
        Self {
            name: result.case_name(),
            status,
            duration_secs: result.get_duration().map(|d| d.as_secs_f64()),
            retries: result.get_retries(),
            output: match result {
                SuiteResult::Failed { output, .. } => Some(output.clone()),
                _ => None,
            },
        }
    }
}

/// Builds the report structure from suite results.
pub fn build_json_report(results: &[SuiteResult]) -> JsonReport {
    JsonReport {
        generated_at: Utc::now(),
        total: results.len(),
        passed: results
            .iter()
            .filter(|r| matches!(r, SuiteResult::Passed { .. }))
            .count(),
        failed: results.iter().filter(|r| r.is_failure()).count(),
        skipped: results
            .iter()
            .filter(|r| matches!(r, SuiteResult::Skipped))
            .count(),
        suites: results.iter().map(JsonSuite::from_result).collect(),
    }
}

/// Writes the JSON report to a file.
///
/// # Errors
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_json_report(results: &[SuiteResult], output_path: &Path) -> Result<()> {
    let report = build_json_report(results);
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize JSON report")?;
    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report: {}", output_path.display()))?;
    Ok(())
}
