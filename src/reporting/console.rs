//! # Console Reporting Module / 控制台报告模块
//!
//! This module handles the generation and display of suite reports in the
//! console. It provides functionality for printing colorful, formatted
//! summaries with internationalization support.
//!
//! 此模块处理控制台中套件报告的生成和显示。
//! 它提供打印彩色格式化摘要的功能，支持国际化。

use crate::core::models::SuiteResult;
use crate::infra::t;
use colored::*;

/// Prints a formatted summary of suite results to the console.
/// Displays a table with status, suite name, duration, and retry
/// information, using color coding to highlight different statuses.
///
/// 在控制台打印格式化的套件结果摘要。
/// 显示一个包含状态、套件名称、持续时间和重试信息的表格，
/// 使用颜色编码突出显示不同的状态。
///
/// # Output Format / 输出格式
/// ```text
/// --- Doc Suite Summary ---
///   - Passed           | usage                                    |      1.23s
///   - Failed           | quickstart                               |      0.45s  (2 retries)
///   - Allowed Failure  | windows-paths                            |      2.10s
///   - Skipped          | extras                                   |        N/A
/// ```
pub fn print_summary(results: &[SuiteResult], locale: &str) {
    println!("\n{}", t!("suite_summary_banner", locale = locale).bold());

    for result in results {
        let status_str = result.get_status_str(locale);
        let duration_str = result
            .get_duration()
            .map(|d| format!("{:.2?}", d))
            .unwrap_or_else(|| "N/A".to_string());

        let name = result.case_name();
        let retries_str = {
            let retries = result.get_retries();
            if retries > 1 {
                format!(" ({} retries)", retries - 1)
            } else {
                String::new()
            }
        };

        let status_colored = match result {
            SuiteResult::Passed { .. } => status_str.green(),
            SuiteResult::Failed { case, .. } => {
                let current_os = std::env::consts::OS;
                if case.allow_failure.iter().any(|os| os == current_os) {
                    status_str.yellow()
                } else {
                    status_str.red()
                }
            }
            SuiteResult::Skipped => status_str.dimmed(),
        };

        println!(
            "  - {:<18} | {:<40} | {:>10} {}",
            status_colored, name, duration_str, retries_str
        );
    }
}

/// Prints detailed information about unexpected suite failures.
/// Shows the rendered failure report for each document that failed
/// unexpectedly. Only displays failures that were not marked as allowed
/// failures for the current platform.
///
/// 打印意外套件失败的详细信息。
/// 显示每个意外失败文档的渲染失败报告。
/// 仅显示在当前平台上未标记为允许失败的失败。
pub fn print_unexpected_failure_details(unexpected_failures: &[&SuiteResult], locale: &str) {
    if unexpected_failures.is_empty() {
        return;
    }

    println!(
        "\n{}",
        t!("unexpected_failure_banner", locale = locale).red().bold()
    );
    println!("{}", "-".repeat(80));

    for (i, result) in unexpected_failures.iter().enumerate() {
        println!(
            "[{}/{}] {} '{}'",
            i + 1,
            unexpected_failures.len(),
            t!("report_header_failure", locale = locale).red(),
            result.case_name().cyan()
        );

        if let SuiteResult::Failed { output, .. } = result {
            println!("\n--- {} ---\n", t!("suite_log", locale = locale).yellow());
            println!("{}", output);
            println!("\n{}", "-".repeat(80));
        }
    }
}

/// Gets the error output from a suite result for display.
///
/// 获取套件结果的错误输出以供显示。
pub fn get_error_output_from_result(result: &SuiteResult, locale: &str) -> String {
    match result {
        SuiteResult::Failed { output, .. } => output.clone(),
        _ => t!("no_error_output", locale = locale).to_string(),
    }
}
