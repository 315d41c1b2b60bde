//! # HTML Reporting Module / HTML 报告模块
//!
//! This module handles the generation of HTML suite reports.
//! It produces a single self-contained file with summary counters, a
//! detailed results table, and the rendered output of failed suites.
//!
//! 此模块处理 HTML 套件报告的生成。
//! 它生成一个自包含文件，包含统计摘要、详细结果表格和失败套件的渲染输出。

use anyhow::{Context, Result};
use chrono::Local;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

use crate::core::models::SuiteResult;
use crate::infra::t;
use crate::reporting::console::get_error_output_from_result;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 2em; color: #24292f; }
h1 { border-bottom: 2px solid #d0d7de; padding-bottom: 0.3em; }
.generated-at { color: #57606a; margin-bottom: 1.5em; }
.summary-container { display: flex; gap: 1em; margin: 1.5em 0; }
.summary-item { border: 1px solid #d0d7de; border-radius: 6px; padding: 1em 2em; text-align: center; }
.summary-item .count { display: block; font-size: 2em; font-weight: bold; }
.passed-text { color: #1a7f37; }
.failed-text { color: #cf222e; }
.skipped-text { color: #57606a; }
table { border-collapse: collapse; width: 100%; }
th, td { border: 1px solid #d0d7de; padding: 0.5em 0.8em; text-align: left; }
th { background: #f6f8fa; }
.status-Passed { color: #1a7f37; font-weight: bold; }
.status-Failed { color: #cf222e; font-weight: bold; }
.status-Timeout { color: #9a6700; font-weight: bold; }
.status-Allowed-Failure { color: #9a6700; }
.status-Skipped { color: #57606a; }
details pre { background: #f6f8fa; padding: 0.8em; border-radius: 6px; overflow-x: auto; }
"#;

/// Generates a comprehensive HTML report from suite results.
/// Creates a styled HTML file with summary statistics, a detailed results
/// table, and collapsible output blocks for failed suites.
///
/// 从套件结果生成综合的 HTML 报告。
/// 创建一个样式化的 HTML 文件，包含统计摘要、详细结果表格
/// 和失败套件的可折叠输出块。
///
/// # Errors / 错误
/// This function will return an error if the output file cannot be written.
/// 无法写入输出文件时此函数会返回错误。
pub fn generate_html_report(
    results: &[SuiteResult],
    output_path: &Path,
    locale: &str,
) -> Result<()> {
    let markup = render_report(results, locale);
    fs::write(output_path, markup.into_string())
        .with_context(|| format!("Failed to write HTML report: {}", output_path.display()))?;
    Ok(())
}

fn render_report(results: &[SuiteResult], locale: &str) -> Markup {
    let total = results.len();
    let passed = results
        .iter()
        .filter(|r| matches!(r, SuiteResult::Passed { .. }))
        .count();
    let failed = results.iter().filter(|r| r.is_failure()).count();
    let skipped = results
        .iter()
        .filter(|r| matches!(r, SuiteResult::Skipped))
        .count();

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (t!("html_report.title", locale = locale)) }
                style { (PreEscaped(HTML_STYLE)) }
            }
            body {
                h1 { (t!("html_report.main_header", locale = locale)) }
                p .generated-at {
                    (t!("html_report.generated_at", locale = locale))
                    " "
                    (Local::now().format("%Y-%m-%d %H:%M:%S"))
                }
                div .summary-container {
                    (summary_item(total, "", &t!("html_report.summary.total", locale = locale)))
                    (summary_item(passed, "passed-text", &t!("html_report.summary.passed", locale = locale)))
                    (summary_item(failed, "failed-text", &t!("html_report.summary.failed", locale = locale)))
                    (summary_item(skipped, "skipped-text", &t!("html_report.summary.skipped", locale = locale)))
                }
                table {
                    thead {
                        tr {
                            th { (t!("html_report.table.header.name", locale = locale)) }
                            th { (t!("html_report.table.header.status", locale = locale)) }
                            th { (t!("html_report.table.header.duration", locale = locale)) }
                            th { (t!("html_report.table.header.retries", locale = locale)) }
                            th { (t!("html_report.table.header.details", locale = locale)) }
                        }
                    }
                    tbody {
                        @for result in results {
                            (result_row(result, locale))
                        }
                    }
                }
            }
        }
    }
}

fn summary_item(count: usize, class: &str, label: &str) -> Markup {
    html! {
        div .summary-item {
            span class=(format!("count {class}")) { (count) }
            span .label { (label) }
        }
    }
}

fn result_row(result: &SuiteResult, locale: &str) -> Markup {
    let duration_str = result
        .get_duration()
        .map(|d| format!("{:.2?}", d))
        .unwrap_or_else(|| "N/A".to_string());
    let retries = result.get_retries();
    let retries_str = if retries > 1 {
        format!("{}", retries - 1)
    } else {
        "0".to_string()
    };

    html! {
        tr {
            td { (result.case_name()) }
            td class=(result.get_status_class()) { (result.get_status_str(locale)) }
            td { (duration_str) }
            td { (retries_str) }
            td {
                @if result.is_failure() {
                    details {
                        summary { (t!("html_report.show_output", locale = locale)) }
                        pre { (get_error_output_from_result(result, locale)) }
                    }
                } @else {
                    (t!("html_report.no_output", locale = locale))
                }
            }
        }
    }
}
