//! # Reporting Module / 报告模块
//!
//! This module handles the generation and display of suite reports in
//! multiple formats: a colored console summary, a self-contained HTML
//! report, and a machine-readable JSON report for CI.
//!
//! 此模块处理多种格式的套件报告生成和显示：
//! 彩色控制台摘要、自包含的 HTML 报告以及供 CI 使用的机器可读 JSON 报告。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::{print_summary, print_unexpected_failure_details};
pub use html::generate_html_report;
pub use json::write_json_report;
