//! # Suite Execution Engine Module / 套件执行引擎模块
//!
//! This module runs the examples of one document suite. It handles the
//! complete lifecycle: scratch directory setup, fixture seeding, sequential
//! example execution, output comparison, timeouts, and retries.
//!
//! 此模块运行单个文档套件的示例。
//! 它处理完整的生命周期：临时工作目录设置、fixtures 填充、
//! 示例顺序执行、输出比较、超时和重试。

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::time::Instant;

use crate::{
    core::{
        config::DocCase,
        models::{FailureReason, ScratchDir, SuiteResult},
        parser::{Example, ExpectedLine},
        suite::Suite,
    },
    infra::{command, fs, t},
};

/// The outcome of one example inside a suite.
enum ExampleOutcome {
    Passed,
    Failed {
        reason: FailureReason,
        rendered: String,
    },
}

/// The main entry point for running a single document suite.
/// It wraps the core execution logic with timeout and retry handling.
///
/// # Arguments
/// * `case` - The document case configuration to execute
/// * `suite` - The parsed suite built from the case's document
/// * `project_root` - Path to the project root directory
///
/// # Returns
/// A `SuiteResult` indicating the outcome of the run
pub async fn run_doc_case(case: DocCase, suite: Suite, project_root: &Path) -> Result<SuiteResult> {
    let max_attempts = 1 + case.retries.unwrap_or(0);
    let mut last_result: Option<SuiteResult> = None;

    for attempt in 1..=max_attempts {
        let case_name = case.effective_name();
        let timeout_dur = case.timeout_secs.map(std::time::Duration::from_secs);

        let execution_future = run_suite_once(&case, &suite, project_root);

        let result = if let Some(duration) = timeout_dur {
            match tokio::time::timeout(duration, execution_future).await {
                Ok(res) => res,
                Err(_) => {
                    println!(
                        "{}",
                        t!("run.suite_timeout", name = case_name, timeout = duration.as_secs())
                            .red()
                    );
                    Ok(SuiteResult::Failed {
                        case: case.clone(),
                        output: t!("run.suite_timeout_message").to_string(),
                        reason: FailureReason::Timeout,
                        duration,
                    })
                }
            }
        } else {
            execution_future.await
        };

        match result {
            Ok(SuiteResult::Passed {
                case,
                output,
                duration,
                ..
            }) => {
                let final_result = SuiteResult::Passed {
                    case,
                    output,
                    duration,
                    retries: attempt,
                };
                if attempt > 1 {
                    println!(
                        "{}",
                        t!("run.suite_passed_on_retry", name = case_name, retries = attempt - 1)
                            .green()
                    );
                }
                return Ok(final_result);
            }
            Ok(res) => {
                if res.is_timeout() {
                    return Ok(res);
                }
                if attempt < max_attempts {
                    println!(
                        "{}",
                        t!(
                            "run.suite_retrying",
                            name = case_name,
                            attempt = attempt,
                            retries = max_attempts - 1
                        )
                        .yellow()
                    );
                } else if max_attempts > 1 {
                    println!(
                        "{}",
                        t!(
                            "run.suite_failed_after_retries",
                            name = case_name,
                            retries = case.retries.unwrap_or(0)
                        )
                        .red()
                    );
                }
                last_result = Some(res);
            }
            Err(e) => {
                eprintln!("A critical error occurred during suite execution: {}", e);
                return Err(e.context(format!("Critical error in document suite {}", case_name)));
            }
        }
    }
    Ok(last_result.unwrap_or(SuiteResult::Skipped))
}

/// Runs every example of the suite once, in document order, inside a fresh
/// scratch directory.
async fn run_suite_once(case: &DocCase, suite: &Suite, project_root: &Path) -> Result<SuiteResult> {
    let case_name = case.effective_name();

    if suite.is_empty() {
        println!("{}", t!("run.suite_empty", name = case_name).yellow());
        return Ok(SuiteResult::Passed {
            case: case.clone(),
            output: t!("run.suite_empty_message").to_string(),
            duration: std::time::Duration::from_secs(0),
            retries: 1,
        });
    }

    println!(
        "{}",
        t!("run.suite_running", name = case_name, count = suite.len()).blue()
    );

    let start_time = Instant::now();
    let scratch = ScratchDir::new(&case_name)?;

    if let Some(fixtures) = &case.fixtures {
        let expanded = shellexpand::full(fixtures)
            .with_context(|| format!("Failed to expand fixtures path: {fixtures}"))?;
        let fixtures_path = project_root.join(expanded.as_ref());
        fs::copy_fixtures(&fixtures_path, &scratch.path)?;
    }

    // Examples can depend on files the document itself ships with.
    // 示例可能依赖文档自身附带的文件。
    let doc_dir = suite
        .path
        .parent()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| project_root.to_path_buf());

    for example in &suite.examples {
        let outcome = run_example(case, example, &scratch, &doc_dir).await?;
        if let ExampleOutcome::Failed { reason, rendered } = outcome {
            let duration = start_time.elapsed();
            println!(
                "{}",
                t!(
                    "run.suite_failed",
                    name = case_name,
                    duration = duration.as_secs_f64()
                )
                .red()
            );
            return Ok(SuiteResult::Failed {
                case: case.clone(),
                output: rendered,
                reason,
                duration,
            });
        }
    }

    let duration = start_time.elapsed();
    println!(
        "{}",
        t!(
            "run.suite_passed",
            name = case_name,
            duration = duration.as_secs_f64()
        )
        .green()
    );
    Ok(SuiteResult::Passed {
        case: case.clone(),
        output: t!("run.suite_passed_message", count = suite.len()).to_string(),
        duration,
        retries: 1,
    })
}

/// Runs one example and compares its output and exit status against the
/// document.
async fn run_example(
    case: &DocCase,
    example: &Example,
    scratch: &ScratchDir,
    doc_dir: &Path,
) -> Result<ExampleOutcome> {
    let mut cmd = command::build_example_command(&example.command, case.shell.as_deref())?;
    cmd.current_dir(&scratch.path).env("DOCDIR", doc_dir);
    for (key, value) in &case.env {
        cmd.env(key, value);
    }

    let (status_res, output) = command::spawn_and_capture(cmd).await;

    let status = match status_res {
        Ok(status) => status,
        Err(e) => {
            return Ok(ExampleOutcome::Failed {
                reason: FailureReason::Spawn,
                rendered: format!(
                    "{}\n  {}\n",
                    t!("run.example_spawn_failed", line = example.line, command = &example.command),
                    e
                ),
            });
        }
    };

    let exit_code = status.code().unwrap_or(-1);
    if exit_code != example.expected_status {
        return Ok(ExampleOutcome::Failed {
            reason: FailureReason::ExitStatus,
            rendered: render_failure(
                example,
                &output,
                &t!(
                    "run.example_wrong_status",
                    expected = example.expected_status,
                    actual = exit_code
                ),
            ),
        });
    }

    if !output_matches(&example.expected, &output) {
        return Ok(ExampleOutcome::Failed {
            reason: FailureReason::Mismatch,
            rendered: render_failure(example, &output, &t!("run.example_output_mismatch")),
        });
    }

    Ok(ExampleOutcome::Passed)
}

/// Compares captured output against the expected block, line by line.
/// Trailing blank lines on the actual side are ignored.
pub fn output_matches(expected: &[ExpectedLine], actual: &str) -> bool {
    let mut actual_lines: Vec<&str> = actual.split('\n').collect();
    while actual_lines.last().is_some_and(|line| line.is_empty()) {
        actual_lines.pop();
    }
    if actual_lines.len() != expected.len() {
        return false;
    }
    expected
        .iter()
        .zip(actual_lines)
        .all(|(expected_line, actual_line)| expected_line.matches(actual_line))
}

/// Renders the failure detail block shown in reports: the command, where the
/// document declared it, and the expected vs. actual output.
fn render_failure(example: &Example, actual: &str, headline: &str) -> String {
    let mut rendered = String::new();
    rendered.push_str(&format!(
        "{} {}\n",
        t!("run.example_failed_at", line = example.line),
        headline
    ));
    rendered.push_str(&format!("  $ {}\n", example.command.replace('\n', "\n  > ")));
    rendered.push_str(&format!("\n--- {} ---\n", t!("run.expected_block")));
    for line in &example.expected {
        rendered.push_str(&format!("  {}\n", line.text()));
    }
    rendered.push_str(&format!("\n--- {} ---\n", t!("run.actual_block")));
    for line in actual.lines() {
        rendered.push_str(&format!("  {}\n", line));
    }
    rendered
}
