//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command, which builds suites from the
//! configured documents and executes them.
//!
//! 此模块实现了 `run` 命令，它从配置的文档构建套件并执行它们。

use anyhow::{Context, Result};
use colored::*;
use futures::{StreamExt, stream};
use std::{env, fs, path::PathBuf, time::Duration};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, DocCase, DocSuiteConfig},
        execution::run_doc_case,
        models::{FailureReason, SuiteResult},
        planner,
        suite::Suite,
    },
    infra::t,
    reporting::{
        console::{print_summary, print_unexpected_failure_details},
        html::generate_html_report,
        json::write_json_report,
    },
};

/// Arguments for the `run` command.
/// `run` 命令的参数。
#[derive(Debug)]
pub struct RunArgs {
    /// Documents given directly on the command line; bypasses the config file.
    /// 直接在命令行给出的文档；绕过配置文件。
    pub files: Vec<PathBuf>,
    /// Explicit `--lang` override; takes precedence over the config language.
    /// 显式的 `--lang` 覆盖；优先于配置中的语言。
    pub lang: Option<String>,
    pub jobs: Option<usize>,
    pub config: PathBuf,
    pub project_dir: PathBuf,
    pub total_runners: Option<usize>,
    pub runner_index: Option<usize>,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
}

/// Executes the run command with the provided arguments.
///
/// # Returns
/// A Result indicating success or failure of the command execution
pub async fn execute(args: RunArgs) -> Result<()> {
    let config = load_run_config(&args)?;
    // An explicit --lang wins over the config language.
    let locale = args
        .lang
        .clone()
        .unwrap_or_else(|| config.language.clone());
    rust_i18n::set_locale(&locale);

    let project_root = fs::canonicalize(&args.project_dir).with_context(|| {
        t!("project_dir_not_found", locale = locale, path = args.project_dir.display()).to_string()
    })?;

    println!(
        "{}",
        t!("project_root_detected", locale = locale, path = project_root.display())
    );

    let overall_stop_token = setup_signal_handler(&locale);

    let plan = planner::plan_execution(config, args.total_runners, args.runner_index)?;

    if plan.filtered_arch_count > 0 {
        println!(
            "{}",
            t!(
                "filtered_arch_cases",
                locale = locale,
                filtered = plan.filtered_arch_count,
                total = plan.cases_to_run.len()
            )
            .cyan()
        );
    }

    println!(
        "{}",
        t!("current_os", locale = locale, os = env::consts::OS).cyan()
    );

    if plan.flaky_cases_count > 0 {
        println!(
            "{}",
            t!("flaky_cases_found", locale = locale, count = plan.flaky_cases_count).yellow()
        );
    }

    if let (Some(total), Some(index)) = (args.total_runners, args.runner_index) {
        println!(
            "{}",
            t!(
                "running_as_split_runner",
                locale = locale,
                index = index + 1,
                total = total,
                count = plan.cases_to_run.len()
            )
            .bold()
        );
    } else {
        println!("{}", t!("running_as_single_runner", locale = locale).bold());
    }

    if plan.cases_to_run.is_empty() {
        println!("{}", t!("no_cases_to_run", locale = locale).green());
        return Ok(());
    }

    // Build every suite up front: a missing or malformed document is a
    // startup error, nothing gets executed.
    // 预先构建每个套件：文档缺失或格式错误属于启动错误，不会执行任何内容。
    let suites = collect_suites(&plan.cases_to_run, &project_root)?;
    println!(
        "{}",
        t!("collected_suites", locale = locale, count = suites.len())
    );

    let (final_results, has_unexpected_failures) = run_suites(
        suites,
        args.jobs.unwrap_or_else(|| num_cpus::get() / 2 + 1),
        &project_root,
        overall_stop_token,
    )
    .await;

    print_summary(&final_results, &locale);

    if let Some(report_path) = &args.html {
        println!(
            "{}",
            t!("writing_html_report", locale = locale, path = report_path.display())
        );
        if let Err(e) = generate_html_report(&final_results, report_path, &locale) {
            eprintln!("{} {}", t!("html_report_failed", locale = locale).red(), e);
        }
    }

    if let Some(report_path) = &args.json {
        println!(
            "{}",
            t!("writing_json_report", locale = locale, path = report_path.display())
        );
        write_json_report(&final_results, report_path)?;
    }

    if has_unexpected_failures {
        let unexpected_failures: Vec<_> = final_results
            .iter()
            .filter(|r| r.is_unexpected_failure())
            .collect();
        print_unexpected_failure_details(&unexpected_failures, &locale);
        anyhow::bail!("Doc suites failed with unexpected errors.");
    } else {
        println!("\n{}", t!("all_suites_passed", locale = locale).green().bold());
        Ok(())
    }
}

/// Loads the configuration: ad-hoc cases for documents named on the command
/// line, otherwise the TOML config file.
fn load_run_config(args: &RunArgs) -> Result<DocSuiteConfig> {
    if !args.files.is_empty() {
        return Ok(DocSuiteConfig::for_files(&args.files));
    }

    // For config loading, we don't have the locale yet. Use English as a default.
    let locale = "en";
    let config_path = fs::canonicalize(&args.config).with_context(|| {
        t!("config_read_failed_path", locale = locale, path = args.config.display()).to_string()
    })?;
    println!(
        "{}",
        t!("loading_config", locale = locale, path = config_path.display())
    );
    config::load_config(&config_path)
        .with_context(|| t!("config_parse_failed", locale = locale).to_string())
}

/// Resolves document paths against the project root and parses each document.
fn collect_suites(
    cases: &[DocCase],
    project_root: &std::path::Path,
) -> Result<Vec<(DocCase, Suite)>> {
    cases
        .iter()
        .map(|case| {
            let expanded = shellexpand::full(&case.file)
                .with_context(|| format!("Failed to expand document path: {}", case.file))?;
            let doc_path = project_root.join(expanded.as_ref());
            let doc_path = fs::canonicalize(&doc_path)
                .with_context(|| t!("doc_file_not_found", path = doc_path.display()).to_string())?;
            let suite = Suite::from_file(&doc_path)?;
            Ok((case.clone(), suite))
        })
        .collect()
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler(locale: &str) -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();
    let locale = locale.to_string();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal", locale = &locale).yellow());
            token_clone.cancel();
        }
    });

    token
}

/// Runs the document suites in parallel.
///
/// An unexpected failure cancels suites that have not started yet (fast
/// fail); flaky suites keep running. Ctrl-C skips everything still pending.
async fn run_suites(
    suites: Vec<(DocCase, Suite)>,
    jobs: usize,
    project_root: &std::path::Path,
    overall_stop_token: CancellationToken,
) -> (Vec<SuiteResult>, bool) {
    let fast_fail_token = CancellationToken::new();
    let current_os = env::consts::OS;

    let results = stream::iter(suites.into_iter().map(|(case, suite)| {
        let fast_fail_token = fast_fail_token.clone();
        let overall_stop_token = overall_stop_token.clone();
        let project_root = project_root.to_path_buf();
        let is_flaky = case.allow_failure.iter().any(|os| os == current_os);
        let fallback_case = case.clone();

        tokio::spawn(async move {
            if overall_stop_token.is_cancelled() || (fast_fail_token.is_cancelled() && !is_flaky) {
                return SuiteResult::Skipped;
            }

            let mut handle =
                tokio::spawn(async move { run_doc_case(case, suite, &project_root).await });

            let result = tokio::select! {
                biased;
                _ = overall_stop_token.cancelled() => {
                    handle.abort();
                    SuiteResult::Skipped
                }
                res = &mut handle => match res {
                    Ok(Ok(result)) => result,
                    Ok(Err(e)) => SuiteResult::Failed {
                        case: fallback_case.clone(),
                        output: e.to_string(),
                        reason: FailureReason::Harness,
                        duration: Duration::default(),
                    },
                    Err(e) => SuiteResult::Failed {
                        case: fallback_case.clone(),
                        output: format!("Suite task failed: {}", e),
                        reason: FailureReason::Harness,
                        duration: Duration::default(),
                    },
                },
            };

            if !is_flaky && result.is_failure() {
                // Cancel suites that have not started yet.
                fast_fail_token.cancel();
            }
            result
        })
    }))
    .buffer_unordered(jobs)
    .collect::<Vec<Result<SuiteResult, tokio::task::JoinError>>>()
    .await;

    let mut has_unexpected_failures = false;
    let final_results: Vec<SuiteResult> = results
        .into_iter()
        .map(|res| match res {
            Ok(result) => {
                if result.is_unexpected_failure() {
                    has_unexpected_failures = true;
                }
                result
            }
            Err(e) => {
                has_unexpected_failures = true;
                SuiteResult::Failed {
                    case: DocCase::default(),
                    output: format!("Critical error during suite execution: {}", e),
                    reason: FailureReason::Harness,
                    duration: Duration::default(),
                }
            }
        })
        .collect();

    (final_results, has_unexpected_failures)
}
