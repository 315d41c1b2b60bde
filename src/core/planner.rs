//! # Execution Planner Module / 执行计划模块
//!
//! This module turns the configured document list into the list that will
//! actually run: filtering by architecture, separating documents that are
//! allowed to fail on this platform, and sharding across CI runners.
//!
//! 此模块将配置的文档列表转换为实际运行的列表：
//! 按架构过滤、分离允许在本平台失败的文档，以及在 CI 运行器之间分片。

use crate::core::config::{DocCase, DocSuiteConfig};
use anyhow::{Result, bail};
use std::env;

/// Represents a complete execution plan for a configured document set.
/// 表示配置的文档集合的完整执行计划。
#[derive(Debug)]
pub struct ExecutionPlan {
    /// The documents to run, filtered by architecture and possibly sharded.
    /// 要运行的文档，按架构过滤并可能被分片。
    pub cases_to_run: Vec<DocCase>,
    /// The number of documents filtered out due to architecture constraints.
    /// 由于架构约束而被过滤掉的文档数量。
    pub filtered_arch_count: usize,
    /// The number of documents that are allowed to fail on the current platform.
    /// 在当前平台上允许失败的文档数量。
    pub flaky_cases_count: usize,
    /// Whether the documents are sharded across multiple runners (CI environment).
    /// 文档是否分布在多个运行器上（CI 环境）。
    pub is_distributed: bool,
}

/// Creates an execution plan for the given configuration.
/// This involves filtering documents by architecture, separating flaky ones,
/// and potentially distributing them across multiple runners.
///
/// 为给定配置创建执行计划。
/// 这涉及按架构过滤文档、分离不稳定的文档，
/// 并可能在多个运行器之间分配文档。
///
/// # Arguments
/// * `config` - The complete docsuite configuration
/// * `total_runners` - Optional total number of runners for distributed execution
/// * `runner_index` - Optional index of this runner (0-based)
///
/// # Returns
/// An `ExecutionPlan` with the filtered and potentially sharded documents
pub fn plan_execution(
    config: DocSuiteConfig,
    total_runners: Option<usize>,
    runner_index: Option<usize>,
) -> Result<ExecutionPlan> {
    let docs = config.docs;

    // Filter by architecture
    let current_arch = env::consts::ARCH;
    let (arch_cases, filtered_arch_cases): (Vec<_>, Vec<_>) = docs
        .into_iter()
        .partition(|case| case.arch.is_empty() || case.arch.iter().any(|a| a == current_arch));

    // Separate flaky cases
    let current_os = env::consts::OS;
    let (mut safe_cases, flaky_cases): (Vec<_>, Vec<_>) = arch_cases
        .into_iter()
        .partition(|case| !case.allow_failure.iter().any(|os| os == current_os));

    // Sort cases by name for deterministic execution order
    safe_cases.sort_by_key(|a| a.effective_name());

    let mut combined_cases = safe_cases;
    combined_cases.extend(flaky_cases.clone());

    // Distribute cases if running in CI
    let (cases_to_run, is_distributed) =
        if let (Some(total), Some(index)) = (total_runners, runner_index) {
            if index >= total {
                bail!("Runner index must be less than total runners.");
            }
            let distributed_cases: Vec<_> = combined_cases
                .into_iter()
                .enumerate()
                .filter(|(i, _)| i % total == index)
                .map(|(_, case)| case)
                .collect();
            (distributed_cases, true)
        } else {
            if total_runners.is_some() || runner_index.is_some() {
                bail!("Both --total-runners and --runner-index must be provided.");
            }
            (combined_cases, false)
        };

    Ok(ExecutionPlan {
        cases_to_run,
        filtered_arch_count: filtered_arch_cases.len(),
        flaky_cases_count: flaky_cases.len(),
        is_distributed,
    })
}
