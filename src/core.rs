//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Docsuite,
//! including document parsing, suite construction, configuration,
//! and the execution engine.
//!
//! 此模块包含 Docsuite 的核心功能，
//! 包括文档解析、套件构建、配置和执行引擎。

pub mod config;
pub mod execution;
pub mod models;
pub mod parser;
pub mod planner;
pub mod suite;

// Re-exports
pub use config::DocSuiteConfig;
pub use execution::run_doc_case;
pub use models::SuiteResult;
pub use suite::Suite;
