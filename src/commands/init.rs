//! # Configuration Initialization Module / 配置初始化模块
//!
//! This module provides functionality for initializing a new docsuite
//! configuration through an interactive command-line wizard. It discovers
//! documentation files in the project and helps the user create a
//! `DocSuite.toml` listing them.
//!
//! 此模块通过交互式命令行向导提供初始化新 docsuite 配置的功能。
//! 它会发现项目中的文档文件，并帮助用户创建列出它们的 `DocSuite.toml`。
//!
//! ## Features / 功能特性
//!
//! - **Interactive Wizard**: Step-by-step guidance for configuration setup
//! - **Document Discovery**: Finds `.txt` and `.md` documents under `docs/` and `tests/`
//! - **Overwrite Protection**: Confirmation prompts before overwriting existing configurations
//!
//! - **交互式向导**: 配置设置的逐步指导
//! - **文档发现**: 在 `docs/` 和 `tests/` 下查找 `.txt` 和 `.md` 文档
//! - **覆盖保护**: 覆盖现有配置前的确认提示

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, MultiSelect, theme::ColorfulTheme};
use std::fs;
use std::path::Path;

use crate::core::config::{DocCase, DocSuiteConfig};
use crate::infra::{self, t};

/// Runs the interactive wizard to generate a `DocSuite.toml` file.
///
/// This function discovers candidate documents, lets the user pick which of
/// them to include, and writes the resulting configuration.
///
/// 运行交互式向导以生成 `DocSuite.toml` 文件。
/// 此函数发现候选文档，让用户选择要包含的文档，并写出生成的配置。
pub fn run_init_wizard(language: &str, non_interactive: bool) -> Result<()> {
    let config_path = Path::new("DocSuite.toml");
    let theme = ColorfulTheme::default();

    if !non_interactive {
        println!("\n{}", t!("init_wizard_welcome", locale = language).cyan().bold());
        println!("{}", t!("init_wizard_description", locale = language));
    }

    if config_path.exists() && !non_interactive {
        let confirmation = Confirm::with_theme(&theme)
            .with_prompt(t!(
                "init_overwrite_prompt",
                locale = language,
                path = config_path.display()
            ))
            .default(false)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;
        if !confirmation {
            println!("{}", t!("init_aborted", locale = language));
            return Ok(());
        }
    }

    let discovered = infra::fs::find_doc_files(Path::new("."));

    if non_interactive {
        let config = build_config(language, &discovered, None);
        return write_config(config_path, &config, language);
    }

    if discovered.is_empty() {
        println!("{}", t!("init_no_docs_found", locale = language).yellow());
    } else {
        println!(
            "{}",
            t!(
                "init_detected_docs",
                locale = language,
                count = discovered.len()
            )
            .green()
        );
    }

    let selected: Vec<std::path::PathBuf> = if discovered.is_empty() {
        vec![]
    } else {
        let labels: Vec<String> = discovered
            .iter()
            .map(|path| path.display().to_string())
            .collect();
        let defaults = vec![true; labels.len()];
        let selections = MultiSelect::with_theme(&theme)
            .with_prompt(t!("init_doc_selection_prompt", locale = language))
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .context(t!("init_user_confirmation_failed", locale = language).to_string())?;

        if selections.is_empty() {
            println!("{}", t!("init_no_docs_selected", locale = language).yellow());
        }
        selections.into_iter().map(|i| discovered[i].clone()).collect()
    };

    let timeout_input: String = Input::with_theme(&theme)
        .with_prompt(t!("init_timeout_prompt", locale = language))
        .default("60".to_string())
        .interact_text()?;
    let timeout_secs = timeout_input.trim().parse::<u64>().ok();

    let config = build_config(language, &selected, timeout_secs);
    write_config(config_path, &config, language)
}

/// Builds a configuration from the chosen documents. A missing timeout
/// defaults to 60 seconds per document.
fn build_config(
    language: &str,
    docs: &[std::path::PathBuf],
    timeout_secs: Option<u64>,
) -> DocSuiteConfig {
    DocSuiteConfig {
        language: language.to_string(),
        docs: docs
            .iter()
            .map(|path| DocCase {
                timeout_secs: Some(timeout_secs.unwrap_or(60)),
                ..DocCase::for_file(path)
            })
            .collect(),
    }
}

fn write_config(path: &Path, config: &DocSuiteConfig, language: &str) -> Result<()> {
    let toml_string = toml::to_string_pretty(config)
        .context(t!("init_serialize_failed", locale = language).to_string())?;

    fs::write(path, toml_string)
        .with_context(|| {
            t!("init_write_failed", locale = language, path = path.display()).to_string()
        })?;

    println!(
        "\n{} {}",
        "✔".green(),
        t!("init_success_created", locale = language, path = path.display()).bold()
    );
    println!("{}", t!("init_usage_hint", locale = language));

    Ok(())
}
