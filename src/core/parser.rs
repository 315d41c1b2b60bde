//! # Document Parser Module / 文档解析模块
//!
//! This module parses documentation-style test files into executable examples.
//! Two formats are supported: plain text documents, where session lines are
//! indented by two spaces, and Markdown documents, where sessions live inside
//! fenced `console` code blocks.
//!
//! 此模块将文档风格的测试文件解析为可执行示例。
//! 支持两种格式：纯文本文档（会话行缩进两个空格）
//! 和 Markdown 文档（会话位于 `console` 围栏代码块内）。

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The document format a file is parsed as, selected by its extension.
/// 文件解析所用的文档格式，由扩展名决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocFormat {
    /// Prose with two-space indented console sessions.
    /// 带有两空格缩进控制台会话的散文文本。
    Plain,
    /// Markdown with fenced ```console blocks.
    /// 带有 ```console 围栏代码块的 Markdown。
    Markdown,
}

impl DocFormat {
    /// Picks the format for a file path. `.md`/`.markdown` files are parsed
    /// as Markdown; everything else is treated as plain text.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") | Some("markdown") => DocFormat::Markdown,
            _ => DocFormat::Plain,
        }
    }
}

/// One line of expected output for an example.
/// 示例的一行预期输出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedLine {
    /// The actual line must match this text exactly (trailing whitespace ignored).
    /// 实际行必须与此文本完全匹配（忽略行尾空白）。
    Literal(String),
    /// The actual line is matched with `*`/`?` wildcards.
    /// 实际行使用 `*`/`?` 通配符匹配。
    Glob(String),
}

impl ExpectedLine {
    /// Checks whether an actual output line satisfies this expectation.
    pub fn matches(&self, actual: &str) -> bool {
        match self {
            ExpectedLine::Literal(expected) => expected.trim_end() == actual.trim_end(),
            ExpectedLine::Glob(pattern) => glob_match(pattern.trim_end(), actual.trim_end()),
        }
    }

    /// Returns the raw text of the expectation for display purposes.
    pub fn text(&self) -> &str {
        match self {
            ExpectedLine::Literal(text) => text,
            ExpectedLine::Glob(pattern) => pattern,
        }
    }
}

/// A single executable example collected from a document: a command, the
/// output the document promises, and the exit status it declares.
///
/// 从文档中收集的单个可执行示例：一条命令、文档承诺的输出
/// 以及它声明的退出状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The command to run, with continuation lines joined by newlines.
    /// 要运行的命令，续行以换行符连接。
    pub command: String,
    /// The expected output, one entry per line.
    /// 预期输出，每行一个条目。
    pub expected: Vec<ExpectedLine>,
    /// The expected exit status, declared with a trailing `[N]` line. Defaults to 0.
    /// 预期退出状态，通过结尾的 `[N]` 行声明。默认为 0。
    pub expected_status: i32,
    /// The 1-based line number of the `$` prompt in the source document.
    /// 源文档中 `$` 提示符所在的行号（从 1 开始）。
    pub line: usize,
}

/// Parses a document into its examples.
///
/// Malformed input is a hard error: continuations or output with no preceding
/// command, a stray exit-status line, or an unterminated `console` fence all
/// abort with the offending line number.
///
/// 将文档解析为示例列表。
/// 格式错误会导致硬错误：没有前置命令的续行或输出、
/// 游离的退出状态行、未闭合的 `console` 围栏，均会带行号中止。
pub fn parse_document(text: &str, format: DocFormat) -> Result<Vec<Example>> {
    match format {
        DocFormat::Plain => parse_plain(text),
        DocFormat::Markdown => parse_markdown(text),
    }
}

fn parse_plain(text: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    let mut current: Option<Example> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        match raw.strip_prefix("  ") {
            Some(body) => session_line(body, lineno, &mut current, &mut examples)?,
            None => {
                // Prose terminates the example in progress.
                if let Some(example) = current.take() {
                    examples.push(example);
                }
            }
        }
    }
    if let Some(example) = current.take() {
        examples.push(example);
    }
    Ok(examples)
}

fn parse_markdown(text: &str) -> Result<Vec<Example>> {
    let mut examples = Vec::new();
    let mut current: Option<Example> = None;
    // (opening line, is a console block) for the fence we are inside of.
    let mut fence: Option<(usize, bool)> = None;

    for (idx, raw) in text.lines().enumerate() {
        let lineno = idx + 1;
        let trimmed = raw.trim();

        match fence {
            None => {
                if let Some(info) = trimmed.strip_prefix("```") {
                    fence = Some((lineno, info.trim() == "console"));
                }
            }
            Some((_, in_console)) => {
                if trimmed == "```" {
                    fence = None;
                    if let Some(example) = current.take() {
                        examples.push(example);
                    }
                } else if in_console {
                    session_line(raw, lineno, &mut current, &mut examples)?;
                }
            }
        }
    }

    if let Some((opened_at, _)) = fence {
        bail!("unterminated code fence opened at line {opened_at}");
    }
    if let Some(example) = current.take() {
        examples.push(example);
    }
    Ok(examples)
}

/// Handles one line of a console session, shared by both formats.
fn session_line(
    body: &str,
    lineno: usize,
    current: &mut Option<Example>,
    examples: &mut Vec<Example>,
) -> Result<()> {
    if body.trim().is_empty() {
        // A blank session line separates examples, just like prose does.
        if let Some(example) = current.take() {
            examples.push(example);
        }
        return Ok(());
    }
    // The command marker is `$ ` (dollar, space). A bare `$` is an empty
    // command; `$foo` without the space is ordinary output text.
    let marker = if body.trim_end() == "$" {
        Some("")
    } else {
        body.strip_prefix("$ ")
    };
    if let Some(cmd) = marker {
        let cmd = cmd.trim();
        if cmd.is_empty() {
            bail!("empty command at line {lineno}");
        }
        if let Some(example) = current.take() {
            examples.push(example);
        }
        *current = Some(Example {
            command: cmd.to_string(),
            expected: Vec::new(),
            expected_status: 0,
            line: lineno,
        });
    } else if let Some(cont) = body.strip_prefix('>') {
        let Some(example) = current.as_mut() else {
            bail!("continuation line without a command at line {lineno}");
        };
        if !example.expected.is_empty() {
            bail!("continuation line after expected output at line {lineno}");
        }
        example.command.push('\n');
        example.command.push_str(cont.strip_prefix(' ').unwrap_or(cont));
    } else if let Some(digits) = status_digits(body) {
        let Some(mut example) = current.take() else {
            bail!("exit-status line without a command at line {lineno}");
        };
        let Ok(status) = digits.parse::<i32>() else {
            bail!("exit status out of range at line {lineno}");
        };
        example.expected_status = status;
        examples.push(example);
    } else {
        let Some(example) = current.as_mut() else {
            bail!("expected output without a command at line {lineno}");
        };
        let line = match body.strip_suffix(" (glob)") {
            Some(pattern) => ExpectedLine::Glob(pattern.to_string()),
            None => ExpectedLine::Literal(body.to_string()),
        };
        example.expected.push(line);
    }
    Ok(())
}

/// Recognizes an exit-status declaration of the form `[N]` and returns its
/// digits. Range checking happens at the call site, where the line number is
/// known.
fn status_digits(body: &str) -> Option<&str> {
    let inner = body.trim_end().strip_prefix('[')?.strip_suffix(']')?;
    if inner.is_empty() || !inner.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(inner)
}

/// Matches `text` against `pattern`, where `*` matches any run of characters
/// (including none), `?` matches a single character, and `\` escapes the
/// following character.
///
/// 将 `text` 与 `pattern` 匹配，其中 `*` 匹配任意字符序列（包括空），
/// `?` 匹配单个字符，`\` 转义后续字符。
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0usize, 0usize);
    // Position of the last `*` and the text index it was tried against,
    // for backtracking.
    let mut star: Option<(usize, usize)> = None;

    while ti < t.len() {
        let step = if pi < p.len() {
            match p[pi] {
                '*' => {
                    star = Some((pi, ti));
                    pi += 1;
                    continue;
                }
                '?' => true,
                '\\' if pi + 1 < p.len() => {
                    if p[pi + 1] == t[ti] {
                        pi += 1; // consume the escape, the literal is consumed below
                        true
                    } else {
                        false
                    }
                }
                c => c == t[ti],
            }
        } else {
            false
        };

        if step {
            pi += 1;
            ti += 1;
        } else if let Some((star_pi, star_ti)) = star {
            // Let the last `*` swallow one more character and retry.
            pi = star_pi + 1;
            ti = star_ti + 1;
            star = Some((star_pi, star_ti + 1));
        } else {
            return false;
        }
    }

    while pi < p.len() && p[pi] == '*' {
        pi += 1;
    }
    pi == p.len()
}
