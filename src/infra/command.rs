//! # Command Execution Module / 命令执行模块
//!
//! Building and running the shell commands behind document examples, and
//! capturing their output.
//!
//! 构建和运行文档示例背后的 shell 命令，并捕获其输出。

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// The platform shell examples run under when no override is configured.
/// 未配置覆盖时示例运行所用的平台 shell。
static DEFAULT_SHELL: Lazy<(&'static str, &'static str)> = Lazy::new(|| {
    if cfg!(windows) {
        ("cmd", "/C")
    } else {
        ("sh", "-c")
    }
});

/// Builds the process that runs one example command.
///
/// With no override the platform shell is used (`sh -c` on Unix, `cmd /C` on
/// Windows). An override names a replacement shell and may carry its own
/// arguments (split with shell rules); the example command is passed to it
/// via `-c`.
///
/// 构建运行单个示例命令的进程。
/// 无覆盖时使用平台 shell（Unix 上为 `sh -c`，Windows 上为 `cmd /C`）。
/// 覆盖值指定替代 shell，可携带自己的参数（按 shell 规则拆分）；
/// 示例命令通过 `-c` 传递给它。
pub fn build_example_command(
    command: &str,
    shell_override: Option<&str>,
) -> Result<tokio::process::Command> {
    let mut cmd = match shell_override {
        Some(shell) => {
            let parts = shlex::split(shell)
                .ok_or_else(|| anyhow!("Failed to parse shell override: {shell}"))?;
            let (program, args) = parts
                .split_first()
                .ok_or_else(|| anyhow!("Empty shell override"))?;
            let mut cmd = tokio::process::Command::new(program);
            cmd.args(args).arg("-c");
            cmd
        }
        None => {
            let (program, flag) = *DEFAULT_SHELL;
            let mut cmd = tokio::process::Command::new(program);
            cmd.arg(flag);
            cmd
        }
    };
    cmd.arg(command).kill_on_drop(true);
    Ok(cmd)
}

/// Spawns a command and captures its stdout and stderr.
/// Both streams are read concurrently; the combined output is stdout
/// followed by stderr, so comparisons against the document are
/// deterministic.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// A tuple containing:
/// - The `ExitStatus` of the process wrapped in an `io::Result`.
/// - The captured output as a `String`.
///
/// 派生一个命令并捕获其 stdout 和 stderr。
/// 两个流被并发读取；合并输出为 stdout 在前、stderr 在后，
/// 使与文档的比较具有确定性。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> (std::io::Result<std::process::ExitStatus>, String) {
    let mut child = match cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            // If spawning fails, we return the error and an empty string for the output.
            // 如果派生失败，我们返回错误和空字符串作为输出。
            return (Err(e), String::new());
        }
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let stdout_handle = tokio::spawn(read_lines(stdout));
    let stderr_handle = tokio::spawn(read_lines(stderr));

    // Wait for the process to exit.
    // 等待进程退出。
    let status = child.wait().await;

    // Join the reader tasks to make sure every line has been captured.
    // 等待读取任务结束，确保捕获所有输出行。
    let mut output = stdout_handle.await.unwrap_or_default();
    output.push_str(&stderr_handle.await.unwrap_or_default());

    (status, output)
}

/// Drains a child output stream line by line into a string.
async fn read_lines<R>(stream: Option<R>) -> String
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return String::new();
    };
    let mut captured = String::new();
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        captured.push_str(&line);
        captured.push('\n');
    }
    captured
}
