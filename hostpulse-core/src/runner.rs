//! Command runner: spawns one host process per call.

use crate::command::HostCommand;
use crate::error::{CollectError, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Per-command deadline unless configured otherwise.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(5);

/// Captured output of a successful command. Stderr is only kept for failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
}

impl CommandOutput {
    pub fn stdout(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
        }
    }
}

/// Executes [`HostCommand`]s. Non-zero exit and spawn failure are returned
/// as errors; callers decide how to degrade.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: HostCommand) -> BoxFuture<'_, Result<CommandOutput>>;
}

/// Runs commands on the local host via `tokio::process`.
///
/// The child is killed when the returned future is dropped, so a caller's
/// deadline bounds the process as well as the wait.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    async fn exec(&self, program: &'static str, args: &[&str]) -> Result<CommandOutput> {
        // kill_on_drop 保证超时或请求取消时子进程被回收
        let output = Command::new(program)
            .args(args)
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| CollectError::Spawn { program, source })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if !output.status.success() {
            return Err(CollectError::NonZeroExit {
                program,
                code: output.status.code(),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(CommandOutput { stdout })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: HostCommand) -> BoxFuture<'_, Result<CommandOutput>> {
        async move { self.exec(command.program(), &command.args()).await }.boxed()
    }
}
