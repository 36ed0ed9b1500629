// ABOUTME: External-process executors for the container engine and git.
// ABOUTME: Spawns CLI commands, streams their output, captures it for errors.

mod cli;
mod error;
mod git;

pub use cli::CliEngine;
pub use error::ExecError;
pub use git::GitCli;

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::output::Output;
use crate::types::Digest;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Stdout followed by stderr, line-joined.
    pub output: String,
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// What a successful push reported back: where the image landed and the
/// digest the registry assigned to its manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushResult {
    pub repository: String,
    pub tag: String,
    pub digest: Digest,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    /// Synthesize a minimal throwaway build context before building.
    /// Each dummy build bakes in a fresh timestamp so its digest never
    /// collides with existing content.
    pub dummy: bool,
}

/// Image operations the removal and push flows need from a container
/// engine.
#[async_trait]
pub trait Engine {
    async fn build(
        &self,
        reference: &str,
        context: &Path,
        opts: BuildOptions,
    ) -> Result<CommandOutput, ExecError>;

    async fn push(&self, reference: &str) -> Result<PushResult, ExecError>;

    async fn tag(&self, source: &str, target: &str) -> Result<(), ExecError>;

    async fn remove_image(&self, reference: &str) -> Result<(), ExecError>;

    /// Whether the engine CLI is installed and its daemon answers.
    async fn available(&self) -> bool;
}

/// Spawns `cmd`, streaming each output line to `output` in verbose mode
/// while accumulating everything for error reporting.
pub(crate) async fn run_streaming(
    command_name: &str,
    mut cmd: Command,
    output: &Output,
) -> Result<CommandOutput, ExecError> {
    let spawn_err = |source| ExecError::Spawn {
        command: command_name.to_string(),
        source,
    };

    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().map_err(spawn_err)?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let (mut lines, err_lines) =
        tokio::try_join!(drain_lines(stdout, output), drain_lines(stderr, output))
            .map_err(spawn_err)?;
    let status = child.wait().await.map_err(spawn_err)?;

    lines.extend(err_lines);
    Ok(CommandOutput {
        output: lines.join("\n"),
        code: status.code(),
    })
}

async fn drain_lines<R>(stream: Option<R>, output: &Output) -> std::io::Result<Vec<String>>
where
    R: AsyncRead + Unpin,
{
    let Some(stream) = stream else {
        return Ok(Vec::new());
    };

    let mut lines = BufReader::new(stream).lines();
    let mut collected = Vec::new();
    while let Some(line) = lines.next_line().await? {
        output.detail(&line);
        collected.push(line);
    }
    Ok(collected)
}
