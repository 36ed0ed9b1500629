// ABOUTME: Container engine access through its CLI (docker, podman, ...).
// ABOUTME: Build, push, tag, rmi, and availability as typed operations.

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;

use crate::executor::{BuildOptions, CommandOutput, Engine, ExecError, PushResult, run_streaming};
use crate::output::Output;
use crate::types::Digest;

/// The configured container engine, driven through its command line.
/// Works with any engine whose CLI is argument-compatible with docker.
#[derive(Debug, Clone)]
pub struct CliEngine {
    command: String,
    output: Output,
}

impl CliEngine {
    pub fn new(command: impl Into<String>, output: Output) -> Self {
        Self {
            command: command.into(),
            output,
        }
    }

    pub fn command_name(&self) -> &str {
        &self.command
    }

    fn command(&self) -> Command {
        Command::new(&self.command)
    }

    async fn run(&self, cmd: Command) -> Result<CommandOutput, ExecError> {
        run_streaming(&self.command, cmd, &self.output).await
    }
}

#[async_trait]
impl Engine for CliEngine {
    async fn build(
        &self,
        reference: &str,
        context: &Path,
        opts: BuildOptions,
    ) -> Result<CommandOutput, ExecError> {
        if opts.dummy {
            write_dummy_context(context).map_err(|e| ExecError::Context {
                dir: context.to_path_buf(),
                source: e,
            })?;
        }

        let mut cmd = self.command();
        cmd.args(["build", "-t", reference]).arg(context);
        let result = self.run(cmd).await?;
        if !result.success() {
            return Err(ExecError::BuildFailed {
                reference: reference.to_string(),
                code: result.code,
                output: result.output,
            });
        }
        Ok(result)
    }

    async fn push(&self, reference: &str) -> Result<PushResult, ExecError> {
        let mut cmd = self.command();
        cmd.args(["push", reference]);
        let result = self.run(cmd).await?;
        if !result.success() {
            return Err(ExecError::PushFailed {
                reference: reference.to_string(),
                code: result.code,
                output: result.output,
            });
        }
        match parse_push_output(&result.output) {
            Some(parsed) => Ok(parsed),
            None => Err(ExecError::UnparseablePush {
                reference: reference.to_string(),
                output: result.output,
            }),
        }
    }

    async fn tag(&self, source: &str, target: &str) -> Result<(), ExecError> {
        let mut cmd = self.command();
        cmd.args(["tag", source, target]);
        let result = self.run(cmd).await?;
        if !result.success() {
            return Err(ExecError::TagFailed {
                source_ref: source.to_string(),
                target_ref: target.to_string(),
                code: result.code,
                output: result.output,
            });
        }
        Ok(())
    }

    async fn remove_image(&self, reference: &str) -> Result<(), ExecError> {
        let mut cmd = self.command();
        cmd.args(["rmi", reference]);
        let result = self.run(cmd).await?;
        if !result.success() {
            return Err(ExecError::RemoveImageFailed {
                reference: reference.to_string(),
                code: result.code,
                output: result.output,
            });
        }
        Ok(())
    }

    async fn available(&self) -> bool {
        let mut cmd = self.command();
        cmd.arg("version");
        match self.run(cmd).await {
            Ok(result) => result.success(),
            Err(_) => false,
        }
    }
}

fn write_dummy_context(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let stamp = chrono::Utc::now().timestamp_millis();
    let dockerfile = format!("FROM alpine:latest\nENTRYPOINT /dummy\nRUN touch {stamp}\n");
    std::fs::write(dir.join("Dockerfile"), dockerfile)
}

/// Picks the repository, tag, and digest out of the engine's push
/// summary. The repository comes from the `[...]` in the "push refers
/// to repository" banner; tag and digest from the
/// `<tag>: digest: <digest> size: <n>` trailer.
fn parse_push_output(output: &str) -> Option<PushResult> {
    let mut repository = None;
    let mut tagged = None;

    for line in output.lines() {
        if repository.is_none() {
            if let Some(inner) = between_brackets(line) {
                repository = Some(inner.to_string());
            }
        }
        if tagged.is_none() {
            if let Some((tag, rest)) = line.split_once(": digest: ") {
                if let Some(first) = rest.split_whitespace().next() {
                    if let Ok(digest) = first.parse::<Digest>() {
                        tagged = Some((tag.trim().to_string(), digest));
                    }
                }
            }
        }
    }

    let repository = repository?;
    let (tag, digest) = tagged?;
    Some(PushResult {
        repository,
        tag,
        digest,
    })
}

fn between_brackets(line: &str) -> Option<&str> {
    let start = line.find('[')?;
    let rest = &line[start + 1..];
    let end = rest.find(']')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUSH_OUTPUT: &str = "\
The push refers to repository [localhost:5000/ns/app]
5f70bf18a086: Preparing
5f70bf18a086: Pushed
1.2.3: digest: sha256:b5bb9d8014a0f9b1d61e21e796d78dccdf1352f23cd32812f4850b878ae4944c size: 528";

    #[test]
    fn parses_push_summary() {
        let parsed = parse_push_output(PUSH_OUTPUT).unwrap();

        assert_eq!(parsed.repository, "localhost:5000/ns/app");
        assert_eq!(parsed.tag, "1.2.3");
        assert_eq!(
            parsed.digest.to_string(),
            "sha256:b5bb9d8014a0f9b1d61e21e796d78dccdf1352f23cd32812f4850b878ae4944c"
        );
    }

    #[test]
    fn push_parse_needs_digest_line() {
        let output = "The push refers to repository [localhost:5000/app]\n5f70bf18a086: Pushed";
        assert!(parse_push_output(output).is_none());
    }

    #[test]
    fn push_parse_needs_repository_banner() {
        let output = "1.0: digest: sha256:abc123 size: 100";
        assert!(parse_push_output(output).is_none());
    }

    #[test]
    fn push_parse_ignores_noise_lines() {
        let output = format!("random chatter\n{PUSH_OUTPUT}\ntrailing noise");
        let parsed = parse_push_output(&output).unwrap();
        assert_eq!(parsed.tag, "1.2.3");
    }

    #[test]
    fn dummy_context_changes_between_builds() {
        let dir = tempfile::tempdir().unwrap();
        write_dummy_context(dir.path()).unwrap();
        let first = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();

        assert!(first.starts_with("FROM alpine:latest\n"));
        assert!(first.contains("ENTRYPOINT /dummy"));
        assert!(first.contains("RUN touch "));

        std::thread::sleep(std::time::Duration::from_millis(5));
        write_dummy_context(dir.path()).unwrap();
        let second = std::fs::read_to_string(dir.path().join("Dockerfile")).unwrap();

        assert_ne!(first, second);
    }
}
