// ABOUTME: Error types for container engine and git subprocess calls.
// ABOUTME: Failed commands carry their captured output and exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to run {command}: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("failed to prepare build context in {}: {source}", dir.display())]
    Context {
        dir: PathBuf,
        source: std::io::Error,
    },

    #[error("build of {reference} failed with exit code {code:?}\n{output}")]
    BuildFailed {
        reference: String,
        code: Option<i32>,
        output: String,
    },

    #[error("push of {reference} failed with exit code {code:?}\n{output}")]
    PushFailed {
        reference: String,
        code: Option<i32>,
        output: String,
    },

    #[error("push of {reference} succeeded but its output was not understood\n{output}")]
    UnparseablePush { reference: String, output: String },

    #[error("tagging {source_ref} as {target_ref} failed with exit code {code:?}\n{output}")]
    TagFailed {
        source_ref: String,
        target_ref: String,
        code: Option<i32>,
        output: String,
    },

    #[error("removing local image {reference} failed with exit code {code:?}\n{output}")]
    RemoveImageFailed {
        reference: String,
        code: Option<i32>,
        output: String,
    },

    #[error("clone of {url} failed with exit code {code:?}\n{output}")]
    CloneFailed {
        url: String,
        code: Option<i32>,
        output: String,
    },
}
