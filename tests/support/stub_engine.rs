// ABOUTME: In-process engine double implementing the Engine trait.
// ABOUTME: Records every call and answers push with a fixed digest.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use limani::executor::{BuildOptions, CommandOutput, Engine, ExecError, PushResult};

pub const DIGEST_SHARED: &str =
    "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const DIGEST_DUMMY: &str =
    "sha256:bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// What the stub saw when `build` was called.
#[derive(Debug, Clone)]
pub struct BuildCall {
    pub reference: String,
    pub context: PathBuf,
    pub dummy: bool,
    pub context_existed: bool,
    pub dockerfile_existed: bool,
}

/// Engine double for orchestration tests: no processes, no daemon. It
/// behaves like an engine that accepts everything and reports a fixed
/// digest for each push.
#[derive(Debug, Clone)]
pub struct StubEngine {
    calls: Arc<Mutex<Vec<String>>>,
    builds: Arc<Mutex<Vec<BuildCall>>>,
    /// `None` makes push fail.
    push_digest: Option<String>,
    fail_build: bool,
    fail_rmi: bool,
}

impl StubEngine {
    pub fn pushing(digest: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            builds: Arc::new(Mutex::new(Vec::new())),
            push_digest: Some(digest.to_string()),
            fail_build: false,
            fail_rmi: false,
        }
    }

    pub fn failing_push() -> Self {
        Self {
            push_digest: None,
            ..Self::pushing(DIGEST_DUMMY)
        }
    }

    pub fn failing_build() -> Self {
        Self {
            fail_build: true,
            ..Self::pushing(DIGEST_DUMMY)
        }
    }

    pub fn failing_rmi() -> Self {
        Self {
            fail_rmi: true,
            ..Self::pushing(DIGEST_DUMMY)
        }
    }

    /// Every call in invocation order, one `<verb> <args>` line each.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn builds(&self) -> Vec<BuildCall> {
        self.builds.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn ok() -> CommandOutput {
        CommandOutput {
            output: String::new(),
            code: Some(0),
        }
    }
}

#[async_trait]
impl Engine for StubEngine {
    async fn build(
        &self,
        reference: &str,
        context: &Path,
        opts: BuildOptions,
    ) -> Result<CommandOutput, ExecError> {
        self.record(format!("build {reference} dummy={}", opts.dummy));
        self.builds.lock().unwrap().push(BuildCall {
            reference: reference.to_string(),
            context: context.to_path_buf(),
            dummy: opts.dummy,
            context_existed: context.is_dir(),
            dockerfile_existed: context.join("Dockerfile").is_file(),
        });
        if self.fail_build {
            return Err(ExecError::BuildFailed {
                reference: reference.to_string(),
                code: Some(1),
                output: "failed to solve: Dockerfile not found".to_string(),
            });
        }
        Ok(Self::ok())
    }

    async fn push(&self, reference: &str) -> Result<PushResult, ExecError> {
        self.record(format!("push {reference}"));
        let Some(digest) = &self.push_digest else {
            return Err(ExecError::PushFailed {
                reference: reference.to_string(),
                code: Some(1),
                output: "denied: requested access to the resource is denied".to_string(),
            });
        };
        let (repository, tag) = reference.rsplit_once(':').unwrap();
        Ok(PushResult {
            repository: repository.to_string(),
            tag: tag.to_string(),
            digest: digest.parse().unwrap(),
        })
    }

    async fn tag(&self, source: &str, target: &str) -> Result<(), ExecError> {
        self.record(format!("tag {source} {target}"));
        Ok(())
    }

    async fn remove_image(&self, reference: &str) -> Result<(), ExecError> {
        self.record(format!("rmi {reference}"));
        if self.fail_rmi {
            return Err(ExecError::RemoveImageFailed {
                reference: reference.to_string(),
                code: Some(1),
                output: "image is being used by a running container".to_string(),
            });
        }
        Ok(())
    }

    async fn available(&self) -> bool {
        true
    }
}
