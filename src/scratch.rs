// ABOUTME: Per-run scratch directories for build contexts and git clones.
// ABOUTME: Uniquely named, removal retried because engines hold them briefly.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::CleanupConfig;

/// Where scratch dirs live and how hard to try removing them.
#[derive(Debug, Clone, Default)]
pub struct ScratchOptions {
    /// Base directory for scratch dirs; system temp when unset.
    pub base: Option<PathBuf>,
    pub cleanup: CleanupConfig,
}

/// A uniquely named temporary directory handed to a single build or
/// clone. Release it with [`cleanup`](Self::cleanup); dropping without
/// cleanup still removes the directory, just without retries.
#[derive(Debug)]
pub struct ScratchDir {
    dir: TempDir,
}

impl ScratchDir {
    /// Creates a fresh directory under `base`, or under the system temp
    /// dir when no base is configured.
    pub fn create(base: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        let builder = builder.prefix("limani-");
        let dir = match base {
            Some(base) => builder.tempdir_in(base)?,
            None => builder.tempdir()?,
        };
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Removes the directory, retrying per the configured policy. The
    /// engine can keep the build context open briefly after its process
    /// exits. Best-effort: exhausting the retries only logs a warning.
    pub async fn cleanup(self, policy: &CleanupConfig) {
        for attempt in 0..=policy.max_retries {
            match tokio::fs::remove_dir_all(self.dir.path()).await {
                Ok(()) => return,
                Err(e) if e.kind() == io::ErrorKind::NotFound => return,
                Err(e) => {
                    if attempt == policy.max_retries {
                        tracing::warn!(
                            "Failed to remove scratch dir {}: {}",
                            self.dir.path().display(),
                            e
                        );
                        return;
                    }
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_unique_directories() {
        let base = tempfile::tempdir().unwrap();
        let a = ScratchDir::create(Some(base.path())).unwrap();
        let b = ScratchDir::create(Some(base.path())).unwrap();

        assert_ne!(a.path(), b.path());
        assert!(a.path().starts_with(base.path()));
        assert!(a.path().is_dir());
        assert!(b.path().is_dir());
    }

    #[tokio::test]
    async fn cleanup_removes_directory_and_contents() {
        let base = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(Some(base.path())).unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("Dockerfile"), "FROM alpine:latest\n").unwrap();

        scratch.cleanup(&CleanupConfig::default()).await;

        assert!(!path.exists());
    }

    #[tokio::test]
    async fn cleanup_tolerates_already_removed_directory() {
        let base = tempfile::tempdir().unwrap();
        let scratch = ScratchDir::create(Some(base.path())).unwrap();
        std::fs::remove_dir_all(scratch.path()).unwrap();

        // Must return promptly instead of burning through retries.
        scratch.cleanup(&CleanupConfig::default()).await;
    }

    #[test]
    fn drop_removes_directory() {
        let base = tempfile::tempdir().unwrap();
        let path = {
            let scratch = ScratchDir::create(Some(base.path())).unwrap();
            scratch.path().to_path_buf()
        };

        assert!(!path.exists());
    }
}
