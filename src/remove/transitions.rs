// ABOUTME: State transition methods for removal orchestration.
// ABOUTME: Each method consumes self and returns the next state on success.

use crate::executor::{BuildOptions, Engine, ExecError};
use crate::output::Output;
use crate::registry::RegistryClient;
use crate::scratch::{ScratchDir, ScratchOptions};

use super::Removal;
use super::error::RemoveError;
use super::resolve::resolve_references;
use super::state::{Done, Resolving, SharedReference, SoleReference};

/// Which removal strategy resolution picked.
#[derive(Debug)]
pub enum Disposition {
    /// The target tag is its digest's only reference; delete outright.
    Delete(Removal<SoleReference>),
    /// Sibling tags share the digest; untag via the dummy push.
    Untag(Removal<SharedReference>),
}

// =============================================================================
// Resolving -> SoleReference | SharedReference
// =============================================================================

impl Removal<Resolving> {
    /// Resolve the target's reference group and pick the strategy.
    ///
    /// # Errors
    ///
    /// Returns `RemoveError::NotFound` when the repository, the tag, or
    /// its digest cannot be resolved; nothing has been mutated at that
    /// point. Registry transport failures abort resolution.
    #[must_use = "removal state must be used"]
    pub async fn resolve(
        self,
        client: &RegistryClient,
        concurrency: usize,
    ) -> Result<Disposition, RemoveError> {
        let Some(references) = resolve_references(client, &self.image, concurrency).await? else {
            return Err(self.not_found());
        };

        // The group must still contain the target: its entry can vanish
        // between the tag listing and the digest probes.
        let Some(target) = references.iter().find(|r| r.tag == self.image.tag()) else {
            return Err(self.not_found());
        };
        let digest = target.digest.clone();

        if references.len() == 1 {
            Ok(Disposition::Delete(Removal {
                image: self.image,
                state: SoleReference { digest },
            }))
        } else {
            Ok(Disposition::Untag(Removal {
                image: self.image,
                state: SharedReference { digest, references },
            }))
        }
    }

    fn not_found(&self) -> RemoveError {
        RemoveError::NotFound {
            image: self.image.to_string(),
        }
    }
}

// =============================================================================
// SoleReference -> Done
// =============================================================================

impl Removal<SoleReference> {
    /// Delete the manifest the target tag points at. No other tag
    /// references it, so the content becomes unreachable.
    ///
    /// Manifest deletion is best-effort on the wire: a registry with
    /// deletion disabled logs a warning instead of failing the removal.
    #[must_use = "removal state must be used"]
    pub async fn delete(self, client: &RegistryClient, output: &Output) -> Removal<Done> {
        output.progress(&format!("[Deleting {}]", self.image));
        client
            .delete_manifest(self.image.name(), &self.state.digest)
            .await;
        output.progress(&format!("[Successfully deleted {}]", self.image));

        Removal {
            image: self.image,
            state: Done,
        }
    }
}

// =============================================================================
// SharedReference -> Done
// =============================================================================

impl Removal<SharedReference> {
    /// Untag without touching the shared digest: build a throwaway
    /// image, push it over the target tag so the tag points at a fresh
    /// digest, then delete that fresh digest. Sibling tags keep the
    /// original content; the tag name itself lingers until registry
    /// garbage collection.
    ///
    /// # Errors
    ///
    /// A failed build or push aborts the sequence with the engine
    /// error. Intermediate registry state is not rolled back.
    #[must_use = "removal state must be used"]
    pub async fn untag<E: Engine>(
        self,
        client: &RegistryClient,
        engine: &E,
        opts: &ScratchOptions,
        output: &Output,
    ) -> Result<Removal<Done>, RemoveError> {
        output.progress(&format!("[Untagging {}]", self.image));

        let scoped = self.image.scoped(client.host());
        let scratch = ScratchDir::create(opts.base.as_deref()).map_err(|e| {
            RemoveError::from(ExecError::Context {
                dir: opts.base.clone().unwrap_or_else(std::env::temp_dir),
                source: e,
            })
        })?;

        output.progress(" [Building dummy image]");
        engine
            .build(&scoped, scratch.path(), BuildOptions { dummy: true })
            .await?;
        output.progress(" [Successfully built dummy image]");

        scratch.cleanup(&opts.cleanup).await;

        output.progress(" [Pushing dummy image]");
        let pushed = engine.push(&scoped).await?;
        output.progress(" [Successfully pushed dummy image]");

        output.progress(&format!(" [Untagging {}]", self.image));
        if let Err(e) = engine.remove_image(&scoped).await {
            tracing::warn!("Could not remove local dummy image {}: {}", scoped, e);
        }

        // The tag now points at the dummy digest; deleting that digest
        // is what unhooks the tag. The shared original digest is never
        // deleted here.
        client
            .delete_manifest(self.image.name(), &pushed.digest)
            .await;

        output.progress(&format!("[Successfully untagged {}]", self.image));

        Ok(Removal {
            image: self.image,
            state: Done,
        })
    }
}
