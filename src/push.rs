// ABOUTME: Push flows: local image, Dockerfile context, or git repository.
// ABOUTME: Tags into the registry's scope, pushes, prunes local leftovers.

use std::path::PathBuf;

use crate::error::Result;
use crate::executor::{BuildOptions, Engine, GitCli, PushResult};
use crate::output::Output;
use crate::registry::RegistryClient;
use crate::scratch::{ScratchDir, ScratchOptions};
use crate::types::TaggedImage;

/// Where the image content comes from.
#[derive(Debug, Clone)]
pub enum PushSource {
    /// The image already sits in the engine's local store.
    Local,
    /// Build from a directory containing a Dockerfile.
    Dockerfile(PathBuf),
    /// Clone a git repository and build its root Dockerfile.
    Git(String),
}

/// Pushes `image` to the registry, building it first when the source
/// asks for that. Returns what the engine reported about the pushed
/// manifest.
pub async fn push_image<E: Engine>(
    client: &RegistryClient,
    engine: &E,
    git: &GitCli,
    image: &TaggedImage,
    source: &PushSource,
    opts: &ScratchOptions,
    output: &Output,
) -> Result<PushResult> {
    let scoped = image.scoped(client.host());

    match source {
        PushSource::Local => {
            output.progress(&format!("[Pushing {image}]"));
            engine.tag(&image.to_string(), &scoped).await?;
            let pushed = engine.push(&scoped).await?;
            prune_local(engine, &scoped).await;
            output.progress(&format!("[Successfully pushed {image}]"));
            Ok(pushed)
        }
        PushSource::Dockerfile(context) => {
            output.progress(&format!("[Building {image}]"));
            engine
                .build(&scoped, context, BuildOptions::default())
                .await?;
            output.progress(&format!("[Successfully built {image}]"));

            push_scoped(engine, image, &scoped, output).await
        }
        PushSource::Git(url) => {
            let scratch = ScratchDir::create(opts.base.as_deref())?;

            output.progress(&format!("[Cloning {url}]"));
            git.clone(url, scratch.path()).await?;
            output.progress(&format!("[Successfully cloned {url}]"));

            output.progress(&format!("[Building {image}]"));
            engine
                .build(&scoped, scratch.path(), BuildOptions::default())
                .await?;
            output.progress(&format!("[Successfully built {image}]"));

            let pushed = push_scoped(engine, image, &scoped, output).await;
            scratch.cleanup(&opts.cleanup).await;
            pushed
        }
    }
}

async fn push_scoped<E: Engine>(
    engine: &E,
    image: &TaggedImage,
    scoped: &str,
    output: &Output,
) -> Result<PushResult> {
    output.progress(&format!("[Pushing {image}]"));
    let pushed = engine.push(scoped).await?;
    output.progress(&format!("[Successfully pushed {image}]"));
    prune_local(engine, scoped).await;
    Ok(pushed)
}

/// The scoped tag only existed to address the push; its local copy is
/// disposable and a failed removal should not fail the flow.
async fn prune_local<E: Engine>(engine: &E, scoped: &str) {
    if let Err(e) = engine.remove_image(scoped).await {
        tracing::warn!("Could not remove local image {}: {}", scoped, e);
    }
}
