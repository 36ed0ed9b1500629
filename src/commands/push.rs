// ABOUTME: Push command implementation.
// ABOUTME: Pushes local, Dockerfile-built, or git-built images to the registry.

use std::path::PathBuf;

use limani::config::Config;
use limani::error::Result;
use limani::executor::{CliEngine, GitCli};
use limani::output::Output;
use limani::push::{push_image, PushSource};
use limani::registry::RegistryClient;
use limani::scratch::ScratchOptions;
use limani::types::TaggedImage;

pub struct PushArgs {
    pub image: String,
    pub dockerfile: Option<PathBuf>,
    pub git: Option<String>,
}

/// Push an image to the registry, building it first when a Dockerfile
/// directory or git URL was given.
pub async fn push(config: Config, args: PushArgs, output: Output) -> Result<()> {
    let client = RegistryClient::new(&config.registry_address)?;
    let engine = CliEngine::new(&config.engine, output);
    super::ensure_engine(&engine).await?;

    // Accept the image with or without the registry host prefix.
    let image = TaggedImage::parse(&args.image)?.relative_to(client.host());

    let source = match (args.dockerfile, args.git) {
        (Some(dir), _) => PushSource::Dockerfile(dir),
        (_, Some(url)) => PushSource::Git(url),
        _ => PushSource::Local,
    };
    let git = GitCli::new(config.git_credentials()?, output);
    let opts = ScratchOptions {
        base: config.scratch_dir.clone(),
        cleanup: config.cleanup.clone(),
    };

    let pushed = push_image(&client, &engine, &git, &image, &source, &opts, &output).await?;

    output.result(&format!("Repository: {}", pushed.repository));
    output.result(&format!("Tag: {}", pushed.tag));
    output.result(&format!("Digest: {}", pushed.digest));
    Ok(())
}
