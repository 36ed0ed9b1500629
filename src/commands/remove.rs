// ABOUTME: Remove command implementation.
// ABOUTME: Drives the reference-counted tag removal protocol.

use limani::config::Config;
use limani::error::Result;
use limani::executor::CliEngine;
use limani::output::Output;
use limani::registry::RegistryClient;
use limani::remove::remove_image;
use limani::scratch::ScratchOptions;
use limani::types::TaggedImage;

/// Remove a tag from the registry. Sole references delete their
/// manifest outright; shared references are untagged via a dummy image
/// so sibling tags keep their content.
pub async fn remove(config: Config, image: String, output: Output) -> Result<()> {
    let client = RegistryClient::new(&config.registry_address)?;
    let engine = CliEngine::new(&config.engine, output);
    super::ensure_engine(&engine).await?;

    // Accept the image with or without the registry host prefix.
    let image = TaggedImage::parse(&image)?.relative_to(client.host());
    let opts = ScratchOptions {
        base: config.scratch_dir.clone(),
        cleanup: config.cleanup.clone(),
    };

    remove_image(
        &client,
        &engine,
        image,
        config.probe_concurrency,
        &opts,
        &output,
    )
    .await?;
    Ok(())
}
