// ABOUTME: List command implementation.
// ABOUTME: Prints every repository on the registry together with its tags.

use limani::config::Config;
use limani::error::Result;
use limani::output::Output;
use limani::registry::RegistryClient;

/// List the registry catalog with the tags of each repository.
pub async fn list(config: Config, output: Output) -> Result<()> {
    let client = RegistryClient::new(&config.registry_address)?;

    output.progress(&format!("[Listing images on {}]", client.address()));
    let entries = client.image_list().await?;

    if entries.is_empty() {
        output.result("The registry holds no images.");
        return Ok(());
    }

    for entry in entries {
        output.result(&entry.name);
        for tag in &entry.tags {
            output.result(&format!("  {}", tag));
        }
    }
    Ok(())
}
