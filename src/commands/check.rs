// ABOUTME: Check command implementation.
// ABOUTME: Verifies the configured registry answers the v2 API.

use limani::config::Config;
use limani::error::Result;
use limani::output::Output;
use limani::registry::RegistryClient;

/// Probe the registry and report the API version it advertises.
pub async fn check(config: Config, output: Output) -> Result<()> {
    let client = RegistryClient::new(&config.registry_address)?;

    output.progress(&format!("[Checking {}]", client.address()));
    let version = client.check().await?;

    output.result(&format!("Registry: {}", client.address()));
    output.result(&format!("API version: {}", version));
    Ok(())
}
