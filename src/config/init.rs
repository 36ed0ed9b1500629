// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates limani.yml template files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::registry::RegistryAddress;

use super::{CONFIG_FILENAME, Config};

/// Write a starter configuration into `dir` and return its path.
pub fn init_config(dir: &Path, registry: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let mut config = Config::template();

    if let Some(address) = registry {
        RegistryAddress::parse(address).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.registry_address = address.to_string();
    }

    let yaml = generate_template_yaml(&config);
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"registry_address: {}
engine: {}
# git:
#   username: ci-bot
#   access_token:
#     env: LIMANI_GIT_TOKEN
# probe_concurrency: 1
# cleanup:
#   max_retries: 20
#   delay: 100ms
"#,
        config.registry_address, config.engine
    )
}
