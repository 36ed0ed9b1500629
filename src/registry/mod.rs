// ABOUTME: Docker Registry v2 API access.
// ABOUTME: Address parsing, catalog/tag/manifest operations over plain http.

mod client;
mod error;

pub use client::RegistryClient;
pub use error::RegistryError;

/// A repository name with the tags it currently carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: String,
    pub tags: Vec<String>,
}

/// Validated registry base address. Plain http only; the transport has
/// no TLS connector, which fits the private clear-text registries this
/// tool targets.
#[derive(Debug, Clone)]
pub struct RegistryAddress {
    address: String,
    authority: String,
    host: String,
    port: u16,
}

impl RegistryAddress {
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        let address = input.trim().trim_end_matches('/').to_string();
        let invalid = || RegistryError::InvalidAddress {
            address: input.to_string(),
        };

        let uri: hyper::Uri = address.parse().map_err(|_| invalid())?;
        match uri.scheme_str() {
            Some("http") => {}
            Some("https") => {
                return Err(RegistryError::HttpsUnsupported {
                    address: input.to_string(),
                });
            }
            _ => return Err(invalid()),
        }

        let authority = uri.authority().ok_or_else(invalid)?;
        let host = authority.host().to_string();
        if host.is_empty() {
            return Err(invalid());
        }
        let port = authority.port_u16().unwrap_or(80);

        Ok(Self {
            authority: authority.to_string(),
            address,
            host,
            port,
        })
    }

    /// The address as configured, scheme included.
    pub fn as_str(&self) -> &str {
        &self.address
    }

    /// `host[:port]`, the form the engine scopes image references with.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}
