// ABOUTME: HTTP client for the Docker Registry v2 API.
// ABOUTME: One plain-http connection per request, no caching, no retries.

use http_body_util::BodyExt;
use hyper::{HeaderMap, Method, StatusCode};
use hyper_util::rt::TokioIo;
use serde::Deserialize;
use tokio::net::TcpStream;

use crate::registry::{CatalogEntry, RegistryAddress, RegistryError};
use crate::types::Digest;

const MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";
const VERSION_HEADER: &str = "docker-distribution-api-version";
const DIGEST_HEADER: &str = "docker-content-digest";

/// Client for a single registry instance. The registry is the sole
/// source of truth: every call fetches fresh state.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    address: RegistryAddress,
}

struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: bytes::Bytes,
}

#[derive(Deserialize)]
struct CatalogPayload {
    repositories: Vec<String>,
}

#[derive(Deserialize)]
struct TagsPayload {
    #[serde(default)]
    tags: Option<Vec<String>>,
}

impl RegistryClient {
    pub fn new(address: &str) -> Result<Self, RegistryError> {
        Ok(Self {
            address: RegistryAddress::parse(address)?,
        })
    }

    /// The configured address, scheme included.
    pub fn address(&self) -> &str {
        self.address.as_str()
    }

    /// The address without scheme, as the engine refers to it in image
    /// references.
    pub fn host(&self) -> &str {
        self.address.authority()
    }

    /// Checks that the registry speaks the v2 API and returns the
    /// version it advertises.
    pub async fn check(&self) -> Result<String, RegistryError> {
        let resp = self.request(Method::GET, "/v2/", None).await?;
        self.ensure_authorized(&resp)?;
        if !resp.status.is_success() {
            return Err(self.unexpected(&resp, "/v2/"));
        }
        // Responding at this endpoint at all implies v2; the header is
        // advisory.
        Ok(header_str(&resp.headers, VERSION_HEADER)
            .unwrap_or("registry/2.0")
            .to_string())
    }

    /// Names of every repository in the catalog.
    pub async fn repositories(&self) -> Result<Vec<String>, RegistryError> {
        let resp = self.request(Method::GET, "/v2/_catalog", None).await?;
        self.ensure_authorized(&resp)?;
        if !resp.status.is_success() {
            return Err(self.unexpected(&resp, "/v2/_catalog"));
        }
        let payload: CatalogPayload = serde_json::from_slice(&resp.body)
            .map_err(|e| RegistryError::Malformed(format!("catalog payload: {e}")))?;
        Ok(payload.repositories)
    }

    /// Tags of a repository, longest tag first so the most specific
    /// references list before their shorthand siblings. `None` when the
    /// repository is unknown or has no tags left.
    pub async fn tags(&self, name: &str) -> Result<Option<Vec<String>>, RegistryError> {
        let path = format!("/v2/{name}/tags/list");
        let resp = self.request(Method::GET, &path, None).await?;
        if resp.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.ensure_authorized(&resp)?;
        if !resp.status.is_success() {
            return Err(self.unexpected(&resp, &path));
        }
        let payload: TagsPayload = serde_json::from_slice(&resp.body)
            .map_err(|e| RegistryError::Malformed(format!("tag list payload: {e}")))?;
        Ok(payload.tags.map(|mut tags| {
            // Stable, so equal-length tags keep their listed order.
            tags.sort_by(|a, b| b.len().cmp(&a.len()));
            tags
        }))
    }

    /// The manifest digest a tag (or digest reference) currently points
    /// at. `None` when the repository or reference is unknown.
    pub async fn digest(
        &self,
        name: &str,
        reference: &str,
    ) -> Result<Option<Digest>, RegistryError> {
        let path = format!("/v2/{name}/manifests/{reference}");
        let resp = self.request(Method::GET, &path, Some(MANIFEST_V2)).await?;
        if resp.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        self.ensure_authorized(&resp)?;
        if !resp.status.is_success() {
            return Err(self.unexpected(&resp, &path));
        }
        let value = header_str(&resp.headers, DIGEST_HEADER).ok_or_else(|| {
            RegistryError::Malformed(format!("missing {DIGEST_HEADER} header for {path}"))
        })?;
        let digest = value
            .parse()
            .map_err(|e| RegistryError::Malformed(format!("{DIGEST_HEADER} header: {e}")))?;
        Ok(Some(digest))
    }

    /// Deletes the manifest at `digest`, dropping every tag that points
    /// at it. Best-effort: the registry may have deletion disabled, and
    /// a leftover manifest only costs storage until garbage collection.
    pub async fn delete_manifest(&self, name: &str, digest: &Digest) {
        let path = format!("/v2/{name}/manifests/{digest}");
        match self.request(Method::DELETE, &path, None).await {
            Ok(resp) if resp.status.is_success() => {
                tracing::debug!("Deleted manifest {} from {}", digest, name);
            }
            Ok(resp) => {
                tracing::warn!(
                    "Registry refused to delete manifest {} from {}: status {}",
                    digest,
                    name,
                    resp.status
                );
            }
            Err(e) => {
                tracing::warn!("Could not delete manifest {} from {}: {}", digest, name, e);
            }
        }
    }

    /// Every repository with its tags. Repositories whose tag list has
    /// emptied out are skipped rather than shown bare.
    pub async fn image_list(&self) -> Result<Vec<CatalogEntry>, RegistryError> {
        let mut entries = Vec::new();
        for name in self.repositories().await? {
            if let Some(tags) = self.tags(&name).await? {
                entries.push(CatalogEntry { name, tags });
            }
        }
        Ok(entries)
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        accept: Option<&str>,
    ) -> Result<RawResponse, RegistryError> {
        let stream = TcpStream::connect((self.address.host(), self.address.port()))
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::ConnectionRefused => RegistryError::Unreachable {
                    address: self.address.as_str().to_string(),
                },
                _ => RegistryError::Transport(format!("failed to connect: {e}")),
            })?;

        let io = TokioIo::new(stream);

        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(|e| RegistryError::Transport(format!("HTTP handshake failed: {e}")))?;

        // Drive the connection until the response is done.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                tracing::warn!("Registry connection error: {}", e);
            }
        });

        let mut builder = hyper::Request::builder()
            .method(method)
            .uri(path)
            .header("Host", self.address.authority());
        if let Some(accept) = accept {
            builder = builder.header("Accept", accept);
        }
        let req = builder
            .body(http_body_util::Empty::<bytes::Bytes>::new())
            .map_err(|e| RegistryError::Transport(format!("failed to build request: {e}")))?;

        let resp = sender
            .send_request(req)
            .await
            .map_err(|e| RegistryError::Transport(format!("request failed: {e}")))?;

        let (parts, body) = resp.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| RegistryError::Transport(format!("failed to read response: {e}")))?
            .to_bytes();

        Ok(RawResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    fn ensure_authorized(&self, resp: &RawResponse) -> Result<(), RegistryError> {
        if resp.status == StatusCode::UNAUTHORIZED {
            let challenge = header_str(&resp.headers, "www-authenticate")
                .unwrap_or_default()
                .to_string();
            return Err(RegistryError::AuthRequired { challenge });
        }
        Ok(())
    }

    fn unexpected(&self, resp: &RawResponse, path: &str) -> RegistryError {
        RegistryError::UnexpectedStatus {
            status: resp.status,
            path: path.to_string(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
