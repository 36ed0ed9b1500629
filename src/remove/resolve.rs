// ABOUTME: Reference resolution: which tags share a target's digest.
// ABOUTME: Probes every tag of the repository and keeps the equal ones.

use futures::StreamExt;
use futures::stream;

use crate::registry::{RegistryClient, RegistryError};
use crate::types::{Reference, TaggedImage};

/// Resolves the reference group of `image`: every tag of its repository
/// whose manifest digest equals the target tag's digest, normally
/// including the target itself. Group order follows the tag listing
/// (longest tag first).
///
/// `None` means the repository or the target tag is unknown. A sibling
/// tag vanishing mid-probe is skipped; any other probe failure aborts
/// resolution, because deciding "sole reference" from a silently
/// shrunken group could delete content other tags still need.
pub async fn resolve_references(
    client: &RegistryClient,
    image: &TaggedImage,
    concurrency: usize,
) -> Result<Option<Vec<Reference>>, RegistryError> {
    let Some(tags) = client.tags(image.name()).await? else {
        return Ok(None);
    };

    let Some(target_digest) = client.digest(image.name(), image.tag()).await? else {
        return Ok(None);
    };

    // buffered() keeps the tag order at any concurrency level; the
    // default configuration probes strictly serially.
    let mut probes = stream::iter(tags)
        .map(|tag| async move {
            let digest = client.digest(image.name(), &tag).await?;
            Ok::<_, RegistryError>((tag, digest))
        })
        .buffered(concurrency.max(1));

    let mut references = Vec::new();
    while let Some(probe) = probes.next().await {
        let (tag, digest) = probe?;
        if let Some(digest) = digest {
            if digest == target_digest {
                references.push(Reference::new(tag, digest));
            }
        }
    }

    Ok(Some(references))
}
