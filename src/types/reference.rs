// ABOUTME: A tag together with the manifest digest it currently points at.
// ABOUTME: Groups of equal-digest references drive the removal decision.

use crate::types::Digest;

/// One tag of a repository and the digest it resolved to at probe time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub tag: String,
    pub digest: Digest,
}

impl Reference {
    pub fn new(tag: impl Into<String>, digest: Digest) -> Self {
        Self {
            tag: tag.into(),
            digest,
        }
    }
}
