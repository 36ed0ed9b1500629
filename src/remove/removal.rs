// ABOUTME: Generic removal struct parameterized by state marker.
// ABOUTME: State types carry their own data for compile-time guarantees.

use crate::types::{Digest, Reference, TaggedImage};

use super::state::{Resolving, SharedReference, SoleReference};

/// A removal in progress, parameterized by its current state.
///
/// The state type parameter `S` carries state-specific data (like the
/// resolved reference group) directly in the state type. A delete step
/// cannot be reached without the digest that justifies it.
#[derive(Debug)]
pub struct Removal<S> {
    pub(crate) image: TaggedImage,
    pub(crate) state: S,
}

impl Removal<Resolving> {
    /// Start a removal for `image`. Nothing talks to the registry until
    /// `resolve()`.
    pub fn new(image: TaggedImage) -> Self {
        Removal {
            image,
            state: Resolving,
        }
    }
}

impl<S> Removal<S> {
    /// The tag being removed.
    pub fn image(&self) -> &TaggedImage {
        &self.image
    }
}

// State-specific accessors for resolution data
impl Removal<SoleReference> {
    /// The digest the target tag resolves to.
    pub fn digest(&self) -> &Digest {
        &self.state.digest
    }
}

impl Removal<SharedReference> {
    /// The digest the target tag resolves to.
    pub fn digest(&self) -> &Digest {
        &self.state.digest
    }

    /// Every tag sharing the target's digest, the target included.
    pub fn references(&self) -> &[Reference] {
        &self.state.references
    }
}
