// ABOUTME: Validated domain types shared across the crate.
// ABOUTME: Tagged image references, manifest digests, tag-digest pairs.

mod digest;
mod reference;
mod tagged_image;

pub use digest::{Digest, ParseDigestError};
pub use reference::Reference;
pub use tagged_image::{ParseTaggedImageError, TaggedImage};
