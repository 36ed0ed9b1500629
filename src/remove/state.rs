// ABOUTME: Removal state marker types for the type state pattern.
// ABOUTME: States carry the resolution data the next step needs.

use crate::types::{Digest, Reference};

/// Initial state: target parsed, registry not consulted yet.
/// Available actions: `resolve()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolving;

/// Resolved: the target tag is its digest's only reference.
/// Available actions: `delete()`
#[derive(Debug, Clone)]
pub struct SoleReference {
    pub(crate) digest: Digest,
}

/// Resolved: sibling tags share the target's digest.
/// Available actions: `untag()`
#[derive(Debug, Clone)]
pub struct SharedReference {
    pub(crate) digest: Digest,
    pub(crate) references: Vec<Reference>,
}

/// Terminal state: the target tag no longer serves its original
/// content.
#[derive(Debug, Clone, Copy, Default)]
pub struct Done;
