// ABOUTME: Removal error types with SNAFU pattern.
// ABOUTME: Unifies registry and engine failures for programmatic handling.

use snafu::Snafu;

use crate::executor::ExecError;
use crate::registry::RegistryError;

/// Unified removal error across resolution and execution steps.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RemoveError {
    #[snafu(display("image {image} is not on this registry"))]
    NotFound { image: String },

    #[snafu(display("registry operation failed: {source}"))]
    Registry { source: RegistryError },

    #[snafu(display("engine operation failed: {source}"))]
    Engine { source: ExecError },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveErrorKind {
    /// The tag does not resolve on the registry; nothing was changed.
    NotFound,
    /// The registry could not be reached at the configured address.
    RegistryUnreachable,
    /// The registry demanded authentication.
    AuthRequired,
    /// Any other registry failure.
    Registry,
    /// A container engine command failed.
    Engine,
}

impl RemoveError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> RemoveErrorKind {
        match self {
            RemoveError::NotFound { .. } => RemoveErrorKind::NotFound,
            RemoveError::Registry { source } => match source {
                RegistryError::Unreachable { .. } => RemoveErrorKind::RegistryUnreachable,
                RegistryError::AuthRequired { .. } => RemoveErrorKind::AuthRequired,
                _ => RemoveErrorKind::Registry,
            },
            RemoveError::Engine { .. } => RemoveErrorKind::Engine,
        }
    }
}

impl From<RegistryError> for RemoveError {
    fn from(source: RegistryError) -> Self {
        RemoveError::Registry { source }
    }
}

impl From<ExecError> for RemoveError {
    fn from(source: ExecError) -> Self {
        RemoveError::Engine { source }
    }
}
