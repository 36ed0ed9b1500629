// ABOUTME: Error types for registry HTTP operations.
// ABOUTME: Distinguishes unreachable, auth, and unexpected-status failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid registry address: {address}")]
    InvalidAddress { address: String },

    #[error("https registry addresses are not supported, use plain http: {address}")]
    HttpsUnsupported { address: String },

    #[error(
        "connection to the registry was refused\n\
         try changing the address in your configuration\n\
         current address: {address}"
    )]
    Unreachable { address: String },

    #[error("the registry requires authentication: {challenge}")]
    AuthRequired { challenge: String },

    #[error("unexpected status {status} from {path}")]
    UnexpectedStatus { status: hyper::StatusCode, path: String },

    #[error("registry transport error: {0}")]
    Transport(String),

    #[error("malformed registry response: {0}")]
    Malformed(String),
}
