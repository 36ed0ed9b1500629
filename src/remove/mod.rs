// ABOUTME: Safe-removal orchestration using the type state pattern.
// ABOUTME: Decides delete vs untag from the resolved reference group.

mod error;
mod removal;
mod resolve;
mod state;
mod transitions;

pub use error::{RemoveError, RemoveErrorKind};
pub use removal::Removal;
pub use resolve::resolve_references;
pub use state::{Done, Resolving, SharedReference, SoleReference};
pub use transitions::Disposition;

use crate::executor::Engine;
use crate::output::Output;
use crate::registry::RegistryClient;
use crate::scratch::ScratchOptions;
use crate::types::TaggedImage;

/// Removes `image` from the registry end to end: resolve its reference
/// group, then delete the manifest or untag via the dummy push,
/// depending on how many tags share its digest.
pub async fn remove_image<E: Engine>(
    client: &RegistryClient,
    engine: &E,
    image: TaggedImage,
    concurrency: usize,
    opts: &ScratchOptions,
    output: &Output,
) -> Result<(), RemoveError> {
    match Removal::new(image).resolve(client, concurrency).await? {
        Disposition::Delete(removal) => {
            removal.delete(client, output).await;
        }
        Disposition::Untag(removal) => {
            removal.untag(client, engine, opts, output).await?;
        }
    }
    Ok(())
}
