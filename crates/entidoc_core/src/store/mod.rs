//! Store lookup interface.
//!
//! The codec never creates entities. Reading a document ends in a call to
//! [`EntityLookup::lookup`] with the plain identity value taken from the
//! document; whatever the store returns is the result.

mod memory;

pub use memory::MemoryStore;

use crate::entity::{Entity, RawId};
use crate::error::CoreResult;
use std::sync::Arc;

/// Lookup of stored entities of type `E` by plain identity value.
///
/// The call may block on I/O. Timeouts and retries are the store's concern.
pub trait EntityLookup<E: Entity> {
    /// Returns the stored entity with this identity, or `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store itself fails; a missing entity is
    /// `Ok(None)`, not an error.
    fn lookup(&self, id: &RawId) -> CoreResult<Option<Arc<E>>>;
}

impl<E, F> EntityLookup<E> for F
where
    E: Entity,
    F: Fn(&RawId) -> CoreResult<Option<Arc<E>>>,
{
    fn lookup(&self, id: &RawId) -> CoreResult<Option<Arc<E>>> {
        self(id)
    }
}
