//! In-memory entity store.

use crate::codec::EntityCodec;
use crate::entity::{Entity, RawId};
use crate::error::{CoreError, CoreResult};
use crate::store::EntityLookup;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// An in-memory store of live entities.
///
/// Entities are keyed by the identity value a document write would carry,
/// so the lookup is the exact inverse of [`EntityCodec::identity_value`].
/// Suitable for tests and for caching already loaded entities.
///
/// # Thread Safety
///
/// The store is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust,ignore
/// let store = MemoryStore::new();
/// let ann = store.insert(Person { id: 7, name: "Ann".into() })?;
///
/// let json = entidoc_core::to_json(ann.as_ref())?;
/// let found = entidoc_core::from_json(&json, &store)?;
/// assert!(Arc::ptr_eq(&found.unwrap(), &ann));
/// ```
pub struct MemoryStore<E> {
    entities: RwLock<HashMap<RawId, Arc<E>>>,
    lookups: AtomicUsize,
}

impl<E> Default for MemoryStore<E> {
    fn default() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl<E: Entity> MemoryStore<E> {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entity and returns the shared reference to it.
    ///
    /// Replaces any entity stored under the same identity.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOperation`] if the entity has no identity
    /// value, or a configuration error if its type's schema is invalid.
    pub fn insert(&self, entity: E) -> CoreResult<Arc<E>> {
        self.insert_arc(Arc::new(entity))
    }

    /// Stores an already shared entity.
    ///
    /// # Errors
    ///
    /// See [`MemoryStore::insert`].
    pub fn insert_arc(&self, entity: Arc<E>) -> CoreResult<Arc<E>> {
        self.insert_with(&EntityCodec::default(), entity)
    }

    /// Stores an entity, keyed through the given codec's schema cache.
    ///
    /// # Errors
    ///
    /// See [`MemoryStore::insert`].
    pub fn insert_with(&self, codec: &EntityCodec<'_>, entity: Arc<E>) -> CoreResult<Arc<E>> {
        let key = codec.identity_value(entity.as_ref())?.ok_or_else(|| {
            CoreError::invalid_operation(format!(
                "cannot store {} without an identity value",
                entity.identity().entity()
            ))
        })?;
        self.entities.write().insert(key, Arc::clone(&entity));
        Ok(entity)
    }

    /// Returns the entity stored under `id` without counting a lookup.
    pub fn get(&self, id: &RawId) -> Option<Arc<E>> {
        self.entities.read().get(id).cloned()
    }

    /// Removes and returns the entity stored under `id`.
    pub fn remove(&self, id: &RawId) -> Option<Arc<E>> {
        self.entities.write().remove(id)
    }

    /// Returns the number of stored entities.
    pub fn len(&self) -> usize {
        self.entities.read().len()
    }

    /// Returns whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.read().is_empty()
    }

    /// Returns how many lookups have been served.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl<E: Entity> EntityLookup<E> for MemoryStore<E> {
    fn lookup(&self, id: &RawId) -> CoreResult<Option<Arc<E>>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        Ok(self.get(id))
    }
}

impl<E> std::fmt::Debug for MemoryStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("len", &self.entities.read().len())
            .field("lookups", &self.lookups.load(Ordering::Relaxed))
            .finish()
    }
}
