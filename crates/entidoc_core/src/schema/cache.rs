//! Process-wide schema cache.

use crate::entity::Entity;
use crate::error::ConfigError;
use crate::schema::SerializationSchema;
use parking_lot::RwLock;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, error};

type Resolved = Result<Arc<SerializationSchema>, ConfigError>;
type Slot = Arc<OnceLock<Resolved>>;

/// Cache of resolved schemas, keyed by entity type.
///
/// Each type is resolved at most once per cache. Every type has its own
/// publish-once slot: concurrent first uses of one type wait for the one
/// canonical result, while other types stay readable. Configuration failures
/// are cached as well.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<TypeId, Slot>>,
}

impl SchemaCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide cache.
    pub fn global() -> &'static SchemaCache {
        static GLOBAL: OnceLock<SchemaCache> = OnceLock::new();
        GLOBAL.get_or_init(SchemaCache::new)
    }

    /// Returns the schema for `E`, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns the type's configuration error, on this and every later call.
    pub fn schema<E: Entity>(&self) -> Result<Arc<SerializationSchema>, ConfigError> {
        self.slot::<E>().get_or_init(resolve::<E>).clone()
    }

    /// Returns whether `E` has been resolved, successfully or not.
    pub fn contains<E: Entity>(&self) -> bool {
        self.entries
            .read()
            .get(&TypeId::of::<E>())
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Returns the number of resolved types.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// Returns whether no type has been resolved yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot<E: Entity>(&self) -> Slot {
        let key = TypeId::of::<E>();
        if let Some(slot) = self.entries.read().get(&key) {
            return Arc::clone(slot);
        }
        Arc::clone(self.entries.write().entry(key).or_default())
    }
}

fn resolve<E: Entity>() -> Resolved {
    let ty = E::entity_type();
    let resolved = SerializationSchema::resolve(&ty).map(Arc::new);
    match &resolved {
        Ok(schema) => debug!(
            entity = schema.entity(),
            fields = schema.fields().len(),
            identity_field = schema.identity_field(),
            synthetic = schema.is_synthetic(),
            "resolved serialization schema"
        ),
        Err(err) => error!(entity = ty.name(), %err, "invalid serialization schema"),
    }
    resolved
}
