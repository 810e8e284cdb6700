//! Entity ↔ document codec.
//!
//! Writing turns a live entity into a document using its type's resolved
//! schema. Reading extracts the identity from a document and resolves it to
//! the existing entity through an [`EntityLookup`]; no other document field
//! is applied to the entity.
//!
//! ```rust,ignore
//! let json = entidoc_core::to_json(&person)?;        // {"$$database_id$$":7,"name":"Ann"}
//! let same = entidoc_core::from_json(&json, &store)?; // Some(Arc<Person>)
//! ```

mod read;
mod write;

use crate::config::CodecConfig;
use crate::entity::{Entity, Identity, RawId};
use crate::error::{CoreError, CoreResult};
use crate::schema::{SchemaCache, SerializationSchema};
use crate::store::EntityLookup;
use entidoc_document::Value;
use std::sync::Arc;

/// Converts entities to documents and resolves documents to entities.
///
/// Cheap to copy. Holds its configuration and the schema cache it reads
/// from; [`EntityCodec::default`] uses the process-wide cache.
#[derive(Debug, Clone, Copy)]
pub struct EntityCodec<'c> {
    config: CodecConfig,
    cache: &'c SchemaCache,
}

impl Default for EntityCodec<'static> {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl EntityCodec<'static> {
    /// Creates a codec over the process-wide schema cache.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            cache: SchemaCache::global(),
        }
    }
}

impl<'c> EntityCodec<'c> {
    /// Creates a codec over a specific schema cache.
    #[must_use]
    pub fn with_cache(config: CodecConfig, cache: &'c SchemaCache) -> Self {
        Self { config, cache }
    }

    /// Returns the codec configuration.
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Returns the schema for `E`, resolving it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Config`] if the type's mapping table is invalid.
    pub fn schema<E: Entity>(&self) -> CoreResult<Arc<SerializationSchema>> {
        Ok(self.cache.schema::<E>()?)
    }
}

/// Reads the identity carried by a document field value.
///
/// `null` means no identity.
pub(crate) fn parse_identity(
    schema: &SerializationSchema,
    value: &Value,
) -> CoreResult<Option<RawId>> {
    if value.is_null() {
        return Ok(None);
    }
    RawId::from_value(value)
        .map(Some)
        .ok_or_else(|| CoreError::InvalidIdentity {
            entity: schema.entity(),
            field: schema.identity_field().to_string(),
            found: value.type_name(),
        })
}

/// Returns the entity's identity wrapper, checked against its own type.
pub(crate) fn own_identity<E: Entity>(
    schema: &SerializationSchema,
    entity: &E,
) -> CoreResult<Identity> {
    let identity = entity.identity();
    if identity.entity() != schema.entity() {
        return Err(CoreError::invalid_operation(format!(
            "{} returned identity {identity} of another entity type",
            schema.entity()
        )));
    }
    Ok(identity)
}

/// Writes an entity as a document with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::to_document`].
pub fn to_document<E: Entity>(entity: &E) -> CoreResult<Value> {
    EntityCodec::default().to_document(entity)
}

/// Writes an entity as JSON text with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::to_json`].
pub fn to_json<E: Entity>(entity: &E) -> CoreResult<String> {
    EntityCodec::default().to_json(entity)
}

/// Resolves a document to a stored entity with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::from_document`].
pub fn from_document<E, L>(document: &Value, store: &L) -> CoreResult<Option<Arc<E>>>
where
    E: Entity,
    L: EntityLookup<E> + ?Sized,
{
    EntityCodec::default().from_document(document, store)
}

/// Resolves JSON text to a stored entity with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::from_json`].
pub fn from_json<E, L>(text: &str, store: &L) -> CoreResult<Option<Arc<E>>>
where
    E: Entity,
    L: EntityLookup<E> + ?Sized,
{
    EntityCodec::default().from_json(text, store)
}

/// Writes an entity as CBOR bytes with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::to_cbor`].
pub fn to_cbor<E: Entity>(entity: &E) -> CoreResult<Vec<u8>> {
    EntityCodec::default().to_cbor(entity)
}

/// Resolves CBOR bytes to a stored entity with the default codec.
///
/// # Errors
///
/// See [`EntityCodec::from_cbor`].
pub fn from_cbor<E, L>(bytes: &[u8], store: &L) -> CoreResult<Option<Arc<E>>>
where
    E: Entity,
    L: EntityLookup<E> + ?Sized,
{
    EntityCodec::default().from_cbor(bytes, store)
}

/// Returns the identity value a write of `entity` would carry, with the
/// default codec.
///
/// # Errors
///
/// See [`EntityCodec::identity_value`].
pub fn identity_value<E: Entity>(entity: &E) -> CoreResult<Option<RawId>> {
    EntityCodec::default().identity_value(entity)
}
