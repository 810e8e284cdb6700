//! Read path: document → entity reference.

use super::{parse_identity, EntityCodec};
use crate::entity::Entity;
use crate::error::{CoreError, CoreResult};
use crate::store::EntityLookup;
use entidoc_document::{from_cbor, from_json, Value};
use std::sync::Arc;
use tracing::{debug, trace};

impl EntityCodec<'_> {
    /// Resolves a document to the stored entity it identifies.
    ///
    /// Fields are scanned in document order; the last occurrence of the
    /// identity field wins. Every other field is read and discarded - the
    /// entity is looked up, never hydrated. The store is queried once, after
    /// the scan.
    ///
    /// Returns `Ok(None)` when the document is `null`, has no identity field,
    /// carries a `null` identity, or the store has no such entity.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the type's schema is invalid,
    /// [`CoreError::InvalidFormat`] if the document is not an object,
    /// [`CoreError::InvalidIdentity`] if the identity is not an integer or
    /// text, or the store's own error from the lookup.
    pub fn from_document<E, L>(&self, document: &Value, store: &L) -> CoreResult<Option<Arc<E>>>
    where
        E: Entity,
        L: EntityLookup<E> + ?Sized,
    {
        let schema = self.schema::<E>()?;
        if document.is_null() {
            return Ok(None);
        }
        let fields = document.as_object().ok_or_else(|| {
            CoreError::invalid_format(format!(
                "expected object for {}, found {}",
                schema.entity(),
                document.type_name()
            ))
        })?;

        let mut identity = None;
        for (name, value) in fields {
            if name == schema.identity_field() {
                identity = Some(value);
            }
        }

        let Some(value) = identity else {
            debug!(
                entity = schema.entity(),
                field = schema.identity_field(),
                "document has no identity field"
            );
            return Ok(None);
        };
        let Some(raw) = parse_identity(&schema, value)? else {
            debug!(entity = schema.entity(), "document identity is null");
            return Ok(None);
        };

        trace!(entity = schema.entity(), id = %raw, "looking up entity");
        let found = store.lookup(&raw)?;
        if found.is_none() {
            debug!(entity = schema.entity(), id = %raw, "no stored entity for identity");
        }
        Ok(found)
    }

    /// Resolves JSON text to the stored entity it identifies.
    ///
    /// # Errors
    ///
    /// Returns a document error if the text is not valid JSON, otherwise see
    /// [`EntityCodec::from_document`].
    pub fn from_json<E, L>(&self, text: &str, store: &L) -> CoreResult<Option<Arc<E>>>
    where
        E: Entity,
        L: EntityLookup<E> + ?Sized,
    {
        let document = from_json(text)?;
        self.from_document(&document, store)
    }

    /// Resolves CBOR bytes to the stored entity they identify.
    ///
    /// # Errors
    ///
    /// Returns a document error if the bytes are not valid CBOR, otherwise
    /// see [`EntityCodec::from_document`].
    pub fn from_cbor<E, L>(&self, bytes: &[u8], store: &L) -> CoreResult<Option<Arc<E>>>
    where
        E: Entity,
        L: EntityLookup<E> + ?Sized,
    {
        let document = from_cbor(bytes)?;
        self.from_document(&document, store)
    }

    /// Resolves a JSON array of entity documents, one result per element.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFormat`] if the text is not an array, or
    /// the first element error.
    pub fn from_json_array<E, L>(&self, text: &str, store: &L) -> CoreResult<Vec<Option<Arc<E>>>>
    where
        E: Entity,
        L: EntityLookup<E> + ?Sized,
    {
        let document = from_json(text)?;
        let items = document.as_array().ok_or_else(|| {
            CoreError::invalid_format(format!(
                "expected array of entity documents, found {}",
                document.type_name()
            ))
        })?;
        items
            .iter()
            .map(|item| self.from_document(item, store))
            .collect()
    }
}
