//! The entity trait implemented by store-backed types.

use crate::entity::{AttributeValue, EntityType, Identity};
use crate::error::CoreResult;

/// A live, store-backed entity type.
///
/// Implementors describe their attributes once through [`Entity::entity_type`]
/// and expose attribute values by declared name. The codec never constructs
/// an entity; reading a document only resolves an existing one through an
/// [`EntityLookup`](crate::EntityLookup).
///
/// # Example
///
/// ```
/// use entidoc_core::{Attribute, AttributeValue, CoreError, CoreResult, Entity, EntityType, Identity};
///
/// struct Person {
///     id: i64,
///     name: String,
///     age: u32,
/// }
///
/// impl Entity for Person {
///     fn entity_type() -> EntityType {
///         EntityType::new("Person")
///             .attribute(Attribute::new("name"))
///             .attribute(Attribute::new("age").transient())
///     }
///
///     fn identity(&self) -> Identity {
///         Identity::new("Person", self.id)
///     }
///
///     fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
///         match name {
///             "name" => AttributeValue::serialize(&self.name),
///             "age" => AttributeValue::serialize(&self.age),
///             other => Err(CoreError::unknown_attribute("Person", other)),
///         }
///     }
/// }
/// ```
pub trait Entity: 'static {
    /// Returns the mapping table for this type.
    ///
    /// Called once per process by the schema cache. It must not itself
    /// request a schema.
    fn entity_type() -> EntityType;

    /// Returns the store's identity wrapper for this instance.
    fn identity(&self) -> Identity;

    /// Reads a declared attribute by its declared name.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownAttribute`](crate::CoreError::UnknownAttribute)
    /// for names the type does not declare, or a document error if the
    /// value cannot be converted.
    fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>>;
}
