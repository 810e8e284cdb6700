//! Serialization schemas.
//!
//! A schema is resolved once per entity type from its [`EntityType`]
//! description and then shared, immutable, for the rest of the process.
//!
//! [`EntityType`]: crate::EntityType

mod cache;
mod resolver;

pub use cache::SchemaCache;
pub use resolver::{FieldSpec, IdentitySource, SerializationSchema};
