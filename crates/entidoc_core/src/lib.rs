//! # EntiDoc Core
//!
//! Bidirectional codec between store-backed entities and generic documents.
//!
//! This crate provides:
//! - A declarative entity model ([`EntityType`], [`Attribute`]) in place of
//!   runtime reflection
//! - Schema resolution with fail-fast identity configuration checks,
//!   cached once per type ([`SchemaCache`])
//! - The write path, which unwraps identity wrappers and loads lazy
//!   collections
//! - The read path, which resolves a document back to the existing entity
//!   through an [`EntityLookup`]
//!
//! ## Usage
//!
//! ```
//! use entidoc_core::{
//!     from_json, to_json, Attribute, AttributeValue, CoreError, CoreResult, Entity,
//!     EntityType, Identity, MemoryStore,
//! };
//! use std::sync::Arc;
//!
//! struct Person {
//!     id: i64,
//!     name: String,
//!     age: u32,
//! }
//!
//! impl Entity for Person {
//!     fn entity_type() -> EntityType {
//!         EntityType::new("Person")
//!             .attribute(Attribute::new("name"))
//!             .attribute(Attribute::new("age").transient())
//!     }
//!
//!     fn identity(&self) -> Identity {
//!         Identity::new("Person", self.id)
//!     }
//!
//!     fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
//!         match name {
//!             "name" => AttributeValue::serialize(&self.name),
//!             "age" => AttributeValue::serialize(&self.age),
//!             other => Err(CoreError::unknown_attribute("Person", other)),
//!         }
//!     }
//! }
//!
//! let store = MemoryStore::new();
//! let ann = store.insert(Person { id: 7, name: "Ann".into(), age: 33 }).unwrap();
//!
//! let json = to_json(ann.as_ref()).unwrap();
//! assert_eq!(json, r#"{"$$database_id$$":7,"name":"Ann"}"#);
//!
//! let found: Option<Arc<Person>> = from_json(&json, &store).unwrap();
//! assert!(Arc::ptr_eq(&found.unwrap(), &ann));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod config;
mod entity;
mod error;
mod schema;
mod store;

pub use codec::{
    from_cbor, from_document, from_json, identity_value, to_cbor, to_document, to_json,
    EntityCodec,
};
pub use config::{CodecConfig, RESERVED_ID_FIELD};
pub use entity::{Attribute, AttributeValue, Entity, EntityType, Identity, Lazy, LazyCollection, RawId};
pub use error::{ConfigError, CoreError, CoreResult};
pub use schema::{FieldSpec, IdentitySource, SchemaCache, SerializationSchema};
pub use store::{EntityLookup, MemoryStore};

/// Re-exported document engine.
pub use entidoc_document as document;
