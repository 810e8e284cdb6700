//! Write path: entity → document.

use super::{own_identity, parse_identity, EntityCodec};
use crate::entity::{Entity, RawId};
use crate::error::CoreResult;
use crate::schema::IdentitySource;
use entidoc_document::{to_cbor, to_json, to_json_pretty, Value};
use tracing::trace;

impl EntityCodec<'_> {
    /// Writes an entity as a document object.
    ///
    /// Field order: the synthetic identity field (if the schema has one),
    /// then serialized attributes in declaration order. Identity wrappers
    /// are written as their raw value and lazy collections are loaded into
    /// arrays. The entity is not modified.
    ///
    /// # Errors
    ///
    /// Returns a configuration error on the type's first use if its schema
    /// is invalid, [`InvalidOperation`](crate::CoreError::InvalidOperation)
    /// if the identity wrapper belongs to another entity type, or any error
    /// raised while reading or converting an attribute value.
    pub fn to_document<E: Entity>(&self, entity: &E) -> CoreResult<Value> {
        let schema = self.schema::<E>()?;
        let mut fields = Vec::with_capacity(schema.fields().len() + 1);

        if schema.is_synthetic() {
            let identity = own_identity(&schema, entity)?;
            fields.push((schema.identity_field().to_string(), identity.raw().to_value()));
        }

        let identity_attribute = match schema.identity_source() {
            IdentitySource::Attribute(name) => Some(name.as_str()),
            IdentitySource::Synthetic => None,
        };

        for field in schema.fields() {
            let value = entity.attribute(field.attribute())?.into_document()?;
            if value.is_null()
                && self.config().skip_nulls
                && identity_attribute != Some(field.attribute())
            {
                continue;
            }
            fields.push((field.name().to_string(), value));
        }

        trace!(entity = schema.entity(), fields = fields.len(), "wrote entity document");
        Ok(Value::Object(fields))
    }

    /// Writes an entity as JSON text, indented if the codec is `pretty`.
    ///
    /// # Errors
    ///
    /// See [`EntityCodec::to_document`].
    pub fn to_json<E: Entity>(&self, entity: &E) -> CoreResult<String> {
        let document = self.to_document(entity)?;
        self.render(&document)
    }

    /// Writes several entities as one JSON array, in iteration order.
    ///
    /// # Errors
    ///
    /// Fails on the first entity that cannot be written.
    pub fn to_json_array<'e, E, I>(&self, entities: I) -> CoreResult<String>
    where
        E: Entity,
        I: IntoIterator<Item = &'e E>,
    {
        let documents = entities
            .into_iter()
            .map(|entity| self.to_document(entity))
            .collect::<CoreResult<Vec<_>>>()?;
        self.render(&Value::Array(documents))
    }

    /// Writes an entity as CBOR bytes.
    ///
    /// # Errors
    ///
    /// See [`EntityCodec::to_document`].
    pub fn to_cbor<E: Entity>(&self, entity: &E) -> CoreResult<Vec<u8>> {
        let document = self.to_document(entity)?;
        Ok(to_cbor(&document)?)
    }

    /// Returns the identity value a write of `entity` would carry.
    ///
    /// For a synthetic identity this is the wrapper's raw value. For an
    /// attribute-sourced identity it is that attribute's value, or `None` if
    /// the attribute is null.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema is invalid, if the identity wrapper
    /// belongs to another entity type, or if the identity attribute holds
    /// something other than an integer or text.
    pub fn identity_value<E: Entity>(&self, entity: &E) -> CoreResult<Option<RawId>> {
        let schema = self.schema::<E>()?;
        match schema.identity_source() {
            IdentitySource::Synthetic => Ok(Some(own_identity(&schema, entity)?.into_raw())),
            IdentitySource::Attribute(name) => {
                let value = entity.attribute(name)?.into_document()?;
                parse_identity(&schema, &value)
            }
        }
    }

    fn render(&self, document: &Value) -> CoreResult<String> {
        let text = if self.config().pretty {
            to_json_pretty(document)?
        } else {
            to_json(document)?
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{CodecConfig, RESERVED_ID_FIELD};
    use crate::entity::{Attribute, AttributeValue, Entity, EntityType, Identity, Lazy, RawId};
    use crate::error::{CoreError, CoreResult};
    use crate::schema::SchemaCache;
    use crate::EntityCodec;
    use entidoc_document::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Person {
        id: i64,
        name: String,
        age: u32,
    }

    impl Entity for Person {
        fn entity_type() -> EntityType {
            EntityType::new("Person")
                .attribute(Attribute::new("name"))
                .attribute(Attribute::new("age").transient())
        }

        fn identity(&self) -> Identity {
            Identity::new("Person", self.id)
        }

        fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
            match name {
                "name" => AttributeValue::serialize(&self.name),
                "age" => AttributeValue::serialize(&self.age),
                other => Err(CoreError::unknown_attribute("Person", other)),
            }
        }
    }

    struct Account {
        id: i64,
        external_id: Option<String>,
        nickname: Option<String>,
    }

    impl Entity for Account {
        fn entity_type() -> EntityType {
            EntityType::new("Account")
                .attribute(Attribute::new("externalId").identity_source())
                .attribute(Attribute::new("nickname"))
        }

        fn identity(&self) -> Identity {
            Identity::new("Account", self.id)
        }

        fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
            match name {
                "externalId" => AttributeValue::serialize(&self.external_id),
                "nickname" => AttributeValue::serialize(&self.nickname),
                other => Err(CoreError::unknown_attribute("Account", other)),
            }
        }
    }

    struct Basket {
        id: i64,
        owner: Option<Identity>,
        items: Lazy<String>,
    }

    impl Entity for Basket {
        fn entity_type() -> EntityType {
            EntityType::new("Basket")
                .attribute(Attribute::new("owner"))
                .attribute(Attribute::new("items"))
        }

        fn identity(&self) -> Identity {
            Identity::new("Basket", self.id)
        }

        fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
            match name {
                "owner" => Ok(AttributeValue::reference(self.owner.clone())),
                "items" => Ok(AttributeValue::collection(&self.items)),
                other => Err(CoreError::unknown_attribute("Basket", other)),
            }
        }
    }

    #[derive(Debug)]
    struct Tagged {
        id: i64,
        label: String,
    }

    impl Entity for Tagged {
        fn entity_type() -> EntityType {
            EntityType::new("Tagged")
                .attribute(Attribute::new("id"))
                .attribute(Attribute::new("label"))
        }

        fn identity(&self) -> Identity {
            Identity::new("Tagged", self.id)
        }

        fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
            match name {
                "id" => Ok(AttributeValue::reference(Some(self.identity()))),
                "label" => AttributeValue::serialize(&self.label),
                other => Err(CoreError::unknown_attribute("Tagged", other)),
            }
        }
    }

    /// Hands out a wrapper owned by another entity type.
    struct Impostor;

    impl Entity for Impostor {
        fn entity_type() -> EntityType {
            EntityType::new("Impostor")
        }

        fn identity(&self) -> Identity {
            Identity::new("Person", 7)
        }

        fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
            Err(CoreError::unknown_attribute("Impostor", name))
        }
    }

    fn ann() -> Person {
        Person {
            id: 7,
            name: "Ann".into(),
            age: 33,
        }
    }

    #[test]
    fn synthetic_identity_comes_first() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);

        let doc = codec.to_document(&ann()).unwrap();
        assert_eq!(
            doc,
            Value::object([
                (RESERVED_ID_FIELD, Value::Integer(7)),
                ("name", Value::from("Ann")),
            ])
        );
        assert_eq!(
            codec.to_json(&ann()).unwrap(),
            r#"{"$$database_id$$":7,"name":"Ann"}"#
        );
    }

    #[test]
    fn declared_wrapper_attribute_is_written_once() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let tagged = Tagged {
            id: 3,
            label: "blue".into(),
        };

        assert_eq!(
            codec.to_json(&tagged).unwrap(),
            r#"{"$$database_id$$":3,"label":"blue"}"#
        );
    }

    #[test]
    fn foreign_identity_wrapper_is_rejected() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);

        let err = codec.to_document(&Impostor).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperation { .. }));
        assert!(err.to_string().contains("Person#7"));

        let err = codec.identity_value(&Impostor).unwrap_err();
        assert!(matches!(err, CoreError::InvalidOperation { .. }));
    }

    #[test]
    fn attribute_identity_is_written_once_in_place() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let account = Account {
            id: 1,
            external_id: Some("abc123".into()),
            nickname: Some("main".into()),
        };

        let doc = codec.to_document(&account).unwrap();
        assert_eq!(
            doc,
            Value::object([
                ("externalId", Value::from("abc123")),
                ("nickname", Value::from("main")),
            ])
        );
        assert!(doc.get(RESERVED_ID_FIELD).is_none());
    }

    #[test]
    fn relational_values_are_unwrapped() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&loads);
        let basket = Basket {
            id: 3,
            owner: Some(Identity::new("Person", 7)),
            items: Lazy::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["apple".into(), "pear".into()])
            }),
        };

        let doc = codec.to_document(&basket).unwrap();
        assert_eq!(doc.get("owner"), Some(&Value::Integer(7)));
        assert_eq!(
            doc.get("items"),
            Some(&Value::Array(vec![Value::from("apple"), Value::from("pear")]))
        );
        assert_eq!(loads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn collection_load_failure_propagates() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let basket = Basket {
            id: 3,
            owner: None,
            items: Lazy::new(|| Err(CoreError::lookup("Item", "store offline"))),
        };

        let err = codec.to_document(&basket).unwrap_err();
        assert!(matches!(err, CoreError::Lookup { entity: "Item", .. }));
    }

    #[test]
    fn skip_nulls_keeps_identity_attribute() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::new().skip_nulls(true), &cache);
        let account = Account {
            id: 1,
            external_id: None,
            nickname: None,
        };

        let doc = codec.to_document(&account).unwrap();
        assert_eq!(doc, Value::object([("externalId", Value::Null)]));
    }

    #[test]
    fn nulls_written_by_default() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let basket = Basket {
            id: 1,
            owner: None,
            items: Lazy::loaded(Vec::new()),
        };

        let doc = codec.to_document(&basket).unwrap();
        assert_eq!(doc.get("owner"), Some(&Value::Null));
        assert_eq!(doc.get("items"), Some(&Value::Array(Vec::new())));
    }

    #[test]
    fn pretty_output() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::new().pretty(true), &cache);

        let text = codec.to_json(&ann()).unwrap();
        assert!(text.contains('\n'));
        assert!(text.starts_with("{\n  \"$$database_id$$\": 7"));
    }

    #[test]
    fn json_array_of_entities() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);
        let people = [
            ann(),
            Person {
                id: 8,
                name: "Bo".into(),
                age: 1,
            },
        ];

        assert_eq!(
            codec.to_json_array(&people).unwrap(),
            r#"[{"$$database_id$$":7,"name":"Ann"},{"$$database_id$$":8,"name":"Bo"}]"#
        );
    }

    #[test]
    fn identity_values() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);

        assert_eq!(codec.identity_value(&ann()).unwrap(), Some(RawId::Integer(7)));

        let account = Account {
            id: 1,
            external_id: Some("abc123".into()),
            nickname: None,
        };
        assert_eq!(
            codec.identity_value(&account).unwrap(),
            Some(RawId::Text("abc123".into()))
        );

        let anonymous = Account {
            id: 2,
            external_id: None,
            nickname: None,
        };
        assert_eq!(codec.identity_value(&anonymous).unwrap(), None);
    }

    #[test]
    fn cbor_output_decodes_to_same_document() {
        let cache = SchemaCache::new();
        let codec = EntityCodec::with_cache(CodecConfig::default(), &cache);

        let bytes = codec.to_cbor(&ann()).unwrap();
        assert_eq!(
            entidoc_document::from_cbor(&bytes).unwrap(),
            codec.to_document(&ann()).unwrap()
        );
    }
}
