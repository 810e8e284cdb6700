//! Schema resolution for one entity type.

use crate::config::RESERVED_ID_FIELD;
use crate::entity::{Attribute, EntityType};
use crate::error::ConfigError;
use std::collections::HashMap;
use tracing::warn;

/// A serialized attribute and its document field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    attribute: String,
    name: String,
}

impl FieldSpec {
    /// Returns the declared attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Returns the document field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Where the identity written to a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    /// The store's identity wrapper, written as an extra leading field.
    Synthetic,
    /// A declared attribute, written in its normal position.
    Attribute(String),
}

/// The resolved serialization schema of one entity type.
///
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationSchema {
    entity: &'static str,
    fields: Vec<FieldSpec>,
    identity_field: String,
    identity_source: IdentitySource,
}

impl SerializationSchema {
    /// Resolves the schema for an entity type description.
    ///
    /// Deterministic for a given description.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the identity configuration is ambiguous
    /// or conflicting, if the identity source is not serialized, if the
    /// identity field name collides with a field and cannot fall back, or if
    /// two fields share a document name.
    pub fn resolve(ty: &EntityType) -> Result<Self, ConfigError> {
        let entity = ty.name();
        let wrapper = ty.identity_attribute_name();
        // The wrapper is written as the synthetic identity, never as a field.
        let fields: Vec<FieldSpec> = ty
            .declared_attributes()
            .iter()
            .filter(|attr| attr.is_serialized())
            .filter(|attr| attr.name() != wrapper || attr.is_identity_source())
            .map(|attr| FieldSpec {
                attribute: attr.name().to_string(),
                name: attr.resolved_name().to_string(),
            })
            .collect();

        let sources: Vec<&Attribute> = ty
            .declared_attributes()
            .iter()
            .filter(|attr| attr.is_identity_source())
            .collect();

        if sources.len() > 1 {
            return Err(ConfigError::AmbiguousIdentitySource {
                entity,
                attributes: sources.iter().map(|a| a.name().to_string()).collect(),
            });
        }

        let (identity_field, identity_source) = match sources.first() {
            Some(source) => {
                if let Some(override_name) = ty.identity_field_override() {
                    return Err(ConfigError::ConflictingIdentityConfiguration {
                        entity,
                        override_name: override_name.to_string(),
                        attribute: source.name().to_string(),
                    });
                }
                if !source.is_serialized() {
                    return Err(ConfigError::IgnoredIdentitySource {
                        entity,
                        attribute: source.name().to_string(),
                    });
                }
                (
                    source.resolved_name().to_string(),
                    IdentitySource::Attribute(source.name().to_string()),
                )
            }
            None => (
                synthetic_field_name(entity, ty.identity_field_override(), &fields)?,
                IdentitySource::Synthetic,
            ),
        };

        check_unique_names(entity, &fields)?;

        Ok(Self {
            entity,
            fields,
            identity_field,
            identity_source,
        })
    }

    /// Returns the entity type name.
    #[must_use]
    pub const fn entity(&self) -> &'static str {
        self.entity
    }

    /// Returns the serialized fields in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Returns the document field name carrying identity.
    #[must_use]
    pub fn identity_field(&self) -> &str {
        &self.identity_field
    }

    /// Returns the identity source.
    #[must_use]
    pub const fn identity_source(&self) -> &IdentitySource {
        &self.identity_source
    }

    /// Returns whether the identity is written as a synthetic field.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self.identity_source, IdentitySource::Synthetic)
    }

    /// Returns the field that doubles as identity, if attribute-sourced.
    #[must_use]
    pub fn identity_attribute(&self) -> Option<&FieldSpec> {
        match &self.identity_source {
            IdentitySource::Synthetic => None,
            IdentitySource::Attribute(name) => self.fields.iter().find(|f| &f.attribute == name),
        }
    }
}

/// Picks the synthetic identity field name, falling back to the reserved
/// name when an override collides with a field.
fn synthetic_field_name(
    entity: &'static str,
    override_name: Option<&str>,
    fields: &[FieldSpec],
) -> Result<String, ConfigError> {
    let collides = |name: &str| fields.iter().any(|f| f.name == name);
    let wanted = override_name.unwrap_or(RESERVED_ID_FIELD);

    if !collides(wanted) {
        return Ok(wanted.to_string());
    }
    if override_name.is_some() && wanted != RESERVED_ID_FIELD && !collides(RESERVED_ID_FIELD) {
        warn!(
            entity,
            name = wanted,
            fallback = RESERVED_ID_FIELD,
            "identity field override collides with an attribute, using reserved name"
        );
        return Ok(RESERVED_ID_FIELD.to_string());
    }

    Err(ConfigError::ReservedNameCollision {
        entity,
        name: wanted.to_string(),
    })
}

fn check_unique_names(entity: &'static str, fields: &[FieldSpec]) -> Result<(), ConfigError> {
    let mut seen: HashMap<&str, &str> = HashMap::with_capacity(fields.len());
    for field in fields {
        if let Some(first) = seen.insert(&field.name, &field.attribute) {
            return Err(ConfigError::DuplicateFieldName {
                entity,
                name: field.name.clone(),
                attributes: vec![first.to_string(), field.attribute.clone()],
            });
        }
    }
    Ok(())
}
