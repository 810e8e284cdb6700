//! Error types for EntiDoc core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Schema configuration mistakes detected when an entity type is first used.
///
/// These are fatal for the type: they indicate a wrong mapping table and are
/// reported on every use of the type until the table is fixed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// More than one attribute is marked as the identity source.
    #[error("ambiguous identity source on {entity}: attributes {attributes:?} are all marked as identity source")]
    AmbiguousIdentitySource {
        /// Entity type name.
        entity: &'static str,
        /// Declared names of every attribute marked as identity source.
        attributes: Vec<String>,
    },

    /// A type-level identity field override and an identity-source attribute
    /// are both configured.
    #[error("conflicting identity configuration on {entity}: identity field override {override_name:?} and identity source attribute {attribute:?} are both set")]
    ConflictingIdentityConfiguration {
        /// Entity type name.
        entity: &'static str,
        /// The type-level identity field name override.
        override_name: String,
        /// Declared name of the identity-source attribute.
        attribute: String,
    },

    /// The identity-source attribute is excluded from serialization.
    #[error("identity source attribute {attribute:?} on {entity} is marked transient or ignored")]
    IgnoredIdentitySource {
        /// Entity type name.
        entity: &'static str,
        /// Declared name of the identity-source attribute.
        attribute: String,
    },

    /// The identity field name collides with a serialized field and cannot
    /// fall back to the reserved name.
    #[error("identity field name {name:?} on {entity} collides with a serialized attribute")]
    ReservedNameCollision {
        /// Entity type name.
        entity: &'static str,
        /// The colliding identity field name.
        name: String,
    },

    /// Two serialized attributes resolve to the same document field name.
    #[error("duplicate document field {name:?} on {entity}: declared by attributes {attributes:?}")]
    DuplicateFieldName {
        /// Entity type name.
        entity: &'static str,
        /// The repeated document field name.
        name: String,
        /// Declared names of the attributes sharing the field name.
        attributes: Vec<String>,
    },
}

/// Errors that can occur in EntiDoc core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity type has an invalid serialization schema.
    #[error("schema configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Document conversion or transport error.
    #[error("document error: {0}")]
    Document(#[from] entidoc_document::DocumentError),

    /// The external store failed while looking up or loading entities.
    #[error("lookup failed for {entity}: {message}")]
    Lookup {
        /// Entity type name.
        entity: &'static str,
        /// Description of the store failure.
        message: String,
    },

    /// The identity field holds a value that cannot be an identity.
    #[error("invalid identity for {entity}: field {field:?} holds {found}, expected integer or text")]
    InvalidIdentity {
        /// Entity type name.
        entity: &'static str,
        /// Document field name of the identity.
        field: String,
        /// Kind of value found.
        found: &'static str,
    },

    /// An entity accessor was asked for an attribute it does not provide.
    #[error("unknown attribute {attribute:?} on {entity}")]
    UnknownAttribute {
        /// Entity type name.
        entity: &'static str,
        /// The requested attribute name.
        attribute: String,
    },

    /// Document does not have the expected shape.
    #[error("invalid document format: {message}")]
    InvalidFormat {
        /// Description of the format issue.
        message: String,
    },

    /// Operation not permitted in current state.
    #[error("invalid operation: {message}")]
    InvalidOperation {
        /// Description of why operation is invalid.
        message: String,
    },
}

impl CoreError {
    /// Creates a lookup failed error.
    pub fn lookup(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Lookup {
            entity,
            message: message.into(),
        }
    }

    /// Creates an unknown attribute error.
    pub fn unknown_attribute(entity: &'static str, attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            entity,
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid operation error.
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Returns the configuration error, if this is one.
    pub fn as_config(&self) -> Option<&ConfigError> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_the_type() {
        let err = ConfigError::AmbiguousIdentitySource {
            entity: "Account",
            attributes: vec!["a".into(), "b".into()],
        };
        let text = err.to_string();
        assert!(text.contains("Account"));
        assert!(text.contains("\"a\""));
    }

    #[test]
    fn config_converts_into_core() {
        let err: CoreError = ConfigError::ReservedNameCollision {
            entity: "Person",
            name: "$$database_id$$".into(),
        }
        .into();
        assert!(err.as_config().is_some());
        assert!(CoreError::invalid_format("x").as_config().is_none());
    }
}
