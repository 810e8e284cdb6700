//! Declarative entity type descriptions.
//!
//! An [`EntityType`] is the mapping table for one entity type: its declared
//! attributes in order, with the annotations that steer serialization. It is
//! built once at registration time and handed to the schema resolver.

/// A declared attribute of an entity type.
///
/// # Example
///
/// ```
/// use entidoc_core::Attribute;
///
/// let attr = Attribute::new("external_id").rename("externalId").identity_source();
/// assert_eq!(attr.resolved_name(), "externalId");
/// assert!(attr.is_identity_source());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    name: String,
    rename: Option<String>,
    legacy_name: Option<String>,
    transient: bool,
    ignored: bool,
    identity_source: bool,
}

impl Attribute {
    /// Declares an attribute by its name on the entity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rename: None,
            legacy_name: None,
            transient: false,
            ignored: false,
            identity_source: false,
        }
    }

    /// Sets the document field name, overriding every other name.
    #[must_use]
    pub fn rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Sets the legacy document field name, used when no rename is set.
    #[must_use]
    pub fn legacy_name(mut self, name: impl Into<String>) -> Self {
        self.legacy_name = Some(name.into());
        self
    }

    /// Marks the attribute transient: it is never written.
    #[must_use]
    pub const fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Marks the attribute ignored for serialization.
    #[must_use]
    pub const fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Marks the attribute as the identity source for documents.
    #[must_use]
    pub const fn identity_source(mut self) -> Self {
        self.identity_source = true;
        self
    }

    /// Returns the declared name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the document field name: rename, then legacy name, then the
    /// declared name.
    #[must_use]
    pub fn resolved_name(&self) -> &str {
        self.rename
            .as_deref()
            .or(self.legacy_name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Returns whether the attribute takes part in serialization.
    #[must_use]
    pub const fn is_serialized(&self) -> bool {
        !self.transient && !self.ignored
    }

    /// Returns whether the attribute is transient.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.transient
    }

    /// Returns whether the attribute is ignored.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        self.ignored
    }

    /// Returns whether the attribute is marked as identity source.
    #[must_use]
    pub const fn is_identity_source(&self) -> bool {
        self.identity_source
    }
}

/// Description of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityType {
    name: &'static str,
    attributes: Vec<Attribute>,
    identity_attribute: String,
    identity_field: Option<String>,
}

impl EntityType {
    /// Starts a description for the named entity type.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            identity_attribute: "id".to_string(),
            identity_field: None,
        }
    }

    /// Declares the next attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Declares several attributes in order.
    #[must_use]
    pub fn attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.attributes.extend(attributes);
        self
    }

    /// Names the attribute holding the store's identity wrapper.
    ///
    /// Defaults to `id`. That attribute is never written as a field of its
    /// own unless it is also the identity source.
    #[must_use]
    pub fn identity_attribute(mut self, name: impl Into<String>) -> Self {
        self.identity_attribute = name.into();
        self
    }

    /// Overrides the document field name of the synthetic identity.
    #[must_use]
    pub fn identity_field(mut self, name: impl Into<String>) -> Self {
        self.identity_field = Some(name.into());
        self
    }

    /// Returns the type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared attributes in declaration order.
    #[must_use]
    pub fn declared_attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Returns the name of the identity wrapper attribute.
    #[must_use]
    pub fn identity_attribute_name(&self) -> &str {
        &self.identity_attribute
    }

    /// Returns the identity field override, if any.
    #[must_use]
    pub fn identity_field_override(&self) -> Option<&str> {
        self.identity_field.as_deref()
    }
}
