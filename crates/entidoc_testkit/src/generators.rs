//! Property-based test generators using proptest.
//!
//! Provides strategies for fixture entities and for random entity type
//! descriptions.

use crate::fixtures::{Account, Person};
use entidoc_core::{Attribute, EntityType};
use proptest::prelude::*;

/// Strategy for generating attribute and field names.
pub fn field_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_]{0,11}").expect("Invalid regex")
}

/// Strategy for generating display names, including non-ASCII text.
pub fn display_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-zÀ-ÿ ]{0,24}").expect("Invalid regex")
}

/// Strategy for generating people.
pub fn person_strategy() -> impl Strategy<Value = Person> {
    (any::<i64>(), display_name_strategy(), any::<u32>())
        .prop_map(|(id, name, age)| Person::new(id, name, age))
}

/// Strategy for generating accounts with non-empty external ids.
pub fn account_strategy() -> impl Strategy<Value = Account> {
    (
        any::<i64>(),
        prop::string::string_regex("[a-z0-9-]{1,16}").expect("Invalid regex"),
        display_name_strategy(),
        any::<i64>(),
    )
        .prop_map(|(id, external_id, owner, balance)| {
            let mut account = Account::new(id, external_id, owner);
            account.balance_cents = balance;
            account
        })
}

/// A generated attribute: declared name plus serialization flags.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    /// Declared name.
    pub name: String,
    /// Optional rename.
    pub rename: Option<String>,
    /// Optional legacy name.
    pub legacy_name: Option<String>,
    /// Whether the attribute is transient.
    pub transient: bool,
}

impl AttributeSpec {
    /// Builds the attribute description.
    pub fn to_attribute(&self) -> Attribute {
        let mut attr = Attribute::new(&self.name);
        if let Some(rename) = &self.rename {
            attr = attr.rename(rename);
        }
        if let Some(legacy) = &self.legacy_name {
            attr = attr.legacy_name(legacy);
        }
        if self.transient {
            attr = attr.transient();
        }
        attr
    }

    /// Returns the expected document field name.
    pub fn expected_name(&self) -> &str {
        self.rename
            .as_deref()
            .or(self.legacy_name.as_deref())
            .unwrap_or(&self.name)
    }
}

/// Strategy for generating attribute specs without identity markers.
pub fn attribute_spec_strategy() -> impl Strategy<Value = AttributeSpec> {
    (
        field_name_strategy(),
        prop::option::of(field_name_strategy()),
        prop::option::of(field_name_strategy()),
        prop::bool::weighted(0.2),
    )
        .prop_map(|(name, rename, legacy_name, transient)| AttributeSpec {
            name,
            rename,
            legacy_name,
            transient,
        })
}

/// Strategy for generating attribute lists whose names are unique, both
/// declared and resolved.
pub fn unique_attributes_strategy(max: usize) -> impl Strategy<Value = Vec<AttributeSpec>> {
    prop::collection::vec(attribute_spec_strategy(), 0..max).prop_map(|specs| {
        let mut declared = std::collections::HashSet::new();
        let mut resolved = std::collections::HashSet::new();
        specs
            .into_iter()
            .filter(|spec| {
                declared.insert(spec.name.clone())
                    && resolved.insert(spec.expected_name().to_string())
            })
            .collect()
    })
}

/// Builds an entity type description named `Generated` from specs.
pub fn entity_type_from(specs: &[AttributeSpec]) -> EntityType {
    EntityType::new("Generated").attributes(specs.iter().map(AttributeSpec::to_attribute))
}
