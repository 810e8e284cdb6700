//! Test fixtures: sample entity types and populated stores.
//!
//! The fixture types cover each identity configuration:
//! - [`Person`]: synthetic identity, one transient attribute
//! - [`Account`]: identity taken from a renamed attribute
//! - [`Order`]: identity field override, an entity reference and a lazy
//!   collection

use entidoc_core::{
    Attribute, AttributeValue, CoreError, CoreResult, Entity, EntityType, Identity, Lazy,
    MemoryStore,
};
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A person with a synthetic identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Store identity.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Age, never serialized.
    pub age: u32,
}

impl Person {
    /// Creates a person.
    pub fn new(id: i64, name: impl Into<String>, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            age,
        }
    }
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

/// An account identified in documents by its external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Store identity, not used in documents.
    pub id: i64,
    /// External key, the document identity.
    pub external_id: String,
    /// Owner name.
    pub owner: String,
    /// Balance in cents, written under its legacy name.
    pub balance_cents: i64,
}

impl Account {
    /// Creates an account.
    pub fn new(id: i64, external_id: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id,
            external_id: external_id.into(),
            owner: owner.into(),
            balance_cents: 0,
        }
    }
}

impl Entity for Account {
    fn entity_type() -> EntityType {
        EntityType::new("Account")
            .attribute(
                Attribute::new("external_id")
                    .rename("externalId")
                    .identity_source(),
            )
            .attribute(Attribute::new("owner"))
            .attribute(Attribute::new("balance_cents").legacy_name("balance"))
    }

    fn identity(&self) -> Identity {
        Identity::new("Account", self.id)
    }

    fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
        match name {
            "external_id" => AttributeValue::serialize(&self.external_id),
            "owner" => AttributeValue::serialize(&self.owner),
            "balance_cents" => AttributeValue::serialize(&self.balance_cents),
            other => Err(CoreError::unknown_attribute("Account", other)),
        }
    }
}

/// A plain order line, serialized through the document engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    /// Stock keeping unit.
    pub sku: String,
    /// Ordered quantity.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a line item.
    pub fn new(sku: impl Into<String>, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            quantity,
        }
    }
}

/// An order with a customer reference and lazily loaded lines.
#[derive(Debug)]
pub struct Order {
    /// Store identity, written as `orderNo`.
    pub id: i64,
    /// Reference to the ordering person.
    pub customer: Option<Identity>,
    /// Order lines, loaded on demand.
    pub lines: Lazy<LineItem>,
    /// Free-text note, written under its legacy name.
    pub note: Option<String>,
    /// Internal bookkeeping, ignored for serialization.
    pub revision: u32,
}

impl Order {
    /// Creates an order whose lines are loaded on first access.
    pub fn new(id: i64, customer: Option<&Person>, lines: Lazy<LineItem>) -> Self {
        Self {
            id,
            customer: customer.map(Entity::identity),
            lines,
            note: None,
            revision: 0,
        }
    }

    /// Sets the note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

impl Entity for Order {
    fn entity_type() -> EntityType {
        EntityType::new("Order")
            .identity_field("orderNo")
            .attribute(Attribute::new("customer"))
            .attribute(Attribute::new("lines").rename("items"))
            .attribute(Attribute::new("note").legacy_name("comment"))
            .attribute(Attribute::new("revision").ignored())
    }

    fn identity(&self) -> Identity {
        Identity::new("Order", self.id)
    }

    fn attribute(&self, name: &str) -> CoreResult<AttributeValue<'_>> {
        match name {
            "customer" => Ok(AttributeValue::reference(self.customer.clone())),
            "lines" => Ok(AttributeValue::collection(&self.lines)),
            "note" => AttributeValue::serialize(&self.note),
            "revision" => AttributeValue::serialize(&self.revision),
            other => Err(CoreError::unknown_attribute("Order", other)),
        }
    }
}

/// Counts how often a lazy loader ran.
#[derive(Debug, Clone, Default)]
pub struct LoadCounter(Arc<AtomicUsize>);

impl LoadCounter {
    /// Creates a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a lazy list that yields `items` and bumps this counter per load.
    pub fn lazy<T: Clone + Send + Sync + 'static>(&self, items: Vec<T>) -> Lazy<T> {
        let count = Arc::clone(&self.0);
        Lazy::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
            Ok(items.clone())
        })
    }

    /// Returns the number of loads so far.
    pub fn loads(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Creates a store holding `count` people with ids `1..=count`.
    pub fn people_store(count: i64) -> MemoryStore<Person> {
        let store = MemoryStore::new();
        for id in 1..=count {
            store
                .insert(Person::new(id, format!("Person {id}"), 20))
                .expect("Failed to insert person");
        }
        store
    }

    /// Creates a store with the three sample accounts `acc-1`..`acc-3`.
    pub fn account_store() -> MemoryStore<Account> {
        let store = MemoryStore::new();
        for (id, owner) in [(1, "Ann"), (2, "Bo"), (3, "Cy")] {
            store
                .insert(Account::new(id, format!("acc-{id}"), owner))
                .expect("Failed to insert account");
        }
        store
    }

    /// Creates an order for `customer` with two lines, counted by `counter`.
    pub fn sample_order(id: i64, customer: &Person, counter: &LoadCounter) -> Order {
        Order::new(
            id,
            Some(customer),
            counter.lazy(vec![LineItem::new("A-1", 2), LineItem::new("B-7", 1)]),
        )
    }
}
