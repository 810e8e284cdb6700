//! Benchmark utilities.

use entidoc_core::MemoryStore;
use entidoc_document::Value;
use entidoc_testkit::{scenarios, LineItem, LoadCounter, Order, Person};

/// Generate a document object with `width` fields nested `depth` levels.
pub fn nested_document(depth: usize, width: usize) -> Value {
    if depth == 0 {
        Value::from("leaf")
    } else {
        Value::Object(
            (0..width)
                .map(|i| (format!("key_{i}"), nested_document(depth - 1, width)))
                .collect(),
        )
    }
}

/// Generate a store with `count` people and their documents as JSON text.
pub fn people_with_documents(count: i64) -> (MemoryStore<Person>, Vec<String>) {
    let store = scenarios::people_store(count);
    let documents = (1..=count)
        .map(|id| format!(r#"{{"$$database_id$$":{id},"name":"Person {id}","filler":[1,2,3]}}"#))
        .collect();
    (store, documents)
}

/// Generate an order with `lines` items, already loaded.
pub fn loaded_order(id: i64, lines: usize) -> Order {
    let customer = Person::new(1, "Ann", 30);
    let items = (0..lines)
        .map(|i| LineItem::new(format!("SKU-{i}"), 1))
        .collect();
    let order = Order::new(id, Some(&customer), LoadCounter::new().lazy(items));
    order.lines.get().expect("preload lines");
    order
}
