//! Attribute values as read off a live entity.

use crate::entity::Identity;
use crate::error::CoreResult;
use entidoc_document::{to_value, Value};
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

/// The value of one attribute of a live entity.
///
/// Plain values arrive already converted by the document engine. Identity
/// wrappers and lazy collections are relational artifacts the codec unwraps
/// itself.
pub enum AttributeValue<'a> {
    /// Absent value.
    Null,
    /// A plain document value.
    Value(Value),
    /// Reference to another stored entity, written as its raw identity.
    Reference(Identity),
    /// A lazily loaded collection, materialized before writing.
    Collection(&'a dyn LazyCollection),
}

impl<'a> AttributeValue<'a> {
    /// Converts any serializable value through the document engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as a document.
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> CoreResult<Self> {
        Ok(Self::Value(to_value(value)?))
    }

    /// Wraps an optional reference; `None` becomes [`AttributeValue::Null`].
    #[must_use]
    pub fn reference(identity: Option<Identity>) -> Self {
        identity.map_or(Self::Null, Self::Reference)
    }

    /// Wraps a lazy collection.
    #[must_use]
    pub fn collection(collection: &'a dyn LazyCollection) -> Self {
        Self::Collection(collection)
    }

    /// Converts to the document value to write.
    ///
    /// Collections are fully materialized; references lose their provenance.
    ///
    /// # Errors
    ///
    /// Returns an error if loading a lazy collection fails.
    pub fn into_document(self) -> CoreResult<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Value(value) => value,
            Self::Reference(identity) => identity.raw().to_value(),
            Self::Collection(collection) => Value::Array(collection.materialize()?),
        })
    }
}

impl fmt::Debug for AttributeValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Reference(id) => f.debug_tuple("Reference").field(id).finish(),
            Self::Collection(c) => f
                .debug_struct("Collection")
                .field("loaded", &c.is_loaded())
                .finish(),
        }
    }
}

impl From<Value> for AttributeValue<'_> {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Identity> for AttributeValue<'_> {
    fn from(identity: Identity) -> Self {
        Self::Reference(identity)
    }
}

/// A collection-valued attribute whose elements come from the store on demand.
pub trait LazyCollection {
    /// Loads every element and returns them as document values, in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to load the elements or an
    /// element cannot be converted.
    fn materialize(&self) -> CoreResult<Vec<Value>>;

    /// Returns whether the elements have already been loaded.
    fn is_loaded(&self) -> bool;
}

type Loader<T> = Box<dyn Fn() -> CoreResult<Vec<T>> + Send + Sync>;

/// A lazily loaded, cached list.
///
/// The loader runs at most once successfully; later reads reuse the loaded
/// elements. Concurrent first reads wait for a single load. A failed load is
/// not cached and may be retried.
///
/// # Example
///
/// ```
/// use entidoc_core::Lazy;
///
/// let tags: Lazy<String> = Lazy::new(|| Ok(vec!["red".to_string()]));
/// assert!(!tags.is_loaded());
/// assert_eq!(tags.get().unwrap(), ["red".to_string()]);
/// assert!(tags.is_loaded());
/// ```
pub struct Lazy<T> {
    loader: Loader<T>,
    items: OnceLock<Vec<T>>,
    loading: Mutex<()>,
}

impl<T> Lazy<T> {
    /// Creates a lazy list with a loader.
    pub fn new<F>(loader: F) -> Self
    where
        F: Fn() -> CoreResult<Vec<T>> + Send + Sync + 'static,
    {
        Self {
            loader: Box::new(loader),
            items: OnceLock::new(),
            loading: Mutex::new(()),
        }
    }

    /// Creates an already loaded list.
    pub fn loaded(items: Vec<T>) -> Self {
        let lazy = Self::new(|| Ok(Vec::new()));
        // Freshly created, so the cell is empty.
        let _ = lazy.items.set(items);
        lazy
    }

    /// Returns the elements, loading them on first access.
    ///
    /// # Errors
    ///
    /// Returns the loader's error if loading fails.
    pub fn get(&self) -> CoreResult<&[T]> {
        if let Some(items) = self.items.get() {
            return Ok(items);
        }
        let _guard = self.loading.lock();
        if let Some(items) = self.items.get() {
            return Ok(items);
        }
        let loaded = (self.loader)()?;
        Ok(self.items.get_or_init(|| loaded))
    }

    /// Returns whether the elements have been loaded.
    pub fn is_loaded(&self) -> bool {
        self.items.get().is_some()
    }
}

impl<T: Serialize> LazyCollection for Lazy<T> {
    fn materialize(&self) -> CoreResult<Vec<Value>> {
        self.get()?
            .iter()
            .map(|item| Ok(to_value(item)?))
            .collect()
    }

    fn is_loaded(&self) -> bool {
        Lazy::is_loaded(self)
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.items.get() {
            Some(items) => f.debug_tuple("Lazy").field(items).finish(),
            None => f.write_str("Lazy(<not loaded>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Barrier};

    #[test]
    fn loader_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Lazy::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![1, 2, 3])
        });

        assert_eq!(lazy.get().unwrap(), [1, 2, 3]);
        assert_eq!(lazy.get().unwrap(), [1, 2, 3]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn concurrent_first_reads_load_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy = Lazy::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(std::time::Duration::from_millis(50));
            Ok(vec![1, 2])
        });
        let barrier = Barrier::new(4);

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    barrier.wait();
                    assert_eq!(lazy.get().unwrap(), [1, 2]);
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_load_is_retried() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let lazy: Lazy<i32> = Lazy::new(move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(CoreError::lookup("Line", "connection reset"))
            } else {
                Ok(vec![9])
            }
        });

        assert!(lazy.get().is_err());
        assert!(!lazy.is_loaded());
        assert_eq!(lazy.get().unwrap(), [9]);
    }

    #[test]
    fn materialize_converts_elements() {
        let lazy = Lazy::new(|| Ok(vec!["a", "b"]));
        let values = LazyCollection::materialize(&lazy).unwrap();
        assert_eq!(values, vec![Value::from("a"), Value::from("b")]);
        assert!(LazyCollection::is_loaded(&lazy));
    }

    #[test]
    fn into_document_unwraps_relational_values() {
        let reference = AttributeValue::from(Identity::new("Person", 4));
        assert_eq!(reference.into_document().unwrap(), Value::Integer(4));

        let lazy = Lazy::loaded(vec![Identity::new("Tag", 1), Identity::new("Tag", 2)]);
        let collection = AttributeValue::collection(&lazy);
        assert_eq!(
            collection.into_document().unwrap(),
            Value::Array(vec![Value::Integer(1), Value::Integer(2)])
        );

        assert_eq!(AttributeValue::reference(None).into_document().unwrap(), Value::Null);
    }

    #[test]
    fn debug_does_not_load() {
        let lazy: Lazy<u8> = Lazy::new(|| Ok(vec![1]));
        assert_eq!(format!("{lazy:?}"), "Lazy(<not loaded>)");
        assert!(!lazy.is_loaded());
    }
}
