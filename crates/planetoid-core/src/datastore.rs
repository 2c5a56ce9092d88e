//! External persistence collaborator (spec §6).
//!
//! The core never owns storage; callers inject a [`DataStore`] implementation
//! (an in-memory map for tests/CLI use, a real database for production
//! integrations). Entities are stored type-erased behind `Any` so the trait
//! stays object-safe while still letting typed callers get back what they put
//! in via [`DataStoreExt::get_typed`].

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub trait DataStore: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<dyn Any + Send + Sync>>;
    fn query(&self, type_name: &str) -> Vec<Arc<dyn Any + Send + Sync>>;
    fn save(&self, id: String, type_name: &'static str, entity: Arc<dyn Any + Send + Sync>);
    fn delete(&self, id: &str);
}

/// Typed convenience layer over [`DataStore::get`]/[`DataStore::query`].
pub trait DataStoreExt: DataStore {
    fn get_typed<T: 'static + Send + Sync>(&self, id: &str) -> Option<Arc<T>> {
        self.get(id).and_then(|entity| entity.downcast::<T>().ok())
    }

    fn query_typed<T: 'static + Send + Sync>(&self, type_name: &str) -> Vec<Arc<T>> {
        self.query(type_name)
            .into_iter()
            .filter_map(|entity| entity.downcast::<T>().ok())
            .collect()
    }
}

impl<D: DataStore + ?Sized> DataStoreExt for D {}

struct Entry {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

/// A simple in-memory `DataStore`, sufficient for tests and the CLI demo
/// harness. Production callers back `DataStore` with a real database.
#[derive(Default)]
pub struct InMemoryDataStore {
    entries: RwLock<HashMap<String, Entry>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self { entries: RwLock::new(HashMap::new()) }
    }
}

impl DataStore for InMemoryDataStore {
    fn get(&self, id: &str) -> Option<Arc<dyn Any + Send + Sync>> {
        self.entries.read().unwrap().get(id).map(|e| e.value.clone())
    }

    fn query(&self, type_name: &str) -> Vec<Arc<dyn Any + Send + Sync>> {
        self.entries
            .read()
            .unwrap()
            .values()
            .filter(|e| e.type_name == type_name)
            .map(|e| e.value.clone())
            .collect()
    }

    fn save(&self, id: String, type_name: &'static str, entity: Arc<dyn Any + Send + Sync>) {
        self.entries.write().unwrap().insert(id, Entry { type_name, value: entity });
    }

    fn delete(&self, id: &str) {
        self.entries.write().unwrap().remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Widget {
        name: String,
    }

    #[test]
    fn save_then_get_round_trips_the_typed_value() {
        let store = InMemoryDataStore::new();
        store.save("w1".into(), "widget", Arc::new(Widget { name: "gear".into() }));
        let fetched = store.get_typed::<Widget>("w1").unwrap();
        assert_eq!(fetched.name, "gear");
    }

    #[test]
    fn query_filters_by_registered_type_name() {
        let store = InMemoryDataStore::new();
        store.save("w1".into(), "widget", Arc::new(Widget { name: "a".into() }));
        store.save("w2".into(), "gadget", Arc::new(Widget { name: "b".into() }));
        let widgets = store.query_typed::<Widget>("widget");
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].name, "a");
    }

    #[test]
    fn delete_removes_the_entry() {
        let store = InMemoryDataStore::new();
        store.save("w1".into(), "widget", Arc::new(Widget { name: "a".into() }));
        store.delete("w1");
        assert!(store.get_typed::<Widget>("w1").is_none());
    }

    #[test]
    fn missing_id_returns_none() {
        let store = InMemoryDataStore::new();
        assert!(store.get_typed::<Widget>("nope").is_none());
    }
}
