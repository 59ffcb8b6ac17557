//! Key-value preference storage
//!
//! Stores hand out cheap clonable handles over one shared backing map, the
//! way every script on a page sees the same LocalStorage. Reads have no side
//! effects; writes land immediately.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// String key-value store that survives reloads
pub trait PreferenceStore {
    /// Read a value; `None` when the key was never written
    fn get_string(&self, key: &str) -> Option<String>;

    /// Write a value. Failures are logged by the implementation, never returned.
    fn set_string(&self, key: &str, value: &str);
}

/// In-process store for native runs and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with existing entries (a "previous session")
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().extend(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );
        store
    }

    /// Number of `set_string` calls made through any handle
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl PreferenceStore for MemoryStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Attach to `window.localStorage`. Without one (private mode, sandboxed
    /// frame) every read misses and writes are dropped.
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - preferences will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl PreferenceStore for LocalStore {
    fn get_string(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok()?
    }

    fn set_string(&self, key: &str, value: &str) {
        if let Some(storage) = &self.storage {
            if storage.set_item(key, value).is_err() {
                log::warn!("Failed to write {key} to LocalStorage");
            }
        }
    }
}
