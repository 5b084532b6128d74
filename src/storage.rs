use gloo_storage::{LocalStorage, Storage};
use log::warn;
use std::cell::RefCell;
use std::collections::HashMap;

pub const THEME_KEY: &str = "pc-theme";
pub const PENDING_CHAT_KEY: &str = "openChatID";

/// Reserved chat id for the conversation created by a confirmed match.
pub const NEW_MATCH_CHAT_ID: &str = "new_match_sarah";

/// String key-value persistence shared across page loads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Browser `localStorage`. Values are stored raw, not JSON-encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                warn!("Failed to read '{}' from local storage: {:?}", key, err);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            warn!("Failed to persist '{}': {:?}", key, err);
        }
    }

    fn remove(&self, key: &str) {
        if let Err(err) = LocalStorage::raw().remove_item(key) {
            warn!("Failed to remove '{}': {:?}", key, err);
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}

/// Records which chat the next chat page load should open.
pub fn set_pending_chat(store: &impl KeyValueStore, chat_id: &str) {
    store.set(PENDING_CHAT_KEY, chat_id);
}

/// Reads and clears the pending chat, so a handoff fires at most once.
pub fn take_pending_chat(store: &impl KeyValueStore) -> Option<String> {
    let pending = store.get(PENDING_CHAT_KEY)?;
    store.remove(PENDING_CHAT_KEY);
    let trimmed = pending.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
