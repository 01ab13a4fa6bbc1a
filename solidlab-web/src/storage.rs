/// Browser storage backend for the progress store
///
/// Entries live in `window.localStorage` under the store's keys. When local
/// storage is unavailable (no window, or blocked by the browser) the store
/// falls back to memory so the page keeps working for the session.
use solidlab_core::{MemoryBackend, StorageBackend, StorageError, StorageResult};
use tracing::warn;
use wasm_bindgen::JsValue;

fn backend_error(operation: &str, key: &str, err: JsValue) -> StorageError {
    StorageError::Backend(format!("localStorage {operation} of {key} failed: {err:?}"))
}

/// `StorageBackend` over `web_sys::Storage`
pub struct LocalStorageBackend {
    storage: web_sys::Storage,
}

impl LocalStorageBackend {
    pub fn new(storage: web_sys::Storage) -> Self {
        Self { storage }
    }

    /// The window's local storage, if the page may use it
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self::new(storage))
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| backend_error("read", key, e))
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| backend_error("write", key, e))
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| backend_error("remove", key, e))
    }
}

/// Local storage when available, memory otherwise
pub enum WebBackend {
    Local(LocalStorageBackend),
    Memory(MemoryBackend),
}

impl WebBackend {
    pub fn detect() -> Self {
        match LocalStorageBackend::from_window() {
            Some(local) => WebBackend::Local(local),
            None => {
                warn!("localStorage unavailable, progress will not persist");
                WebBackend::Memory(MemoryBackend::new())
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        matches!(self, WebBackend::Local(_))
    }
}

impl StorageBackend for WebBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match self {
            WebBackend::Local(local) => local.read(key),
            WebBackend::Memory(memory) => memory.read(key),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        match self {
            WebBackend::Local(local) => local.write(key, value),
            WebBackend::Memory(memory) => memory.write(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match self {
            WebBackend::Local(local) => local.remove(key),
            WebBackend::Memory(memory) => memory.remove(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_fallback_round_trips() {
        let mut backend = WebBackend::Memory(MemoryBackend::new());
        assert!(!backend.is_persistent());
        backend.write("k", "v").unwrap();
        assert_eq!(backend.read("k").unwrap(), Some("v".to_string()));
        backend.remove("k").unwrap();
        assert_eq!(backend.read("k").unwrap(), None);
    }
}
