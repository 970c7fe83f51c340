use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};

use crate::*;

/// Browser `localStorage`, shared by every tab of the same origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    fn raw() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(classify)?
            .ok_or(StorageError::Unavailable)
    }

    /// Calls `on_change` with the affected key whenever another tab writes
    /// to storage; `None` means the whole storage was cleared. Dropping the
    /// listener unsubscribes.
    ///
    /// The key is meant for [`Session::handle_external_change`], which
    /// ignores keys of other boards.
    pub fn listen(mut on_change: impl FnMut(Option<String>) + 'static) -> Option<EventListener> {
        let window = web_sys::window()?;
        Some(EventListener::new(&window, "storage", move |event| {
            if let Some(event) = event.dyn_ref::<web_sys::StorageEvent>() {
                on_change(event.key());
            }
        }))
    }
}

impl Storage for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::raw()?.get_item(key).map_err(classify)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::raw()?.set_item(key, value).map_err(classify)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::raw()?.remove_item(key).map_err(classify)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let storage = Self::raw()?;
        let len = storage.length().map_err(classify)?;
        let mut keys = Vec::new();
        for index in 0..len {
            if let Some(key) = storage.key(index).map_err(classify)? {
                if key.starts_with(prefix) {
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }
}

fn classify(err: JsValue) -> StorageError {
    match err.dyn_ref::<web_sys::DomException>() {
        Some(exception) if exception.name() == "QuotaExceededError" || exception.code() == 22 => {
            StorageError::QuotaExceeded
        }
        Some(exception) if exception.name() == "SecurityError" => StorageError::Unavailable,
        Some(exception) => StorageError::Failed(exception.message()),
        None => StorageError::Unavailable,
    }
}
