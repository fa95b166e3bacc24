use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use web_sys::{window, Storage};

use crate::error::PortalError;

/// Almacenamiento clave/valor de texto (localStorage o memoria)
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError>;
    fn remove_item(&self, key: &str) -> Result<(), PortalError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage` del navegador
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl StorageBackend for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError> {
        let storage = get_local_storage()
            .ok_or_else(|| PortalError::Storage("No se pudo acceder a localStorage".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|_| PortalError::Storage(format!("Error guardando '{}' en localStorage", key)))
    }

    fn remove_item(&self, key: &str) -> Result<(), PortalError> {
        let storage = get_local_storage()
            .ok_or_else(|| PortalError::Storage("No se pudo acceder a localStorage".to_string()))?;
        storage
            .remove_item(key)
            .map_err(|_| PortalError::Storage(format!("Error eliminando '{}' de localStorage", key)))
    }
}

/// Almacenamiento en memoria; los clones comparten el mismo mapa
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PortalError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

impl<S: StorageBackend + ?Sized> StorageBackend for Rc<S> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PortalError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), PortalError> {
        (**self).remove_item(key)
    }
}
