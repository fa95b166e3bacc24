// ============================================================================
// SESSION STORE - usuario + token en localStorage
// ============================================================================
// Dos claves independientes. Solo hay sesión si ambas existen y el usuario
// se puede parsear; cualquier otro estado cuenta como "sin sesión".
// ============================================================================

use crate::config::StorageConfig;
use crate::error::PortalError;
use crate::models::{Session, UserRecord};
use crate::utils::StorageBackend;

#[derive(Clone, Debug)]
pub struct SessionStore<S: StorageBackend> {
    backend: S,
    keys: StorageConfig,
}

impl<S: StorageBackend> SessionStore<S> {
    pub fn new(backend: S, keys: StorageConfig) -> Self {
        Self { backend, keys }
    }

    /// Guardar sesión. Si falla la segunda escritura se limpia la primera.
    pub fn save(&self, user: &UserRecord, token: &str) -> Result<(), PortalError> {
        let json = serde_json::to_string(user)
            .map_err(|e| PortalError::Storage(format!("Error serializando usuario: {}", e)))?;

        self.backend.set_item(&self.keys.user_key, &json)?;
        if let Err(e) = self.backend.set_item(&self.keys.token_key, token) {
            let _ = self.backend.remove_item(&self.keys.user_key);
            return Err(e);
        }

        log::info!("💾 [SESSION] Sesión guardada para {}", user.username);
        Ok(())
    }

    pub fn clear(&self) {
        for key in [&self.keys.user_key, &self.keys.token_key] {
            if let Err(e) = self.backend.remove_item(key) {
                log::warn!("⚠️ [SESSION] {}", e);
            }
        }
        log::info!("🗑️ [SESSION] Sesión eliminada");
    }

    pub fn restore(&self) -> Option<Session> {
        let user_json = self.backend.get_item(&self.keys.user_key);
        let token = self.backend.get_item(&self.keys.token_key);

        match (user_json, token) {
            (Some(user_json), Some(token)) if !token.is_empty() => {
                match serde_json::from_str::<UserRecord>(&user_json) {
                    Ok(user) => Some(Session { user, token }),
                    Err(e) => {
                        log::warn!("⚠️ [SESSION] Usuario guardado ilegible: {}", e);
                        None
                    }
                }
            }
            (None, None) => None,
            _ => {
                log::warn!("⚠️ [SESSION] Sesión incompleta en storage, se ignora");
                None
            }
        }
    }

    /// Hay sesión completa
    pub fn has_session(&self) -> bool {
        self.restore().is_some()
    }
}
