// ============================================================================
// APP - Arranque: cliente compartido + vista según la página cargada
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::CONFIG;
use crate::dom::get_element_by_id;
use crate::services::ApiClient;
use crate::stores::SessionStore;
use crate::utils::BrowserStorage;
use crate::viewmodels::{AuthViewModel, TableViewModel};
use crate::views::{auth_view, table_view};

/// Página HTML en la que corre el módulo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    /// index.html: login, registro y dashboard
    Login,
    /// tabla.html: datos de contratos
    Table,
}

impl Page {
    /// Se detecta por los elementos presentes
    pub fn detect() -> Option<Self> {
        if get_element_by_id("loginForm").is_some() {
            Some(Page::Login)
        } else if get_element_by_id("dataTable").is_some() {
            Some(Page::Table)
        } else {
            None
        }
    }
}

/// Aplicación principal
pub struct App {
    api: Rc<ApiClient>,
    page: Option<Page>,
}

impl App {
    /// Crear nueva aplicación. Un único cliente para toda la página.
    pub fn new() -> Result<Self, JsValue> {
        let base_url = CONFIG.backend_url_for_window();
        log::info!("🌐 [API] Backend: {}", base_url);

        Ok(Self {
            api: Rc::new(ApiClient::new(base_url)),
            page: Page::detect(),
        })
    }

    fn session_store() -> SessionStore<BrowserStorage> {
        SessionStore::new(BrowserStorage, CONFIG.storage_config.clone())
    }

    /// Montar la vista correspondiente y lanzar la sonda de salud
    pub fn mount(&self) -> Result<(), JsValue> {
        self.probe_health();

        match self.page {
            Some(Page::Login) => {
                let vm = AuthViewModel::new(self.api.clone(), Self::session_store(), CONFIG.charset_profile);
                auth_view::mount(Rc::new(vm))
            }
            Some(Page::Table) => {
                let vm = TableViewModel::new(Some(self.api.clone()));
                table_view::mount(Rc::new(vm), Self::session_store())
            }
            None => {
                log::warn!("⚠️ [APP] Página sin vista conocida");
                Ok(())
            }
        }
    }

    fn probe_health(&self) {
        let api = self.api.clone();
        spawn_local(async move {
            let response = api.check_health().await;
            if response.success {
                log::info!("✅ [API] Servidor disponible");
            } else {
                log::warn!(
                    "⚠️ [API] Servidor no disponible: {}",
                    response.message().unwrap_or("sin respuesta")
                );
            }
        });
    }

    pub fn page(&self) -> Option<Page> {
        self.page
    }
}
