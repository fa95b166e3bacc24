// ============================================================================
// TABLE VIEW - tabla.html: datos de contratos con alternancia hex/texto
// ============================================================================

use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::{
    confirm, hide, on_click, redirect, require_element, set_display, set_inner_html,
    set_text_content, show, toggle_class,
};
use crate::state::TableStatus;
use crate::stores::SessionStore;
use crate::utils::constants::{INDEX_PAGE, MSG_LOGOUT_CONFIRM};
use crate::utils::format::DisplayMode;
use crate::utils::BrowserStorage;
use crate::viewmodels::TableViewModel;

#[derive(Clone)]
struct TableElements {
    toggle_btn: Element,
    refresh_btn: Element,
    back_btn: Element,
    logout_btn: Element,
    retry_btn: Element,
    loading_indicator: Element,
    error_container: Element,
    table_wrapper: Element,
    tbody: Element,
    total_records: Element,
    loading_status: Element,
    error_message: Element,
}

impl TableElements {
    fn lookup() -> Result<Self, JsValue> {
        let table = require_element("dataTable")?;
        let tbody = table
            .query_selector("tbody")?
            .ok_or_else(|| JsValue::from_str("No tbody in #dataTable"))?;

        Ok(Self {
            toggle_btn: require_element("toggleBinaryBtn")?,
            refresh_btn: require_element("refreshBtn")?,
            back_btn: require_element("backBtn")?,
            logout_btn: require_element("logoutBtn")?,
            retry_btn: require_element("retryBtn")?,
            loading_indicator: require_element("loadingIndicator")?,
            error_container: require_element("errorContainer")?,
            table_wrapper: require_element("tableWrapper")?,
            tbody,
            total_records: require_element("totalRecords")?,
            loading_status: require_element("loadingStatus")?,
            error_message: require_element("errorMessage")?,
        })
    }

    /// Los tres paneles son excluyentes
    fn render_status(&self, status: &TableStatus) -> Result<(), JsValue> {
        match status {
            TableStatus::Loading => {
                set_display(&self.loading_indicator, "flex")?;
                hide(&self.error_container)?;
                hide(&self.table_wrapper)?;
                set_text_content(&self.total_records, "Cargando...");
                set_text_content(&self.loading_status, "Obteniendo datos...");
            }
            TableStatus::Loaded { total } => {
                hide(&self.loading_indicator)?;
                hide(&self.error_container)?;
                show(&self.table_wrapper)?;
                set_text_content(&self.total_records, &total.to_string());
                set_text_content(&self.loading_status, "Datos cargados correctamente");
            }
            TableStatus::Error { message } => {
                hide(&self.loading_indicator)?;
                hide(&self.table_wrapper)?;
                show(&self.error_container)?;
                set_text_content(&self.error_message, message);
                set_text_content(&self.total_records, "Error");
                set_text_content(&self.loading_status, "Error al cargar datos");
            }
        }
        Ok(())
    }

    fn render_body(&self, vm: &TableViewModel) {
        if let Some(html) = vm.body_html() {
            set_inner_html(&self.tbody, &html);
        }
    }

    fn render_toggle(&self, mode: DisplayMode) -> Result<(), JsValue> {
        set_text_content(&self.toggle_btn, mode.toggle_label());
        toggle_class(&self.toggle_btn, "active", mode == DisplayMode::Text)
    }
}

/// Montar tabla.html. Sin sesión guardada vuelve al login.
pub fn mount(vm: Rc<TableViewModel>, store: SessionStore<BrowserStorage>) -> Result<(), JsValue> {
    log::info!("🔐 [TABLA] Verificando autenticación...");
    if !store.has_session() {
        log::warn!("❌ [TABLA] Sin autenticación válida, redirigiendo al login");
        redirect(INDEX_PAGE);
        return Ok(());
    }

    let els = TableElements::lookup()?;
    let store = Rc::new(store);

    {
        let vm = vm.clone();
        let els_clone = els.clone();
        on_click(&els.toggle_btn, move |_| {
            let mode = vm.toggle();
            if let Err(e) = els_clone.render_toggle(mode) {
                log::error!("❌ [TABLA] Error actualizando botón: {:?}", e);
            }
            els_clone.render_body(&vm);
        })?;
    }
    for button in [&els.refresh_btn, &els.retry_btn] {
        let vm = vm.clone();
        let els_clone = els.clone();
        on_click(button, move |_| load(vm.clone(), els_clone.clone()))?;
    }
    on_click(&els.back_btn, |_| redirect(INDEX_PAGE))?;
    {
        let store = store.clone();
        on_click(&els.logout_btn, move |_| {
            if confirm(MSG_LOGOUT_CONFIRM) {
                store.clear();
                redirect(INDEX_PAGE);
            }
        })?;
    }

    log::info!("✅ [TABLA] Autenticación válida, cargando tabla...");
    let delay = CONFIG.ui_config.table_load_delay_ms;
    Timeout::new(delay, move || load(vm, els)).forget();
    Ok(())
}

fn load(vm: Rc<TableViewModel>, els: TableElements) {
    if let Err(e) = els.render_status(&TableStatus::Loading) {
        log::error!("❌ [TABLA] Error mostrando carga: {:?}", e);
    }
    spawn_local(async move {
        if vm.load().await.is_ok() {
            els.render_body(&vm);
        }
        let status = vm.state().status.clone();
        if let Err(e) = els.render_status(&status) {
            log::error!("❌ [TABLA] Error mostrando estado: {:?}", e);
        }
    });
}
