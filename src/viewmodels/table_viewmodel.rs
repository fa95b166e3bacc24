// ============================================================================
// TABLE VIEWMODEL - carga de datosExcel y alternancia hex/texto
// ============================================================================

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::error::PortalError;
use crate::models::rows_from_body;
use crate::services::{ApiClient, GlooTransport, HttpTransport};
use crate::state::TableState;
use crate::utils::constants::{MSG_FETCH_ERROR, MSG_NO_DATA};
use crate::utils::format::DisplayMode;

pub struct TableViewModel<T: HttpTransport = GlooTransport> {
    api: Option<Rc<ApiClient<T>>>,
    state: RefCell<TableState>,
}

impl<T: HttpTransport> TableViewModel<T> {
    pub fn new(api: Option<Rc<ApiClient<T>>>) -> Self {
        Self {
            api,
            state: RefCell::new(TableState::new()),
        }
    }

    pub fn state(&self) -> Ref<'_, TableState> {
        self.state.borrow()
    }

    /// Pedir los datos y guardarlos; devuelve el número de registros
    pub async fn load(&self) -> Result<usize, PortalError> {
        self.state.borrow_mut().set_loading();

        let result = self.fetch().await;
        match &result {
            Ok(total) => log::info!("✅ [TABLA] Datos encontrados: {} registros", total),
            Err(e) => {
                log::error!("❌ [TABLA] Error cargando datos: {}", e);
                self.state.borrow_mut().set_error(e.to_string());
            }
        }
        result
    }

    async fn fetch(&self) -> Result<usize, PortalError> {
        let api = self
            .api
            .as_ref()
            .ok_or_else(|| PortalError::MissingDependency("Sistema de conexión".to_string()))?;

        log::info!("🔍 [TABLA] Solicitando datos...");
        let response = api.get_datos_excel().await;

        if !response.success {
            let message = response.message().unwrap_or(MSG_FETCH_ERROR).to_string();
            return Err(match response.status {
                _ if response.is_connection_error() => PortalError::Connection(message),
                Some(401) | Some(403) => PortalError::Auth(message),
                _ => PortalError::Server(message),
            });
        }

        match rows_from_body(&response.data) {
            Some(rows) if !rows.is_empty() => {
                let total = rows.len();
                self.state.borrow_mut().set_rows(rows);
                Ok(total)
            }
            _ => {
                log::warn!("⚠️ [TABLA] Respuesta exitosa pero sin datos válidos");
                Err(PortalError::Data(MSG_NO_DATA.to_string()))
            }
        }
    }

    /// Alternar hex/texto. Re-renderiza desde los datos en memoria.
    pub fn toggle(&self) -> DisplayMode {
        let mode = self.state.borrow_mut().toggle_mode();
        log::info!("🔄 [TABLA] Modo de visualización: {:?}", mode);
        mode
    }

    pub fn body_html(&self) -> Option<String> {
        self.state.borrow().body_html()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::testing::ScriptedTransport;
    use crate::state::TableStatus;
    use futures::executor::block_on;
    use serde_json::json;

    fn viewmodel() -> (TableViewModel<ScriptedTransport>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let api = Rc::new(ApiClient::with_transport("http://api.test", transport.clone()));
        api.set_token("abc");
        (TableViewModel::new(Some(api)), transport)
    }

    fn dataset() -> serde_json::Value {
        json!({"data": [
            {"id": 1, "nrocto": "CT-001", "contratista": "Proyecciones S.A.S", "identificacion": "\\x48656c6c6f", "vrcto": "\\x313530303030"},
            {"id": 2, "nrocto": "CT-002", "objeto": "Mantenimiento de salas", "vrcto": 250000},
            {"id": 3, "identificacion": "900123456"}
        ]})
    }

    #[test]
    fn test_load_keeps_rows_and_count() {
        let (vm, transport) = viewmodel();
        transport.reply(200, dataset());

        assert_eq!(block_on(vm.load()), Ok(3));
        assert_eq!(vm.state().status, TableStatus::Loaded { total: 3 });

        let sent = transport.last_request().unwrap();
        assert!(sent.url.ends_with("/auth/datos-excel"));
        assert_eq!(sent.header("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn test_toggle_decodes_identification_without_refetch() {
        let (vm, transport) = viewmodel();
        transport.reply(200, json!({"data": [{"id": 1, "identificacion": "\\x48656c6c6f"}]}));
        block_on(vm.load()).unwrap();

        let raw = vm.body_html().unwrap();
        assert!(raw.contains(r#"<td class="binary-field"><span class="hex-text" title="Hex format">\x48656c6c6f</span></td>"#));

        vm.toggle();
        let text = vm.body_html().unwrap();
        assert!(text.contains(">Hello</span></td>"));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_double_toggle_restores_markup() {
        let long_text = "Suministro de equipos de proyección ".repeat(5);
        let datasets = [
            dataset(),
            json!([{"id": 0, "nrocto": "", "contratista": "", "identificacion": "", "vrcto": 0}]),
            json!({"data": [
                {"id": 4, "identificacion": "\\xc3a9", "vrcto": "\\xñ1"},
                {"id": 7, "vrcto": "\\x"}
            ]}),
            json!({"data": [
                {"id": 5, "objeto": long_text, "identificacion": "\\x3c623e"},
                {"id": 6, "unidad": null, "rubro": false}
            ]}),
        ];

        for data in datasets {
            let (vm, transport) = viewmodel();
            transport.reply(200, data.clone());
            block_on(vm.load()).unwrap();

            let before = vm.body_html().unwrap();
            vm.toggle();
            vm.toggle();
            assert_eq!(vm.body_html().unwrap(), before, "dataset: {}", data);
            assert_eq!(transport.request_count(), 1);
        }
    }

    #[test]
    fn test_empty_dataset_is_an_error() {
        let (vm, transport) = viewmodel();
        transport.reply(200, json!({"data": []}));

        let err = block_on(vm.load()).unwrap_err();
        assert_eq!(err, PortalError::Data(MSG_NO_DATA.to_string()));
        assert_eq!(vm.state().status, TableStatus::Error { message: MSG_NO_DATA.to_string() });
    }

    #[test]
    fn test_server_error_message() {
        let (vm, transport) = viewmodel();
        transport.reply(401, json!({"message": "Token inválido"}));
        assert_eq!(block_on(vm.load()), Err(PortalError::Auth("Token inválido".to_string())));

        transport.reply(500, json!({}));
        assert_eq!(block_on(vm.load()), Err(PortalError::Server(MSG_FETCH_ERROR.to_string())));

        transport.reply(200, json!({"data": {"rows": 3}}));
        assert_eq!(block_on(vm.load()), Err(PortalError::Data(MSG_NO_DATA.to_string())));
    }

    #[test]
    fn test_error_keeps_previous_rows() {
        let (vm, transport) = viewmodel();
        transport.reply(200, dataset());
        block_on(vm.load()).unwrap();

        transport.fail("Failed to fetch");
        assert!(matches!(block_on(vm.load()), Err(PortalError::Connection(_))));
        assert!(vm.body_html().is_some());
    }

    #[test]
    fn test_missing_client() {
        let vm: TableViewModel<ScriptedTransport> = TableViewModel::new(None);
        let err = block_on(vm.load()).unwrap_err();
        assert_eq!(err.to_string(), "Sistema de conexión no disponible");
    }
}
