// ============================================================================
// TABLE STATE - datos de la última carga + modo de visualización
// ============================================================================

use crate::models::ContractRow;
use crate::utils::format::{render_table_body, DisplayMode};

/// Panel visible de la página de tabla
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TableStatus {
    #[default]
    Loading,
    Loaded { total: usize },
    Error { message: String },
}

#[derive(Clone, Debug, Default)]
pub struct TableState {
    pub current_data: Option<Vec<ContractRow>>,
    pub mode: DisplayMode,
    pub status: TableStatus,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_loading(&mut self) {
        self.status = TableStatus::Loading;
    }

    /// Nuevos datos: se conservan para re-renderizar sin volver a pedirlos
    pub fn set_rows(&mut self, rows: Vec<ContractRow>) {
        self.status = TableStatus::Loaded { total: rows.len() };
        self.current_data = Some(rows);
    }

    /// Un error no borra los últimos datos
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.status = TableStatus::Error {
            message: message.into(),
        };
    }

    pub fn toggle_mode(&mut self) -> DisplayMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// `<tbody>` de los últimos datos en el modo actual
    pub fn body_html(&self) -> Option<String> {
        self.current_data
            .as_deref()
            .map(|rows| render_table_body(rows, self.mode))
    }
}
