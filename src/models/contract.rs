use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fila de la tabla `datosExcel`. Todos los campos pueden faltar y pueden
/// llegar como texto o como número.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRow {
    #[serde(default)]
    pub id: Value,
    #[serde(default, rename = "nrocto")]
    pub contract_number: Value,
    #[serde(default, rename = "contratista")]
    pub contractor: Value,
    /// Columna binaria (`\x...`)
    #[serde(default, rename = "identificacion")]
    pub identification: Value,
    #[serde(default, rename = "objeto")]
    pub purpose: Value,
    #[serde(default)]
    pub cdp: Value,
    #[serde(default, rename = "tiempo")]
    pub duration: Value,
    /// Columna binaria (`\x...`)
    #[serde(default, rename = "vrcto")]
    pub contract_value: Value,
    #[serde(default, rename = "unidad")]
    pub unit: Value,
    #[serde(default, rename = "rubro")]
    pub budget_line: Value,
}

/// Columnas de la tabla, en el orden en que se pintan
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Id,
    ContractNumber,
    Contractor,
    Identification,
    Purpose,
    Cdp,
    Duration,
    ContractValue,
    Unit,
    BudgetLine,
}

impl Column {
    pub const ALL: [Column; 10] = [
        Column::Id,
        Column::ContractNumber,
        Column::Contractor,
        Column::Identification,
        Column::Purpose,
        Column::Cdp,
        Column::Duration,
        Column::ContractValue,
        Column::Unit,
        Column::BudgetLine,
    ];

    /// Columnas que pueden contener texto en hexadecimal escapado
    pub fn is_binary(&self) -> bool {
        matches!(self, Column::Identification | Column::ContractValue)
    }
}

impl ContractRow {
    pub fn value(&self, column: Column) -> &Value {
        match column {
            Column::Id => &self.id,
            Column::ContractNumber => &self.contract_number,
            Column::Contractor => &self.contractor,
            Column::Identification => &self.identification,
            Column::Purpose => &self.purpose,
            Column::Cdp => &self.cdp,
            Column::Duration => &self.duration,
            Column::ContractValue => &self.contract_value,
            Column::Unit => &self.unit,
            Column::BudgetLine => &self.budget_line,
        }
    }
}

/// Extrae las filas de la respuesta de `/auth/datos-excel`.
/// Los datos pueden venir en `{data: [...]}` o como arreglo directo.
pub fn rows_from_body(body: &Value) -> Option<Vec<ContractRow>> {
    let candidate = match body.get("data") {
        Some(inner) if inner.is_array() => inner,
        _ => body,
    };
    serde_json::from_value::<Vec<ContractRow>>(candidate.clone()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rows_from_wrapped_and_bare_body() {
        let wrapped = json!({"data": [{"id": 1, "nrocto": "CT-01", "identificacion": "\\x48"}]});
        let bare = json!([{"id": 2, "vrcto": 1500}]);

        let rows = rows_from_body(&wrapped).unwrap();
        assert_eq!(rows[0].contract_number, json!("CT-01"));
        assert_eq!(rows[0].identification, json!("\\x48"));

        let rows = rows_from_body(&bare).unwrap();
        assert_eq!(rows[0].contract_value, json!(1500));
        assert!(rows[0].purpose.is_null());
    }

    #[test]
    fn test_rows_from_invalid_body() {
        assert!(rows_from_body(&json!({"message": "sin datos"})).is_none());
    }

    #[test]
    fn test_only_identification_and_value_are_binary() {
        let binary: Vec<Column> = Column::ALL.iter().copied().filter(Column::is_binary).collect();
        assert_eq!(binary, vec![Column::Identification, Column::ContractValue]);
    }
}
