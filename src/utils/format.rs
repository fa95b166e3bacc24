// ============================================================================
// FORMATO DE CELDAS - funciones puras para la tabla de contratos
// ============================================================================

use serde_json::Value;

use crate::models::{Column, ContractRow};

/// Prefijo de los valores binarios serializados por Postgres (`bytea`)
pub const HEX_PREFIX: &str = "\\x";
pub const MAX_CELL_CHARS: usize = 100;
pub const TRUNCATED_CHARS: usize = 97;
pub const NOT_CONVERTIBLE: &str = "No convertible";

/// Cómo se muestran las columnas binarias
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DisplayMode {
    /// Hexadecimal tal como llega (`\x48656c6c6f`)
    #[default]
    Hex,
    /// Texto decodificado (`Hello`)
    Text,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            DisplayMode::Hex => DisplayMode::Text,
            DisplayMode::Text => DisplayMode::Hex,
        }
    }

    /// Etiqueta del botón: describe el modo al que se cambiaría
    pub fn toggle_label(self) -> &'static str {
        match self {
            DisplayMode::Hex => "📝 Mostrar Texto Normal",
            DisplayMode::Text => "🔢 Mostrar Formato Hex",
        }
    }
}

pub fn is_escaped_hex(value: &str) -> bool {
    value.starts_with(HEX_PREFIX)
}

fn printable_char(code: u8) -> char {
    match code {
        46 => '.',
        32..=126 => code as char,
        _ => '?',
    }
}

/// Decodifica `\x..` por pares de bytes. `None` si no queda nada que
/// decodificar o la entrada no es ASCII.
pub fn decode_escaped_hex(input: &str) -> Option<String> {
    let hex = input.replace(HEX_PREFIX, "");
    if hex.is_empty() || !hex.is_ascii() {
        return None;
    }

    let decoded = hex
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            std::str::from_utf8(pair)
                .ok()
                .and_then(|p| u8::from_str_radix(p, 16).ok())
                .map(printable_char)
                .unwrap_or('?')
        })
        .collect();
    Some(decoded)
}

pub fn hex_to_text(input: &str) -> String {
    decode_escaped_hex(input).unwrap_or_else(|| {
        log::warn!("⚠️ [FORMAT] Valor hex no convertible: {}", input);
        NOT_CONVERTIBLE.to_string()
    })
}

/// Recorta a 97 caracteres + "..." si supera los 100
pub fn truncate(value: &str) -> Option<String> {
    if value.chars().count() <= MAX_CELL_CHARS {
        return None;
    }
    let head: String = value.chars().take(TRUNCATED_CHARS).collect();
    Some(format!("{}...", head))
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Texto plano de un valor JSON; vacío para null, false y ""
fn plain_text(value: &Value) -> String {
    match value {
        Value::Null | Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Fragmento HTML de una celda
pub fn format_cell(value: &Value, column: Column, mode: DisplayMode) -> String {
    let text = plain_text(value);
    if text.is_empty() {
        return text;
    }

    if column.is_binary() && value.is_string() && is_escaped_hex(&text) {
        let raw = escape_html(&text);
        return match mode {
            DisplayMode::Text => format!(
                r#"<span class="converted-text" title="Original: {}">{}</span>"#,
                raw,
                escape_html(&hex_to_text(&text))
            ),
            DisplayMode::Hex => format!(r#"<span class="hex-text" title="Hex format">{}</span>"#, raw),
        };
    }

    if value.is_string() {
        if let Some(short) = truncate(&text) {
            return format!(
                r#"<span class="long-text" title="{}">{}</span>"#,
                escape_html(&text),
                escape_html(&short)
            );
        }
    }

    escape_html(&text)
}

/// Filas `<tr>` del `<tbody>` en el orden fijo de columnas
pub fn render_table_body(rows: &[ContractRow], mode: DisplayMode) -> String {
    let mut html = String::new();
    for (index, row) in rows.iter().enumerate() {
        if index % 2 == 0 {
            html.push_str(r#"<tr class="even-row">"#);
        } else {
            html.push_str("<tr>");
        }
        for column in Column::ALL {
            if column.is_binary() {
                html.push_str(r#"<td class="binary-field">"#);
            } else {
                html.push_str("<td>");
            }
            html.push_str(&format_cell(row.value(column), column, mode));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html
}
