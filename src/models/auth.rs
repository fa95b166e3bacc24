use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tipo de usuario del portal
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Cliente,
    Trabajador,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Cliente => "cliente",
            UserType::Trabajador => "trabajador",
        }
    }

    /// Endpoint de registro para este tipo de usuario
    pub fn register_path(&self) -> &'static str {
        match self {
            UserType::Cliente => "/auth/register/cliente",
            UserType::Trabajador => "/auth/register/trabajador",
        }
    }

    /// Estado del checkbox `userTypeToggle` (marcado = trabajador)
    pub fn from_toggle(checked: bool) -> Self {
        if checked {
            UserType::Trabajador
        } else {
            UserType::Cliente
        }
    }
}

/// Usuario tal como lo devuelve el servidor. No se modifica localmente.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "UserWire")]
pub struct UserRecord {
    pub id: Value,
    pub username: String,
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Forma cruda del usuario. El servidor puede mandar cualquiera de las dos
/// grafías (o ambas), nulos y tipos desconocidos; nada de eso invalida el login.
#[derive(Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    username: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    nombre: Option<Value>,
    #[serde(default, rename = "userType")]
    user_type: Option<Value>,
    #[serde(default, rename = "type")]
    kind: Option<Value>,
    #[serde(default)]
    role: Option<Value>,
    #[serde(default)]
    rol: Option<Value>,
    #[serde(default)]
    email: Option<Value>,
    #[serde(default)]
    correo: Option<Value>,
}

/// Primer valor de texto no vacío (los números se aceptan como texto)
fn first_text(candidates: &[&Option<Value>]) -> Option<String> {
    candidates.iter().find_map(|value| match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn parse_user_type(value: &Option<Value>) -> Option<UserType> {
    match value.as_ref()?.as_str()?.trim().to_ascii_lowercase().as_str() {
        "cliente" => Some(UserType::Cliente),
        "trabajador" => Some(UserType::Trabajador),
        _ => None,
    }
}

impl From<UserWire> for UserRecord {
    fn from(wire: UserWire) -> Self {
        Self {
            id: wire.id.unwrap_or(Value::Null),
            username: first_text(&[&wire.username]).unwrap_or_default(),
            name: first_text(&[&wire.name, &wire.nombre]).unwrap_or_default(),
            user_type: parse_user_type(&wire.user_type).or_else(|| parse_user_type(&wire.kind)),
            role: first_text(&[&wire.role, &wire.rol]),
            email: first_text(&[&wire.email, &wire.correo]),
        }
    }
}

impl UserRecord {
    /// Nombre a mostrar; si el servidor no envía nombre se usa el username
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.username
        } else {
            &self.name
        }
    }

    /// Línea de rol del dashboard
    pub fn role_label(&self) -> String {
        match &self.role {
            Some(role) if !role.is_empty() => format!("Rol: {}", role),
            _ => "Cliente".to_string(),
        }
    }
}

/// Sesión autenticada: usuario + token, siempre juntos
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: UserRecord,
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(rename = "userType")]
    pub user_type: UserType,
}

/// Cuerpo de `/auth/register/*`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
}

/// Valores del formulario de registro (se descartan tras el envío)
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationInput {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub nombre: String,
    pub correo: String,
    pub telefono: String,
}

impl RegistrationInput {
    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            nombre: self.nombre.trim().to_string(),
            correo: self.correo.trim().to_string(),
            telefono: self.telefono.trim().to_string(),
        }
    }
}

/// Datos útiles de una respuesta de login exitosa
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: UserRecord,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginData {
    /// Extrae `{user, token}` del cuerpo; acepta también `{data: {user, token}}`
    pub fn from_body(body: &Value) -> Option<Self> {
        serde_json::from_value::<LoginData>(body.clone())
            .ok()
            .or_else(|| {
                body.get("data")
                    .and_then(|inner| serde_json::from_value::<LoginData>(inner.clone()).ok())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_record_accepts_spanish_field_names() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 101,
            "username": "admin",
            "nombre": "Administrador Principal",
            "rol": "admin",
            "correo": "admin@cinemax.com",
            "userType": "trabajador"
        }))
        .unwrap();

        assert_eq!(user.name, "Administrador Principal");
        assert_eq!(user.role.as_deref(), Some("admin"));
        assert_eq!(user.email.as_deref(), Some("admin@cinemax.com"));
        assert_eq!(user.user_type, Some(UserType::Trabajador));
        assert_eq!(user.role_label(), "Rol: admin");
    }

    #[test]
    fn test_user_record_with_both_spellings() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 101,
            "username": "admin",
            "name": "Administrador Principal",
            "nombre": "Admin",
            "type": "trabajador",
            "userType": "trabajador",
            "rol": "admin",
            "role": "gerente",
            "email": "admin@cinemax.com",
            "correo": "otro@cinemax.com"
        }))
        .unwrap();

        assert_eq!(user.name, "Administrador Principal");
        assert_eq!(user.user_type, Some(UserType::Trabajador));
        assert_eq!(user.role.as_deref(), Some("gerente"));
        assert_eq!(user.email.as_deref(), Some("admin@cinemax.com"));
    }

    #[test]
    fn test_user_record_tolerates_nulls_and_unknown_type() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 7,
            "username": "anag",
            "name": null,
            "nombre": "Ana García",
            "type": "admin",
            "rol": null,
            "email": null
        }))
        .unwrap();

        assert_eq!(user.name, "Ana García");
        assert_eq!(user.user_type, None);
        assert_eq!(user.role, None);
        assert_eq!(user.role_label(), "Cliente");

        let nameless: UserRecord =
            serde_json::from_value(json!({"id": 8, "username": "juanperez", "name": null})).unwrap();
        assert_eq!(nameless.display_name(), "juanperez");
    }

    #[test]
    fn test_user_record_survives_storage_round_trip() {
        let user: UserRecord = serde_json::from_value(json!({
            "id": 101, "username": "admin", "nombre": "Administrador", "userType": "trabajador"
        }))
        .unwrap();
        let stored = serde_json::to_string(&user).unwrap();
        assert_eq!(serde_json::from_str::<UserRecord>(&stored).unwrap(), user);
    }

    #[test]
    fn test_role_label_defaults_to_cliente() {
        let user: UserRecord = serde_json::from_value(json!({"id": 1, "username": "anag"})).unwrap();
        assert_eq!(user.role_label(), "Cliente");
        assert_eq!(user.display_name(), "anag");
    }

    #[test]
    fn test_login_data_from_flat_and_nested_body() {
        let flat = json!({"token": "abc", "user": {"id": 1, "username": "a", "name": "A"}});
        let nested = json!({"success": true, "data": {"token": "abc", "user": {"id": 1, "username": "a", "name": "A"}}});

        assert_eq!(LoginData::from_body(&flat).unwrap().token.as_deref(), Some("abc"));
        assert_eq!(LoginData::from_body(&nested).unwrap().user.name, "A");
        assert!(LoginData::from_body(&json!({"message": "Credenciales inválidas"})).is_none());
    }

    #[test]
    fn test_login_request_wire_format() {
        let req = LoginRequest {
            username: "admin".into(),
            password: "admin123".into(),
            user_type: UserType::Trabajador,
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"username": "admin", "password": "admin123", "userType": "trabajador"})
        );
    }
}
