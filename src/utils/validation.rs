// ============================================================================
// VALIDACIÓN DE CAMPOS - funciones puras
// ============================================================================
// Se usan en blur (feedback inline) y en submit (registro completo).
// ============================================================================

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::RegistrationInput;

pub const USERNAME_MIN_LEN: usize = 3;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const FULL_NAME_MIN_LEN: usize = 3;
pub const PHONE_MIN_DIGITS: usize = 7;
pub const PHONE_MAX_DIGITS: usize = 15;

lazy_static::lazy_static! {
    static ref USERNAME_PERMISSIVE: Regex = Regex::new(r"^[A-Za-z0-9._-]+$").unwrap();
    static ref USERNAME_STRICT: Regex = Regex::new(r"^[A-Za-z._-]+$").unwrap();
    static ref FULL_NAME_PERMISSIVE: Regex = Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñÜü0-9 ]+$").unwrap();
    static ref FULL_NAME_STRICT: Regex = Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñÜü ]+$").unwrap();
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE: Regex = Regex::new(r"^\+?[0-9 ()-]+$").unwrap();
}

/// Conjunto de caracteres permitido en usuario y nombre completo
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharsetProfile {
    /// Letras y dígitos
    #[default]
    Permissive,
    /// Sin dígitos en usuario ni nombre
    Strict,
}

impl CharsetProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "permissive" => Some(CharsetProfile::Permissive),
            "strict" => Some(CharsetProfile::Strict),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Username,
    Password,
    ConfirmPassword,
    FullName,
    Email,
    Phone,
}

impl Field {
    /// Orden de validación del registro
    pub const ALL: [Field; 6] = [
        Field::Username,
        Field::Password,
        Field::ConfirmPassword,
        Field::FullName,
        Field::Email,
        Field::Phone,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub type FieldResult = Result<(), FieldError>;

pub fn validate_username(value: &str, profile: CharsetProfile) -> FieldResult {
    let value = value.trim();
    if value.chars().count() < USERNAME_MIN_LEN {
        return Err(FieldError::new(
            Field::Username,
            format!("El usuario debe tener al menos {} caracteres", USERNAME_MIN_LEN),
        ));
    }
    let (pattern, message) = match profile {
        CharsetProfile::Permissive => (
            &*USERNAME_PERMISSIVE,
            "El usuario solo puede contener letras, números, puntos, guiones y guiones bajos",
        ),
        CharsetProfile::Strict => (
            &*USERNAME_STRICT,
            "El usuario solo puede contener letras, puntos, guiones y guiones bajos",
        ),
    };
    if !pattern.is_match(value) {
        return Err(FieldError::new(Field::Username, message));
    }
    Ok(())
}

pub fn validate_password(value: &str) -> FieldResult {
    if value.chars().count() < PASSWORD_MIN_LEN {
        return Err(FieldError::new(
            Field::Password,
            format!("La contraseña debe tener al menos {} caracteres", PASSWORD_MIN_LEN),
        ));
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> FieldResult {
    if password != confirm {
        return Err(FieldError::new(Field::ConfirmPassword, "Las contraseñas no coinciden"));
    }
    Ok(())
}

pub fn validate_full_name(value: &str, profile: CharsetProfile) -> FieldResult {
    let value = value.trim();
    if value.chars().count() < FULL_NAME_MIN_LEN {
        return Err(FieldError::new(
            Field::FullName,
            format!("El nombre debe tener al menos {} caracteres", FULL_NAME_MIN_LEN),
        ));
    }
    let (pattern, message) = match profile {
        CharsetProfile::Permissive => (
            &*FULL_NAME_PERMISSIVE,
            "El nombre solo puede contener letras, números y espacios",
        ),
        CharsetProfile::Strict => (
            &*FULL_NAME_STRICT,
            "El nombre solo puede contener letras y espacios",
        ),
    };
    if !pattern.is_match(value) {
        return Err(FieldError::new(Field::FullName, message));
    }
    Ok(())
}

pub fn validate_email(value: &str) -> FieldResult {
    if !EMAIL.is_match(value.trim()) {
        return Err(FieldError::new(Field::Email, "Ingresa un correo electrónico válido"));
    }
    Ok(())
}

pub fn validate_phone(value: &str) -> FieldResult {
    let value = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE.is_match(value) || !(PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits) {
        return Err(FieldError::new(
            Field::Phone,
            format!(
                "Ingresa un teléfono válido ({} a {} dígitos)",
                PHONE_MIN_DIGITS, PHONE_MAX_DIGITS
            ),
        ));
    }
    Ok(())
}

/// Login: solo exige ambos campos
pub fn validate_login(username: &str, password: &str) -> FieldResult {
    if username.trim().is_empty() {
        return Err(FieldError::new(Field::Username, "Ingresa tu usuario"));
    }
    if password.is_empty() {
        return Err(FieldError::new(Field::Password, "Ingresa tu contraseña"));
    }
    Ok(())
}

/// Un solo campo del registro (validación al perder el foco)
pub fn validate_field(field: Field, input: &RegistrationInput, profile: CharsetProfile) -> FieldResult {
    match field {
        Field::Username => validate_username(&input.username, profile),
        Field::Password => validate_password(&input.password),
        Field::ConfirmPassword => validate_confirm_password(&input.password, &input.confirm_password),
        Field::FullName => validate_full_name(&input.nombre, profile),
        Field::Email => validate_email(&input.correo),
        Field::Phone => validate_phone(&input.telefono),
    }
}

/// Valida el registro completo en orden fijo y devuelve el primer error
pub fn validate_registration_data(input: &RegistrationInput, profile: CharsetProfile) -> FieldResult {
    Field::ALL
        .iter()
        .try_for_each(|&field| validate_field(field, input, profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> RegistrationInput {
        RegistrationInput {
            username: "juanperez".into(),
            password: "cliente123".into(),
            confirm_password: "cliente123".into(),
            nombre: "Juan Pérez".into(),
            correo: "juan@email.com".into(),
            telefono: "+57 300 123 4567".into(),
        }
    }

    fn failing_field(input: &RegistrationInput) -> Option<Field> {
        validate_registration_data(input, CharsetProfile::Permissive)
            .err()
            .map(|e| e.field)
    }

    #[test]
    fn test_valid_registration_passes() {
        assert_eq!(validate_registration_data(&valid_input(), CharsetProfile::Permissive), Ok(()));
        assert_eq!(validate_registration_data(&valid_input(), CharsetProfile::Strict), Ok(()));
    }

    #[test]
    fn test_each_field_below_minimum_is_rejected() {
        let mut input = valid_input();
        input.username = "ab".into();
        assert_eq!(failing_field(&input), Some(Field::Username));

        let mut input = valid_input();
        input.password = "12345".into();
        input.confirm_password = "12345".into();
        assert_eq!(failing_field(&input), Some(Field::Password));

        let mut input = valid_input();
        input.nombre = "  Al ".into();
        assert_eq!(failing_field(&input), Some(Field::FullName));

        let mut input = valid_input();
        input.correo = "a@b".into();
        assert_eq!(failing_field(&input), Some(Field::Email));

        let mut input = valid_input();
        input.telefono = "123456".into();
        assert_eq!(failing_field(&input), Some(Field::Phone));
    }

    #[test]
    fn test_password_mismatch_always_rejected() {
        let mut input = valid_input();
        input.confirm_password = "cliente124".into();
        let err = validate_registration_data(&input, CharsetProfile::Permissive).unwrap_err();
        assert_eq!(err.field, Field::ConfirmPassword);
        assert_eq!(err.message, "Las contraseñas no coinciden");

        // Campos posteriores inválidos no ocultan el mismatch
        input.correo = "no-es-correo".into();
        input.telefono = "x".into();
        assert_eq!(failing_field(&input), Some(Field::ConfirmPassword));
    }

    #[test]
    fn test_single_field_check_ignores_other_fields() {
        let mut input = RegistrationInput::default();
        input.correo = "ana@email.com".into();
        assert_eq!(validate_field(Field::Email, &input, CharsetProfile::Permissive), Ok(()));
        assert!(validate_field(Field::Phone, &input, CharsetProfile::Permissive).is_err());
    }

    #[test]
    fn test_first_failure_wins() {
        let input = RegistrationInput::default();
        assert_eq!(failing_field(&input), Some(Field::Username));
    }

    #[test]
    fn test_strict_profile_rejects_digits() {
        assert!(validate_username("maria.empleado", CharsetProfile::Strict).is_ok());
        assert!(validate_username("maria2", CharsetProfile::Strict).is_err());
        assert!(validate_username("maria2", CharsetProfile::Permissive).is_ok());
        assert!(validate_full_name("Ana García 2", CharsetProfile::Strict).is_err());
        assert!(validate_full_name("Ana García", CharsetProfile::Strict).is_ok());
    }

    #[test]
    fn test_username_charset() {
        assert!(validate_username("carlos.gerente", CharsetProfile::Permissive).is_ok());
        assert!(validate_username("carlos gerente", CharsetProfile::Permissive).is_err());
        assert!(validate_username("carlos@x", CharsetProfile::Permissive).is_err());
    }

    #[test]
    fn test_phone_shapes() {
        assert!(validate_phone("3001234567").is_ok());
        assert!(validate_phone("(601) 555-1234").is_ok());
        assert!(validate_phone("300-ABC-4567").is_err());
        assert!(validate_phone("1234567890123456").is_err());
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("admin", "admin123").is_ok());
        assert_eq!(validate_login("  ", "x").unwrap_err().field, Field::Username);
        assert_eq!(validate_login("admin", "").unwrap_err().field, Field::Password);
    }

    #[test]
    fn test_charset_profile_parse() {
        assert_eq!(CharsetProfile::parse("STRICT"), Some(CharsetProfile::Strict));
        assert_eq!(CharsetProfile::parse("otro"), None);
    }
}
