// ============================================================================
// AUTH VIEWMODEL - LÓGICA DE LOGIN / REGISTRO / LOGOUT
// ============================================================================
// Máquina de estados LoggedOut{Login|Register} <-> LoggedIn.
// No toca el DOM: devuelve banners y la vista decide qué mostrar.
// ============================================================================

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::error::PortalError;
use crate::models::{LoginData, RegistrationInput, UserRecord, UserType};
use crate::services::{ApiClient, ApiResponse, GlooTransport, HttpTransport};
use crate::state::{AuthState, Banner, FormMode};
use crate::stores::SessionStore;
use crate::utils::constants::{MSG_AUTH_ERROR, MSG_REGISTER_ERROR};
use crate::utils::validation::{validate_login, validate_registration_data, CharsetProfile};
use crate::utils::{BrowserStorage, StorageBackend};

/// Textos de la cabecera del login según el tipo de usuario
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginHeader {
    pub staff: bool,
    pub subtitle: &'static str,
}

impl LoginHeader {
    pub fn for_user_type(user_type: UserType) -> Self {
        match user_type {
            UserType::Trabajador => Self {
                staff: true,
                subtitle: "Área de trabajadores",
            },
            UserType::Cliente => Self {
                staff: false,
                subtitle: "Tu cine favorito en línea",
            },
        }
    }
}

/// Datos del panel de bienvenida
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardInfo {
    pub name: String,
    pub role_line: String,
    pub type_line: String,
}

pub struct AuthViewModel<T: HttpTransport = GlooTransport, S: StorageBackend = BrowserStorage> {
    api: Rc<ApiClient<T>>,
    store: SessionStore<S>,
    state: RefCell<AuthState>,
    user_type: Cell<UserType>,
    charset: CharsetProfile,
}

impl<T: HttpTransport, S: StorageBackend> AuthViewModel<T, S> {
    pub fn new(api: Rc<ApiClient<T>>, store: SessionStore<S>, charset: CharsetProfile) -> Self {
        Self {
            api,
            store,
            state: RefCell::new(AuthState::default()),
            user_type: Cell::new(UserType::default()),
            charset,
        }
    }

    /// Restaurar sesión guardada al cargar la página
    pub fn init(&self) -> Option<UserRecord> {
        match self.store.restore() {
            Some(session) => {
                log::info!("✅ [AUTH] Sesión restaurada para {}", session.user.username);
                self.api.set_token(session.token);
                *self.state.borrow_mut() = AuthState::LoggedIn {
                    user: session.user.clone(),
                };
                Some(session.user)
            }
            None => {
                log::info!("🔐 [AUTH] Sin sesión guardada");
                None
            }
        }
    }

    pub fn state(&self) -> Ref<'_, AuthState> {
        self.state.borrow()
    }

    pub fn user_type(&self) -> UserType {
        self.user_type.get()
    }

    /// Cambio cliente/trabajador: solo cambia textos y endpoint de registro
    pub fn set_user_type(&self, user_type: UserType) -> LoginHeader {
        log::info!("🔄 [AUTH] Tipo de usuario: {}", user_type.as_str());
        self.user_type.set(user_type);
        LoginHeader::for_user_type(user_type)
    }

    pub fn show_register(&self) {
        self.set_form_mode(FormMode::Register);
    }

    pub fn show_login(&self) {
        self.set_form_mode(FormMode::Login);
    }

    fn set_form_mode(&self, mode: FormMode) {
        let mut state = self.state.borrow_mut();
        if let AuthState::LoggedOut { .. } = *state {
            *state = AuthState::LoggedOut { mode };
        }
    }

    pub async fn submit_login(&self, username: &str, password: &str) -> Result<Banner, PortalError> {
        validate_login(username, password)?;

        let user_type = self.user_type();
        let response = self.api.login(username.trim(), password, user_type).await;
        if !response.success {
            log::warn!("❌ [AUTH] Login rechazado para {}", username);
            return Err(failure_from(&response, MSG_AUTH_ERROR));
        }

        let data = LoginData::from_body(&response.data)
            .ok_or_else(|| PortalError::Auth("Respuesta de login inválida".to_string()))?;
        let token = data
            .token
            .ok_or_else(|| PortalError::Auth("El servidor no envió un token".to_string()))?;

        // Sin storage la sesión vive solo en esta página
        if let Err(e) = self.store.save(&data.user, &token) {
            log::warn!("⚠️ [AUTH] {}", e);
        }
        self.api.set_token(token);

        let kind = data.user.user_type.unwrap_or(user_type);
        let banner = Banner::success(format!(
            "¡Bienvenido {}! ({})",
            data.user.display_name(),
            kind.as_str()
        ));
        log::info!("✅ [AUTH] Login exitoso: {}", data.user.username);
        *self.state.borrow_mut() = AuthState::LoggedIn { user: data.user };
        Ok(banner)
    }

    /// Registro. Tras un éxito la vista vuelve al login pasado un retraso.
    pub async fn submit_register(&self, input: &RegistrationInput) -> Result<Banner, PortalError> {
        validate_registration_data(input, self.charset)?;

        let response = self.api.register(&input.to_request(), self.user_type()).await;
        if !response.success {
            log::warn!("❌ [AUTH] Registro rechazado para {}", input.username);
            return Err(failure_from(&response, MSG_REGISTER_ERROR));
        }

        log::info!("✅ [AUTH] Registro exitoso: {}", input.username);
        let text = response
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| "¡Registro exitoso! Ya puedes iniciar sesión".to_string());
        Ok(Banner::success(text))
    }

    pub fn logout(&self) {
        log::info!("👋 [AUTH] Logout");
        self.store.clear();
        self.api.clear_token();
        *self.state.borrow_mut() = AuthState::LoggedOut {
            mode: FormMode::Login,
        };
    }

    pub fn dashboard_info(&self) -> Option<DashboardInfo> {
        let state = self.state.borrow();
        let user = state.user()?;
        let kind = user.user_type.unwrap_or(self.user_type());
        Some(DashboardInfo {
            name: user.display_name().to_string(),
            role_line: user.role_label(),
            type_line: format!("Tipo: {}", kind.as_str()),
        })
    }
}

fn failure_from(response: &ApiResponse, fallback: &str) -> PortalError {
    let message = response.message().unwrap_or(fallback).to_string();
    if response.is_connection_error() {
        PortalError::Connection(message)
    } else {
        PortalError::Auth(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageConfig;
    use crate::services::transport::testing::ScriptedTransport;
    use crate::utils::validation::Field;
    use crate::utils::MemoryStorage;
    use futures::executor::block_on;
    use serde_json::json;

    struct Fixture {
        vm: AuthViewModel<ScriptedTransport, MemoryStorage>,
        api: Rc<ApiClient<ScriptedTransport>>,
        transport: ScriptedTransport,
        backend: MemoryStorage,
    }

    fn fixture() -> Fixture {
        let transport = ScriptedTransport::new();
        let backend = MemoryStorage::new();
        let api = Rc::new(ApiClient::with_transport("http://api.test", transport.clone()));
        let store = SessionStore::new(backend.clone(), StorageConfig::default());
        let vm = AuthViewModel::new(api.clone(), store, CharsetProfile::Permissive);
        Fixture { vm, api, transport, backend }
    }

    fn admin_body() -> serde_json::Value {
        json!({
            "token": "abc",
            "user": {
                "id": 101,
                "username": "admin",
                "name": "Administrador Principal",
                "type": "trabajador",
                "rol": "admin",
                "email": "admin@cinemax.com"
            }
        })
    }

    fn registration() -> RegistrationInput {
        RegistrationInput {
            username: "anag".into(),
            password: "cliente123".into(),
            confirm_password: "cliente123".into(),
            nombre: "Ana García".into(),
            correo: "ana@email.com".into(),
            telefono: "3009876543".into(),
        }
    }

    #[test]
    fn test_login_success_saves_session_and_welcomes_user() {
        let f = fixture();
        f.vm.set_user_type(UserType::Trabajador);
        f.transport.reply(200, admin_body());

        let banner = block_on(f.vm.submit_login("admin", "admin123")).unwrap();

        assert!(banner.text.contains("Administrador Principal"));
        assert_eq!(banner.css_class(), "message success");
        assert!(f.vm.state().is_logged_in());
        assert_eq!(f.backend.get_item("cine_token").as_deref(), Some("abc"));
        assert!(f.backend.get_item("cine_user").is_some());
        assert_eq!(f.api.token().as_deref(), Some("abc"));

        let info = f.vm.dashboard_info().unwrap();
        assert_eq!(info.name, "Administrador Principal");
        assert_eq!(info.role_line, "Rol: admin");
        assert_eq!(info.type_line, "Tipo: trabajador");
    }

    #[test]
    fn test_login_accepts_mixed_user_shapes() {
        let users = [
            json!({"id": 101, "username": "admin", "name": "Administrador Principal",
                   "type": "trabajador", "userType": "trabajador"}),
            json!({"id": 101, "username": "admin", "name": "Administrador Principal",
                   "nombre": "Administrador Principal"}),
            json!({"id": 101, "username": "admin", "name": "Administrador Principal", "type": "admin"}),
            json!({"id": 101, "username": "admin", "name": null}),
        ];

        for user in users {
            let f = fixture();
            f.vm.set_user_type(UserType::Trabajador);
            f.transport.reply(200, json!({"token": "abc", "user": user}));

            let banner = block_on(f.vm.submit_login("admin", "admin123")).unwrap();

            assert!(banner.text.contains("(trabajador)"), "{}", banner.text);
            assert!(f.vm.state().is_logged_in());
            assert_eq!(f.api.token().as_deref(), Some("abc"));
            assert_eq!(f.backend.get_item("cine_token").as_deref(), Some("abc"));
        }
    }

    #[test]
    fn test_login_accepts_wrapped_body() {
        let f = fixture();
        f.transport.reply(200, json!({"success": true, "data": admin_body()}));

        assert!(block_on(f.vm.submit_login("admin", "admin123")).is_ok());
        assert!(f.vm.state().is_logged_in());
    }

    #[test]
    fn test_login_failure_shows_server_message() {
        let f = fixture();
        f.transport.reply(401, json!({"message": "Usuario o contraseña incorrectos"}));

        let err = block_on(f.vm.submit_login("admin", "mala")).unwrap_err();

        assert_eq!(err, PortalError::Auth("Usuario o contraseña incorrectos".to_string()));
        assert_eq!(f.vm.state().form_mode(), Some(FormMode::Login));
        assert!(f.backend.is_empty());
    }

    #[test]
    fn test_login_failure_without_message_uses_default() {
        let f = fixture();
        f.transport.reply(500, json!({}));

        let err = block_on(f.vm.submit_login("admin", "admin123")).unwrap_err();
        assert_eq!(err.to_string(), MSG_AUTH_ERROR);
    }

    #[test]
    fn test_login_connection_error() {
        let f = fixture();
        f.transport.fail("Failed to fetch");

        let err = block_on(f.vm.submit_login("admin", "admin123")).unwrap_err();
        assert!(matches!(err, PortalError::Connection(_)));
        assert!(!f.vm.state().is_logged_in());
    }

    #[test]
    fn test_empty_login_never_reaches_server() {
        let f = fixture();
        let err = block_on(f.vm.submit_login("", "admin123")).unwrap_err();
        assert!(matches!(err, PortalError::Validation(ref e) if e.field == Field::Username));
        assert_eq!(f.transport.request_count(), 0);
    }

    #[test]
    fn test_login_without_token_is_rejected() {
        let f = fixture();
        f.transport.reply(200, json!({"user": {"id": 1, "username": "anag"}}));

        assert!(block_on(f.vm.submit_login("anag", "cliente123")).is_err());
        assert!(!f.vm.state().is_logged_in());
        assert!(f.backend.is_empty());
    }

    #[test]
    fn test_register_validates_before_request() {
        let f = fixture();
        let mut input = registration();
        input.confirm_password = "otra".into();

        let err = block_on(f.vm.submit_register(&input)).unwrap_err();

        assert_eq!(err.to_string(), "Las contraseñas no coinciden");
        assert_eq!(f.transport.request_count(), 0);
    }

    #[test]
    fn test_register_uses_selected_endpoint() {
        let f = fixture();
        f.vm.show_register();
        f.vm.set_user_type(UserType::Trabajador);
        f.transport.reply(201, json!({"message": "Trabajador registrado"}));

        let banner = block_on(f.vm.submit_register(&registration())).unwrap();

        assert_eq!(banner.text, "Trabajador registrado");
        assert!(f.transport.last_request().unwrap().url.ends_with("/auth/register/trabajador"));
        // el cambio a login lo programa la vista
        assert_eq!(f.vm.state().form_mode(), Some(FormMode::Register));
        f.vm.show_login();
        assert_eq!(f.vm.state().form_mode(), Some(FormMode::Login));
    }

    #[test]
    fn test_register_failure_message() {
        let f = fixture();
        f.transport.reply(409, json!({"message": "El usuario ya existe"}));

        let err = block_on(f.vm.submit_register(&registration())).unwrap_err();
        assert_eq!(err, PortalError::Auth("El usuario ya existe".to_string()));
    }

    #[test]
    fn test_init_restores_session_and_token() {
        let f = fixture();
        f.transport.reply(200, admin_body());
        block_on(f.vm.submit_login("admin", "admin123")).unwrap();

        // nueva página: mismo storage, cliente nuevo
        let api = Rc::new(ApiClient::with_transport("http://api.test", ScriptedTransport::new()));
        let vm = AuthViewModel::new(
            api.clone(),
            SessionStore::new(f.backend.clone(), StorageConfig::default()),
            CharsetProfile::Permissive,
        );

        let user = vm.init().unwrap();
        assert_eq!(user.username, "admin");
        assert!(vm.state().is_logged_in());
        assert_eq!(api.token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_init_with_partial_storage_stays_logged_out() {
        let f = fixture();
        f.backend.set_item("cine_token", "abc").unwrap();

        assert!(f.vm.init().is_none());
        assert!(!f.vm.state().is_logged_in());
        assert!(!f.api.is_authenticated());
    }

    #[test]
    fn test_logout_clears_everything() {
        let f = fixture();
        f.transport.reply(200, admin_body());
        block_on(f.vm.submit_login("admin", "admin123")).unwrap();

        f.vm.logout();

        assert_eq!(*f.vm.state(), AuthState::LoggedOut { mode: FormMode::Login });
        assert!(f.backend.is_empty());
        assert!(!f.api.is_authenticated());
        assert!(f.vm.dashboard_info().is_none());
    }

    #[test]
    fn test_form_mode_ignored_while_logged_in() {
        let f = fixture();
        f.transport.reply(200, admin_body());
        block_on(f.vm.submit_login("admin", "admin123")).unwrap();

        f.vm.show_register();
        assert!(f.vm.state().is_logged_in());
    }

    #[test]
    fn test_user_type_toggle_relabels_header() {
        let f = fixture();
        assert_eq!(f.vm.user_type(), UserType::Cliente);
        let header = f.vm.set_user_type(UserType::from_toggle(true));
        assert!(header.staff);
        assert_eq!(header.subtitle, "Área de trabajadores");
        assert!(!f.vm.set_user_type(UserType::Cliente).staff);
    }
}
