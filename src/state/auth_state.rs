// ============================================================================
// AUTH STATE - Estado de autenticación
// ============================================================================

use crate::models::UserRecord;

/// Formulario visible mientras no hay sesión
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthState {
    LoggedOut { mode: FormMode },
    LoggedIn { user: UserRecord },
}

impl Default for AuthState {
    fn default() -> Self {
        AuthState::LoggedOut {
            mode: FormMode::Login,
        }
    }
}

impl AuthState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthState::LoggedIn { .. })
    }

    pub fn user(&self) -> Option<&UserRecord> {
        match self {
            AuthState::LoggedIn { user } => Some(user),
            AuthState::LoggedOut { .. } => None,
        }
    }

    /// Modo del formulario; `None` con sesión iniciada
    pub fn form_mode(&self) -> Option<FormMode> {
        match self {
            AuthState::LoggedOut { mode } => Some(*mode),
            AuthState::LoggedIn { .. } => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Mensaje mostrado en `#message`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self.kind {
            BannerKind::Success => "message success",
            BannerKind::Error => "message error",
        }
    }
}
