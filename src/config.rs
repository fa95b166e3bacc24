use serde::{Deserialize, Serialize};

use crate::utils::validation::CharsetProfile;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend_url_development: String,
    pub backend_url_production: String,
    /// "development", "production" o "auto" (detección por hostname/puerto)
    pub environment: String,
    pub enable_logging: bool,
    pub storage_config: StorageConfig,
    pub ui_config: UIConfig,
    pub charset_profile: CharsetProfile,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url_development: "http://localhost:3001/api".to_string(),
            backend_url_production: "https://loginutaller.vercel.app/api".to_string(),
            environment: "auto".to_string(),
            enable_logging: true,
            storage_config: StorageConfig::default(),
            ui_config: UIConfig::default(),
            charset_profile: CharsetProfile::Permissive,
        }
    }
}

/// Claves de localStorage para la sesión
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub user_key: String,
    pub token_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            user_key: "cine_user".to_string(),
            token_key: "cine_token".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UIConfig {
    pub register_redirect_delay_ms: u32,
    pub table_load_delay_ms: u32,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            register_redirect_delay_ms: 2000,
            table_load_delay_ms: 100,
        }
    }
}

/// Puertos de servidores de desarrollo (Live Server, webpack, etc.)
const DEV_PORTS: [&str; 3] = ["5500", "8080", "3000"];

impl AppConfig {
    /// Carga la configuración desde variables de entorno en tiempo de compilación
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url_development: option_env!("BACKEND_URL_DEVELOPMENT")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_development),
            backend_url_production: option_env!("BACKEND_URL_PRODUCTION")
                .map(str::to_string)
                .unwrap_or(defaults.backend_url_production),
            environment: option_env!("ENVIRONMENT")
                .unwrap_or("auto").to_string(),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            storage_config: StorageConfig {
                user_key: option_env!("STORAGE_USER_KEY")
                    .map(str::to_string)
                    .unwrap_or(defaults.storage_config.user_key),
                token_key: option_env!("STORAGE_TOKEN_KEY")
                    .map(str::to_string)
                    .unwrap_or(defaults.storage_config.token_key),
            },
            ui_config: UIConfig {
                register_redirect_delay_ms: option_env!("REGISTER_REDIRECT_DELAY_MS")
                    .unwrap_or("2000").parse().unwrap_or(2000),
                table_load_delay_ms: option_env!("TABLE_LOAD_DELAY_MS")
                    .unwrap_or("100").parse().unwrap_or(100),
            },
            charset_profile: option_env!("CHARSET_PROFILE")
                .and_then(CharsetProfile::parse)
                .unwrap_or(defaults.charset_profile),
        }
    }

    /// Obtiene la URL del backend según el entorno.
    /// En modo "auto" se usa el hostname y el puerto de la página actual.
    pub fn backend_url(&self, hostname: &str, port: &str) -> &str {
        match self.environment.as_str() {
            "production" => &self.backend_url_production,
            "development" => &self.backend_url_development,
            _ if is_development_host(hostname, port) => &self.backend_url_development,
            _ => &self.backend_url_production,
        }
    }

    /// URL del backend para la página cargada en el navegador
    pub fn backend_url_for_window(&self) -> String {
        let location = web_sys::window().map(|w| w.location());
        let hostname = location.as_ref().and_then(|l| l.hostname().ok()).unwrap_or_default();
        let port = location.as_ref().and_then(|l| l.port().ok()).unwrap_or_default();

        log::info!("🔍 Detectando entorno: hostname={} port={}", hostname, port);
        self.backend_url(&hostname, &port).to_string()
    }

    /// Verifica si el modo de logging está habilitado
    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

/// Localhost servido desde un puerto de desarrollo conocido
pub fn is_development_host(hostname: &str, port: &str) -> bool {
    let is_localhost = hostname == "localhost" || hostname == "127.0.0.1";
    is_localhost && DEV_PORTS.contains(&port)
}

// Configuración global estática
lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
