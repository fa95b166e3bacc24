// ============================================================================
// API CLIENT - SOLO COMUNICACIÓN HTTP
// ============================================================================
// Nunca devuelve error: todo fallo se normaliza en ApiResponse con
// success = false y un mensaje descriptivo en data.message.
// ============================================================================

use std::cell::RefCell;

use serde::Serialize;
use serde_json::{json, Value};

use crate::models::{LoginData, LoginRequest, RegisterRequest, UserType};
use crate::services::transport::{GlooTransport, HttpMethod, HttpRequest, HttpTransport};
use crate::utils::constants::{MSG_CONNECTION_ERROR, MSG_NO_TOKEN};

/// Respuesta uniforme del cliente
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Value,
    pub status: Option<u16>,
    pub error: Option<String>,
}

impl ApiResponse {
    fn connection_failure(cause: &str) -> Self {
        Self {
            success: false,
            data: json!({ "message": format!("No se pudo conectar con el servidor: {}", cause) }),
            status: None,
            error: Some(MSG_CONNECTION_ERROR.to_string()),
        }
    }

    fn local_failure(message: &str) -> Self {
        Self {
            success: false,
            data: json!({ "message": message }),
            status: None,
            error: None,
        }
    }

    /// `data.message` si el servidor lo envió
    pub fn message(&self) -> Option<&str> {
        self.data.get("message").and_then(Value::as_str)
    }

    /// Fallo de red o de parseo (no hubo respuesta JSON del servidor)
    pub fn is_connection_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: HttpMethod::Get,
            body: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            body: Some(body),
        }
    }
}

/// Cliente API. Se crea una vez al arrancar y se comparte con `Rc`.
pub struct ApiClient<T: HttpTransport = GlooTransport> {
    base_url: String,
    token: RefCell<Option<String>>,
    transport: T,
}

impl ApiClient<GlooTransport> {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(base_url, GlooTransport)
    }
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn with_transport(base_url: impl Into<String>, transport: T) -> Self {
        let base_url = base_url.into();
        log::info!("🌐 [API] Conectando a: {}", base_url);
        Self {
            base_url,
            token: RefCell::new(None),
            transport,
        }
    }

    /// Petición genérica: agrega Content-Type y el bearer token si existe
    pub async fn request(&self, path: &str, options: RequestOptions) -> ApiResponse {
        let url = format!("{}{}", self.base_url, path);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.token() {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }

        log::info!("🔗 [API] {} {}", options.method, url);

        let request = HttpRequest {
            method: options.method,
            url: url.clone(),
            headers,
            body: options.body.map(|body| body.to_string()),
        };

        match self.transport.send(request).await {
            Ok(reply) => match serde_json::from_str::<Value>(&reply.body) {
                Ok(data) => ApiResponse {
                    success: (200..300).contains(&reply.status),
                    data,
                    status: Some(reply.status),
                    error: None,
                },
                Err(e) => {
                    log::error!("❌ [API] Respuesta no JSON de {} (HTTP {}): {}", url, reply.status, e);
                    ApiResponse {
                        status: Some(reply.status),
                        ..ApiResponse::connection_failure(&format!("Parse error: {}", e))
                    }
                }
            },
            Err(e) => {
                log::error!("❌ [API] Error de conexión con {}: {}", url, e);
                ApiResponse::connection_failure(&e)
            }
        }
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> ApiResponse {
        match serde_json::to_value(body) {
            Ok(value) => self.request(path, RequestOptions::post(value)).await,
            Err(e) => ApiResponse::local_failure(&format!("Serialization error: {}", e)),
        }
    }

    /// Login de cliente o trabajador. Si tiene éxito guarda el token.
    pub async fn login(&self, username: &str, password: &str, user_type: UserType) -> ApiResponse {
        log::info!("🔐 [API] Login de {} ({})", username, user_type.as_str());
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            user_type,
        };
        let response = self.post_json("/auth/login", &request).await;

        if response.success {
            if let Some(token) = LoginData::from_body(&response.data).and_then(|d| d.token) {
                self.set_token(token);
            }
        }
        response
    }

    /// Registro en el endpoint del tipo de usuario
    pub async fn register(&self, request: &RegisterRequest, user_type: UserType) -> ApiResponse {
        log::info!("📝 [API] Registro de {} como {}", request.username, user_type.as_str());
        self.post_json(user_type.register_path(), request).await
    }

    pub async fn register_cliente(&self, request: &RegisterRequest) -> ApiResponse {
        self.register(request, UserType::Cliente).await
    }

    /// Verificar token; sin token no se hace la petición
    pub async fn verify_token(&self) -> ApiResponse {
        if !self.is_authenticated() {
            return ApiResponse::local_failure(MSG_NO_TOKEN);
        }
        self.request("/auth/verify", RequestOptions::get()).await
    }

    pub async fn get_profile(&self) -> ApiResponse {
        self.request("/auth/profile", RequestOptions::get()).await
    }

    pub async fn check_health(&self) -> ApiResponse {
        self.request("/health", RequestOptions::get()).await
    }

    /// Datos de la tabla datosExcel
    pub async fn get_datos_excel(&self) -> ApiResponse {
        self.request("/auth/datos-excel", RequestOptions::get()).await
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.borrow_mut() = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.borrow_mut() = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.borrow().is_some()
    }
}
