/// Página de login (también destino tras logout)
pub const INDEX_PAGE: &str = "index.html";

/// Mensajes de banner compartidos
pub const MSG_AUTH_ERROR: &str = "Error de autenticación";
pub const MSG_CONNECTION_ERROR: &str = "Error de conexión con el servidor";
pub const MSG_NO_TOKEN: &str = "No hay token almacenado";
pub const MSG_REGISTER_ERROR: &str = "Error en el registro";
pub const MSG_NO_DATA: &str = "No se encontraron datos válidos";
pub const MSG_FETCH_ERROR: &str = "Error al obtener datos";
pub const MSG_LOGOUT_CONFIRM: &str = "¿Estás seguro de que quieres cerrar sesión?";
