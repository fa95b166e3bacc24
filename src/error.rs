// ============================================================================
// ERRORES DEL PORTAL
// ============================================================================
// Ningún error es fatal: cada uno termina la acción actual y se muestra
// como banner en la página.
// ============================================================================

use thiserror::Error;

use crate::utils::validation::FieldError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortalError {
    /// Error detectado en el cliente antes de llamar al servidor
    #[error("{0}")]
    Validation(#[from] FieldError),

    /// Credenciales rechazadas o token inválido
    #[error("{0}")]
    Auth(String),

    /// El servidor respondió con un error que no es de autenticación
    #[error("{0}")]
    Server(String),

    /// Respuesta exitosa pero con datos vacíos o inválidos
    #[error("{0}")]
    Data(String),

    /// Fallo de red o respuesta no parseable
    #[error("Error de conexión: {0}")]
    Connection(String),

    /// Un componente necesario no está disponible (p.ej. el cliente HTTP)
    #[error("{0} no disponible")]
    MissingDependency(String),

    #[error("Error de almacenamiento: {0}")]
    Storage(String),
}
