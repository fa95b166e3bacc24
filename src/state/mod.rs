// ============================================================================
// STATE MODULE
// ============================================================================

pub mod auth_state;
pub mod table_state;

pub use auth_state::*;
pub use table_state::*;
