// Utils compartidos

pub mod constants;
pub mod format;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use storage::{BrowserStorage, MemoryStorage, StorageBackend};
