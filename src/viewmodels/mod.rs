pub mod auth_viewmodel;
pub mod table_viewmodel;

pub use auth_viewmodel::{AuthViewModel, DashboardInfo, LoginHeader};
pub use table_viewmodel::TableViewModel;
