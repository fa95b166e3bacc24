pub mod auth_view;
pub mod table_view;
