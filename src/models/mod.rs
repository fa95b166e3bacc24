pub mod auth;
pub mod contract;

pub use auth::{LoginData, LoginRequest, RegisterRequest, RegistrationInput, Session, UserRecord, UserType};
pub use contract::{rows_from_body, Column, ContractRow};
