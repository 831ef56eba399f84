//! Domain entities for user management

pub mod user;

pub use user::{CreateUserRequest, NewUser, UpdateUserRequest, User};
