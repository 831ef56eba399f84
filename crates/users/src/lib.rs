//! # zccore Users Crate
//!
//! User registration and profile management on top of the document store.
//!
//! - **Entities**: the stored `User` and its request types
//! - **Repositories**: access to the `users` collection
//! - **Services**: validation and business rules
//!
//! ```no_run
//! use std::sync::Arc;
//! use zccore_database::MemoryDocumentStore;
//! use zccore_users::{CreateUserRequest, UserService};
//!
//! # async fn example() -> Result<(), zccore_users::UserError> {
//! let service = UserService::new(Arc::new(MemoryDocumentStore::with_default_indexes()));
//! let user = service
//!     .create_user(CreateUserRequest {
//!         email: "a@example.com".to_string(),
//!         ..CreateUserRequest::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{CreateUserRequest, NewUser, UpdateUserRequest, User};
pub use repositories::UserRepository;
pub use services::UserService;
pub use types::{UserError, UserResult};
