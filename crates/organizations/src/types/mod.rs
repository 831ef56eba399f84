pub mod errors;

pub use errors::{OrganizationError, OrganizationResult};
