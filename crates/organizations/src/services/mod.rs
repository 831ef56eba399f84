//! Business logic layer

pub mod accessors;
pub mod membership_service;
pub mod organization_service;
pub mod reader;
pub mod validator;
pub mod writer;

#[cfg(test)]
mod test_support;

pub use accessors::EntityAccessors;
pub use membership_service::MembershipService;
pub use organization_service::OrganizationService;
pub use reader::MembershipReader;
pub use validator::MembershipValidator;
pub use writer::MembershipWriter;
