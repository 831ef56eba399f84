//! # zccore Organizations Crate
//!
//! Organizations and the membership workflow that ties them to users.
//!
//! The document store has no cross-collection transactions, so membership
//! creation is a pipeline of independent store calls:
//!
//! 1. [`EntityAccessors`] parse ids and confirm the organization and user exist
//! 2. [`MembershipValidator`] rejects an existing `(org_id, email)` pair
//! 3. [`MembershipWriter`] inserts and maps unique index violations to
//!    [`OrganizationError::DuplicateMembership`]
//!
//! [`MembershipReader`] lists members after resolving the organization.

pub mod entities;
pub mod repositories;
pub mod services;
pub mod types;

pub use entities::{CreateOrganizationRequest, Member, NewMember, NewOrganization, Organization};
pub use repositories::{MemberRepository, OrganizationRepository};
pub use services::{
    EntityAccessors, MembershipReader, MembershipService, MembershipValidator, MembershipWriter,
    OrganizationService,
};
pub use types::{OrganizationError, OrganizationResult};
