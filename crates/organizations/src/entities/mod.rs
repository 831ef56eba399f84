pub mod member;
pub mod organization;

pub use member::{Member, NewMember};
pub use organization::{CreateOrganizationRequest, NewOrganization, Organization};
