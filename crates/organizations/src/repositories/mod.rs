pub mod member_repository;
pub mod organization_repository;

pub use member_repository::MemberRepository;
pub use organization_repository::OrganizationRepository;
