use std::sync::Arc;

use zccore_database::DocumentStore;
use zccore_organizations::{MembershipService, OrganizationService};
use zccore_users::UserService;

/// Services shared by every handler. All of them talk to the same store.
#[derive(Clone)]
pub struct AppState {
    users: UserService,
    organizations: OrganizationService,
    memberships: MembershipService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: UserService::new(Arc::clone(&store)),
            organizations: OrganizationService::new(Arc::clone(&store)),
            memberships: MembershipService::new(store),
        }
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn organizations(&self) -> &OrganizationService {
        &self.organizations
    }

    pub fn memberships(&self) -> &MembershipService {
        &self.memberships
    }
}
