//! Session Context
//!
//! A snapshot of who is using the system, derived from the stored user record.
//! Permission helpers delegate to the static tables in [`super::permissions`].

use super::permissions::{self, Action, Entity, Feature};
use studenttrack_core::{Role, User};

/// Derived view of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    /// Session with nobody signed in
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    /// Session for a signed-in user
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_feature_access(&self, feature: Feature) -> bool {
        permissions::has_feature_access(self.role(), feature)
    }

    pub fn can_perform_action(&self, action: Action, entity: Entity) -> bool {
        permissions::can_perform_action(self.role(), action, entity)
    }

    /// Landing page for this session's role
    pub fn dashboard_path(&self) -> &'static str {
        crate::routing::dashboard_path(self.role())
    }

    /// Create a summary string for logging
    pub fn summary(&self) -> String {
        match &self.user {
            Some(user) => format!(
                "Session[user={}({}), email={}, role={}]",
                user.display_name(),
                user.id,
                user.email,
                user.role
            ),
            None => "Session[anonymous]".to_string(),
        }
    }
}

impl From<Option<User>> for Session {
    fn from(user: Option<User>) -> Self {
        Self { user }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_nothing() {
        let session = Session::anonymous();
        assert!(!session.is_authenticated());
        assert!(session.role().is_none());
        assert!(!session.has_feature_access(Feature::Courses));
        assert_eq!(session.dashboard_path(), "/signin");
        assert_eq!(session.summary(), "Session[anonymous]");
    }

    #[test]
    fn authenticated_session_delegates_to_tables() {
        let user = User::new("2", "faculty@example.com", "Jane", "Smith", Role::Faculty);
        let session = Session::authenticated(user);

        assert!(session.is_authenticated());
        assert_eq!(session.role(), Some(Role::Faculty));
        assert!(session.has_feature_access(Feature::LeaveRequests));
        assert!(session.can_perform_action(Action::Delete, Entity::Resources));
        assert!(!session.can_perform_action(Action::Delete, Entity::Students));
        assert_eq!(session.dashboard_path(), "/faculty");
        assert!(session.summary().contains("Jane Smith"));
    }
}
