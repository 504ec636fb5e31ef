//! Permission System
//!
//! Static per-role permission tables. Every check is a pure lookup on
//! `(role, feature)` or `(role, action)`; nothing here is mutated at runtime.

use serde::{Deserialize, Serialize};
use studenttrack_core::Role;

/// A named area of functionality gated per role
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feature {
    Students,
    Faculty,
    Classes,
    Settings,
    Reports,
    Notifications,
    System,
    Analytics,
    Attendance,
    Curriculum,
    Finances,
    Events,
    Resources,
    Assessments,
    LeaveRequests,
    Schedule,
    Grades,
    Courses,
    Leave,
    Results,
    Payments,
}

impl Feature {
    pub const ALL: [Feature; 21] = [
        Feature::Students,
        Feature::Faculty,
        Feature::Classes,
        Feature::Settings,
        Feature::Reports,
        Feature::Notifications,
        Feature::System,
        Feature::Analytics,
        Feature::Attendance,
        Feature::Curriculum,
        Feature::Finances,
        Feature::Events,
        Feature::Resources,
        Feature::Assessments,
        Feature::LeaveRequests,
        Feature::Schedule,
        Feature::Grades,
        Feature::Courses,
        Feature::Leave,
        Feature::Results,
        Feature::Payments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Students => "students",
            Feature::Faculty => "faculty",
            Feature::Classes => "classes",
            Feature::Settings => "settings",
            Feature::Reports => "reports",
            Feature::Notifications => "notifications",
            Feature::System => "system",
            Feature::Analytics => "analytics",
            Feature::Attendance => "attendance",
            Feature::Curriculum => "curriculum",
            Feature::Finances => "finances",
            Feature::Events => "events",
            Feature::Resources => "resources",
            Feature::Assessments => "assessments",
            Feature::LeaveRequests => "leave-requests",
            Feature::Schedule => "schedule",
            Feature::Grades => "grades",
            Feature::Courses => "courses",
            Feature::Leave => "leave",
            Feature::Results => "results",
            Feature::Payments => "payments",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Feature::ALL
            .into_iter()
            .find(|feature| feature.as_str() == wanted)
            .ok_or_else(|| format!("Unknown feature: {}", s))
    }
}

/// Something a user may do to an [`Entity`]
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
    Approve,
    Reject,
    Download,
    Upload,
    Assign,
    Export,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::View,
        Action::Create,
        Action::Update,
        Action::Delete,
        Action::Approve,
        Action::Reject,
        Action::Download,
        Action::Upload,
        Action::Assign,
        Action::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
            Action::Approve => "approve",
            Action::Reject => "reject",
            Action::Download => "download",
            Action::Upload => "upload",
            Action::Assign => "assign",
            Action::Export => "export",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Action::ALL
            .into_iter()
            .find(|action| action.as_str() == wanted)
            .ok_or_else(|| format!("Unknown action: {}", s))
    }
}

/// Data category an action applies to
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Students,
    Faculty,
    Classes,
    Attendance,
    Assessments,
    Reports,
    Courses,
    Leave,
    Schedule,
    Resources,
    Profiles,
    Settings,
    Notifications,
    Events,
    Grades,
    Results,
}

impl Entity {
    pub const ALL: [Entity; 16] = [
        Entity::Students,
        Entity::Faculty,
        Entity::Classes,
        Entity::Attendance,
        Entity::Assessments,
        Entity::Reports,
        Entity::Courses,
        Entity::Leave,
        Entity::Schedule,
        Entity::Resources,
        Entity::Profiles,
        Entity::Settings,
        Entity::Notifications,
        Entity::Events,
        Entity::Grades,
        Entity::Results,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Students => "students",
            Entity::Faculty => "faculty",
            Entity::Classes => "classes",
            Entity::Attendance => "attendance",
            Entity::Assessments => "assessments",
            Entity::Reports => "reports",
            Entity::Courses => "courses",
            Entity::Leave => "leave",
            Entity::Schedule => "schedule",
            Entity::Resources => "resources",
            Entity::Profiles => "profiles",
            Entity::Settings => "settings",
            Entity::Notifications => "notifications",
            Entity::Events => "events",
            Entity::Grades => "grades",
            Entity::Results => "results",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Entity::ALL
            .into_iter()
            .find(|entity| entity.as_str() == wanted)
            .ok_or_else(|| format!("Unknown entity: {}", s))
    }
}

/// Features visible to a role
pub fn features_for(role: Role) -> &'static [Feature] {
    use Feature::*;

    match role {
        Role::Admin => &[
            Students,
            Faculty,
            Classes,
            Settings,
            Reports,
            Notifications,
            System,
            Analytics,
            Attendance,
            Curriculum,
            Finances,
            Events,
            Resources,
        ],
        Role::Faculty => &[
            Classes,
            Attendance,
            Assessments,
            LeaveRequests,
            Reports,
            Students,
            Schedule,
            Resources,
            Grades,
        ],
        Role::Student => &[
            Courses,
            Attendance,
            Assessments,
            Leave,
            Results,
            Schedule,
            Payments,
            Resources,
            Grades,
        ],
    }
}

/// Entities a role may apply `action` to.
///
/// Admin is not listed here; [`can_perform_action`] grants it everything.
pub fn entities_for(role: Role, action: Action) -> &'static [Entity] {
    use Entity::*;

    match (role, action) {
        (Role::Admin, _) => &Entity::ALL,

        (Role::Faculty, Action::View) => &[
            Classes,
            Students,
            Attendance,
            Assessments,
            Reports,
            Schedule,
            Resources,
            Grades,
        ],
        (Role::Faculty, Action::Create) => &[Attendance, Assessments, Reports, Grades, Resources],
        (Role::Faculty, Action::Update) => &[Attendance, Assessments, Grades, Profiles],
        (Role::Faculty, Action::Delete) => &[Resources],
        (Role::Faculty, Action::Approve) => &[Leave],
        (Role::Faculty, Action::Reject) => &[Leave],
        (Role::Faculty, Action::Download) => &[Reports, Resources, Grades],
        (Role::Faculty, Action::Upload) => &[Resources, Assessments],
        (Role::Faculty, Action::Assign) => &[Grades],
        (Role::Faculty, Action::Export) => &[Reports, Grades, Attendance],

        (Role::Student, Action::View) => &[
            Courses,
            Attendance,
            Assessments,
            Results,
            Schedule,
            Resources,
            Grades,
        ],
        (Role::Student, Action::Create) => &[Leave],
        (Role::Student, Action::Update) => &[Profiles],
        (Role::Student, Action::Download) => &[Resources],
        (Role::Student, Action::Upload) => &[Assessments],
        (
            Role::Student,
            Action::Delete | Action::Approve | Action::Reject | Action::Assign | Action::Export,
        ) => &[],
    }
}

/// True iff the role's feature table contains `feature`. No role means no access.
pub fn has_feature_access(role: Option<Role>, feature: Feature) -> bool {
    role.is_some_and(|role| features_for(role).contains(&feature))
}

/// Admin may do anything; other roles consult the action table.
pub fn can_perform_action(role: Option<Role>, action: Action, entity: Entity) -> bool {
    match role {
        Some(Role::Admin) => true,
        Some(role) => entities_for(role, action).contains(&entity),
        None => false,
    }
}

pub fn can_manage_users(role: Option<Role>) -> bool {
    role == Some(Role::Admin)
}

pub fn can_configure_system(role: Option<Role>) -> bool {
    role == Some(Role::Admin)
}

pub fn can_view_reports(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Admin | Role::Faculty))
}
