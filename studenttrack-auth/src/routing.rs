//! Role-to-route mapping
//!
//! Dashboard landing pages, sidebar entries and the role each dashboard area
//! requires. Rendering is left to the view layer.

use serde::Serialize;
use studenttrack_core::Role;

pub const SIGN_IN_PATH: &str = "/signin";

/// Sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

const fn link(label: &'static str, href: &'static str) -> NavLink {
    NavLink { label, href }
}

const STUDENT_LINKS: [NavLink; 6] = [
    link("Dashboard", "/student"),
    link("Courses", "/student/courses"),
    link("Assessments", "/student/assessments"),
    link("Attendance", "/student/attendance"),
    link("Leave Requests", "/student/leave"),
    link("Profile", "/student/profile"),
];

const FACULTY_LINKS: [NavLink; 5] = [
    link("Dashboard", "/faculty"),
    link("Classes", "/faculty/classes"),
    link("Attendance", "/faculty/attendance"),
    link("Assessments", "/faculty/assessments"),
    link("Profile", "/faculty/profile"),
];

const ADMIN_LINKS: [NavLink; 5] = [
    link("Dashboard", "/admin"),
    link("Students", "/admin/students"),
    link("Faculty", "/admin/faculty"),
    link("Classes", "/admin/classes"),
    link("Settings", "/admin/settings"),
];

/// Where a role lands after signing in; no role goes to the sign-in page
pub fn dashboard_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => "/admin/settings",
        Some(Role::Faculty) => "/faculty",
        Some(Role::Student) => "/student",
        None => SIGN_IN_PATH,
    }
}

/// Root of the dashboard area owned by `role`
pub fn dashboard_root(role: Role) -> &'static str {
    match role {
        Role::Student => "/student",
        Role::Faculty => "/faculty",
        Role::Admin => "/admin",
    }
}

pub fn nav_links(role: Role) -> &'static [NavLink] {
    match role {
        Role::Student => &STUDENT_LINKS,
        Role::Faculty => &FACULTY_LINKS,
        Role::Admin => &ADMIN_LINKS,
    }
}

/// Role needed to open `path`, `None` for public pages
pub fn required_role(path: &str) -> Option<Role> {
    let path = path.split(['?', '#']).next().unwrap_or(path);

    Role::ALL.into_iter().find(|role| {
        let root = dashboard_root(*role);
        path == root
            || path
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

/// Whether a session with `role` may open `path`
pub fn can_visit(role: Option<Role>, path: &str) -> bool {
    match required_role(path) {
        Some(required) => role == Some(required),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_paths() {
        assert_eq!(dashboard_path(Some(Role::Admin)), "/admin/settings");
        assert_eq!(dashboard_path(Some(Role::Faculty)), "/faculty");
        assert_eq!(dashboard_path(Some(Role::Student)), "/student");
        assert_eq!(dashboard_path(None), "/signin");
    }

    #[test]
    fn every_landing_page_is_visitable_by_its_role() {
        for role in Role::ALL {
            assert!(can_visit(Some(role), dashboard_path(Some(role))));
            for link in nav_links(role) {
                assert!(can_visit(Some(role), link.href), "{role} {}", link.href);
            }
        }
    }

    #[test]
    fn public_pages_need_no_role() {
        for path in ["/", "/about", "/contact", "/signin", "/signup", "/nowhere"] {
            assert_eq!(required_role(path), None, "{path}");
            assert!(can_visit(None, path));
        }
    }

    #[test]
    fn dashboards_are_role_gated() {
        assert_eq!(required_role("/admin/signup"), Some(Role::Admin));
        assert_eq!(required_role("/faculty/leave-requests"), Some(Role::Faculty));
        assert_eq!(required_role("/student?tab=2"), Some(Role::Student));
        assert_eq!(required_role("/students"), None);

        assert!(!can_visit(None, "/student/courses"));
        assert!(!can_visit(Some(Role::Student), "/faculty/classes"));
        assert!(!can_visit(Some(Role::Admin), "/student"));
    }

    #[test]
    fn nav_links_start_at_dashboard_root() {
        for role in Role::ALL {
            let links = nav_links(role);
            assert_eq!(links[0].label, "Dashboard");
            assert_eq!(links[0].href, dashboard_root(role));
        }
        assert_eq!(nav_links(Role::Student).len(), 6);
    }
}
