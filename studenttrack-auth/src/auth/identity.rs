//! User Identity Lookup
//!
//! Maps an email address to a known user record. Passwords are not verified.

use std::collections::HashMap;
use studenttrack_core::{Role, User};

/// Source of known identities, the seam where a real account backend plugs in
pub trait CredentialDirectory: Send + Sync {
    /// Look up a user by exact email address
    fn lookup(&self, email: &str) -> Option<User>;
}

/// In-memory directory, pre-populated with the demo accounts
pub struct SeedDirectory {
    users: HashMap<String, User>,
}

impl SeedDirectory {
    /// Directory containing the student, faculty and admin demo accounts
    pub fn new() -> Self {
        let mut directory = Self::empty();
        directory.add_user(User::new(
            "1",
            "student@example.com",
            "John",
            "Doe",
            Role::Student,
        ));
        directory.add_user(User::new(
            "2",
            "faculty@example.com",
            "Jane",
            "Smith",
            Role::Faculty,
        ));
        directory.add_user(User::new(
            "3",
            "admin@example.com",
            "Admin",
            "User",
            Role::Admin,
        ));
        directory
    }

    pub fn empty() -> Self {
        Self {
            users: HashMap::new(),
        }
    }

    /// Register a user; replaces any existing entry with the same email
    pub fn add_user(&mut self, user: User) {
        self.users.insert(user.email.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl Default for SeedDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialDirectory for SeedDirectory {
    fn lookup(&self, email: &str) -> Option<User> {
        self.users.get(email).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_accounts_resolve_to_their_roles() {
        let directory = SeedDirectory::new();
        assert_eq!(directory.len(), 3);

        let student = directory.lookup("student@example.com").unwrap();
        assert_eq!(student.id, "1");
        assert_eq!(student.role, Role::Student);
        assert_eq!(student.display_name(), "John Doe");

        let faculty = directory.lookup("faculty@example.com").unwrap();
        assert_eq!(faculty.role, Role::Faculty);
        assert_eq!(faculty.last_name, "Smith");

        let admin = directory.lookup("admin@example.com").unwrap();
        assert_eq!(admin.id, "3");
        assert_eq!(admin.role, Role::Admin);
    }

    #[test]
    fn lookup_is_exact() {
        let directory = SeedDirectory::new();
        assert!(directory.lookup("nobody@example.com").is_none());
        assert!(directory.lookup("Student@Example.com").is_none());
        assert!(directory.lookup("").is_none());
    }

    #[test]
    fn custom_users_can_be_added() {
        let mut directory = SeedDirectory::empty();
        assert!(directory.is_empty());

        directory.add_user(User::new("9", "dean@example.com", "Ada", "Dean", Role::Faculty));
        assert_eq!(
            directory.lookup("dean@example.com").map(|u| u.role),
            Some(Role::Faculty)
        );
    }
}
