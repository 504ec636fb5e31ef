//! Core data type definitions

use serde::{Deserialize, Serialize};

/// Role of a user; decides which dashboards, features and actions are visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    /// All roles in declaration order
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Faculty => "faculty",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "faculty" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// User record, persisted as a single JSON object under the session key.
///
/// `role` is fixed when the record is created; [`ProfileUpdate`] cannot touch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl User {
    /// Create a user with no optional profile fields set
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role,
            profile_picture: None,
            github_url: None,
            linkedin_url: None,
            phone_number: None,
            address: None,
            bio: None,
            department: None,
            position: None,
            website: None,
        }
    }

    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Merge a partial update into this record. Only `Some` fields are written.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            first_name,
            last_name,
            email,
            profile_picture,
            github_url,
            linkedin_url,
            phone_number,
            address,
            bio,
            department,
            position,
            website,
        } = update;

        if let Some(v) = first_name {
            self.first_name = v;
        }
        if let Some(v) = last_name {
            self.last_name = v;
        }
        if let Some(v) = email {
            self.email = v;
        }
        merge(&mut self.profile_picture, profile_picture);
        merge(&mut self.github_url, github_url);
        merge(&mut self.linkedin_url, linkedin_url);
        merge(&mut self.phone_number, phone_number);
        merge(&mut self.address, address);
        merge(&mut self.bio, bio);
        merge(&mut self.department, department);
        merge(&mut self.position, position);
        merge(&mut self.website, website);
    }
}

fn merge(slot: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *slot = value;
    }
}

/// Partial user record used by profile updates
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub profile_picture: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub bio: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub website: Option<String>,
}

impl ProfileUpdate {
    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn bio(value: impl Into<String>) -> Self {
        Self {
            bio: Some(value.into()),
            ..Self::default()
        }
    }
}

/// Data needed to synthesize a new account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student() -> User {
        User::new("1", "student@example.com", "John", "Doe", Role::Student)
    }

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Faculty".parse::<Role>().unwrap(), Role::Faculty);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("janitor".parse::<Role>().is_err());
        assert_eq!(Role::Student.to_string(), "student");
    }

    #[test]
    fn user_json_uses_camel_case_and_omits_missing_fields() {
        let json = serde_json::to_value(student()).unwrap();

        assert_eq!(json["firstName"], "John");
        assert_eq!(json["lastName"], "Doe");
        assert_eq!(json["role"], "student");
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn user_parses_persisted_layout() {
        let raw = r#"{"id":"2","email":"faculty@example.com","firstName":"Jane",
            "lastName":"Smith","role":"faculty","department":"Physics"}"#;
        let user: User = serde_json::from_str(raw).unwrap();

        assert_eq!(user.role, Role::Faculty);
        assert_eq!(user.department.as_deref(), Some("Physics"));
        assert_eq!(user.display_name(), "Jane Smith");
    }

    #[test]
    fn apply_only_touches_set_fields() {
        let mut user = student();
        user.department = Some("Maths".to_string());

        user.apply(ProfileUpdate::bio("x"));

        assert_eq!(user.bio.as_deref(), Some("x"));
        assert_eq!(user.department.as_deref(), Some("Maths"));
        assert_eq!(user.first_name, "John");
        assert_eq!(user.role, Role::Student);
    }

    #[test]
    fn empty_update_is_detected() {
        assert!(ProfileUpdate::default().is_empty());
        assert!(!ProfileUpdate::bio("hello").is_empty());
    }
}
