//! Sign-up form validation
//!
//! Checks raw form input before it reaches [`crate::SessionStore::sign_up`],
//! which itself accepts whatever it is given.

use crate::{AuthError, AuthResult};
use regex::Regex;
use std::sync::OnceLock;
use studenttrack_core::SignUpRequest;

const MIN_NAME_LEN: usize = 2;
const MIN_PASSWORD_LEN: usize = 8;

/// Raw administrator registration form
#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub first_name: String,
    pub last_name: String,
    pub institution: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// Validate the form, returning the first failing field
    pub fn validate(&self) -> AuthResult<SignUpRequest> {
        require_len("firstName", &self.first_name, MIN_NAME_LEN, "First name")?;
        require_len("lastName", &self.last_name, MIN_NAME_LEN, "Last name")?;
        require_len(
            "institution",
            &self.institution,
            MIN_NAME_LEN,
            "Institution name",
        )?;

        if !email_pattern().is_match(self.email.trim()) {
            return Err(AuthError::validation("email", "Invalid email address"));
        }

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }

        if self.password != self.confirm_password {
            return Err(AuthError::validation(
                "confirmPassword",
                "Passwords do not match",
            ));
        }

        Ok(SignUpRequest {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        })
    }
}

fn require_len(field: &str, value: &str, min: usize, label: &str) -> AuthResult<()> {
    if value.trim().chars().count() < min {
        return Err(AuthError::validation(
            field,
            format!("{} must be at least {} characters", label, min),
        ));
    }
    Ok(())
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> SignUpForm {
        SignUpForm {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            institution: "Navy College".to_string(),
            email: "grace@example.com".to_string(),
            password: "correct-horse".to_string(),
            confirm_password: "correct-horse".to_string(),
        }
    }

    fn failing_field(form: &SignUpForm) -> String {
        match form.validate() {
            Err(AuthError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn valid_form_produces_request() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.email, "grace@example.com");
        assert_eq!(request.first_name, "Grace");
        assert_eq!(request.last_name, "Hopper");
    }

    #[test]
    fn short_names_are_rejected() {
        let mut form = valid_form();
        form.first_name = "G".to_string();
        assert_eq!(failing_field(&form), "firstName");

        let mut form = valid_form();
        form.last_name = " ".to_string();
        assert_eq!(failing_field(&form), "lastName");

        let mut form = valid_form();
        form.institution = "X".to_string();
        assert_eq!(failing_field(&form), "institution");
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["", "grace", "grace@", "grace@example", "a b@example.com"] {
            let mut form = valid_form();
            form.email = email.to_string();
            assert_eq!(failing_field(&form), "email", "{email:?}");
        }
    }

    #[test]
    fn password_rules() {
        let mut form = valid_form();
        form.password = "short".to_string();
        form.confirm_password = "short".to_string();
        assert_eq!(failing_field(&form), "password");

        let mut form = valid_form();
        form.confirm_password = "different-one".to_string();
        assert_eq!(failing_field(&form), "confirmPassword");
    }
}
