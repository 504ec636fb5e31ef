//! StudentTrack Auth - Sessions and role-based permissions
//!
//! This crate holds the behavior behind the student, faculty and admin dashboards:
//!
//! - A session store that signs users in and out and persists the current user
//! - A credential directory that resolves email addresses to user records
//! - Static permission tables answering feature and action/entity checks
//! - Role-to-route mapping, sign-up form validation and toast notices
//!
//! ## Architecture
//!
//! - **Core types** (studenttrack-core): `User`, `Role`, errors, config, logging
//! - **Auth** (this crate): session and permission behavior
//! - **Presentation** (studenttrack-cli): user interface

pub mod auth;
pub mod forms;
pub mod notify;
pub mod routing;
pub mod session;

pub use auth::{
    can_perform_action, has_feature_access, Action, CredentialDirectory, Entity, Feature,
    SeedDirectory, Session,
};
pub use forms::SignUpForm;
pub use notify::{MemoryNotifier, Notice, NoticeLevel, Notifier, TracingNotifier};
pub use routing::{can_visit, dashboard_path, nav_links, NavLink};
pub use session::{FileStorage, MemoryStorage, SessionConfig, SessionStorage, SessionStore};

/// Auth-level error type
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Please provide both email and password (missing {field})")]
    MissingInput { field: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User is not authenticated")]
    NotAuthenticated,

    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Core error: {0}")]
    Core(#[from] studenttrack_core::TrackError),
}

pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Create a missing input error
    pub fn missing_input<S: Into<String>>(field: S) -> Self {
        Self::MissingInput {
            field: field.into(),
        }
    }

    /// Create a validation error
    pub fn validation<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Errors caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Self::Core(_))
    }

    /// Destructive toast describing this error
    pub fn notice(&self) -> Notice {
        match self {
            Self::MissingInput { .. } | Self::InvalidCredentials => {
                Notice::error("Sign in failed", self.to_string())
            }
            Self::NotAuthenticated => Notice::error("Update failed", self.to_string()),
            Self::Validation { message, .. } => Notice::error("Registration failed", message),
            Self::Core(_) => Notice::error("Something went wrong", self.to_string()),
        }
    }
}
