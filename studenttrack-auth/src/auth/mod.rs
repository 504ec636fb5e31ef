//! Authentication and Authorization Module
//!
//! - Identity: email lookup against a credential directory
//! - Permissions: static per-role feature and action tables
//! - Context: the derived session snapshot handed to callers

pub mod context;
pub mod identity;
pub mod permissions;

pub use context::Session;
pub use identity::{CredentialDirectory, SeedDirectory};
pub use permissions::{
    can_configure_system, can_manage_users, can_perform_action, can_view_reports, entities_for,
    features_for, has_feature_access, Action, Entity, Feature,
};
