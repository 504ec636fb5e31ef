//! Session Store - the signed-in user and its persistence
//!
//! The store is constructed explicitly and passed to whoever needs it. Every
//! mutation writes storage first and swaps the in-memory user second, so a
//! failed write leaves the previous session intact.

use super::storage::SessionStorage;
use crate::auth::{CredentialDirectory, Session};
use crate::{AuthError, AuthResult};
use std::sync::Arc;
use studenttrack_core::{
    log_operation_error, log_operation_start, log_operation_success, AuthConfig, ProfileUpdate,
    Role, SignUpRequest, StorageConfig, TrackError, User,
};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Session store settings
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Storage key holding the serialized user
    pub storage_key: String,
    /// Role given to accounts created by [`SessionStore::sign_up`]
    pub signup_role: Role,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: "user".to_string(),
            signup_role: Role::Admin,
        }
    }
}

impl SessionConfig {
    pub fn from_config(storage: &StorageConfig, auth: &AuthConfig) -> Self {
        Self {
            storage_key: storage.session_key.clone(),
            signup_role: auth.signup_role,
        }
    }
}

/// Holds the current user and keeps it in sync with [`SessionStorage`]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    directory: Arc<dyn CredentialDirectory>,
    config: SessionConfig,
    current: RwLock<Option<User>>,
}

impl SessionStore {
    /// Open the store, restoring any persisted user.
    ///
    /// A missing, unreadable or unparsable entry yields an anonymous session.
    pub fn open(
        storage: Arc<dyn SessionStorage>,
        directory: Arc<dyn CredentialDirectory>,
        config: SessionConfig,
    ) -> Self {
        let current = restore(storage.as_ref(), &config.storage_key);

        match &current {
            Some(user) => info!(user_id = %user.id, role = %user.role, "Restored session"),
            None => debug!("No persisted session, starting anonymous"),
        }

        Self {
            storage,
            directory,
            config,
            current: RwLock::new(current),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Sign in with an email and password.
    ///
    /// The password only has to be non-empty; the email must be known to the directory.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        log_operation_start!("login", email = %email);

        if email.is_empty() {
            return Err(AuthError::missing_input("email"));
        }
        if password.is_empty() {
            return Err(AuthError::missing_input("password"));
        }

        let Some(user) = self.directory.lookup(email) else {
            warn!(email = %email, "Login rejected: unknown email");
            return Err(AuthError::InvalidCredentials);
        };

        self.replace(user.clone()).await?;

        log_operation_success!("login", user_id = %user.id, role = %user.role);
        Ok(user)
    }

    /// Clear the session. Always succeeds; storage failures are logged.
    pub async fn logout(&self) {
        if let Err(e) = self.storage.remove(&self.config.storage_key) {
            e.log();
        }

        let previous = self.current.write().await.take();
        match previous {
            Some(user) => info!(user_id = %user.id, "Signed out"),
            None => debug!("Logout without an active session"),
        }
    }

    /// Create an account and sign into it.
    ///
    /// No uniqueness check is made; the directory is not updated.
    pub async fn sign_up(&self, request: SignUpRequest) -> AuthResult<User> {
        log_operation_start!("sign_up", email = %request.email);

        let user = User::new(
            uuid::Uuid::new_v4().to_string(),
            request.email,
            request.first_name,
            request.last_name,
            self.config.signup_role,
        );

        self.replace(user.clone()).await?;

        log_operation_success!("sign_up", user_id = %user.id, role = %user.role);
        Ok(user)
    }

    /// Merge `update` into the signed-in user and persist the result
    pub async fn update_profile(&self, update: ProfileUpdate) -> AuthResult<User> {
        let mut current = self.current.write().await;

        let Some(existing) = current.as_ref() else {
            return Err(AuthError::NotAuthenticated);
        };

        let mut updated = existing.clone();
        updated.apply(update);

        if let Err(e) = self.persist(&updated) {
            log_operation_error!("update_profile", e, user_id = %updated.id);
            return Err(e);
        }

        *current = Some(updated.clone());

        info!(user_id = %updated.id, "Profile updated");
        Ok(updated)
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn role(&self) -> Option<Role> {
        self.current.read().await.as_ref().map(|u| u.role)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Snapshot of the current session
    pub async fn session(&self) -> Session {
        Session::from(self.current_user().await)
    }

    async fn replace(&self, user: User) -> AuthResult<()> {
        let mut current = self.current.write().await;
        self.persist(&user)?;
        *current = Some(user);
        Ok(())
    }

    fn persist(&self, user: &User) -> AuthResult<()> {
        let json = serde_json::to_string(user).map_err(TrackError::from)?;
        self.storage.set(&self.config.storage_key, &json)?;
        debug!(key = %self.config.storage_key, user_id = %user.id, "Persisted session user");
        Ok(())
    }
}

fn restore(storage: &dyn SessionStorage, key: &str) -> Option<User> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            e.log();
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(key = %key, "Discarding unparsable persisted session");
            TrackError::from(e).log();
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SeedDirectory;
    use crate::session::MemoryStorage;

    fn store_with(storage: Arc<MemoryStorage>) -> SessionStore {
        SessionStore::open(
            storage,
            Arc::new(SeedDirectory::new()),
            SessionConfig::default(),
        )
    }

    #[tokio::test]
    async fn login_persists_full_user() {
        let storage = Arc::new(MemoryStorage::new());
        let store = store_with(storage.clone());

        let user = store.login("admin@example.com", "pw").await.unwrap();

        let raw = storage.get("user").unwrap().unwrap();
        let persisted: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, user);
        assert_eq!(store.role().await, Some(Role::Admin));
    }

    #[tokio::test]
    async fn custom_storage_key_is_used() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::open(
            storage.clone(),
            Arc::new(SeedDirectory::new()),
            SessionConfig {
                storage_key: "current".to_string(),
                signup_role: Role::Student,
            },
        );

        let user = store
            .sign_up(SignUpRequest {
                email: "new@example.com".to_string(),
                first_name: "New".to_string(),
                last_name: "Person".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.role, Role::Student);
        assert!(storage.get("current").unwrap().is_some());
        assert!(storage.get("user").unwrap().is_none());
    }

    #[test]
    fn session_config_follows_track_config() {
        let storage = StorageConfig {
            data_dir: "/tmp/x".to_string(),
            session_key: "me".to_string(),
        };
        let auth = AuthConfig {
            signup_role: Role::Faculty,
        };

        let config = SessionConfig::from_config(&storage, &auth);
        assert_eq!(config.storage_key, "me");
        assert_eq!(config.signup_role, Role::Faculty);
    }
}
