//! Auth service: session lifecycle
//!
//! Wraps the auth API and the persisted session records. Every state change
//! goes through the store as an auth action.

use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::api::AuthApi;
use crate::store::{AsyncResult, AuthAction, Store};
use crate::types::{Credentials, UserProfile};
use crate::{Result, Storage};

/// Auth service
///
/// Cheap to clone; clones share the store and storage.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    store: Store,
    storage: Storage,
}

impl AuthService {
    pub fn new(api: Arc<dyn AuthApi>, store: Store, storage: Storage) -> Self {
        Self { api, store, storage }
    }

    /// Log in with credentials
    ///
    /// On success the token and profile are persisted before the session is
    /// marked authenticated. On failure the session is cleared and the
    /// user-facing message is stored in `auth.error`.
    ///
    /// # Errors
    ///
    /// Returns the classified `ApiError` when the auth service rejects the
    /// credentials or cannot be reached.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserProfile> {
        self.store.dispatch(AuthAction::Login(AsyncResult::Pending));
        tracing::debug!("Logging in as {}", credentials.username);

        match self.api.login_user(credentials).await {
            Ok(user) => {
                self.storage.save_token(&user.token).await;
                self.storage.save_user(&user).await;
                self.store.dispatch(AuthAction::Login(AsyncResult::Success(user.clone())));
                tracing::info!("Logged in as {}", user.username);
                Ok(user)
            }
            Err(e) => {
                tracing::warn!("Login failed for {}: {}", credentials.username, e);
                let failed = AsyncResult::Failure(e.message().to_string());
                self.store.dispatch(AuthAction::Login(failed));
                Err(e.into())
            }
        }
    }

    /// End the session
    ///
    /// State is cleared immediately. Removal of the stored token runs in the
    /// background; the returned handle may be awaited or dropped. Outside a
    /// Tokio runtime no removal is scheduled and `None` is returned.
    pub fn logout(&self) -> Option<JoinHandle<()>> {
        self.store.dispatch(AuthAction::Logout);

        let handle = Handle::try_current().ok()?;
        let storage = self.storage.clone();
        Some(handle.spawn(async move {
            storage.remove_token().await;
        }))
    }

    /// Mark the session authenticated without asking the server
    pub fn restore_session(&self, token: impl Into<String>, user: UserProfile) {
        self.store.dispatch(AuthAction::RestoreSession {
            token: token.into(),
            user,
        });
    }

    pub fn clear_error(&self) {
        self.store.dispatch(AuthAction::ClearError);
    }

    /// Restore a persisted session, if both token and profile are stored
    ///
    /// Returns whether a session was restored.
    pub async fn restore_saved_session(&self) -> bool {
        let token = self.storage.get_token().await;
        let user = self.storage.get_user().await;

        match (token, user) {
            (Some(token), Some(user)) => {
                tracing::debug!("Restoring session for {}", user.username);
                self.restore_session(token, user);
                true
            }
            _ => false,
        }
    }

    /// Wipe every stored record, then log out
    pub async fn sign_out(&self) {
        self.storage.clear_all().await;
        if let Some(handle) = self.logout() {
            let _ = handle.await;
        }
        tracing::info!("Signed out");
    }
}
