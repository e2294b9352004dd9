use crate::Result;
use crate::navigation::{Navigator, Route};
use crate::storage::{CredentialStore, TOKEN_KEY, USER_ID_KEY, USER_INFO_KEY, USER_PHONE_KEY};
use notekit_types::UserProfile;
use std::sync::Arc;
use std::time::Duration;

/// Explicit session context handed to everything that needs credentials or
/// the sign-in redirect.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl Session {
    pub fn new(store: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self { store, navigator }
    }

    /// Stored session token; an empty value counts as absent.
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    pub fn user_id(&self) -> Option<String> {
        self.store.get(USER_ID_KEY).filter(|id| !id.is_empty())
    }

    /// Cached profile of the signed-in user, if one was stored and parses.
    pub fn user(&self) -> Option<UserProfile> {
        let raw = self.store.get(USER_INFO_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "ignoring unreadable cached user info");
                None
            }
        }
    }

    pub fn store_user(&self, user: &UserProfile) -> Result<()> {
        self.store
            .set(USER_INFO_KEY, &serde_json::to_string(user)?)?;
        if !user.id.is_empty() {
            self.store.set(USER_ID_KEY, user.id.as_str())?;
        }
        if !user.phone.is_empty() {
            self.store.set(USER_PHONE_KEY, &user.phone)?;
        }
        Ok(())
    }

    pub fn sign_in(&self, token: &str, user: Option<&UserProfile>) -> Result<()> {
        if let Some(user) = user {
            self.store_user(user)?;
        }
        self.store.set(TOKEN_KEY, token)
    }

    /// Drop every cached credential, as after the server rejected the token.
    pub fn clear(&self) -> Result<()> {
        for key in [TOKEN_KEY, USER_INFO_KEY, USER_ID_KEY, USER_PHONE_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// User-initiated sign-out. The phone number is kept for the next login.
    pub fn sign_out(&self) -> Result<()> {
        for key in [USER_INFO_KEY, TOKEN_KEY, USER_ID_KEY] {
            self.store.remove(key)?;
        }
        Ok(())
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    pub fn navigator(&self) -> &Arc<dyn Navigator> {
        &self.navigator
    }

    pub fn go_to(&self, route: Route) {
        self.navigator.go_to(route);
    }

    /// Navigate to the sign-in screen after `delay`, unless it is already
    /// showing. Without a tokio runtime the redirect happens immediately.
    pub fn redirect_to_sign_in(&self, delay: Duration) {
        if self.navigator.current() == Some(Route::SignIn) {
            return;
        }

        let navigator = self.navigator.clone();
        match tokio::runtime::Handle::try_current() {
            Ok(handle) if !delay.is_zero() => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    navigator.go_to(Route::SignIn);
                });
            }
            _ => navigator.go_to(Route::SignIn),
        }
    }
}
