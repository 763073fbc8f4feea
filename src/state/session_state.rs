//! SessionState - Signed-in User
//!
//! The credential lives here and is handed to every API client explicitly;
//! nothing reads it from ambient storage after startup.

use tracing::{info, warn};

use crate::api::{ApiClient, AuthContext, SessionStore};
use crate::domain::User;

/// Authentication state of the running app
pub struct SessionState {
    /// Client without credentials, used for login
    anonymous: ApiClient,
    /// Client carrying the bearer token once signed in
    client: Option<ApiClient>,
    user: Option<User>,
    store: Option<SessionStore>,
}

impl SessionState {
    /// Start from the persisted session, if `store` holds one
    pub fn restore(anonymous: ApiClient, store: Option<SessionStore>) -> Self {
        let auth = store.as_ref().and_then(|s| match s.load() {
            Ok(auth) => auth,
            Err(e) => {
                warn!(error = %e, "Saved session unreadable");
                None
            }
        });
        let client = auth.map(|auth| {
            info!("Restored saved session");
            anonymous.with_auth(auth)
        });
        Self {
            anonymous,
            client,
            user: None,
            store,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    pub fn anonymous(&self) -> &ApiClient {
        &self.anonymous
    }

    /// Authenticated client; `None` before login
    pub fn client(&self) -> Option<&ApiClient> {
        self.client.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Adopt a fresh credential and persist it
    pub fn sign_in(&mut self, auth: AuthContext) {
        if let Some(store) = &self.store
            && let Err(e) = store.save(&auth)
        {
            warn!(error = %e, "Failed to persist session");
        }
        self.client = Some(self.anonymous.with_auth(auth));
        self.user = None;
        info!("Signed in");
    }

    /// Drop the credential and the persisted copy
    pub fn sign_out(&mut self) {
        if let Some(store) = &self.store
            && let Err(e) = store.clear()
        {
            warn!(error = %e, "Failed to clear saved session");
        }
        self.client = None;
        self.user = None;
        info!("Signed out");
    }
}
