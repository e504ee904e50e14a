//! The session store

use crate::{
    Result, SessionConfig,
    state::{AuthOutcome, SessionState},
};
use chrono::Utc;
use dexter_core::domain::User;
use dexter_storage::LocalStore;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

/// Default storage key for the persisted user record
pub const SESSION_KEY: &str = "dexterUser";

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const LOGIN_FAILED_MESSAGE: &str = "An error occurred during login";

/// Owns the signed-in user and keeps it in step with local storage.
///
/// Readers take snapshots through [`state`](Self::state) or follow changes
/// through [`subscribe`](Self::subscribe). Mutations are serialized so that
/// storage and the published state never disagree about the latest write.
pub struct SessionStore {
    storage: Arc<dyn LocalStore>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    mutation: Mutex<()>,
}

impl SessionStore {
    /// Store in the `Unknown` state; call [`restore`](Self::restore) next
    pub fn new(storage: Arc<dyn LocalStore>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::Unknown);
        Self {
            storage,
            config,
            state,
            mutation: Mutex::new(()),
        }
    }

    /// Construct and restore in one step
    pub async fn open(storage: Arc<dyn LocalStore>, config: SessionConfig) -> Self {
        let store = Self::new(storage, config);
        store.restore().await;
        store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Load the persisted record. Never fails: anything unreadable leaves the
    /// store `Anonymous`, and an unparseable record is removed.
    pub async fn restore(&self) {
        let _guard = self.mutation.lock().await;
        let key = self.config.storage_key.as_str();

        let next = match self.storage.get(key).await {
            Ok(None) => SessionState::Anonymous,
            Ok(Some(raw)) => match parse_record(&raw) {
                Ok(user) => {
                    debug!(user_id = %user.id, "Restored session");
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    warn!(key, error = %e, "Discarding corrupted session record");
                    if let Err(e) = self.storage.remove(key).await {
                        warn!(key, error = %e, "Failed to remove corrupted session record");
                    }
                    SessionState::Anonymous
                }
            },
            Err(e) => {
                warn!(key, backend = self.storage.name(), error = %e, "Failed to read session");
                SessionState::Anonymous
            }
        };

        self.state.send_replace(next);
    }

    /// Sign in with any non-empty credentials.
    ///
    /// The record is persisted before it is published; if persisting fails
    /// the state is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        if email.is_empty() || password.is_empty() {
            return AuthOutcome::failed(INVALID_CREDENTIALS_MESSAGE);
        }

        let _guard = self.mutation.lock().await;
        let user = self.config.profile.user(email, Utc::now());

        if let Err(e) = self.persist(&user).await {
            warn!(error = %e, "Failed to persist session");
            return AuthOutcome::failed(LOGIN_FAILED_MESSAGE);
        }

        info!(user_id = %user.id, email = %user.email, "User logged in");
        self.state.send_replace(SessionState::Authenticated(user));
        AuthOutcome::ok()
    }

    /// Forget the user. Always ends `Anonymous`, even if storage fails.
    pub async fn logout(&self) {
        let _guard = self.mutation.lock().await;

        if let Err(e) = self.storage.remove(&self.config.storage_key).await {
            warn!(error = %e, "Failed to remove session record");
        }

        let previous = self.state.send_replace(SessionState::Anonymous);
        if let SessionState::Authenticated(user) = previous {
            info!(user_id = %user.id, "User logged out");
        }
    }

    /// Re-read the persisted record. Only a valid record changes the state.
    pub async fn refresh_user(&self) {
        let _guard = self.mutation.lock().await;
        let key = self.config.storage_key.as_str();

        match self.storage.get(key).await {
            Ok(Some(raw)) => match parse_record(&raw) {
                Ok(user) => {
                    debug!(user_id = %user.id, "Refreshed session");
                    self.state.send_replace(SessionState::Authenticated(user));
                }
                Err(e) => warn!(key, error = %e, "Ignoring corrupted session record"),
            },
            Ok(None) => debug!(key, "No session record to refresh from"),
            Err(e) => warn!(key, error = %e, "Failed to read session"),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Receiver that observes every published state
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Shut the store down; subscribers see the channel close
    pub fn close(self) {
        debug!("Session store closed");
    }

    async fn persist(&self, user: &User) -> Result<()> {
        let raw = serde_json::to_string(user)?;
        self.storage.set(&self.config.storage_key, raw).await?;
        Ok(())
    }
}

fn parse_record(raw: &str) -> Result<User> {
    Ok(serde_json::from_str(raw)?)
}
