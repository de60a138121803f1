//! The client-side record of who is logged in.
//!
//! A [`Session`] is opened once from a [`SessionStorage`] and handed to the
//! views. Authentication is simulated: login matches an email against the
//! [`UserDirectory`] and never checks the password.

mod storage;
mod users;

pub use storage::*;
pub use users::*;

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::{Role, User};
use crate::store::Latency;

const LOGIN_DELAY: Duration = Duration::from_millis(1000);
const GOOGLE_LOGIN_DELAY: Duration = Duration::from_millis(1500);

pub struct Session {
    storage: Arc<dyn SessionStorage>,
    directory: UserDirectory,
    current: RwLock<Option<User>>,
    latency: Latency,
}

impl Session {
    /// Open a session over `storage` with the demo accounts, restoring a
    /// previously persisted user if there is one.
    pub fn open(storage: Arc<dyn SessionStorage>, latency: Latency) -> Self {
        Self::with_directory(storage, UserDirectory::seeded(), latency)
    }

    pub fn with_directory(
        storage: Arc<dyn SessionStorage>,
        directory: UserDirectory,
        latency: Latency,
    ) -> Self {
        let current = restore(storage.as_ref());
        Self {
            storage,
            directory,
            current: RwLock::new(current),
            latency,
        }
    }

    /// Log in by email. The password is accepted as-is.
    pub async fn login(&self, email: &str, _password: &str) -> Result<User> {
        self.latency.wait(LOGIN_DELAY).await;

        let Some(user) = self.directory.find_by_email(email).cloned() else {
            tracing::warn!(email, "Login rejected");
            return Err(Error::InvalidCredentials);
        };

        self.establish(user)
    }

    /// Simulated Google sign-in. Always succeeds with a new student account.
    pub async fn login_with_google(&self) -> Result<User> {
        self.latency.wait(GOOGLE_LOGIN_DELAY).await;
        self.establish(google_user())
    }

    pub fn logout(&self) -> Result<()> {
        *self.current.write().expect("session lock poisoned") = None;
        self.storage.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn current_user(&self) -> Option<User> {
        self.current.read().expect("session lock poisoned").clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().expect("session lock poisoned").is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.current
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .is_some_and(|u| u.role == role)
    }

    pub fn directory(&self) -> &UserDirectory {
        &self.directory
    }

    fn establish(&self, user: User) -> Result<User> {
        let json = serde_json::to_string(&user)?;
        self.storage.save(&json)?;
        *self.current.write().expect("session lock poisoned") = Some(user.clone());

        tracing::info!(user_id = %user.id, role = user.role.as_str(), "Logged in");
        Ok(user)
    }
}

/// Read the persisted user. Anything unreadable counts as logged out.
fn restore(storage: &dyn SessionStorage) -> Option<User> {
    let raw = match storage.load() {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!("Could not read persisted session: {}", e);
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("Ignoring corrupt persisted session: {}", e);
            None
        }
    }
}
