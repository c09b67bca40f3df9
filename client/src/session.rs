//! Persistence of the currently logged-in user.
//!
//! Stores trust whatever was last written: there is no expiry and no
//! integrity check.

use std::path::PathBuf;

use parking_lot::Mutex;

use crate::{Error, User};

pub trait SessionStore {
    /// Persists `user` as the current user, replacing any previous one.
    fn set_user(&self, user: &User) -> Result<(), Error>;

    /// The current user, or `None` if nobody is logged in.
    fn get_user(&self) -> Option<User>;

    fn remove_user(&self) -> Result<(), Error>;

    fn is_logged_in(&self) -> bool {
        self.get_user().is_some()
    }
}

/// Keeps the current user as a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn set_user(&self, user: &User) -> Result<(), Error> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(Error::Session)?;
        }

        let bytes = serde_json::to_vec(user).map_err(|err| Error::Session(err.into()))?;
        std::fs::write(&self.path, bytes).map_err(Error::Session)
    }

    /// Unreadable or undecodable files read as logged out.
    fn get_user(&self) -> Option<User> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), "discarding corrupted session: {err}");
                None
            }
        }
    }

    fn remove_user(&self) -> Result<(), Error> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Session(err)),
        }
    }
}

/// Keeps the current user in memory only.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<User>>,
}

impl SessionStore for MemorySessionStore {
    fn set_user(&self, user: &User) -> Result<(), Error> {
        *self.user.lock() = Some(user.clone());
        Ok(())
    }

    fn get_user(&self) -> Option<User> {
        self.user.lock().clone()
    }

    fn remove_user(&self) -> Result<(), Error> {
        self.user.lock().take();
        Ok(())
    }
}
