//! Logged-in session.
//!
//! The session is an explicit value handed to the API client; the only code
//! that reads or writes the stored copy is [`SessionStore`].

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{RecordId, Role};
use crate::models::User;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Role '{0}' is not allowed; logged out")]
    InvalidRole(String),

    #[error("This action requires the {required} role")]
    Forbidden { required: Role },

    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape: `{ id, username, role, token?, beban? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub id: Option<RecordId>,

    pub username: String,

    pub role: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beban: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Option<RecordId>,
    pub username: String,
    pub role: Role,
    pub token: Option<String>,
    pub beban: Vec<String>,
}

impl Session {
    /// Builds a session from a login response.
    pub fn from_user(user: User) -> Result<Self, SessionError> {
        let role = user
            .role
            .parse()
            .map_err(|_| SessionError::InvalidRole(user.role.clone()))?;

        Ok(Self {
            id: user.id,
            username: user.username,
            role,
            token: user.token,
            beban: user.beban,
        })
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), SessionError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(SessionError::Forbidden {
                required: Role::Admin,
            })
        }
    }

    /// Headers the backend expects on every authenticated request.
    #[must_use]
    pub fn auth_headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::with_capacity(4);
        if let Some(token) = &self.token {
            headers.push(("authorization", format!("Bearer {token}")));
        }
        headers.push(("x-role", self.role.to_string()));
        headers.push(("x-username", self.username.clone()));
        headers.push(("x-beban", self.beban.join(",")));
        headers
    }
}

impl TryFrom<StoredSession> for Session {
    type Error = SessionError;

    fn try_from(stored: StoredSession) -> Result<Self, Self::Error> {
        let role = stored
            .role
            .parse()
            .map_err(|_| SessionError::InvalidRole(stored.role.clone()))?;

        Ok(Self {
            id: stored.id,
            username: stored.username,
            role,
            token: stored.token,
            beban: stored.beban,
        })
    }
}

impl From<&Session> for StoredSession {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id.clone(),
            username: session.username.clone(),
            role: session.role.to_string(),
            token: session.token.clone(),
            beban: session.beban.clone(),
        }
    }
}

/// File-backed session storage.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the stored session.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotLoggedIn`] when nothing is stored. A stored role
    /// other than `admin`/`user` clears the store and returns
    /// [`SessionError::InvalidRole`].
    pub fn current(&self) -> Result<Session, SessionError> {
        let stored = self.load_raw()?.ok_or(SessionError::NotLoggedIn)?;

        match Session::try_from(stored) {
            Ok(session) => Ok(session),
            Err(e @ SessionError::InvalidRole(_)) => {
                warn!(path = %self.path.display(), error = %e, "Forcing logout");
                self.clear()?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    pub fn load_raw(&self) -> Result<Option<StoredSession>, SessionError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&StoredSession::from(session))?;
        std::fs::write(&self.path, content)?;
        restrict_permissions(&self.path)?;

        info!(username = %session.username, role = %session.role, "Session saved");
        Ok(())
    }

    /// Removes the stored session. Returns whether anything was removed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
