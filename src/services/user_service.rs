//! Login and user administration.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::clients::BackendError;
use crate::models::{NewUser, User};
use crate::services::backend::UserApi;
use crate::session::{Session, SessionError};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl UserError {
    fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

pub struct UserService<B> {
    backend: Arc<B>,
}

impl<B: UserApi> UserService<B> {
    #[must_use]
    pub const fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    /// Authenticates and builds a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidRole`] (wrapped) when the backend hands
    /// back a role this client does not know.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, UserError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(UserError::validation("Username and password are required"));
        }

        let user = self.backend.login(username, password).await?;
        let session = Session::from_user(user)?;
        info!(username = %session.username, role = %session.role, "Logged in");
        Ok(session)
    }

    pub async fn list(&self) -> Result<Vec<User>, UserError> {
        Ok(self.backend.list_users().await?)
    }

    pub async fn create(&self, user: &NewUser) -> Result<(), UserError> {
        validate_username(&user.username)?;
        validate_password(&user.password)?;
        if user.nama.trim().is_empty() {
            return Err(UserError::validation("Name cannot be empty"));
        }

        let user = NewUser {
            beban: clean_beban(&user.beban),
            ..user.clone()
        };
        self.backend.create_user(&user).await?;
        info!(username = %user.username, role = %user.role, "User created");
        Ok(())
    }

    /// Replaces the cost centers a user may submit against.
    pub async fn set_beban(&self, username: &str, beban: &[String]) -> Result<Vec<String>, UserError> {
        validate_username(username)?;
        let beban = clean_beban(beban);
        self.backend.set_user_beban(username, &beban).await?;
        Ok(beban)
    }

    pub async fn reset_password(&self, username: &str, password: &str) -> Result<(), UserError> {
        validate_username(username)?;
        validate_password(password)?;
        self.backend.reset_user_password(username, password).await?;
        info!(username, "Password reset");
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), UserError> {
    if username.trim().is_empty() {
        return Err(UserError::validation("Username cannot be empty"));
    }
    if username.chars().any(char::is_whitespace) {
        return Err(UserError::validation("Username cannot contain whitespace"));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserError::validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

/// Trims entries, drops blanks and duplicates, keeps first-seen order.
fn clean_beban(beban: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(beban.len());
    for code in beban.iter().map(|b| b.trim()).filter(|b| !b.is_empty()) {
        if !cleaned.iter().any(|c| c == code) {
            cleaned.push(code.to_string());
        }
    }
    cleaned
}
