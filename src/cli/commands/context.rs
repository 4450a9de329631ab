//! Shared wiring for command handlers

use std::sync::Arc;

use anyhow::Context;

use crate::clients::BackendClient;
use crate::config::Config;
use crate::session::{Session, SessionStore};

pub struct CommandContext {
    config: Config,
    store: SessionStore,
}

impl CommandContext {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let store = SessionStore::new(config.session_path());
        Self { config, store }
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Client without credentials, used only for login.
    pub fn anonymous_client(&self) -> anyhow::Result<BackendClient> {
        BackendClient::new(&self.config.backend).context("Failed to build backend client")
    }

    pub fn session(&self) -> anyhow::Result<Session> {
        self.store
            .current()
            .context("Login required (asetrack login <username>)")
    }

    pub fn client(&self) -> anyhow::Result<Arc<BackendClient>> {
        let session = self.session()?;
        Ok(Arc::new(self.anonymous_client()?.with_session(session)))
    }

    /// Like [`Self::client`], but refuses before any request unless the
    /// session belongs to an admin.
    pub fn admin_client(&self) -> anyhow::Result<Arc<BackendClient>> {
        let session = self.session()?;
        session.require_admin()?;
        Ok(Arc::new(self.anonymous_client()?.with_session(session)))
    }
}
