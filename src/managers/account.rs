// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Account-level operations: first-run setup, refresh, login from stored
//! credentials, logout and mirror removal.

use super::sync::sync_all;
use crate::errors::Result;
use crate::mirror::{Config, MirrorStore};
use crate::panel::PanelClient;
use tracing::{info, warn};

/// Ties the stored credentials in the mirror to a panel session.
#[derive(Debug, Clone, Copy)]
pub struct AccountService<'a> {
    store: &'a MirrorStore,
}

impl<'a> AccountService<'a> {
    #[must_use]
    pub fn new(store: &'a MirrorStore) -> Self {
        Self { store }
    }

    /// First-run setup.
    ///
    /// Logs in with the given credentials, syncs every zone and writes a new
    /// mirror. Nothing is written unless every step succeeds.
    ///
    /// # Errors
    ///
    /// Returns `EmptyCredential`, `AuthenticationRejected`, any sync error,
    /// or `MirrorWriteFailure`.
    pub async fn init(&self, panel: &mut PanelClient, email: &str, password: &str) -> Result<Config> {
        if self.store.exists() {
            warn!(
                path = %self.store.path().display(),
                "Mirror already exists and will be replaced"
            );
        }

        panel.login(email, password).await?;
        let zones = sync_all(panel).await?;

        let config = Config::new(email, password, zones);
        self.store.save(&config)?;

        info!(zones = config.zones.len(), "Initialised mirror");
        Ok(config)
    }

    /// Log in with the credentials stored in the mirror.
    ///
    /// Every command that talks to the panel starts here, so each invocation
    /// works with a freshly issued session.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `EmptyCredential`, `TransportFailure` or
    /// `AuthenticationRejected`.
    pub async fn login(&self, panel: &mut PanelClient) -> Result<Config> {
        let config = self.store.load()?;
        panel.login(&config.email, &config.password).await?;
        Ok(config)
    }

    /// Re-sync every zone into the mirror.
    ///
    /// Reuses the panel's session if it has one, otherwise logs in from the
    /// stored credentials. Replaces the whole zone set and bumps `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, any login or sync error, or
    /// `MirrorWriteFailure`.
    pub async fn refresh(&self, panel: &mut PanelClient) -> Result<Config> {
        let mut config = if panel.is_authenticated() {
            self.store.load()?
        } else {
            self.login(panel).await?
        };
        let zones = sync_all(panel).await?;

        config.replace_zones(zones);
        self.store.save(&config)?;

        info!(zones = config.zones.len(), "Refreshed mirror");
        Ok(config)
    }

    /// End the panel session.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession` if not logged in, or `TransportFailure`.
    pub async fn logout(&self, panel: &mut PanelClient) -> Result<()> {
        panel.logout().await
    }

    /// Delete the mirror file.
    ///
    /// # Errors
    ///
    /// Returns `MirrorWriteFailure` if there is no mirror or it cannot be removed.
    pub fn remove(&self) -> Result<()> {
        self.store.remove()
    }
}

#[cfg(test)]
#[path = "account_tests.rs"]
mod account_tests;
