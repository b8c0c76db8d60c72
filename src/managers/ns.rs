// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Name-server record management.

use super::apply_zone_change;
use crate::errors::Result;
use crate::mirror::MirrorStore;
use crate::panel::PanelClient;
use crate::zone::{NameServers, RecordKind};
use tracing::info;

/// Lists and edits the name-server records of a zone.
#[derive(Debug, Clone, Copy)]
pub struct NameServerManager<'a> {
    panel: &'a PanelClient,
    store: &'a MirrorStore,
}

impl<'a> NameServerManager<'a> {
    #[must_use]
    pub fn new(panel: &'a PanelClient, store: &'a MirrorStore) -> Self {
        Self { panel, store }
    }

    /// Fetch the zone's name servers fresh from the panel.
    ///
    /// The mirror is neither read nor written.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure`, `EmptyResponse` or
    /// `MalformedResponse`.
    pub async fn list(&self, zone: &str) -> Result<NameServers> {
        self.panel.fetch_name_servers(zone).await
    }

    /// Add a name server to a zone.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone`, `InvalidRecord`,
    /// `RecordLimitExceeded` or `DuplicateRecord` before anything is sent,
    /// then any submission or save error.
    pub async fn add(&self, zone: &str, host: &str, ip: &str) -> Result<NameServers> {
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::NameServer, |z| {
            z.add_name_server(zone, host, ip)
        })
        .await?;

        info!(zone = %zone, host = %host, ip = %ip, "Added name server");
        Ok(updated.name_servers)
    }

    /// Point an existing name server at a new address.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone`, `InvalidRecord` or
    /// `RecordNotFound` before anything is sent, then any submission or save error.
    pub async fn update(&self, zone: &str, host: &str, ip: &str) -> Result<NameServers> {
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::NameServer, |z| {
            z.update_name_server(zone, host, ip)
        })
        .await?;

        info!(zone = %zone, host = %host, ip = %ip, "Updated name server");
        Ok(updated.name_servers)
    }

    /// Remove a name server. The hostname must currently map to `ip`.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone` or `RecordNotFound` before
    /// anything is sent, then any submission or save error.
    pub async fn delete(&self, zone: &str, host: &str, ip: &str) -> Result<NameServers> {
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::NameServer, |z| {
            z.delete_name_server(zone, host, ip)
        })
        .await?;

        info!(zone = %zone, host = %host, ip = %ip, "Deleted name server");
        Ok(updated.name_servers)
    }
}

#[cfg(test)]
#[path = "ns_tests.rs"]
mod ns_tests;
