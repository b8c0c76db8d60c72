// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNSSEC delegation signer record management.

use super::apply_zone_change;
use crate::errors::Result;
use crate::mirror::MirrorStore;
use crate::panel::PanelClient;
use crate::zone::{DnssecRecord, RecordKind};
use tracing::info;

/// Lists and edits the DNSSEC records of a zone.
#[derive(Debug, Clone, Copy)]
pub struct DnssecManager<'a> {
    panel: &'a PanelClient,
    store: &'a MirrorStore,
}

impl<'a> DnssecManager<'a> {
    #[must_use]
    pub fn new(panel: &'a PanelClient, store: &'a MirrorStore) -> Self {
        Self { panel, store }
    }

    /// Fetch the zone's DNSSEC records fresh from the panel.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure`, `EmptyResponse` or
    /// `MalformedResponse`.
    pub async fn list(&self, zone: &str) -> Result<Vec<DnssecRecord>> {
        self.panel.fetch_dnssec(zone).await
    }

    /// Append a DNSSEC record to a zone.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone`, `InvalidRecord`,
    /// `RecordLimitExceeded` or `DuplicateRecord` before anything is sent,
    /// then any submission or save error.
    pub async fn add(&self, zone: &str, record: DnssecRecord) -> Result<Vec<DnssecRecord>> {
        let description = record.to_string();
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::Dnssec, |z| {
            z.add_dnssec(zone, record)
        })
        .await?;

        info!(zone = %zone, record = %description, "Added DNSSEC record");
        Ok(updated.dnssec_records)
    }

    /// Replace one DNSSEC record with another.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone`, `InvalidRecord`,
    /// `RecordNotFound` or `DuplicateRecord` before anything is sent, then any
    /// submission or save error.
    pub async fn update(
        &self,
        zone: &str,
        old: &DnssecRecord,
        new: DnssecRecord,
    ) -> Result<Vec<DnssecRecord>> {
        let description = new.to_string();
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::Dnssec, |z| {
            z.update_dnssec(zone, old, new)
        })
        .await?;

        info!(zone = %zone, old = %old, new = %description, "Updated DNSSEC record");
        Ok(updated.dnssec_records)
    }

    /// Remove a DNSSEC record matching the full triple.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable`, `UnknownZone` or `RecordNotFound` before
    /// anything is sent, then any submission or save error.
    pub async fn delete(&self, zone: &str, record: &DnssecRecord) -> Result<Vec<DnssecRecord>> {
        let updated = apply_zone_change(self.panel, self.store, zone, RecordKind::Dnssec, |z| {
            z.delete_dnssec(zone, record)
        })
        .await?;

        info!(zone = %zone, record = %record, "Deleted DNSSEC record");
        Ok(updated.dnssec_records)
    }
}

#[cfg(test)]
#[path = "dnssec_tests.rs"]
mod dnssec_tests;
