// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone listing.

use crate::errors::Result;
use crate::panel::PanelClient;

/// Lists the zones on the account.
#[derive(Debug, Clone, Copy)]
pub struct ZoneManager<'a> {
    panel: &'a PanelClient,
}

impl<'a> ZoneManager<'a> {
    #[must_use]
    pub fn new(panel: &'a PanelClient) -> Self {
        Self { panel }
    }

    /// Zone names on the account, sorted, fetched fresh from the panel.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure` or `EmptyResponse`.
    pub async fn list(&self) -> Result<Vec<String>> {
        let zones = self.panel.fetch_zone_list().await?;
        Ok(zones.into_keys().collect())
    }
}
