// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Full sync of every zone's records from the panel.

use crate::errors::Result;
use crate::panel::PanelClient;
use crate::zone::Zone;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Fetch the zone list and every zone's name-server and DNSSEC records.
///
/// Zones are visited in sorted name order. The first failing fetch aborts the
/// whole sync and its error is returned; nothing partial is handed back.
///
/// # Errors
///
/// Returns the first `MissingSession`, `TransportFailure`, `EmptyResponse`
/// or `MalformedResponse` encountered.
pub async fn sync_all(panel: &PanelClient) -> Result<BTreeMap<String, Zone>> {
    let names: Vec<String> = panel.fetch_zone_list().await?.into_keys().collect();
    let total = names.len();
    info!(zones = total, "Syncing zones from panel");

    let mut zones = BTreeMap::new();
    for (index, name) in names.into_iter().enumerate() {
        let zone = Zone {
            name_servers: panel.fetch_name_servers(&name).await?,
            dnssec_records: panel.fetch_dnssec(&name).await?,
        };

        info!(
            zone = %name,
            progress = %format!("{}/{}", index + 1, total),
            name_servers = zone.name_servers.len(),
            dnssec_records = zone.dnssec_records.len(),
            "Received zone records"
        );
        zones.insert(name, zone);
    }

    debug!(zones = zones.len(), "Sync complete");
    Ok(zones)
}
