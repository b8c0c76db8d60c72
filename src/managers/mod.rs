// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record managers: list, add, update and delete per record type.
//!
//! Every mutating operation follows the same sequence:
//!
//! 1. Load the mirror (`MirrorUnreadable` if missing or corrupt)
//! 2. Find the zone (`UnknownZone`)
//! 3. Check the operation's precondition and mutate the zone in memory
//!    (`RecordLimitExceeded`, `DuplicateRecord`, `RecordNotFound`, `InvalidRecord`)
//! 4. Submit the zone's whole record set of that type in one form POST
//! 5. Write the mirror back
//!
//! Nothing is sent and nothing is written when a step up to 3 fails.
//!
//! # Partial failures
//!
//! Step 5 runs even when step 4 failed at the transport level, and there is
//! no rollback in either direction. After a failed submission the mirror
//! holds the intended state while the panel may still hold the old one;
//! after a failed save the panel holds the new state while the mirror is
//! stale. A `refresh` reconciles both cases.
//!
//! Listing operations always read fresh from the panel and never touch the
//! mirror.

pub mod account;
pub mod dnssec;
pub mod ns;
pub mod sync;
pub mod zone;

pub use account::AccountService;
pub use dnssec::DnssecManager;
pub use ns::NameServerManager;
pub use sync::sync_all;
pub use zone::ZoneManager;

use crate::errors::{PanelError, Result};
use crate::mirror::MirrorStore;
use crate::panel::PanelClient;
use crate::zone::{RecordKind, Zone};
use tracing::{debug, error, warn};

/// Run the load → validate → mutate → submit → save sequence for one zone.
///
/// `mutate` performs the precondition check and the in-memory change. On
/// success the updated zone is returned.
async fn apply_zone_change<F>(
    panel: &PanelClient,
    store: &MirrorStore,
    zone_name: &str,
    kind: RecordKind,
    mutate: F,
) -> Result<Zone>
where
    F: FnOnce(&mut Zone) -> Result<()>,
{
    let mut config = store.load()?;
    let zone = config.zone_mut(zone_name)?;
    mutate(zone)?;

    if !panel.is_authenticated() {
        return Err(PanelError::MissingSession {
            operation: "record update",
        });
    }

    let records = zone.records(kind);
    let updated = zone.clone();
    debug!(
        zone = %zone_name,
        kind = %kind,
        records = records.len(),
        "Mutated zone in memory, submitting"
    );

    let submitted = panel.submit_records(zone_name, &records).await;
    if let Err(e) = &submitted {
        if e.is_validation() {
            return Err(e.clone());
        }
    }

    let saved = store.save(&config);
    match (submitted, saved) {
        (Ok(()), Ok(())) => Ok(updated),
        (Err(submit_err), Ok(())) => {
            warn!(
                zone = %zone_name,
                kind = %kind,
                error = %submit_err,
                "Submission failed; mirror was saved with the intended records"
            );
            Err(submit_err)
        }
        (Ok(()), Err(save_err)) => {
            error!(
                zone = %zone_name,
                kind = %kind,
                error = %save_err,
                "Panel was updated but the mirror could not be saved"
            );
            Err(save_err)
        }
        (Err(submit_err), Err(save_err)) => {
            error!(
                zone = %zone_name,
                kind = %kind,
                error = %save_err,
                "Mirror could not be saved after a failed submission"
            );
            Err(submit_err)
        }
    }
}
