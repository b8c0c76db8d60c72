// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Local mirror of the account and its zones.
//!
//! The mirror is a single pretty-printed JSON file holding the stored
//! credentials and the last-known record sets of every zone. It is the only
//! state carried between invocations: every mutating operation reads it,
//! changes it and writes it back whole.
//!
//! # Concurrency
//!
//! The file is read and rewritten without locking. Two invocations running
//! at once race, and the last writer wins.

use crate::errors::{PanelError, Result};
use crate::zone::Zone;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Contents of the mirror file.
///
/// Keys are PascalCase so mirrors written by earlier tooling load unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    /// Account email used to log in
    pub email: String,
    /// Account password, stored in plain text
    pub password: String,
    /// Zones on the account, sorted by name
    #[serde(default)]
    pub zones: BTreeMap<String, Zone>,
    /// Unix timestamp (seconds) of the last full refresh
    #[serde(default)]
    pub updated_at: i64,
}

impl Config {
    /// Build a fresh config stamped with the current time.
    #[must_use]
    pub fn new(email: &str, password: &str, zones: BTreeMap<String, Zone>) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            zones,
            updated_at: Utc::now().timestamp(),
        }
    }

    /// Look up a zone for reading.
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if the mirror has no such zone.
    pub fn zone(&self, name: &str) -> Result<&Zone> {
        self.zones.get(name).ok_or_else(|| PanelError::UnknownZone {
            zone: name.to_string(),
        })
    }

    /// Look up a zone for in-place mutation.
    ///
    /// # Errors
    ///
    /// Returns `UnknownZone` if the mirror has no such zone.
    pub fn zone_mut(&mut self, name: &str) -> Result<&mut Zone> {
        self.zones.get_mut(name).ok_or_else(|| PanelError::UnknownZone {
            zone: name.to_string(),
        })
    }

    /// Replace the zone set wholesale and bump `updated_at`.
    pub fn replace_zones(&mut self, zones: BTreeMap<String, Zone>) {
        self.zones = zones;
        self.updated_at = Utc::now().timestamp();
    }
}

/// Reads and writes the mirror file at a fixed path.
#[derive(Debug, Clone)]
pub struct MirrorStore {
    path: PathBuf,
}

impl MirrorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the mirror.
    ///
    /// # Errors
    ///
    /// Returns `MirrorUnreadable` if the file is missing or is not a valid mirror.
    pub fn load(&self) -> Result<Config> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.unreadable(e))?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| self.unreadable(e))?;

        debug!(
            path = %self.path.display(),
            zones = config.zones.len(),
            "Loaded mirror"
        );
        Ok(config)
    }

    /// Write the whole mirror, replacing any previous contents.
    ///
    /// # Errors
    ///
    /// Returns `MirrorWriteFailure` if serialization or the write fails.
    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config).map_err(|e| self.write_failure(e))?;
        fs::write(&self.path, json).map_err(|e| self.write_failure(e))?;

        info!(
            path = %self.path.display(),
            zones = config.zones.len(),
            "Wrote mirror"
        );
        Ok(())
    }

    /// Delete the mirror file.
    ///
    /// # Errors
    ///
    /// Returns `MirrorWriteFailure` if the file does not exist or cannot be removed.
    pub fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                self.write_failure("no mirror file to remove")
            } else {
                self.write_failure(e)
            }
        })?;

        info!(path = %self.path.display(), "Removed mirror");
        Ok(())
    }

    fn unreadable(&self, reason: impl ToString) -> PanelError {
        PanelError::MirrorUnreadable {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    fn write_failure(&self, reason: impl ToString) -> PanelError {
        PanelError::MirrorWriteFailure {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "mirror_tests.rs"]
mod mirror_tests;
