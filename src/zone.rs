// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Zone data model and in-memory record mutations.
//!
//! A [`Zone`] holds the two record sets the panel lets us edit: name-server
//! host mappings and DNSSEC delegation signer entries. All mutations go
//! through methods on `Zone` that enforce the panel's limits (five records of
//! each type, unique keys) before touching the set, so a rejected mutation
//! leaves the zone exactly as it was.
//!
//! Name servers are kept in a [`BTreeMap`] keyed by hostname. Iteration is
//! therefore sorted, which makes form slot assignment deterministic.

use crate::constants::{MAX_DNSSEC_RECORDS, MAX_NAME_SERVERS};
use crate::errors::{PanelError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::net::Ipv4Addr;

/// Name-server records of a zone: hostname to IPv4 address.
pub type NameServers = BTreeMap<String, String>;

/// The two record types managed on the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Name-server host mapping
    NameServer,
    /// DNSSEC delegation signer entry
    Dnssec,
}

impl RecordKind {
    /// Per-zone record cap for this type.
    #[must_use]
    pub const fn limit(self) -> usize {
        match self {
            Self::NameServer => MAX_NAME_SERVERS,
            Self::Dnssec => MAX_DNSSEC_RECORDS,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameServer => f.write_str("NS"),
            Self::Dnssec => f.write_str("DNSSEC"),
        }
    }
}

/// A DNSSEC delegation signer entry.
///
/// Two records are the same record only if all three fields match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnssecRecord {
    /// Key tag of the DNSKEY the digest refers to
    pub key_tag: u16,
    /// DNSSEC algorithm number
    pub algorithm: u8,
    /// Hex digest of the DNSKEY
    pub digest: String,
}

impl DnssecRecord {
    #[must_use]
    pub fn new(key_tag: u16, algorithm: u8, digest: impl Into<String>) -> Self {
        Self {
            key_tag,
            algorithm,
            digest: digest.into(),
        }
    }
}

impl fmt::Display for DnssecRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key_tag, self.algorithm, self.digest)
    }
}

/// A scraped or encodable record set of either type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSet {
    NameServers(NameServers),
    Dnssec(Vec<DnssecRecord>),
}

impl RecordSet {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::NameServers(_) => RecordKind::NameServer,
            Self::Dnssec(_) => RecordKind::Dnssec,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::NameServers(records) => records.len(),
            Self::Dnssec(records) => records.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// DNS configuration of a single zone as held in the mirror.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Name-server records, sorted by hostname
    #[serde(rename = "NS", default, deserialize_with = "null_as_default")]
    pub name_servers: NameServers,
    /// DNSSEC records in panel order
    #[serde(rename = "DNSSEC", default, deserialize_with = "null_as_default")]
    pub dnssec_records: Vec<DnssecRecord>,
}

/// Mirrors written before a zone was scraped carry `null` record sets.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Zone {
    /// Snapshot of one record set, ready to encode.
    #[must_use]
    pub fn records(&self, kind: RecordKind) -> RecordSet {
        match kind {
            RecordKind::NameServer => RecordSet::NameServers(self.name_servers.clone()),
            RecordKind::Dnssec => RecordSet::Dnssec(self.dnssec_records.clone()),
        }
    }

    /// Add a name server.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` for a malformed hostname or a non-IPv4 address,
    /// `RecordLimitExceeded` when the zone already has five name servers and
    /// `DuplicateRecord` when the hostname is already present.
    pub fn add_name_server(&mut self, zone: &str, host: &str, ip: &str) -> Result<()> {
        validate_name_server(zone, host, ip)?;

        if self.name_servers.len() >= MAX_NAME_SERVERS {
            return Err(PanelError::RecordLimitExceeded {
                zone: zone.to_string(),
                kind: RecordKind::NameServer,
                limit: MAX_NAME_SERVERS,
            });
        }
        if self.name_servers.contains_key(host) {
            return Err(PanelError::DuplicateRecord {
                zone: zone.to_string(),
                kind: RecordKind::NameServer,
                record: host.to_string(),
            });
        }

        self.name_servers.insert(host.to_string(), ip.to_string());
        Ok(())
    }

    /// Point an existing name server at a new address.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` for a non-IPv4 address and `RecordNotFound`
    /// when the hostname is not present.
    pub fn update_name_server(&mut self, zone: &str, host: &str, ip: &str) -> Result<()> {
        validate_name_server(zone, host, ip)?;

        match self.name_servers.get_mut(host) {
            Some(current) => {
                *current = ip.to_string();
                Ok(())
            }
            None => Err(PanelError::RecordNotFound {
                zone: zone.to_string(),
                kind: RecordKind::NameServer,
                record: host.to_string(),
            }),
        }
    }

    /// Remove a name server. Both the hostname and its address must match.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if the hostname is absent or maps to a
    /// different address.
    pub fn delete_name_server(&mut self, zone: &str, host: &str, ip: &str) -> Result<()> {
        if self.name_servers.get(host).map(String::as_str) != Some(ip) {
            return Err(PanelError::RecordNotFound {
                zone: zone.to_string(),
                kind: RecordKind::NameServer,
                record: format!("{host} -> {ip}"),
            });
        }

        self.name_servers.remove(host);
        Ok(())
    }

    /// Append a DNSSEC record.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` for an empty or non-alphanumeric digest, `RecordLimitExceeded`
    /// when the zone already has five records and `DuplicateRecord` when an
    /// identical triple exists.
    pub fn add_dnssec(&mut self, zone: &str, record: DnssecRecord) -> Result<()> {
        validate_dnssec(zone, &record)?;

        if self.dnssec_records.len() >= MAX_DNSSEC_RECORDS {
            return Err(PanelError::RecordLimitExceeded {
                zone: zone.to_string(),
                kind: RecordKind::Dnssec,
                limit: MAX_DNSSEC_RECORDS,
            });
        }
        if self.dnssec_records.contains(&record) {
            return Err(PanelError::DuplicateRecord {
                zone: zone.to_string(),
                kind: RecordKind::Dnssec,
                record: record.to_string(),
            });
        }

        self.dnssec_records.push(record);
        Ok(())
    }

    /// Replace one DNSSEC record with another, keeping its position.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if `old` is absent and `DuplicateRecord` if
    /// `new` already exists elsewhere in the zone.
    pub fn update_dnssec(
        &mut self,
        zone: &str,
        old: &DnssecRecord,
        new: DnssecRecord,
    ) -> Result<()> {
        validate_dnssec(zone, &new)?;

        let index = self.dnssec_position(zone, old)?;
        if self
            .dnssec_records
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && *existing == new)
        {
            return Err(PanelError::DuplicateRecord {
                zone: zone.to_string(),
                kind: RecordKind::Dnssec,
                record: new.to_string(),
            });
        }

        self.dnssec_records[index] = new;
        Ok(())
    }

    /// Remove a DNSSEC record.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record matches the full triple.
    pub fn delete_dnssec(&mut self, zone: &str, record: &DnssecRecord) -> Result<()> {
        let index = self.dnssec_position(zone, record)?;
        self.dnssec_records.remove(index);
        Ok(())
    }

    fn dnssec_position(&self, zone: &str, record: &DnssecRecord) -> Result<usize> {
        self.dnssec_records
            .iter()
            .position(|existing| existing == record)
            .ok_or_else(|| PanelError::RecordNotFound {
                zone: zone.to_string(),
                kind: RecordKind::Dnssec,
                record: record.to_string(),
            })
    }
}

fn validate_name_server(zone: &str, host: &str, ip: &str) -> Result<()> {
    if host.is_empty() {
        return Err(PanelError::InvalidRecord {
            zone: zone.to_string(),
            kind: RecordKind::NameServer,
            reason: "hostname is empty".to_string(),
        });
    }
    // The panel only renders dotted hostnames built from word characters and hyphens
    let well_formed = host.contains('.')
        && host
            .split('.')
            .all(|label| !label.is_empty() && label.chars().all(is_host_char));
    if !well_formed {
        return Err(PanelError::InvalidRecord {
            zone: zone.to_string(),
            kind: RecordKind::NameServer,
            reason: format!("'{host}' is not a dotted hostname"),
        });
    }
    if ip.parse::<Ipv4Addr>().is_err() {
        return Err(PanelError::InvalidRecord {
            zone: zone.to_string(),
            kind: RecordKind::NameServer,
            reason: format!("'{ip}' is not an IPv4 address"),
        });
    }
    Ok(())
}

fn validate_dnssec(zone: &str, record: &DnssecRecord) -> Result<()> {
    if record.digest.is_empty() {
        return Err(PanelError::InvalidRecord {
            zone: zone.to_string(),
            kind: RecordKind::Dnssec,
            reason: "digest is empty".to_string(),
        });
    }
    if !record.digest.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(PanelError::InvalidRecord {
            zone: zone.to_string(),
            kind: RecordKind::Dnssec,
            reason: format!("digest '{}' must be alphanumeric", record.digest),
        });
    }
    Ok(())
}

fn is_host_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod zone_tests;
