// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Form payloads for the panel's record edit pages.
//!
//! Both edit forms replace the whole record set of a zone. They have a fixed
//! number of indexed slots; a record fills one slot and unused slots are
//! submitted blank. The name-server form also carries ten forwarding slots we
//! never use, which must still be present with their default values or the
//! panel rejects the submission.
//!
//! Slots are filled in the record set's iteration order. Name servers iterate
//! sorted by hostname, DNSSEC records in stored order, so the same set always
//! produces the same payload.

use crate::constants::{
    DNS_MODE_VALUE, FIELD_DNSSEC_ALGORITHM, FIELD_DNSSEC_DIGEST, FIELD_DNSSEC_KEY_TAG,
    FIELD_DNS_MODE, FIELD_FWD_CONTENT, FIELD_FWD_DESCRIPTION_TAG, FIELD_FWD_META_TAG,
    FIELD_FWD_SUBHOST, FIELD_FWD_TITLE, FIELD_FWD_TYPE, FIELD_NS_HOST, FIELD_NS_IPV4,
    FIELD_NS_IPV6, FIELD_ZONE, FORWARDING_SLOTS, FWD_TYPE_DEFAULT, MAX_DNSSEC_RECORDS,
    MAX_NAME_SERVERS,
};
use crate::errors::{PanelError, Result};
use crate::zone::{DnssecRecord, NameServers, RecordKind, RecordSet};

/// Ordered `application/x-www-form-urlencoded` fields.
pub type FormFields = Vec<(String, String)>;

/// Encode a record set into the form for its kind.
///
/// # Errors
///
/// Returns `RecordLimitExceeded` if the set has more records than the form has slots.
pub fn encode(zone: &str, records: &RecordSet) -> Result<FormFields> {
    match records {
        RecordSet::NameServers(name_servers) => encode_name_servers(zone, name_servers),
        RecordSet::Dnssec(dnssec) => encode_dnssec(zone, dnssec),
    }
}

/// Encode the name-server form.
///
/// # Errors
///
/// Returns `RecordLimitExceeded` for more than five name servers.
pub fn encode_name_servers(zone: &str, records: &NameServers) -> Result<FormFields> {
    check_slots(zone, RecordKind::NameServer, records.len())?;

    let mut fields = FormFields::with_capacity(3 * MAX_NAME_SERVERS + 6 * FORWARDING_SLOTS + 2);

    let mut filled = records.iter();
    for slot in 0..MAX_NAME_SERVERS {
        let (host, ip) = filled
            .next()
            .map_or(("", ""), |(host, ip)| (host.as_str(), ip.as_str()));
        fields.push(slot_field(FIELD_NS_HOST, slot, host));
        fields.push(slot_field(FIELD_NS_IPV4, slot, ip));
        fields.push(slot_field(FIELD_NS_IPV6, slot, ""));
    }

    for slot in 0..FORWARDING_SLOTS {
        fields.push(slot_field(FIELD_FWD_SUBHOST, slot, ""));
        fields.push(slot_field(FIELD_FWD_CONTENT, slot, ""));
        fields.push(slot_field(FIELD_FWD_TYPE, slot, FWD_TYPE_DEFAULT));
        fields.push(slot_field(FIELD_FWD_TITLE, slot, ""));
        fields.push(slot_field(FIELD_FWD_META_TAG, slot, ""));
        fields.push(slot_field(FIELD_FWD_DESCRIPTION_TAG, slot, ""));
    }

    fields.push((FIELD_ZONE.to_string(), zone.to_string()));
    fields.push((FIELD_DNS_MODE.to_string(), DNS_MODE_VALUE.to_string()));
    Ok(fields)
}

/// Encode the DNSSEC form.
///
/// # Errors
///
/// Returns `RecordLimitExceeded` for more than five records.
pub fn encode_dnssec(zone: &str, records: &[DnssecRecord]) -> Result<FormFields> {
    check_slots(zone, RecordKind::Dnssec, records.len())?;

    let mut fields = FormFields::with_capacity(3 * MAX_DNSSEC_RECORDS + 1);
    for slot in 0..MAX_DNSSEC_RECORDS {
        match records.get(slot) {
            Some(record) => {
                fields.push(slot_field(FIELD_DNSSEC_KEY_TAG, slot, &record.key_tag.to_string()));
                fields.push(slot_field(FIELD_DNSSEC_ALGORITHM, slot, &record.algorithm.to_string()));
                fields.push(slot_field(FIELD_DNSSEC_DIGEST, slot, &record.digest));
            }
            None => {
                fields.push(slot_field(FIELD_DNSSEC_KEY_TAG, slot, ""));
                fields.push(slot_field(FIELD_DNSSEC_ALGORITHM, slot, ""));
                fields.push(slot_field(FIELD_DNSSEC_DIGEST, slot, ""));
            }
        }
    }

    fields.push((FIELD_ZONE.to_string(), zone.to_string()));
    Ok(fields)
}

fn slot_field(prefix: &str, slot: usize, value: &str) -> (String, String) {
    (format!("{prefix}{slot}"), value.to_string())
}

fn check_slots(zone: &str, kind: RecordKind, count: usize) -> Result<()> {
    if count > kind.limit() {
        return Err(PanelError::RecordLimitExceeded {
            zone: zone.to_string(),
            kind,
            limit: kind.limit(),
        });
    }
    Ok(())
}

#[cfg(test)]
#[path = "form_tests.rs"]
mod form_tests;
