// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Record extraction from the panel's server-rendered HTML.
//!
//! The panel has no API, so records are pulled out of its edit forms with
//! fixed patterns anchored on the form field names:
//!
//! - zone list: `?dn=<zone>">進入` anchors on the index page
//! - name servers: `host_dn<N>" value="<host>"` and `host_ip<N>" value="<ipv4>"`
//! - DNSSEC: `KeyTag<N>" value="<n>`, `alg<N>" value="<n>` and `DS<N>" value="<hex>`
//!
//! Blank slots render as `value=""` and are skipped by every pattern. The
//! parallel streams of one form are zipped by position, so their lengths must
//! agree; a mismatch means the markup changed and is reported as
//! `MalformedResponse` rather than guessed around.

use crate::errors::{PanelError, Result};
use crate::zone::{DnssecRecord, NameServers, Zone};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Page label used in errors for the zone list
pub const PAGE_ZONE_LIST: &str = "zone list";

/// Page label used in errors for the name-server form
pub const PAGE_NAME_SERVERS: &str = "name-server form";

/// Page label used in errors for the DNSSEC form
pub const PAGE_DNSSEC: &str = "DNSSEC form";

static ZONE_ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\?dn=([^"]+)">進入"#).expect("valid zone anchor pattern"));

static NS_HOST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"host_dn\d" value="((?:[\w-]+\.)+[\w-]+)""#).expect("valid hostname pattern")
});

static NS_IPV4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"host_ip\d" value="((?:\d{1,3}\.){3}\d{1,3})""#).expect("valid ipv4 pattern")
});

static DNSSEC_KEY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"KeyTag\d" value="(\d{1,6})"#).expect("valid key tag pattern"));

static DNSSEC_ALGORITHM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"alg\d" value="(\d{1,3})"#).expect("valid algorithm pattern"));

static DNSSEC_DIGEST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"DS\d" value="(\w+)"#).expect("valid digest pattern"));

/// Extract zone names from the account index page.
///
/// A page without any zone anchor yields an empty map.
///
/// # Errors
///
/// Returns `EmptyResponse` if the body is empty.
pub fn scrape_zone_list(raw: &str) -> Result<BTreeMap<String, Zone>> {
    if raw.is_empty() {
        return Err(PanelError::EmptyResponse {
            page: PAGE_ZONE_LIST,
        });
    }

    let zones: BTreeMap<String, Zone> = captures(&ZONE_ANCHOR, raw)
        .into_iter()
        .map(|name| (name.to_string(), Zone::default()))
        .collect();

    debug!(zones = zones.len(), "Scraped zone list");
    Ok(zones)
}

/// Extract hostname/IPv4 pairs from the name-server form.
///
/// # Errors
///
/// Returns `EmptyResponse` for an empty body and `MalformedResponse` when
/// the hostname and address counts differ.
pub fn scrape_name_servers(raw: &str) -> Result<NameServers> {
    if raw.is_empty() {
        return Err(PanelError::EmptyResponse {
            page: PAGE_NAME_SERVERS,
        });
    }

    let hosts = captures(&NS_HOST, raw);
    let ips = captures(&NS_IPV4, raw);
    if hosts.len() != ips.len() {
        return Err(PanelError::MalformedResponse {
            page: PAGE_NAME_SERVERS,
            reason: format!("found {} hostnames but {} addresses", hosts.len(), ips.len()),
        });
    }

    let records: NameServers = hosts
        .into_iter()
        .zip(ips)
        .map(|(host, ip)| (host.to_string(), ip.to_string()))
        .collect();

    debug!(records = records.len(), "Scraped name servers");
    Ok(records)
}

/// Extract key-tag/algorithm/digest triples from the DNSSEC form.
///
/// # Errors
///
/// Returns `EmptyResponse` for an empty body and `MalformedResponse` when
/// the three field counts differ or a number does not fit its width.
pub fn scrape_dnssec(raw: &str) -> Result<Vec<DnssecRecord>> {
    if raw.is_empty() {
        return Err(PanelError::EmptyResponse { page: PAGE_DNSSEC });
    }

    let key_tags = captures(&DNSSEC_KEY_TAG, raw);
    let algorithms = captures(&DNSSEC_ALGORITHM, raw);
    let digests = captures(&DNSSEC_DIGEST, raw);
    if key_tags.len() != algorithms.len() || algorithms.len() != digests.len() {
        return Err(PanelError::MalformedResponse {
            page: PAGE_DNSSEC,
            reason: format!(
                "found {} key tags, {} algorithms and {} digests",
                key_tags.len(),
                algorithms.len(),
                digests.len()
            ),
        });
    }

    let mut records = Vec::with_capacity(key_tags.len());
    for ((key_tag, algorithm), digest) in key_tags.into_iter().zip(algorithms).zip(digests) {
        records.push(DnssecRecord {
            key_tag: parse_number(key_tag, "key tag")?,
            algorithm: parse_number(algorithm, "algorithm")?,
            digest: digest.to_string(),
        });
    }

    debug!(records = records.len(), "Scraped DNSSEC records");
    Ok(records)
}

/// First capture group of every match, in document order.
fn captures<'a>(pattern: &Regex, raw: &'a str) -> Vec<&'a str> {
    pattern
        .captures_iter(raw)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn parse_number<T>(value: &str, field: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| PanelError::MalformedResponse {
        page: PAGE_DNSSEC,
        reason: format!("{field} '{value}' is out of range: {e}"),
    })
}

#[cfg(test)]
#[path = "scrape_tests.rs"]
mod scrape_tests;
