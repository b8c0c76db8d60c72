// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared fixtures for unit tests: panel page rendering and a mock panel.

use crate::form::{self, FormFields};
use crate::mirror::{Config, MirrorStore};
use crate::panel::{PanelClient, PanelEndpoints};
use crate::zone::{DnssecRecord, NameServers, Zone};
use std::collections::BTreeMap;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub(crate) const TEST_TOKEN: &str = "token-123";
pub(crate) const TEST_EMAIL: &str = "user@example.com";
pub(crate) const TEST_PASSWORD: &str = "hunter2";

/// Render form fields the way the panel renders its edit pages.
pub(crate) fn render_form(fields: &FormFields) -> String {
    let inputs: String = fields
        .iter()
        .map(|(name, value)| {
            format!("  <input type=\"text\" name=\"{name}\" id=\"{name}\" value=\"{value}\">\n")
        })
        .collect();
    format!("<html><body><form method=\"post\">\n{inputs}</form></body></html>")
}

pub(crate) fn ns_page(zone: &str, records: &NameServers) -> String {
    render_form(&form::encode_name_servers(zone, records).unwrap())
}

pub(crate) fn dnssec_page(zone: &str, records: &[DnssecRecord]) -> String {
    render_form(&form::encode_dnssec(zone, records).unwrap())
}

pub(crate) fn zone_list_page(zones: &[&str]) -> String {
    let rows: String = zones
        .iter()
        .map(|zone| format!("<tr><td>{zone}</td><td><a href=\"dns_edit.htm?dn={zone}\">進入</a></td></tr>\n"))
        .collect();
    format!("<html><body><table>\n{rows}</table></body></html>")
}

pub(crate) fn name_servers(pairs: &[(&str, &str)]) -> NameServers {
    pairs
        .iter()
        .map(|(host, ip)| ((*host).to_string(), (*ip).to_string()))
        .collect()
}

/// A mirror with `example.com` holding the given records.
pub(crate) fn write_mirror(
    name_servers: NameServers,
    dnssec_records: Vec<DnssecRecord>,
) -> (TempDir, MirrorStore) {
    let dir = TempDir::new().unwrap();
    let store = MirrorStore::new(dir.path().join("mirror.json"));

    let mut zones = BTreeMap::new();
    zones.insert(
        "example.com".to_string(),
        Zone {
            name_servers,
            dnssec_records,
        },
    );
    zones.insert("test.org".to_string(), Zone::default());
    store
        .save(&Config::new(TEST_EMAIL, TEST_PASSWORD, zones))
        .unwrap();

    (dir, store)
}

/// Mount a login endpoint that issues `TEST_TOKEN`.
pub(crate) async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/adm/person_sell.htm"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", format!("loginkuser={TEST_TOKEN}; path=/").as_str()),
        )
        .mount(server)
        .await;
}

/// A client pointed at the mock server, already holding a session.
pub(crate) async fn logged_in_panel(server: &MockServer) -> PanelClient {
    mount_login(server).await;
    let mut panel = PanelClient::new(PanelEndpoints::from_base(&server.uri()).unwrap()).unwrap();
    panel.login(TEST_EMAIL, TEST_PASSWORD).await.unwrap();
    panel
}

/// Decode the urlencoded body of a captured request.
pub(crate) fn form_body(request: &wiremock::Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}
