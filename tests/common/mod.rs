// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! A stateful fake of the domain panel for integration tests.
//!
//! It renders the zone list and both edit forms from in-memory state, and
//! applies submitted forms back to that state, so a test can drive the whole
//! login, list, edit and refresh cycle over real HTTP.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const EMAIL: &str = "owner@example.com";
pub const PASSWORD: &str = "correct horse";
pub const TOKEN: &str = "session-abc";

const NS_SLOTS: usize = 5;
const DNSSEC_SLOTS: usize = 5;

/// Records of one zone as the fake panel stores them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeZone {
    pub name_servers: Vec<(String, String)>,
    pub dnssec: Vec<(String, String, String)>,
}

/// Shared handle to the fake panel's state.
#[derive(Debug, Clone, Default)]
pub struct FakePanel {
    zones: Arc<Mutex<BTreeMap<String, FakeZone>>>,
}

impl FakePanel {
    pub fn with_zone(self, name: &str, zone: FakeZone) -> Self {
        self.zones.lock().unwrap().insert(name.to_string(), zone);
        self
    }

    pub fn zone(&self, name: &str) -> FakeZone {
        self.zones
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Change a zone behind the client's back.
    pub fn set_zone(&self, name: &str, zone: FakeZone) {
        self.zones.lock().unwrap().insert(name.to_string(), zone);
    }

    /// Start a mock server answering every request from this state.
    pub async fn serve(&self) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(self.clone())
            .mount(&server)
            .await;
        server
    }

    fn login(request: &Request) -> ResponseTemplate {
        let form = form_fields(request);
        if field(&form, "mbrid") == EMAIL && field(&form, "mbrpass") == PASSWORD {
            ResponseTemplate::new(302)
                .insert_header("location", "/manage/index.htm")
                .insert_header("set-cookie", format!("loginkuser={TOKEN}; path=/").as_str())
        } else {
            ResponseTemplate::new(200).set_body_string("<html>帳號或密碼錯誤</html>")
        }
    }

    fn zone_list(&self) -> String {
        self.zones
            .lock()
            .unwrap()
            .keys()
            .map(|zone| format!("<a href=\"dns_edit.htm?dn={zone}\">進入</a>\n"))
            .collect()
    }

    fn ns_form(&self, zone: &str) -> String {
        let records = self.zone(zone).name_servers;
        let mut html = String::from("<form>\n");
        for slot in 0..NS_SLOTS {
            let (host, ip) = records.get(slot).cloned().unwrap_or_default();
            html.push_str(&input(&format!("host_dn{slot}"), &host));
            html.push_str(&input(&format!("host_ip{slot}"), &ip));
            html.push_str(&input(&format!("host_ipv6{slot}"), ""));
        }
        html.push_str("</form>");
        html
    }

    fn dnssec_form(&self, zone: &str) -> String {
        let records = self.zone(zone).dnssec;
        let mut html = String::from("<form>\n");
        for slot in 0..DNSSEC_SLOTS {
            let (key_tag, alg, digest) = records.get(slot).cloned().unwrap_or_default();
            html.push_str(&input(&format!("KeyTag{slot}"), &key_tag));
            html.push_str(&input(&format!("alg{slot}"), &alg));
            html.push_str(&input(&format!("DS{slot}"), &digest));
        }
        html.push_str("</form>");
        html
    }

    fn apply_ns(&self, request: &Request) {
        let form = form_fields(request);
        let zone = field(&form, "dn");
        let name_servers = (0..NS_SLOTS)
            .map(|slot| {
                (
                    field(&form, &format!("host_dn{slot}")),
                    field(&form, &format!("host_ip{slot}")),
                )
            })
            .filter(|(host, _)| !host.is_empty())
            .collect();
        self.zones
            .lock()
            .unwrap()
            .entry(zone)
            .or_default()
            .name_servers = name_servers;
    }

    fn apply_dnssec(&self, request: &Request) {
        let form = form_fields(request);
        let zone = field(&form, "dn");
        let dnssec = (0..DNSSEC_SLOTS)
            .map(|slot| {
                (
                    field(&form, &format!("KeyTag{slot}")),
                    field(&form, &format!("alg{slot}")),
                    field(&form, &format!("DS{slot}")),
                )
            })
            .filter(|(key_tag, _, _)| !key_tag.is_empty())
            .collect();
        self.zones.lock().unwrap().entry(zone).or_default().dnssec = dnssec;
    }
}

impl Respond for FakePanel {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let method = request.method.as_str();
        let path = request.url.path();

        if method == "POST" && path == "/adm/person_sell.htm" {
            return Self::login(request);
        }

        let cookie = request
            .headers
            .get("cookie")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if cookie != format!("loginkuser={TOKEN}") {
            return ResponseTemplate::new(302).insert_header("location", "/adm/person_sell.htm");
        }

        let zone = request
            .url
            .query_pairs()
            .find(|(key, _)| key == "dn")
            .map(|(_, value)| value.into_owned())
            .unwrap_or_default();

        match (method, path) {
            ("GET", "/adm/logout.php") => ResponseTemplate::new(200),
            ("GET", "/manage/index.htm") => {
                ResponseTemplate::new(200).set_body_string(self.zone_list())
            }
            ("GET", "/manage/dns_edit.htm") => {
                ResponseTemplate::new(200).set_body_string(self.ns_form(&zone))
            }
            ("GET", "/manage/set_dnssec.htm") => {
                ResponseTemplate::new(200).set_body_string(self.dnssec_form(&zone))
            }
            ("POST", "/manage/dns_edit.php") => {
                self.apply_ns(request);
                ResponseTemplate::new(200).set_body_string("<html>OK</html>")
            }
            ("POST", "/manage/set_dnssec.php") => {
                self.apply_dnssec(request);
                ResponseTemplate::new(200).set_body_string("<html>OK</html>")
            }
            _ => ResponseTemplate::new(404),
        }
    }
}

pub fn ns(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(host, ip)| ((*host).to_string(), (*ip).to_string()))
        .collect()
}

pub fn ds(triples: &[(&str, &str, &str)]) -> Vec<(String, String, String)> {
    triples
        .iter()
        .map(|(tag, alg, digest)| ((*tag).to_string(), (*alg).to_string(), (*digest).to_string()))
        .collect()
}

fn input(name: &str, value: &str) -> String {
    format!("<input type=\"text\" name=\"{name}\" id=\"{name}\" value=\"{value}\">\n")
}

fn form_fields(request: &Request) -> Vec<(String, String)> {
    url::form_urlencoded::parse(&request.body)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn field(form: &[(String, String)], name: &str) -> String {
    form.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
        .unwrap_or_default()
}
