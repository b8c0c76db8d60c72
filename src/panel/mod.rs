// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Panel access over HTTP.
//!
//! This module provides the single surface through which the rest of the
//! crate talks to the domain control panel:
//!
//! - Logging in and out (cookie-based session)
//! - Fetching the zone list and the record edit forms
//! - Submitting whole record sets back through the edit forms
//!
//! # Architecture
//!
//! The `PanelClient` owns the HTTP client, the endpoint set and the current
//! session. Every request except login requires a session; attempting one
//! without it fails with `MissingSession` before anything is sent. Redirects
//! are never followed, so the login cookie is read from the login response
//! itself and a redirect to the login page surfaces as an error instead of
//! being scraped as an empty form.
//!
//! # Example
//!
//! ```rust,no_run
//! use pchome_dns::panel::{PanelClient, PanelEndpoints};
//!
//! # async fn example() -> pchome_dns::errors::Result<()> {
//! let mut panel = PanelClient::new(PanelEndpoints::default())?;
//! panel.login("user@example.com", "secret").await?;
//!
//! let zones = panel.fetch_zone_list().await?;
//! for name in zones.keys() {
//!     let name_servers = panel.fetch_name_servers(name).await?;
//!     println!("{name}: {name_servers:?}");
//! }
//!
//! panel.logout().await?;
//! # Ok(())
//! # }
//! ```

pub mod auth;
mod http;
pub mod types;

pub use types::{PanelEndpoints, Session};

use crate::constants::{
    DNSSEC_EDIT_PAGE, DNSSEC_SUBMIT_PAGE, NS_EDIT_PAGE, NS_SUBMIT_PAGE, ZONE_LIST_PAGE,
    ZONE_QUERY_PARAM,
};
use crate::errors::{PanelError, Result};
use crate::form;
use crate::scrape;
use crate::zone::{DnssecRecord, NameServers, RecordKind, RecordSet, Zone};
use reqwest::redirect::Policy;
use reqwest::Client as HttpClient;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::info;

/// Client for the domain control panel.
#[derive(Debug, Clone)]
pub struct PanelClient {
    /// HTTP client for panel requests
    client: HttpClient,
    /// Where the panel lives
    endpoints: PanelEndpoints,
    /// Current session, if logged in
    session: Option<Session>,
}

impl PanelClient {
    /// Create a client without a request timeout.
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` if the HTTP client cannot be built.
    pub fn new(endpoints: PanelEndpoints) -> Result<Self> {
        Self::with_timeout(endpoints, None)
    }

    /// Create a client, optionally bounding each request by `timeout`.
    ///
    /// Without a timeout a stalled panel blocks the caller indefinitely.
    ///
    /// # Errors
    ///
    /// Returns `TransportFailure` if the HTTP client cannot be built.
    pub fn with_timeout(endpoints: PanelEndpoints, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = HttpClient::builder().redirect(Policy::none());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| http::transport_failure(endpoints.manage.as_str(), e))?;

        Ok(Self {
            client,
            endpoints,
            session: None,
        })
    }

    #[must_use]
    pub fn endpoints(&self) -> &PanelEndpoints {
        &self.endpoints
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Use an existing session instead of logging in.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    // ===== Session management =====

    /// Log in and keep the resulting session.
    ///
    /// # Errors
    ///
    /// See [`auth::authenticate`].
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let session = auth::authenticate(&self.client, &self.endpoints, email, password).await?;
        self.session = Some(session);
        Ok(())
    }

    /// Log out and drop the session.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession` when not logged in and `TransportFailure` if
    /// the request cannot be sent.
    pub async fn logout(&mut self) -> Result<()> {
        let session = self.require_session("logout")?;
        auth::logout(&self.client, &self.endpoints, session).await?;
        self.session = None;
        Ok(())
    }

    // ===== Page fetches =====

    /// Fetch the zone names on the account.
    ///
    /// The returned zones carry no records yet.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure` or `EmptyResponse`.
    pub async fn fetch_zone_list(&self) -> Result<BTreeMap<String, Zone>> {
        let body = self.get_page("zone list", ZONE_LIST_PAGE, None).await?;
        scrape::scrape_zone_list(&body)
    }

    /// Fetch the name servers of a zone.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure`, `EmptyResponse` or
    /// `MalformedResponse`.
    pub async fn fetch_name_servers(&self, zone: &str) -> Result<NameServers> {
        let body = self.get_record_page(RecordKind::NameServer, zone).await?;
        scrape::scrape_name_servers(&body)
    }

    /// Fetch the DNSSEC records of a zone.
    ///
    /// # Errors
    ///
    /// Returns `MissingSession`, `TransportFailure`, `EmptyResponse` or
    /// `MalformedResponse`.
    pub async fn fetch_dnssec(&self, zone: &str) -> Result<Vec<DnssecRecord>> {
        let body = self.get_record_page(RecordKind::Dnssec, zone).await?;
        scrape::scrape_dnssec(&body)
    }

    // ===== Form submissions =====

    /// Replace a zone's record set of one kind on the panel.
    ///
    /// The whole set is sent; the panel has no per-record operations. Success
    /// means the panel accepted the POST, not that it applied the change.
    ///
    /// # Errors
    ///
    /// Returns `RecordLimitExceeded` if the set does not fit the form,
    /// `MissingSession` and `TransportFailure`.
    pub async fn submit_records(&self, zone: &str, records: &RecordSet) -> Result<()> {
        let pages = RecordPages::of(records.kind());
        let session = self.require_session(pages.update)?;
        let fields = form::encode(zone, records)?;
        let url = self.endpoints.page(pages.submit);

        http::panel_submit(&self.client, session, &url, &fields, &self.endpoints.login).await?;

        info!(
            zone = %zone,
            kind = %records.kind(),
            records = records.len(),
            "Submitted record set"
        );
        Ok(())
    }

    async fn get_record_page(&self, kind: RecordKind, zone: &str) -> Result<String> {
        let pages = RecordPages::of(kind);
        self.get_page(pages.listing, pages.edit, Some(zone)).await
    }

    async fn get_page(
        &self,
        operation: &'static str,
        page: &str,
        zone: Option<&str>,
    ) -> Result<String> {
        let session = self.require_session(operation)?;
        let url = self.endpoints.page(page);
        let query: Vec<(&str, &str)> = zone
            .map(|zone| vec![(ZONE_QUERY_PARAM, zone)])
            .unwrap_or_default();

        http::panel_request(&self.client, session, &url, &query).await
    }

    fn require_session(&self, operation: &'static str) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or(PanelError::MissingSession { operation })
    }
}

/// Panel pages and operation labels for one record type.
struct RecordPages {
    listing: &'static str,
    update: &'static str,
    edit: &'static str,
    submit: &'static str,
}

impl RecordPages {
    const fn of(kind: RecordKind) -> Self {
        match kind {
            RecordKind::NameServer => Self {
                listing: "name-server listing",
                update: "name-server update",
                edit: NS_EDIT_PAGE,
                submit: NS_SUBMIT_PAGE,
            },
            RecordKind::Dnssec => Self {
                listing: "DNSSEC listing",
                update: "DNSSEC update",
                edit: DNSSEC_EDIT_PAGE,
                submit: DNSSEC_SUBMIT_PAGE,
            },
        }
    }
}
