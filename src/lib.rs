// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # pchome-dns - record management for the PChome domain panel
//!
//! The PChome "myname" domain panel has no API. This crate drives it the
//! way a browser would: it logs in with a form POST, scrapes the
//! server-rendered edit forms for the current records, and submits edited
//! forms back. A local JSON mirror keeps the credentials and the last-known
//! state of every zone between runs.
//!
//! ## Overview
//!
//! - Name-server host mappings (at most five per zone)
//! - DNSSEC delegation signer records (at most five per zone)
//! - Full refresh of every zone into the mirror
//!
//! ## Modules
//!
//! - [`panel`] - HTTP client, login/logout and page fetches
//! - [`scrape`] - Record extraction from panel HTML
//! - [`form`] - Fixed-slot form payloads for record submission
//! - [`zone`] - Zone and record types, in-memory mutations
//! - [`mirror`] - The local JSON mirror
//! - [`managers`] - List/add/update/delete per record type, sync, account
//! - [`errors`] - The crate's error type
//!
//! ## Example
//!
//! ```rust,no_run
//! use pchome_dns::managers::{AccountService, NameServerManager};
//! use pchome_dns::mirror::MirrorStore;
//! use pchome_dns::panel::{PanelClient, PanelEndpoints};
//!
//! # async fn example() -> pchome_dns::errors::Result<()> {
//! let store = MirrorStore::new(".pchome");
//! let mut panel = PanelClient::new(PanelEndpoints::default())?;
//!
//! AccountService::new(&store).login(&mut panel).await?;
//! NameServerManager::new(&panel, &store)
//!     .add("example.com", "ns1.example.com", "192.0.2.1")
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod constants;
pub mod errors;
pub mod form;
pub mod managers;
pub mod mirror;
pub mod panel;
pub mod scrape;
pub mod zone;

#[cfg(test)]
mod test_support;
