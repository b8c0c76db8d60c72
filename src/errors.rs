// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for panel, scraping and mirror operations.
//!
//! Every fallible operation in the library returns [`PanelError`]. The set of
//! variants is closed; each carries the context needed to act on it (zone
//! name, record key, URL, file path) so callers and tests can match on the
//! variant instead of parsing messages.

use crate::zone::RecordKind;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur while talking to the panel or maintaining the mirror.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PanelError {
    /// A login credential was empty
    ///
    /// Raised before any network call is made.
    #[error("Empty {field}; both email and password are required")]
    EmptyCredential {
        /// Which credential was empty ("email" or "password")
        field: &'static str,
    },

    /// The HTTP layer failed (connection, body read, or unexpected status)
    #[error("HTTP request to {url} failed: {reason}")]
    TransportFailure {
        /// The URL being requested
        url: String,
        /// Underlying failure
        reason: String,
    },

    /// The login round-trip succeeded but no session cookie came back
    ///
    /// The panel gives the same answer for wrong credentials and for a login
    /// flow that no longer sets the cookie, so both are named in the message.
    #[error(
        "Login for '{email}' returned no session cookie (HTTP {status}): \
         the email or password may be wrong, or the login page may have changed"
    )]
    AuthenticationRejected {
        /// Account the login was attempted for
        email: String,
        /// HTTP status of the login response
        status: u16,
    },

    /// A page did not have the shape the scraper expects
    #[error("Malformed {page} response: {reason}")]
    MalformedResponse {
        /// Which page was being scraped
        page: &'static str,
        /// What did not match
        reason: String,
    },

    /// A page came back with an empty body
    #[error("Empty {page} response; the request probably did not reach the expected page")]
    EmptyResponse {
        /// Which page was being scraped
        page: &'static str,
    },

    /// The zone is not present in the mirror
    #[error("No such zone '{zone}' in the mirror; run a refresh if it was added recently")]
    UnknownZone {
        /// The zone name that was requested
        zone: String,
    },

    /// Adding or updating would create a second identical record
    #[error("Duplicate {kind} record {record} in zone '{zone}'")]
    DuplicateRecord {
        /// The zone holding the record
        zone: String,
        /// Record type
        kind: RecordKind,
        /// Record key (hostname or DNSSEC triple)
        record: String,
    },

    /// The zone already holds the maximum number of records of this type
    #[error("Zone '{zone}' already holds the maximum of {limit} {kind} records; delete some first")]
    RecordLimitExceeded {
        /// The zone at its limit
        zone: String,
        /// Record type
        kind: RecordKind,
        /// The cap for this record type
        limit: usize,
    },

    /// The record to update or delete does not exist
    #[error("No {kind} record {record} in zone '{zone}'")]
    RecordNotFound {
        /// The zone that was searched
        zone: String,
        /// Record type
        kind: RecordKind,
        /// Record key (hostname, host/IP pair, or DNSSEC triple)
        record: String,
    },

    /// Record data failed validation (bad IPv4 address, empty hostname)
    #[error("Invalid {kind} record for zone '{zone}': {reason}")]
    InvalidRecord {
        /// The zone the record was meant for
        zone: String,
        /// Record type
        kind: RecordKind,
        /// Explanation of what is invalid
        reason: String,
    },

    /// The mirror file is missing or could not be parsed
    #[error("Cannot read mirror file {path}: {reason}")]
    MirrorUnreadable {
        /// Path of the mirror file
        path: String,
        /// Underlying I/O or JSON error
        reason: String,
    },

    /// The mirror file could not be written or removed
    #[error("Cannot write mirror file {path}: {reason}")]
    MirrorWriteFailure {
        /// Path of the mirror file
        path: String,
        /// Underlying I/O or JSON error
        reason: String,
    },

    /// A request other than login was attempted without a session
    #[error("No session for {operation}; log in first")]
    MissingSession {
        /// The operation that needed a session
        operation: &'static str,
    },
}

impl PanelError {
    /// Stable name of the error variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyCredential { .. } => "EmptyCredential",
            Self::TransportFailure { .. } => "TransportFailure",
            Self::AuthenticationRejected { .. } => "AuthenticationRejected",
            Self::MalformedResponse { .. } => "MalformedResponse",
            Self::EmptyResponse { .. } => "EmptyResponse",
            Self::UnknownZone { .. } => "UnknownZone",
            Self::DuplicateRecord { .. } => "DuplicateRecord",
            Self::RecordLimitExceeded { .. } => "RecordLimitExceeded",
            Self::RecordNotFound { .. } => "RecordNotFound",
            Self::InvalidRecord { .. } => "InvalidRecord",
            Self::MirrorUnreadable { .. } => "MirrorUnreadable",
            Self::MirrorWriteFailure { .. } => "MirrorWriteFailure",
            Self::MissingSession { .. } => "MissingSession",
        }
    }

    /// Returns true if this error is raised before anything is sent to the panel.
    ///
    /// When this holds, neither the remote state nor the mirror was changed.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::EmptyCredential { .. }
            | Self::UnknownZone { .. }
            | Self::DuplicateRecord { .. }
            | Self::RecordLimitExceeded { .. }
            | Self::RecordNotFound { .. }
            | Self::InvalidRecord { .. }
            | Self::MirrorUnreadable { .. }
            | Self::MissingSession { .. } => true,

            Self::TransportFailure { .. }
            | Self::AuthenticationRejected { .. }
            | Self::MalformedResponse { .. }
            | Self::EmptyResponse { .. }
            | Self::MirrorWriteFailure { .. } => false,
        }
    }
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod errors_tests;
