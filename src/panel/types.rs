// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Types shared by the panel client: endpoints and the session token.

use crate::constants::{
    DEFAULT_LOGIN_URL, DEFAULT_LOGOUT_URL, DEFAULT_MANAGE_URL, SESSION_COOKIE_NAME,
};
use std::fmt;
use url::Url;

/// Resolved URLs of the panel.
///
/// Defaults point at the production site; tests and the CLI may override any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelEndpoints {
    /// Login form target
    pub login: Url,
    /// Logout page
    pub logout: Url,
    /// Base of the domain management pages
    pub manage: Url,
}

impl PanelEndpoints {
    /// Parse a set of endpoint URLs.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the URLs does not parse.
    pub fn new(login: &str, logout: &str, manage: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            login: Url::parse(login)?,
            logout: Url::parse(logout)?,
            manage: Url::parse(manage)?,
        })
    }

    /// Endpoints for a single host serving every page, as a mock panel does.
    ///
    /// The login page lives at `/adm/person_sell.htm`, logout at
    /// `/adm/logout.php` and the management pages under `/manage`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` does not parse.
    pub fn from_base(base: &str) -> Result<Self, url::ParseError> {
        let base = base.trim_end_matches('/');
        Self::new(
            &format!("{base}/adm/person_sell.htm"),
            &format!("{base}/adm/logout.php"),
            &format!("{base}/manage"),
        )
    }

    /// Full URL of a page under the management base.
    ///
    /// Converts `http://host/manage` plus `index.htm` to `http://host/manage/index.htm`.
    #[must_use]
    pub fn page(&self, page: &str) -> String {
        format!(
            "{}/{}",
            self.manage.as_str().trim_end_matches('/'),
            page.trim_start_matches('/')
        )
    }
}

impl Default for PanelEndpoints {
    fn default() -> Self {
        // The defaults are compile-time constants and always parse
        Self::new(DEFAULT_LOGIN_URL, DEFAULT_LOGOUT_URL, DEFAULT_MANAGE_URL)
            .expect("default panel endpoints are valid URLs")
    }
}

/// An authenticated panel session.
///
/// Holds the value of the session cookie. It has no tracked expiry; a
/// rejected or empty response from the panel is the only sign it has lapsed.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Value of the `Cookie` header carrying this session.
    #[must_use]
    pub fn cookie_header(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
