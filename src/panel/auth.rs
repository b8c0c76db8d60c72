// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Login and logout against the panel's account pages.

use super::http::{describe_status, transport_failure};
use super::types::{PanelEndpoints, Session};
use crate::constants::{
    LOGIN_CHANNEL_VALUE, LOGIN_FIELD_ACCOUNT, LOGIN_FIELD_CHANNEL, LOGIN_FIELD_MODE,
    LOGIN_FIELD_PASSWORD, LOGIN_MODE_VALUE, SESSION_COOKIE_NAME,
};
use crate::errors::{PanelError, Result};
use reqwest::header::COOKIE;
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};

/// Exchange an email and password for a session.
///
/// Performs exactly one round-trip: a form POST to the login endpoint. The
/// session token is read from the `loginkuser` cookie on that response.
///
/// # Errors
///
/// Returns `EmptyCredential` (before any request) if either value is empty,
/// `TransportFailure` if the request fails or the status is neither success
/// nor redirect, and `AuthenticationRejected` if no token came back.
pub async fn authenticate(
    client: &HttpClient,
    endpoints: &PanelEndpoints,
    email: &str,
    password: &str,
) -> Result<Session> {
    if email.is_empty() {
        return Err(PanelError::EmptyCredential { field: "email" });
    }
    if password.is_empty() {
        return Err(PanelError::EmptyCredential { field: "password" });
    }

    let url = endpoints.login.as_str();
    let form = [
        (LOGIN_FIELD_ACCOUNT, email),
        (LOGIN_FIELD_PASSWORD, password),
        (LOGIN_FIELD_CHANNEL, LOGIN_CHANNEL_VALUE),
        (LOGIN_FIELD_MODE, LOGIN_MODE_VALUE),
    ];

    info!(url = %url, email = %email, "Logging in to panel");

    let response = client
        .post(url)
        .form(&form)
        .send()
        .await
        .map_err(|e| transport_failure(url, e))?;

    let status = response.status();
    if !status.is_success() && !status.is_redirection() {
        return Err(PanelError::TransportFailure {
            url: url.to_string(),
            reason: describe_status(status),
        });
    }

    let token = response
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default();

    if token.is_empty() {
        warn!(
            url = %url,
            email = %email,
            status = %status,
            "Login response carried no session cookie"
        );
        return Err(PanelError::AuthenticationRejected {
            email: email.to_string(),
            status: status.as_u16(),
        });
    }

    debug!(email = %email, "Obtained panel session");
    Ok(Session::new(token))
}

/// End a panel session.
///
/// The response body and status are not inspected; only a transport failure
/// is reported.
///
/// # Errors
///
/// Returns `TransportFailure` if the request cannot be sent.
pub async fn logout(
    client: &HttpClient,
    endpoints: &PanelEndpoints,
    session: &Session,
) -> Result<()> {
    let url = endpoints.logout.as_str();

    let response = client
        .get(url)
        .header(COOKIE, session.cookie_header())
        .send()
        .await
        .map_err(|e| transport_failure(url, e))?;

    info!(url = %url, status = %response.status(), "Logged out of panel");
    Ok(())
}
