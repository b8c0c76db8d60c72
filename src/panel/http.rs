// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! HTTP plumbing for panel requests.
//!
//! Every authenticated page fetch goes through [`panel_request`], and record
//! forms are posted through [`panel_submit`].
//! Requests are sent once: there is no retry, and any transport error or
//! rejected status is returned to the caller as `TransportFailure`.

use super::types::Session;
use crate::errors::{PanelError, Result};
use crate::form::FormFields;
use reqwest::header::{COOKIE, LOCATION};
use reqwest::{Client as HttpClient, Method, Response, StatusCode};
use tracing::{error, info};
use url::Url;

/// Fetch a panel page with the session cookie attached and return the body.
///
/// # Arguments
/// * `client` - HTTP client
/// * `session` - Session whose cookie is attached
/// * `url` - Full URL of the page
/// * `query` - Query parameters appended to the URL
///
/// # Errors
///
/// Returns `TransportFailure` if the request cannot be sent, the panel answers
/// with a non-success status, or the body cannot be read.
pub(crate) async fn panel_request(
    client: &HttpClient,
    session: &Session,
    url: &str,
    query: &[(&str, &str)],
) -> Result<String> {
    let response = send(client, session, Method::GET, url, query, None).await?;

    let status = response.status();
    if !status.is_success() {
        error!(
            url = %url,
            status = %status,
            "Panel request failed"
        );
        return Err(PanelError::TransportFailure {
            url: url.to_string(),
            reason: describe_status(status),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| transport_failure(url, e))?;

    info!(
        url = %url,
        status = %status,
        response_len = text.len(),
        "Panel request successful"
    );

    Ok(text)
}

/// POST a record form and decide whether the panel accepted it.
///
/// The edit handlers may answer with a redirect after accepting the form.
/// A redirect counts as accepted unless it points at `login`, which is how
/// the panel turns away a lapsed session.
///
/// # Errors
///
/// Returns `TransportFailure` if the request cannot be sent, the panel
/// redirects to the login page, or it answers with any other non-success
/// status.
pub(crate) async fn panel_submit(
    client: &HttpClient,
    session: &Session,
    url: &str,
    form: &FormFields,
    login: &Url,
) -> Result<()> {
    let response = send(client, session, Method::POST, url, &[], Some(form)).await?;
    let status = response.status();

    if status.is_success() {
        info!(url = %url, status = %status, "Panel accepted submission");
        return Ok(());
    }

    if status.is_redirection() {
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !points_at_login(url, location, login) {
            info!(
                url = %url,
                status = %status,
                location = %location,
                "Panel accepted submission and redirected"
            );
            return Ok(());
        }
    }

    error!(
        method = "POST",
        url = %url,
        status = %status,
        "Panel submission failed"
    );
    Err(PanelError::TransportFailure {
        url: url.to_string(),
        reason: describe_status(status),
    })
}

async fn send(
    client: &HttpClient,
    session: &Session,
    method: Method,
    url: &str,
    query: &[(&str, &str)],
    form: Option<&FormFields>,
) -> Result<Response> {
    info!(
        method = %method,
        url = %url,
        query = ?query,
        form_fields = form.map_or(0, Vec::len),
        "HTTP request to panel"
    );

    let mut request = client
        .request(method, url)
        .header(COOKIE, session.cookie_header());
    if !query.is_empty() {
        request = request.query(query);
    }
    if let Some(fields) = form {
        request = request.form(fields);
    }

    request.send().await.map_err(|e| transport_failure(url, e))
}

/// True if `location`, resolved against the request URL, is the login page.
pub(crate) fn points_at_login(request_url: &str, location: &str, login: &Url) -> bool {
    let Ok(target) = Url::parse(request_url).and_then(|base| base.join(location)) else {
        return false;
    };
    target.host_str() == login.host_str()
        && target.port_or_known_default() == login.port_or_known_default()
        && target.path() == login.path()
}

pub(crate) fn transport_failure(url: &str, err: impl std::fmt::Display) -> PanelError {
    PanelError::TransportFailure {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

/// Human-readable reason for a failed status.
///
/// The panel signals a lapsed session by redirecting to the login page or
/// refusing the request, so those statuses say so.
pub(crate) fn describe_status(status: StatusCode) -> String {
    if status.is_redirection()
        || status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
    {
        format!("HTTP {status}; the session was probably rejected or has expired")
    } else {
        format!("HTTP {status}")
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
