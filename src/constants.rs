// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the PChome panel client.
//!
//! This module contains all endpoint, form-field and limit constants used
//! throughout the codebase. Constants are organized by category for easy
//! maintenance. The form field names mirror the vendor's markup exactly and
//! must not be renamed.

// ============================================================================
// Endpoint Constants
// ============================================================================

/// Base path of the domain management pages
pub const DEFAULT_MANAGE_URL: &str = "http://myname.pchome.com.tw/manage";

/// Login form endpoint
pub const DEFAULT_LOGIN_URL: &str = "https://login.pchome.com.tw/adm/person_sell.htm";

/// Logout endpoint
pub const DEFAULT_LOGOUT_URL: &str = "https://login.pchome.com.tw/adm/logout.php";

/// Zone list page, relative to the manage base
pub const ZONE_LIST_PAGE: &str = "index.htm";

/// Name-server edit page (GET), relative to the manage base
pub const NS_EDIT_PAGE: &str = "dns_edit.htm";

/// Name-server form target (POST), relative to the manage base
pub const NS_SUBMIT_PAGE: &str = "dns_edit.php";

/// DNSSEC edit page (GET), relative to the manage base
pub const DNSSEC_EDIT_PAGE: &str = "set_dnssec.htm";

/// DNSSEC form target (POST), relative to the manage base
pub const DNSSEC_SUBMIT_PAGE: &str = "set_dnssec.php";

/// Query parameter carrying the zone name on edit pages
pub const ZONE_QUERY_PARAM: &str = "dn";

// ============================================================================
// Session Constants
// ============================================================================

/// Name of the cookie holding the session token
pub const SESSION_COOKIE_NAME: &str = "loginkuser";

/// Login form field carrying the account email
pub const LOGIN_FIELD_ACCOUNT: &str = "mbrid";

/// Login form field carrying the password
pub const LOGIN_FIELD_PASSWORD: &str = "mbrpass";

/// Login form channel field and its fixed value
pub const LOGIN_FIELD_CHANNEL: &str = "chan";
pub const LOGIN_CHANNEL_VALUE: &str = "P000007";

/// Login form mode field and its fixed value
pub const LOGIN_FIELD_MODE: &str = "ltype";
pub const LOGIN_MODE_VALUE: &str = "checklogin";

// ============================================================================
// Record Limits
// ============================================================================

/// Maximum name-server records per zone (form slot count)
pub const MAX_NAME_SERVERS: usize = 5;

/// Maximum DNSSEC records per zone (form slot count)
pub const MAX_DNSSEC_RECORDS: usize = 5;

/// Always-blank forwarding slots carried by the name-server form
pub const FORWARDING_SLOTS: usize = 10;

// ============================================================================
// Form Field Names
// ============================================================================

/// Name-server hostname slot prefix
pub const FIELD_NS_HOST: &str = "host_dn";

/// Name-server IPv4 slot prefix
pub const FIELD_NS_IPV4: &str = "host_ip";

/// Name-server IPv6 slot prefix (always submitted blank)
pub const FIELD_NS_IPV6: &str = "host_ipv6";

/// DNSSEC key tag slot prefix
pub const FIELD_DNSSEC_KEY_TAG: &str = "KeyTag";

/// DNSSEC algorithm slot prefix
pub const FIELD_DNSSEC_ALGORITHM: &str = "alg";

/// DNSSEC digest slot prefix
pub const FIELD_DNSSEC_DIGEST: &str = "DS";

/// Forwarding slot prefixes, in the order the vendor form lists them
pub const FIELD_FWD_SUBHOST: &str = "subhostf";
pub const FIELD_FWD_CONTENT: &str = "contentf";
pub const FIELD_FWD_TYPE: &str = "typef";
pub const FIELD_FWD_TITLE: &str = "fwd_titlef";
pub const FIELD_FWD_META_TAG: &str = "fwd_meta_tagf";
pub const FIELD_FWD_DESCRIPTION_TAG: &str = "fwd_description_tagf";

/// Default value of every forwarding type slot
pub const FWD_TYPE_DEFAULT: &str = "fwd";

/// Zone name field carried by both forms
pub const FIELD_ZONE: &str = "dn";

/// DNS mode field on the name-server form and its fixed value
pub const FIELD_DNS_MODE: &str = "dns_mode";
pub const DNS_MODE_VALUE: &str = "1";

// ============================================================================
// Mirror Constants
// ============================================================================

/// Default location of the local mirror file
pub const DEFAULT_MIRROR_PATH: &str = ".pchome";
