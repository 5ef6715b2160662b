//! Where the opaque user identifier comes from.
//!
//! The estimator is launched from the payroll dashboard with the user's
//! reference embedded in the URL — either as a `uid` query parameter or as
//! the last path segment, depending on which dashboard built the link.
//! Both shapes are accepted, as is a bare identifier.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("empty user reference")]
    Empty,

    #[error("cannot extract a user reference from '{0}'")]
    Unrecognized(String),
}

/// Opaque identifier the back-end keys the estimate on. Never inspected,
/// only forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef(String);

impl UserRef {
    pub fn new(raw: impl Into<String>) -> Result<Self, IdentityError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(IdentityError::Empty);
        }
        Ok(Self(raw))
    }

    /// Extract the reference from a launch URL: the `uid` query parameter
    /// wins, the last path segment is the fallback. A bare identifier
    /// passes through unchanged.
    pub fn from_url(url: &str) -> Result<Self, IdentityError> {
        if url.trim().is_empty() {
            return Err(IdentityError::Empty);
        }
        if let Some(uid) = uid_query_param(url) {
            return Self::new(uid);
        }
        last_path_segment(url)
            .map(|segment| Self(segment.to_string()))
            .ok_or_else(|| IdentityError::Unrecognized(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn uid_query_param(url: &str) -> Option<&str> {
    static UID: OnceLock<Regex> = OnceLock::new();
    let re = UID.get_or_init(|| Regex::new(r"[?&]uid=([^&#]+)").expect("uid pattern compiles"));
    re.captures(url).and_then(|c| c.get(1)).map(|m| m.as_str())
}

fn last_path_segment(url: &str) -> Option<&str> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && !segment.contains(':'))
}
