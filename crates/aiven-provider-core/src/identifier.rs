//! Composite resource identifiers
//!
//! Resources that live under a project (and usually a service) are tracked by
//! the host with a single opaque id of the form `project/service[/name]`.
//! Every part is path-segment escaped before joining, so a part may itself
//! contain `/` without breaking the split on the way back.

use crate::error::{ProviderError, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use std::fmt;

/// Separator between escaped parts.
pub const SEPARATOR: char = '/';

/// Characters left as-is inside a path segment. Matches the set Go's
/// `url.PathEscape` keeps, so ids written by older provider builds decode
/// identically.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Escape a single id part.
pub fn escape_part(part: &str) -> String {
    utf8_percent_encode(part, PATH_SEGMENT).to_string()
}

/// Unescape a single id part. Returns `None` for a malformed `%` sequence or
/// when the decoded bytes are not UTF-8.
pub fn unescape_part(part: &str) -> Option<String> {
    let bytes = part.as_bytes();
    for (idx, _) in part.match_indices('%') {
        let valid = bytes
            .get(idx + 1..idx + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !valid {
            return None;
        }
    }

    percent_decode_str(part)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Build an opaque id from its parts.
pub fn build_resource_id<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|part| escape_part(part.as_ref()))
        .collect::<Vec<_>>()
        .join("/")
}

/// Split an id into at most `n` parts.
///
/// Splitting stops after the `n - 1`-th separator; the remainder is the last
/// part. A segment that fails to unescape is returned as stored. A short id
/// yields fewer than `n` parts; callers that index into the result should go
/// through [`split_resource_id2`] / [`split_resource_id3`] or check the length.
pub fn split_resource_id(resource_id: &str, n: usize) -> Vec<String> {
    resource_id
        .splitn(n, SEPARATOR)
        .map(|part| unescape_part(part).unwrap_or_else(|| part.to_string()))
        .collect()
}

pub fn split_resource_id2(resource_id: &str) -> Result<(String, String)> {
    let mut parts = split_exact(resource_id, 2)?.into_iter();
    match (parts.next(), parts.next()) {
        (Some(first), Some(second)) => Ok((first, second)),
        _ => Err(invalid(resource_id, 2)),
    }
}

pub fn split_resource_id3(resource_id: &str) -> Result<(String, String, String)> {
    let mut parts = split_exact(resource_id, 3)?.into_iter();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), Some(third)) => Ok((first, second, third)),
        _ => Err(invalid(resource_id, 3)),
    }
}

fn split_exact(resource_id: &str, n: usize) -> Result<Vec<String>> {
    let parts = split_resource_id(resource_id, n);
    if parts.len() < n {
        return Err(invalid(resource_id, n));
    }
    Ok(parts)
}

fn invalid(resource_id: &str, n: usize) -> ProviderError {
    ProviderError::InvalidResourceId(format!(
        "{:?} does not have {} '/'-separated parts",
        resource_id, n
    ))
}

/// Owned composite identifier.
///
/// A changed identifier is always a new value; there is no in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId {
    parts: Vec<String>,
}

impl ResourceId {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a stored id that must have exactly `arity` parts.
    pub fn parse(resource_id: &str, arity: usize) -> Result<Self> {
        Ok(Self {
            parts: split_exact(resource_id, arity)?,
        })
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn part(&self, idx: usize) -> Result<&str> {
        self.parts.get(idx).map(String::as_str).ok_or_else(|| {
            ProviderError::InvalidResourceId(format!("missing part {} in {}", idx, self))
        })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Encoded form handed to the host.
    pub fn encode(&self) -> String {
        build_resource_id(&self.parts)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}
