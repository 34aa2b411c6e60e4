//! Response format negotiation for the capability document.
//!
//! Precedence: an explicit `f=` query parameter wins, then the `Accept`
//! header, then the JSON default. The Accept scan picks the first entry
//! in the client's list that names a supported format and skips the rest;
//! quality values are not ranked. Position-based first-match is the
//! published policy, locked in by tests.

use crate::error::{AppError, AppResult};

/// Serializations the capability endpoint can answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    OpenApiJson,
    Yaml,
    Html,
}

pub const SUPPORTED: [Format; 3] = [Format::OpenApiJson, Format::Yaml, Format::Html];

impl Format {
    /// Content type sent on the response.
    pub fn content_type(&self) -> &'static str {
        match self {
            Format::OpenApiJson => "application/openapi+json;version=3.0",
            Format::Yaml => "application/x-yaml",
            Format::Html => "text/html",
        }
    }

    /// Base media type, without parameters.
    fn base_type(&self) -> &'static str {
        match self {
            Format::OpenApiJson => "application/openapi+json",
            Format::Yaml => "application/x-yaml",
            Format::Html => "text/html",
        }
    }

    /// Whether a requested media type names this format. Parameters such as
    /// `;version=3.0` are informational and never block a match.
    pub fn matches(&self, requested: &str) -> bool {
        let base = requested.split(';').next().unwrap_or("").trim();
        base.eq_ignore_ascii_case(self.base_type())
    }

    /// Resolve a short alias or a full media type.
    pub fn from_name(name: &str) -> Option<Format> {
        match name.trim() {
            "json" => return Some(Format::OpenApiJson),
            "yaml" => return Some(Format::Yaml),
            "html" => return Some(Format::Html),
            _ => {}
        }
        SUPPORTED.iter().copied().find(|f| f.matches(name))
    }
}

/// Select the response format for a capability request.
///
/// `explicit` is the raw `f=` query parameter, `accept` the raw `Accept`
/// header value.
pub fn negotiate(explicit: Option<&str>, accept: Option<&str>) -> AppResult<Format> {
    if let Some(requested) = explicit {
        return Format::from_name(requested)
            .ok_or_else(|| AppError::UnsupportedFormat(requested.to_string()));
    }

    if let Some(accept) = accept {
        for entry in accept.split(',') {
            if let Some(format) = SUPPORTED.iter().copied().find(|f| f.matches(entry)) {
                return Ok(format);
            }
        }
    }

    Ok(Format::OpenApiJson)
}
