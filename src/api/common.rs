use serde::{Deserialize, Serialize};

/// OGC API Link object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            media_type: None,
            title: None,
        }
    }

    pub fn with_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Standard link relations
pub mod rel {
    pub const SELF: &str = "self";
    pub const ALTERNATE: &str = "alternate";
    pub const CONFORMANCE: &str = "conformance";
    pub const DATA: &str = "data";
    pub const SERVICE_DESC: &str = "service-desc";
    pub const SERVICE_DOC: &str = "service-doc";
    pub const ITEMS: &str = "items";
}

/// Standard media types
pub mod media_type {
    pub const JSON: &str = "application/json";
    pub const GEOJSON: &str = "application/geo+json";
    pub const OPENAPI_JSON: &str = "application/openapi+json;version=3.0";
    pub const YAML: &str = "application/x-yaml";
    pub const HTML: &str = "text/html";
}
