use axum::{Extension, Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

use super::common::{Link, media_type, rel};
use crate::config::Config;

/// OGC API Landing Page response
#[derive(Debug, Serialize)]
pub struct LandingPage {
    pub title: String,
    pub description: String,
    pub links: Vec<Link>,
}

async fn get_landing_page(Extension(config): Extension<Arc<Config>>) -> Json<LandingPage> {
    let base_url = &config.base_url;

    let landing = LandingPage {
        title: "geogate".to_string(),
        description: "OGC API Features service with self-describing capability documents"
            .to_string(),
        links: vec![
            Link::new(base_url, rel::SELF)
                .with_type(media_type::JSON)
                .with_title("This document"),
            Link::new(format!("{}/api", base_url), rel::SERVICE_DESC)
                .with_type(media_type::OPENAPI_JSON)
                .with_title("API definition"),
            Link::new(format!("{}/api?f=text/html", base_url), rel::SERVICE_DOC)
                .with_type(media_type::HTML)
                .with_title("API documentation"),
            Link::new(format!("{}/conformance", base_url), rel::CONFORMANCE)
                .with_type(media_type::JSON)
                .with_title("Conformance declaration"),
            Link::new(format!("{}/collections", base_url), rel::DATA)
                .with_type(media_type::JSON)
                .with_title("Collections"),
        ],
    };

    Json(landing)
}

pub fn routes() -> Router {
    Router::new().route("/", get(get_landing_page))
}
