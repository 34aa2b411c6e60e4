use axum::{Json, Router, routing::get};
use serde::Serialize;

/// OGC API Conformance declaration
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conformance {
    pub conforms_to: Vec<String>,
}

/// Conformance class URIs
pub mod classes {
    // OGC API Common
    pub const COMMON_CORE: &str = "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/core";
    pub const COMMON_LANDING: &str =
        "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/landing-page";
    pub const COMMON_JSON: &str = "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/json";
    pub const COMMON_OAS30: &str = "http://www.opengis.net/spec/ogcapi-common-1/1.0/conf/oas30";

    // OGC API Features
    pub const FEATURES_CORE: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/core";
    pub const FEATURES_GEOJSON: &str =
        "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/geojson";
    pub const FEATURES_HTML: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/html";
    pub const FEATURES_OAS30: &str = "http://www.opengis.net/spec/ogcapi-features-1/1.0/conf/oas30";
}

async fn get_conformance() -> Json<Conformance> {
    let conformance = Conformance {
        conforms_to: vec![
            classes::COMMON_CORE.to_string(),
            classes::COMMON_LANDING.to_string(),
            classes::COMMON_JSON.to_string(),
            classes::COMMON_OAS30.to_string(),
            classes::FEATURES_CORE.to_string(),
            classes::FEATURES_GEOJSON.to_string(),
            classes::FEATURES_HTML.to_string(),
            classes::FEATURES_OAS30.to_string(),
        ],
    };

    Json(conformance)
}

pub fn routes() -> Router {
    Router::new().route("/conformance", get(get_conformance))
}
