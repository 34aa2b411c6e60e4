//! The capability endpoint: negotiate a format, build the document from the
//! live catalog and configuration, serialize, respond.

use axum::{
    Router,
    extract::{Extension, Path, Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::catalog::{CatalogView, MemoryCatalog};
use crate::config::Config;
use crate::document;
use crate::error::{AppError, AppResult};
use crate::negotiate;

/// Query parameters for the capability endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ApiQueryParams {
    /// Output format override: a media type or json/yaml/html
    #[serde(rename = "f")]
    pub format: Option<String>,
}

fn respond(
    catalog: &dyn CatalogView,
    config: &Config,
    scope: Option<&str>,
    params: &ApiQueryParams,
    headers: &HeaderMap,
) -> AppResult<Response> {
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok());
    let format = negotiate::negotiate(params.format.as_deref(), accept)?;

    let document = document::build(catalog, &config.features, scope, &config.base_url)?;

    let api_url = match scope {
        Some(workspace) => format!("{}/{}/api", config.base_url, workspace),
        None => format!("{}/api", config.base_url),
    };
    let (body, content_type) = document::serialize(&document, format, &api_url)?;

    Ok(([(header::CONTENT_TYPE, content_type)], body).into_response())
}

pub async fn get_api(
    Extension(config): Extension<Arc<Config>>,
    State(catalog): State<Arc<MemoryCatalog>>,
    Query(params): Query<ApiQueryParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    respond(catalog.as_ref(), &config, None, &params, &headers)
}

/// Workspace-qualified variant: the document is scoped to the collections of
/// one namespace.
pub async fn get_workspace_api(
    Extension(config): Extension<Arc<Config>>,
    State(catalog): State<Arc<MemoryCatalog>>,
    Path(workspace): Path<String>,
    Query(params): Query<ApiQueryParams>,
    headers: HeaderMap,
) -> AppResult<Response> {
    // An unknown workspace is indistinguishable from an empty one; treat
    // both as not found rather than serving an empty enumeration.
    if catalog.collections(Some(&workspace)).is_empty() {
        return Err(AppError::NotFound(format!(
            "No such workspace: {}",
            workspace
        )));
    }
    respond(catalog.as_ref(), &config, Some(&workspace), &params, &headers)
}

pub fn routes(catalog: Arc<MemoryCatalog>) -> Router {
    Router::new()
        .route("/api", get(get_api))
        .route("/{workspace}/api", get(get_workspace_api))
        .with_state(catalog)
}
