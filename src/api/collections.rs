use axum::{
    Json, Router,
    extract::{Extension, Path, State},
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;

use super::common::{Link, media_type, rel};
use crate::catalog::{CatalogView, CollectionEntry, MemoryCatalog};
use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Serialize)]
pub struct CollectionsResponse {
    pub collections: Vec<CollectionResponse>,
    pub links: Vec<Link>,
}

fn collection_response(entry: &CollectionEntry, base_url: &str) -> CollectionResponse {
    let id = entry.external_id();
    CollectionResponse {
        links: vec![
            Link::new(format!("{}/collections/{}", base_url, id), rel::SELF)
                .with_type(media_type::JSON),
            Link::new(format!("{}/collections/{}/items", base_url, id), rel::ITEMS)
                .with_type(media_type::GEOJSON),
        ],
        id,
        title: entry.title.clone(),
        description: entry.description.clone(),
    }
}

pub async fn list_collections(
    Extension(config): Extension<Arc<Config>>,
    State(catalog): State<Arc<MemoryCatalog>>,
) -> AppResult<Json<CollectionsResponse>> {
    let base_url = &config.base_url;
    let collections = catalog
        .collections(None)
        .iter()
        .map(|entry| collection_response(entry, base_url))
        .collect();

    Ok(Json(CollectionsResponse {
        collections,
        links: vec![
            Link::new(format!("{}/collections", base_url), rel::SELF)
                .with_type(media_type::JSON),
        ],
    }))
}

pub async fn get_collection(
    Extension(config): Extension<Arc<Config>>,
    State(catalog): State<Arc<MemoryCatalog>>,
    Path(collection_id): Path<String>,
) -> AppResult<Json<CollectionResponse>> {
    let entry = catalog
        .find_by_external_id(&collection_id)?
        .ok_or_else(|| AppError::NotFound(format!("Collection not found: {}", collection_id)))?;

    Ok(Json(collection_response(&entry, &config.base_url)))
}

pub fn routes(catalog: Arc<MemoryCatalog>) -> Router {
    Router::new()
        .route("/collections", get(list_collections))
        .route("/collections/{collection_id}", get(get_collection))
        .with_state(catalog)
}
