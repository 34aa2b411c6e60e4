//! Builds the capability document from live server state.
//!
//! The path and operation topology is fixed by the resource model of the
//! service; only the `collectionId` enumeration and the `limit` bounds are
//! derived from the catalog and configuration at build time. Collaborator
//! views are snapshotted once each, so a document is internally consistent
//! even while the catalog is being mutated by administrative operations.

use indexmap::IndexMap;
use serde_json::json;

use super::model::{
    CapabilityDocument, Components, Info, Operation, Parameter, ParameterLocation,
    ParameterOrRef, PathItem, ResponseSpec, Schema, SchemaNode, Server,
};
use crate::catalog::CatalogView;
use crate::config::LimitsView;
use crate::error::{AppError, AppResult};

/// Build a fresh capability document.
///
/// `scope` restricts the `collectionId` enumeration to one namespace and is
/// reflected in the server URL; `base_url` is the externally visible base
/// of the service.
pub fn build(
    catalog: &dyn CatalogView,
    limits: &dyn LimitsView,
    scope: Option<&str>,
    base_url: &str,
) -> AppResult<CapabilityDocument> {
    let max_features = match limits.max_features() {
        Some(n) if n > 0 => n,
        Some(n) => {
            return Err(AppError::InvalidServiceConfig(format!(
                "maxFeatures must be positive, got {}",
                n
            )));
        }
        None => {
            return Err(AppError::InvalidServiceConfig(
                "maxFeatures is not configured".to_string(),
            ));
        }
    };

    // One snapshot of the catalog for the whole build.
    let collection_ids: Vec<String> = catalog
        .collections(scope)
        .iter()
        .map(|c| c.external_id())
        .collect();

    let server_url = match scope {
        Some(workspace) => format!("{}/{}", base_url, workspace),
        None => base_url.to_string(),
    };

    let mut paths = IndexMap::new();
    paths.insert(
        "/".to_string(),
        get_path(
            "getLandingPage",
            "Landing page of this API",
            vec![],
        ),
    );
    paths.insert(
        "/conformance".to_string(),
        get_path(
            "getRequirementsClasses",
            "Conformance classes implemented by this API",
            vec![],
        ),
    );
    paths.insert(
        "/collections".to_string(),
        get_path(
            "describeCollections",
            "Metadata about the feature collections",
            vec![],
        ),
    );
    paths.insert(
        "/collections/{collectionId}".to_string(),
        get_path(
            "describeCollection",
            "Metadata about one feature collection",
            vec![ParameterOrRef::component("collectionId")],
        ),
    );
    paths.insert(
        "/collections/{collectionId}/items".to_string(),
        get_path(
            "getFeatures",
            "Features of the collection",
            vec![
                ParameterOrRef::component("collectionId"),
                ParameterOrRef::component("limit"),
                ParameterOrRef::component("bbox"),
                ParameterOrRef::component("time"),
            ],
        ),
    );
    paths.insert(
        "/collections/{collectionId}/items/{featureId}".to_string(),
        get_path(
            "getFeature",
            "A single feature of the collection",
            vec![
                ParameterOrRef::component("collectionId"),
                ParameterOrRef::Item(feature_id_parameter()),
            ],
        ),
    );

    let mut parameters = IndexMap::new();
    parameters.insert(
        "collectionId".to_string(),
        collection_id_parameter(collection_ids),
    );
    parameters.insert("limit".to_string(), limit_parameter(max_features));
    parameters.insert("bbox".to_string(), bbox_parameter());
    parameters.insert("time".to_string(), time_parameter());

    Ok(CapabilityDocument {
        openapi: "3.0.3".to_string(),
        info: Info {
            title: "OGC API - Features".to_string(),
            description: Some(
                "Access to geospatial feature collections served by this deployment".to_string(),
            ),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        servers: vec![Server { url: server_url }],
        paths,
        components: Components {
            parameters,
            schemas: IndexMap::new(),
        },
    })
}

fn get_path(operation_id: &str, summary: &str, parameters: Vec<ParameterOrRef>) -> PathItem {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        ResponseSpec {
            description: "Successful response".to_string(),
        },
    );
    PathItem {
        get: Some(Operation {
            operation_id: operation_id.to_string(),
            summary: Some(summary.to_string()),
            parameters,
            responses,
        }),
    }
}

fn collection_id_parameter(collection_ids: Vec<String>) -> Parameter {
    Parameter {
        name: "collectionId".to_string(),
        location: ParameterLocation::Path,
        description: Some("Identifier of a feature collection".to_string()),
        required: true,
        schema: SchemaNode::inline(Schema {
            enum_values: Some(collection_ids),
            ..Schema::string()
        }),
    }
}

fn feature_id_parameter() -> Parameter {
    Parameter {
        name: "featureId".to_string(),
        location: ParameterLocation::Path,
        description: Some("Identifier of a feature".to_string()),
        required: true,
        schema: SchemaNode::inline(Schema::string()),
    }
}

fn limit_parameter(max_features: i64) -> Parameter {
    Parameter {
        name: "limit".to_string(),
        location: ParameterLocation::Query,
        description: Some("Maximum number of features to return".to_string()),
        required: false,
        schema: SchemaNode::inline(Schema {
            minimum: Some(1),
            maximum: Some(max_features),
            default: Some(json!(max_features)),
            ..Schema::integer()
        }),
    }
}

fn bbox_parameter() -> Parameter {
    Parameter {
        name: "bbox".to_string(),
        location: ParameterLocation::Query,
        description: Some(
            "Bounding box filter: minLon,minLat,maxLon,maxLat".to_string(),
        ),
        required: false,
        schema: SchemaNode::inline(Schema::array_of(Schema::number())),
    }
}

fn time_parameter() -> Parameter {
    Parameter {
        name: "time".to_string(),
        location: ParameterLocation::Query,
        description: Some("Temporal filter: instant or interval".to_string()),
        required: false,
        schema: SchemaNode::inline(Schema {
            format: Some("date-time".to_string()),
            ..Schema::string()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CollectionEntry, MemoryCatalog};
    use crate::codec;

    struct FixedLimits(Option<i64>);

    impl LimitsView for FixedLimits {
        fn max_features(&self) -> Option<i64> {
            self.0
        }
    }

    fn sample_catalog() -> MemoryCatalog {
        MemoryCatalog::new(vec![
            CollectionEntry::new("ns1", "A"),
            CollectionEntry::new("ns1", "B"),
            CollectionEntry::new("ns2", "C"),
        ])
    }

    const BASE: &str = "http://localhost:8080/ogc/features";

    fn build_sample(max: i64) -> CapabilityDocument {
        build(&sample_catalog(), &FixedLimits(Some(max)), None, BASE).unwrap()
    }

    #[test]
    fn exactly_one_server_matching_base_url() {
        let doc = build_sample(1000);
        assert_eq!(doc.servers.len(), 1);
        assert_eq!(doc.servers[0].url, BASE);
    }

    #[test]
    fn scoped_build_qualifies_server_url() {
        let doc = build(&sample_catalog(), &FixedLimits(Some(10)), Some("ns1"), BASE).unwrap();
        assert_eq!(doc.servers[0].url, format!("{}/ns1", BASE));
    }

    #[test]
    fn path_topology_is_fixed() {
        let doc = build_sample(1000);
        let expected = [
            ("/", "getLandingPage"),
            ("/conformance", "getRequirementsClasses"),
            ("/collections", "describeCollections"),
            ("/collections/{collectionId}", "describeCollection"),
            ("/collections/{collectionId}/items", "getFeatures"),
            (
                "/collections/{collectionId}/items/{featureId}",
                "getFeature",
            ),
        ];
        assert_eq!(doc.paths.len(), expected.len());
        for (path, operation_id) in expected {
            let item = doc.paths.get(path).unwrap_or_else(|| panic!("missing {path}"));
            let get = item.get.as_ref().expect("GET operation");
            assert_eq!(get.operation_id, operation_id);
        }
    }

    #[test]
    fn topology_does_not_depend_on_catalog_contents() {
        let empty = MemoryCatalog::default();
        let doc = build(&empty, &FixedLimits(Some(10)), None, BASE).unwrap();
        assert_eq!(doc.paths.len(), 6);
        let collection_id = doc.components.parameters.get("collectionId").unwrap();
        match &collection_id.schema {
            SchemaNode::Inline(schema) => {
                assert_eq!(schema.enum_values.as_deref(), Some(&[][..]));
            }
            SchemaNode::Ref { .. } => panic!("collectionId schema should be inline"),
        }
    }

    #[test]
    fn get_features_references_shared_parameters_in_order() {
        let doc = build_sample(1000);
        let items = doc.paths.get("/collections/{collectionId}/items").unwrap();
        let refs: Vec<&str> = items
            .get
            .as_ref()
            .unwrap()
            .parameters
            .iter()
            .filter_map(|p| match p {
                ParameterOrRef::Ref { reference } => Some(reference.as_str()),
                ParameterOrRef::Item(_) => None,
            })
            .collect();
        assert_eq!(
            refs,
            vec![
                "#/components/parameters/collectionId",
                "#/components/parameters/limit",
                "#/components/parameters/bbox",
                "#/components/parameters/time",
            ]
        );
    }

    #[test]
    fn collection_id_enum_follows_catalog_order() {
        let doc = build_sample(1000);
        let param = doc.components.parameters.get("collectionId").unwrap();
        let SchemaNode::Inline(schema) = &param.schema else {
            panic!("collectionId schema should be inline");
        };
        let expected: Vec<String> = sample_catalog()
            .collections(None)
            .iter()
            .map(|c| c.external_id())
            .collect();
        assert_eq!(schema.enum_values.as_ref().unwrap(), &expected);
    }

    #[test]
    fn scoped_build_restricts_enumeration() {
        let doc = build(&sample_catalog(), &FixedLimits(Some(10)), Some("ns1"), BASE).unwrap();
        let param = doc.components.parameters.get("collectionId").unwrap();
        let SchemaNode::Inline(schema) = &param.schema else {
            panic!("collectionId schema should be inline");
        };
        assert_eq!(
            schema.enum_values.as_ref().unwrap(),
            &vec![codec::encode("ns1:A"), codec::encode("ns1:B")]
        );
    }

    #[test]
    fn limit_bounds_track_configuration() {
        for max in [500, 100] {
            let doc = build_sample(max);
            let param = doc.components.parameters.get("limit").unwrap();
            let SchemaNode::Inline(schema) = &param.schema else {
                panic!("limit schema should be inline");
            };
            assert_eq!(schema.minimum, Some(1));
            assert_eq!(schema.maximum, Some(max));
            assert_eq!(schema.default, Some(json!(max)));
        }
    }

    #[test]
    fn missing_or_nonpositive_max_features_fails() {
        for limits in [FixedLimits(None), FixedLimits(Some(0)), FixedLimits(Some(-5))] {
            let err = build(&sample_catalog(), &limits, None, BASE).unwrap_err();
            assert!(matches!(err, AppError::InvalidServiceConfig(_)));
        }
    }

    #[test]
    fn identical_snapshots_build_identical_documents() {
        let a = build_sample(1000);
        let b = build_sample(1000);
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_vec(&a).unwrap(),
            serde_json::to_vec(&b).unwrap()
        );
    }
}
