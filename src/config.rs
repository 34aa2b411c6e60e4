use serde::Deserialize;
use std::sync::Arc;

use crate::catalog::CollectionEntry;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub features: FeaturesConfig,
    /// Collections served at startup. The catalog can be mutated afterwards
    /// through the admin interface of `MemoryCatalog`.
    #[serde(default)]
    pub collections: Vec<CollectionEntry>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeaturesConfig {
    /// Upper bound and default for the `limit` query parameter.
    #[serde(default = "default_max_features")]
    pub max_features: i64,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
        }
    }
}

fn default_max_features() -> i64 {
    10_000
}

/// Read-only view of the service limits consulted on every capability
/// document build. Implemented by `FeaturesConfig`; tests supply their own.
pub trait LimitsView: Send + Sync {
    fn max_features(&self) -> Option<i64>;
}

impl LimitsView for FeaturesConfig {
    fn max_features(&self) -> Option<i64> {
        Some(self.max_features)
    }
}

impl Config {
    pub fn load() -> Result<Arc<Self>, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(
                config::Environment::with_prefix("GEOGATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Config = config.try_deserialize()?;
        Ok(Arc::new(settings))
    }
}
