use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::services::{DocumentCollections, DocumentStoreConfig, DEFAULT_PAGE_SIZE};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub geo: GeoSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    pub database_id: String,
    pub page_size: Option<usize>,
    pub timeout_secs: Option<u64>,
}

impl StoreSettings {
    pub fn to_client_config(&self) -> DocumentStoreConfig {
        DocumentStoreConfig {
            endpoint: self.endpoint.clone(),
            api_key: self.api_key.clone(),
            project_id: self.project_id.clone(),
            database_id: self.database_id.clone(),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(30)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_memories_collection")]
    pub memories: String,
}

impl From<&CollectionSettings> for DocumentCollections {
    fn from(settings: &CollectionSettings) -> Self {
        Self {
            memories: settings.memories.clone(),
        }
    }
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            memories: default_memories_collection(),
        }
    }
}

fn default_memories_collection() -> String { "memories".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeoSettings {
    /// Upper bound applied to requested search radii
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
    #[serde(default = "default_bounding_box_prefilter")]
    pub bounding_box_prefilter: bool,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            max_radius_km: default_max_radius_km(),
            bounding_box_prefilter: default_bounding_box_prefilter(),
        }
    }
}

// Half the earth's circumference: every point on the globe
fn default_max_radius_km() -> f64 { 20_015.0 }
fn default_bounding_box_prefilter() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LONO)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., LONO__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("LONO")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
