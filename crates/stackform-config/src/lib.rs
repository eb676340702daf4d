//! Service configuration: the declarative deployment description.
//!
//! The configuration arrives pre-validated from the surrounding tooling;
//! this crate only gives it a typed shape and safe defaults. Tag
//! mappings keep their declaration order because the downstream merge
//! step emits them as an ordered sequence.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

/// Stage used when the provider block leaves it unset.
pub const DEFAULT_STAGE: &str = "dev";

/// Region used when the provider block leaves it unset.
pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("READ/{path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("PARSE/{0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Top-level service description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service: String,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Provider block: stage/region plus the feature toggles the gateway
/// compilers read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub tracing: Option<TracingConfig>,
    #[serde(default)]
    pub api_gateway: Option<ApiGatewayConfig>,
    #[serde(default)]
    pub stack_tags: Option<Map<String, Value>>,
    #[serde(default)]
    pub tags: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracingConfig {
    #[serde(default)]
    pub api_gateway: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayConfig {
    #[serde(default)]
    pub logs: bool,
}

impl ServiceConfig {
    /// Parse a service description from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a service description from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(service = %config.service, path = %path.display(), "loaded service configuration");
        Ok(config)
    }
}

impl ProviderConfig {
    pub fn stage(&self) -> &str {
        self.stage.as_deref().unwrap_or(DEFAULT_STAGE)
    }

    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// Absent tracing config counts as disabled.
    pub fn tracing_enabled(&self) -> bool {
        self.tracing.as_ref().map(|t| t.api_gateway).unwrap_or(false)
    }

    /// Absent API gateway config counts as logs disabled.
    pub fn logs_enabled(&self) -> bool {
        self.api_gateway.as_ref().map(|g| g.logs).unwrap_or(false)
    }
}
