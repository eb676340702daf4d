//! Deploy Context: read-only state shared across one pipeline run
use stackform_config::{ProviderConfig, ServiceConfig};

/// Constructed once per compilation from the validated service
/// configuration; never mutated while the pipeline runs.
#[derive(Debug, Clone)]
pub struct DeployContext {
    pub service: String,
    pub stage: String,
    pub region: String,
    pub trace_id: String,
    pub provider: ProviderConfig,
}

impl DeployContext {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            service: config.service.clone(),
            stage: config.provider.stage().to_string(),
            region: config.provider.region().to_string(),
            trace_id: uuid::Uuid::new_v4().to_string(),
            provider: config.provider.clone(),
        }
    }

    /// Override the deployment stage (CLI `--stage`).
    pub fn with_stage(mut self, stage: impl Into<String>) -> Self {
        self.stage = stage.into();
        self
    }

    /// Override the deployment region (CLI `--region`).
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolved_from_provider() {
        let config = ServiceConfig::from_yaml("service: my-service").unwrap();
        let ctx = DeployContext::new(&config);

        assert_eq!(ctx.service, "my-service");
        assert_eq!(ctx.stage, "dev");
        assert_eq!(ctx.region, "us-east-1");
        assert!(!ctx.trace_id.is_empty());
    }

    #[test]
    fn test_overrides_win() {
        let config = ServiceConfig::from_yaml("service: my-service").unwrap();
        let ctx = DeployContext::new(&config)
            .with_stage("prod")
            .with_region("eu-west-1");

        assert_eq!(ctx.stage, "prod");
        assert_eq!(ctx.region, "eu-west-1");
    }
}
