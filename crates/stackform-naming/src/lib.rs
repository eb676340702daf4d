//! Deterministic logical ids and derived names for emitted resources.
//!
//! Same semantic resource kind + same compilation context ⇒ same id, so
//! recompiling a service yields an identical template. Ids carry no
//! timestamps or randomness.

/// Name resolver for one service/stage compilation.
#[derive(Debug, Clone)]
pub struct Naming {
    service: String,
    stage: String,
}

impl Naming {
    pub fn new(service: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            stage: stage.into(),
        }
    }

    pub fn rest_api_logical_id(&self) -> &'static str {
        "ApiGatewayRestApi"
    }

    pub fn deployment_logical_id(&self) -> &'static str {
        "ApiGatewayDeployment"
    }

    pub fn stage_logical_id(&self) -> &'static str {
        "ApiGatewayStage"
    }

    pub fn account_logical_id(&self) -> &'static str {
        "ApiGatewayAccount"
    }

    pub fn logs_role_logical_id(&self) -> &'static str {
        "ApiGatewayLogsRole"
    }

    pub fn log_group_logical_id(&self) -> &'static str {
        "ApiGatewayLogGroup"
    }

    pub fn service_endpoint_output_id(&self) -> &'static str {
        "ServiceEndpoint"
    }

    /// Physical name of the REST API: `{stage}-{service}`.
    pub fn api_gateway_name(&self) -> String {
        format!("{}-{}", self.stage, self.service)
    }

    /// Physical name of the gateway's execution log group:
    /// `/aws/api-gateway/{service}-{stage}`.
    pub fn log_group_name(&self) -> String {
        format!("/aws/api-gateway/{}-{}", self.service, self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logical_ids_are_unique() {
        let naming = Naming::new("my-service", "dev");
        let ids = [
            naming.rest_api_logical_id(),
            naming.deployment_logical_id(),
            naming.stage_logical_id(),
            naming.account_logical_id(),
            naming.logs_role_logical_id(),
            naming.log_group_logical_id(),
        ];

        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_log_group_name() {
        let naming = Naming::new("my-service", "dev");
        assert_eq!(naming.log_group_name(), "/aws/api-gateway/my-service-dev");
    }

    #[test]
    fn test_api_gateway_name() {
        let naming = Naming::new("my-service", "dev");
        assert_eq!(naming.api_gateway_name(), "dev-my-service");
    }
}
