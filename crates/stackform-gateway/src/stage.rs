//! Stage resource synthesis.
//!
//! Decides whether the deployment needs a dedicated Stage resource,
//! builds it together with its logging bundle, and retracts the
//! Deployment resource's `StageName` once the Stage owns that binding.

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use stackform_core::{intrinsics, CompileError, DeployContext, ResourceCompiler, TemplateDocument};
use stackform_naming::Naming;

use crate::tags::{merge_tags, TagEntry};

/// Access log line: one `name: $context.*` token per field, in request
/// order, comma separated. Part of the wire contract; do not reword.
const ACCESS_LOG_FORMAT: &str = "requestId: $context.requestId, \
ip: $context.identity.sourceIp, \
caller: $context.identity.caller, \
user: $context.identity.user, \
requestTime: $context.requestTime, \
httpMethod: $context.httpMethod, \
resourcePath: $context.resourcePath, \
status: $context.status, \
protocol: $context.protocol, \
responseLength: $context.responseLength";

/// Managed policy that lets the gateway push execution logs.
const LOGS_MANAGED_POLICY_ARN: &str =
    "arn:aws:iam::aws:policy/service-role/AmazonAPIGatewayPushToCloudWatchLogs";

/// Trailing token of the logs role name, identifying its purpose.
const LOGS_ROLE_SUFFIX: &str = "apiGatewayLogsRole";

/// Read-only view over the provider configuration for one stage.
#[derive(Debug, Clone)]
pub struct StageSettings {
    pub stage_name: String,
    pub tracing_enabled: bool,
    pub logs_enabled: bool,
    pub stack_tags: Option<Map<String, Value>>,
    pub tags: Option<Map<String, Value>>,
}

impl StageSettings {
    pub fn from_context(ctx: &DeployContext) -> Self {
        Self {
            stage_name: ctx.stage.clone(),
            tracing_enabled: ctx.provider.tracing_enabled(),
            logs_enabled: ctx.provider.logs_enabled(),
            stack_tags: ctx.provider.stack_tags.clone(),
            tags: ctx.provider.tags.clone(),
        }
    }
}

/// What makes a dedicated Stage resource necessary.
///
/// The triggers are independent; any one of them firing moves ownership
/// of the stage-name binding from the Deployment to a Stage resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageTrigger {
    Tracing,
    Tags,
    Logs,
}

impl StageTrigger {
    const ALL: [StageTrigger; 3] = [Self::Tracing, Self::Tags, Self::Logs];

    fn fires(self, settings: &StageSettings, merged_tags: &[TagEntry]) -> bool {
        match self {
            Self::Tracing => settings.tracing_enabled,
            Self::Tags => !merged_tags.is_empty(),
            Self::Logs => settings.logs_enabled,
        }
    }

    /// The triggers that fire for this configuration, in table order.
    pub fn active(settings: &StageSettings, merged_tags: &[TagEntry]) -> Vec<StageTrigger> {
        Self::ALL
            .into_iter()
            .filter(|trigger| trigger.fires(settings, merged_tags))
            .collect()
    }
}

/// The stage resource synthesizer.
///
/// Requires the Deployment compiler to have run first: when a Stage
/// resource is emitted, the Deployment resource's `StageName` property
/// is stripped in the same call, so the two mutations can never be
/// observed apart.
pub struct StageCompiler;

#[async_trait]
impl ResourceCompiler for StageCompiler {
    fn id(&self) -> &'static str {
        "gateway.stage.v1"
    }

    fn reads(&self, ctx: &DeployContext) -> Vec<String> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        vec![
            naming.rest_api_logical_id().to_string(),
            naming.deployment_logical_id().to_string(),
        ]
    }

    fn writes(&self, ctx: &DeployContext) -> Vec<String> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        vec![
            naming.stage_logical_id().to_string(),
            naming.deployment_logical_id().to_string(),
            naming.log_group_logical_id().to_string(),
            naming.logs_role_logical_id().to_string(),
            naming.account_logical_id().to_string(),
        ]
    }

    async fn compile(
        &self,
        ctx: &DeployContext,
        template: &mut TemplateDocument,
    ) -> Result<(), CompileError> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        let settings = StageSettings::from_context(ctx);
        let merged_tags = merge_tags(settings.stack_tags.as_ref(), settings.tags.as_ref());

        let triggers = StageTrigger::active(&settings, &merged_tags);
        if triggers.is_empty() {
            tracing::debug!(
                compiler = self.id(),
                "no trigger fired, deployment keeps the stage name"
            );
            return Ok(());
        }
        tracing::debug!(compiler = self.id(), ?triggers, "emitting dedicated stage resource");

        let tags_value = serde_json::to_value(&merged_tags)
            .map_err(|e| CompileError::Serialize(e.to_string()))?;

        let mut properties = Map::new();
        properties.insert(
            "RestApiId".to_string(),
            intrinsics::reference(naming.rest_api_logical_id()),
        );
        properties.insert(
            "DeploymentId".to_string(),
            intrinsics::reference(naming.deployment_logical_id()),
        );
        properties.insert(
            "StageName".to_string(),
            Value::String(settings.stage_name.clone()),
        );
        properties.insert("Tags".to_string(), tags_value);
        properties.insert(
            "TracingEnabled".to_string(),
            Value::Bool(settings.tracing_enabled),
        );

        if settings.logs_enabled {
            properties.insert(
                "MethodSettings".to_string(),
                json!([{
                    "DataTraceEnabled": true,
                    "HttpMethod": "*",
                    "LoggingLevel": "INFO",
                    "ResourcePath": "/*",
                }]),
            );
            properties.insert(
                "AccessLogSetting".to_string(),
                json!({
                    "DestinationArn": intrinsics::get_att(naming.log_group_logical_id(), "Arn"),
                    "Format": ACCESS_LOG_FORMAT,
                }),
            );
            self.compile_logging_bundle(ctx, &naming, template);
        }

        template.insert_resource(
            naming.stage_logical_id(),
            json!({
                "Type": "AWS::ApiGateway::Stage",
                "Properties": properties,
            }),
        );

        // The Stage resource now owns the stage-name binding.
        template.strip_property(naming.deployment_logical_id(), "StageName");

        Ok(())
    }
}

impl StageCompiler {
    /// Log group, push-to-logs role, and the account-level registration
    /// wiring the role into the gateway service.
    fn compile_logging_bundle(
        &self,
        ctx: &DeployContext,
        naming: &Naming,
        template: &mut TemplateDocument,
    ) {
        template.insert_resource(
            naming.log_group_logical_id(),
            json!({
                "Type": "AWS::Logs::LogGroup",
                "Properties": {
                    "LogGroupName": naming.log_group_name(),
                },
            }),
        );

        template.insert_resource(
            naming.logs_role_logical_id(),
            json!({
                "Type": "AWS::IAM::Role",
                "Properties": {
                    "AssumeRolePolicyDocument": {
                        "Statement": [{
                            "Action": ["sts:AssumeRole"],
                            "Effect": "Allow",
                            "Principal": {
                                "Service": ["apigateway.amazonaws.com"],
                            },
                        }],
                        "Version": "2012-10-17",
                    },
                    "ManagedPolicyArns": [LOGS_MANAGED_POLICY_ARN],
                    "Path": "/",
                    "RoleName": intrinsics::join(
                        "-",
                        vec![
                            json!(ctx.service),
                            json!(ctx.stage),
                            intrinsics::reference(intrinsics::REGION),
                            json!(LOGS_ROLE_SUFFIX),
                        ],
                    ),
                },
            }),
        );

        template.insert_resource(
            naming.account_logical_id(),
            json!({
                "Type": "AWS::ApiGateway::Account",
                "Properties": {
                    "CloudWatchRoleArn": intrinsics::get_att(naming.logs_role_logical_id(), "Arn"),
                },
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackform_config::ServiceConfig;

    fn settings_for(yaml: &str) -> (StageSettings, Vec<TagEntry>) {
        let config = ServiceConfig::from_yaml(yaml).unwrap();
        let ctx = DeployContext::new(&config);
        let settings = StageSettings::from_context(&ctx);
        let merged = merge_tags(settings.stack_tags.as_ref(), settings.tags.as_ref());
        (settings, merged)
    }

    #[test]
    fn test_no_trigger_for_bare_config() {
        let (settings, merged) = settings_for("service: my-service");
        assert!(StageTrigger::active(&settings, &merged).is_empty());
    }

    #[test]
    fn test_each_trigger_fires_independently() {
        let (settings, merged) = settings_for(
            "service: my-service\nprovider:\n  tracing:\n    apiGateway: true",
        );
        assert_eq!(
            StageTrigger::active(&settings, &merged),
            vec![StageTrigger::Tracing]
        );

        let (settings, merged) =
            settings_for("service: my-service\nprovider:\n  tags:\n    foo: \"1\"");
        assert_eq!(
            StageTrigger::active(&settings, &merged),
            vec![StageTrigger::Tags]
        );

        let (settings, merged) =
            settings_for("service: my-service\nprovider:\n  apiGateway:\n    logs: true");
        assert_eq!(
            StageTrigger::active(&settings, &merged),
            vec![StageTrigger::Logs]
        );
    }

    #[test]
    fn test_access_log_format_token_order() {
        let field_order = [
            "requestId",
            "ip",
            "caller",
            "user",
            "requestTime",
            "httpMethod",
            "resourcePath",
            "status",
            "protocol",
            "responseLength",
        ];
        let tokens: Vec<&str> = ACCESS_LOG_FORMAT.split(", ").collect();
        assert_eq!(tokens.len(), field_order.len());
        for (token, field) in tokens.iter().zip(field_order) {
            assert!(token.starts_with(&format!("{field}: $context.")), "{token}");
        }
    }
}
