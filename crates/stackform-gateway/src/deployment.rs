//! Deployment resource and the service endpoint output.
use async_trait::async_trait;
use serde_json::json;

use stackform_core::{intrinsics, CompileError, DeployContext, ResourceCompiler, TemplateDocument};
use stackform_naming::Naming;

/// Emits the Deployment resource pointing at the REST API.
///
/// The Deployment owns the `StageName` property until a dedicated Stage
/// resource subsumes it; in that case the stage compiler strips the
/// property from this resource.
pub struct DeploymentCompiler;

#[async_trait]
impl ResourceCompiler for DeploymentCompiler {
    fn id(&self) -> &'static str {
        "gateway.deployment.v1"
    }

    fn reads(&self, ctx: &DeployContext) -> Vec<String> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        vec![naming.rest_api_logical_id().to_string()]
    }

    fn writes(&self, ctx: &DeployContext) -> Vec<String> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        vec![naming.deployment_logical_id().to_string()]
    }

    async fn compile(
        &self,
        ctx: &DeployContext,
        template: &mut TemplateDocument,
    ) -> Result<(), CompileError> {
        let naming = Naming::new(&ctx.service, &ctx.stage);

        template.insert_resource(
            naming.deployment_logical_id(),
            json!({
                "Type": "AWS::ApiGateway::Deployment",
                "Properties": {
                    "RestApiId": intrinsics::reference(naming.rest_api_logical_id()),
                    "StageName": ctx.stage,
                },
            }),
        );

        template.insert_output(
            naming.service_endpoint_output_id(),
            json!({
                "Description": "URL of the service endpoint",
                "Value": intrinsics::join(
                    "",
                    vec![
                        json!("https://"),
                        intrinsics::reference(naming.rest_api_logical_id()),
                        json!(".execute-api."),
                        intrinsics::reference(intrinsics::REGION),
                        json!("."),
                        intrinsics::reference(intrinsics::URL_SUFFIX),
                        json!(format!("/{}", ctx.stage)),
                    ],
                ),
            }),
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackform_config::ServiceConfig;

    #[tokio::test]
    async fn test_deployment_owns_the_stage_name() {
        let config = ServiceConfig::from_yaml("service: my-service").unwrap();
        let ctx = DeployContext::new(&config);
        let mut template = TemplateDocument::new();

        DeploymentCompiler
            .compile(&ctx, &mut template)
            .await
            .unwrap();

        assert_eq!(
            template.resource("ApiGatewayDeployment").unwrap(),
            &json!({
                "Type": "AWS::ApiGateway::Deployment",
                "Properties": {
                    "RestApiId": { "Ref": "ApiGatewayRestApi" },
                    "StageName": "dev",
                },
            })
        );
    }

    #[tokio::test]
    async fn test_service_endpoint_output() {
        let config = ServiceConfig::from_yaml("service: my-service").unwrap();
        let ctx = DeployContext::new(&config);
        let mut template = TemplateDocument::new();

        DeploymentCompiler
            .compile(&ctx, &mut template)
            .await
            .unwrap();

        assert_eq!(
            template.outputs.get("ServiceEndpoint").unwrap(),
            &json!({
                "Description": "URL of the service endpoint",
                "Value": {
                    "Fn::Join": ["", [
                        "https://",
                        { "Ref": "ApiGatewayRestApi" },
                        ".execute-api.",
                        { "Ref": "AWS::Region" },
                        ".",
                        { "Ref": "AWS::URLSuffix" },
                        "/dev",
                    ]],
                },
            })
        );
    }
}
