//! REST API resource.
use async_trait::async_trait;
use serde_json::json;

use stackform_core::{CompileError, DeployContext, ResourceCompiler, TemplateDocument};
use stackform_naming::Naming;

/// Emits the REST API resource every other gateway compiler references.
pub struct RestApiCompiler;

#[async_trait]
impl ResourceCompiler for RestApiCompiler {
    fn id(&self) -> &'static str {
        "gateway.rest_api.v1"
    }

    fn writes(&self, ctx: &DeployContext) -> Vec<String> {
        let naming = Naming::new(&ctx.service, &ctx.stage);
        vec![naming.rest_api_logical_id().to_string()]
    }

    async fn compile(
        &self,
        ctx: &DeployContext,
        template: &mut TemplateDocument,
    ) -> Result<(), CompileError> {
        let naming = Naming::new(&ctx.service, &ctx.stage);

        template.insert_resource(
            naming.rest_api_logical_id(),
            json!({
                "Type": "AWS::ApiGateway::RestApi",
                "Properties": {
                    "Name": naming.api_gateway_name(),
                    "EndpointConfiguration": {
                        "Types": ["EDGE"],
                    },
                },
            }),
        );

        Ok(())
    }
}
