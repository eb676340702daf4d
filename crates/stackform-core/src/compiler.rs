//! Compiler Trait: single contract for all feature compilers
use async_trait::async_trait;

use crate::context::DeployContext;
use crate::error::CompileError;
use crate::template::TemplateDocument;

/// One feature compiler in the template pipeline.
///
/// Compilers run sequentially under the `PipelineRunner`; each reads the
/// deploy context and patches the shared template in place. The async
/// signature exists so sibling compilers compose uniformly under the
/// driver: no compiler in this workspace performs real I/O, and a
/// `compile` call resolves as soon as its synchronous mutations have
/// been applied.
#[async_trait]
pub trait ResourceCompiler: Send + Sync {
    /// Unique compiler id (e.g. "gateway.stage.v1")
    fn id(&self) -> &'static str;

    /// Logical ids this compiler expects to already exist.
    ///
    /// Purely declarative; the runner logs when a declared input is
    /// missing so cross-compiler ordering bugs surface early.
    fn reads(&self, _ctx: &DeployContext) -> Vec<String> {
        Vec::new()
    }

    /// Logical ids this compiler may insert or patch.
    fn writes(&self, _ctx: &DeployContext) -> Vec<String> {
        Vec::new()
    }

    /// Apply this compiler's mutations to the shared template.
    async fn compile(
        &self,
        ctx: &DeployContext,
        template: &mut TemplateDocument,
    ) -> Result<(), CompileError>;
}
