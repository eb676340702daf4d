//! Pipeline Runner: chains feature compilers over one shared template
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Instant;

use crate::compiler::ResourceCompiler;
use crate::context::DeployContext;
use crate::error::CompileError;
use crate::template::TemplateDocument;

pub struct PipelineRunner {
    compilers: Vec<Box<dyn ResourceCompiler>>,
    pipeline_id: String,
}

/// Per-compiler record of what one pipeline step did to the template.
#[derive(Debug, Clone, Serialize)]
pub struct CompilerReport {
    pub id: String,
    pub in_fingerprint: String,
    pub out_fingerprint: String,
    pub resources_added: usize,
    pub latency_ms: u64,
    pub finished_at: DateTime<Utc>,
}

impl PipelineRunner {
    pub fn new(compilers: Vec<Box<dyn ResourceCompiler>>) -> Self {
        let pipeline_id = compilers
            .iter()
            .map(|c| c.id().split('.').nth(1).unwrap_or("?"))
            .collect::<Vec<_>>()
            .join("→");

        Self {
            compilers,
            pipeline_id,
        }
    }

    /// Run every compiler in order against the shared template.
    ///
    /// Exactly one compiler mutates the document at a time; there is no
    /// concurrent mutation within a run.
    pub async fn run(
        &self,
        ctx: &DeployContext,
        template: &mut TemplateDocument,
    ) -> Result<Vec<CompilerReport>, CompileError> {
        let mut reports = Vec::new();

        for compiler in &self.compilers {
            let start = Instant::now();
            let in_fingerprint = template.fingerprint()?;

            for logical_id in compiler.reads(ctx) {
                if !template.has_resource(&logical_id) {
                    tracing::warn!(
                        compiler = compiler.id(),
                        logical_id = %logical_id,
                        "declared input resource missing from template"
                    );
                }
            }

            let resources_before = template.resources.len();
            compiler.compile(ctx, template).await?;

            let report = CompilerReport {
                id: compiler.id().to_string(),
                in_fingerprint,
                out_fingerprint: template.fingerprint()?,
                resources_added: template.resources.len().saturating_sub(resources_before),
                latency_ms: start.elapsed().as_millis() as u64,
                finished_at: Utc::now(),
            };
            tracing::debug!(
                compiler = %report.id,
                resources_added = report.resources_added,
                "compiler finished"
            );
            reports.push(report);
        }

        Ok(reports)
    }

    pub fn pipeline_id(&self) -> &str {
        &self.pipeline_id
    }
}
