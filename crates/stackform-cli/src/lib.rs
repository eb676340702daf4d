//! Stackform CLI: loads the service description, runs the compiler
//! pipeline, and writes the resulting template document.

pub mod cli;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use stackform_config::ServiceConfig;
use stackform_core::{DeployContext, PipelineRunner, TemplateDocument};
use stackform_gateway::default_compilers;

/// Initialize tracing from `STACKFORM_LOG` (or `RUST_LOG`), defaulting
/// to `info`.
pub fn init_tracing() {
    let filter = std::env::var("STACKFORM_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

/// Compile one service description into a template document.
pub async fn compile_template(
    config_path: &Path,
    stage: Option<String>,
    region: Option<String>,
) -> Result<TemplateDocument> {
    let config = ServiceConfig::load(config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;

    let mut ctx = DeployContext::new(&config);
    if let Some(stage) = stage {
        ctx = ctx.with_stage(stage);
    }
    if let Some(region) = region {
        ctx = ctx.with_region(region);
    }
    tracing::info!(
        service = %ctx.service,
        stage = %ctx.stage,
        region = %ctx.region,
        trace_id = %ctx.trace_id,
        "compiling template"
    );

    let runner = PipelineRunner::new(default_compilers());
    let mut template = TemplateDocument::new();
    let reports = runner.run(&ctx, &mut template).await?;

    for report in &reports {
        tracing::info!(
            compiler = %report.id,
            resources_added = report.resources_added,
            latency_ms = report.latency_ms,
            "compiler finished"
        );
    }
    tracing::info!(
        pipeline = %runner.pipeline_id(),
        resources = template.resources.len(),
        "template compiled"
    );

    Ok(template)
}

/// `stackform compile`: compile and write the template to `output` (or
/// stdout when no path is given).
pub async fn compile(
    config_path: PathBuf,
    stage: Option<String>,
    region: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let template = compile_template(&config_path, stage, region).await?;
    let rendered = serde_json::to_string_pretty(&template)?;

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "template written");
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
