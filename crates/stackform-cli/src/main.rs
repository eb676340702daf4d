//! Binary entrypoint for the stackform compiler.
use anyhow::Result;
use clap::Parser;
use stackform_cli::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    stackform_cli::init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compile {
            config,
            stage,
            region,
            output,
        } => stackform_cli::compile(config, stage, region, output).await,
    }
}
