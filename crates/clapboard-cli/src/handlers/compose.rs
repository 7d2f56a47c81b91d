//! `compose` command handler: mix manifest segments into one track.

use crate::commands::ComposeArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::manifest::Manifest;
use clapboard::{compose_mixdown, MediaTool, SystemTool};
use std::path::{Path, PathBuf};

/// Execute the compose command.
pub async fn execute_compose(config: &CliConfig, args: &ComposeArgs) -> CliResult<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let tool = SystemTool::new();
    let mixed = run_compose(&tool, config, &manifest, args.offset_ms, &args.output).await?;
    if !config.verbosity.is_quiet() {
        println!(
            "Mixed {} segments into {}",
            manifest.segments.len(),
            mixed.display()
        );
    }
    Ok(())
}

async fn run_compose(
    tool: &dyn MediaTool,
    config: &CliConfig,
    manifest: &Manifest,
    offset_ms: f64,
    output: &Path,
) -> CliResult<PathBuf> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let mixed = compose_mixdown(tool, &config.engine, &manifest.segments, offset_ms, output).await?;
    Ok(mixed)
}
