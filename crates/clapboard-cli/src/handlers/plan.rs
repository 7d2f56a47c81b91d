//! `plan` command handler: show the mixdown without running ffmpeg.
//!
//! The mixdown is executed against a dry-run tool, so the printed command is
//! exactly what `compose` would run.

use crate::commands::PlanArgs;
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::manifest::Manifest;
use clapboard::{compose_mixdown, plan_mixdown, MixdownPlan, MockTool, ToolCommand};
use std::path::Path;

/// Execute the plan command.
pub async fn execute_plan(config: &CliConfig, args: &PlanArgs) -> CliResult<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let (plan, commands) = run_plan(config, &manifest, args.offset_ms, &args.output).await?;
    if config.verbosity.is_verbose() {
        print!("{}", render_plan(&plan));
    }
    for command in commands {
        println!("{command}");
    }
    Ok(())
}

async fn run_plan(
    config: &CliConfig,
    manifest: &Manifest,
    offset_ms: f64,
    output: &Path,
) -> CliResult<(MixdownPlan, Vec<ToolCommand>)> {
    let plan = plan_mixdown(&manifest.segments, offset_ms)?;
    let tool = MockTool::dry_run();
    compose_mixdown(&tool, &config.engine, &manifest.segments, offset_ms, output).await?;
    Ok((plan, tool.history()))
}

/// Render the track list of a mixdown plan.
#[must_use]
pub fn render_plan(plan: &MixdownPlan) -> String {
    let mut out = format!(
        "Mixdown: {} tracks, audio offset {:.3}ms\n",
        plan.tracks.len(),
        plan.audio_offset_ms
    );
    for (i, track) in plan.tracks.iter().enumerate() {
        out.push_str(&format!(
            "  [{i}] {:<18} {:>8}ms -> {:>8}ms  gain {}  {}\n",
            track.category.to_string(),
            track.original_start_ms,
            track.adjusted_start_ms,
            track.gain,
            track.path.display()
        ));
    }
    out
}
