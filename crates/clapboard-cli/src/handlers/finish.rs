//! `finish` command handler: the full detect, trim, mix and mux run.

use crate::commands::{FinishArgs, OutputFormat};
use crate::config::CliConfig;
use crate::error::CliResult;
use crate::manifest::Manifest;
use clapboard::{
    Delivery, FinalizeReport, FinalizeRequest, MediaTool, SyncCoordinator, SyncOutcome, SystemTool,
};
use std::path::{Path, PathBuf};

/// Work directory name used when `--work-dir` is not given
pub const DEFAULT_WORK_DIR: &str = ".clapboard-work";

/// `<output dir>/.clapboard-work`
#[must_use]
pub fn default_work_dir(output: &Path) -> PathBuf {
    output
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_WORK_DIR)
}

/// Execute the finish command.
pub async fn execute_finish(config: &CliConfig, args: &FinishArgs) -> CliResult<()> {
    let manifest = Manifest::load(&args.manifest)?;
    let work_dir = args
        .work_dir
        .clone()
        .unwrap_or_else(|| default_work_dir(&args.output));
    let request = manifest.into_request(args.output.clone(), work_dir);

    let tool = SystemTool::new();
    let report = run_finish(&tool, config, &request).await?;
    match args.format {
        OutputFormat::Text => {
            if !config.verbosity.is_quiet() {
                print!("{}", render_finish_report(&report));
            }
        }
        OutputFormat::Json => println!("{}", super::to_json(&report)?),
    }
    Ok(())
}

async fn run_finish(
    tool: &dyn MediaTool,
    config: &CliConfig,
    request: &FinalizeRequest,
) -> CliResult<FinalizeReport> {
    let coordinator = SyncCoordinator::new(tool, &config.engine);
    Ok(coordinator.finalize(request).await?)
}

/// Render a finalize report as text.
#[must_use]
pub fn render_finish_report(report: &FinalizeReport) -> String {
    let mut out = String::new();
    match &report.sync {
        SyncOutcome::MarkerFound(plan) => out.push_str(&format!(
            "Sync: marker found, trimmed {} frames ({:.3}ms)\n",
            plan.frames_to_trim, plan.trim_duration_ms
        )),
        SyncOutcome::MarkerAbsent => {
            out.push_str("Sync: marker not found, video delivered untrimmed\n");
        }
        SyncOutcome::NoVideo => out.push_str("Sync: no recording\n"),
    }
    out.push_str(&format!("Audio offset: {:.3}ms\n", report.audio_offset_ms));
    match &report.mixed_audio {
        Some(path) => out.push_str(&format!(
            "Audio: {} segments mixed into {}\n",
            report.segment_count,
            path.display()
        )),
        None => out.push_str("Audio: none\n"),
    }
    let delivery = match report.delivery {
        Delivery::Muxed => "video + audio muxed",
        Delivery::VideoCopied => "trimmed video copied",
        Delivery::VideoTranscoded => "recording transcoded",
    };
    out.push_str(&format!("Output: {} ({delivery})\n", report.output.display()));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use clapboard::{AudioSegment, ClapboardError, MockTool, SoundCategory};
    use tempfile::TempDir;

    #[test]
    fn test_default_work_dir() {
        assert_eq!(
            default_work_dir(Path::new("/out/final.mp4")),
            PathBuf::from("/out/.clapboard-work")
        );
        assert_eq!(
            default_work_dir(Path::new("final.mp4")),
            PathBuf::from(".clapboard-work")
        );
    }

    #[tokio::test]
    async fn test_finish_without_marker_muxes_untrimmed() {
        let dir = TempDir::new().unwrap();
        let recording = dir.path().join("raw.webm");
        std::fs::write(&recording, b"webm").unwrap();
        let output = dir.path().join("out/final.mp4");
        let request = FinalizeRequest::new(&output, dir.path().join("work"))
            .with_recording(&recording)
            .with_segments(vec![AudioSegment::new(
                "/tts/n1.mp3",
                0,
                1500,
                SoundCategory::Narration,
            )]);
        let tool = MockTool::new().with_stdout("ffprobe", "30/1");

        let report = run_finish(&tool, &CliConfig::new(), &request).await.unwrap();

        assert_eq!(report.sync, SyncOutcome::MarkerAbsent);
        assert_eq!(report.delivery, Delivery::Muxed);
        assert_eq!(report.segment_count, 1);
        let text = render_finish_report(&report);
        assert!(text.contains("Sync: marker not found"));
        assert!(text.contains("Audio offset: 0.000ms"));
        assert!(text.contains("(video + audio muxed)"));
    }

    #[tokio::test]
    async fn test_finish_without_recording() {
        let dir = TempDir::new().unwrap();
        let request = FinalizeRequest::new(dir.path().join("final.mp4"), dir.path().join("work"));
        let tool = MockTool::new();
        let err = run_finish(&tool, &CliConfig::new(), &request).await.unwrap_err();
        assert!(matches!(err, CliError::Engine(ClapboardError::NothingToFinalize)));
    }
}
