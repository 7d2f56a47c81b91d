//! Session manifest: the recording and the audio segments captured with it.
//!
//! ```json
//! {
//!   "recording": "raw.webm",
//!   "segments": [
//!     { "path": "tts/intro.mp3", "start_time_ms": 0, "duration_ms": 2000, "category": "narration" }
//!   ]
//! }
//! ```
//!
//! Relative paths are resolved against the manifest's directory.

use crate::error::{CliError, CliResult};
use clapboard::{AudioSegment, FinalizeRequest};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Session manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Raw screen recording, if one was captured
    #[serde(default)]
    pub recording: Option<PathBuf>,
    /// Audio segments in recording order
    #[serde(default)]
    pub segments: Vec<AudioSegment>,
}

impl Manifest {
    /// Parse manifest JSON, resolving relative paths against `base`.
    pub fn from_json(json: &str, base: &Path) -> Result<Self, serde_json::Error> {
        let mut manifest: Self = serde_json::from_str(json)?;
        manifest.resolve_paths(base);
        Ok(manifest)
    }

    /// Load a manifest file.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.is_file() {
            return Err(CliError::invalid_argument(format!(
                "Manifest not found: {}",
                path.display()
            )));
        }
        let json = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_json(&json, base).map_err(|e| CliError::manifest(path, e.to_string()))
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(recording) = self.recording.take() {
            self.recording = Some(resolve(base, recording));
        }
        for segment in &mut self.segments {
            segment.path = resolve(base, std::mem::take(&mut segment.path));
        }
    }

    /// Turn the manifest into a finalize request.
    #[must_use]
    pub fn into_request(self, output: PathBuf, work_dir: PathBuf) -> FinalizeRequest {
        let request = FinalizeRequest::new(output, work_dir).with_segments(self.segments);
        match self.recording {
            Some(recording) => request.with_recording(recording),
            None => request,
        }
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clapboard::SoundCategory;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "recording": "raw.webm",
        "segments": [
            {"path": "tts/n1.mp3", "start_time_ms": 0, "duration_ms": 2000, "category": "narration"},
            {"path": "/sounds/click.mp3", "start_time_ms": 2500, "duration_ms": 100, "category": "click"}
        ]
    }"#;

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let manifest = Manifest::from_json(SAMPLE, Path::new("/sessions/demo")).unwrap();
        assert_eq!(
            manifest.recording,
            Some(PathBuf::from("/sessions/demo/raw.webm"))
        );
        assert_eq!(
            manifest.segments[0].path,
            PathBuf::from("/sessions/demo/tts/n1.mp3")
        );
        assert_eq!(manifest.segments[1].path, PathBuf::from("/sounds/click.mp3"));
        assert_eq!(manifest.segments[1].category, SoundCategory::Click);
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = Manifest::from_json("{}", Path::new("")).unwrap();
        assert_eq!(manifest, Manifest::default());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let json = r#"{"segments":[{"path":"a.mp3","start_time_ms":0,"duration_ms":1,"category":"whoosh"}]}"#;
        let err = Manifest::from_json(json, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("Unknown sound category: whoosh"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Manifest::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, CliError::InvalidArgument { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Manifest::load(&path).unwrap_err();
        assert!(matches!(err, CliError::Manifest { .. }));
    }

    #[test]
    fn test_into_request() {
        let manifest = Manifest::from_json(SAMPLE, Path::new("/s")).unwrap();
        let request = manifest.into_request("/out/final.mp4".into(), "/out/.work".into());
        assert_eq!(request.recording, Some(PathBuf::from("/s/raw.webm")));
        assert_eq!(request.segments.len(), 2);
        assert_eq!(request.work_dir, PathBuf::from("/out/.work"));
    }
}
