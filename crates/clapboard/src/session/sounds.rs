//! Resolving sound categories to clips on disk.
//!
//! Clips are produced ahead of time by an external generator and stored as
//! `<dir>/<category>.mp3`. A file below [`MIN_SOUND_BYTES`] is a failed
//! generation and is rejected rather than mixed as silence.

use crate::mixdown::SoundCategory;
use crate::probe::probe_audio_duration_ms;
use crate::result::{ClapboardError, ClapboardResult};
use crate::tool::MediaTool;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Smallest file size accepted as a real clip
pub const MIN_SOUND_BYTES: u64 = 1000;

/// A resolved clip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SoundClip {
    /// Clip file
    pub path: PathBuf,
    /// Clip length in milliseconds
    pub duration_ms: u64,
}

/// Anything that can hand out a clip per sound category.
#[async_trait]
pub trait SoundSource: Send + Sync {
    /// Resolve one category to a clip.
    async fn resolve(&self, category: SoundCategory) -> ClapboardResult<SoundClip>;
}

/// Directory of pre-generated clips, with a per-category duration cache.
pub struct SoundBank<'a> {
    dir: PathBuf,
    tool: &'a dyn MediaTool,
    ffprobe: String,
    cache: Mutex<HashMap<SoundCategory, SoundClip>>,
}

impl std::fmt::Debug for SoundBank<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundBank")
            .field("dir", &self.dir)
            .field("ffprobe", &self.ffprobe)
            .finish_non_exhaustive()
    }
}

impl<'a> SoundBank<'a> {
    /// Create a bank over `dir`, probing durations with `ffprobe`.
    #[must_use]
    pub fn new(
        dir: impl Into<PathBuf>,
        tool: &'a dyn MediaTool,
        ffprobe: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            tool,
            ffprobe: ffprobe.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Expected clip path for a category
    #[must_use]
    pub fn clip_path(&self, category: SoundCategory) -> PathBuf {
        self.dir.join(format!("{category}.mp3"))
    }

    /// Bank directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn cached(&self, category: SoundCategory) -> Option<SoundClip> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&category)
            .cloned()
    }
}

#[async_trait]
impl SoundSource for SoundBank<'_> {
    async fn resolve(&self, category: SoundCategory) -> ClapboardResult<SoundClip> {
        if let Some(clip) = self.cached(category) {
            return Ok(clip);
        }

        let path = self.clip_path(category);
        let unavailable = || ClapboardError::SoundUnavailable {
            category: category.to_string(),
            path: path.display().to_string(),
        };
        let size = match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => return Err(unavailable()),
        };
        if size < MIN_SOUND_BYTES {
            tracing::warn!(%category, size, "Sound clip too small, treating as missing");
            return Err(unavailable());
        }

        let duration_ms = probe_audio_duration_ms(self.tool, &self.ffprobe, &path).await?;
        let clip = SoundClip { path, duration_ms };
        tracing::debug!(%category, duration_ms, "Resolved sound clip");

        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(category, clip.clone());
        Ok(clip)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::tool::MockTool;
    use tempfile::TempDir;

    fn write_clip(dir: &Path, name: &str, bytes: usize) {
        std::fs::write(dir.join(name), vec![0u8; bytes]).unwrap();
    }

    #[tokio::test]
    async fn test_resolves_and_caches() {
        let dir = TempDir::new().unwrap();
        write_clip(dir.path(), "click.mp3", 4096);
        let tool = MockTool::dry_run().with_stdout("ffprobe", "0.120\n");
        let bank = SoundBank::new(dir.path(), &tool, "ffprobe");

        let clip = bank.resolve(SoundCategory::Click).await.unwrap();
        assert_eq!(clip.duration_ms, 120);
        assert_eq!(clip.path, dir.path().join("click.mp3"));

        let again = bank.resolve(SoundCategory::Click).await.unwrap();
        assert_eq!(again, clip);
        assert_eq!(tool.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_clip() {
        let dir = TempDir::new().unwrap();
        let tool = MockTool::dry_run();
        let bank = SoundBank::new(dir.path(), &tool, "ffprobe");
        let err = bank.resolve(SoundCategory::KeypressReturn).await.unwrap_err();
        match err {
            ClapboardError::SoundUnavailable { category, path } => {
                assert_eq!(category, "keypress-return");
                assert!(path.ends_with("keypress-return.mp3"));
            }
            other => panic!("expected SoundUnavailable, got {other:?}"),
        }
        assert_eq!(tool.call_count(), 0);
    }

    #[tokio::test]
    async fn test_tiny_clip_rejected() {
        let dir = TempDir::new().unwrap();
        write_clip(dir.path(), "click.mp3", 999);
        let tool = MockTool::dry_run();
        let bank = SoundBank::new(dir.path(), &tool, "ffprobe");
        assert!(matches!(
            bank.resolve(SoundCategory::Click).await,
            Err(ClapboardError::SoundUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_threshold_is_inclusive() {
        let dir = TempDir::new().unwrap();
        write_clip(dir.path(), "keypress.mp3", 1000);
        let tool = MockTool::dry_run().with_stdout("ffprobe", "0.05");
        let bank = SoundBank::new(dir.path(), &tool, "ffprobe");
        assert_eq!(
            bank.resolve(SoundCategory::Keypress).await.unwrap().duration_ms,
            50
        );
    }

    #[tokio::test]
    async fn test_probe_failure_propagates() {
        let dir = TempDir::new().unwrap();
        write_clip(dir.path(), "click.mp3", 2048);
        let tool = MockTool::dry_run().fail_on("ffprobe", "Invalid data");
        let bank = SoundBank::new(dir.path(), &tool, "ffprobe");
        assert!(bank.resolve(SoundCategory::Click).await.unwrap_err().is_tool_error());
    }
}
