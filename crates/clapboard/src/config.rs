//! Engine configuration.
//!
//! Every field has a default, so an empty YAML document (or no file at all)
//! yields the stock pipeline: `ffmpeg`/`ffprobe` from `PATH`, a magenta
//! marker, a 60-frame scan and H.264/AAC output.

use crate::result::{ClapboardError, ClapboardResult};
use crate::sync::MarkerSpec;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of leading frames scanned for the marker
pub const DEFAULT_SCAN_FRAMES: u32 = 60;

/// Encoder settings shared by trim, transcode and mux.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeSettings {
    /// Video codec (`-c:v`)
    pub video_codec: String,
    /// Encoder preset (`-preset`)
    pub preset: String,
    /// Constant rate factor (`-crf`)
    pub crf: u8,
    /// Audio codec used when muxing (`-c:a`)
    pub audio_codec: String,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            preset: "fast".to_string(),
            crf: 23,
            audio_codec: "aac".to_string(),
        }
    }
}

impl EncodeSettings {
    /// `-c:v <codec> -preset <preset> -crf <crf>`
    #[must_use]
    pub fn video_args(&self) -> Vec<String> {
        vec![
            "-c:v".to_string(),
            self.video_codec.clone(),
            "-preset".to_string(),
            self.preset.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
        ]
    }
}

/// Tunables for the whole engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// ffmpeg binary name or path
    pub ffmpeg: String,
    /// ffprobe binary name or path
    pub ffprobe: String,
    /// Marker color and thresholds
    pub marker: MarkerSpec,
    /// Leading frames extracted for marker detection
    pub scan_frames: u32,
    /// Output encoder settings
    pub encode: EncodeSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            marker: MarkerSpec::default(),
            scan_frames: DEFAULT_SCAN_FRAMES,
            encode: EncodeSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ffmpeg binary
    #[must_use]
    pub fn with_ffmpeg(mut self, ffmpeg: impl Into<String>) -> Self {
        self.ffmpeg = ffmpeg.into();
        self
    }

    /// Set the ffprobe binary
    #[must_use]
    pub fn with_ffprobe(mut self, ffprobe: impl Into<String>) -> Self {
        self.ffprobe = ffprobe.into();
        self
    }

    /// Set the marker color and thresholds
    #[must_use]
    pub const fn with_marker(mut self, marker: MarkerSpec) -> Self {
        self.marker = marker;
        self
    }

    /// Set how many leading frames are scanned
    #[must_use]
    pub const fn with_scan_frames(mut self, scan_frames: u32) -> Self {
        self.scan_frames = scan_frames;
        self
    }

    /// Set the encoder settings
    #[must_use]
    pub fn with_encode(mut self, encode: EncodeSettings) -> Self {
        self.encode = encode;
        self
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::Config` if the YAML is invalid or a value is
    /// out of range.
    pub fn from_yaml_str(yaml: &str) -> ClapboardResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml).map_err(|e| ClapboardError::config(e.to_string()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::Config` if the file cannot be read or parsed.
    pub fn from_yaml_file(path: &Path) -> ClapboardResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            ClapboardError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::Config` if serialization fails
    pub fn to_yaml(&self) -> ClapboardResult<String> {
        serde_yaml_ng::to_string(self).map_err(|e| ClapboardError::config(e.to_string()))
    }

    /// Reject values that would make detection meaningless.
    ///
    /// # Errors
    ///
    /// Returns `ClapboardError::Config` naming the offending field.
    pub fn validate(&self) -> ClapboardResult<()> {
        if self.ffmpeg.trim().is_empty() {
            return Err(ClapboardError::config("ffmpeg must not be empty"));
        }
        if self.ffprobe.trim().is_empty() {
            return Err(ClapboardError::config("ffprobe must not be empty"));
        }
        if self.scan_frames == 0 {
            return Err(ClapboardError::config("scan_frames must be at least 1"));
        }
        if !(self.marker.min_ratio > 0.0 && self.marker.min_ratio <= 1.0) {
            return Err(ClapboardError::config("marker.min_ratio must be in (0, 1]"));
        }
        Ok(())
    }
}
