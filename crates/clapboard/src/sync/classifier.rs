//! Marker-color classification of a single extracted frame.
//!
//! Frames arrive as binary PPM (P6): three text header lines followed by
//! packed RGB triplets. Classification is a pure function of the bytes.

use serde::{Deserialize, Serialize};

/// Target color and acceptance thresholds for the sync marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSpec {
    /// Target red channel
    pub red: u8,
    /// Target green channel
    pub green: u8,
    /// Target blue channel
    pub blue: u8,
    /// Per-channel distance that still counts as a match (exclusive)
    pub tolerance: u8,
    /// Fraction of matching pixels needed to call the frame a marker
    pub min_ratio: f64,
}

impl Default for MarkerSpec {
    fn default() -> Self {
        Self {
            red: 255,
            green: 0,
            blue: 255,
            tolerance: 30,
            min_ratio: 0.8,
        }
    }
}

impl MarkerSpec {
    /// Whether one RGB pixel is close enough to the marker color.
    #[must_use]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        let tol = self.tolerance;
        r.abs_diff(self.red) < tol && g.abs_diff(self.green) < tol && b.abs_diff(self.blue) < tol
    }
}

/// Pixel bytes of a PPM frame.
///
/// Skips the three newline-terminated header lines. With fewer than three
/// newlines the whole buffer is returned.
#[must_use]
pub fn pixel_data(frame: &[u8]) -> &[u8] {
    let mut newlines = 0;
    for (i, &byte) in frame.iter().enumerate() {
        if byte == b'\n' {
            newlines += 1;
            if newlines == 3 {
                return &frame[i + 1..];
            }
        }
    }
    frame
}

/// Fraction of pixels matching the marker color, `None` for an empty frame.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn match_ratio(frame: &[u8], spec: &MarkerSpec) -> Option<f64> {
    let pixels = pixel_data(frame).chunks_exact(3);
    let total = pixels.len();
    if total == 0 {
        return None;
    }
    let matching = pixels
        .filter(|px| spec.matches(px[0], px[1], px[2]))
        .count();
    Some(matching as f64 / total as f64)
}

/// Whether a frame is marker-colored.
#[must_use]
pub fn is_marker_frame(frame: &[u8], spec: &MarkerSpec) -> bool {
    match_ratio(frame, spec).is_some_and(|ratio| ratio >= spec.min_ratio)
}
