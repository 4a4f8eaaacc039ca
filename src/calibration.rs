//! Pixel-to-centimeter scale from the torso span.

use crate::config::CalibrationConfig;
use crate::keypoints::Landmarks;
use crate::types::Landmark;

/// Derive the centimeters-per-pixel factor for one frame.
///
/// Anchored on the vertical shoulder-to-hip span of the left side, which is
/// assumed to be `torso_reference_cm` long. Candidates outside the open interval
/// `(min_cm_per_pixel, max_cm_per_pixel)` are rejected in favor of the default.
/// This also catches zero spans (infinite candidate) and NaN coordinates.
pub fn pixel_to_cm(landmarks: &Landmarks<'_>, config: &CalibrationConfig) -> f64 {
    let Some((shoulder, hip)) = landmarks.pair(Landmark::LeftShoulder, Landmark::LeftHip) else {
        tracing::debug!(
            "No torso anchor, using default scale {} cm/px",
            config.default_cm_per_pixel
        );
        return config.default_cm_per_pixel;
    };

    let span_px = (hip.y - shoulder.y).abs();
    scale_from_torso_span(span_px, config)
}

/// Convert a vertical shoulder-to-hip span in pixels into a scale factor.
pub fn scale_from_torso_span(span_px: f64, config: &CalibrationConfig) -> f64 {
    let candidate = config.torso_reference_cm / span_px;
    if candidate > config.min_cm_per_pixel && candidate < config.max_cm_per_pixel {
        tracing::debug!("Torso span {:.1}px -> {:.4} cm/px", span_px, candidate);
        candidate
    } else {
        tracing::debug!(
            "Rejected scale {:.4} cm/px from torso span {:.1}px, using default {}",
            candidate,
            span_px,
            config.default_cm_per_pixel
        );
        config.default_cm_per_pixel
    }
}
