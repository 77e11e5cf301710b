//! Prose summary and recreation steps
//!
//! Deterministic templating over the three estimates; no analysis happens
//! here.

use crate::camera::CameraEstimate;
use crate::color::ColorEstimate;
use crate::lighting::LightingEstimate;

/// One-paragraph description of the shot
pub fn generate_summary(
    camera: &CameraEstimate,
    lighting: &LightingEstimate,
    color: &ColorEstimate,
) -> String {
    format!(
        "This appears to be a {} depth of field shot, likely captured with a {} lens at {}. \
         The lighting is {} with the key light positioned at {} from camera {}. \
         The color grade features {} tones with {} contrast.",
        camera.depth_of_field.as_str().to_lowercase(),
        camera.focal_length,
        camera.aperture,
        lighting.quality.as_str().to_lowercase(),
        lighting.key_light_angle,
        lighting.key_light_side,
        color.temperature.to_lowercase(),
        color.contrast.as_str().to_lowercase(),
    )
}

/// Ordered steps to reproduce the look
pub fn generate_recreation_guide(
    camera: &CameraEstimate,
    lighting: &LightingEstimate,
    color: &ColorEstimate,
) -> Vec<String> {
    vec![
        format!(
            "Use a {} lens at {} for similar depth of field",
            camera.focal_length, camera.aperture
        ),
        format!(
            "Position your key light at {} from camera {}, {}",
            lighting.key_light_angle, lighting.key_light_side, lighting.vertical_angle
        ),
        format!(
            "Use a {} light source (softbox for soft, bare bulb for hard)",
            lighting.quality.as_str().to_lowercase()
        ),
        format!(
            "Aim for a {} lighting ratio between key and fill",
            lighting.ratio
        ),
        format!(
            "In post, apply a {} grade with {} contrast",
            color.temperature.to_lowercase(),
            color.contrast.as_str().to_lowercase()
        ),
        format!(
            "Push shadows toward {} for the cinematic look",
            shadow_tint(&color.shadows).to_lowercase()
        ),
    ]
}

/// Text after the last ", " of a shadows label
fn shadow_tint(shadows: &str) -> &str {
    shadows.rsplit(", ").next().unwrap_or(shadows)
}
