//! Camera settings estimation
//!
//! Resolves focal length, aperture, ISO and shutter speed from EXIF metadata
//! when it is usable and from grayscale pixel heuristics otherwise.

pub mod estimator;
pub mod heuristics;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use estimator::CameraEstimator;

/// Aperture-driven depth of field class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepthOfField {
    Shallow,
    Medium,
    Deep,
}

impl DepthOfField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthOfField::Shallow => "Shallow",
            DepthOfField::Medium => "Medium",
            DepthOfField::Deep => "Deep",
        }
    }
}

impl fmt::Display for DepthOfField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated camera and lens settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraEstimate {
    pub focal_length: String,
    pub aperture: String,
    pub depth_of_field: DepthOfField,
    pub iso: String,
    pub shutter_speed: String,
    /// Lens class hint derived from the focal length
    pub sensor_size: String,
    /// Literal pixel ratio "W:H", never reduced
    pub aspect_ratio: String,
    pub has_exif: bool,
    /// "Make Model" from metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,
}
