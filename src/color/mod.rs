//! Color grade analysis
//!
//! This module extracts the dominant palette, overall temperature, shadow
//! and highlight tints, contrast and saturation labels, and a tone curve
//! sampled from the brightness distribution.

pub mod analysis;
pub mod conversion;
pub mod quantize;
pub mod tone_curve;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use analysis::ColorEstimator;
pub use conversion::ColorConverter;
pub use quantize::ColorQuantizer;
pub use tone_curve::CurvePoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastLevel {
    High,
    Medium,
    Low,
}

impl ContrastLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContrastLevel::High => "High",
            ContrastLevel::Medium => "Medium",
            ContrastLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ContrastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaturationLevel {
    Saturated,
    Normal,
    Desaturated,
}

impl SaturationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SaturationLevel::Saturated => "Saturated",
            SaturationLevel::Normal => "Normal",
            SaturationLevel::Desaturated => "Desaturated",
        }
    }
}

impl fmt::Display for SaturationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated color grade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEstimate {
    /// Lowercase `#rrggbb` swatches, most dominant first
    pub palette: Vec<String>,
    pub temperature: String,
    pub contrast: ContrastLevel,
    pub saturation: SaturationLevel,
    /// Always prefixed "Lifted, "
    pub shadows: String,
    pub highlights: String,
    /// Nine `[input, output]` points on a 0-100 scale
    pub tone_curve: Vec<CurvePoint>,
}
