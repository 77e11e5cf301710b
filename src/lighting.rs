//! Lighting setup estimation
//!
//! Infers key-light placement, quality and color temperature from how
//! brightness is distributed across the frame. Only the decoded image is
//! read; metadata plays no part.

use crate::constants::{first_above, lighting as table};
use crate::image_loader::DecodedImage;
use crate::stats::{Plane, Region};
use image::RgbImage;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Hard/soft character of the key light
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightQuality {
    Hard,
    Medium,
    Soft,
}

impl LightQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightQuality::Hard => "Hard",
            LightQuality::Medium => "Medium",
            LightQuality::Soft => "Soft",
        }
    }
}

impl fmt::Display for LightQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named portrait lighting pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightingPattern {
    Split,
    Rembrandt,
    Butterfly,
    Loop,
}

impl LightingPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            LightingPattern::Split => "Split",
            LightingPattern::Rembrandt => "Rembrandt",
            LightingPattern::Butterfly => "Butterfly",
            LightingPattern::Loop => "Loop",
        }
    }
}

impl fmt::Display for LightingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of the frame the key light comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyLightSide {
    Left,
    Right,
    Frontal,
}

impl KeyLightSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyLightSide::Left => "left",
            KeyLightSide::Right => "right",
            KeyLightSide::Frontal => "frontal",
        }
    }
}

impl fmt::Display for KeyLightSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimated lighting setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightingEstimate {
    pub key_light_angle: String,
    pub key_light_side: KeyLightSide,
    pub vertical_angle: String,
    pub quality: LightQuality,
    /// Key-to-fill ratio
    pub ratio: String,
    /// Number of light sources, "1" to "4"
    pub sources: String,
    pub pattern: LightingPattern,
    pub temperature: String,
    pub fill_light: bool,
    pub back_light: bool,
}

/// Lighting setup estimator
pub struct LightingEstimator;

impl LightingEstimator {
    pub fn estimate(image: &DecodedImage) -> LightingEstimate {
        let plane = Plane::new(image.gray());
        let (w, h) = (plane.width(), plane.height());

        let left = plane.region_mean(Region::new(0, 0, w / 2, h));
        let right = plane.region_mean(Region::new(w / 2, 0, w, h));
        let (key_light_side, key_light_angle) = key_light(left, right);

        let top = plane.region_mean(Region::new(0, 0, w, h / 2));
        let bottom = plane.region_mean(Region::new(0, h / 2, w, h));
        let vertical_angle = vertical_angle(top, bottom);

        let contrast = plane.std_dev();
        let (quality, ratio) =
            first_above(&table::QUALITY_TABLE, contrast).unwrap_or(table::SOFT_QUALITY);

        let histogram = plane.histogram();
        let bright_threshold = histogram.percentile(table::BRIGHT_PERCENTILE);
        let sources = source_count(histogram.fraction_above(bright_threshold));

        let overall = plane.mean();
        let estimate = LightingEstimate {
            key_light_angle: key_light_angle.to_string(),
            key_light_side,
            vertical_angle: vertical_angle.to_string(),
            quality,
            ratio: ratio.to_string(),
            sources: sources.to_string(),
            pattern: lighting_pattern(&plane),
            temperature: color_temperature(image.rgb()).to_string(),
            fill_light: contrast < table::FILL_LIGHT_MAX_CONTRAST,
            back_light: top > overall * table::BACK_LIGHT_RATIO,
        };
        debug!(
            side = %estimate.key_light_side,
            quality = %estimate.quality,
            pattern = %estimate.pattern,
            "lighting estimate resolved"
        );
        estimate
    }
}

/// Key side and horizontal angle from left/right half brightness
pub fn key_light(left: f64, right: f64) -> (KeyLightSide, &'static str) {
    if right > left * table::KEY_SIDE_RATIO {
        (KeyLightSide::Right, table::KEY_SIDE_ANGLE)
    } else if left > right * table::KEY_SIDE_RATIO {
        (KeyLightSide::Left, table::KEY_SIDE_ANGLE)
    } else {
        (KeyLightSide::Frontal, table::FRONTAL_ANGLE)
    }
}

pub fn vertical_angle(top: f64, bottom: f64) -> &'static str {
    if top > bottom * table::TOP_LIGHT_RATIO {
        "30° up"
    } else if bottom > top * table::UNDER_LIGHT_RATIO {
        "below eye level"
    } else {
        "eye level"
    }
}

/// Light source count from the share of highlight pixels
pub fn source_count(bright_fraction: f64) -> u32 {
    first_above(&table::SOURCE_COUNTS, bright_fraction)
        .unwrap_or(1)
        .clamp(1, table::MAX_SOURCES)
}

/// Pattern from the left, center and right thirds of the central band
pub fn lighting_pattern(plane: &Plane) -> LightingPattern {
    let (w, h) = (plane.width(), plane.height());
    let (y0, y1) = (h / 3, 2 * h / 3);
    let left = plane.region_mean(Region::new(0, y0, w / 3, y1));
    let center = plane.region_mean(Region::new(w / 3, y0, 2 * w / 3, y1));
    let right = plane.region_mean(Region::new(2 * w / 3, y0, w, y1));

    let diff = (left - right).abs();
    if diff > table::SPLIT_PATTERN_DIFF {
        LightingPattern::Split
    } else if diff > table::REMBRANDT_PATTERN_DIFF {
        LightingPattern::Rembrandt
    } else if center > (left + right) / 2.0 * table::BUTTERFLY_RATIO {
        LightingPattern::Butterfly
    } else {
        LightingPattern::Loop
    }
}

/// Warm/cool/neutral from mean red against mean blue
pub fn color_temperature(rgb: &RgbImage) -> &'static str {
    let pixels = rgb.pixels().len().max(1) as f64;
    let (red, blue) = rgb.pixels().fold((0u64, 0u64), |(r, b), p| {
        (r + p.0[0] as u64, b + p.0[2] as u64)
    });
    let avg_red = red as f64 / pixels;
    let avg_blue = blue as f64 / pixels;

    if avg_red > avg_blue * table::WARM_RED_RATIO {
        table::WARM_TEMPERATURE
    } else if avg_blue > avg_red * table::COOL_BLUE_RATIO {
        table::COOL_TEMPERATURE
    } else {
        table::NEUTRAL_TEMPERATURE
    }
}
