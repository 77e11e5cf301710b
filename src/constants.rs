//! Heuristic breakpoints and score weights for image analysis
//!
//! Every magic number the estimators branch on lives here, grouped by the
//! analyzer that consumes it. Tables are ordered from the most to the least
//! significant breakpoint; lookups take the first matching row.

use crate::camera::DepthOfField;
use crate::color::{ContrastLevel, SaturationLevel};
use crate::lighting::LightQuality;

/// First row whose breakpoint is strictly exceeded by `value`.
pub fn first_above<T: Copy>(table: &[(f64, T)], value: f64) -> Option<T> {
    table
        .iter()
        .find(|(breakpoint, _)| value > *breakpoint)
        .map(|(_, item)| *item)
}

/// First row whose breakpoint is strictly greater than `value`.
pub fn first_below<T: Copy>(table: &[(f64, T)], value: f64) -> Option<T> {
    table
        .iter()
        .find(|(breakpoint, _)| value < *breakpoint)
        .map(|(_, item)| *item)
}

/// Grayscale conversion (ITU-R 601-2 luma, integer weights out of 1000)
pub mod luma {
    pub const RED_WEIGHT: u32 = 299;
    pub const GREEN_WEIGHT: u32 = 587;
    pub const BLUE_WEIGHT: u32 = 114;
}

/// Camera estimation tables
pub mod camera {
    use super::DepthOfField;

    /// Lens class by metadata focal length (mm, exclusive upper bound)
    pub const FOCAL_LENGTH_HINTS: [(f64, &str); 5] = [
        (24.0, "Ultra-wide angle lens"),
        (35.0, "Wide angle lens"),
        (50.0, "Wide-normal lens"),
        (85.0, "Standard lens"),
        (135.0, "Portrait/Short telephoto"),
    ];

    /// Lens class for focal lengths past the last breakpoint
    pub const TELEPHOTO_HINT: &str = "Telephoto lens";

    /// Regions smaller than this are too small to score sharpness
    pub const MIN_SHARPNESS_REGION_PIXELS: usize = 100;

    /// Grid divisions per axis for gradient-magnitude sampling
    pub const GRADIENT_SAMPLE_DIVISIONS: usize = 10;

    /// Wide score from corner/center sharpness ratio (lower = wider)
    pub const EDGE_FALLOFF_SCORES: [(f64, u32); 5] =
        [(0.6, 5), (0.7, 4), (0.8, 3), (0.9, 2), (1.0, 1)];

    /// Wide score from corner/center brightness ratio (lower = wider)
    pub const VIGNETTE_SCORES: [(f64, u32); 2] = [(0.7, 2), (0.85, 1)];

    /// Wide score from sampled gradient-magnitude variance (higher = wider)
    pub const GRADIENT_VARIANCE_SCORES: [(f64, u32); 2] = [(800.0, 2), (300.0, 1)];

    /// Focal length band by minimum wide score: (score, estimate, sensor hint)
    pub const FOCAL_BANDS: [(u32, &str, &str); 6] = [
        (6, "~14-24mm (ultra-wide)", "Ultra-wide angle lens"),
        (4, "~24-35mm (wide)", "Wide angle lens"),
        (3, "~35mm", "Wide-normal lens"),
        (2, "~50mm", "Standard lens"),
        (1, "~50-85mm", "Standard to short tele"),
        (0, "~85mm+", "Portrait/Telephoto lens"),
    ];

    /// Widest f-number still rendering a shallow depth of field
    pub const SHALLOW_MAX_F_NUMBER: f64 = 2.0;

    /// Widest f-number still rendering a medium depth of field
    pub const MEDIUM_MAX_F_NUMBER: f64 = 5.6;

    /// Aperture estimate by variance of vertical pixel differences
    pub const APERTURE_ESTIMATES: [(f64, (&str, DepthOfField)); 2] = [
        (2000.0, ("f/5.6 - f/8 (estimated)", DepthOfField::Deep)),
        (1000.0, ("f/2.8 - f/4 (estimated)", DepthOfField::Medium)),
    ];
    pub const WIDE_APERTURE_ESTIMATE: (&str, DepthOfField) =
        ("f/1.4 - f/2.0 (estimated)", DepthOfField::Shallow);

    /// ISO estimate by mean grayscale brightness
    pub const ISO_ESTIMATES: [(f64, &str); 2] = [
        (150.0, "Low ISO (estimated)"),
        (80.0, "Medium ISO (estimated)"),
    ];
    pub const HIGH_ISO_ESTIMATE: &str = "High ISO (estimated)";

    /// Laplacian variance at which an image counts as fully sharp
    pub const SHARPNESS_NORMALIZER: f64 = 500.0;

    /// Shutter estimate by blur score (0 = sharp, 1 = blurred)
    pub const SHUTTER_ESTIMATES: [(f64, &str); 2] = [
        (0.7, "Slow shutter (estimated)"),
        (0.4, "~1/60s - 1/125s (estimated)"),
    ];
    pub const FAST_SHUTTER_ESTIMATE: &str = "Fast shutter (estimated)";
}

/// Lighting estimation tables
pub mod lighting {
    use super::LightQuality;

    /// Brightness ratio marking one half as the key-light side
    pub const KEY_SIDE_RATIO: f64 = 1.1;
    pub const KEY_SIDE_ANGLE: &str = "45°";
    pub const FRONTAL_ANGLE: &str = "0° (frontal)";

    /// Top-half brightness ratio for an elevated key light
    pub const TOP_LIGHT_RATIO: f64 = 1.2;
    /// Bottom-half brightness ratio for a key light below eye level
    pub const UNDER_LIGHT_RATIO: f64 = 1.1;

    /// Quality and key/fill ratio by grayscale standard deviation
    pub const QUALITY_TABLE: [(f64, (LightQuality, &str)); 2] = [
        (70.0, (LightQuality::Hard, "4:1 or higher")),
        (45.0, (LightQuality::Medium, "3:1")),
    ];
    pub const SOFT_QUALITY: (LightQuality, &str) = (LightQuality::Soft, "2:1");

    /// Percentile separating highlight pixels from the rest
    pub const BRIGHT_PERCENTILE: f64 = 95.0;

    /// Source count by fraction of highlight pixels
    pub const SOURCE_COUNTS: [(f64, u32); 2] = [(0.15, 3), (0.08, 2)];
    pub const MAX_SOURCES: u32 = 4;

    /// Left/right brightness difference in the central band (0-255 scale)
    pub const SPLIT_PATTERN_DIFF: f64 = 40.0;
    pub const REMBRANDT_PATTERN_DIFF: f64 = 20.0;
    /// Center over side-average ratio for butterfly lighting
    pub const BUTTERFLY_RATIO: f64 = 1.1;

    pub const WARM_RED_RATIO: f64 = 1.15;
    pub const COOL_BLUE_RATIO: f64 = 1.1;
    pub const WARM_TEMPERATURE: &str = "Warm (3200K - 4500K)";
    pub const COOL_TEMPERATURE: &str = "Cool (5600K - 7000K)";
    pub const NEUTRAL_TEMPERATURE: &str = "Neutral (5000K - 5600K)";

    /// Contrast under which a fill light is assumed
    pub const FILL_LIGHT_MAX_CONTRAST: f64 = 60.0;
    /// Top-half over overall brightness ratio for a back light
    pub const BACK_LIGHT_RATIO: f64 = 1.1;
}

/// Color grade tables
pub mod color {
    use super::{ContrastLevel, SaturationLevel};

    /// Cinematic teal/orange palette used when quantization fails
    pub const FALLBACK_PALETTE: [&str; 5] =
        ["#1a2634", "#3d4f5f", "#d4a574", "#f5e6d3", "#8b5a2b"];
    pub const PALETTE_COLOR_COUNT: usize = 6;
    pub const PALETTE_QUALITY: usize = 1;

    /// Per-pixel channel mean bounds for shadow and highlight regions
    pub const SHADOW_MAX_MEAN: f64 = 85.0;
    pub const HIGHLIGHT_MIN_MEAN: f64 = 170.0;

    pub const CONTRAST_LEVELS: [(f64, ContrastLevel); 2] =
        [(65.0, ContrastLevel::High), (40.0, ContrastLevel::Medium)];
    pub const SATURATION_LEVELS: [(f64, SaturationLevel); 2] = [
        (0.5, SaturationLevel::Saturated),
        (0.25, SaturationLevel::Normal),
    ];

    /// Hue ranges on a 0..1 wheel
    pub const WARM_RED_HUE_LOW: f64 = 0.1;
    pub const WARM_RED_HUE_HIGH: f64 = 0.9;
    pub const WARM_YELLOW_HUE_HIGH: f64 = 0.2;
    pub const COOL_HUE_LOW: f64 = 0.5;
    pub const COOL_HUE_HIGH: f64 = 0.7;
}

/// Tone curve sampling and correction
pub mod tone {
    /// Brightness levels the CDF is sampled at
    pub const SAMPLE_LEVELS: [u8; 9] = [0, 32, 64, 96, 128, 160, 192, 224, 255];

    pub const BLACK_POINT_PERCENTILE: f64 = 2.0;
    pub const WHITE_POINT_PERCENTILE: f64 = 98.0;

    /// Black point above which shadows count as lifted
    pub const LIFTED_BLACK_POINT: f64 = 20.0;
    /// White point below which highlights count as crushed
    pub const CRUSHED_WHITE_POINT: f64 = 235.0;

    /// Curve inputs (percent) affected by each correction
    pub const SHADOW_INPUT_LIMIT: f64 = 25.0;
    pub const HIGHLIGHT_INPUT_LIMIT: f64 = 75.0;

    pub const CORRECTION_STRENGTH: f64 = 0.5;
}

/// Pixels the palette quantizer ignores
pub mod quantize {
    /// Pixels with every channel above this are skipped as background
    pub const WHITE_CUTOFF: u8 = 250;
    pub const MIN_ALPHA: u8 = 125;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_strictly_descending(values: &[f64]) -> bool {
        values.windows(2).all(|w| w[0] > w[1])
    }

    #[test]
    fn test_focal_hints_ascending() {
        let breakpoints: Vec<f64> = camera::FOCAL_LENGTH_HINTS.iter().map(|(b, _)| *b).collect();
        assert!(breakpoints.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_focal_bands_cover_zero() {
        let scores: Vec<u32> = camera::FOCAL_BANDS.iter().map(|(s, _, _)| *s).collect();
        assert!(scores.windows(2).all(|w| w[0] > w[1]));
        assert_eq!(*scores.last().unwrap(), 0);
    }

    #[test]
    fn test_above_tables_descending() {
        let aperture: Vec<f64> = camera::APERTURE_ESTIMATES.iter().map(|(b, _)| *b).collect();
        let quality: Vec<f64> = lighting::QUALITY_TABLE.iter().map(|(b, _)| *b).collect();
        let contrast: Vec<f64> = color::CONTRAST_LEVELS.iter().map(|(b, _)| *b).collect();
        assert!(is_strictly_descending(&aperture));
        assert!(is_strictly_descending(&quality));
        assert!(is_strictly_descending(&contrast));
    }

    #[test]
    fn test_first_above_and_below() {
        assert_eq!(first_above(&camera::GRADIENT_VARIANCE_SCORES, 900.0), Some(2));
        assert_eq!(first_above(&camera::GRADIENT_VARIANCE_SCORES, 500.0), Some(1));
        assert_eq!(first_above(&camera::GRADIENT_VARIANCE_SCORES, 300.0), None);

        assert_eq!(first_below(&camera::EDGE_FALLOFF_SCORES, 0.55), Some(5));
        assert_eq!(first_below(&camera::EDGE_FALLOFF_SCORES, 0.95), Some(1));
        assert_eq!(first_below(&camera::EDGE_FALLOFF_SCORES, 1.0), None);
    }

    #[test]
    fn test_luma_weights_sum() {
        assert_eq!(luma::RED_WEIGHT + luma::GREEN_WEIGHT + luma::BLUE_WEIGHT, 1000);
    }

    #[test]
    fn test_fallback_palette_is_lowercase_hex() {
        for hex in color::FALLBACK_PALETTE {
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
            assert!(hex[1..].chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
