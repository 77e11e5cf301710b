//! Tone curve derived from the brightness distribution
//!
//! The normalized CDF of the grayscale histogram is sampled at nine levels.
//! A raised black point lifts the shadow end and a lowered white point
//! pulls the highlight end down.

use crate::constants::tone;
use crate::stats::Histogram;
use serde::{Deserialize, Serialize};

/// Curve control point `(input, output)`, both on a 0-100 scale
///
/// Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint(pub f64, pub f64);

impl CurvePoint {
    pub fn input(&self) -> f64 {
        self.0
    }

    pub fn output(&self) -> f64 {
        self.1
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Sample the histogram CDF at the fixed levels
pub fn sample_tone_curve(histogram: &Histogram) -> Vec<CurvePoint> {
    let cdf = histogram.cdf();
    tone::SAMPLE_LEVELS
        .iter()
        .map(|&level| {
            CurvePoint(
                round1(level as f64 / 255.0 * 100.0),
                round1(cdf[level as usize] * 100.0),
            )
        })
        .collect()
}

/// Apply black/white point corrections and clamp outputs to `[0, 100]`
///
/// Returns a new curve. Monotonicity is not restored: a strong lift can
/// push an early point above a later one.
pub fn correct_tone_curve(points: &[CurvePoint], black_point: f64, white_point: f64) -> Vec<CurvePoint> {
    let lift = black_point / 255.0 * 100.0 * tone::CORRECTION_STRENGTH;
    let crush = (255.0 - white_point) / 255.0 * 100.0 * tone::CORRECTION_STRENGTH;

    points
        .iter()
        .map(|&CurvePoint(input, mut output)| {
            if black_point > tone::LIFTED_BLACK_POINT && input < tone::SHADOW_INPUT_LIMIT {
                output = (output + lift * (1.0 - input / tone::SHADOW_INPUT_LIMIT)).min(100.0);
            }
            if white_point < tone::CRUSHED_WHITE_POINT && input > tone::HIGHLIGHT_INPUT_LIMIT {
                let reach = (input - tone::HIGHLIGHT_INPUT_LIMIT) / (100.0 - tone::HIGHLIGHT_INPUT_LIMIT);
                output = (output - crush * reach).max(0.0);
            }
            CurvePoint(input, output.clamp(0.0, 100.0))
        })
        .collect()
}

/// Full tone curve for a grayscale histogram
pub fn analyze_tone_curve(histogram: &Histogram) -> Vec<CurvePoint> {
    let black_point = histogram.percentile(tone::BLACK_POINT_PERCENTILE);
    let white_point = histogram.percentile(tone::WHITE_POINT_PERCENTILE);
    correct_tone_curve(&sample_tone_curve(histogram), black_point, white_point)
}
