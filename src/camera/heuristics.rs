//! Pixel heuristics for camera settings without metadata
//!
//! All functions read the grayscale plane only. Signals are deliberately
//! coarse: corner softness and vignetting hint at wide lenses, vertical
//! difference variance at depth of field, mean brightness at ISO and
//! Laplacian variance at motion blur.

use super::DepthOfField;
use crate::constants::{camera as table, first_above, first_below};
use crate::stats::{safe_ratio, Plane, Region, RunningStats};

/// Signals feeding the perspective-distortion focal length estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveSignals {
    /// Corner sharpness over center sharpness
    pub edge_falloff: f64,
    /// Corner brightness over center brightness
    pub vignette_ratio: f64,
    /// Variance of gradient magnitude sampled on a coarse grid
    pub gradient_variance: f64,
}

impl PerspectiveSignals {
    pub fn measure(plane: &Plane) -> Self {
        let center = center_region(plane);
        let corners = corner_regions(plane);

        let center_sharpness = region_sharpness(plane, center);
        let corner_sharpness =
            corners.iter().map(|r| region_sharpness(plane, *r)).sum::<f64>() / 4.0;

        let center_brightness = plane.region_mean(center);
        let corner_brightness =
            corners.iter().map(|r| plane.region_mean(*r)).sum::<f64>() / 4.0;

        Self {
            edge_falloff: safe_ratio(corner_sharpness, center_sharpness),
            vignette_ratio: safe_ratio(corner_brightness, center_brightness),
            gradient_variance: sampled_gradient_variance(plane),
        }
    }

    /// Additive score; higher means a wider lens
    pub fn wide_score(&self) -> u32 {
        first_below(&table::EDGE_FALLOFF_SCORES, self.edge_falloff).unwrap_or(0)
            + first_below(&table::VIGNETTE_SCORES, self.vignette_ratio).unwrap_or(0)
            + first_above(&table::GRADIENT_VARIANCE_SCORES, self.gradient_variance).unwrap_or(0)
    }
}

/// Middle third of the frame in both directions
fn center_region(plane: &Plane) -> Region {
    let (w, h) = (plane.width(), plane.height());
    Region::new(w / 3, h / 3, 2 * w / 3, 2 * h / 3)
}

/// The four quarter-size corner blocks: TL, TR, BL, BR
fn corner_regions(plane: &Plane) -> [Region; 4] {
    let (w, h) = (plane.width(), plane.height());
    [
        Region::new(0, 0, w / 4, h / 4),
        Region::new(3 * w / 4, 0, w, h / 4),
        Region::new(0, 3 * h / 4, w / 4, h),
        Region::new(3 * w / 4, 3 * h / 4, w, h),
    ]
}

/// Mean absolute horizontal plus vertical gradient; 0 for tiny regions
fn region_sharpness(plane: &Plane, region: Region) -> f64 {
    if region.area() < table::MIN_SHARPNESS_REGION_PIXELS {
        return 0.0;
    }

    let mut horizontal = RunningStats::new();
    let mut vertical = RunningStats::new();
    for y in region.y0..region.y1 {
        for x in region.x0..region.x1 {
            if x + 1 < region.x1 {
                horizontal.push((plane.at(x + 1, y) - plane.at(x, y)).abs());
            }
            if y + 1 < region.y1 {
                vertical.push((plane.at(x, y + 1) - plane.at(x, y)).abs());
            }
        }
    }
    horizontal.mean() + vertical.mean()
}

fn sampled_gradient_variance(plane: &Plane) -> f64 {
    let (w, h) = (plane.width(), plane.height());
    if w < 2 || h < 2 {
        return 0.0;
    }
    let step_y = (h / table::GRADIENT_SAMPLE_DIVISIONS).max(1);
    let step_x = (w / table::GRADIENT_SAMPLE_DIVISIONS).max(1);

    let mut samples = RunningStats::new();
    for y in (0..h - 1).step_by(step_y) {
        for x in (0..w - 1).step_by(step_x) {
            let gx = plane.at(x + 1, y) - plane.at(x, y);
            let gy = plane.at(x, y + 1) - plane.at(x, y);
            samples.push((gx * gx + gy * gy).sqrt());
        }
    }
    samples.variance()
}

/// Focal length band and lens hint from perspective cues
pub fn estimate_focal_length(plane: &Plane) -> (String, String) {
    let score = PerspectiveSignals::measure(plane).wide_score();
    let (estimate, hint) = focal_band(score);
    (estimate.to_string(), hint.to_string())
}

pub fn focal_band(score: u32) -> (&'static str, &'static str) {
    table::FOCAL_BANDS
        .iter()
        .find(|(min_score, _, _)| score >= *min_score)
        .map(|(_, estimate, hint)| (*estimate, *hint))
        .unwrap_or(("~85mm+", "Portrait/Telephoto lens"))
}

/// Variance of absolute vertical pixel-to-pixel differences
pub fn vertical_difference_variance(plane: &Plane) -> f64 {
    let mut stats = RunningStats::new();
    for y in 0..plane.height().saturating_sub(1) {
        let (row, next) = (plane.row(y), plane.row(y + 1));
        for (a, b) in row.iter().zip(next) {
            stats.push((*b as f64 - *a as f64).abs());
        }
    }
    stats.variance()
}

pub fn estimate_aperture(plane: &Plane) -> (String, DepthOfField) {
    let (label, dof) = first_above(
        &table::APERTURE_ESTIMATES,
        vertical_difference_variance(plane),
    )
    .unwrap_or(table::WIDE_APERTURE_ESTIMATE);
    (label.to_string(), dof)
}

pub fn estimate_iso(plane: &Plane) -> String {
    first_above(&table::ISO_ESTIMATES, plane.mean())
        .unwrap_or(table::HIGH_ISO_ESTIMATE)
        .to_string()
}

/// 0 for a crisp image, approaching 1 as the Laplacian response flattens
pub fn motion_blur_score(plane: &Plane) -> f64 {
    let (w, h) = (plane.width(), plane.height());
    let mut stats = RunningStats::new();
    if w >= 3 && h >= 3 {
        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let response = plane.at(x, y - 1)
                    + plane.at(x, y + 1)
                    + plane.at(x - 1, y)
                    + plane.at(x + 1, y)
                    - 4.0 * plane.at(x, y);
                stats.push(response.abs());
            }
        }
    }
    1.0 - (stats.variance() / table::SHARPNESS_NORMALIZER).min(1.0)
}

pub fn estimate_shutter(plane: &Plane) -> String {
    first_above(&table::SHUTTER_ESTIMATES, motion_blur_score(plane))
        .unwrap_or(table::FAST_SHUTTER_ESTIMATE)
        .to_string()
}
