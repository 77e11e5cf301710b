//! Color grade estimation
//!
//! Combines the dominant palette with statistics over the RGB and grayscale
//! planes:
//! - Temperature from the hue of the average color
//! - Shadow and highlight tints from the red/blue balance of dark and bright pixels
//! - Contrast from the grayscale standard deviation
//! - Saturation of the average color
//! - Tone curve from the grayscale histogram
//!
//! Algorithm tag: `algo-color-grade`

use super::tone_curve::analyze_tone_curve;
use super::{ColorConverter, ColorEstimate, ColorQuantizer, ContrastLevel, SaturationLevel};
use crate::config::PaletteConfig;
use crate::constants::{color as table, first_above};
use crate::image_loader::DecodedImage;
use crate::stats::Plane;
use image::RgbImage;
use tracing::debug;

/// Channel sums over a subset of pixels
#[derive(Debug, Default, Clone, Copy)]
struct ChannelSums {
    red: f64,
    blue: f64,
    count: u64,
}

impl ChannelSums {
    fn add(&mut self, pixel: [u8; 3]) {
        self.red += pixel[0] as f64;
        self.blue += pixel[2] as f64;
        self.count += 1;
    }

    /// Mean red and blue, `None` for an empty subset
    fn red_blue(&self) -> Option<(f64, f64)> {
        (self.count > 0).then(|| (self.red / self.count as f64, self.blue / self.count as f64))
    }
}

/// Color grade estimator
#[derive(Debug, Clone)]
pub struct ColorEstimator {
    converter: ColorConverter,
    quantizer: ColorQuantizer,
    fallback: Vec<String>,
}

impl Default for ColorEstimator {
    fn default() -> Self {
        Self::new(&PaletteConfig::default())
    }
}

impl ColorEstimator {
    pub fn new(palette: &PaletteConfig) -> Self {
        Self {
            converter: ColorConverter::new(),
            quantizer: ColorQuantizer::new(palette.color_count, palette.quality),
            fallback: palette.fallback.clone(),
        }
    }

    pub fn estimate(&self, image: &DecodedImage) -> ColorEstimate {
        let average = average_rgb(image.rgb());
        let hsl = self.converter.rgb_to_hsl(average[0], average[1], average[2]);
        let (shadows, highlights) = tints(image.rgb());

        let plane = Plane::new(image.gray());
        let contrast =
            first_above(&table::CONTRAST_LEVELS, plane.std_dev()).unwrap_or(ContrastLevel::Low);
        let saturation = first_above(&table::SATURATION_LEVELS, hsl.saturation)
            .unwrap_or(SaturationLevel::Desaturated);

        let estimate = ColorEstimate {
            palette: self.palette(image),
            temperature: temperature(hsl.hue).to_string(),
            contrast,
            saturation,
            shadows: format!("Lifted, {}", shadows),
            highlights: highlights.to_string(),
            tone_curve: analyze_tone_curve(&plane.histogram()),
        };
        debug!(
            temperature = %estimate.temperature,
            contrast = %estimate.contrast,
            saturation = %estimate.saturation,
            "color estimate resolved"
        );
        estimate
    }

    /// Dominant colors as hex, or the fallback palette if quantization fails
    pub fn palette(&self, image: &DecodedImage) -> Vec<String> {
        match self.quantizer.palette(image.rgba()) {
            Ok(colors) => colors.iter().map(|c| self.converter.rgb_to_hex(*c)).collect(),
            Err(e) => {
                debug!(error = %e, "palette extraction failed, using fallback palette");
                self.fallback.clone()
            }
        }
    }
}

/// Mean of each RGB channel on the 0-255 scale
pub fn average_rgb(rgb: &RgbImage) -> [f64; 3] {
    let count = rgb.pixels().len();
    if count == 0 {
        return [0.0; 3];
    }
    let mut sums = [0u64; 3];
    for p in rgb.pixels() {
        for c in 0..3 {
            sums[c] += p.0[c] as u64;
        }
    }
    sums.map(|s| s as f64 / count as f64)
}

/// Temperature label for a hue on the 0..1 wheel
pub fn temperature(hue: f64) -> &'static str {
    if !(table::WARM_RED_HUE_LOW..=table::WARM_RED_HUE_HIGH).contains(&hue) {
        "Warm (orange/red tones)"
    } else if hue < table::WARM_YELLOW_HUE_HIGH {
        "Warm (yellow tones)"
    } else if (table::COOL_HUE_LOW..table::COOL_HUE_HIGH).contains(&hue) {
        "Cool (blue/teal tones)"
    } else {
        "Neutral"
    }
}

/// Shadow and highlight tint labels
pub fn tints(rgb: &RgbImage) -> (&'static str, &'static str) {
    let mut shadows = ChannelSums::default();
    let mut highlights = ChannelSums::default();
    for p in rgb.pixels() {
        let mean = (p.0[0] as f64 + p.0[1] as f64 + p.0[2] as f64) / 3.0;
        if mean < table::SHADOW_MAX_MEAN {
            shadows.add(p.0);
        } else if mean > table::HIGHLIGHT_MIN_MEAN {
            highlights.add(p.0);
        }
    }

    let shadow_tint = match shadows.red_blue() {
        Some((red, blue)) if blue > red => "Teal/Blue tint",
        Some((red, blue)) if red > blue => "Warm/Brown tint",
        _ => "Neutral",
    };
    let highlight_tint = match highlights.red_blue() {
        Some((red, blue)) if red > blue => "Warm highlights",
        Some((red, blue)) if blue > red => "Cool highlights",
        _ => "Neutral",
    };
    (shadow_tint, highlight_tint)
}
