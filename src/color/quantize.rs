//! Dominant color extraction
//!
//! Thin wrapper over the `color-thief` modified median-cut quantizer. Pixels
//! with low alpha and near-white pixels are ignored by the quantizer; an
//! image with no other pixel has no palette.

use crate::constants::quantize::{MIN_ALPHA, WHITE_CUTOFF};
use crate::{AnalysisError, Result};
use color_thief::ColorFormat;
use image::RgbaImage;

/// Dominant color quantizer
#[derive(Debug, Clone, Copy)]
pub struct ColorQuantizer {
    max_colors: usize,
    quality: usize,
}

impl ColorQuantizer {
    /// `quality` is the pixel sampling stride; 1 reads every pixel
    pub fn new(max_colors: usize, quality: usize) -> Self {
        Self {
            max_colors,
            quality: quality.max(1),
        }
    }

    /// Whether any pixel would take part in quantization
    pub fn has_candidates(&self, image: &RgbaImage) -> bool {
        image.pixels().any(|p| {
            let [r, g, b, a] = p.0;
            a >= MIN_ALPHA && !(r > WHITE_CUTOFF && g > WHITE_CUTOFF && b > WHITE_CUTOFF)
        })
    }

    /// Dominant colors, most significant first
    ///
    /// A low-color image yields the colors that exist in it; those may be
    /// fewer than requested or repeat.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Palette` if the parameters are out of range,
    /// no pixel survives filtering, or the quantizer rejects the buffer.
    pub fn palette(&self, image: &RgbaImage) -> Result<Vec<[u8; 3]>> {
        let max_colors = u8::try_from(self.max_colors).map_err(|_| AnalysisError::Palette {
            reason: format!("color count {} out of range", self.max_colors),
        })?;
        let quality = u8::try_from(self.quality).map_err(|_| AnalysisError::Palette {
            reason: format!("quality {} out of range", self.quality),
        })?;
        if !self.has_candidates(image) {
            return Err(AnalysisError::Palette {
                reason: "no opaque non-white pixels to quantize".into(),
            });
        }

        let colors = color_thief::get_palette(image.as_raw(), ColorFormat::Rgba, quality, max_colors)
            .map_err(|e| AnalysisError::Palette {
                reason: format!("{:?}", e),
            })?;
        if colors.is_empty() {
            return Err(AnalysisError::Palette {
                reason: "quantizer returned no colors".into(),
            });
        }
        Ok(colors
            .iter()
            .take(self.max_colors)
            .map(|c| [c.r, c.g, c.b])
            .collect())
    }
}
