//! Color space conversion utilities
//!
//! Provides the conversions the color grade estimate needs:
//! - 8-bit RGB to hue/lightness/saturation (hue on a 0..1 wheel)
//! - RGB to lowercase hex and back

use palette::{FromColor, Hsl, Srgb};
use crate::{AnalysisError, Result};

/// Hue, lightness and saturation, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueLightSat {
    pub hue: f64,
    pub lightness: f64,
    pub saturation: f64,
}

/// Color converter between RGB, HSL and hex notations
#[derive(Debug, Default, Clone, Copy)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Convert RGB channel values (0-255, fractional allowed) to HSL
    ///
    /// Achromatic colors report a hue of 0.
    pub fn rgb_to_hsl(&self, r: f64, g: f64, b: f64) -> HueLightSat {
        let srgb = Srgb::new(
            (r / 255.0) as f32,
            (g / 255.0) as f32,
            (b / 255.0) as f32,
        );
        let hsl: Hsl = Hsl::from_color(srgb);
        let hue = (hsl.hue.into_positive_degrees() / 360.0) as f64;
        HueLightSat {
            hue: if hue >= 1.0 { 0.0 } else { hue },
            lightness: hsl.lightness as f64,
            saturation: hsl.saturation as f64,
        }
    }

    /// Convert RGB to a lowercase hex color string (e.g., "#ff0000")
    pub fn rgb_to_hex(&self, rgb: [u8; 3]) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
    }

    /// Parse a hex color string ("#FF0000" or "ff0000") to RGB
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Config` if the string is not six hex digits.
    pub fn hex_to_rgb(&self, hex: &str) -> Result<[u8; 3]> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AnalysisError::config("hex color", hex));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| AnalysisError::config("hex color", hex))
        };
        Ok([channel(0..2)?, channel(2..4)?, channel(4..6)?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_primary_hues() {
        let converter = ColorConverter::new();
        let red = converter.rgb_to_hsl(255.0, 0.0, 0.0);
        assert!(red.hue.abs() < 1e-4);
        assert!((red.saturation - 1.0).abs() < 1e-4);
        assert!((red.lightness - 0.5).abs() < 1e-4);

        let blue = converter.rgb_to_hsl(0.0, 0.0, 255.0);
        assert!((blue.hue - 2.0 / 3.0).abs() < 1e-4);

        let yellowish = converter.rgb_to_hsl(230.0, 190.0, 60.0);
        assert!(yellowish.hue > 0.1 && yellowish.hue < 0.2);
    }

    #[test]
    fn test_hsl_gray_is_achromatic() {
        let converter = ColorConverter::new();
        let gray = converter.rgb_to_hsl(128.0, 128.0, 128.0);
        assert_eq!(gray.hue, 0.0);
        assert!(gray.saturation.abs() < 1e-6);
    }

    #[test]
    fn test_hsl_saturation_above_half_lightness() {
        // max 0.9, min 0.7 -> l = 0.8, s = 0.2 / (2 - 1.6) = 0.5
        let converter = ColorConverter::new();
        let hsl = converter.rgb_to_hsl(229.5, 178.5, 178.5);
        assert!((hsl.lightness - 0.8).abs() < 1e-4);
        assert!((hsl.saturation - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_rgb_to_hex() {
        let converter = ColorConverter::new();
        assert_eq!(converter.rgb_to_hex([255, 0, 0]), "#ff0000");
        assert_eq!(converter.rgb_to_hex([26, 38, 52]), "#1a2634");
    }

    #[test]
    fn test_hex_to_rgb() {
        let converter = ColorConverter::new();
        assert_eq!(converter.hex_to_rgb("#FF0000").unwrap(), [255, 0, 0]);
        assert_eq!(converter.hex_to_rgb("d4a574").unwrap(), [212, 165, 116]);
    }

    #[test]
    fn test_hex_to_rgb_invalid() {
        let converter = ColorConverter::new();
        assert!(converter.hex_to_rgb("#FF").is_err());
        assert!(converter.hex_to_rgb("#GGGGGG").is_err());
        assert!(converter.hex_to_rgb("#ffé000").is_err());
    }
}
