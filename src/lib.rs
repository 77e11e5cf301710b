//! # Frame Match
//!
//! A Rust crate for reverse-engineering how a photograph was made.
//!
//! Given a decoded image (and its EXIF metadata when present) this library
//! produces a heuristic recreation guide:
//! - Camera settings: focal length, aperture, ISO, shutter speed
//! - Lighting setup: key-light placement, quality, ratio, pattern
//! - Color grade: dominant palette, temperature, tints, tone curve
//! - A prose summary and ordered recreation steps
//!
//! Settings are read from metadata when usable and estimated from pixel
//! statistics otherwise. Analysis of a decoded image never fails.
//!
//! ## Example
//!
//! ```rust,no_run
//! use frame_match::ImageAnalyzer;
//! use std::path::Path;
//!
//! let result = ImageAnalyzer::new().analyze_path(Path::new("photo.jpg"))?;
//! println!("{}", result.summary);
//! for step in &result.recreation_guide {
//!     println!("- {}", step);
//! }
//! # Ok::<(), frame_match::AnalysisError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod exif;
pub mod image_loader;
pub mod lighting;
pub mod narrative;
pub mod stats;

pub use camera::{CameraEstimate, CameraEstimator, DepthOfField};
pub use color::{ColorEstimate, ColorEstimator, ContrastLevel, CurvePoint, SaturationLevel};
pub use config::{AnalyzerConfig, PaletteConfig};
pub use error::{AnalysisError, Result};
pub use crate::exif::{ExifExtractor, Metadata, TagValue};
pub use image_loader::{load_image, DecodedImage, ImageFormat};
pub use lighting::{KeyLightSide, LightQuality, LightingEstimate, LightingEstimator, LightingPattern};

/// Complete recreation guide for one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub camera: CameraEstimate,
    pub lighting: LightingEstimate,
    pub color: ColorEstimate,
    pub summary: String,
    pub recreation_guide: Vec<String>,
}

/// Image analyzer combining the camera, lighting and color estimators
#[derive(Debug, Clone, Default)]
pub struct ImageAnalyzer {
    config: AnalyzerConfig,
    color: ColorEstimator,
}

impl ImageAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer from a configuration
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Config` if the configuration fails validation.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            color: ColorEstimator::new(&config.palette),
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a decoded image
    ///
    /// Metadata and palette failures are absorbed into heuristic or default
    /// values, so this never fails. Repeated calls on the same image give
    /// identical results.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn analyze(&self, image: &DecodedImage) -> AnalysisResult {
        let metadata = ExifExtractor::extract(image);
        debug!(tags = metadata.len(), "metadata extracted");

        let (camera, (lighting, color)) = if self.config.parallel {
            rayon::join(
                || CameraEstimator::estimate(image, &metadata),
                || {
                    rayon::join(
                        || LightingEstimator::estimate(image),
                        || self.color.estimate(image),
                    )
                },
            )
        } else {
            (
                CameraEstimator::estimate(image, &metadata),
                (LightingEstimator::estimate(image), self.color.estimate(image)),
            )
        };

        AnalysisResult {
            summary: narrative::generate_summary(&camera, &lighting, &color),
            recreation_guide: narrative::generate_recreation_guide(&camera, &lighting, &color),
            camera,
            lighting,
            color,
        }
    }

    /// Decode raw image bytes and analyze them
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ImageLoad` if the bytes cannot be decoded.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult> {
        let image = DecodedImage::from_bytes(bytes)?;
        Ok(self.analyze(&image))
    }

    /// Load an image file and analyze it
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if the file cannot be read or decoded.
    pub fn analyze_path(&self, path: &Path) -> Result<AnalysisResult> {
        let image = load_image(path)?;
        Ok(self.analyze(&image))
    }
}

/// Analyze a decoded image with the default configuration
pub fn analyze(image: &DecodedImage) -> AnalysisResult {
    ImageAnalyzer::new().analyze(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn gray_image() -> DecodedImage {
        DecodedImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            64,
            48,
            Rgb([128, 128, 128]),
        )))
    }

    #[test]
    fn test_analysis_result_serialization() {
        let result = analyze(&gray_image());
        let json = serde_json::to_value(&result).unwrap();

        for key in ["camera", "lighting", "color", "summary", "recreationGuide"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(json["camera"]["aspectRatio"], "64:48");
        assert_eq!(json["camera"]["hasExif"], false);
        assert!(json["camera"].get("camera").is_none());
        assert_eq!(json["color"]["toneCurve"].as_array().unwrap().len(), 9);

        let deserialized: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, result);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let image = gray_image();
        let sequential = ImageAnalyzer::with_config(AnalyzerConfig {
            parallel: false,
            ..AnalyzerConfig::default()
        })
        .unwrap();
        assert_eq!(sequential.analyze(&image), ImageAnalyzer::new().analyze(&image));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = AnalyzerConfig::default();
        config.palette.color_count = 0;
        assert!(ImageAnalyzer::with_config(config).is_err());

        let mut config = AnalyzerConfig::default();
        config.palette.fallback = vec!["FF0000".into(), "#ABCDEF".into()];
        assert!(ImageAnalyzer::with_config(config).is_err());
    }

    #[test]
    fn test_custom_fallback_palette() {
        let mut config = AnalyzerConfig::default();
        config.palette.fallback = vec!["#000000".into(), "#ffffff".into()];
        let white = DecodedImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::from_pixel(
            32,
            32,
            Rgb([255, 255, 255]),
        )));
        let result = ImageAnalyzer::with_config(config).unwrap().analyze(&white);
        assert_eq!(result.color.palette, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn test_undecodable_bytes() {
        let err = ImageAnalyzer::new().analyze_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, AnalysisError::ImageLoad { .. }));
    }
}
