//! Configuration for the frame_match analyzer.
//!
//! Heuristic thresholds are compile-time tables in [`crate::constants`];
//! only execution and palette settings are tunable at runtime.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use frame_match::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("analyzer.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), frame_match::AnalysisError>(())
//! ```
//!
//! Missing fields take their default values, so `{}` is a valid file.

use crate::color::ColorConverter;
use crate::constants::color::{FALLBACK_PALETTE, PALETTE_COLOR_COUNT, PALETTE_QUALITY};
use crate::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Accepted range for the number of palette swatches
pub const COLOR_COUNT_RANGE: std::ops::RangeInclusive<usize> = 2..=32;

/// Accepted range for the palette sampling stride
pub const QUALITY_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

/// Complete analyzer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Run the camera, lighting and color estimators concurrently
    pub parallel: bool,

    /// Dominant palette extraction
    pub palette: PaletteConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            palette: PaletteConfig::default(),
        }
    }
}

/// Palette extraction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Number of swatches to extract
    pub color_count: usize,

    /// Pixel sampling stride (1 = every pixel)
    pub quality: usize,

    /// Lowercase `#rrggbb` colors reported when extraction fails
    pub fallback: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            color_count: PALETTE_COLOR_COUNT,
            quality: PALETTE_QUALITY,
            fallback: FALLBACK_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    ///
    /// The loaded configuration is validated before it is returned.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check every runtime parameter
    pub fn validate(&self) -> Result<()> {
        let palette = &self.palette;
        if !COLOR_COUNT_RANGE.contains(&palette.color_count) {
            return Err(AnalysisError::config("palette.color_count", palette.color_count));
        }
        if !QUALITY_RANGE.contains(&palette.quality) {
            return Err(AnalysisError::config("palette.quality", palette.quality));
        }
        if palette.fallback.is_empty() {
            return Err(AnalysisError::config("palette.fallback", "[]"));
        }
        let converter = ColorConverter::new();
        // Only the canonical form round-trips
        for hex in &palette.fallback {
            let canonical = converter.hex_to_rgb(hex).map(|rgb| converter.rgb_to_hex(rgb));
            if canonical.ok().as_ref() != Some(hex) {
                return Err(AnalysisError::config("palette.fallback", hex));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalyzerConfig::default();
        assert!(config.parallel);
        assert_eq!(config.palette.color_count, 6);
        assert_eq!(config.palette.quality, 1);
        assert_eq!(config.palette.fallback.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("analyzer.json");

        let mut config = AnalyzerConfig::default();
        config.parallel = false;
        config.palette.quality = 4;
        config.to_json_file(&path).unwrap();

        let loaded = AnalyzerConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalyzerConfig =
            serde_json::from_str(r#"{ "palette": { "color_count": 8 } }"#).unwrap();
        assert!(config.parallel);
        assert_eq!(config.palette.color_count, 8);
        assert_eq!(config.palette.quality, 1);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = AnalyzerConfig::default();
        config.palette.color_count = 1;
        assert!(matches!(
            config.validate(),
            Err(AnalysisError::Config { ref parameter, .. }) if parameter == "palette.color_count"
        ));

        let mut config = AnalyzerConfig::default();
        config.palette.quality = 0;
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.palette.quality = 11;
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.palette.fallback = vec!["#12345".into()];
        assert!(config.validate().is_err());

        let mut config = AnalyzerConfig::default();
        config.palette.fallback.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fallback_must_be_lowercase_hash_hex() {
        for bad in ["FF0000", "#ABCDEF", "ff0000", "#ff00000"] {
            let mut config = AnalyzerConfig::default();
            config.palette.fallback = vec!["#000000".into(), bad.into()];
            assert!(
                matches!(
                    config.validate(),
                    Err(AnalysisError::Config { ref value, .. }) if value == bad
                ),
                "{} accepted",
                bad
            );
        }

        let mut config = AnalyzerConfig::default();
        config.palette.fallback = vec!["#abcdef".into(), "#0f0f0f".into()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "palette": { "quality": 0 } }"#).unwrap();
        assert!(AnalyzerConfig::from_json_file(&path).is_err());

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            AnalyzerConfig::from_json_file(&path),
            Err(AnalysisError::Json(_))
        ));

        let missing = dir.path().join("missing.json");
        assert!(matches!(
            AnalyzerConfig::from_json_file(&missing),
            Err(AnalysisError::Io(_))
        ));
    }
}
