//! Error types for the frame_match library

use thiserror::Error;

/// Result type alias for frame_match operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for image analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image bytes could not be read or decoded
    #[error("Failed to load image: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// EXIF metadata could not be read
    #[error("EXIF processing error: {message}")]
    Exif {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dominant-color quantization produced no usable palette
    #[error("Palette extraction failed: {reason}")]
    Palette { reason: String },

    /// Analyzer configuration is invalid or unreadable
    #[error("Invalid configuration: {parameter} = {value}")]
    Config { parameter: String, value: String },

    #[error("Configuration parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoad {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an EXIF processing error with context
    pub fn exif<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Exif {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::Config {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error is absorbed inside the analysis (heuristic or default fallback)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::Exif { .. } | AnalysisError::Palette { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoad { .. } => {
                "Could not read the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::Config { parameter, .. } => {
                format!("The analyzer configuration has an invalid '{}' setting.", parameter)
            }
            _ => "Analysis failed. Please try with a different image.".to_string(),
        }
    }
}
