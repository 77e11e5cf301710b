//! EXIF metadata extraction module
//!
//! This module reads camera settings embedded in the image file (focal
//! length, aperture, ISO, exposure time, make/model/lens) and exposes them
//! through a tag mapping with typed, fallible accessors.

pub mod extractor;
pub mod metadata;

pub use extractor::ExifExtractor;
pub use metadata::{tags, Metadata, TagKey, TagRef, TagValue};
