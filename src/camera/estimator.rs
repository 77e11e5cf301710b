//! Metadata-first camera settings resolution
//!
//! Each attribute is resolved in two arms: a typed metadata lookup that
//! yields `Some` only for a usable value, and the named pixel heuristic that
//! runs when the lookup yields `None`.

use super::heuristics;
use super::{CameraEstimate, DepthOfField};
use crate::constants::{camera as table, first_below};
use crate::exif::{tags, Metadata, TagValue};
use crate::image_loader::DecodedImage;
use crate::stats::Plane;
use tracing::debug;

/// Camera settings estimator
pub struct CameraEstimator;

impl CameraEstimator {
    pub fn estimate(image: &DecodedImage, metadata: &Metadata) -> CameraEstimate {
        let plane = Plane::new(image.gray());

        let (focal_length, sensor_size) = focal_length_from_metadata(metadata)
            .unwrap_or_else(|| heuristics::estimate_focal_length(&plane));

        let (aperture, depth_of_field) = aperture_from_metadata(metadata)
            .unwrap_or_else(|| heuristics::estimate_aperture(&plane));

        let iso = iso_from_metadata(metadata).unwrap_or_else(|| heuristics::estimate_iso(&plane));

        let shutter_speed = metadata
            .lookup(tags::EXPOSURE_TIME)
            .and_then(format_exposure_time)
            .unwrap_or_else(|| heuristics::estimate_shutter(&plane));

        let estimate = CameraEstimate {
            focal_length,
            aperture,
            depth_of_field,
            iso,
            shutter_speed,
            sensor_size,
            aspect_ratio: format!("{}:{}", image.width(), image.height()),
            has_exif: !metadata.is_empty(),
            camera: camera_identity(metadata),
            lens: metadata.lookup(tags::LENS_MODEL).and_then(TagValue::as_text),
        };
        debug!(
            focal = %estimate.focal_length,
            aperture = %estimate.aperture,
            has_exif = estimate.has_exif,
            "camera estimate resolved"
        );
        estimate
    }
}

/// "24mm" or "24mm (36mm equiv)" plus the lens class
pub fn focal_length_from_metadata(metadata: &Metadata) -> Option<(String, String)> {
    let focal = metadata.lookup(tags::FOCAL_LENGTH)?.as_f64()?;
    let equivalent = metadata
        .lookup(tags::FOCAL_LENGTH_35MM)
        .and_then(TagValue::as_f64);

    let label = match equivalent {
        Some(equiv) => format!("{:.0}mm ({:.0}mm equiv)", focal, equiv),
        None => format!("{:.0}mm", focal),
    };
    Some((label, lens_hint(focal).to_string()))
}

/// Lens class for a metadata focal length in millimetres
pub fn lens_hint(focal_mm: f64) -> &'static str {
    first_below(&table::FOCAL_LENGTH_HINTS, focal_mm).unwrap_or(table::TELEPHOTO_HINT)
}

pub fn aperture_from_metadata(metadata: &Metadata) -> Option<(String, DepthOfField)> {
    let f_number = metadata.lookup(tags::F_NUMBER)?.as_f64()?;
    Some((format!("f/{:.1}", f_number), depth_of_field(f_number)))
}

pub fn depth_of_field(f_number: f64) -> DepthOfField {
    if f_number <= table::SHALLOW_MAX_F_NUMBER {
        DepthOfField::Shallow
    } else if f_number <= table::MEDIUM_MAX_F_NUMBER {
        DepthOfField::Medium
    } else {
        DepthOfField::Deep
    }
}

pub fn iso_from_metadata(metadata: &Metadata) -> Option<String> {
    let iso = metadata.lookup(tags::ISO)?.as_i64()?;
    Some(format!("ISO {}", iso))
}

/// Render an exposure time tag as a shutter speed
///
/// Rationals keep their fraction ("1/200s", "10/1300s", "2s"); plain
/// numbers render as "1.5s" or "1/<n>s". Zero or malformed values give
/// `None`.
pub fn format_exposure_time(value: &TagValue) -> Option<String> {
    match value {
        TagValue::Rational {
            numerator,
            denominator,
        } => format_fraction(*numerator, *denominator),
        TagValue::List(items) => match items.as_slice() {
            [TagValue::Integer(numerator), TagValue::Integer(denominator)] => {
                format_fraction(*numerator, *denominator)
            }
            [first, ..] => format_exposure_time(first),
            [] => None,
        },
        other => other.as_f64().and_then(format_seconds),
    }
}

fn format_fraction(numerator: i64, denominator: i64) -> Option<String> {
    if numerator <= 0 || denominator <= 0 {
        debug!(numerator, denominator, "non-positive exposure fraction, estimating shutter");
        return None;
    }
    Some(match (numerator, denominator) {
        (n, 1) => format!("{}s", n),
        (1, d) => format!("1/{}s", d),
        (n, d) => format!("{}/{}s", n, d),
    })
}

fn format_seconds(seconds: f64) -> Option<String> {
    if !seconds.is_finite() || seconds <= 0.0 {
        return None;
    }
    if seconds >= 1.0 {
        Some(format!("{:.1}s", seconds))
    } else {
        Some(format!("1/{}s", (1.0 / seconds).round() as u64))
    }
}

/// Trimmed "Make Model", absent when neither tag has text
pub fn camera_identity(metadata: &Metadata) -> Option<String> {
    let make = metadata.lookup(tags::MAKE).and_then(TagValue::as_text);
    let model = metadata.lookup(tags::MODEL).and_then(TagValue::as_text);
    if make.is_none() && model.is_none() {
        return None;
    }
    let joined = format!(
        "{} {}",
        make.unwrap_or_default(),
        model.unwrap_or_default()
    );
    Some(joined.trim().to_string())
}
