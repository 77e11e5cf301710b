//! EXIF metadata extraction
//!
//! Reads the primary-image EXIF fields of the encoded source bytes and flattens
//! them into a [`Metadata`] mapping. Extraction never fails the analysis:
//! images without source bytes, without an EXIF block, or with a corrupt one
//! produce an empty mapping.

use super::metadata::{Metadata, TagValue};
use crate::error::{AnalysisError, Result};
use crate::image_loader::DecodedImage;
use exif::{In, Value};
use std::io::Cursor;
use tracing::debug;

/// EXIF metadata extractor
pub struct ExifExtractor;

impl ExifExtractor {
    /// Extract all primary-image tags, or an empty mapping on any failure
    pub fn extract(image: &DecodedImage) -> Metadata {
        let Some(bytes) = image.source_bytes() else {
            debug!("no source bytes, skipping EXIF extraction");
            return Metadata::default();
        };
        if let Some(format) = image.format().filter(|f| !f.may_carry_exif()) {
            debug!(?format, "container cannot carry EXIF, skipping extraction");
            return Metadata::default();
        }

        match Self::read_metadata(bytes) {
            Ok(metadata) => {
                debug!(keys = metadata.len(), "EXIF metadata extracted");
                metadata
            }
            Err(e) => {
                debug!(error = %e, "EXIF extraction failed, using pixel heuristics");
                Metadata::default()
            }
        }
    }

    /// Parse the EXIF block of an encoded image
    ///
    /// Malformed fields are skipped; the remaining fields are kept.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::Exif` if the container holds no readable EXIF data.
    pub fn read_metadata(bytes: &[u8]) -> Result<Metadata> {
        let mut cursor = Cursor::new(bytes);
        let exif = exif::Reader::new()
            .continue_on_error(true)
            .read_from_container(&mut cursor)
            .or_else(|e| {
                e.distill_partial_result(|errors| {
                    for error in &errors {
                        debug!(error = %error, "skipping malformed EXIF field");
                    }
                })
            })
            .map_err(|e| AnalysisError::exif("Failed to read EXIF container", e))?;

        let mut metadata = Metadata::new();
        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let Some(value) = Self::convert_value(&field.value) else {
                continue;
            };
            // Tags the reader has no name for are keyed by id only
            let name = field.tag.description().map(|_| field.tag.to_string());
            metadata.insert(field.tag.number(), name.as_deref(), value);
        }
        Ok(metadata)
    }

    /// Convert an EXIF value; single-element arrays collapse to a scalar
    fn convert_value(value: &Value) -> Option<TagValue> {
        let items: Vec<TagValue> = match value {
            Value::Byte(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::Short(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::Long(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::SByte(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::SShort(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::SLong(v) => v.iter().map(|&x| TagValue::Integer(x as i64)).collect(),
            Value::Rational(v) => v
                .iter()
                .map(|r| Self::rational(r.num as i64, r.denom as i64))
                .collect(),
            Value::SRational(v) => v
                .iter()
                .map(|r| Self::rational(r.num as i64, r.denom as i64))
                .collect(),
            Value::Float(v) => v.iter().map(|&x| TagValue::Float(x as f64)).collect(),
            Value::Double(v) => v.iter().map(|&x| TagValue::Float(x)).collect(),
            Value::Ascii(strings) => {
                return strings.first().map(|s| {
                    let text = String::from_utf8_lossy(s);
                    TagValue::Text(text.trim_end_matches('\0').trim().to_string())
                });
            }
            Value::Undefined(bytes, _) => return Some(TagValue::Bytes(bytes.clone())),
            _ => return None,
        };

        match items.len() {
            0 => None,
            1 => items.into_iter().next(),
            _ => Some(TagValue::List(items)),
        }
    }

    fn rational(numerator: i64, denominator: i64) -> TagValue {
        TagValue::Rational {
            numerator,
            denominator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exif::metadata::{tags, TagKey};
    use crate::image_loader::ImageFormat;
    use exif::experimental::Writer;
    use exif::{Field, Tag};
    use image::{DynamicImage, RgbImage};

    fn ascii(tag: Tag, text: &str) -> Field {
        Field {
            tag,
            ifd_num: In::PRIMARY,
            value: Value::Ascii(vec![text.as_bytes().to_vec()]),
        }
    }

    /// Small JPEG with an APP1 Exif segment built from `fields`
    fn jpeg_with_fields(fields: &[Field], corrupt: Option<Tag>) -> Vec<u8> {
        let mut writer = Writer::new();
        for field in fields {
            writer.push_field(field);
        }
        let mut tiff = Cursor::new(Vec::new());
        writer.write(&mut tiff, true).unwrap();
        let mut tiff = tiff.into_inner();

        if let Some(tag) = corrupt {
            let mut entry = tag.number().to_le_bytes().to_vec();
            entry.extend_from_slice(&2u16.to_le_bytes());
            let at = tiff.windows(4).position(|w| w == entry.as_slice()).unwrap();
            tiff[at + 8..at + 12].copy_from_slice(&0xFFFF_FF00u32.to_le_bytes());
        }

        let mut jpeg = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(16, 16))
            .write_to(&mut Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
            .unwrap();
        let mut out = jpeg[..2].to_vec();
        out.extend_from_slice(&[0xFF, 0xE1]);
        out.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
        out.extend_from_slice(b"Exif\0\0");
        out.extend(tiff);
        out.extend_from_slice(&jpeg[2..]);
        out
    }

    #[test]
    fn test_convert_scalar_and_list() {
        assert_eq!(
            ExifExtractor::convert_value(&Value::Short(vec![200])),
            Some(TagValue::Integer(200))
        );
        assert_eq!(
            ExifExtractor::convert_value(&Value::Short(vec![100, 200])),
            Some(TagValue::List(vec![TagValue::Integer(100), TagValue::Integer(200)]))
        );
        assert_eq!(ExifExtractor::convert_value(&Value::Long(vec![])), None);
    }

    #[test]
    fn test_convert_rational() {
        let value = Value::Rational(vec![exif::Rational { num: 1, denom: 200 }]);
        assert_eq!(
            ExifExtractor::convert_value(&value),
            Some(TagValue::Rational {
                numerator: 1,
                denominator: 200
            })
        );
    }

    #[test]
    fn test_convert_ascii_trims_padding() {
        let value = Value::Ascii(vec![b"Canon EOS R5 \0".to_vec()]);
        assert_eq!(
            ExifExtractor::convert_value(&value),
            Some(TagValue::Text("Canon EOS R5".into()))
        );
    }

    #[test]
    fn test_read_metadata_without_exif() {
        assert!(ExifExtractor::read_metadata(b"plain bytes").is_err());
    }

    #[test]
    fn test_extract_from_jpeg() {
        let bytes = jpeg_with_fields(&[ascii(Tag::Make, "Fujifilm"), ascii(Tag::Model, "X100V")], None);
        let image = DecodedImage::from_bytes(&bytes).unwrap();
        let metadata = ExifExtractor::extract(&image);
        assert_eq!(metadata.lookup(tags::MAKE), Some(&TagValue::Text("Fujifilm".into())));
        assert_eq!(metadata.lookup(tags::MODEL), Some(&TagValue::Text("X100V".into())));
    }

    #[test]
    fn test_malformed_field_is_skipped() {
        let fields = [
            ascii(Tag::Make, "Fujifilm"),
            ascii(Tag::Model, "X100V"),
            ascii(Tag::LensModel, "Fujinon 23mm F2"),
        ];
        let bytes = jpeg_with_fields(&fields, Some(Tag::LensModel));
        let metadata = ExifExtractor::read_metadata(&bytes).unwrap();
        assert_eq!(metadata.lookup(tags::MODEL), Some(&TagValue::Text("X100V".into())));
        assert!(metadata.lookup(tags::LENS_MODEL).is_none());
    }

    #[test]
    fn test_container_without_exif_support_is_skipped() {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Bmp)
            .unwrap();
        let image = DecodedImage::from_bytes(&bytes).unwrap();
        assert_eq!(image.format(), Some(ImageFormat::Bmp));
        assert!(!ImageFormat::Bmp.may_carry_exif());
        assert!(ExifExtractor::extract(&image).is_empty());
    }

    #[test]
    fn test_extract_without_source_is_empty() {
        let image = DecodedImage::from_dynamic(DynamicImage::ImageRgb8(RgbImage::new(8, 8)));
        let metadata = ExifExtractor::extract(&image);
        assert!(metadata.is_empty());
        assert!(metadata.get(&TagKey::Id(tags::MAKE.id)).is_none());
    }
}
