//! Synthetic image fixtures shared by the integration tests

#![allow(dead_code)]

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{codecs::jpeg::JpegEncoder, DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub fn uniform(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Bright left half, dark right half
pub fn left_lit(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([230, 225, 220])
        } else {
            Rgb([25, 25, 30])
        }
    })
}

/// Colorful textured scene with several distinct regions
pub fn scene(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let band = (x * 6 / width) as u8;
        let shade = ((y * 120) / height) as u8;
        match band {
            0 => Rgb([200, 40 + shade / 2, 30]),
            1 => Rgb([30, 180, 60 + shade / 3]),
            2 => Rgb([40, 50, 150 + shade / 2]),
            3 => Rgb([220, 200, 40]),
            4 => Rgb([20 + shade, 20, 20]),
            _ => Rgb([90, 60 + shade, 200]),
        }
    })
}

pub fn encode_png(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgb8(img.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn encode_jpeg(img: &RgbImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    JpegEncoder::new_with_quality(&mut bytes, 95)
        .encode_image(img)
        .unwrap();
    bytes
}

/// Little-endian TIFF block holding `fields`
pub fn tiff_block(fields: &[Field]) -> Vec<u8> {
    let mut writer = Writer::new();
    for field in fields {
        writer.push_field(field);
    }
    let mut buf = Cursor::new(Vec::new());
    writer.write(&mut buf, true).unwrap();
    buf.into_inner()
}

pub fn ascii(tag: Tag, text: &str) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Ascii(vec![text.as_bytes().to_vec()]),
    }
}

pub fn rational(tag: Tag, numerator: u32, denominator: u32) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Rational(vec![Rational::from((numerator, denominator))]),
    }
}

pub fn short(tag: Tag, value: u16) -> Field {
    Field {
        tag,
        ifd_num: In::PRIMARY,
        value: Value::Short(vec![value]),
    }
}

/// Sony ILCE-7M3, 24mm, f/1.8, ISO 100, 1/200s
pub fn camera_fields() -> Vec<Field> {
    vec![
        ascii(Tag::Make, "Sony"),
        ascii(Tag::Model, "ILCE-7M3"),
        rational(Tag::ExposureTime, 1, 200),
        rational(Tag::FNumber, 18, 10),
        short(Tag::PhotographicSensitivity, 100),
        rational(Tag::FocalLength, 24, 1),
    ]
}

/// Point the out-of-line value of an ASCII field past the end of the block
pub fn corrupt_ascii_offset(tiff: &mut [u8], tag: Tag) {
    let mut entry = tag.number().to_le_bytes().to_vec();
    entry.extend_from_slice(&2u16.to_le_bytes());
    let at = tiff
        .windows(entry.len())
        .position(|w| w == entry.as_slice())
        .expect("tag not found in TIFF block");
    tiff[at + 8..at + 12].copy_from_slice(&0xFFFF_FF00u32.to_le_bytes());
}

/// Insert an APP1 Exif segment right after the JPEG SOI marker
pub fn splice_exif(jpeg: &[u8], tiff: &[u8]) -> Vec<u8> {
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "not a JPEG stream");
    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend(segment);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// JPEG carrying the [`camera_fields`] tags
pub fn jpeg_with_camera_exif(img: &RgbImage) -> Vec<u8> {
    splice_exif(&encode_jpeg(img), &tiff_block(&camera_fields()))
}

/// JPEG whose LensModel value points outside the EXIF block
pub fn jpeg_with_broken_lens_model(img: &RgbImage) -> Vec<u8> {
    let mut fields = camera_fields();
    fields.push(ascii(Tag::LensModel, "FE 24mm F1.4 GM"));
    let mut tiff = tiff_block(&fields);
    corrupt_ascii_offset(&mut tiff, Tag::LensModel);
    splice_exif(&encode_jpeg(img), &tiff)
}
