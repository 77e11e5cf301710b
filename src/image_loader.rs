//! Image decoding into the analysis buffers
//!
//! This module turns encoded image bytes into a [`DecodedImage`]: an
//! immutable RGB buffer plus the derived grayscale and RGBA views every
//! estimator reads from. The encoded source bytes are retained so that the
//! metadata extractor can look for an embedded EXIF block.
//!
//! ## Supported Formats
//!
//! Decoding goes through the `image` crate with its default codecs:
//! JPEG, PNG, GIF (first frame), WebP, TIFF, BMP, ICO, TGA, PNM, QOI, HDR
//! and OpenEXR.
//!
//! ## Design
//!
//! EXIF orientation is NOT applied: the heuristics describe the frame the
//! way it is stored.

use crate::constants::luma;
use crate::error::{AnalysisError, Result};
use image::{DynamicImage, GrayImage, ImageReader, Luma, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
    /// HDR image
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }

    /// Map the codec the `image` crate detected from content
    pub fn from_codec(codec: image::ImageFormat) -> Option<ImageFormat> {
        use image::ImageFormat as Codec;
        match codec {
            Codec::Jpeg => Some(ImageFormat::Jpeg),
            Codec::Png => Some(ImageFormat::Png),
            Codec::Gif => Some(ImageFormat::Gif),
            Codec::WebP => Some(ImageFormat::WebP),
            Codec::Tiff => Some(ImageFormat::Tiff),
            Codec::Bmp => Some(ImageFormat::Bmp),
            Codec::Ico => Some(ImageFormat::Ico),
            Codec::Tga => Some(ImageFormat::Tga),
            Codec::OpenExr => Some(ImageFormat::Exr),
            Codec::Pnm => Some(ImageFormat::Pnm),
            Codec::Qoi => Some(ImageFormat::Qoi),
            Codec::Hdr => Some(ImageFormat::Hdr),
            _ => None,
        }
    }

    /// Whether the container can carry an EXIF block the extractor understands
    pub fn may_carry_exif(&self) -> bool {
        matches!(
            self,
            ImageFormat::Jpeg | ImageFormat::Tiff | ImageFormat::Png | ImageFormat::WebP
        )
    }
}

/// A decoded image and its derived pixel views
///
/// Built once per analysis and shared read-only by all estimators.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    rgb: RgbImage,
    rgba: RgbaImage,
    gray: GrayImage,
    source: Option<Vec<u8>>,
    format: Option<ImageFormat>,
}

impl DecodedImage {
    /// Decode an encoded image, guessing the format from its content
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::ImageLoad` if the format cannot be recognized
    /// or the decoder rejects the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| AnalysisError::image_load("Failed to read image header", e))?;

        let format = reader.format().and_then(ImageFormat::from_codec);
        let img = reader
            .decode()
            .map_err(|e| AnalysisError::image_load("Failed to decode image", e))?;

        let mut decoded = Self::from_dynamic(img);
        decoded.source = Some(bytes.to_vec());
        decoded.format = format;
        Ok(decoded)
    }

    /// Wrap an already decoded image; no metadata will be available
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let rgba = img.to_rgba8();
        let rgb = img.to_rgb8();
        let gray = luma_from_rgb(&rgb);
        Self {
            rgb,
            rgba,
            gray,
            source: None,
            format: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.rgb.width()
    }

    pub fn height(&self) -> u32 {
        self.rgb.height()
    }

    /// 8-bit grayscale view (ITU-R 601-2 luma)
    pub fn gray(&self) -> &GrayImage {
        &self.gray
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// RGBA view, alpha preserved from the source when it has one
    pub fn rgba(&self) -> &RgbaImage {
        &self.rgba
    }

    /// Encoded bytes the image was decoded from, if any
    pub fn source_bytes(&self) -> Option<&[u8]> {
        self.source.as_deref()
    }

    /// Container format detected from the source bytes
    pub fn format(&self) -> Option<ImageFormat> {
        self.format
    }
}

/// Convert RGB to 8-bit luma with integer 601-2 weights, rounded
fn luma_from_rgb(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let weighted = r as u32 * luma::RED_WEIGHT
            + g as u32 * luma::GREEN_WEIGHT
            + b as u32 * luma::BLUE_WEIGHT;
        Luma([((weighted + 500) / 1000) as u8])
    })
}

/// Load and decode an image from disk
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoad` if:
/// - The extension is not a supported image format
/// - File cannot be read
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use frame_match::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), frame_match::AnalysisError>(())
/// ```
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(AnalysisError::ImageLoad {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    DecodedImage::from_bytes(&bytes)
}
