//! Thumbnail generation for image uploads.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::{MediadeckError, Result};

use super::{THUMBNAIL_JPEG_QUALITY, THUMBNAIL_MAX_DIM};

/// A generated thumbnail along with the source image's pixel dimensions.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    /// JPEG-encoded thumbnail bytes.
    pub jpeg: Vec<u8>,
    /// Width of the original image in pixels.
    pub source_width: u32,
    /// Height of the original image in pixels.
    pub source_height: u32,
}

/// Decode an image and produce a bounded, aspect-preserving thumbnail.
///
/// The longest side of the result is at most `THUMBNAIL_MAX_DIM` pixels;
/// the output is re-encoded as JPEG at a fixed quality. Alpha channels
/// are flattened since JPEG has no transparency.
pub fn generate(bytes: &[u8]) -> Result<Thumbnail> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| MediadeckError::InvalidPayload(format!("not a decodable image: {e}")))?;

    let (source_width, source_height) = (img.width(), img.height());

    // Images already inside the bound are kept as-is, never upscaled
    let thumb = if source_width > THUMBNAIL_MAX_DIM || source_height > THUMBNAIL_MAX_DIM {
        img.thumbnail(THUMBNAIL_MAX_DIM, THUMBNAIL_MAX_DIM)
    } else {
        img
    }
    .to_rgb8();

    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, THUMBNAIL_JPEG_QUALITY);
    thumb
        .write_with_encoder(encoder)
        .map_err(|e| MediadeckError::InvalidPayload(format!("thumbnail encoding failed: {e}")))?;

    Ok(Thumbnail {
        jpeg: buf.into_inner(),
        source_width,
        source_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_generate_records_source_dimensions() {
        let bytes = png_bytes(64, 48);
        let thumb = generate(&bytes).unwrap();

        assert_eq!(thumb.source_width, 64);
        assert_eq!(thumb.source_height, 48);
        assert!(!thumb.jpeg.is_empty());
    }

    #[test]
    fn test_generate_bounds_longest_side() {
        let bytes = png_bytes(800, 400);
        let thumb = generate(&bytes).unwrap();

        let decoded = image::load_from_memory(&thumb.jpeg).unwrap();
        assert!(decoded.width() <= THUMBNAIL_MAX_DIM);
        assert!(decoded.height() <= THUMBNAIL_MAX_DIM);
        // Aspect ratio is preserved: 2:1 input stays 2:1
        assert_eq!(decoded.width(), 200);
        assert_eq!(decoded.height(), 100);
    }

    #[test]
    fn test_generate_small_image_not_upscaled() {
        let bytes = png_bytes(10, 10);
        let thumb = generate(&bytes).unwrap();

        let decoded = image::load_from_memory(&thumb.jpeg).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
    }

    #[test]
    fn test_generate_output_is_jpeg() {
        let bytes = png_bytes(32, 32);
        let thumb = generate(&bytes).unwrap();

        assert_eq!(image::guess_format(&thumb.jpeg).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_generate_rejects_non_image() {
        let result = generate(b"definitely not an image");
        assert!(matches!(result, Err(MediadeckError::InvalidPayload(_))));
    }
}
