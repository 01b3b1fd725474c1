use image::{imageops, imageops::FilterType, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

use crate::error::CanvasError;

/// Canonical canvas edge length expected by the generation API
pub const MAX_DIMENSION: u32 = 1024;

/// A square, letterboxed image ready for API submission
///
/// The pixel grid is always `dimension x dimension` RGB: the source is scaled
/// down (never up) preserving its aspect ratio, centered, and the uncovered
/// area is solid black. The lossless PNG encoding is produced once, at
/// construction, and reused for previews, uploads, and library writes.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalImage {
    pixels: RgbImage,
    png: Vec<u8>,
}

impl CanonicalImage {
    /// Edge length of the square canvas
    pub fn dimension(&self) -> u32 {
        self.pixels.width()
    }

    /// The canvas pixel grid
    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    /// The lossless PNG encoding of the canvas
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    /// Consume the image, keeping only the PNG encoding
    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Base64 transport encoding of the PNG bytes
    pub fn to_base64(&self) -> String {
        super::transport::encode_base64(&self.png)
    }
}

/// Normalize an uploaded image to the canonical square canvas.
///
/// The input must decode as PNG, JPEG, or WEBP. Alpha and palette images are
/// converted to 3-channel RGB before scaling.
///
/// # Arguments
/// * `bytes` - The raw uploaded file content
/// * `max_dimension` - Edge length of the target canvas (canonically 1024)
///
/// # Returns
/// * `Ok(CanonicalImage)` - Exactly `max_dimension x max_dimension`
/// * `Err(CanvasError)` - Undecodable input or a zero dimension
pub fn normalize(bytes: &[u8], max_dimension: u32) -> Result<CanonicalImage, CanvasError> {
    if max_dimension == 0 {
        return Err(CanvasError::InvalidDimension(max_dimension));
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CanvasError::Decode(e.to_string()))?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    log::debug!("normalizing {}x{} upload to {}px canvas", width, height, max_dimension);

    // Scale factor is min(1, max / longest side): downscale only
    let longest = width.max(height);
    let scaled = if longest > max_dimension {
        let scale = f64::from(max_dimension) / f64::from(longest);
        let new_width = ((f64::from(width) * scale).round() as u32).max(1);
        let new_height = ((f64::from(height) * scale).round() as u32).max(1);
        imageops::resize(&rgb, new_width, new_height, FilterType::Lanczos3)
    } else {
        rgb
    };

    let mut canvas = RgbImage::from_pixel(max_dimension, max_dimension, Rgb([0, 0, 0]));

    // Center with floor division; opaque overwrite, no blending
    let offset_x = (max_dimension - scaled.width()) / 2;
    let offset_y = (max_dimension - scaled.height()) / 2;
    imageops::replace(&mut canvas, &scaled, i64::from(offset_x), i64::from(offset_y));

    let mut png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| CanvasError::Encode(e.to_string()))?;

    Ok(CanonicalImage { pixels: canvas, png })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a solid-color image as PNG bytes for use as an upload
    fn solid_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn is_reddish(pixel: &Rgb<u8>) -> bool {
        pixel[0] > 200 && pixel[1] < 50 && pixel[2] < 50
    }

    #[test]
    fn test_wide_image_letterboxed_to_square() {
        // 2000x1000 -> scale 0.512 -> 1024x512, vertical offset 256
        let upload = solid_png(2000, 1000, [255, 0, 0]);
        let canonical = normalize(&upload, 1024).unwrap();

        assert_eq!(canonical.dimension(), 1024);
        let pixels = canonical.pixels();

        // Rows 0-255 and 768-1023 are exact black padding
        assert_eq!(*pixels.get_pixel(512, 0), Rgb([0, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 255), Rgb([0, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 768), Rgb([0, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 1023), Rgb([0, 0, 0]));

        // Rows 256-767 hold the scaled source, edge to edge
        assert!(is_reddish(pixels.get_pixel(0, 256)));
        assert!(is_reddish(pixels.get_pixel(512, 512)));
        assert!(is_reddish(pixels.get_pixel(1023, 767)));
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let upload = solid_png(100, 50, [255, 0, 0]);
        let canonical = normalize(&upload, 1024).unwrap();

        assert_eq!(canonical.dimension(), 1024);
        let pixels = canonical.pixels();

        // No resampling happened, so the pasted region is exact:
        // 100 wide starting at (1024-100)/2 = 462, 50 tall starting at 487
        let red_in_row: Vec<u32> = (0..1024)
            .filter(|&x| *pixels.get_pixel(x, 512) == Rgb([255, 0, 0]))
            .collect();
        assert_eq!(red_in_row.len(), 100);
        assert_eq!(red_in_row[0], 462);
        assert_eq!(*red_in_row.last().unwrap(), 561);

        assert_eq!(*pixels.get_pixel(512, 486), Rgb([0, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 487), Rgb([255, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 536), Rgb([255, 0, 0]));
        assert_eq!(*pixels.get_pixel(512, 537), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_tall_image_preserves_aspect_ratio() {
        let upload = solid_png(500, 2000, [255, 0, 0]);
        let canonical = normalize(&upload, 1024).unwrap();
        let pixels = canonical.pixels();

        // 500x2000 -> 256x1024, horizontal offset (1024-256)/2 = 384
        assert_eq!(*pixels.get_pixel(383, 512), Rgb([0, 0, 0]));
        assert!(is_reddish(pixels.get_pixel(384, 512)));
        assert!(is_reddish(pixels.get_pixel(639, 512)));
        assert_eq!(*pixels.get_pixel(640, 512), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        let upload = solid_png(2000, 1000, [10, 200, 90]);
        let first = normalize(&upload, 1024).unwrap();
        let second = normalize(first.png_bytes(), 1024).unwrap();

        // Already square and within bounds: no resize, no new padding,
        // identical pixels, identical PNG bytes
        assert_eq!(first.png_bytes(), second.png_bytes());
    }

    #[test]
    fn test_base64_transport_matches_png_bytes() {
        let upload = solid_png(64, 64, [1, 2, 3]);
        let canonical = normalize(&upload, 128).unwrap();

        let encoded = canonical.to_base64();
        let decoded = crate::canvas::transport::decode_base64(&encoded).unwrap();
        assert_eq!(decoded, canonical.png_bytes());
    }

    #[test]
    fn test_undecodable_input_is_a_decode_error() {
        let result = normalize(b"definitely not an image", 1024);
        assert!(matches!(result, Err(CanvasError::Decode(_))));
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let upload = solid_png(10, 10, [0, 0, 255]);
        let result = normalize(&upload, 0);
        assert_eq!(result, Err(CanvasError::InvalidDimension(0)));
    }
}
