//! Image decoding and binarization.
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP), converts to a
//! single-channel grayscale image, and thresholds it into a binary
//! ink mask (255 = foreground stroke, 0 = background).
//!
//! The default polarity treats dark pixels as ink (inverse threshold),
//! matching scanned pen drawings: dark ink on light paper.

use image::GrayImage;

use crate::types::TraceError;

/// Decode raw image bytes and convert to grayscale.
///
/// Supports PNG, JPEG, BMP, and WebP formats (whatever the `image`
/// crate can decode). The standard luminance formula is used for
/// RGB-to-gray conversion.
///
/// # Errors
///
/// Returns [`TraceError::EmptyInput`] if `bytes` is empty.
/// Returns [`TraceError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_and_grayscale(bytes: &[u8]) -> Result<GrayImage, TraceError> {
    if bytes.is_empty() {
        return Err(TraceError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_luma8())
}

/// Threshold a grayscale image into a binary mask.
///
/// With `invert == false`, pixels strictly darker than `threshold`
/// become foreground (255). With `invert == true`, pixels at or above
/// `threshold` become foreground (light strokes on dark background).
#[must_use = "returns the binary mask"]
pub fn threshold_mask(gray: &GrayImage, threshold: u8, invert: bool) -> GrayImage {
    let mut mask = GrayImage::new(gray.width(), gray.height());
    for (src, dst) in gray.pixels().zip(mask.pixels_mut()) {
        let ink = (src.0[0] < threshold) != invert;
        dst.0[0] = if ink { 255 } else { 0 };
    }
    mask
}
