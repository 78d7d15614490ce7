use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::error::EngineError;

/// JPEG quality used for every response body.
pub const JPEG_QUALITY: u8 = 80;

/// Decode an uploaded buffer. Format is sniffed from the bytes, so PNG, JPEG,
/// WebP, GIF and friends all come in through the same door.
pub fn decode(input: &[u8]) -> Result<DynamicImage, EngineError> {
    image::load_from_memory(input).map_err(|e| EngineError::Decode(e.to_string()))
}

/// Encode to JPEG regardless of the input format. JPEG has no alpha channel,
/// so the image is flattened to RGB first.
pub fn encode_jpeg(img: &DynamicImage) -> Result<Vec<u8>, EngineError> {
    let rgb = img.to_rgb8();
    let mut output = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(Cursor::new(&mut output), JPEG_QUALITY);

    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| EngineError::Encode(e.to_string()))?;

    Ok(output)
}

/// Scale down to fit within `max_w` x `max_h`, preserving aspect ratio.
/// Images already inside the bounds are returned untouched (no enlargement).
pub fn fit_inside(img: DynamicImage, max_w: u32, max_h: u32, filter: FilterType) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_w && h <= max_h {
        return img;
    }
    img.resize(max_w, max_h, filter)
}

/// Target dimensions `fit_inside` would produce, without resampling.
pub fn fit_dimensions(w: u32, h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if w <= max_w && h <= max_h {
        return (w, h);
    }
    let ratio = f64::min(max_w as f64 / w as f64, max_h as f64 / h as f64);
    let nw = ((w as f64 * ratio).round() as u32).max(1);
    let nh = ((h as f64 * ratio).round() as u32).max(1);
    (nw, nh)
}
