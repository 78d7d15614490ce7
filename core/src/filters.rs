//! Pixel-level color primitives the `image` crate does not ship: channel
//! modulation, luminance tint, gamma LUT, threshold binarization, color
//! temperature shift, and a window median filter.

use image::{DynamicImage, ImageBuffer, Rgb};

/// Rec. 709 luma weights, matching `image`'s own grayscale conversion.
fn luma(r: f32, g: f32, b: f32) -> f32 {
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// Multiplicative adjustments applied together in one pass. A factor of 1.0
/// (or hue 0) leaves that property unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Modulate {
    pub brightness: f32,
    pub saturation: f32,
    pub contrast: f32,
    /// Hue rotation in degrees.
    pub hue: i32,
}

impl Default for Modulate {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            saturation: 1.0,
            contrast: 1.0,
            hue: 0,
        }
    }
}

/// Apply brightness, saturation, contrast and hue adjustments. Brightness
/// scales all channels, saturation interpolates against per-pixel luma,
/// contrast expands around mid-gray, hue delegates to `huerotate`.
pub fn modulate(img: DynamicImage, m: &Modulate) -> DynamicImage {
    let img = if m.hue != 0 { img.huerotate(m.hue) } else { img };

    let mut rgb = img.into_rgb8();
    for p in rgb.pixels_mut() {
        let mut r = p.0[0] as f32 * m.brightness;
        let mut g = p.0[1] as f32 * m.brightness;
        let mut b = p.0[2] as f32 * m.brightness;

        let l = luma(r, g, b);
        r = l + (r - l) * m.saturation;
        g = l + (g - l) * m.saturation;
        b = l + (b - l) * m.saturation;

        r = (r - 128.0) * m.contrast + 128.0;
        g = (g - 128.0) * m.contrast + 128.0;
        b = (b - 128.0) * m.contrast + 128.0;

        p.0 = [clamp_u8(r), clamp_u8(g), clamp_u8(b)];
    }
    DynamicImage::ImageRgb8(rgb)
}

/// Replace chroma with the given color, scaled by per-pixel luminance.
/// Black stays black, white maps to the tint color itself.
pub fn tint(img: &DynamicImage, color: [u8; 3]) -> DynamicImage {
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();

    let mut out = ImageBuffer::new(w, h);
    for (x, y, p) in gray.enumerate_pixels() {
        let l = p.0[0] as u16;
        let scaled = color.map(|c| ((l * c as u16) / 255) as u8);
        out.put_pixel(x, y, Rgb(scaled));
    }
    DynamicImage::ImageRgb8(out)
}

/// Power-law (gamma) correction via a 256-entry lookup table.
/// `gamma > 1` lightens, `gamma < 1` darkens.
pub fn gamma(img: &DynamicImage, gamma: f32) -> DynamicImage {
    let exp = 1.0 / gamma;
    let lut: [u8; 256] =
        std::array::from_fn(|i| clamp_u8(255.0 * (i as f32 / 255.0).powf(exp)));

    let mut rgb = img.to_rgb8();
    for p in rgb.pixels_mut() {
        p.0 = p.0.map(|c| lut[c as usize]);
    }
    DynamicImage::ImageRgb8(rgb)
}

/// Binarize on luminance: pixels at or above the cutoff become white,
/// everything else black.
pub fn threshold(img: &DynamicImage, cutoff: u8) -> DynamicImage {
    let mut gray = img.to_luma8();
    for p in gray.pixels_mut() {
        p.0[0] = if p.0[0] >= cutoff { 255 } else { 0 };
    }
    DynamicImage::ImageLuma8(gray)
}

/// Warm or cool the image by shifting the red/blue balance. `warmth` ranges
/// over [-1, 1]: positive boosts red and damps blue, negative the reverse.
pub fn temperature(img: &DynamicImage, warmth: f32) -> DynamicImage {
    let warmth = warmth.clamp(-1.0, 1.0);
    let r_gain = 1.0 + 0.2 * warmth;
    let b_gain = 1.0 - 0.2 * warmth;

    let mut rgb = img.to_rgb8();
    for p in rgb.pixels_mut() {
        p.0[0] = clamp_u8(p.0[0] as f32 * r_gain);
        p.0[2] = clamp_u8(p.0[2] as f32 * b_gain);
    }
    DynamicImage::ImageRgb8(rgb)
}

/// Per-channel median over a square window of the given size (so size 5 is a
/// 5x5 neighborhood). Edges are handled by clamping coordinates. Quadratic in
/// the window size but fine for the small windows the service uses.
pub fn median(img: &DynamicImage, size: u32) -> DynamicImage {
    let src = img.to_rgb8();
    let (w, h) = src.dimensions();
    let radius = (size / 2) as i64;

    let mut out = ImageBuffer::new(w, h);
    let mut window: [Vec<u8>; 3] = Default::default();

    for y in 0..h {
        for x in 0..w {
            for ch in window.iter_mut() {
                ch.clear();
            }
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let sx = (x as i64 + dx).clamp(0, w as i64 - 1) as u32;
                    let sy = (y as i64 + dy).clamp(0, h as i64 - 1) as u32;
                    let p = src.get_pixel(sx, sy);
                    for (ch, &v) in window.iter_mut().zip(p.0.iter()) {
                        ch.push(v);
                    }
                }
            }
            let mut pixel = [0u8; 3];
            for (c, ch) in window.iter_mut().enumerate() {
                ch.sort_unstable();
                pixel[c] = ch[ch.len() / 2];
            }
            out.put_pixel(x, y, Rgb(pixel));
        }
    }
    DynamicImage::ImageRgb8(out)
}
