use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

use crate::codec;
use crate::error::EngineError;
use crate::filters::{self, Modulate};
use crate::operation::Operation;

// 3x3 convolution kernels, row-major.
const LAPLACIAN_KERNEL: [f32; 9] = [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0];
const SOBEL_KERNEL: [f32; 9] = [-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0];
const EMBOSS_KERNEL: [f32; 9] = [-2.0, -1.0, 0.0, -1.0, 1.0, 1.0, 0.0, 1.0, 2.0];
const SHARPEN_KERNEL: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

// Tint colors.
const SEPIA_TINT: [u8; 3] = [0x70, 0x42, 0x14];
const COLORIZE_TINT: [u8; 3] = [0x33, 0x66, 0x99];
const VINTAGE_TINT: [u8; 3] = [0x9c, 0x66, 0x44];
const SOFT_VINTAGE_TINT: [u8; 3] = [0xb5, 0xae, 0xad];
const OLD_FILM_TINT: [u8; 3] = [0xe6, 0xd9, 0xb8];

/// Bounds for the effects that normalize output size (pixelate, pixel art,
/// grain, swirl).
const EFFECT_BOUNDS: u32 = 500;
/// Mosaic grid for the pixelation effects.
const PIXELATE_GRID: u32 = 10;
/// Luminance cutoff for threshold binarization.
const THRESHOLD_CUTOFF: u8 = 128;

/// Run one operation against a buffer: decode, transform, re-encode as JPEG.
pub fn apply(op: Operation, input: &[u8]) -> Result<Vec<u8>, EngineError> {
    let img = codec::decode(input)?;
    log::debug!(
        "{op}: decoded {}x{} input ({} bytes)",
        img.width(),
        img.height(),
        input.len()
    );
    let out = transform(op, img);
    codec::encode_jpeg(&out)
}

/// The dispatch table. Every routine is a short pipeline over decoded pixels;
/// multi-stage routines chain in memory, so no lossy re-encode happens
/// between stages.
pub fn transform(op: Operation, img: DynamicImage) -> DynamicImage {
    match op {
        // Geometry
        Operation::Rotate | Operation::RotateRight => img.rotate90(),
        Operation::RotateLeft => img.rotate270(),
        Operation::Rotate180 => img.rotate180(),
        Operation::Flip => img.flipv(),
        Operation::Flop => img.fliph(),
        Operation::Mirror => img.fliph().flipv(),
        Operation::Resize => img.resize_to_fill(300, 200, FilterType::Lanczos3),

        // Color and tone
        Operation::Grayscale => img.grayscale(),
        Operation::Sepia => filters::tint(&img.grayscale(), SEPIA_TINT),
        Operation::Threshold => filters::threshold(&img, THRESHOLD_CUTOFF),
        Operation::Saturate => filters::modulate(
            img,
            &Modulate {
                saturation: 2.0,
                ..Default::default()
            },
        ),
        Operation::Contrast => filters::modulate(
            img,
            &Modulate {
                contrast: 2.0,
                ..Default::default()
            },
        ),
        Operation::Brightness => filters::modulate(
            img,
            &Modulate {
                brightness: 2.0,
                ..Default::default()
            },
        ),
        Operation::BrightnessContrast => filters::modulate(
            img,
            &Modulate {
                brightness: 1.5,
                contrast: 1.5,
                ..Default::default()
            },
        ),
        Operation::GammaCorrection => filters::gamma(&img, 1.5),
        Operation::Colorize => filters::tint(&img, COLORIZE_TINT),
        Operation::VintageEffect => filters::tint(&img, VINTAGE_TINT),
        Operation::Warmify => filters::temperature(&img, 1.0),
        Operation::Coolify => filters::temperature(&img, -1.0),

        // Convolution and spatial filters
        Operation::Blur => img.blur(5.0),
        Operation::EdgeDetection => img.filter3x3(&LAPLACIAN_KERNEL),
        Operation::SobelEdgeDetection => img.grayscale().filter3x3(&SOBEL_KERNEL),
        Operation::Emboss => img.filter3x3(&EMBOSS_KERNEL),
        Operation::EdgeEnhancement => img.unsharpen(1.0, 0),
        Operation::Sharpen => img.filter3x3(&SHARPEN_KERNEL),
        Operation::OilPaint => filters::median(&img, 5),

        // Composite effects
        Operation::GrainEffect => {
            codec::fit_inside(img, EFFECT_BOUNDS, EFFECT_BOUNDS, FilterType::Triangle).blur(2.0)
        }
        Operation::SwirlEffect => filters::modulate(
            codec::fit_inside(img, EFFECT_BOUNDS, EFFECT_BOUNDS, FilterType::Triangle),
            &Modulate {
                hue: 50,
                ..Default::default()
            },
        ),
        Operation::PencilSketch => {
            let mut sketch = img.grayscale();
            sketch.invert();
            sketch.blur(1.0)
        }
        Operation::VibrantColors => filters::modulate(
            img,
            &Modulate {
                saturation: 2.0,
                brightness: 1.5,
                ..Default::default()
            },
        ),
        Operation::SoftVintage => {
            let toned = filters::modulate(
                img,
                &Modulate {
                    saturation: 0.8,
                    contrast: 1.2,
                    ..Default::default()
                },
            );
            filters::tint(&toned, SOFT_VINTAGE_TINT)
        }
        Operation::ComicBook => filters::modulate(
            img,
            &Modulate {
                saturation: 2.0,
                contrast: 1.5,
                ..Default::default()
            },
        )
        .grayscale(),
        Operation::OldFilm => {
            let toned = filters::modulate(
                img,
                &Modulate {
                    saturation: 0.8,
                    contrast: 1.5,
                    brightness: 0.8,
                    ..Default::default()
                },
            );
            filters::tint(&toned, OLD_FILM_TINT)
        }
        Operation::Pixelate => mosaic(img, false),
        Operation::PixelArt => mosaic(img, true),
    }
}

/// Mosaic: downsample to a tiny grid, then blow back up with nearest-neighbor
/// so the blocks stay crisp. Pixel art fills an exact square grid (cropping
/// to cover), while plain pixelation keeps the input's aspect in the grid.
/// The final size is the input's proportional fit within the effect bounds;
/// small inputs keep their original dimensions.
fn mosaic(img: DynamicImage, square_grid: bool) -> DynamicImage {
    let (w, h) = img.dimensions();
    let (out_w, out_h) = codec::fit_dimensions(w, h, EFFECT_BOUNDS, EFFECT_BOUNDS);

    let tiny = if square_grid {
        img.resize_to_fill(PIXELATE_GRID, PIXELATE_GRID, FilterType::Nearest)
    } else {
        codec::fit_inside(img, PIXELATE_GRID, PIXELATE_GRID, FilterType::Lanczos3)
    };
    tiny.resize_exact(out_w, out_h, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    /// A small image with enough structure that geometry bugs show up.
    fn gradient(w: u32, h: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(w, h, |x, y| {
            Rgb([
                (x * 255 / w.max(1)) as u8,
                (y * 255 / h.max(1)) as u8,
                ((x + y) % 256) as u8,
            ])
        }))
    }

    fn png_bytes(img: &DynamicImage) -> Vec<u8> {
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn test_every_operation_yields_nonempty_jpeg() {
        let input = png_bytes(&gradient(32, 24));
        for op in Operation::ALL {
            let out = apply(op, &input).unwrap_or_else(|e| panic!("{op} failed: {e}"));
            assert!(
                out.starts_with(&[0xFF, 0xD8]),
                "{op} did not produce JPEG bytes"
            );
        }
    }

    #[test]
    fn test_rotate_and_rotate_right_are_identical() {
        let input = png_bytes(&gradient(20, 14));
        let a = apply(Operation::Rotate, &input).unwrap();
        let b = apply(Operation::RotateRight, &input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mirror_is_flop_then_flip() {
        let img = gradient(17, 11);
        let mirrored = transform(Operation::Mirror, img.clone());
        let chained = transform(Operation::Flip, transform(Operation::Flop, img));
        assert_eq!(mirrored.to_rgb8(), chained.to_rgb8());
    }

    #[test]
    fn test_resize_fills_exact_dimensions() {
        let out = transform(Operation::Resize, gradient(1000, 800));
        assert_eq!(out.dimensions(), (300, 200));
    }

    #[test]
    fn test_rotate_swaps_dimensions() {
        let out = transform(Operation::Rotate, gradient(30, 20));
        assert_eq!(out.dimensions(), (20, 30));
    }

    #[test]
    fn test_grayscale_channels_equal_after_jpeg() {
        let input = png_bytes(&gradient(24, 24));
        let out = apply(Operation::Grayscale, &input).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_rgb8();
        for p in decoded.pixels() {
            let [r, g, b] = p.0;
            let spread = r.max(g).max(b) - r.min(g).min(b);
            assert!(spread <= 4, "channels diverge: {:?}", p.0);
        }
    }

    #[test]
    fn test_pixelate_bounds_large_input() {
        let out = transform(Operation::Pixelate, gradient(1000, 800));
        assert_eq!(out.dimensions(), (500, 400));
    }

    /// Number of uniform horizontal bands down the first column.
    fn vertical_bands(img: &DynamicImage) -> usize {
        let rgb = img.to_rgb8();
        let mut bands = 1;
        let mut prev = rgb.get_pixel(0, 0).0;
        for y in 1..rgb.height() {
            let p = rgb.get_pixel(0, y).0;
            if p != prev {
                bands += 1;
                prev = p;
            }
        }
        bands
    }

    #[test]
    fn test_pixel_art_fills_square_grid() {
        // Vertical gradient, so each mosaic row becomes one uniform band.
        let img = DynamicImage::ImageRgb8(RgbImage::from_fn(1000, 800, |_, y| {
            Rgb([(y / 4) as u8, 0, 0])
        }));

        // Cover-fit squashes to a full 10x10 grid regardless of aspect;
        // fit-inside keeps the 10x8 proportional grid.
        let art = transform(Operation::PixelArt, img.clone());
        assert_eq!(art.dimensions(), (500, 400));
        assert_eq!(vertical_bands(&art), 10);

        let pix = transform(Operation::Pixelate, img);
        assert_eq!(vertical_bands(&pix), 8);
    }

    #[test]
    fn test_pixelate_keeps_small_input_size() {
        for op in [Operation::Pixelate, Operation::PixelArt] {
            let out = transform(op, gradient(40, 30));
            assert_eq!(out.dimensions(), (40, 30), "{op} enlarged a small input");
        }
    }

    #[test]
    fn test_threshold_output_is_near_binary() {
        let dark = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([90, 90, 90])));
        let light = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([200, 200, 200])));

        let out = apply(Operation::Threshold, &png_bytes(&dark)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_luma8();
        assert!(decoded.pixels().all(|p| p.0[0] <= 10));

        let out = apply(Operation::Threshold, &png_bytes(&light)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap().to_luma8();
        assert!(decoded.pixels().all(|p| p.0[0] >= 245));
    }

    #[test]
    fn test_corrupt_input_is_a_decode_error() {
        let err = apply(Operation::Blur, b"\x00\x01\x02not-an-image").unwrap_err();
        assert!(matches!(err, EngineError::Decode(_)));
    }
}
