use std::fmt;
use std::str::FromStr;

/// The fixed set of transformations the service exposes. Identifiers are
/// matched case-sensitively against the exact wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Rotate,
    EdgeDetection,
    EdgeEnhancement,
    Grayscale,
    Blur,
    Resize,
    Emboss,
    Sepia,
    Threshold,
    Saturate,
    Contrast,
    Brightness,
    Pixelate,
    OilPaint,
    Sharpen,
    Rotate180,
    Colorize,
    Flip,
    Flop,
    BrightnessContrast,
    RotateLeft,
    RotateRight,
    GammaCorrection,
    VintageEffect,
    GrainEffect,
    SwirlEffect,
    Mirror,
    PencilSketch,
    SobelEdgeDetection,
    VibrantColors,
    SoftVintage,
    ComicBook,
    Warmify,
    Coolify,
    OldFilm,
    PixelArt,
}

impl Operation {
    /// Every supported operation, in wire-identifier order.
    pub const ALL: [Operation; 36] = [
        Operation::Rotate,
        Operation::EdgeDetection,
        Operation::EdgeEnhancement,
        Operation::Grayscale,
        Operation::Blur,
        Operation::Resize,
        Operation::Emboss,
        Operation::Sepia,
        Operation::Threshold,
        Operation::Saturate,
        Operation::Contrast,
        Operation::Brightness,
        Operation::Pixelate,
        Operation::OilPaint,
        Operation::Sharpen,
        Operation::Rotate180,
        Operation::Colorize,
        Operation::Flip,
        Operation::Flop,
        Operation::BrightnessContrast,
        Operation::RotateLeft,
        Operation::RotateRight,
        Operation::GammaCorrection,
        Operation::VintageEffect,
        Operation::GrainEffect,
        Operation::SwirlEffect,
        Operation::Mirror,
        Operation::PencilSketch,
        Operation::SobelEdgeDetection,
        Operation::VibrantColors,
        Operation::SoftVintage,
        Operation::ComicBook,
        Operation::Warmify,
        Operation::Coolify,
        Operation::OldFilm,
        Operation::PixelArt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Rotate => "rotate",
            Operation::EdgeDetection => "edgeDetection",
            Operation::EdgeEnhancement => "edgeEnhancement",
            Operation::Grayscale => "grayscale",
            Operation::Blur => "blur",
            Operation::Resize => "resize",
            Operation::Emboss => "emboss",
            Operation::Sepia => "sepia",
            Operation::Threshold => "threshold",
            Operation::Saturate => "saturate",
            Operation::Contrast => "contrast",
            Operation::Brightness => "brightness",
            Operation::Pixelate => "pixelate",
            Operation::OilPaint => "oilPaint",
            Operation::Sharpen => "sharpen",
            Operation::Rotate180 => "rotate180",
            Operation::Colorize => "colorize",
            Operation::Flip => "flip",
            Operation::Flop => "flop",
            Operation::BrightnessContrast => "brightnessContrast",
            Operation::RotateLeft => "rotateLeft",
            Operation::RotateRight => "rotateRight",
            Operation::GammaCorrection => "gammaCorrection",
            Operation::VintageEffect => "vintageEffect",
            Operation::GrainEffect => "grainEffect",
            Operation::SwirlEffect => "swirlEffect",
            Operation::Mirror => "mirror",
            Operation::PencilSketch => "pencilSketch",
            Operation::SobelEdgeDetection => "sobelEdgeDetection",
            Operation::VibrantColors => "vibrantColors",
            Operation::SoftVintage => "softVintage",
            Operation::ComicBook => "comicBook",
            Operation::Warmify => "warmify",
            Operation::Coolify => "coolify",
            Operation::OldFilm => "oldFilm",
            Operation::PixelArt => "pixelArt",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or_else(|| format!("unknown operation: {s}"))
    }
}
