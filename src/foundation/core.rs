use crate::foundation::error::{OdotsError, OdotsResult};

pub use kurbo::{Affine, BezPath, Circle, Point, Rect, Vec2};

/// Absolute 0-based tick/frame index within one animation cycle.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create validated dimensions.
    ///
    /// The CPU rasterizer addresses pixmaps with `u16` coordinates, so both
    /// sides must be non-zero and fit in `u16`.
    pub fn new(width: u32, height: u32) -> OdotsResult<Self> {
        if width == 0 || height == 0 {
            return Err(OdotsError::validation("canvas width/height must be non-zero"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(OdotsError::validation("canvas width/height must fit in u16"));
        }
        Ok(Self { width, height })
    }

    /// Shorter canvas side, the base length most scene metrics derive from.
    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    /// Fully opaque color from RGB channels.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Premultiply the color channels by alpha.
    pub fn premultiply(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}
