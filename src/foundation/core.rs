use std::time::Duration;

use crate::foundation::error::{JuxtaError, JuxtaResult};

pub use kurbo::{Point, Rect, Vec2};

/// Repaint period used while any compared source is a video (~25 fps).
pub const VIDEO_REPAINT_PERIOD: Duration = Duration::from_millis(40);

/// Divider accent color (opaque red).
pub const DIVIDER_RGBA8: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};

/// Fixed label font size in pixels.
pub const LABEL_FONT_SIZE_PX: f32 = 50.0;

/// Padding around label text on each side, in canvas pixels.
pub const LABEL_PAD_PX: f64 = 10.0;

/// Opacity of the white box behind label text.
pub const LABEL_BACKGROUND_ALPHA: f32 = 0.8;

/// Destination raster dimensions, fixed at comparator creation.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Validate and build canvas dimensions.
    ///
    /// The CPU surface indexes pixels with `u16` coordinates, so dimensions
    /// must be non-zero and fit in `u16`. Width must leave room for at
    /// least one column beside the divider, so it is bounded below by 2.
    pub fn new(width: u32, height: u32) -> JuxtaResult<Self> {
        if width < 2 || height == 0 {
            return Err(JuxtaError::validation(
                "canvas needs a width of at least 2 and a non-zero height",
            ));
        }
        if u16::try_from(width).is_err() || u16::try_from(height).is_err() {
            return Err(JuxtaError::validation("canvas dimensions exceed u16"));
        }
        Ok(Self { width, height })
    }

    /// Exact frame center, where the divider starts.
    pub fn center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent pixel.
    pub const fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// The pixel as raw `[r, g, b, a]` bytes for surface writes.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Convert a straight-alpha color to premultiplied form.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }
}

/// Clamp a stored split position to the drawable divider range.
///
/// The stored value may transiently exceed canvas bounds; clamping happens
/// only at render time so that neither side of the composite ever covers a
/// zero-width region.
pub fn clamp_split_x(x: f64, width: u32) -> u32 {
    let max = f64::from(width.saturating_sub(1)).max(1.0);
    x.clamp(1.0, max) as u32
}
