use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::JuxtaResult;
use crate::media::element::{MediaKind, SharedMedia};

/// One compared source with its overlay label and sampling offset.
pub struct SourceSlot {
    /// The media element supplying pixels.
    pub element: SharedMedia,
    /// Label text drawn over this source's half. Empty draws nothing.
    pub label: String,
    /// Shift applied to sample positions, in source pixel space.
    pub offset: Vec2,
}

/// Numeric context field a settings control can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ContextField {
    /// Playback speed multiplier, [`Context::speed`].
    Speed,
    /// Magnification factor, [`Context::zoom`].
    Zoom,
}

/// Mutable comparison state shared by rendering, interaction, and settings.
///
/// The split point is stored unclamped; clamping to the drawable range
/// happens at render time. Zoom is carried as state for magnification
/// controls but does not yet affect compositing.
pub struct Context {
    pub(crate) canvas: vello_cpu::Pixmap,
    /// The two compared sources, left then right.
    pub sources: [SourceSlot; 2],
    /// Divider position; only the x coordinate affects compositing.
    pub split: Point,
    /// Magnification factor.
    pub zoom: f64,
    /// Playback speed multiplier in [0, 1].
    pub speed: f64,
}

impl Context {
    /// Build the shared state with its defaults: split at the canvas
    /// center, zoom 4, full speed.
    pub fn new(canvas: Canvas, sources: [SourceSlot; 2]) -> JuxtaResult<Self> {
        Ok(Self {
            // Canvas::new already bounds the dimensions to u16.
            canvas: vello_cpu::Pixmap::new(canvas.width as u16, canvas.height as u16),
            sources,
            split: canvas.center(),
            zoom: 4.0,
            speed: 1.0,
        })
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        u32::from(self.canvas.width())
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.canvas.height())
    }

    /// The composited canvas as premultiplied RGBA8 bytes.
    pub fn canvas_rgba8(&self) -> &[u8] {
        self.canvas.data_as_u8_slice()
    }

    /// Assign a numeric field by its binding.
    pub fn set_field(&mut self, field: ContextField, value: f64) {
        match field {
            ContextField::Speed => self.speed = value,
            ContextField::Zoom => self.zoom = value,
        }
    }

    /// Whether any compared source is a video.
    pub fn has_video(&self) -> bool {
        self.sources
            .iter()
            .any(|s| s.element.kind() == MediaKind::Video)
    }

    /// Handles to the video sources, in slot order.
    pub fn videos(&self) -> Vec<SharedMedia> {
        self.sources
            .iter()
            .filter(|s| s.element.kind() == MediaKind::Video)
            .map(|s| std::rc::Rc::clone(&s.element))
            .collect()
    }
}
