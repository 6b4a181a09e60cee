use std::sync::Arc;

use crate::foundation::core::{LABEL_FONT_SIZE_PX, LABEL_PAD_PX, Point, Rect};
use crate::foundation::error::{JuxtaError, JuxtaResult};

/// RGBA8 brush color used by Parley label layouts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LabelBrush {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl LabelBrush {
    /// Opaque black, the fixed label text color.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Which corner of the canvas a label is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelCorner {
    /// Source 0's label, anchored top-left.
    TopLeft,
    /// Source 1's label, anchored top-right.
    TopRight,
}

/// Shaped label ready for compositing: layout, backing font, and measured
/// text extents.
pub struct LabelArt {
    pub(crate) layout: Arc<parley::Layout<LabelBrush>>,
    pub(crate) font: vello_cpu::peniko::FontData,
    /// Measured text width in pixels.
    pub width: f64,
    /// Measured text height in pixels.
    pub height: f64,
}

/// Background box behind a label: measured text extents plus fixed padding
/// on every side, anchored to the top-left or top-right canvas corner.
///
/// The box always fully contains the text plus its padding.
pub fn label_box(text_width: f64, text_height: f64, corner: LabelCorner, canvas_width: f64) -> Rect {
    let w = LABEL_PAD_PX + text_width + LABEL_PAD_PX;
    let h = LABEL_PAD_PX + text_height + LABEL_PAD_PX;
    match corner {
        LabelCorner::TopLeft => Rect::new(0.0, 0.0, w, h),
        LabelCorner::TopRight => Rect::new(canvas_width - w, 0.0, canvas_width, h),
    }
}

/// Top-left position of the label text inside its background box.
pub fn text_origin(text_width: f64, corner: LabelCorner, canvas_width: f64) -> Point {
    match corner {
        LabelCorner::TopLeft => Point::new(LABEL_PAD_PX, LABEL_PAD_PX),
        LabelCorner::TopRight => {
            Point::new(canvas_width - LABEL_PAD_PX - text_width, LABEL_PAD_PX)
        }
    }
}

/// Stateful helper for building label layouts from raw font bytes.
pub struct LabelEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<LabelBrush>,
}

impl Default for LabelEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelEngine {
    /// Construct a new engine with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    /// Shape a label at the fixed size from the provided font bytes.
    ///
    /// Empty label text yields `Ok(None)`: absent labels draw as nothing.
    pub fn layout_label(&mut self, text: &str, font_bytes: &[u8]) -> JuxtaResult<Option<LabelArt>> {
        if text.is_empty() {
            return Ok(None);
        }
        if font_bytes.is_empty() {
            return Err(JuxtaError::validation("label font bytes must be non-empty"));
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            JuxtaError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| JuxtaError::validation("registered font family has no name"))?
            .to_string();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(LABEL_FONT_SIZE_PX));
        builder.push_default(parley::style::StyleProperty::Brush(LabelBrush::BLACK));

        let mut layout: parley::Layout<LabelBrush> = builder.build(text);
        layout.break_all_lines(None);

        let width = f64::from(layout.width());
        let height = f64::from(layout.height());
        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes.to_vec()), 0);

        Ok(Some(LabelArt {
            layout: Arc::new(layout),
            font,
            width,
            height,
        }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/labels.rs"]
mod tests;
