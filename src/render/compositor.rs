use crate::comparator::context::Context;
use crate::foundation::core::{
    DIVIDER_RGBA8, LABEL_BACKGROUND_ALPHA, Rgba8Premul, Vec2, clamp_split_x,
};
use crate::foundation::error::{JuxtaError, JuxtaResult};
use crate::media::element::FramePixels;
use crate::render::labels::{LabelArt, LabelCorner, label_box, text_origin};

/// Composite one comparison frame into the context's canvas.
///
/// Layout is recomputed from scratch on every call: source 0 fills the
/// columns left of the divider, source 1 the columns from the divider to the
/// right edge, then the divider column and the label overlay are drawn on
/// top. Repainting with unchanged state is byte-for-byte idempotent.
///
/// If either source cannot provide pixels yet the canvas is left untouched
/// and the call succeeds; a later repaint will pick the frame up. A frame
/// whose byte length does not match its claimed dimensions is a render
/// error, not a panic.
pub fn render_frame(ctx: &mut Context, labels: &[Option<LabelArt>; 2]) -> JuxtaResult<()> {
    let Some(frame0) = ctx.sources[0].element.frame() else {
        return Ok(());
    };
    let Some(frame1) = ctx.sources[1].element.frame() else {
        return Ok(());
    };
    check_frame(&frame0)?;
    check_frame(&frame1)?;

    let width = ctx.width();
    let height = ctx.height();
    let split_x = clamp_split_x(ctx.split.x, width);
    let offsets = [ctx.sources[0].offset, ctx.sources[1].offset];

    let bytes = ctx.canvas.data_as_u8_slice_mut();
    blit_scaled(bytes, width, height, &frame0, offsets[0], 0, split_x);
    blit_scaled(bytes, width, height, &frame1, offsets[1], split_x, width);
    draw_divider(bytes, width, height, split_x);

    overlay_labels(ctx, labels)
}

/// Write one source's pixels into the destination columns `[x0, x1)`.
///
/// Sampling is nearest-neighbor over the full canvas extent, so a source
/// matching the canvas size maps one-to-one. The per-source offset shifts
/// the sample position in source pixel space; samples falling outside the
/// source are transparent. Destination bytes are replaced, not blended.
fn blit_scaled(
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    frame: &FramePixels,
    offset: Vec2,
    x0: u32,
    x1: u32,
) {
    let src_w = frame.width as i64;
    let src_h = frame.height as i64;
    let sx_scale = f64::from(frame.width) / f64::from(dst_width);
    let sy_scale = f64::from(frame.height) / f64::from(dst_height);

    for y in 0..dst_height {
        let sy = (f64::from(y) * sy_scale + offset.y).floor() as i64;
        for x in x0..x1 {
            let sx = (f64::from(x) * sx_scale + offset.x).floor() as i64;
            let di = 4 * (y as usize * dst_width as usize + x as usize);
            let px: [u8; 4] = if sx >= 0 && sx < src_w && sy >= 0 && sy < src_h {
                let si = 4 * (sy as usize * frame.width as usize + sx as usize);
                [
                    frame.data[si],
                    frame.data[si + 1],
                    frame.data[si + 2],
                    frame.data[si + 3],
                ]
            } else {
                Rgba8Premul::transparent().to_array()
            };
            dst[di..di + 4].copy_from_slice(&px);
        }
    }
}

/// Paint the divider column over the composite.
fn draw_divider(dst: &mut [u8], dst_width: u32, dst_height: u32, split_x: u32) {
    for y in 0..dst_height {
        let di = 4 * (y as usize * dst_width as usize + split_x as usize);
        dst[di..di + 4].copy_from_slice(&DIVIDER_RGBA8.to_array());
    }
}

/// Reject frames whose pixel buffer disagrees with their claimed size.
fn check_frame(frame: &FramePixels) -> JuxtaResult<()> {
    let expected = frame.width as usize * frame.height as usize * 4;
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(JuxtaError::render(format!(
            "source frame claims {}x{} but carries {} bytes",
            frame.width,
            frame.height,
            frame.data.len()
        )));
    }
    Ok(())
}

/// Render the label boxes and glyphs into a scratch surface and blend it
/// over the composite.
fn overlay_labels(ctx: &mut Context, labels: &[Option<LabelArt>; 2]) -> JuxtaResult<()> {
    if labels.iter().all(Option::is_none) {
        return Ok(());
    }
    let canvas_width = f64::from(ctx.width());
    let width = ctx.canvas.width();
    let height = ctx.canvas.height();

    let mut scene = vello_cpu::RenderContext::new(width, height);
    for (index, art) in labels.iter().enumerate() {
        let Some(art) = art else {
            continue;
        };
        let corner = if index == 0 {
            LabelCorner::TopLeft
        } else {
            LabelCorner::TopRight
        };

        let rect = label_box(art.width, art.height, corner, canvas_width);
        scene.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        scene.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
        scene.push_opacity_layer(LABEL_BACKGROUND_ALPHA);
        scene.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
        scene.pop_layer();

        let origin = text_origin(art.width, corner, canvas_width);
        scene.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in art.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                scene.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                scene
                    .glyph_run(&art.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }
    scene.flush();

    let mut overlay = vello_cpu::Pixmap::new(width, height);
    scene.render_to_pixmap(&mut overlay);
    over_in_place(ctx.canvas.data_as_u8_slice_mut(), overlay.data_as_u8_slice());
    Ok(())
}

/// Source-over blend of premultiplied RGBA8 `src` onto `dst`, in place.
fn over_in_place(dst: &mut [u8], src: &[u8]) {
    debug_assert_eq!(dst.len(), src.len());
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = s[3];
        if sa == 0 {
            continue;
        }
        let inv = 255 - sa;
        for i in 0..4 {
            d[i] = add_sat_u8(s[i], mul_div255(d[i], inv));
        }
    }
}

#[inline]
fn mul_div255(x: u8, y: u8) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[inline]
fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
