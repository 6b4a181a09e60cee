use std::rc::Rc;

use super::*;
use crate::{
    comparator::context::{Context, SourceSlot},
    foundation::core::Canvas,
    media::element::{MediaElement, MediaEvent, MediaKind, ReadyState, SharedMedia},
    media::image::ImageElement,
    media::video::VideoElement,
    render::labels::LabelEngine,
};

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn slot(element: SharedMedia) -> SourceSlot {
    SourceSlot {
        element,
        label: String::new(),
        offset: Vec2::ZERO,
    }
}

fn solid_ctx(width: u32, height: u32, left: [u8; 4], right: [u8; 4]) -> Context {
    let l: SharedMedia = Rc::new(ImageElement::solid(width, height, left).unwrap());
    let r: SharedMedia = Rc::new(ImageElement::solid(width, height, right).unwrap());
    Context::new(Canvas::new(width, height).unwrap(), [slot(l), slot(r)]).unwrap()
}

fn px(ctx: &Context, x: u32, y: u32) -> [u8; 4] {
    let i = 4 * (y * ctx.width() + x) as usize;
    let bytes = ctx.canvas_rgba8();
    [bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]
}

#[test]
fn split_separates_left_and_right_sources() {
    let mut ctx = solid_ctx(8, 4, GREEN, BLUE);
    render_frame(&mut ctx, &[None, None]).unwrap();

    for y in 0..4 {
        assert_eq!(px(&ctx, 0, y), GREEN);
        assert_eq!(px(&ctx, 3, y), GREEN);
        assert_eq!(px(&ctx, 4, y), DIVIDER_RGBA8.to_array());
        assert_eq!(px(&ctx, 5, y), BLUE);
        assert_eq!(px(&ctx, 7, y), BLUE);
    }
}

#[test]
fn divider_position_clamps_to_the_drawable_range() {
    let mut ctx = solid_ctx(8, 4, GREEN, BLUE);

    ctx.split.x = 5000.0;
    render_frame(&mut ctx, &[None, None]).unwrap();
    assert_eq!(px(&ctx, 6, 0), GREEN);
    assert_eq!(px(&ctx, 7, 0), DIVIDER_RGBA8.to_array());

    ctx.split.x = -40.0;
    render_frame(&mut ctx, &[None, None]).unwrap();
    assert_eq!(px(&ctx, 0, 0), GREEN);
    assert_eq!(px(&ctx, 1, 0), DIVIDER_RGBA8.to_array());
    assert_eq!(px(&ctx, 2, 0), BLUE);
}

#[test]
fn repaint_with_unchanged_state_is_idempotent() {
    let mut ctx = solid_ctx(16, 9, RED, BLUE);
    ctx.split.x = 5.0;

    render_frame(&mut ctx, &[None, None]).unwrap();
    let first = ctx.canvas_rgba8().to_vec();

    render_frame(&mut ctx, &[None, None]).unwrap();
    assert_eq!(ctx.canvas_rgba8(), first.as_slice());
}

#[test]
fn missing_frames_leave_the_canvas_untouched() {
    let video = Rc::new(VideoElement::new(8, 4, 25.0).unwrap());
    video.set_ready_state(ReadyState::EnoughData);

    let image: SharedMedia = Rc::new(ImageElement::solid(8, 4, RED).unwrap());
    let mut ctx = Context::new(
        Canvas::new(8, 4).unwrap(),
        [slot(video as SharedMedia), slot(image)],
    )
    .unwrap();

    render_frame(&mut ctx, &[None, None]).unwrap();
    assert!(ctx.canvas_rgba8().iter().all(|&b| b == 0));
}

#[test]
fn offsets_shift_sampling_in_source_space() {
    // Left source: a 4x4 gradient where each pixel encodes its own column.
    let mut data = Vec::with_capacity(4 * 4 * 4);
    for _y in 0..4 {
        for x in 0..4u8 {
            data.extend_from_slice(&[x * 10, 0, 0, 255]);
        }
    }
    let l: SharedMedia = Rc::new(ImageElement::from_rgba8_premul(4, 4, data).unwrap());
    let r: SharedMedia = Rc::new(ImageElement::solid(4, 4, BLUE).unwrap());
    let mut ctx = Context::new(Canvas::new(4, 4).unwrap(), [slot(l), slot(r)]).unwrap();

    ctx.sources[0].offset = Vec2::new(1.0, 0.0);
    render_frame(&mut ctx, &[None, None]).unwrap();
    // Column 0 samples source column 1.
    assert_eq!(px(&ctx, 0, 0), [10, 0, 0, 255]);
    assert_eq!(px(&ctx, 1, 0), [20, 0, 0, 255]);

    // Shifting past the source edge reads transparent.
    ctx.sources[0].offset = Vec2::new(100.0, 0.0);
    render_frame(&mut ctx, &[None, None]).unwrap();
    assert_eq!(px(&ctx, 0, 0), [0, 0, 0, 0]);
}

#[test]
fn mismatched_source_sizes_scale_to_the_canvas() {
    // A 4x4 right source under an 8x4 canvas: every canvas column x samples
    // source column x/2.
    let mut data = Vec::with_capacity(4 * 4 * 4);
    for _y in 0..4 {
        for x in 0..4u8 {
            data.extend_from_slice(&[0, x * 10, 0, 255]);
        }
    }
    let l: SharedMedia = Rc::new(ImageElement::solid(8, 4, RED).unwrap());
    let r: SharedMedia = Rc::new(ImageElement::from_rgba8_premul(4, 4, data).unwrap());
    let mut ctx = Context::new(Canvas::new(8, 4).unwrap(), [slot(l), slot(r)]).unwrap();

    render_frame(&mut ctx, &[None, None]).unwrap();
    assert_eq!(px(&ctx, 5, 0), [0, 20, 0, 255]);
    assert_eq!(px(&ctx, 6, 0), [0, 30, 0, 255]);
    assert_eq!(px(&ctx, 7, 0), [0, 30, 0, 255]);
}

/// Element whose frame claims a size its pixel buffer cannot back.
struct BogusFrameElement;

impl MediaElement for BogusFrameElement {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::EnoughData
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        Some((8, 4))
    }

    fn frame(&self) -> Option<FramePixels> {
        Some(FramePixels {
            width: 8,
            height: 4,
            data: Rc::new(vec![0; 7]),
        })
    }

    fn play(&self) {}

    fn pause(&self) {}

    fn is_paused(&self) -> bool {
        true
    }

    fn current_time(&self) -> f64 {
        0.0
    }

    fn set_current_time(&self, _seconds: f64) {}

    fn set_playback_rate(&self, _rate: f64) {}

    fn once(&self, _event: MediaEvent, _listener: Box<dyn FnOnce()>) {}

    fn on(&self, _event: MediaEvent, _listener: Box<dyn FnMut()>) {}
}

#[test]
fn frames_with_wrong_byte_length_are_render_errors() {
    let bogus: SharedMedia = Rc::new(BogusFrameElement);
    let image: SharedMedia = Rc::new(ImageElement::solid(8, 4, RED).unwrap());
    let mut ctx = Context::new(Canvas::new(8, 4).unwrap(), [slot(bogus), slot(image)]).unwrap();

    let err = render_frame(&mut ctx, &[None, None]).unwrap_err();
    assert!(matches!(err, JuxtaError::Render(_)));
    // Nothing was written before the frames were rejected.
    assert!(ctx.canvas_rgba8().iter().all(|&b| b == 0));
}

#[test]
fn labels_blend_a_background_over_their_corners() {
    let font = std::fs::read("tests/data/fonts/DejaVuSans.ttf").unwrap();
    let mut engine = LabelEngine::new();
    let labels = [
        engine.layout_label("L", &font).unwrap(),
        engine.layout_label("R", &font).unwrap(),
    ];
    let left_box = {
        let art = labels[0].as_ref().unwrap();
        label_box(art.width, art.height, LabelCorner::TopLeft, 200.0)
    };

    let mut ctx = solid_ctx(200, 120, GREEN, BLUE);
    render_frame(&mut ctx, &labels).unwrap();

    // Inside the label background the base color is blended with white.
    let corner = px(&ctx, 1, 1);
    assert_ne!(corner, GREEN);
    assert!(corner[0] > 0 && corner[2] > 0);
    assert_eq!(corner[3], 255);

    let right_corner = px(&ctx, 198, 1);
    assert_ne!(right_corner, BLUE);
    assert!(right_corner[0] > 0 && right_corner[1] > 0);

    // Below the background box the composite is untouched, and the divider
    // column survives the overlay.
    assert_eq!(px(&ctx, 1, left_box.y1 as u32 + 5), GREEN);
    assert_eq!(px(&ctx, 100, 60), DIVIDER_RGBA8.to_array());
}

#[test]
fn full_resolution_composite_keeps_the_layout() {
    let mut ctx = solid_ctx(800, 600, GREEN, BLUE);
    render_frame(&mut ctx, &[None, None]).unwrap();

    assert_eq!(px(&ctx, 0, 0), GREEN);
    assert_eq!(px(&ctx, 399, 599), GREEN);
    assert_eq!(px(&ctx, 400, 300), DIVIDER_RGBA8.to_array());
    assert_eq!(px(&ctx, 401, 0), BLUE);
    assert_eq!(px(&ctx, 799, 599), BLUE);
}
