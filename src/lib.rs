//! Juxta is a side-by-side media comparison engine.
//!
//! A comparison pairs two images or two videos on one canvas, split by a
//! draggable vertical divider: the left source fills the columns left of
//! the divider, the right source the rest. Videos play in sync and repaint
//! on a fixed cadence; a settings panel exposes play/pause and a playback
//! speed slider.
//!
//! # Lifecycle
//!
//! 1. **Declare**: the host describes each comparison as a [`Container`] of
//!    [`ComparedChild`] entries backed by [`MediaElement`] handles.
//! 2. **Gate**: [`setup_comparators`] waits for every compared element's
//!    metadata before touching it, starting videos as they become playable.
//! 3. **Run**: each [`Comparator`] repaints through the shared
//!    [`Scheduler`] — a periodic timer for video, a single deferred frame
//!    for stills — and takes pointer input to move the divider.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-threaded**: all state is `Rc`-shared and scheduler-driven;
//!   nothing blocks.
//! - **Premultiplied RGBA8** end-to-end: sources supply premultiplied
//!   pixels and the canvas stays premultiplied.
//! - **Non-fatal comparisons**: one comparator failing to initialize or
//!   repaint never takes down its siblings.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod comparator;
mod foundation;
mod media;
mod render;
mod schedule;
mod settings;

pub use comparator::context::{Context, ContextField, SourceSlot};
pub use comparator::setup::{
    Comparator, ComparedChild, Container, Role, setup, setup_comparators,
};
pub use foundation::core::{
    Canvas, DIVIDER_RGBA8, LABEL_BACKGROUND_ALPHA, LABEL_FONT_SIZE_PX, LABEL_PAD_PX, Point, Rect,
    Rgba8Premul, VIDEO_REPAINT_PERIOD, Vec2, clamp_split_x,
};
pub use foundation::error::{JuxtaError, JuxtaResult};
pub use media::element::{
    FramePixels, MediaElement, MediaEvent, MediaKind, ReadyState, SharedMedia,
};
pub use media::image::ImageElement;
pub use media::readiness::wait_for_media;
pub use media::video::VideoElement;
pub use render::compositor::render_frame;
pub use render::labels::{LabelArt, LabelBrush, LabelCorner, LabelEngine, label_box, text_origin};
pub use schedule::{Scheduler, TimerHandle};
pub use settings::panel::{PlayToggle, SettingsPanel, Slider};
