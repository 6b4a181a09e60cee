use std::cell::RefCell;
use std::rc::Rc;

use crate::comparator::context::{Context, SourceSlot};
use crate::comparator::sync::wire_seek_sync;
use crate::foundation::core::{Canvas, Point, VIDEO_REPAINT_PERIOD, Vec2};
use crate::foundation::error::{JuxtaError, JuxtaResult};
use crate::media::element::{MediaKind, SharedMedia};
use crate::media::readiness::wait_for_media;
use crate::render::compositor::render_frame;
use crate::render::labels::{LabelArt, LabelEngine};
use crate::schedule::{Scheduler, TimerHandle};
use crate::settings::panel::SettingsPanel;

/// Side a compared child is designated for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Role {
    /// Drawn left of the divider.
    Left,
    /// Drawn right of the divider.
    Right,
}

/// One compared entry as declared by the host, before validation.
pub struct ComparedChild {
    /// The media element backing this entry.
    pub element: SharedMedia,
    /// Side designation. Both sides must be present across the children.
    pub role: Option<Role>,
    /// Optional overlay label text.
    pub label: Option<String>,
    /// Sampling offset in source pixel space.
    pub offset: Vec2,
}

/// A declared comparison: the compared children plus presentation inputs.
pub struct Container {
    /// Compared entries in declaration order.
    pub children: Vec<ComparedChild>,
    /// Font bytes used to shape overlay labels. Without a font, labels are
    /// skipped entirely.
    pub label_font: Option<Rc<Vec<u8>>>,
}

/// A fully initialized comparison, ready to repaint and take input.
///
/// Dropping the comparator cancels its repaint timer, so a torn-down
/// comparison stops consuming scheduler ticks.
pub struct Comparator {
    pub(crate) context: Rc<RefCell<Context>>,
    pub(crate) labels: Rc<[Option<LabelArt>; 2]>,
    pub(crate) scheduler: Rc<Scheduler>,
    pub(crate) frame_width: u32,
    pub(crate) frame_height: u32,
    settings: Option<SettingsPanel>,
    _repaint_timer: Option<TimerHandle>,
}

/// Validate a container and bring its comparison up.
///
/// The canvas takes the size of the first compared child in declaration
/// order. Exactly two children are accepted, and between them they must
/// carry the left and the right designation. Seek synchronization and the
/// repaint cadence are wired here, once; video-backed comparisons repaint
/// on a periodic timer, image-only ones draw a single deferred frame.
#[tracing::instrument(skip(container, scheduler))]
pub fn setup(container: &Container, scheduler: &Rc<Scheduler>) -> JuxtaResult<Comparator> {
    if container.children.is_empty() {
        return Err(JuxtaError::setup("comparator contains no compared element"));
    }

    let (width, height) = container.children[0]
        .element
        .natural_size()
        .ok_or_else(|| JuxtaError::setup("unable to determine the size of the compared element"))?;
    let canvas = Canvas::new(width, height)?;

    match container.children.len() {
        2 => {}
        1 => {
            return Err(JuxtaError::setup(
                "comparator contains a single compared element; exactly two are required",
            ));
        }
        _ => {
            return Err(JuxtaError::setup(
                "comparison not handled for more than two elements",
            ));
        }
    }

    let left = container
        .children
        .iter()
        .find(|c| c.role == Some(Role::Left));
    let right = container
        .children
        .iter()
        .find(|c| c.role == Some(Role::Right));
    let (Some(left), Some(right)) = (left, right) else {
        return Err(JuxtaError::setup(
            "comparator must contain a compared-left and a compared-right child",
        ));
    };

    let sources = [slot_for(left), slot_for(right)];

    let labels = Rc::new(match &container.label_font {
        Some(font) => {
            let mut engine = LabelEngine::new();
            [
                engine.layout_label(&sources[0].label, font)?,
                engine.layout_label(&sources[1].label, font)?,
            ]
        }
        None => [None, None],
    });

    if sources
        .iter()
        .all(|s| s.element.kind() == MediaKind::Video)
    {
        wire_seek_sync(&sources[0].element, &sources[1].element);
    }

    let context = Rc::new(RefCell::new(Context::new(canvas, sources)?));

    let has_video = context.borrow().has_video();
    let repaint_timer = if has_video {
        Some(scheduler.every(VIDEO_REPAINT_PERIOD, repaint_task(&context, &labels))?)
    } else {
        let mut task = repaint_task(&context, &labels);
        scheduler.defer(move || task());
        None
    };

    let settings = SettingsPanel::build(&context.borrow())?;

    tracing::debug!(width, height, has_video, "comparator ready");
    Ok(Comparator {
        context,
        labels,
        scheduler: Rc::clone(scheduler),
        frame_width: width,
        frame_height: height,
        settings,
        _repaint_timer: repaint_timer,
    })
}

/// Gate each container on its media readiness, then set it up.
///
/// Containers initialize independently: a failure is logged and dropped
/// without affecting the others. Successfully initialized comparators are
/// handed to `on_ready` as their media settles.
pub fn setup_comparators(
    containers: Vec<Container>,
    scheduler: &Rc<Scheduler>,
    on_ready: impl FnMut(Comparator) + 'static,
) {
    let on_ready = Rc::new(RefCell::new(on_ready));
    for container in containers {
        let elements: Vec<SharedMedia> = container
            .children
            .iter()
            .map(|c| Rc::clone(&c.element))
            .collect();
        let scheduler = Rc::clone(scheduler);
        let on_ready = Rc::clone(&on_ready);
        wait_for_media(elements, move || match setup(&container, &scheduler) {
            Ok(comparator) => (on_ready.borrow_mut())(comparator),
            Err(err) => tracing::error!(error = %err, "comparator setup failed"),
        });
    }
}

fn slot_for(child: &ComparedChild) -> SourceSlot {
    SourceSlot {
        element: Rc::clone(&child.element),
        label: child.label.clone().unwrap_or_default(),
        offset: child.offset,
    }
}

/// Repaint closure shared by the timer and deferred paths.
///
/// Render failures are logged and swallowed: one bad frame must not take
/// the cadence down with it.
fn repaint_task(
    context: &Rc<RefCell<Context>>,
    labels: &Rc<[Option<LabelArt>; 2]>,
) -> impl FnMut() + 'static {
    let context = Rc::clone(context);
    let labels = Rc::clone(labels);
    move || {
        let mut ctx = context.borrow_mut();
        if let Err(err) = render_frame(&mut ctx, &labels) {
            tracing::warn!(error = %err, "comparison repaint failed");
        }
    }
}

impl Comparator {
    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.frame_width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.frame_height
    }

    /// Current split point.
    pub fn split(&self) -> Point {
        self.context.borrow().split
    }

    /// Current magnification factor.
    pub fn zoom(&self) -> f64 {
        self.context.borrow().zoom
    }

    /// Current playback speed multiplier.
    pub fn speed(&self) -> f64 {
        self.context.borrow().speed
    }

    /// Copy of the composited canvas as premultiplied RGBA8 bytes.
    pub fn canvas_rgba8(&self) -> Vec<u8> {
        self.context.borrow().canvas_rgba8().to_vec()
    }

    /// Composite a frame right now, bypassing the scheduler.
    pub fn render_now(&self) -> JuxtaResult<()> {
        render_frame(&mut self.context.borrow_mut(), &self.labels)
    }

    /// Queue one repaint on the scheduler's deferred queue.
    pub(crate) fn defer_repaint(&self) {
        let mut task = repaint_task(&self.context, &self.labels);
        self.scheduler.defer(move || task());
    }

    /// Handle a click anywhere on the comparison: toggles playback.
    pub fn clicked(&mut self) {
        self.toggle_playback();
    }

    /// Flip play/pause on every video. No-op for image-only comparisons.
    pub fn toggle_playback(&mut self) {
        if let Some(settings) = &mut self.settings {
            settings.toggle().toggle();
        }
    }

    /// Commit a new playback speed through the settings panel.
    ///
    /// No-op for image-only comparisons, which carry no panel.
    pub fn set_speed(&mut self, raw: f64) {
        if let Some(settings) = &mut self.settings {
            settings.set_speed(&mut self.context.borrow_mut(), raw);
        }
    }

    /// The settings panel, present when the comparison involves video.
    pub fn settings(&self) -> Option<&SettingsPanel> {
        self.settings.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/comparator/setup.rs"]
mod tests;
