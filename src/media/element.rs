use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to a media element owned by the host.
///
/// All access is confined to a single logical thread of control, so handles
/// are `Rc`-shared with interior mutability behind the trait.
pub type SharedMedia = Rc<dyn MediaElement>;

/// Kind of a compared media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Still image; video-only calls are no-ops.
    Image,
    /// Video with playback state and a current time.
    Video,
}

/// Host readiness ladder, mirroring the usual media-element states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReadyState {
    /// Nothing is known about the source yet.
    Nothing,
    /// Metadata (natural size, duration) is available.
    Metadata,
    /// Data for the current position is available.
    CurrentData,
    /// Enough data to start playing.
    FutureData,
    /// Enough data to play through without stalling.
    EnoughData,
}

/// Events a media element can notify listeners about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    /// Metadata became available; natural size is now known.
    LoadedMetadata,
    /// Enough data buffered to begin playback.
    CanPlay,
    /// A seek started.
    Seeking,
    /// A seek settled.
    Seeked,
}

/// Snapshot of the element's current frame as premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct FramePixels {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Row-major premultiplied RGBA8 bytes, `width * height * 4` long.
    pub data: Rc<Vec<u8>>,
}

/// Capabilities the comparator consumes from a host media element.
///
/// Image implementations must guard the video-only operations explicitly
/// (no-ops) rather than relying on host leniency.
pub trait MediaElement {
    /// Image or video.
    fn kind(&self) -> MediaKind;

    /// Current readiness state.
    fn ready_state(&self) -> ReadyState;

    /// Natural (image) or intrinsic (video) size, once metadata is known.
    fn natural_size(&self) -> Option<(u32, u32)>;

    /// Pixels to composite for the current position, if any are available.
    fn frame(&self) -> Option<FramePixels>;

    /// Start playback. No-op for images.
    fn play(&self);

    /// Pause playback. No-op for images.
    fn pause(&self);

    /// Whether playback is currently paused. Always true for images.
    fn is_paused(&self) -> bool;

    /// Current playback position in seconds. Zero for images.
    fn current_time(&self) -> f64;

    /// Seek to a position. Emits seeking/seeked on videos; no-op for images.
    fn set_current_time(&self, seconds: f64);

    /// Set the playback rate. No-op for images.
    fn set_playback_rate(&self, rate: f64);

    /// Register a one-shot listener, dropped after its first invocation.
    fn once(&self, event: MediaEvent, listener: Box<dyn FnOnce()>);

    /// Register a persistent listener invoked on every occurrence.
    fn on(&self, event: MediaEvent, listener: Box<dyn FnMut()>);
}

/// Listener storage shared by the media implementations.
///
/// Dispatch snapshots the matching listeners and invokes them outside any
/// internal borrow, so listeners may freely call back into the element.
#[derive(Default)]
pub(crate) struct ListenerSet {
    once: RefCell<Vec<(MediaEvent, Box<dyn FnOnce()>)>>,
    every: RefCell<Vec<(MediaEvent, Rc<RefCell<Box<dyn FnMut()>>>)>>,
}

impl ListenerSet {
    pub(crate) fn once(&self, event: MediaEvent, listener: Box<dyn FnOnce()>) {
        self.once.borrow_mut().push((event, listener));
    }

    pub(crate) fn on(&self, event: MediaEvent, listener: Box<dyn FnMut()>) {
        self.every
            .borrow_mut()
            .push((event, Rc::new(RefCell::new(listener))));
    }

    pub(crate) fn emit(&self, event: MediaEvent) {
        let fired: Vec<Box<dyn FnOnce()>> = {
            let mut once = self.once.borrow_mut();
            let mut fired = Vec::new();
            let mut i = 0;
            while i < once.len() {
                if once[i].0 == event {
                    fired.push(once.remove(i).1);
                } else {
                    i += 1;
                }
            }
            fired
        };
        let persistent: Vec<Rc<RefCell<Box<dyn FnMut()>>>> = self
            .every
            .borrow()
            .iter()
            .filter(|(e, _)| *e == event)
            .map(|(_, l)| Rc::clone(l))
            .collect();

        for listener in fired {
            listener();
        }
        for listener in persistent {
            (listener.borrow_mut())();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/element.rs"]
mod tests;
