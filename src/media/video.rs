use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::foundation::error::{JuxtaError, JuxtaResult};
use crate::media::element::{
    FramePixels, ListenerSet, MediaElement, MediaEvent, MediaKind, ReadyState,
};

/// Frame-store-backed video source.
///
/// The host feeds decoded frames and advances the readiness ladder as data
/// "buffers"; the element exposes the playback surface the comparator
/// consumes (play/pause, current time, rate, seek notifications). Seeks
/// settle synchronously: assigning the current time emits seeking followed
/// by seeked before returning, matching the single-threaded event model.
pub struct VideoElement {
    state: RefCell<VideoState>,
    listeners: ListenerSet,
}

struct VideoState {
    width: u32,
    height: u32,
    fps: f64,
    frames: Vec<Rc<Vec<u8>>>,
    ready: ReadyState,
    playing: bool,
    current_time: f64,
    rate: f64,
}

impl VideoElement {
    /// Create an empty video element with known intrinsic size and rate.
    pub fn new(width: u32, height: u32, fps: f64) -> JuxtaResult<Self> {
        if width == 0 || height == 0 {
            return Err(JuxtaError::validation("video dimensions must be > 0"));
        }
        if !fps.is_finite() || fps <= 0.0 {
            return Err(JuxtaError::validation("video fps must be finite and > 0"));
        }
        Ok(Self {
            state: RefCell::new(VideoState {
                width,
                height,
                fps,
                frames: Vec::new(),
                ready: ReadyState::Nothing,
                playing: false,
                current_time: 0.0,
                rate: 1.0,
            }),
            listeners: ListenerSet::default(),
        })
    }

    /// Append one decoded frame of premultiplied RGBA8 pixels.
    pub fn push_frame(&self, data: Vec<u8>) -> JuxtaResult<()> {
        let mut state = self.state.borrow_mut();
        if data.len() != state.width as usize * state.height as usize * 4 {
            return Err(JuxtaError::validation("video frame byte length mismatch"));
        }
        state.frames.push(Rc::new(data));
        Ok(())
    }

    /// Move the readiness ladder, emitting the matching readiness events.
    ///
    /// Crossing into metadata emits loaded-metadata; crossing into
    /// future-data (or beyond) emits can-play. Lowering the state emits
    /// nothing.
    pub fn set_ready_state(&self, next: ReadyState) {
        let prev = {
            let mut state = self.state.borrow_mut();
            let prev = state.ready;
            state.ready = next;
            prev
        };
        if prev < ReadyState::Metadata && next >= ReadyState::Metadata {
            self.listeners.emit(MediaEvent::LoadedMetadata);
        }
        if prev < ReadyState::FutureData && next >= ReadyState::FutureData {
            self.listeners.emit(MediaEvent::CanPlay);
        }
    }

    /// Host clock hook: progress playback by `dt` scaled by the rate.
    ///
    /// Current time is clamped to the clip duration; the playing flag is
    /// left untouched at the end of the clip.
    pub fn advance(&self, dt: Duration) {
        let mut state = self.state.borrow_mut();
        if !state.playing || state.ready < ReadyState::Metadata {
            return;
        }
        let duration = duration_secs(&state);
        let t = state.current_time + dt.as_secs_f64() * state.rate;
        state.current_time = t.clamp(0.0, duration);
    }

    /// Clip duration in seconds derived from the stored frames.
    pub fn duration(&self) -> f64 {
        duration_secs(&self.state.borrow())
    }

    /// Current playback rate.
    pub fn playback_rate(&self) -> f64 {
        self.state.borrow().rate
    }

    /// Number of frames currently stored.
    pub fn frame_count(&self) -> usize {
        self.state.borrow().frames.len()
    }

    /// Drop all stored frames, e.g. when the host detaches the source.
    ///
    /// Subsequent draws of a comparator using this element become no-ops.
    pub fn clear_frames(&self) {
        self.state.borrow_mut().frames.clear();
    }
}

impl MediaElement for VideoElement {
    fn kind(&self) -> MediaKind {
        MediaKind::Video
    }

    fn ready_state(&self) -> ReadyState {
        self.state.borrow().ready
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        let state = self.state.borrow();
        if state.ready < ReadyState::Metadata {
            return None;
        }
        Some((state.width, state.height))
    }

    fn frame(&self) -> Option<FramePixels> {
        let state = self.state.borrow();
        if state.ready < ReadyState::Metadata || state.frames.is_empty() {
            return None;
        }
        let index = ((state.current_time * state.fps).floor().max(0.0) as usize)
            .min(state.frames.len() - 1);
        Some(FramePixels {
            width: state.width,
            height: state.height,
            data: Rc::clone(&state.frames[index]),
        })
    }

    fn play(&self) {
        self.state.borrow_mut().playing = true;
    }

    fn pause(&self) {
        self.state.borrow_mut().playing = false;
    }

    fn is_paused(&self) -> bool {
        !self.state.borrow().playing
    }

    fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    fn set_current_time(&self, seconds: f64) {
        {
            let mut state = self.state.borrow_mut();
            let duration = duration_secs(&state);
            state.current_time = seconds.clamp(0.0, duration);
        }
        self.listeners.emit(MediaEvent::Seeking);
        self.listeners.emit(MediaEvent::Seeked);
    }

    fn set_playback_rate(&self, rate: f64) {
        if rate.is_finite() && rate >= 0.0 {
            self.state.borrow_mut().rate = rate;
        }
    }

    fn once(&self, event: MediaEvent, listener: Box<dyn FnOnce()>) {
        self.listeners.once(event, listener);
    }

    fn on(&self, event: MediaEvent, listener: Box<dyn FnMut()>) {
        self.listeners.on(event, listener);
    }
}

fn duration_secs(state: &VideoState) -> f64 {
    state.frames.len() as f64 / state.fps
}

#[cfg(test)]
#[path = "../../tests/unit/media/video.rs"]
mod tests;
