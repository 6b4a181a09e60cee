use std::rc::Rc;

use anyhow::Context;

use crate::foundation::error::{JuxtaError, JuxtaResult};
use crate::media::element::{
    FramePixels, ListenerSet, MediaElement, MediaEvent, MediaKind, ReadyState,
};

/// Still image source, decoded up front and trivially ready.
///
/// Video-only operations are explicit no-ops; none of its events ever fire.
pub struct ImageElement {
    width: u32,
    height: u32,
    rgba8_premul: Rc<Vec<u8>>,
    listeners: ListenerSet,
}

impl ImageElement {
    /// Decode encoded image bytes and convert to premultiplied RGBA8.
    pub fn from_bytes(bytes: &[u8]) -> JuxtaResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();

        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self::from_rgba8_premul(width, height, rgba8_premul)
    }

    /// Wrap raw premultiplied RGBA8 pixels.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> JuxtaResult<Self> {
        if width == 0 || height == 0 {
            return Err(JuxtaError::validation("image dimensions must be > 0"));
        }
        if data.len() != width as usize * height as usize * 4 {
            return Err(JuxtaError::validation("image byte length mismatch"));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Rc::new(data),
            listeners: ListenerSet::default(),
        })
    }

    /// Solid-color image of the given size, useful for hosts and tests.
    pub fn solid(width: u32, height: u32, rgba8_premul: [u8; 4]) -> JuxtaResult<Self> {
        let n = width as usize * height as usize;
        let mut data = vec![0u8; n * 4];
        for px in data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba8_premul);
        }
        Self::from_rgba8_premul(width, height, data)
    }
}

impl MediaElement for ImageElement {
    fn kind(&self) -> MediaKind {
        MediaKind::Image
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::EnoughData
    }

    fn natural_size(&self) -> Option<(u32, u32)> {
        Some((self.width, self.height))
    }

    fn frame(&self) -> Option<FramePixels> {
        Some(FramePixels {
            width: self.width,
            height: self.height,
            data: Rc::clone(&self.rgba8_premul),
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

    fn once(&self, event: MediaEvent, listener: Box<dyn FnOnce()>) {
        // Registered but never fired; images are ready from construction.
        self.listeners.once(event, listener);
    }

    fn on(&self, event: MediaEvent, listener: Box<dyn FnMut()>) {
        self.listeners.on(event, listener);
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}
