use crate::comparator::context::{Context, ContextField};
use crate::foundation::error::{JuxtaError, JuxtaResult};
use crate::media::element::SharedMedia;

/// A bounded numeric control bound to one context field.
///
/// The slider keeps its committed value, its display string, and the bound
/// context field consistent: they only ever change together through
/// [`Slider::commit`].
pub struct Slider {
    name: String,
    min: f64,
    max: f64,
    step: f64,
    field: ContextField,
    value: f64,
    display: String,
}

impl Slider {
    /// Validate and build a slider with its initial committed value.
    pub fn new(
        name: &str,
        min: f64,
        max: f64,
        step: f64,
        initial: f64,
        field: ContextField,
    ) -> JuxtaResult<Self> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(JuxtaError::validation("slider range must be finite and non-empty"));
        }
        if !step.is_finite() || step <= 0.0 {
            return Err(JuxtaError::validation("slider step must be finite and > 0"));
        }
        if !(min..=max).contains(&initial) {
            return Err(JuxtaError::validation("slider initial value out of range"));
        }
        Ok(Self {
            name: name.to_string(),
            min,
            max,
            step,
            field,
            value: initial,
            display: format_value(initial),
        })
    }

    /// Commit a new raw value: snap it to the step grid, clamp it to the
    /// range, then update the stored value, the display string, and the
    /// bound context field in one go.
    pub fn commit(&mut self, ctx: &mut Context, raw: f64) -> f64 {
        let steps = ((raw - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Scrub the float noise the step multiplication introduces.
        let snapped = (snapped * 1e10).round() / 1e10;
        let value = snapped.clamp(self.min, self.max);
        self.value = value;
        self.display = format_value(value);
        ctx.set_field(self.field, value);
        value
    }

    /// Control name shown next to the slider.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last committed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Display string for the last committed value.
    pub fn display(&self) -> &str {
        &self.display
    }
}

fn format_value(value: f64) -> String {
    format!("{value}")
}

/// Play/pause control driving every video in lockstep.
///
/// The playing flag is cached here rather than re-derived from element
/// state, so the control stays consistent even if individual elements are
/// paused behind its back.
pub struct PlayToggle {
    playing: bool,
    videos: Vec<SharedMedia>,
}

impl PlayToggle {
    /// Flip between playing and paused, applying the new state to every
    /// video.
    pub fn toggle(&mut self) {
        if self.playing {
            for video in &self.videos {
                video.pause();
            }
        } else {
            for video in &self.videos {
                video.play();
            }
        }
        self.playing = !self.playing;
    }

    /// Cached playing state.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Playback controls for one comparator: a play toggle and a speed slider.
///
/// Only built when the comparison involves video; image-only comparators
/// have nothing to control.
pub struct SettingsPanel {
    toggle: PlayToggle,
    speed: Slider,
    videos: Vec<SharedMedia>,
}

impl SettingsPanel {
    /// Build the panel for a context, or `None` for image-only comparisons.
    ///
    /// The toggle starts in the playing state to match readiness-gate
    /// autoplay.
    pub fn build(ctx: &Context) -> JuxtaResult<Option<Self>> {
        let videos = ctx.videos();
        if videos.is_empty() {
            return Ok(None);
        }
        let speed = Slider::new("Speed", 0.0, 1.0, 0.1, ctx.speed, ContextField::Speed)?;
        let toggle = PlayToggle {
            playing: true,
            videos: videos.clone(),
        };
        Ok(Some(Self {
            toggle,
            speed,
            videos,
        }))
    }

    /// Commit a new speed and propagate it to each video's playback rate.
    pub fn set_speed(&mut self, ctx: &mut Context, raw: f64) {
        let value = self.speed.commit(ctx, raw);
        for video in &self.videos {
            video.set_playback_rate(value);
        }
    }

    /// The play/pause control.
    pub fn toggle(&mut self) -> &mut PlayToggle {
        &mut self.toggle
    }

    /// Cached playing state of the toggle.
    pub fn is_playing(&self) -> bool {
        self.toggle.playing
    }

    /// The speed slider.
    pub fn speed(&self) -> &Slider {
        &self.speed
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/panel.rs"]
mod tests;
