use std::collections::VecDeque;
use std::rc::Rc;

use crate::media::element::{MediaEvent, MediaKind, ReadyState, SharedMedia};

/// Run `action` once every element in `elements` has reported metadata.
///
/// The walk preserves declaration order: the wait for element *i+1* begins
/// as soon as element *i* confirms its metadata, so the individual waits
/// overlap but the continuation only fires after the last element in the
/// sequence settles. Each visited video is additionally armed for
/// autoplay — started immediately when enough data is buffered, otherwise
/// started from a one-time can-play listener. Images are skipped by the
/// autoplay guard.
///
/// An empty sequence fires `action` immediately. There is no retry and no
/// timeout: an element whose readiness events never fire stalls this
/// comparator's initialization indefinitely, by design.
pub fn wait_for_media(elements: Vec<SharedMedia>, action: impl FnOnce() + 'static) {
    step(VecDeque::from(elements), Box::new(action));
}

fn step(mut remaining: VecDeque<SharedMedia>, action: Box<dyn FnOnce()>) {
    let Some(element) = remaining.pop_front() else {
        // The whole sequence has been walked.
        action();
        return;
    };

    // Manual autoplay, guarded so images are never played.
    if element.kind() == MediaKind::Video {
        if element.ready_state() < ReadyState::EnoughData {
            let playable = Rc::clone(&element);
            element.once(MediaEvent::CanPlay, Box::new(move || playable.play()));
        } else {
            element.play();
        }
    }

    if element.ready_state() < ReadyState::Metadata {
        // Size is not known yet; resume the walk once metadata lands.
        element.once(
            MediaEvent::LoadedMetadata,
            Box::new(move || step(remaining, action)),
        );
    } else {
        step(remaining, action);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/readiness.rs"]
mod tests;
