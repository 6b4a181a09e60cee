use std::rc::Rc;

use crate::media::element::{MediaEvent, SharedMedia};

/// Wire one-way seek synchronization from `leader` to `follower`.
///
/// Whenever the leader starts or settles a seek, the follower is snapped to
/// the leader's current time. The direction is deliberate: seeks on the
/// follower do not propagate back, so there is no feedback loop. Wiring
/// happens exactly once, at comparator setup.
pub(crate) fn wire_seek_sync(leader: &SharedMedia, follower: &SharedMedia) {
    for event in [MediaEvent::Seeking, MediaEvent::Seeked] {
        let leader_rc = Rc::clone(leader);
        let follower_rc = Rc::clone(follower);
        leader.on(
            event,
            Box::new(move || {
                follower_rc.set_current_time(leader_rc.current_time());
            }),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/comparator/sync.rs"]
mod tests;
