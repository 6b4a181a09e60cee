//! Comparator lifecycle: shared state, setup, input, and playback sync.

pub mod context;
pub mod interaction;
pub mod setup;
pub mod sync;
