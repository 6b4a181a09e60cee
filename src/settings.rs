//! Per-comparator playback settings.

pub mod panel;
