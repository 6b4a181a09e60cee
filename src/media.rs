//! Media element abstraction and concrete image/video implementations.

pub mod element;
pub mod image;
pub mod readiness;
pub mod video;
