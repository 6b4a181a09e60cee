//! CPU compositing of the comparison frame and its label overlay.

pub mod compositor;
pub mod labels;
