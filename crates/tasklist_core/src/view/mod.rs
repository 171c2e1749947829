//! View layer: full-repaint projection of store state.

pub mod render;
