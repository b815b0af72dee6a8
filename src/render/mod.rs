//! Rendering seam plus the reference rasterizer and debug overlay.

pub mod backend;
pub mod overlay;
pub mod svg;
