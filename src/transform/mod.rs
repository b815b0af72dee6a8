//! Pure coordinate transforms shared by the renderer, the center-on solver and the debug overlay.

pub mod camera;
