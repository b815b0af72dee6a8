//! Model-space ↔ device-space mapping for a [`CameraState`].
//!
//! Device y grows downward while model y grows upward, so y is negated on the way in. Scaling is
//! anchored at the canvas center by the `(1 - s)` term, independently of the translate.

use crate::foundation::core::{CameraState, Canvas, ModelPoint, Point, Rect};

/// Map a model-space point to device pixels.
///
/// `px = (x + tx)·s + w/2·(1 − s)`, `py = (−y + ty)·s + h/2·(1 − s)`.
#[inline]
pub fn to_device(p: ModelPoint, camera: CameraState, canvas: Canvas) -> Point {
    let s = camera.scale;
    Point::new(
        (p.x + camera.translate_x) * s + canvas.half_width() * (1.0 - s),
        (-p.y + camera.translate_y) * s + canvas.half_height() * (1.0 - s),
    )
}

/// Exact inverse of [`to_device`].
#[inline]
pub fn to_model(px: Point, camera: CameraState, canvas: Canvas) -> ModelPoint {
    let s = camera.scale;
    Point::new(
        (px.x - canvas.half_width() * (1.0 - s)) / s - camera.translate_x,
        -((px.y - canvas.half_height() * (1.0 - s)) / s - camera.translate_y),
    )
}

/// Solve for the translate that puts model point `p` at the canvas center under `scale`.
///
/// Returns `(tx, ty)`; `to_device(p, CameraState { scale, tx, ty }, canvas)` is the canvas center.
#[inline]
pub fn translate_to_center_on(p: ModelPoint, scale: f64, canvas: Canvas) -> (f64, f64) {
    let hw = canvas.half_width();
    let hh = canvas.half_height();
    let tx = -(p.x * scale + hw * (1.0 - scale) - hw) / scale;
    let ty = -(-p.y * scale + hh * (1.0 - scale) - hh) / scale;
    (tx, ty)
}

/// Map a model-space rectangle to the device-space rectangle covering it.
///
/// The y flip swaps which model edge ends up on top, so the result is re-normalized.
pub fn model_rect_to_device(r: Rect, camera: CameraState, canvas: Canvas) -> Rect {
    let a = to_device(Point::new(r.x0, r.y0), camera, canvas);
    let b = to_device(Point::new(r.x1, r.y1), camera, canvas);
    Rect::from_points(a, b)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/camera.rs"]
mod tests;
