use crate::foundation::core::{Point, Rect};
use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::snapshot::NodePosition;

/// Axis-aligned box around the per-axis trimmed node positions.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsBox {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundsBox {
    pub fn center(&self) -> Point {
        Point::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// The box as a model-space rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x_min, self.y_min, self.x_max, self.y_max)
    }

    /// `(name, value)` pairs exposed to camera expressions.
    pub(crate) fn variables(&self) -> [(&'static str, f64); 6] {
        [
            ("bounds.xMin", self.x_min),
            ("bounds.xMax", self.x_max),
            ("bounds.yMin", self.y_min),
            ("bounds.yMax", self.y_max),
            ("bounds.width", self.width),
            ("bounds.height", self.height),
        ]
    }
}

/// Check that a trimming margin is usable: finite and in `[0, 0.5)`.
pub fn validate_margin(margin: f64) -> ReelResult<()> {
    if !margin.is_finite() || !(0.0..0.5).contains(&margin) {
        return Err(ReelError::configuration(format!(
            "boundsMargin must be in [0, 0.5), got {margin}"
        )));
    }
    Ok(())
}

/// Estimate the box containing the bulk of the nodes.
///
/// x and y are sorted independently and `floor(n * margin)` values are dropped from both ends of
/// each axis. This is not a joint 2-D trim; the corners of the box may hold no node at all.
pub fn estimate_bounds(nodes: &[NodePosition], margin: f64) -> ReelResult<BoundsBox> {
    validate_margin(margin)?;

    let mut xs = Vec::with_capacity(nodes.len());
    let mut ys = Vec::with_capacity(nodes.len());
    for n in nodes {
        if !n.x.is_finite() || !n.y.is_finite() {
            return Err(ReelError::geometry(format!(
                "node '{}' has a non-finite position ({}, {})",
                n.id, n.x, n.y
            )));
        }
        xs.push(n.x);
        ys.push(n.y);
    }
    xs.sort_by(f64::total_cmp);
    ys.sort_by(f64::total_cmp);

    let n = nodes.len();
    let drop = (n as f64 * margin).floor() as usize;
    let kept = n.saturating_sub(drop.saturating_mul(2));
    if kept < 2 {
        return Err(ReelError::geometry(format!(
            "bounds need at least 2 points per axis after trimming, {kept} of {n} remain \
             (margin {margin})"
        )));
    }

    let xs = &xs[drop..n - drop];
    let ys = &ys[drop..n - drop];
    let (x_min, x_max) = (xs[0], xs[xs.len() - 1]);
    let (y_min, y_max) = (ys[0], ys[ys.len() - 1]);

    Ok(BoundsBox {
        x_min,
        x_max,
        y_min,
        y_max,
        width: x_max - x_min,
        height: y_max - y_min,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/graph/bounds.rs"]
mod tests;
