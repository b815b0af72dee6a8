use std::{fs::File, io::BufReader, path::Path};

use crate::expression::eval::{ExprEnv, Expression};
use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::graph::bounds::validate_margin;

/// A numeric option given either as a literal or as an expression string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NumberOrExpr {
    Number(f64),
    Expr(String),
}

/// Node identifier as written in the options (`"a"` or `42`).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum NodeRef {
    Text(String),
    Int(i64),
}

impl NodeRef {
    pub fn as_id(&self) -> String {
        match self {
            NodeRef::Text(s) => s.clone(),
            NodeRef::Int(n) => n.to_string(),
        }
    }
}

/// Flat options record controlling one export-augmented layout run.
///
/// Unknown keys are rejected. Contradictory combinations are rejected by [`ExportOptions::plan`]
/// before any frame is produced.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportOptions {
    /// Fixed or expression-driven zoom.
    pub scaling: Option<NumberOrExpr>,
    /// Zoom at the start of the schedule (with `scaling_end`).
    pub scaling_start: Option<NumberOrExpr>,
    /// Zoom at the last step of the schedule (with `scaling_start`).
    pub scaling_end: Option<NumberOrExpr>,
    /// Explicit model-space translate `[x, y]`.
    pub translate: Option<[NumberOrExpr; 2]>,
    /// Model point to keep at the canvas center.
    pub center_on: Option<[NumberOrExpr; 2]>,
    pub center_on_start: Option<[NumberOrExpr; 2]>,
    pub center_on_end: Option<[NumberOrExpr; 2]>,
    /// Node whose position is exposed as `nodeX` / `nodeY`.
    pub find_node: Option<NodeRef>,
    /// Trimming margin; exposes `bounds.*`.
    pub bounds_margin: Option<f64>,
    /// Overlay the resolved camera as text.
    #[serde(default)]
    pub draw_debug: bool,
    /// Overlay the trimmed bounds box. Requires `bounds_margin`.
    #[serde(default)]
    pub draw_bounds: bool,
    /// `[size]` or `[width, height]` in pixels.
    pub resolution: Option<Vec<u32>>,
    #[serde(default)]
    pub transparent_bg: bool,
    /// File name prefix of the frame sequence.
    pub prefix: Option<String>,
}

/// Resolved operand: a literal or a parsed expression.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Const(f64),
    Expr(Expression),
}

impl Operand {
    pub fn eval(&self, env: &ExprEnv) -> ReelResult<f64> {
        match self {
            Operand::Const(v) => Ok(*v),
            Operand::Expr(e) => e.eval(env),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScaleMode {
    /// Keep the renderer's current scale.
    Keep,
    Value(Operand),
    Interpolate { start: Operand, end: Operand },
}

#[derive(Clone, Debug, PartialEq)]
pub enum PanMode {
    /// Keep the renderer's current translate.
    Keep,
    Translate([Operand; 2]),
    CenterOn([Operand; 2]),
    CenterOnInterpolate {
        start: [Operand; 2],
        end: [Operand; 2],
    },
}

/// Validated camera configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraPlan {
    pub scale: ScaleMode,
    pub pan: PanMode,
    pub find_node: Option<String>,
    pub bounds_margin: Option<f64>,
}

impl Default for CameraPlan {
    fn default() -> Self {
        Self {
            scale: ScaleMode::Keep,
            pan: PanMode::Keep,
            find_node: None,
            bounds_margin: None,
        }
    }
}

/// Variables every camera expression can read.
pub(crate) const BASE_VARS: [&str; 7] = ["step", "totalSteps", "exportEvery", "frame", "i", "w", "h"];
pub(crate) const NODE_VARS: [&str; 2] = ["nodeX", "nodeY"];
pub(crate) const PREV_VARS: [&str; 3] = ["prev.scaling", "prev.translateX", "prev.translateY"];
/// The scale resolved for the current frame; readable by translate and center-on expressions.
pub(crate) const SCALE_VAR: &str = "sc";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Scale,
    Pan,
}

impl ExportOptions {
    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::configuration(format!("export options: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::configuration(format!("open options JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ReelError::configuration(format!("options JSON '{}': {e}", path.display()))
        })
    }

    /// Output canvas from `resolution` (default 1024x1024).
    pub fn canvas(&self) -> ReelResult<Canvas> {
        match self.resolution.as_deref() {
            None => Ok(Canvas::default()),
            Some([side]) => Canvas::new(*side, *side),
            Some([w, h]) => Canvas::new(*w, *h),
            Some(other) => Err(ReelError::configuration(format!(
                "resolution must have 1 or 2 entries, got {}",
                other.len()
            ))),
        }
    }

    pub fn prefix(&self) -> ReelResult<&str> {
        let p = self.prefix.as_deref().unwrap_or("frame");
        if p.is_empty() || p.contains(['/', '\\']) {
            return Err(ReelError::configuration(format!(
                "prefix must be a non-empty file name, got '{p}'"
            )));
        }
        Ok(p)
    }

    /// Validate every option and compile expressions into a [`CameraPlan`].
    pub fn plan(&self) -> ReelResult<CameraPlan> {
        if let Some(m) = self.bounds_margin {
            validate_margin(m)?;
        }
        if self.draw_bounds && self.bounds_margin.is_none() {
            return Err(ReelError::configuration(
                "drawBounds requires boundsMargin",
            ));
        }
        self.canvas()?;
        self.prefix()?;

        let find_node = self.find_node.as_ref().map(NodeRef::as_id);
        let scope = Scope {
            has_node: find_node.is_some(),
            has_bounds: self.bounds_margin.is_some(),
        };

        let scale = match (&self.scaling, &self.scaling_start, &self.scaling_end) {
            (None, None, None) => ScaleMode::Keep,
            (Some(v), None, None) => {
                let op = scope.operand("scaling", v, Slot::Scale)?;
                check_positive_const("scaling", &op)?;
                ScaleMode::Value(op)
            }
            (None, Some(s), Some(e)) => {
                let start = scope.operand("scalingStart", s, Slot::Scale)?;
                let end = scope.operand("scalingEnd", e, Slot::Scale)?;
                check_positive_const("scalingStart", &start)?;
                check_positive_const("scalingEnd", &end)?;
                ScaleMode::Interpolate { start, end }
            }
            (Some(_), _, _) => {
                return Err(ReelError::configuration(
                    "scaling and scalingStart/scalingEnd are mutually exclusive",
                ));
            }
            (None, _, _) => {
                return Err(ReelError::configuration(
                    "scalingStart and scalingEnd must be given together",
                ));
            }
        };

        let interp_given = self.center_on_start.is_some() || self.center_on_end.is_some();
        let families = [
            self.translate.is_some(),
            self.center_on.is_some(),
            interp_given,
        ];
        if families.iter().filter(|f| **f).count() > 1 {
            return Err(ReelError::configuration(
                "translate, centerOn and centerOnStart/centerOnEnd are mutually exclusive",
            ));
        }

        let pan = if let Some(t) = &self.translate {
            PanMode::Translate(scope.pair("translate", t)?)
        } else if let Some(c) = &self.center_on {
            PanMode::CenterOn(scope.pair("centerOn", c)?)
        } else if interp_given {
            match (&self.center_on_start, &self.center_on_end) {
                (Some(s), Some(e)) => PanMode::CenterOnInterpolate {
                    start: scope.pair("centerOnStart", s)?,
                    end: scope.pair("centerOnEnd", e)?,
                },
                _ => {
                    return Err(ReelError::configuration(
                        "centerOnStart and centerOnEnd must be given together",
                    ));
                }
            }
        } else {
            PanMode::Keep
        };

        Ok(CameraPlan {
            scale,
            pan,
            find_node,
            bounds_margin: self.bounds_margin,
        })
    }
}

/// Which optional variable families the run will provide.
struct Scope {
    has_node: bool,
    has_bounds: bool,
}

impl Scope {
    fn allows(&self, name: &str, slot: Slot) -> bool {
        BASE_VARS.contains(&name)
            || PREV_VARS.contains(&name)
            || (slot == Slot::Pan && name == SCALE_VAR)
            || (self.has_node && NODE_VARS.contains(&name))
            || (self.has_bounds && name.starts_with("bounds.") && is_bounds_var(name))
    }

    fn operand(&self, key: &str, v: &NumberOrExpr, slot: Slot) -> ReelResult<Operand> {
        match v {
            NumberOrExpr::Number(n) => {
                if !n.is_finite() {
                    return Err(ReelError::configuration(format!("{key} must be finite")));
                }
                Ok(Operand::Const(*n))
            }
            NumberOrExpr::Expr(src) => {
                let expr = Expression::parse(src)
                    .map_err(|e| ReelError::configuration(format!("{key}: {e}")))?;
                for name in expr.variables() {
                    if !self.allows(&name, slot) {
                        return Err(ReelError::configuration(format!(
                            "{key}: variable '{name}' is not available{}",
                            missing_hint(&name, slot)
                        )));
                    }
                }
                Ok(Operand::Expr(expr))
            }
        }
    }

    fn pair(&self, key: &str, v: &[NumberOrExpr; 2]) -> ReelResult<[Operand; 2]> {
        Ok([
            self.operand(&format!("{key}[0]"), &v[0], Slot::Pan)?,
            self.operand(&format!("{key}[1]"), &v[1], Slot::Pan)?,
        ])
    }
}

fn is_bounds_var(name: &str) -> bool {
    matches!(
        name,
        "bounds.xMin"
            | "bounds.xMax"
            | "bounds.yMin"
            | "bounds.yMax"
            | "bounds.width"
            | "bounds.height"
    )
}

fn missing_hint(name: &str, slot: Slot) -> &'static str {
    if NODE_VARS.contains(&name) {
        " (set findNode)"
    } else if is_bounds_var(name) {
        " (set boundsMargin)"
    } else if name == SCALE_VAR && slot == Slot::Scale {
        " (sc is only defined for translate and centerOn)"
    } else {
        ""
    }
}

fn check_positive_const(key: &str, op: &Operand) -> ReelResult<()> {
    if let Operand::Const(v) = op {
        if *v <= 0.0 {
            return Err(ReelError::configuration(format!(
                "{key} must be > 0, got {v}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/camera/options.rs"]
mod tests;
