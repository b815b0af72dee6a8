use crate::camera::options::{CameraPlan, Operand, PanMode, SCALE_VAR, ScaleMode};
use crate::camera::session::{AnimationSession, ExportSchedule};
use crate::expression::eval::ExprEnv;
use crate::foundation::core::{CameraState, Canvas, Point};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::lerp_exact;
use crate::graph::bounds::{BoundsBox, estimate_bounds};
use crate::graph::snapshot::GraphSnapshot;
use crate::transform::camera::translate_to_center_on;

/// Camera for one capture tick, plus the bounds computed along the way (if any).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedCamera {
    pub camera: CameraState,
    pub bounds: Option<BoundsBox>,
}

/// Computes one fully resolved [`CameraState`] per captured frame.
#[derive(Clone, Debug)]
pub struct CameraResolver {
    plan: CameraPlan,
    canvas: Canvas,
    schedule: ExportSchedule,
}

impl CameraResolver {
    pub fn new(plan: CameraPlan, canvas: Canvas, schedule: ExportSchedule) -> Self {
        Self {
            plan,
            canvas,
            schedule,
        }
    }

    pub fn plan(&self) -> &CameraPlan {
        &self.plan
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn schedule(&self) -> ExportSchedule {
        self.schedule
    }

    /// Check the graph-dependent parts of the plan before the run mutates anything.
    pub fn check_graph(&self, graph: &GraphSnapshot) -> ReelResult<()> {
        if let Some(id) = &self.plan.find_node {
            if graph.node(id).is_none() {
                return Err(ReelError::configuration(format!(
                    "findNode target '{id}' is not in the graph"
                )));
            }
        }
        if let Some(m) = self.plan.bounds_margin {
            estimate_bounds(&graph.nodes, m)?;
        }
        Ok(())
    }

    /// Resolve the camera for `step`.
    ///
    /// `current` is the renderer's camera at capture time; it supplies whatever the plan leaves
    /// unset.
    pub fn resolve(
        &self,
        step: u64,
        session: &AnimationSession,
        graph: &GraphSnapshot,
        current: CameraState,
    ) -> ReelResult<ResolvedCamera> {
        let (mut env, bounds) = self.environment(step, session, graph)?;
        let t = self.schedule.progress(step);

        let scale = match &self.plan.scale {
            ScaleMode::Keep => current.scale,
            ScaleMode::Value(op) => op.eval(&env)?,
            ScaleMode::Interpolate { start, end } => {
                lerp_exact(start.eval(&env)?, end.eval(&env)?, t)
            }
        };
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ReelError::evaluation(format!(
                "scale resolved to {scale} at step {step}; it must be finite and > 0"
            )));
        }
        env.set(SCALE_VAR, scale);

        let (tx, ty) = match &self.plan.pan {
            PanMode::Keep => (current.translate_x, current.translate_y),
            PanMode::Translate([x, y]) => (x.eval(&env)?, y.eval(&env)?),
            PanMode::CenterOn(p) => {
                translate_to_center_on(eval_point(p, &env)?, scale, self.canvas)
            }
            PanMode::CenterOnInterpolate { start, end } => {
                let a = eval_point(start, &env)?;
                let b = eval_point(end, &env)?;
                let p = Point::new(lerp_exact(a.x, b.x, t), lerp_exact(a.y, b.y, t));
                translate_to_center_on(p, scale, self.canvas)
            }
        };

        Ok(ResolvedCamera {
            camera: CameraState::new(scale, tx, ty)?,
            bounds,
        })
    }

    /// Variable bag for `step`. Only families the plan enabled are populated.
    fn environment(
        &self,
        step: u64,
        session: &AnimationSession,
        graph: &GraphSnapshot,
    ) -> ReelResult<(ExprEnv, Option<BoundsBox>)> {
        let mut env = ExprEnv::new();
        let frame = session.frames_captured() as f64;
        env.set("step", step as f64)
            .set("totalSteps", self.schedule.total_steps as f64)
            .set("exportEvery", self.schedule.export_every as f64)
            .set("frame", frame)
            .set("i", frame)
            .set("w", f64::from(self.canvas.width))
            .set("h", f64::from(self.canvas.height));

        if let Some(id) = &self.plan.find_node {
            let node = graph.node(id).ok_or_else(|| {
                ReelError::evaluation(format!(
                    "findNode target '{id}' disappeared from the graph at step {step}"
                ))
            })?;
            env.set("nodeX", node.x).set("nodeY", node.y);
        }

        let bounds = match self.plan.bounds_margin {
            Some(m) => {
                let b = estimate_bounds(&graph.nodes, m)?;
                for (name, v) in b.variables() {
                    env.set(name, v);
                }
                Some(b)
            }
            None => None,
        };

        if let Some(prev) = session.previous_camera() {
            env.set("prev.scaling", prev.scale)
                .set("prev.translateX", prev.translate_x)
                .set("prev.translateY", prev.translate_y);
        }

        Ok((env, bounds))
    }
}

fn eval_point(p: &[Operand; 2], env: &ExprEnv) -> ReelResult<Point> {
    Ok(Point::new(p[0].eval(env)?, p[1].eval(env)?))
}

#[cfg(test)]
#[path = "../../tests/unit/camera/resolver.rs"]
mod tests;
