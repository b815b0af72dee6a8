use crate::camera::session::{AnimationSession, ExportSchedule};
use crate::export::exporter::{FrameExporter, FrameSummary};
use crate::foundation::error::{ReelError, ReelResult};
use crate::layout::algorithm::LayoutAlgorithm;
use crate::render::backend::Renderer;

/// How long a run lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunMode {
    /// Exactly this many steps.
    Steps(u64),
    /// Until the engine reports convergence, capped at `max_steps`.
    UntilConverged { max_steps: u64 },
}

impl RunMode {
    /// Step count used as `totalSteps` for scheduling and interpolation.
    pub fn total_steps(self) -> u64 {
        match self {
            RunMode::Steps(n) => n,
            RunMode::UntilConverged { max_steps } => max_steps,
        }
    }
}

/// `layout` section of a run configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LayoutRunOptions {
    #[serde(default)]
    pub steps: Option<u64>,
    #[serde(default)]
    pub max_steps: Option<u64>,
    #[serde(default = "default_export_each")]
    pub export_each: u64,
}

fn default_export_each() -> u64 {
    1
}

impl LayoutRunOptions {
    pub fn mode(&self) -> ReelResult<RunMode> {
        let mode = match (self.steps, self.max_steps) {
            (Some(n), None) => RunMode::Steps(n),
            (None, Some(max_steps)) => RunMode::UntilConverged { max_steps },
            (Some(_), Some(_)) => {
                return Err(ReelError::configuration(
                    "steps and maxSteps are mutually exclusive",
                ));
            }
            (None, None) => {
                return Err(ReelError::configuration(
                    "layout needs either steps or maxSteps",
                ));
            }
        };
        if mode.total_steps() == 0 {
            return Err(ReelError::configuration("layout step count must be > 0"));
        }
        Ok(mode)
    }

    pub fn schedule(&self) -> ReelResult<ExportSchedule> {
        ExportSchedule::new(self.mode()?.total_steps(), self.export_each)
    }
}

/// Where a driver is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running { step: u64 },
    Done,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct RunReport {
    pub steps_run: u64,
    /// The engine reported convergence before the step cap.
    pub converged: bool,
    pub frames: Vec<FrameSummary>,
}

/// Owns `end_algo` for one run.
struct AlgoGuard<'a> {
    algo: &'a mut dyn LayoutAlgorithm,
}

impl Drop for AlgoGuard<'_> {
    fn drop(&mut self) {
        self.algo.end_algo();
    }
}

struct ExportTarget<'e, 's> {
    exporter: &'e mut FrameExporter<'s>,
    renderer: &'e mut dyn Renderer,
}

/// Steps a layout engine and triggers frame capture on the export schedule.
pub struct LayoutStepDriver<'a> {
    algo: &'a mut dyn LayoutAlgorithm,
    mode: RunMode,
    state: DriverState,
}

impl<'a> LayoutStepDriver<'a> {
    pub fn new(algo: &'a mut dyn LayoutAlgorithm, mode: RunMode) -> ReelResult<Self> {
        if mode.total_steps() == 0 {
            return Err(ReelError::configuration("layout step count must be > 0"));
        }
        Ok(Self {
            algo,
            mode,
            state: DriverState::Idle,
        })
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Run the layout without exporting anything.
    pub fn run(&mut self) -> ReelResult<RunReport> {
        self.drive(None)
    }

    /// Run the layout and capture frames through `exporter` on its schedule.
    ///
    /// On failure the exporter's sink is aborted; on success it is finished.
    pub fn run_with_export(
        &mut self,
        exporter: &mut FrameExporter<'_>,
        renderer: &mut dyn Renderer,
    ) -> ReelResult<RunReport> {
        let total = self.mode.total_steps();
        if exporter.schedule().total_steps != total {
            return Err(ReelError::configuration(format!(
                "export schedule covers {} steps but the run has {total}",
                exporter.schedule().total_steps
            )));
        }
        exporter.resolver().check_graph(&self.algo.snapshot())?;
        self.drive(Some(ExportTarget { exporter, renderer }))
    }

    #[tracing::instrument(skip_all, fields(mode = ?self.mode))]
    fn drive(&mut self, mut export: Option<ExportTarget<'_, '_>>) -> ReelResult<RunReport> {
        if self.state != DriverState::Idle {
            return Err(ReelError::engine("a layout driver runs only once"));
        }
        self.state = DriverState::Running { step: 0 };

        let result = {
            let mut guard = AlgoGuard {
                algo: &mut *self.algo,
            };
            step_loop(&mut guard, self.mode, &mut self.state, export.as_mut())
        };

        self.state = DriverState::Done;
        match (result, export) {
            (Ok(report), Some(t)) => {
                t.exporter.finish()?;
                Ok(report)
            }
            (Ok(report), None) => Ok(report),
            (Err(e), Some(t)) => {
                t.exporter.abort();
                Err(e)
            }
            (Err(e), None) => Err(e),
        }
    }
}

fn step_loop(
    guard: &mut AlgoGuard<'_>,
    mode: RunMode,
    state: &mut DriverState,
    mut export: Option<&mut ExportTarget<'_, '_>>,
) -> ReelResult<RunReport> {
    let algo = &mut *guard.algo;
    algo.init_algo()?;

    let total = mode.total_steps();
    let mut session = AnimationSession::new();
    let mut report = RunReport::default();

    if let Some(t) = export.as_deref_mut() {
        t.exporter.begin(&algo.snapshot(), &*t.renderer)?;
    }

    if matches!(mode, RunMode::UntilConverged { .. }) && !algo.can_algo() {
        tracing::debug!("layout converged before the first step");
        report.converged = true;
        return Ok(report);
    }

    for step in 1..=total {
        *state = DriverState::Running { step };
        session.advance_to(step)?;
        algo.go_algo()?;
        report.steps_run = step;

        let converged = matches!(mode, RunMode::UntilConverged { .. }) && !algo.can_algo();
        let is_final = converged || step == total;
        tracing::debug!(step, converged, "layout step");

        if let Some(t) = export.as_deref_mut() {
            if t.exporter.schedule().captures(step, is_final) {
                let graph = algo.snapshot();
                let summary = t
                    .exporter
                    .capture(&mut session, step, &graph, &mut *t.renderer)?;
                report.frames.push(summary);
            }
        }

        if converged {
            report.converged = true;
            break;
        }
    }

    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/driver.rs"]
mod tests;
