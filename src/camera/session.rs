use crate::foundation::core::CameraState;
use crate::foundation::error::{ReelError, ReelResult};

/// Plan of layout steps and the interval at which frames are captured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportSchedule {
    /// Steps in the whole run (the step cap in run-until-converged mode).
    pub total_steps: u64,
    /// Capture every `export_every`-th step, plus the final step.
    pub export_every: u64,
}

impl ExportSchedule {
    pub fn new(total_steps: u64, export_every: u64) -> ReelResult<Self> {
        if total_steps == 0 {
            return Err(ReelError::configuration("steps must be >= 1"));
        }
        if export_every == 0 {
            return Err(ReelError::configuration("exportEach must be >= 1"));
        }
        Ok(Self {
            total_steps,
            export_every,
        })
    }

    /// Whether `step` is captured when `is_final` marks the last step actually run.
    pub fn captures(&self, step: u64, is_final: bool) -> bool {
        step % self.export_every == 0 || step == self.total_steps || is_final
    }

    /// Fractional position of `step` in the whole schedule.
    pub fn progress(&self, step: u64) -> f64 {
        step as f64 / self.total_steps as f64
    }
}

/// Cross-frame memory of one export-augmented layout run.
///
/// Created by the step driver at the start of a run and dropped at its end; never shared between
/// runs.
#[derive(Debug)]
pub struct AnimationSession {
    previous_camera: Option<CameraState>,
    current_step: u64,
    frames_captured: u64,
}

impl AnimationSession {
    pub fn new() -> Self {
        Self {
            previous_camera: None,
            current_step: 0,
            frames_captured: 0,
        }
    }

    /// Camera of the last captured frame, exposed to expressions as `prev.*`.
    pub fn previous_camera(&self) -> Option<CameraState> {
        self.previous_camera
    }

    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    /// Number of frames captured so far; also the index of the next frame.
    pub fn frames_captured(&self) -> u64 {
        self.frames_captured
    }

    /// Move to `step`. Steps strictly increase within a run.
    pub fn advance_to(&mut self, step: u64) -> ReelResult<()> {
        if step <= self.current_step {
            return Err(ReelError::engine(format!(
                "step {step} does not advance past step {}",
                self.current_step
            )));
        }
        self.current_step = step;
        Ok(())
    }

    /// Record a persisted frame; returns its index.
    pub fn record_frame(&mut self, camera: CameraState) -> u64 {
        let index = self.frames_captured;
        self.previous_camera = Some(camera);
        self.frames_captured += 1;
        index
    }
}

impl Default for AnimationSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/camera/session.rs"]
mod tests;
