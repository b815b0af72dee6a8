use crate::foundation::core::CameraState;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

/// One captured frame together with the camera it was rendered with.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRecord {
    /// Gap-free capture index, starting at 0.
    pub index: u64,
    /// Layout step the frame was captured at (1-based).
    pub step: u64,
    pub camera: CameraState,
    pub frame: FrameRGBA,
}

/// Consumer of captured frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing, gap-free indices between
/// one `begin` and the matching `end` or `abort`.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()>;
    /// Persist one frame.
    fn push_frame(&mut self, record: &FrameRecord) -> ReelResult<()>;
    /// Called once after the last frame of a successful run.
    fn end(&mut self) -> ReelResult<()>;
    /// Called instead of `end` when the run fails. Sinks should discard partial output.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<FrameRecord>,
    finished: bool,
    aborted: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    /// `end` was called.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// `abort` was called.
    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> ReelResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        self.aborted = false;
        Ok(())
    }

    fn push_frame(&mut self, record: &FrameRecord) -> ReelResult<()> {
        if self.cfg.is_none() {
            return Err(ReelError::engine("in-memory sink not started"));
        }
        self.frames.push(record.clone());
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.finished = true;
        Ok(())
    }

    fn abort(&mut self) {
        self.frames.clear();
        self.aborted = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
