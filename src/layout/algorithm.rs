use crate::foundation::error::ReelResult;
use crate::graph::snapshot::GraphSnapshot;

/// An external iterative layout engine.
///
/// A run is always `init_algo → go_algo* → end_algo`; the driver guarantees `end_algo` is called
/// exactly once per run, whatever happens in between.
pub trait LayoutAlgorithm {
    /// Prepare internal state before the first step.
    fn init_algo(&mut self) -> ReelResult<()>;
    /// Advance the layout by one step.
    fn go_algo(&mut self) -> ReelResult<()>;
    /// Release resources held since `init_algo`.
    fn end_algo(&mut self);
    /// `false` once the engine considers itself converged.
    fn can_algo(&self) -> bool;
    /// Current node positions.
    fn snapshot(&self) -> GraphSnapshot;
}

/// A layout that never moves anything.
///
/// Useful for exporting a precomputed layout with an animated camera.
#[derive(Clone, Debug)]
pub struct NoOpLayout {
    graph: GraphSnapshot,
    running: bool,
    steps: u64,
}

impl NoOpLayout {
    pub fn new(graph: GraphSnapshot) -> Self {
        Self {
            graph,
            running: false,
            steps: 0,
        }
    }

    /// Steps taken in the current or last run.
    pub fn steps(&self) -> u64 {
        self.steps
    }
}

impl LayoutAlgorithm for NoOpLayout {
    fn init_algo(&mut self) -> ReelResult<()> {
        self.running = true;
        self.steps = 0;
        Ok(())
    }

    fn go_algo(&mut self) -> ReelResult<()> {
        self.steps += 1;
        Ok(())
    }

    fn end_algo(&mut self) {
        self.running = false;
    }

    fn can_algo(&self) -> bool {
        self.running
    }

    fn snapshot(&self) -> GraphSnapshot {
        self.graph.clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/algorithm.rs"]
mod tests;
