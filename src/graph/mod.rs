//! Graph snapshots handed out by the layout engine, and the bounds estimated from them.

pub mod bounds;
pub mod snapshot;
