use std::{fs::File, io::BufReader, path::Path};

use crate::foundation::core::ModelPoint;
use crate::foundation::error::{ReelError, ReelResult};

/// One node's identity and current layout position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodePosition {
    /// Node identifier as the engine reports it.
    pub id: String,
    /// Model-space x.
    pub x: f64,
    /// Model-space y.
    pub y: f64,
    /// Display size in model units (diameter). Only the renderer reads it.
    #[serde(default = "default_node_size")]
    pub size: f64,
}

fn default_node_size() -> f64 {
    10.0
}

impl NodePosition {
    pub fn new(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            size: default_node_size(),
        }
    }

    pub fn point(&self) -> ModelPoint {
        ModelPoint::new(self.x, self.y)
    }
}

/// An edge between two node ids.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeRef {
    pub source: String,
    pub target: String,
}

/// Read-only view of the graph at one instant of a layout run.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodePosition>,
    #[serde(default)]
    pub edges: Vec<EdgeRef>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<NodePosition>) -> Self {
        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    pub fn from_json_str(s: &str) -> ReelResult<Self> {
        serde_json::from_str(s).map_err(|e| ReelError::serde(format!("graph snapshot: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::configuration(format!("open graph JSON '{}': {e}", path.display()))
        })?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ReelError::serde(format!("graph JSON '{}': {e}", path.display())))
    }

    pub fn node(&self, id: &str) -> Option<&NodePosition> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
