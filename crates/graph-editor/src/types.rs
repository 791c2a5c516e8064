//! Core types for workflow graphs
//!
//! These types define the structure of an editable workflow graph:
//! nodes with a control-flow role, directed edges between them, and
//! the snapshot that is handed to renderers and save flows.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// Role a node plays in the workflow's control flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Entry point of the workflow
    Start,
    /// An intermediate step
    Action,
    /// A terminal step
    End,
}

impl NodeKind {
    /// Rendering hint understood by node-graph canvases
    ///
    /// Start nodes only expose an outgoing handle, end nodes only an
    /// incoming one, and actions expose both.
    pub fn render_hint(&self) -> &'static str {
        match self {
            NodeKind::Start => "input",
            NodeKind::Action => "default",
            NodeKind::End => "output",
        }
    }
}

/// Canvas coordinate of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by `(dx, dy)`
    pub fn offset(&self, (dx, dy): (f64, f64)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// A node instance in a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier, immutable after creation
    pub id: NodeId,
    /// Control-flow role
    pub kind: NodeKind,
    /// User-editable display label
    pub label: String,
    /// Position on the canvas (no effect on topology)
    pub position: Position,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        kind: NodeKind,
        label: impl Into<String>,
        position: impl Into<Position>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            label: label.into(),
            position: position.into(),
        }
    }
}

/// A directed edge between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Rendering flag only
    #[serde(default)]
    pub animated: bool,
}

impl Edge {
    /// Base id for an edge between `source` and `target`
    pub fn base_id(source: &str, target: &str) -> EdgeId {
        format!("e{}-{}", source, target)
    }

    /// Whether this edge touches `node_id` at either end
    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// Plain copy of a graph's nodes and edges
///
/// This is what the editor hands out to renderers and save flows. Node
/// order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    /// Nodes in insertion order
    pub nodes: Vec<Node>,
    /// Edges in insertion order
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Find a node by ID
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Find an edge by ID
    pub fn find_edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Get edges coming into a node
    pub fn incoming_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == node_id)
    }

    /// Get edges going out of a node
    pub fn outgoing_edges<'a>(&'a self, node_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == node_id)
    }
}
