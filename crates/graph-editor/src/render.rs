//! Projection of the graph for a render surface
//!
//! The canvas itself lives outside this crate. It receives flat node and
//! edge records plus the toolbar state, draws them, and reports gestures
//! back through [`Gesture`](crate::controller::Gesture).

use serde::{Deserialize, Serialize};

use crate::controller::ToolbarState;
use crate::types::{Edge, EdgeId, GraphSnapshot, Node, NodeId, Position};

/// A node as drawn on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: NodeId,
    pub label: String,
    pub position: Position,
    /// `input`, `default` or `output`
    pub hint: String,
    pub selected: bool,
}

/// An edge as drawn on the canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub animated: bool,
}

/// Everything a render surface needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub toolbar: ToolbarState,
}

impl RenderNode {
    fn from_node(node: &Node, selection: Option<&str>) -> Self {
        Self {
            id: node.id.clone(),
            label: node.label.clone(),
            position: node.position,
            hint: node.kind.render_hint().to_string(),
            selected: selection == Some(node.id.as_str()),
        }
    }
}

impl From<&Edge> for RenderEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id.clone(),
            source: edge.source.clone(),
            target: edge.target.clone(),
            animated: edge.animated,
        }
    }
}

/// Project a snapshot and selection into render records
pub fn project(
    snapshot: &GraphSnapshot,
    selection: Option<&str>,
    toolbar: ToolbarState,
) -> Projection {
    Projection {
        nodes: snapshot
            .nodes
            .iter()
            .map(|n| RenderNode::from_node(n, selection))
            .collect(),
        edges: snapshot.edges.iter().map(RenderEdge::from).collect(),
        toolbar,
    }
}
