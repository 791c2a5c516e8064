//! Fluent builder for graph snapshots
//!
//! Provides a compact API for constructing graphs programmatically, used
//! for the editor's seed topology and in tests.

use crate::types::{Edge, GraphSnapshot, Node, NodeKind, Position};

/// Fluent builder for constructing graph snapshots
///
/// # Example
///
/// ```
/// use graph_editor::{GraphBuilder, NodeKind};
///
/// let graph = GraphBuilder::new()
///     .add_node("1", NodeKind::Start, "Start", (250.0, 50.0))
///     .add_node("2", NodeKind::End, "End", (250.0, 150.0))
///     .connect("1", "2")
///     .build();
///
/// assert_eq!(graph.edges[0].id, "e1-2");
/// ```
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    animated: bool,
}

impl GraphBuilder {
    /// Create a new graph builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark edges added after this call as animated (or not)
    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// Add a node to the graph
    pub fn add_node(
        mut self,
        id: impl Into<String>,
        kind: NodeKind,
        label: impl Into<String>,
        position: impl Into<Position>,
    ) -> Self {
        self.nodes.push(Node::new(id, kind, label, position));
        self
    }

    /// Add an edge between two nodes (id derived from the endpoints)
    pub fn connect(mut self, source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        self.edges.push(Edge {
            id: Edge::base_id(&source, &target),
            source,
            target,
            animated: self.animated,
        });
        self
    }

    /// Build the snapshot without validation
    pub fn build(self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// The topology every editor session starts from
///
/// Start -> Script -> End, laid out top to bottom.
pub fn seed_graph(animated: bool) -> GraphSnapshot {
    GraphBuilder::new()
        .animated(animated)
        .add_node("1", NodeKind::Start, "Start", (250.0, 50.0))
        .add_node("2", NodeKind::Action, "Script", (250.0, 150.0))
        .add_node("3", NodeKind::End, "End", (150.0, 250.0))
        .connect("1", "2")
        .connect("2", "3")
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_graph() {
        let seed = seed_graph(true);

        let ids: Vec<_> = seed.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(seed.nodes[0].kind, NodeKind::Start);
        assert_eq!(seed.nodes[1].label, "Script");
        assert_eq!(seed.nodes[2].position, Position::new(150.0, 250.0));

        let edge_ids: Vec<_> = seed.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(edge_ids, vec!["e1-2", "e2-3"]);
        assert!(seed.edges.iter().all(|e| e.animated));
    }

    #[test]
    fn test_animated_flag_applies_to_later_edges() {
        let graph = GraphBuilder::new()
            .add_node("a", NodeKind::Start, "A", (0.0, 0.0))
            .add_node("b", NodeKind::End, "B", (0.0, 100.0))
            .connect("a", "b")
            .animated(true)
            .connect("b", "a")
            .build();

        assert!(!graph.edges[0].animated);
        assert!(graph.edges[1].animated);
    }
}
