//! The graph store
//!
//! Owns the canonical node and edge collections plus the current
//! selection, and applies structural mutations to them.
//!
//! # Guarantees
//!
//! - Every edge's source and target name a node in the graph. Deleting a
//!   node cascades to every edge touching it.
//! - Node ids and edge ids are each unique at all times.
//! - Each mutation is a single synchronous step: it either applies fully
//!   or, when its precondition is not met, does nothing at all.
//!
//! Self-loops and parallel edges are accepted; use
//! [`diagnostics`](crate::diagnostics) to report them.

use std::collections::HashSet;

use crate::builder::seed_graph;
use crate::config::{EditorConfig, IdStrategy};
use crate::events::{EditorEvent, EventSink, NullEventSink};
use crate::types::{Edge, EdgeId, GraphSnapshot, Node, NodeId, NodeKind, Position};

/// Label given to nodes created by [`GraphStore::add_node`]
pub const NEW_NODE_LABEL: &str = "New Node";

/// In-memory workflow graph with single-node selection
pub struct GraphStore {
    /// Nodes in insertion order
    nodes: Vec<Node>,
    /// Edges in insertion order
    edges: Vec<Edge>,
    /// Currently selected node, if any
    selection: Option<NodeId>,
    /// Highest numeric node id this graph has ever held
    id_high_water: u64,
    config: EditorConfig,
    sink: Box<dyn EventSink>,
}

impl std::fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphStore")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .field("selection", &self.selection)
            .field("id_high_water", &self.id_high_water)
            .finish_non_exhaustive()
    }
}

impl GraphStore {
    /// Create an empty graph
    pub fn new(config: EditorConfig) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            selection: None,
            id_high_water: 0,
            config,
            sink: Box::new(NullEventSink),
        }
    }

    /// Create a graph holding the seed topology
    pub fn seeded(config: EditorConfig) -> Self {
        let seed = seed_graph(config.seed_animated_edges);
        log::info!(
            "Seeding editor graph with {} nodes and {} edges",
            seed.nodes.len(),
            seed.edges.len()
        );
        Self::from_snapshot(seed, config)
    }

    /// Restore a graph from a snapshot
    ///
    /// Nodes with an id already seen are dropped, as are edges whose
    /// endpoints are missing or whose id is taken, so the restored graph
    /// upholds the same guarantees as one built through mutations.
    pub fn from_snapshot(snapshot: GraphSnapshot, config: EditorConfig) -> Self {
        let mut store = Self::new(config);

        for node in snapshot.nodes {
            if store.contains_node(&node.id) {
                log::warn!("Dropping node with duplicate id '{}'", node.id);
                continue;
            }
            store.note_node_id(&node.id);
            store.nodes.push(node);
        }

        let mut edge_ids: HashSet<EdgeId> = HashSet::new();
        for edge in snapshot.edges {
            if !store.contains_node(&edge.source) || !store.contains_node(&edge.target) {
                log::warn!(
                    "Dropping edge '{}' with a missing endpoint ({} -> {})",
                    edge.id,
                    edge.source,
                    edge.target
                );
                continue;
            }
            if !edge_ids.insert(edge.id.clone()) {
                log::warn!("Dropping edge with duplicate id '{}'", edge.id);
                continue;
            }
            store.edges.push(edge);
        }

        store
    }

    /// Route mutation events to `sink`
    pub fn with_event_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// Copy of the current nodes and edges, for saving or rendering
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Find a node by ID
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Edges with `id` as source or target
    pub fn incident_edges<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.touches(id))
    }

    /// The selected node id, if any
    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Append an action node below and to the right of the last node
    ///
    /// Always succeeds and returns the new node's id.
    pub fn add_node(&mut self) -> NodeId {
        let position = match self.nodes.last() {
            Some(last) => last.position.offset(self.config.append_offset),
            None => Position::from(self.config.default_position),
        };
        let id = self.next_node_id();
        let node = Node::new(id.clone(), NodeKind::Action, NEW_NODE_LABEL, position);

        log::debug!("Added node '{}' at ({}, {})", id, position.x, position.y);
        self.nodes.push(node.clone());
        self.sink.send(EditorEvent::NodeAdded { node });
        id
    }

    /// Delete the selected node and every edge touching it
    ///
    /// Does nothing unless `id` is the current selection. Clears the
    /// selection. Returns whether anything changed.
    pub fn delete_node(&mut self, id: &str) -> bool {
        if self.selection.as_deref() != Some(id) {
            log::debug!("Ignoring delete of '{}': not selected", id);
            return false;
        }

        if let Some(index) = self.nodes.iter().position(|n| n.id == id) {
            self.nodes.remove(index);

            let mut removed_edges = Vec::new();
            self.edges.retain(|e| {
                if e.touches(id) {
                    removed_edges.push(e.id.clone());
                    false
                } else {
                    true
                }
            });

            log::debug!(
                "Deleted node '{}' and {} incident edge(s)",
                id,
                removed_edges.len()
            );
            self.sink.send(EditorEvent::NodeRemoved {
                node_id: id.to_string(),
                removed_edges,
            });
        }

        self.set_selection(None);
        true
    }

    /// Copy the selected node, without its edges
    ///
    /// The copy keeps the kind, gets the label suffixed with the configured
    /// copy suffix and is offset from the original. The selection stays on
    /// the original. Returns the new id, or `None` when `id` is not the
    /// selected node.
    pub fn duplicate_node(&mut self, id: &str) -> Option<NodeId> {
        if self.selection.as_deref() != Some(id) {
            log::debug!("Ignoring duplicate of '{}': not selected", id);
            return None;
        }
        let original = self.node(id)?.clone();

        let new_id = self.next_node_id();
        let node = Node::new(
            new_id.clone(),
            original.kind,
            format!("{}{}", original.label, self.config.copy_suffix),
            original.position.offset(self.config.duplicate_offset),
        );

        log::debug!("Duplicated node '{}' as '{}'", id, new_id);
        self.nodes.push(node.clone());
        self.sink.send(EditorEvent::NodeDuplicated {
            original_id: original.id,
            node,
        });
        Some(new_id)
    }

    /// Replace the selected node's label
    ///
    /// An empty label leaves the old one untouched. Returns whether the
    /// label was written.
    pub fn relabel_node(&mut self, id: &str, label: &str) -> bool {
        if self.selection.as_deref() != Some(id) {
            log::debug!("Ignoring relabel of '{}': not selected", id);
            return false;
        }
        if label.is_empty() {
            log::debug!("Ignoring empty label for '{}'", id);
            return false;
        }
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };

        node.label = label.to_string();
        self.sink.send(EditorEvent::NodeRelabeled {
            node_id: id.to_string(),
            label: label.to_string(),
        });
        true
    }

    /// Add a non-animated edge from `source` to `target`
    ///
    /// Duplicates and self-loops are accepted. A repeated connection gets
    /// an id suffixed with `#2`, `#3`, ... Returns `None` only when an
    /// endpoint is missing.
    pub fn connect(&mut self, source: &str, target: &str) -> Option<EdgeId> {
        if !self.contains_node(source) || !self.contains_node(target) {
            log::debug!(
                "Ignoring connection {} -> {}: unknown endpoint",
                source,
                target
            );
            return None;
        }

        let id = self.next_edge_id(source, target);
        let edge = Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            animated: false,
        };

        log::debug!("Connected {} -> {} as '{}'", source, target, id);
        self.edges.push(edge.clone());
        self.sink.send(EditorEvent::EdgeAdded { edge });
        Some(id)
    }

    /// Move a node on the canvas. Topology is unaffected.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        let Some(node) = self.nodes.iter_mut().find(|n| n.id == id) else {
            return false;
        };
        if node.position == position {
            return false;
        }

        node.position = position;
        self.sink.send(EditorEvent::NodeMoved {
            node_id: id.to_string(),
            position,
        });
        true
    }

    /// Replace the selection
    pub fn select(&mut self, id: Option<NodeId>) {
        self.set_selection(id);
    }

    fn set_selection(&mut self, id: Option<NodeId>) {
        if self.selection == id {
            return;
        }
        self.selection = id.clone();
        self.sink.send(EditorEvent::SelectionChanged { selected: id });
    }

    // =========================================================================
    // Id allocation
    // =========================================================================

    fn next_node_id(&mut self) -> NodeId {
        let id = match self.config.id_strategy {
            IdStrategy::Monotonic => match self.id_high_water.checked_add(1) {
                Some(next) => next.to_string(),
                None => {
                    log::warn!("Numeric node ids are exhausted, reusing free ids");
                    self.first_free_id(self.nodes.len() as u64 + 1)
                }
            },
            IdStrategy::CountBased => self.first_free_id(self.nodes.len() as u64 + 1),
        };
        self.note_node_id(&id);
        id
    }

    /// Lowest unused numeric id at or above `wanted`
    fn first_free_id(&self, wanted: u64) -> NodeId {
        let mut candidate = wanted;
        while self.contains_node(&candidate.to_string()) {
            candidate = candidate.saturating_add(1);
        }
        if candidate != wanted {
            log::warn!(
                "Node id '{}' is still in use, allocating '{}' instead",
                wanted,
                candidate
            );
        }
        candidate.to_string()
    }

    fn note_node_id(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            self.id_high_water = self.id_high_water.max(n);
        }
    }

    fn next_edge_id(&self, source: &str, target: &str) -> EdgeId {
        let base = Edge::base_id(source, target);
        let taken = |candidate: &str| self.edges.iter().any(|e| e.id == candidate);
        if !taken(&base) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}#{}", base, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::seeded(EditorConfig::default())
    }
}
