//! Graph Editor - node-graph editing core for Flowdesk workflows
//!
//! This crate holds the in-memory state behind the workflow diagram
//! screen. It supports:
//!
//! - Creating, deleting, duplicating, relabeling and moving nodes
//! - Connecting nodes with directed edges
//! - Single-node selection that gates destructive operations
//! - Snapshots for rendering and for external save flows
//!
//! # Architecture
//!
//! - `GraphStore`: owns nodes, edges and selection; applies mutations
//! - `InteractionController`: turns gestures and toolbar presses into
//!   store operations and decides which toolbar actions are enabled
//! - `EventSink`: receives one event per effective mutation so a canvas
//!   can re-project incrementally
//!
//! Drawing the canvas is left to the host.
//!
//! # Example
//!
//! ```
//! use graph_editor::{EditorConfig, Gesture, GraphStore, InteractionController, ToolbarAction};
//!
//! let store = GraphStore::seeded(EditorConfig::default());
//! let mut editor = InteractionController::new(store, |_: &str| Some("Renamed".to_string()));
//!
//! editor.handle_gesture(Gesture::NodeClicked { node_id: "2".into() });
//! editor.handle_toolbar(ToolbarAction::EditLabel);
//!
//! assert_eq!(editor.store().node("2").unwrap().label, "Renamed");
//! ```

pub mod builder;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod render;
pub mod store;
pub mod types;

// Re-export key types
pub use builder::{seed_graph, GraphBuilder};
pub use config::{EditorConfig, IdStrategy};
pub use controller::{Gesture, InteractionController, LabelPrompt, ToolbarAction, ToolbarState};
pub use diagnostics::{inspect, GraphIssue};
pub use error::{EditorError, Result};
pub use events::{EditorEvent, EventSink, NullEventSink, VecEventSink};
pub use render::{Projection, RenderEdge, RenderNode};
pub use store::GraphStore;
pub use types::{Edge, EdgeId, GraphSnapshot, Node, NodeId, NodeKind, Position};
