//! Event types for re-projecting the graph
//!
//! The store emits one event per effective mutation so that a render
//! surface can update incrementally instead of redrawing from a snapshot.
//! Guarded no-ops emit nothing.

use serde::{Deserialize, Serialize};

use crate::types::{Edge, EdgeId, Node, NodeId, Position};

/// Trait for receiving editor events
///
/// This abstracts over whatever the host uses to push updates to its
/// canvas (a channel, a callback, a buffer), so the store stays
/// independent of any UI toolkit.
pub trait EventSink {
    /// Receive an event
    fn send(&self, event: EditorEvent);
}

/// Events emitted by the graph store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EditorEvent {
    /// A node was created by `add_node`
    #[serde(rename_all = "camelCase")]
    NodeAdded { node: Node },

    /// A node was removed, together with every edge touching it
    #[serde(rename_all = "camelCase")]
    NodeRemoved {
        node_id: NodeId,
        removed_edges: Vec<EdgeId>,
    },

    /// A node was created as a copy of another
    #[serde(rename_all = "camelCase")]
    NodeDuplicated { original_id: NodeId, node: Node },

    /// A node's label changed
    #[serde(rename_all = "camelCase")]
    NodeRelabeled { node_id: NodeId, label: String },

    /// A node was dragged to a new position
    #[serde(rename_all = "camelCase")]
    NodeMoved { node_id: NodeId, position: Position },

    /// An edge was created
    #[serde(rename_all = "camelCase")]
    EdgeAdded { edge: Edge },

    /// The selection changed
    #[serde(rename_all = "camelCase")]
    SelectionChanged { selected: Option<NodeId> },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: EditorEvent) {}
}

/// A vector-based event sink that collects events
///
/// Useful for hosts that drain updates once per frame, and for tests.
pub struct VecEventSink {
    events: std::cell::RefCell<Vec<EditorEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: std::cell::RefCell::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }

    /// Take all collected events, leaving the sink empty
    pub fn drain(&self) -> Vec<EditorEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: EditorEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl<S: EventSink + ?Sized> EventSink for std::rc::Rc<S> {
    fn send(&self, event: EditorEvent) {
        (**self).send(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_event_sink() {
        let sink = VecEventSink::new();

        sink.send(EditorEvent::SelectionChanged {
            selected: Some("2".to_string()),
        });

        let events = sink.events();
        assert_eq!(events.len(), 1);

        match &events[0] {
            EditorEvent::SelectionChanged { selected } => {
                assert_eq!(selected.as_deref(), Some("2"));
            }
            _ => panic!("Expected SelectionChanged event"),
        }

        assert_eq!(sink.drain().len(), 1);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_event_tagging() {
        let event = EditorEvent::NodeRemoved {
            node_id: "2".to_string(),
            removed_edges: vec!["e1-2".to_string()],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "nodeRemoved");
        assert_eq!(json["nodeId"], "2");
        assert_eq!(json["removedEdges"][0], "e1-2");
    }
}
