//! Interaction controller
//!
//! Translates canvas gestures and toolbar presses into graph store
//! operations. The controller owns the store, so it is the only writer of
//! the selection, and it decides which toolbar actions are currently
//! invocable.
//!
//! | Input | Precondition | Effect |
//! |---|---|---|
//! | node clicked | - | select the node |
//! | background clicked | - | clear the selection |
//! | connection attempted | - | connect source to target |
//! | node dragged | - | move the node |
//! | toolbar add | - | add a node |
//! | toolbar delete / duplicate | selection | apply to the selection |
//! | toolbar edit label | selection | prompt, relabel on non-empty input |

use serde::{Deserialize, Serialize};

use crate::render::{project, Projection};
use crate::store::GraphStore;
use crate::types::{NodeId, Position};

/// A gesture reported by the render surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Gesture {
    #[serde(rename_all = "camelCase")]
    NodeClicked { node_id: NodeId },

    BackgroundClicked,

    /// A drag-connect completed between two node endpoints
    #[serde(rename_all = "camelCase")]
    ConnectionAttempted { source: NodeId, target: NodeId },

    #[serde(rename_all = "camelCase")]
    NodeDragged { node_id: NodeId, position: Position },
}

/// A toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolbarAction {
    Add,
    Delete,
    Duplicate,
    EditLabel,
}

/// Which toolbar buttons are invocable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolbarState {
    pub add: bool,
    pub delete: bool,
    pub duplicate: bool,
    pub edit_label: bool,
}

impl ToolbarState {
    /// Toolbar state for a given selection
    pub fn for_selection(selection: Option<&str>) -> Self {
        let selected = selection.is_some();
        Self {
            add: true,
            delete: selected,
            duplicate: selected,
            edit_label: selected,
        }
    }

    pub fn is_enabled(&self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Add => self.add,
            ToolbarAction::Delete => self.delete,
            ToolbarAction::Duplicate => self.duplicate,
            ToolbarAction::EditLabel => self.edit_label,
        }
    }
}

/// Asks the user for a new node label
///
/// The call blocks until the user answers. `None` means the prompt was
/// cancelled.
pub trait LabelPrompt {
    fn prompt_label(&mut self, current: &str) -> Option<String>;
}

impl<F> LabelPrompt for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn prompt_label(&mut self, current: &str) -> Option<String> {
        self(current)
    }
}

/// Dispatches user input to a [`GraphStore`]
pub struct InteractionController<P> {
    store: GraphStore,
    prompt: P,
}

impl<P: LabelPrompt> InteractionController<P> {
    pub fn new(store: GraphStore, prompt: P) -> Self {
        Self { store, prompt }
    }

    /// Read access to the underlying store
    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    /// Give back the store, e.g. when the editor screen unmounts
    pub fn into_store(self) -> GraphStore {
        self.store
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState::for_selection(self.store.selection())
    }

    /// Current frame for the render surface
    pub fn projection(&self) -> Projection {
        project(
            &self.store.snapshot(),
            self.store.selection(),
            self.toolbar_state(),
        )
    }

    /// Apply a canvas gesture
    pub fn handle_gesture(&mut self, gesture: Gesture) {
        log::debug!("Gesture: {:?}", gesture);
        match gesture {
            Gesture::NodeClicked { node_id } => self.store.select(Some(node_id)),
            Gesture::BackgroundClicked => self.store.select(None),
            Gesture::ConnectionAttempted { source, target } => {
                self.store.connect(&source, &target);
            }
            Gesture::NodeDragged { node_id, position } => {
                self.store.move_node(&node_id, position);
            }
        }
    }

    /// Apply a toolbar press
    ///
    /// Returns `false` when the button is disabled, in which case nothing
    /// happens.
    pub fn handle_toolbar(&mut self, action: ToolbarAction) -> bool {
        if !self.toolbar_state().is_enabled(action) {
            log::debug!("Toolbar action {:?} is disabled", action);
            return false;
        }

        match action {
            ToolbarAction::Add => {
                self.store.add_node();
            }
            ToolbarAction::Delete => {
                if let Some(id) = self.selected_id() {
                    self.store.delete_node(&id);
                }
            }
            ToolbarAction::Duplicate => {
                if let Some(id) = self.selected_id() {
                    self.store.duplicate_node(&id);
                }
            }
            ToolbarAction::EditLabel => self.edit_selected_label(),
        }
        true
    }

    fn edit_selected_label(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let Some(current) = self.store.node(&id).map(|n| n.label.clone()) else {
            return;
        };

        match self.prompt.prompt_label(&current) {
            Some(label) if !label.is_empty() => {
                self.store.relabel_node(&id, &label);
            }
            _ => log::debug!("Label prompt for '{}' cancelled or empty", id),
        }
    }

    fn selected_id(&self) -> Option<NodeId> {
        self.store.selection().map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn controller_with_answer(
        answer: Option<&'static str>,
    ) -> InteractionController<impl LabelPrompt> {
        let store = GraphStore::seeded(EditorConfig::default());
        InteractionController::new(store, move |_: &str| answer.map(str::to_string))
    }

    fn click(node_id: &str) -> Gesture {
        Gesture::NodeClicked {
            node_id: node_id.to_string(),
        }
    }

    #[test]
    fn test_toolbar_disabled_without_selection() {
        let mut controller = controller_with_answer(Some("unused"));

        let state = controller.toolbar_state();
        assert!(state.add);
        assert!(!state.delete && !state.duplicate && !state.edit_label);

        assert!(!controller.handle_toolbar(ToolbarAction::Delete));
        assert!(!controller.handle_toolbar(ToolbarAction::Duplicate));
        assert!(!controller.handle_toolbar(ToolbarAction::EditLabel));
        assert_eq!(controller.store().nodes().len(), 3);
    }

    #[test]
    fn test_click_then_background_disables_toolbar() {
        let mut controller = controller_with_answer(None);

        controller.handle_gesture(click("1"));
        assert!(controller.toolbar_state().delete);

        controller.handle_gesture(Gesture::BackgroundClicked);
        let state = controller.toolbar_state();
        assert!(!state.delete && !state.duplicate && !state.edit_label);
        assert_eq!(controller.store().selection(), None);
    }

    #[test]
    fn test_add_is_always_enabled() {
        let mut controller = controller_with_answer(None);

        assert!(controller.handle_toolbar(ToolbarAction::Add));
        assert_eq!(controller.store().nodes().len(), 4);
    }

    #[test]
    fn test_edit_label_uses_prompt() {
        let mut controller = controller_with_answer(Some("Transform"));

        controller.handle_gesture(click("2"));
        assert!(controller.handle_toolbar(ToolbarAction::EditLabel));

        assert_eq!(controller.store().node("2").unwrap().label, "Transform");
    }

    #[test]
    fn test_edit_label_cancelled_keeps_label() {
        let mut controller = controller_with_answer(None);

        controller.handle_gesture(click("2"));
        controller.handle_toolbar(ToolbarAction::EditLabel);

        assert_eq!(controller.store().node("2").unwrap().label, "Script");
    }

    #[test]
    fn test_edit_label_empty_keeps_label() {
        let mut controller = controller_with_answer(Some(""));

        controller.handle_gesture(click("2"));
        controller.handle_toolbar(ToolbarAction::EditLabel);

        assert_eq!(controller.store().node("2").unwrap().label, "Script");
    }

    #[test]
    fn test_prompt_sees_current_label() {
        let store = GraphStore::seeded(EditorConfig::default());
        let mut seen = Vec::new();
        let mut controller = InteractionController::new(store, |current: &str| {
            seen.push(current.to_string());
            None::<String>
        });

        controller.handle_gesture(click("3"));
        controller.handle_toolbar(ToolbarAction::EditLabel);
        drop(controller);

        assert_eq!(seen, vec!["End".to_string()]);
    }

    #[test]
    fn test_connect_and_drag_gestures() {
        let mut controller = controller_with_answer(None);

        controller.handle_gesture(Gesture::ConnectionAttempted {
            source: "1".to_string(),
            target: "3".to_string(),
        });
        controller.handle_gesture(Gesture::NodeDragged {
            node_id: "3".to_string(),
            position: Position::new(400.0, 400.0),
        });

        let store = controller.store();
        assert_eq!(store.edges().len(), 3);
        assert_eq!(store.node("3").unwrap().position, Position::new(400.0, 400.0));
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn test_projection_tracks_selection() {
        let mut controller = controller_with_answer(None);
        controller.handle_gesture(click("3"));

        let frame = controller.projection();

        assert_eq!(frame.nodes.len(), 3);
        assert_eq!(frame.edges.len(), 2);
        let end = frame.nodes.iter().find(|n| n.id == "3").unwrap();
        assert!(end.selected);
        assert_eq!(end.hint, "output");
        assert!(frame.nodes.iter().filter(|n| n.id != "3").all(|n| !n.selected));
        assert!(frame.toolbar.delete);
    }

    #[test]
    fn test_gesture_json() {
        let gesture: Gesture = serde_json::from_str(
            r#"{"type": "connectionAttempted", "source": "1", "target": "2"}"#,
        )
        .unwrap();
        assert_eq!(
            gesture,
            Gesture::ConnectionAttempted {
                source: "1".to_string(),
                target: "2".to_string()
            }
        );

        let action: ToolbarAction = serde_json::from_str(r#""editLabel""#).unwrap();
        assert_eq!(action, ToolbarAction::EditLabel);
    }
}
