//! Gesture scripts
//!
//! A script is a JSON array of steps standing in for a render surface:
//!
//! ```json
//! [
//!   { "gesture": { "type": "nodeClicked", "nodeId": "2" } },
//!   { "toolbar": { "action": "duplicate" } },
//!   { "toolbar": { "action": "editLabel", "input": "Fetch orders" } }
//! ]
//! ```
//!
//! `input` answers the label prompt of an `editLabel` step; leaving it out
//! cancels the prompt.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use graph_editor::{EditorConfig, Gesture, GraphStore, InteractionController, ToolbarAction};
use serde::{Deserialize, Serialize};

/// One recorded user input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptStep {
    Gesture(Gesture),
    Toolbar {
        action: ToolbarAction,
        #[serde(default)]
        input: Option<String>,
    },
}

pub fn load_script(path: &Path) -> graph_editor::Result<Vec<ScriptStep>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Replay `steps` against a freshly seeded graph and return the store
pub fn replay(steps: Vec<ScriptStep>, config: EditorConfig) -> GraphStore {
    let answer: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
    let prompt_answer = Rc::clone(&answer);
    let mut editor = InteractionController::new(GraphStore::seeded(config), move |_: &str| {
        prompt_answer.borrow_mut().take()
    });

    for (index, step) in steps.into_iter().enumerate() {
        match step {
            ScriptStep::Gesture(gesture) => editor.handle_gesture(gesture),
            ScriptStep::Toolbar { action, input } => {
                *answer.borrow_mut() = input;
                if !editor.handle_toolbar(action) {
                    log::warn!("Step {}: toolbar action {:?} is disabled", index + 1, action);
                }
                answer.borrow_mut().take();
            }
        }
    }

    editor.into_store()
}
