//! Confirmation dialog for destructive actions
//!
//! Holds the item a destructive action is pending on until the user
//! confirms or cancels. Confirming hands the item back and closes the
//! dialog; cancelling just closes it.

use serde::{Deserialize, Serialize};

pub const DEFAULT_WARNING: &str = "You cannot undo this step";
pub const DEFAULT_CONFIRM_TEXT: &str = "Yes";
pub const DEFAULT_CANCEL_TEXT: &str = "No";

/// Text shown by the dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPrompt {
    pub title: String,
    pub warning_text: String,
    pub confirm_text: String,
    pub cancel_text: String,
}

impl ConfirmationPrompt {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            warning_text: DEFAULT_WARNING.to_string(),
            confirm_text: DEFAULT_CONFIRM_TEXT.to_string(),
            cancel_text: DEFAULT_CANCEL_TEXT.to_string(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning_text = warning.into();
        self
    }
}

/// A dialog waiting on a decision about one item
#[derive(Debug)]
pub struct ConfirmationDialog<T> {
    pending: Option<(ConfirmationPrompt, T)>,
}

impl<T> Default for ConfirmationDialog<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> ConfirmationDialog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog for `item`, replacing any earlier request
    pub fn request(&mut self, prompt: ConfirmationPrompt, item: T) {
        self.pending = Some((prompt, item));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// The prompt currently on screen
    pub fn prompt(&self) -> Option<&ConfirmationPrompt> {
        self.pending.as_ref().map(|(prompt, _)| prompt)
    }

    /// The item awaiting a decision
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(_, item)| item)
    }

    /// Close the dialog and hand back the item to act on
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take().map(|(_, item)| item)
    }

    /// Close the dialog without acting
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Run `on_confirm` with the pending item, then close
    pub fn confirm_with<R>(&mut self, on_confirm: impl FnOnce(T) -> R) -> Option<R> {
        self.confirm().map(on_confirm)
    }
}
