//! Save-workflow dialog and saver seam
//!
//! The editor only exposes a graph snapshot; persisting it is up to a
//! [`WorkflowSaver`]. No on-disk format is defined here. [`StubSaver`]
//! accepts the request and stores nothing, which is the behaviour of the
//! current save button. [`InMemoryWorkflowStore`] keeps saved workflows in
//! memory for hosts that want to reopen them within a session.

use std::collections::HashMap;

use async_trait::async_trait;
use graph_editor::GraphSnapshot;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, ServiceError};

pub const SAVE_DIALOG_TITLE: &str = "Save your Workflow";

/// Everything needed to persist a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest {
    pub name: String,
    pub description: String,
    pub graph: GraphSnapshot,
}

/// Result of a successful save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOutcome {
    /// Identifier assigned by the saver, if it stores anything
    pub workflow_id: Option<String>,
}

#[async_trait]
pub trait WorkflowSaver: Send + Sync {
    async fn save(&self, request: SaveRequest) -> Result<SaveOutcome>;
}

/// Saver that accepts every request and persists nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct StubSaver;

#[async_trait]
impl WorkflowSaver for StubSaver {
    async fn save(&self, request: SaveRequest) -> Result<SaveOutcome> {
        log::info!(
            "Save confirmed for '{}' ({} nodes); nothing persisted",
            request.name,
            request.graph.nodes.len()
        );
        Ok(SaveOutcome { workflow_id: None })
    }
}

/// Saver keeping workflows in memory, keyed by a generated id
#[derive(Debug, Default)]
pub struct InMemoryWorkflowStore {
    saved: RwLock<HashMap<String, SaveRequest>>,
}

impl InMemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<SaveRequest> {
        self.saved.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.saved.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.saved.read().await.is_empty()
    }
}

#[async_trait]
impl WorkflowSaver for InMemoryWorkflowStore {
    async fn save(&self, request: SaveRequest) -> Result<SaveOutcome> {
        let id = uuid::Uuid::new_v4().to_string();
        log::debug!("Stored workflow '{}' as {}", request.name, id);
        self.saved.write().await.insert(id.clone(), request);
        Ok(SaveOutcome {
            workflow_id: Some(id),
        })
    }
}

/// State of the save dialog
#[derive(Debug, Default)]
pub struct SaveWorkflowDialog {
    open: bool,
    name: String,
    description: String,
    error: Option<String>,
}

impl SaveWorkflowDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> &'static str {
        SAVE_DIALOG_TITLE
    }

    /// Open with empty fields
    pub fn open(&mut self) {
        *self = Self {
            open: true,
            ..Self::default()
        };
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Error from the last failed confirmation
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Hand the entered fields and `graph` to `saver`
    ///
    /// The dialog closes on success and stays open, with the error
    /// recorded, on failure.
    pub async fn confirm<S>(&mut self, saver: &S, graph: GraphSnapshot) -> Result<SaveOutcome>
    where
        S: WorkflowSaver + ?Sized,
    {
        if !self.open {
            return Err(ServiceError::SaveFailed("save dialog is not open".to_string()));
        }

        let request = SaveRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            graph,
        };
        match saver.save(request).await {
            Ok(outcome) => {
                self.error = None;
                self.close();
                Ok(outcome)
            }
            Err(e) => {
                log::warn!("Saving workflow '{}' failed: {}", self.name, e);
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}
