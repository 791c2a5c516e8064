//! Host-agnostic workflow services for Flowdesk
//!
//! The collaborators around the graph editor, each behind a small async
//! trait so hosts can plug in their own backends:
//!
//! - `catalog`: the workflow list with totals, search and pagination
//! - `confirm`: the confirm-before-destroy dialog
//! - `save`: the save-workflow dialog and the `WorkflowSaver` seam
//! - `session`: sign-in state over an `AuthGateway`

pub mod catalog;
pub mod config;
pub mod confirm;
pub mod error;
pub mod save;
pub mod session;

pub use catalog::{
    CatalogTotals, InMemoryWorkflowBackend, LoadStatus, WorkflowBackend, WorkflowCatalog,
    WorkflowListing, WorkflowPage, WorkflowStats, WorkflowSummary, WorkflowUpdate,
};
pub use config::CatalogConfig;
pub use confirm::{ConfirmationDialog, ConfirmationPrompt};
pub use error::{Result, ServiceError};
pub use save::{
    InMemoryWorkflowStore, SaveOutcome, SaveRequest, SaveWorkflowDialog, StubSaver, WorkflowSaver,
};
pub use session::{AuthGateway, AuthenticatedUser, Session, User};
