//! Workflow catalog
//!
//! The list behind the workflows screen: summaries fetched from a backend,
//! pass/fail totals kept in step with updates and deletions, plus
//! case-insensitive search and 1-based pagination.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::{Result, ServiceError};

/// Execution statistics for a workflow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStats {
    pub passed: u64,
    pub failed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_executed: Option<String>,
}

/// One row of the workflow list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_on: Option<NaiveDate>,
    #[serde(default)]
    pub stats: WorkflowStats,
}

impl WorkflowSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            last_edited_on: None,
            stats: WorkflowStats::default(),
        }
    }

    /// Case-insensitive substring match on name, id and description
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.id.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}

/// Partial update for a workflow summary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<WorkflowStats>,
}

impl WorkflowUpdate {
    fn apply_to(self, summary: &mut WorkflowSummary) {
        if let Some(name) = self.name {
            summary.name = name;
        }
        if let Some(description) = self.description {
            summary.description = description;
        }
        if let Some(stats) = self.stats {
            summary.stats = stats;
        }
    }
}

/// Response of a full list fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowListing {
    pub workflows: Vec<WorkflowSummary>,
    pub total_passed: u64,
    pub total_failed: u64,
}

/// Source of truth for workflow summaries
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    async fn fetch_workflows(&self) -> Result<WorkflowListing>;

    /// Apply `update` and return the stored summary
    async fn update_workflow(&self, id: &str, update: WorkflowUpdate) -> Result<WorkflowSummary>;

    async fn delete_workflow(&self, id: &str) -> Result<()>;
}

/// Backend that keeps summaries in memory
#[derive(Debug, Default)]
pub struct InMemoryWorkflowBackend {
    workflows: RwLock<Vec<WorkflowSummary>>,
}

impl InMemoryWorkflowBackend {
    pub fn new(workflows: Vec<WorkflowSummary>) -> Self {
        Self {
            workflows: RwLock::new(workflows),
        }
    }

    /// `count` placeholder workflows named "Workflow 1", "Workflow 2", ...
    pub fn with_placeholders(count: usize) -> Self {
        let workflows = (1..=count)
            .map(|i| {
                WorkflowSummary::new(
                    i.to_string(),
                    format!("Workflow {}", i),
                    format!(
                        "Description for workflow {} covering various business processes",
                        i
                    ),
                )
            })
            .collect();
        Self::new(workflows)
    }
}

#[async_trait]
impl WorkflowBackend for InMemoryWorkflowBackend {
    async fn fetch_workflows(&self) -> Result<WorkflowListing> {
        let workflows = self.workflows.read().await.clone();
        let total_passed = workflows.iter().map(|w| w.stats.passed).sum();
        let total_failed = workflows.iter().map(|w| w.stats.failed).sum();
        Ok(WorkflowListing {
            workflows,
            total_passed,
            total_failed,
        })
    }

    async fn update_workflow(&self, id: &str, update: WorkflowUpdate) -> Result<WorkflowSummary> {
        let mut workflows = self.workflows.write().await;
        let summary = workflows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| ServiceError::WorkflowNotFound(id.to_string()))?;
        update.apply_to(summary);
        Ok(summary.clone())
    }

    async fn delete_workflow(&self, id: &str) -> Result<()> {
        let mut workflows = self.workflows.write().await;
        let before = workflows.len();
        workflows.retain(|w| w.id != id);
        if workflows.len() == before {
            return Err(ServiceError::WorkflowNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Loading state of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Pass/fail totals across all workflows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTotals {
    pub total_passed: u64,
    pub total_failed: u64,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPage {
    pub items: Vec<WorkflowSummary>,
    /// 1-based page number actually served
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Client-side view of the workflow list
#[derive(Debug, Default)]
pub struct WorkflowCatalog {
    workflows: Vec<WorkflowSummary>,
    totals: CatalogTotals,
    status: LoadStatus,
    error: Option<String>,
}

impl WorkflowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workflows(&self) -> &[WorkflowSummary] {
        &self.workflows
    }

    pub fn totals(&self) -> CatalogTotals {
        self.totals
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the list and totals with a fresh fetch
    ///
    /// On failure the previous list is kept and the error is recorded.
    pub async fn refresh<B>(&mut self, backend: &B) -> Result<()>
    where
        B: WorkflowBackend + ?Sized,
    {
        self.status = LoadStatus::Loading;
        match backend.fetch_workflows().await {
            Ok(listing) => {
                log::info!("Fetched {} workflows", listing.workflows.len());
                self.workflows = listing.workflows;
                self.totals = CatalogTotals {
                    total_passed: listing.total_passed,
                    total_failed: listing.total_failed,
                };
                self.status = LoadStatus::Succeeded;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                log::warn!("Failed to fetch workflows: {}", e);
                self.status = LoadStatus::Failed;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Update a workflow and shift the totals by its stats delta
    pub async fn update<B>(&mut self, backend: &B, id: &str, update: WorkflowUpdate) -> Result<()>
    where
        B: WorkflowBackend + ?Sized,
    {
        let updated = backend.update_workflow(id, update).await?;
        if let Some(existing) = self.workflows.iter_mut().find(|w| w.id == updated.id) {
            self.totals.total_passed = self
                .totals
                .total_passed
                .saturating_sub(existing.stats.passed)
                .saturating_add(updated.stats.passed);
            self.totals.total_failed = self
                .totals
                .total_failed
                .saturating_sub(existing.stats.failed)
                .saturating_add(updated.stats.failed);
            *existing = updated;
        }
        Ok(())
    }

    /// Delete a workflow and subtract its stats from the totals
    pub async fn delete<B>(&mut self, backend: &B, id: &str) -> Result<()>
    where
        B: WorkflowBackend + ?Sized,
    {
        backend.delete_workflow(id).await?;
        if let Some(index) = self.workflows.iter().position(|w| w.id == id) {
            let removed = self.workflows.remove(index);
            self.totals.total_passed = self.totals.total_passed.saturating_sub(removed.stats.passed);
            self.totals.total_failed = self.totals.total_failed.saturating_sub(removed.stats.failed);
            log::info!("Deleted workflow '{}'", removed.name);
        }
        Ok(())
    }

    /// Workflows matching `term`; an empty term matches everything
    pub fn search(&self, term: &str) -> Vec<&WorkflowSummary> {
        if term.is_empty() {
            return self.workflows.iter().collect();
        }
        self.workflows.iter().filter(|w| w.matches(term)).collect()
    }

    /// One page of the workflows matching `term`
    ///
    /// Pages are 1-based; page 0 is served as page 1. A page past the end
    /// comes back empty.
    pub fn page(&self, term: &str, page: usize, rows_per_page: usize) -> WorkflowPage {
        let rows = rows_per_page.max(1);
        let page = page.max(1);
        let matches = self.search(term);
        let total_matches = matches.len();

        let items = matches
            .into_iter()
            .skip((page - 1).saturating_mul(rows))
            .take(rows)
            .cloned()
            .collect();

        WorkflowPage {
            items,
            page,
            total_pages: total_matches.div_ceil(rows),
            total_matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stats(id: &str, passed: u64, failed: u64) -> WorkflowSummary {
        let mut summary = WorkflowSummary::new(id, format!("Flow {}", id), "test flow");
        summary.stats = WorkflowStats {
            passed,
            failed,
            last_executed: None,
        };
        summary
    }

    struct FailingBackend;

    #[async_trait]
    impl WorkflowBackend for FailingBackend {
        async fn fetch_workflows(&self) -> Result<WorkflowListing> {
            Err(ServiceError::backend("offline"))
        }

        async fn update_workflow(&self, id: &str, _update: WorkflowUpdate) -> Result<WorkflowSummary> {
            Err(ServiceError::WorkflowNotFound(id.to_string()))
        }

        async fn delete_workflow(&self, _id: &str) -> Result<()> {
            Err(ServiceError::backend("offline"))
        }
    }

    #[tokio::test]
    async fn test_refresh_loads_totals() {
        let backend = InMemoryWorkflowBackend::new(vec![with_stats("a", 3, 1), with_stats("b", 2, 4)]);
        let mut catalog = WorkflowCatalog::new();

        catalog.refresh(&backend).await.unwrap();

        assert_eq!(catalog.status(), LoadStatus::Succeeded);
        assert_eq!(catalog.workflows().len(), 2);
        assert_eq!(
            catalog.totals(),
            CatalogTotals {
                total_passed: 5,
                total_failed: 5
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_records_error() {
        let mut catalog = WorkflowCatalog::new();

        assert!(catalog.refresh(&FailingBackend).await.is_err());

        assert_eq!(catalog.status(), LoadStatus::Failed);
        assert_eq!(catalog.error(), Some("Backend error: offline"));
    }

    #[tokio::test]
    async fn test_update_shifts_totals_by_delta() {
        let backend = InMemoryWorkflowBackend::new(vec![with_stats("a", 3, 1), with_stats("b", 2, 4)]);
        let mut catalog = WorkflowCatalog::new();
        catalog.refresh(&backend).await.unwrap();

        let update = WorkflowUpdate {
            stats: Some(WorkflowStats {
                passed: 10,
                failed: 0,
                last_executed: Some("2024-05-01".to_string()),
            }),
            ..WorkflowUpdate::default()
        };
        catalog.update(&backend, "a", update).await.unwrap();

        assert_eq!(catalog.totals().total_passed, 12);
        assert_eq!(catalog.totals().total_failed, 4);
        assert_eq!(catalog.workflows()[0].stats.passed, 10);
    }

    #[tokio::test]
    async fn test_delete_subtracts_stats() {
        let backend = InMemoryWorkflowBackend::new(vec![with_stats("a", 3, 1), with_stats("b", 2, 4)]);
        let mut catalog = WorkflowCatalog::new();
        catalog.refresh(&backend).await.unwrap();

        catalog.delete(&backend, "b").await.unwrap();

        assert_eq!(catalog.workflows().len(), 1);
        assert_eq!(
            catalog.totals(),
            CatalogTotals {
                total_passed: 3,
                total_failed: 1
            }
        );
        assert!(matches!(
            catalog.delete(&backend, "b").await,
            Err(ServiceError::WorkflowNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_search_and_paging() {
        let backend = InMemoryWorkflowBackend::with_placeholders(25);
        let mut catalog = WorkflowCatalog::new();
        catalog.refresh(&backend).await.unwrap();

        assert_eq!(catalog.search("").len(), 25);
        // "Workflow 1" and "Workflow 10" through "Workflow 19"
        assert_eq!(catalog.search("workflow 1").len(), 11);
        assert_eq!(catalog.search("BUSINESS").len(), 25);

        let first = catalog.page("", 1, 5);
        assert_eq!(first.total_pages, 5);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.items[0].name, "Workflow 1");

        let last = catalog.page("", 9, 3);
        assert_eq!(last.total_pages, 9);
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].name, "Workflow 25");

        let clamped = catalog.page("", 0, 5);
        assert_eq!(clamped.page, 1);

        assert!(catalog.page("", 20, 5).items.is_empty());
        let far = catalog.page("", usize::MAX, 5);
        assert!(far.items.is_empty());
        assert_eq!(far.total_pages, 5);
        assert_eq!(catalog.page("nothing matches", 1, 5).total_pages, 0);
    }
}
