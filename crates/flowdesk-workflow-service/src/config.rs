//! Service configuration

use serde::{Deserialize, Serialize};

/// Paging of the workflow list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogConfig {
    /// Rows per page on regular screens
    pub rows_per_page: usize,
    /// Rows per page on small screens
    pub compact_rows_per_page: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            rows_per_page: 5,
            compact_rows_per_page: 3,
        }
    }
}

impl CatalogConfig {
    /// Page size for the current screen class (never zero)
    pub fn rows_for(&self, compact: bool) -> usize {
        let rows = if compact {
            self.compact_rows_per_page
        } else {
            self.rows_per_page
        };
        rows.max(1)
    }
}
