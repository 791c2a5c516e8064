//! Editor configuration
//!
//! Placement offsets, the copy suffix and the node id strategy. Every
//! field has a default, so a partial JSON file is enough to override a
//! single value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod defaults {
    /// Where the first node lands on an empty canvas
    pub const DEFAULT_POSITION: (f64, f64) = (250.0, 50.0);
    /// Offset from the last node for a newly added node
    pub const APPEND_OFFSET: (f64, f64) = (50.0, 100.0);
    /// Offset from the original for a duplicated node
    pub const DUPLICATE_OFFSET: (f64, f64) = (50.0, 50.0);
    pub const COPY_SUFFIX: &str = " (copy)";
}

/// How new node ids are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdStrategy {
    /// One past the highest numeric id the graph has ever held; ids are
    /// never reused after a deletion
    #[default]
    Monotonic,
    /// One past the current node count, probing upward only when that id
    /// is still taken
    CountBased,
}

/// Configuration for a [`GraphStore`](crate::store::GraphStore)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Node id derivation
    pub id_strategy: IdStrategy,
    /// Position of a node added to an empty graph
    pub default_position: (f64, f64),
    /// Offset from the last node for `add_node`
    pub append_offset: (f64, f64),
    /// Offset from the original for `duplicate_node`
    pub duplicate_offset: (f64, f64),
    /// Appended to the label of a duplicated node
    pub copy_suffix: String,
    /// Whether the seed edges are drawn animated
    pub seed_animated_edges: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::default(),
            default_position: defaults::DEFAULT_POSITION,
            append_offset: defaults::APPEND_OFFSET,
            duplicate_offset: defaults::DUPLICATE_OFFSET,
            copy_suffix: defaults::COPY_SUFFIX.to_string(),
            seed_animated_edges: true,
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&content)?;
        log::info!("Loaded editor configuration from {:?}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EditorError;
    use tempfile::TempDir;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json_str(r#"{"idStrategy": "countBased"}"#).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::CountBased);
        assert_eq!(config.copy_suffix, " (copy)");
        assert_eq!(config.append_offset, (50.0, 100.0));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("editor.json");
        std::fs::write(&path, r#"{"copySuffix": " copy", "duplicateOffset": [10.0, 20.0]}"#)
            .unwrap();

        let config = EditorConfig::load(&path).unwrap();
        assert_eq!(config.copy_suffix, " copy");
        assert_eq!(config.duplicate_offset, (10.0, 20.0));
        assert_eq!(config.id_strategy, IdStrategy::Monotonic);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = EditorConfig::load(temp_dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, EditorError::Io(_)));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = EditorConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, EditorError::Serialization(_)));
    }
}
