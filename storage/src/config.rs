use serde::{Deserialize, Serialize};

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// YAML snapshot file backing the in-memory store
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,

    /// Start from an empty store when the snapshot file does not exist
    #[serde(default = "default_create_if_missing")]
    pub create_if_missing: bool,
}

// Default value functions
fn default_snapshot_path() -> String {
    "kingpin-data.yaml".to_string()
}

fn default_create_if_missing() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            create_if_missing: default_create_if_missing(),
        }
    }
}

/// Standalone loaders for embedders that keep storage settings in their own
/// file. The `kingpin` binary nests this struct under `storage:` in its config
/// and deserializes it there.
impl StorageConfig {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, crate::error::StorageError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::error::StorageError::ConfigError(e.to_string()))?;

        Self::from_yaml(&contents)
    }

    /// Load configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, crate::error::StorageError> {
        serde_yaml::from_str(yaml)
            .map_err(|e| crate::error::StorageError::ConfigError(e.to_string()))
    }
}
