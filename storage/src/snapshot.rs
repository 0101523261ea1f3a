//! Serialized form of a whole store

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Order, Tournament, User};

/// Every record of a store, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub tournaments: Vec<Tournament>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl StoreSnapshot {
    /// Parse a snapshot from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Render the snapshot as YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
