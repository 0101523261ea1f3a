//! Records held by the store
//!
//! Users and tournaments are keyed by name. Orders reference both by name and
//! carry a numeric id assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category given to tournaments created without an explicit one
pub const DEFAULT_CATEGORY: &str = "Tournament";

/// Unique name of a user
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserName(pub String);

impl UserName {
    /// Create a new UserName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UserName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Unique name of a tournament
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemName(pub String);

impl ItemName {
    /// Create a new ItemName
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ItemName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Store-assigned order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Get the raw id
    pub fn get(&self) -> u64 {
        self.0
    }

    /// Id following this one, `None` past `u64::MAX`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of stored record, used in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Item,
    Order,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::User => write!(f, "user"),
            EntityKind::Item => write!(f, "item"),
            EntityKind::Order => write!(f, "order"),
        }
    }
}

/// A bowler who can enter tournaments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: UserName,
    pub proficiency: u32,
}

impl User {
    pub fn new(name: impl Into<UserName>, proficiency: u32) -> Self {
        Self {
            name: name.into(),
            proficiency,
        }
    }
}

/// A tournament entry that can be ordered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: ItemName,
    pub required_proficiency: u32,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Tournament {
    pub fn new(name: impl Into<ItemName>, required_proficiency: u32) -> Self {
        Self {
            name: name.into(),
            required_proficiency,
            category: default_category(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

/// A stored order linking one user to one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user: UserName,
    pub item: ItemName,
    pub placed_at: DateTime<Utc>,
}

/// An order that has not been saved yet
///
/// The store assigns an id when `id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub id: Option<OrderId>,
    pub user: UserName,
    pub item: ItemName,
}

impl NewOrder {
    pub fn new(user: impl Into<UserName>, item: impl Into<ItemName>) -> Self {
        Self {
            id: None,
            user: user.into(),
            item: item.into(),
        }
    }

    /// Request a specific id instead of the next free one
    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }
}
