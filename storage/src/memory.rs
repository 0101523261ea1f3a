//! In-memory store
//!
//! Users and tournaments live in name-keyed `IndexMap`s so iteration follows
//! insertion order; orders live in a `Vec` in creation order. All three sit
//! behind one lock, which makes batch saves atomic for readers.

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{Result, StorageError};
use crate::snapshot::StoreSnapshot;
use crate::store::Store;
use crate::types::{EntityKind, ItemName, NewOrder, Order, OrderId, Tournament, User, UserName};

#[derive(Debug)]
struct StoreState {
    users: IndexMap<UserName, User>,
    items: IndexMap<ItemName, Tournament>,
    orders: Vec<Order>,
    order_ids: HashSet<OrderId>,
    /// `None` once an order holds `u64::MAX`
    next_id: Option<OrderId>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            users: IndexMap::new(),
            items: IndexMap::new(),
            orders: Vec::new(),
            order_ids: HashSet::new(),
            next_id: Some(OrderId(1)),
        }
    }
}

/// Next free id after `taken` has been used
fn advance(next_id: Option<OrderId>, taken: OrderId) -> Option<OrderId> {
    next_id.zip(taken.next()).map(|(next, after)| next.max(after))
}

impl StoreState {
    fn insert_user(&mut self, user: User) -> Result<User> {
        if self.users.contains_key(&user.name) {
            return Err(StorageError::duplicate(EntityKind::User, &user.name));
        }
        self.users.insert(user.name.clone(), user.clone());
        Ok(user)
    }

    fn insert_item(&mut self, item: Tournament) -> Result<Tournament> {
        if self.items.contains_key(&item.name) {
            return Err(StorageError::duplicate(EntityKind::Item, &item.name));
        }
        self.items.insert(item.name.clone(), item.clone());
        Ok(item)
    }

    fn check_references(&self, user: &UserName, item: &ItemName) -> Result<()> {
        if !self.users.contains_key(user) {
            return Err(StorageError::not_found(EntityKind::User, user));
        }
        if !self.items.contains_key(item) {
            return Err(StorageError::not_found(EntityKind::Item, item));
        }
        Ok(())
    }

    /// Resolve ids and check references for a batch without touching state
    fn stage(
        &self,
        batch: Vec<NewOrder>,
        placed_at: DateTime<Utc>,
    ) -> Result<(Vec<Order>, Option<OrderId>)> {
        let mut next_id = self.next_id;
        let mut taken = HashSet::new();
        let mut staged = Vec::with_capacity(batch.len());

        for new_order in batch {
            self.check_references(&new_order.user, &new_order.item)?;

            let id = match new_order.id {
                Some(id) => {
                    if self.order_ids.contains(&id) || taken.contains(&id) {
                        return Err(StorageError::duplicate(EntityKind::Order, id));
                    }
                    next_id = advance(next_id, id);
                    id
                }
                None => {
                    let id = next_id.ok_or(StorageError::OrderIdsExhausted)?;
                    next_id = id.next();
                    id
                }
            };
            taken.insert(id);

            staged.push(Order {
                id,
                user: new_order.user,
                item: new_order.item,
                placed_at,
            });
        }

        Ok((staged, next_id))
    }

    fn commit(&mut self, orders: &[Order], next_id: Option<OrderId>) {
        self.order_ids.extend(orders.iter().map(|o| o.id));
        self.orders.extend_from_slice(orders);
        self.next_id = next_id;
    }

    /// Insert an already-stored order, keeping its id and timestamp
    fn restore_order(&mut self, order: Order) -> Result<()> {
        self.check_references(&order.user, &order.item)?;
        if !self.order_ids.insert(order.id) {
            return Err(StorageError::duplicate(EntityKind::Order, order.id));
        }
        self.next_id = advance(self.next_id, order.id);
        self.orders.push(order);
        Ok(())
    }
}

/// In-memory implementation of [`Store`]
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<StoreState>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot
    ///
    /// Duplicate names or ids and orders referencing unknown users or
    /// tournaments are rejected with `InvalidSnapshot`.
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Result<Self> {
        let mut state = StoreState::default();
        let invalid = |e: StorageError| StorageError::InvalidSnapshot(e.to_string());

        for user in snapshot.users {
            state.insert_user(user).map_err(invalid)?;
        }
        for item in snapshot.tournaments {
            state.insert_item(item).map_err(invalid)?;
        }
        for order in snapshot.orders {
            state.restore_order(order).map_err(invalid)?;
        }

        debug!(
            "Restored store: {} users, {} tournaments, {} orders",
            state.users.len(),
            state.items.len(),
            state.orders.len()
        );

        Ok(Self {
            state: RwLock::new(state),
        })
    }

    /// Export the whole store
    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            users: state.users.values().cloned().collect(),
            tournaments: state.items.values().cloned().collect(),
            orders: state.orders.clone(),
        }
    }

    /// Open the snapshot file named by the configuration
    ///
    /// A missing file yields an empty store when `create_if_missing` is set.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let path = Path::new(&config.snapshot_path);

        if !tokio::fs::try_exists(path).await? {
            if config.create_if_missing {
                info!("No snapshot at {}, starting empty", path.display());
                return Ok(Self::new());
            }
            return Err(StorageError::Io(format!(
                "snapshot file not found: {}",
                path.display()
            )));
        }

        let contents = tokio::fs::read_to_string(path).await?;
        let snapshot = StoreSnapshot::from_yaml(&contents)?;
        info!("Loaded snapshot from {}", path.display());
        Self::from_snapshot(snapshot)
    }

    /// Write the store to a YAML snapshot file
    ///
    /// The snapshot goes to a sibling temp file first and is renamed over
    /// `path`, so an interrupted write leaves the previous snapshot intact.
    pub async fn persist(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.snapshot().await.to_yaml()?;
        let tmp = temp_path(path)?;

        if let Err(err) = tokio::fs::write(&tmp, yaml).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        tokio::fs::rename(&tmp, path).await?;

        debug!("Persisted snapshot to {}", path.display());
        Ok(())
    }
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| StorageError::Io(format!("not a file path: {}", path.display())))?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

#[async_trait]
impl Store for MemoryStore {
    async fn find_user(&self, name: &UserName) -> Result<User> {
        let state = self.state.read().await;
        state
            .users
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::not_found(EntityKind::User, name))
    }

    async fn find_item(&self, name: &ItemName) -> Result<Tournament> {
        let state = self.state.read().await;
        state
            .items
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::not_found(EntityKind::Item, name))
    }

    async fn save_order(&self, order: NewOrder) -> Result<Order> {
        let mut saved = self.save_orders(vec![order]).await?;
        saved
            .pop()
            .ok_or_else(|| StorageError::Internal("batch of one saved nothing".to_string()))
    }

    async fn save_orders(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>> {
        let mut state = self.state.write().await;
        let (staged, next_id) = state.stage(orders, Utc::now())?;
        state.commit(&staged, next_id);
        debug!("Saved {} order(s)", staged.len());
        Ok(staged)
    }

    async fn list_orders_by_user(&self, name: &UserName) -> Result<Vec<Order>> {
        let state = self.state.read().await;
        Ok(state
            .orders
            .iter()
            .filter(|o| &o.user == name)
            .cloned()
            .collect())
    }

    async fn create_item(&self, item: Tournament) -> Result<Tournament> {
        let mut state = self.state.write().await;
        state.insert_item(item)
    }

    async fn create_user(&self, user: User) -> Result<User> {
        let mut state = self.state.write().await;
        state.insert_user(user)
    }

    async fn order_count(&self) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.orders.len())
    }
}
