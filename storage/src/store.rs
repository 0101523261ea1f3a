//! Store trait
//!
//! This module defines the `Store` trait that every backend implements. The
//! order service only talks to this trait, so a persistent backend can replace
//! the in-memory one without touching the ordering rules.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ItemName, NewOrder, Order, Tournament, User, UserName};

/// Store of users, tournaments and orders
#[async_trait]
pub trait Store: Send + Sync {
    /// Look up a user by name
    ///
    /// # Returns
    /// * `Ok(User)` - The user
    /// * `Err(StorageError::NotFound)` - No user has that name
    async fn find_user(&self, name: &UserName) -> Result<User>;

    /// Look up a tournament by name
    ///
    /// # Returns
    /// * `Ok(Tournament)` - The tournament
    /// * `Err(StorageError::NotFound)` - No tournament has that name
    async fn find_item(&self, name: &ItemName) -> Result<Tournament>;

    /// Save one order, assigning an id if it has none
    ///
    /// # Returns
    /// * `Ok(Order)` - The stored order
    /// * `Err(StorageError::DuplicateName)` - The requested id is taken
    /// * `Err(StorageError::NotFound)` - The user or tournament does not exist
    async fn save_order(&self, order: NewOrder) -> Result<Order>;

    /// Save a batch of orders atomically
    ///
    /// Either every order is stored, in the given order, or none is.
    async fn save_orders(&self, orders: Vec<NewOrder>) -> Result<Vec<Order>>;

    /// List the orders placed by a user, oldest first
    ///
    /// An unknown user simply has no orders.
    async fn list_orders_by_user(&self, name: &UserName) -> Result<Vec<Order>>;

    /// Create a tournament
    ///
    /// # Returns
    /// * `Ok(Tournament)` - The stored tournament
    /// * `Err(StorageError::DuplicateName)` - The name is taken
    async fn create_item(&self, item: Tournament) -> Result<Tournament>;

    /// Create a user
    ///
    /// # Returns
    /// * `Ok(User)` - The stored user
    /// * `Err(StorageError::DuplicateName)` - The name is taken
    async fn create_user(&self, user: User) -> Result<User>;

    /// Number of stored orders
    async fn order_count(&self) -> Result<usize>;
}
