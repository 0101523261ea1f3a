//! Order service orchestrating lookups, validation and persistence
//!
//! The OrderService is the main entry point for placing tournament orders.
//! Names are resolved against the store exactly once; the validator then works
//! on the resolved records.

use std::sync::Arc;

use tracing::{debug, info, warn};

use kingpin_storage::{ItemName, NewOrder, Order, Store, Tournament, User, UserName};

use crate::error::OrderResult;
use crate::oms::validator::OrderValidator;

/// Order service over a shared store
pub struct OrderService {
    /// Backing store
    store: Arc<dyn Store>,

    /// Eligibility rule
    validator: OrderValidator,
}

impl OrderService {
    /// Create a new order service
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            validator: OrderValidator::new(),
        }
    }

    /// Place one order for `user_name` in `item_name`
    ///
    /// # Errors
    /// * `NotFound` - the user or the tournament does not exist
    /// * `InsufficientProficiency` - the user may not enter the tournament
    pub async fn create_order(
        &self,
        user_name: impl Into<UserName>,
        item_name: impl Into<ItemName>,
    ) -> OrderResult<Order> {
        let user = self.resolve_user(&user_name.into()).await?;
        let new_order = self.prepare(&user, &item_name.into()).await?;

        let order = self.store.save_order(new_order).await?;
        info!("Order {} placed: {} -> {}", order.id, order.user, order.item);
        Ok(order)
    }

    /// Place one order per tournament, all or nothing
    ///
    /// Every tournament is resolved and validated, in the given order, before
    /// anything is written. The first failure aborts the batch and no order is
    /// stored; otherwise all orders are saved in one atomic write.
    pub async fn create_orders<I, N>(
        &self,
        user_name: impl Into<UserName>,
        item_names: I,
    ) -> OrderResult<Vec<Order>>
    where
        I: IntoIterator<Item = N>,
        N: Into<ItemName>,
    {
        let user = self.resolve_user(&user_name.into()).await?;

        let mut batch = Vec::new();
        for item_name in item_names {
            batch.push(self.prepare(&user, &item_name.into()).await?);
        }

        if batch.is_empty() {
            return Ok(Vec::new());
        }

        let orders = self.store.save_orders(batch).await?;
        info!("{} orders placed for {}", orders.len(), user.name);
        Ok(orders)
    }

    /// List a user's orders, oldest first
    ///
    /// An unknown user is reported as `NotFound`; a known user without orders
    /// gets an empty list.
    pub async fn list_orders_for_user(
        &self,
        user_name: impl Into<UserName>,
    ) -> OrderResult<Vec<Order>> {
        let user = self.resolve_user(&user_name.into()).await?;
        Ok(self.store.list_orders_by_user(&user.name).await?)
    }

    /// Create a tournament
    pub async fn create_tournament(&self, tournament: Tournament) -> OrderResult<Tournament> {
        let tournament = self.store.create_item(tournament).await?;
        info!(
            "Tournament created: {} (requires {})",
            tournament.name, tournament.required_proficiency
        );
        Ok(tournament)
    }

    /// Register a user
    pub async fn register_user(&self, user: User) -> OrderResult<User> {
        let user = self.store.create_user(user).await?;
        info!("User registered: {} (proficiency {})", user.name, user.proficiency);
        Ok(user)
    }

    async fn resolve_user(&self, name: &UserName) -> OrderResult<User> {
        debug!("Resolving user: {}", name);
        Ok(self.store.find_user(name).await?)
    }

    /// Resolve a tournament and check the user may enter it
    async fn prepare(&self, user: &User, item_name: &ItemName) -> OrderResult<NewOrder> {
        debug!("Resolving tournament: {}", item_name);
        let item = self.store.find_item(item_name).await?;

        if let Err(err) = self.validator.check(user, &item) {
            warn!("Order rejected: {}", err);
            return Err(err);
        }

        Ok(NewOrder::new(user.name.clone(), item.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrderError;
    use async_trait::async_trait;
    use kingpin_storage::{EntityKind, OrderId, StorageError};
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        pub Backend {}

        #[async_trait]
        impl Store for Backend {
            async fn find_user(&self, name: &UserName) -> kingpin_storage::Result<User>;
            async fn find_item(&self, name: &ItemName) -> kingpin_storage::Result<Tournament>;
            async fn save_order(&self, order: NewOrder) -> kingpin_storage::Result<Order>;
            async fn save_orders(&self, orders: Vec<NewOrder>) -> kingpin_storage::Result<Vec<Order>>;
            async fn list_orders_by_user(&self, name: &UserName) -> kingpin_storage::Result<Vec<Order>>;
            async fn create_item(&self, item: Tournament) -> kingpin_storage::Result<Tournament>;
            async fn create_user(&self, user: User) -> kingpin_storage::Result<User>;
            async fn order_count(&self) -> kingpin_storage::Result<usize>;
        }
    }

    fn stored(id: u64, order: NewOrder) -> Order {
        Order {
            id: OrderId(id),
            user: order.user,
            item: order.item,
            placed_at: chrono::Utc::now(),
        }
    }

    fn backend_with(users: Vec<User>, items: Vec<Tournament>) -> MockBackend {
        let mut backend = MockBackend::new();
        backend.expect_find_user().returning(move |name| {
            users
                .iter()
                .find(|u| &u.name == name)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    entity: EntityKind::User,
                    name: name.to_string(),
                })
        });
        backend.expect_find_item().returning(move |name| {
            items
                .iter()
                .find(|t| &t.name == name)
                .cloned()
                .ok_or_else(|| StorageError::NotFound {
                    entity: EntityKind::Item,
                    name: name.to_string(),
                })
        });
        backend
    }

    fn kingpin_backend() -> MockBackend {
        backend_with(
            vec![User::new("Munson", 15), User::new("McCracken", 100)],
            vec![
                Tournament::new("Murfreesboro Strike and Spare", 20),
                Tournament::new("Bowlerama Lanes Iowa", 7),
            ],
        )
    }

    #[tokio::test]
    async fn test_create_order_saves_resolved_names() {
        let mut backend = kingpin_backend();
        backend
            .expect_save_order()
            .with(eq(NewOrder::new("McCracken", "Murfreesboro Strike and Spare")))
            .times(1)
            .returning(|order| Ok(stored(1, order)));

        let service = OrderService::new(Arc::new(backend));
        let order = service
            .create_order("McCracken", "Murfreesboro Strike and Spare")
            .await
            .unwrap();

        assert_eq!(order.id, OrderId(1));
        assert_eq!(order.user.as_str(), "McCracken");
    }

    #[tokio::test]
    async fn test_rejected_order_never_reaches_store() {
        let mut backend = kingpin_backend();
        backend.expect_save_order().never();

        let service = OrderService::new(Arc::new(backend));
        let err = service
            .create_order("Munson", "Murfreesboro Strike and Spare")
            .await
            .unwrap_err();

        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_unknown_user_skips_item_lookup() {
        let mut backend = MockBackend::new();
        backend.expect_find_user().returning(|name| {
            Err(StorageError::NotFound {
                entity: EntityKind::User,
                name: name.to_string(),
            })
        });
        backend.expect_find_item().never();
        backend.expect_save_order().never();

        let service = OrderService::new(Arc::new(backend));
        let err = service
            .create_order("Ghost", "Bowlerama Lanes Iowa")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            OrderError::NotFound { entity: EntityKind::User, ref name } if name == "Ghost"
        ));
    }

    #[tokio::test]
    async fn test_batch_validates_everything_before_saving() {
        let mut backend = kingpin_backend();
        backend.expect_save_orders().never();

        let service = OrderService::new(Arc::new(backend));
        let err = service
            .create_orders("Munson", ["Bowlerama Lanes Iowa", "Murfreesboro Strike and Spare"])
            .await
            .unwrap_err();

        assert!(err.is_rejection());
    }

    #[tokio::test]
    async fn test_batch_saved_in_one_write() {
        let mut backend = kingpin_backend();
        backend
            .expect_save_orders()
            .withf(|orders| {
                orders
                    == &vec![
                        NewOrder::new("McCracken", "Murfreesboro Strike and Spare"),
                        NewOrder::new("McCracken", "Bowlerama Lanes Iowa"),
                    ]
            })
            .times(1)
            .returning(|orders| {
                Ok(orders
                    .into_iter()
                    .zip(1..)
                    .map(|(order, id)| stored(id, order))
                    .collect())
            });

        let service = OrderService::new(Arc::new(backend));
        let orders = service
            .create_orders(
                "McCracken",
                ["Murfreesboro Strike and Spare", "Bowlerama Lanes Iowa"],
            )
            .await
            .unwrap();

        assert_eq!(orders.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_batch_writes_nothing() {
        let mut backend = kingpin_backend();
        backend.expect_save_orders().never();

        let service = OrderService::new(Arc::new(backend));
        let orders = service
            .create_orders("McCracken", Vec::<String>::new())
            .await
            .unwrap();

        assert!(orders.is_empty());
    }

    #[tokio::test]
    async fn test_list_orders_for_unknown_user_is_not_found() {
        let mut backend = kingpin_backend();
        backend.expect_list_orders_by_user().never();

        let service = OrderService::new(Arc::new(backend));
        let err = service.list_orders_for_user("Ghost").await.unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_backend_failure_is_storage_error() {
        let mut backend = kingpin_backend();
        backend
            .expect_save_order()
            .returning(|_| Err(StorageError::Io("disk full".to_string())));

        let service = OrderService::new(Arc::new(backend));
        let err = service
            .create_order("McCracken", "Bowlerama Lanes Iowa")
            .await
            .unwrap_err();

        assert!(matches!(err, OrderError::Storage(StorageError::Io(_))));
    }
}
