//! Seed data for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use kingpin_orders::OrderService;
use kingpin_storage::{MemoryStore, NewOrder, OrderId, Store, Tournament, User};

pub const MUNSON: &str = "Munson";
pub const MCCRACKEN: &str = "McCracken";
pub const STRIKE_AND_SPARE: &str = "Murfreesboro Strike and Spare";
pub const BOWLERAMA: &str = "Bowlerama Lanes Iowa";

/// Builder for a seeded in-memory store
#[derive(Default)]
pub struct Fixture {
    users: Vec<User>,
    tournaments: Vec<Tournament>,
    orders: Vec<NewOrder>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// The KingPin data set: two bowlers, two tournaments, one order
    pub fn kingpin() -> Self {
        Self::new()
            .user(MUNSON, 15)
            .user(MCCRACKEN, 100)
            .tournament(STRIKE_AND_SPARE, 20)
            .tournament(BOWLERAMA, 7)
            .order(1, MUNSON, BOWLERAMA)
    }

    pub fn user(mut self, name: &str, proficiency: u32) -> Self {
        self.users.push(User::new(name, proficiency));
        self
    }

    pub fn tournament(mut self, name: &str, required: u32) -> Self {
        self.tournaments
            .push(Tournament::new(name, required).with_category("Torneo"));
        self
    }

    pub fn order(mut self, id: u64, user: &str, item: &str) -> Self {
        self.orders
            .push(NewOrder::new(user, item).with_id(OrderId(id)));
        self
    }

    pub async fn build(self) -> Arc<MemoryStore> {
        let store = MemoryStore::new();
        for user in self.users {
            store.create_user(user).await.unwrap();
        }
        for tournament in self.tournaments {
            store.create_item(tournament).await.unwrap();
        }
        if !self.orders.is_empty() {
            store.save_orders(self.orders).await.unwrap();
        }
        Arc::new(store)
    }

    /// Build the store and an order service over it
    pub async fn service(self) -> (Arc<MemoryStore>, OrderService) {
        let store = self.build().await;
        let service = OrderService::new(store.clone());
        (store, service)
    }
}
