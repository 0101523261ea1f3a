//! # kingpin-orders: Tournament Order Service
//!
//! This library places bowlers' orders for tournament entries. A bowler may
//! enter a tournament only when their proficiency meets or exceeds the
//! tournament's required proficiency.
//!
//! ## Core Components
//!
//! - **OrderService**: Resolves names, applies the eligibility rule, persists orders
//! - **OrderValidator**: Pure eligibility check on resolved records
//! - **OrderError**: Not-found, rejection and conflict errors callers must handle
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kingpin_orders::OrderService;
//! use kingpin_storage::{MemoryStore, Store, Tournament, User};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(MemoryStore::new());
//!     store.create_user(User::new("McCracken", 100)).await.unwrap();
//!     store
//!         .create_item(Tournament::new("Murfreesboro Strike and Spare", 20))
//!         .await
//!         .unwrap();
//!
//!     let service = OrderService::new(store);
//!
//!     match service.create_order("McCracken", "Murfreesboro Strike and Spare").await {
//!         Ok(order) => println!("Order placed: {}", order.id),
//!         Err(e) => eprintln!("Order failed: {}", e),
//!     }
//! }
//! ```

// Public modules
pub mod error;

// Re-export main types
pub use error::{ErrorKind, OrderError, OrderResult};

mod service;

// OMS modules
pub mod oms {
    pub mod validator;

    pub use validator::OrderValidator;
}

// Re-export service
pub use service::OrderService;

/// Initialize tracing
///
/// `RUST_LOG` wins when set; otherwise `default_filter` is used.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Filter used when neither `RUST_LOG` nor a configured level is given
pub const DEFAULT_LOG_FILTER: &str = "kingpin_orders=info,kingpin_storage=info";
