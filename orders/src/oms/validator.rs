//! Order validation logic
//!
//! This module decides whether a user may enter a tournament. It works on
//! records that were already resolved by the service and never touches the
//! store.

use kingpin_storage::{Tournament, User};

use crate::error::{OrderError, OrderResult};

/// Order validator
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderValidator;

impl OrderValidator {
    /// Create a new order validator
    pub fn new() -> Self {
        Self
    }

    /// Check that `user` may enter `item`
    ///
    /// A user is eligible when their proficiency meets or exceeds the
    /// tournament's required proficiency.
    pub fn check(&self, user: &User, item: &Tournament) -> OrderResult<()> {
        if user.proficiency < item.required_proficiency {
            return Err(OrderError::InsufficientProficiency {
                user: user.name.clone(),
                item: item.name.clone(),
                proficiency: user.proficiency,
                required: item.required_proficiency,
            });
        }

        Ok(())
    }
}
