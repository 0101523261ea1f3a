//! Subcommands and their mapping onto the order service

use anyhow::Result;
use clap::{Args, Subcommand};
use kingpin_orders::{ErrorKind, OrderError, OrderService};
use kingpin_storage::{Tournament, User, DEFAULT_CATEGORY};
use serde_json::Value;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Place orders for a user (several --item flags form one all-or-nothing batch)
    Order(OrderArgs),
    /// List a user's orders
    Orders(ListArgs),
    /// Create a tournament
    Tournament(TournamentArgs),
    /// Register a user
    User(UserArgs),
}

#[derive(Debug, Args)]
pub struct OrderArgs {
    /// User placing the order
    #[arg(long)]
    pub user: String,
    /// Tournament to enter
    #[arg(long = "item", required = true)]
    pub items: Vec<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub user: String,
}

#[derive(Debug, Args)]
pub struct TournamentArgs {
    #[arg(long)]
    pub name: String,
    /// Minimum proficiency needed to enter
    #[arg(long)]
    pub required: u32,
    #[arg(long, default_value = DEFAULT_CATEGORY)]
    pub category: String,
}

#[derive(Debug, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub proficiency: u32,
}

impl Command {
    /// Whether the command changes the store
    pub fn is_write(&self) -> bool {
        !matches!(self, Command::Orders(_))
    }
}

/// Run one command, returning its JSON result
pub async fn execute(service: &OrderService, command: Command) -> Result<Value> {
    let value = match command {
        Command::Order(OrderArgs { user, mut items }) => {
            if items.len() == 1 {
                let item = items.remove(0);
                serde_json::to_value(service.create_order(user, item).await?)?
            } else {
                serde_json::to_value(service.create_orders(user, items).await?)?
            }
        }
        Command::Orders(ListArgs { user }) => {
            serde_json::to_value(service.list_orders_for_user(user).await?)?
        }
        Command::Tournament(args) => {
            let tournament = Tournament::new(args.name, args.required).with_category(args.category);
            serde_json::to_value(service.create_tournament(tournament).await?)?
        }
        Command::User(UserArgs { name, proficiency }) => {
            serde_json::to_value(service.register_user(User::new(name, proficiency)).await?)?
        }
    };

    Ok(value)
}

/// Process exit code for a failed command
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<OrderError>().map(OrderError::kind) {
        Some(ErrorKind::NotFound) => 2,
        Some(ErrorKind::Rejected) => 3,
        Some(ErrorKind::Conflict) => 4,
        Some(ErrorKind::Internal) | None => 1,
    }
}
