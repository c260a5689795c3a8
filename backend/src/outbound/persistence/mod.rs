//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the fund, account and seed repository ports
//! backed by PostgreSQL via `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: every database failure is mapped to the port's error
//!   enum; SQL messages are logged, not returned.
//!
//! # Example
//!
//! ```no_run
//! use civic_backend::outbound::persistence::{DbPool, DieselFundRepository, PoolConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/civic")).await?;
//! let funds = DieselFundRepository::new(pool);
//! # let _ = funds;
//! # Ok(())
//! # }
//! ```

mod diesel_account_repository;
mod diesel_fund_repository;
mod diesel_seed_repository;
pub(crate) mod diesel_helpers;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_fund_repository::DieselFundRepository;
pub use diesel_seed_repository::DieselSeedRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
