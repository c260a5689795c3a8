//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod fund_repository;
mod funds_query;
mod seed_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use fund_repository::MockFundRepository;
pub use fund_repository::{FundRepository, FundRepositoryError};
#[cfg(test)]
pub use funds_query::MockFundsQuery;
pub use funds_query::FundsQuery;
#[cfg(test)]
pub use seed_repository::MockSeedRepository;
pub use seed_repository::{SeedRepository, SeedRepositoryError, SeedRequest, SeedingResult};
