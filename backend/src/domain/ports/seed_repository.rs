//! Port abstraction for applying seed documents.
//!
//! A seed run is recorded under its key together with the records it writes,
//! so restarting against a populated store skips the run instead of failing
//! on the first existing account. Adapters apply the run atomically: either
//! every record and the run marker are stored, or nothing is.
use async_trait::async_trait;

use crate::domain::{Account, Fund};

use super::define_port_error;

define_port_error! {
    /// Errors raised by seed repository adapters.
    pub enum SeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "seed repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "seed repository query failed: {message}",
        /// A seeded account collides with a stored email address.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

/// Result of attempting to apply a seed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The run was recorded and its records written.
    Applied,
    /// A run with the same key was recorded earlier; nothing was written.
    AlreadySeeded,
}

/// Validated records to store under one seed key.
#[derive(Debug, Clone)]
pub struct SeedRequest {
    /// Key recorded for the run.
    pub seed_key: String,
    /// Accounts, written before the funds.
    pub accounts: Vec<Account>,
    /// Funds referencing the accounts.
    pub funds: Vec<Fund>,
}

/// Port for applying seed runs exactly once per key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Record the run and write its records, or report that the key was
    /// already applied.
    async fn apply_seed(&self, request: SeedRequest)
    -> Result<SeedingResult, SeedRepositoryError>;
}
