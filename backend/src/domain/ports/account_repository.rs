//! Port abstraction for account storage adapters and their errors.
//!
//! One repository holds every account variant. Adapters enforce email
//! uniqueness across variants and report collisions as
//! [`AccountRepositoryError::DuplicateEmail`].
use async_trait::async_trait;

use crate::domain::{Account, PublisherSummary, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store a new account.
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError>;

    /// Fetch an account of any variant by identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Resolve publisher references in one lookup.
    ///
    /// Only person accounts resolve; identifiers that are unknown or belong
    /// to an organization are absent from the result. Order is unspecified.
    async fn find_publishers(
        &self,
        ids: &[RecordId],
    ) -> Result<Vec<PublisherSummary>, AccountRepositoryError>;
}
