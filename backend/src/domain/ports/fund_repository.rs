//! Port abstraction for fund storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Fund, FundFilter, RecordId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by fund repository adapters.
    pub enum FundRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "fund repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "fund repository query failed: {message}",
    }
}

/// Storage of fundraising campaigns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundRepository: Send + Sync {
    /// Store a new fund.
    async fn insert(&self, fund: &Fund) -> Result<(), FundRepositoryError>;

    /// Fetch a fund by identifier.
    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Fund>, FundRepositoryError>;

    /// Fetch every fund matching `filter`, in store order.
    async fn find_matching(&self, filter: &FundFilter) -> Result<Vec<Fund>, FundRepositoryError>;
}
