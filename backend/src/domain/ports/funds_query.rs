//! Driving port for fund reads.
//!
//! Inbound adapters use this port to fetch funds with their publisher
//! resolved, without importing storage concerns.

use async_trait::async_trait;

use crate::domain::{Error, FundFilterParams, PublishedFund};

/// Domain use-case port for reading funds.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FundsQuery: Send + Sync {
    /// Fetch one fund by its raw identifier.
    ///
    /// Fails with [`crate::domain::ErrorCode::NotFound`] when no fund has the
    /// identifier.
    async fn get_one_fund(&self, id: &str) -> Result<PublishedFund, Error>;

    /// List funds matching the request filter.
    async fn get_funds(&self, params: FundFilterParams) -> Result<Vec<PublishedFund>, Error>;
}
