//! Fund read service implementing the [`FundsQuery`] driving port.
//!
//! Composes the filter builder, the fund repository, and publisher
//! resolution through the account repository.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, FundRepository, FundRepositoryError, FundsQuery,
};
use crate::domain::{
    Error, Fund, FundFilterError, FundFilterParams, PublishedFund, PublisherSummary, RecordId,
    build_fund_filter,
};

/// Fund read service.
#[derive(Clone)]
pub struct FundsQueryService<F, A> {
    funds: Arc<F>,
    accounts: Arc<A>,
}

impl<F, A> FundsQueryService<F, A> {
    /// Create a new service over the given repositories.
    pub fn new(funds: Arc<F>, accounts: Arc<A>) -> Self {
        Self { funds, accounts }
    }
}

impl<F, A> FundsQueryService<F, A>
where
    F: FundRepository,
    A: AccountRepository,
{
    fn map_fund_error(error: FundRepositoryError) -> Error {
        match error {
            FundRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("fund repository unavailable: {message}"))
            }
            FundRepositoryError::Query { message } => {
                Error::internal(format!("fund repository error: {message}"))
            }
        }
    }

    fn map_account_error(error: AccountRepositoryError) -> Error {
        match error {
            AccountRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("account repository unavailable: {message}"))
            }
            AccountRepositoryError::Query { message } => {
                Error::internal(format!("account repository error: {message}"))
            }
            AccountRepositoryError::DuplicateEmail { email } => {
                Error::internal(format!("unexpected email conflict during read: {email}"))
            }
        }
    }

    fn map_filter_error(error: &FundFilterError) -> Error {
        let code = match error {
            FundFilterError::InvalidIdentifier { .. } => "invalid_identifier",
            FundFilterError::InvalidDate { .. } => "invalid_date",
        };
        Error::invalid_request(error.to_string()).with_details(json!({ "code": code }))
    }

    async fn resolve_publishers(
        &self,
        funds: Vec<Fund>,
    ) -> Result<Vec<PublishedFund>, Error> {
        if funds.is_empty() {
            return Ok(Vec::new());
        }

        let mut seen = HashSet::new();
        let ids: Vec<RecordId> = funds
            .iter()
            .map(|fund| fund.publisher_id)
            .filter(|id| seen.insert(*id))
            .collect();

        let publishers: HashMap<RecordId, PublisherSummary> = self
            .accounts
            .find_publishers(&ids)
            .await
            .map_err(Self::map_account_error)?
            .into_iter()
            .map(|publisher| (publisher.id, publisher))
            .collect();

        Ok(funds
            .into_iter()
            .map(|fund| {
                let publisher = publishers.get(&fund.publisher_id).cloned();
                PublishedFund { fund, publisher }
            })
            .collect())
    }
}

#[async_trait]
impl<F, A> FundsQuery for FundsQueryService<F, A>
where
    F: FundRepository,
    A: AccountRepository,
{
    async fn get_one_fund(&self, id: &str) -> Result<PublishedFund, Error> {
        let fund_id = RecordId::new(id).map_err(|err| {
            Error::invalid_request(format!("fund id `{id}` is not valid: {err}"))
                .with_details(json!({ "code": "invalid_identifier" }))
        })?;

        let fund = self
            .funds
            .find_by_id(&fund_id)
            .await
            .map_err(Self::map_fund_error)?
            .ok_or_else(|| Error::not_found(format!("fund {fund_id} not found")))?;

        let mut published = self.resolve_publishers(vec![fund]).await?;
        published
            .pop()
            .ok_or_else(|| Error::internal("publisher resolution dropped the fund"))
    }

    async fn get_funds(&self, params: FundFilterParams) -> Result<Vec<PublishedFund>, Error> {
        let filter = build_fund_filter(params).map_err(|err| Self::map_filter_error(&err))?;
        debug!(universal = filter.is_universal(), "listing funds");

        let funds = self
            .funds
            .find_matching(&filter)
            .await
            .map_err(Self::map_fund_error)?;
        self.resolve_publishers(funds).await
    }
}

#[cfg(test)]
mod tests;
