//! PostgreSQL-backed `FundRepository` implementation using Diesel ORM.

use std::num::TryFromIntError;

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FundRepository, FundRepositoryError};
use crate::domain::{Fund, FundFilter, RecordId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{FundRow, NewFundRow};
use super::pool::{DbPool, PoolError};
use super::schema::funds;

/// Diesel-backed implementation of the `FundRepository` port.
///
/// Listings are returned oldest first, ties broken by identifier.
#[derive(Clone)]
pub struct DieselFundRepository {
    pool: DbPool,
}

impl DieselFundRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type FundQuery = funds::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<FundRow, Pg>>>;

fn map_pool_error(error: PoolError) -> FundRepositoryError {
    FundRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FundRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => FundRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            FundRepositoryError::query("fund identifier already exists")
        }
        DieselFailure::Query(message) => FundRepositoryError::query(message),
    }
}

fn row_to_fund(row: FundRow) -> Result<Fund, FundRepositoryError> {
    let goal = row
        .goal
        .map(u64::try_from)
        .transpose()
        .map_err(|_| FundRepositoryError::query(format!("fund {} has a negative goal", row.id)))?;
    Ok(Fund {
        id: RecordId::from_uuid(row.id),
        title: row.title,
        description: row.description,
        category: row.category,
        publisher_id: RecordId::from_uuid(row.publisher_id),
        goal,
        created_at: row.created_at,
    })
}

/// Encode a fund as an insertable row. Fails when the goal exceeds `i64`.
pub(super) fn new_fund_row(fund: &Fund) -> Result<NewFundRow<'_>, TryFromIntError> {
    Ok(NewFundRow {
        id: *fund.id.as_uuid(),
        title: &fund.title,
        description: &fund.description,
        category: &fund.category,
        publisher_id: *fund.publisher_id.as_uuid(),
        goal: fund.goal.map(i64::try_from).transpose()?,
        created_at: fund.created_at,
    })
}

/// Translate `filter` into a query, oldest first with ties broken by id.
fn fund_query(filter: &FundFilter) -> FundQuery {
    let mut query = funds::table
        .select(FundRow::as_select())
        .order((funds::created_at.asc(), funds::id.asc()))
        .into_boxed();

    if let Some(categories) = filter.categories() {
        query = query.filter(funds::category.eq_any(categories.to_vec()));
    }
    if let Some(publisher_id) = filter.publisher_id() {
        query = query.filter(funds::publisher_id.eq(*publisher_id.as_uuid()));
    }
    if let Some(range) = filter.created_between() {
        query = query.filter(funds::created_at.between(range.from, range.to));
    }
    query
}

#[async_trait]
impl FundRepository for DieselFundRepository {
    async fn insert(&self, fund: &Fund) -> Result<(), FundRepositoryError> {
        let row = new_fund_row(fund)
            .map_err(|_| FundRepositoryError::query("fund goal exceeds storable range"))?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(funds::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Fund>, FundRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        funds::table
            .filter(funds::id.eq(*id.as_uuid()))
            .select(FundRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_fund)
            .transpose()
    }

    async fn find_matching(&self, filter: &FundFilter) -> Result<Vec<Fund>, FundRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        fund_query(filter)
            .load::<FundRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_fund)
            .collect()
    }
}
