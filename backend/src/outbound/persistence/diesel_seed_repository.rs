//! PostgreSQL-backed `SeedRepository` implementation.
//!
//! The run marker, accounts and funds are written in one transaction. The
//! marker insert is guarded by `ON CONFLICT DO NOTHING`, so a restart or a
//! concurrent startup with the same key writes nothing.

use async_trait::async_trait;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SeedRepository, SeedRepositoryError, SeedRequest, SeedingResult};

use super::diesel_account_repository::{EMAIL_CONSTRAINT, new_account_row};
use super::diesel_fund_repository::new_fund_row;
use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::NewSeedRunRow;
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, funds, seed_runs};

/// Diesel-backed implementation of the `SeedRepository` port.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the seeding transaction.
#[derive(Debug)]
enum SeedTxError {
    Diesel(DieselError),
    DuplicateEmail(String),
}

impl From<DieselError> for SeedTxError {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

fn map_pool_error(error: PoolError) -> SeedRepositoryError {
    SeedRepositoryError::connection(error.into_message())
}

fn map_tx_error(error: SeedTxError) -> SeedRepositoryError {
    match error {
        SeedTxError::DuplicateEmail(email) => SeedRepositoryError::duplicate_email(email),
        SeedTxError::Diesel(error) => match classify_diesel_error(error) {
            DieselFailure::Connection(message) => SeedRepositoryError::connection(message),
            DieselFailure::UniqueViolation { .. } => {
                SeedRepositoryError::query("seeded record identifier already exists")
            }
            DieselFailure::Query(message) => SeedRepositoryError::query(message),
        },
    }
}

fn is_email_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(EMAIL_CONSTRAINT)
    )
}

fn row_count(len: usize) -> Result<i32, SeedRepositoryError> {
    i32::try_from(len).map_err(|_| SeedRepositoryError::query("seed document is too large"))
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn apply_seed(
        &self,
        request: SeedRequest,
    ) -> Result<SeedingResult, SeedRepositoryError> {
        let run = NewSeedRunRow {
            seed_key: &request.seed_key,
            account_count: row_count(request.accounts.len())?,
            fund_count: row_count(request.funds.len())?,
        };
        let account_rows = request
            .accounts
            .iter()
            .map(new_account_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| SeedRepositoryError::query(format!("profile encoding failed: {err}")))?;
        let fund_rows = request
            .funds
            .iter()
            .map(new_fund_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| SeedRepositoryError::query("fund goal exceeds storable range"))?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.transaction(|conn| {
            async move {
                let recorded = diesel::insert_into(seed_runs::table)
                    .values(&run)
                    .on_conflict(seed_runs::seed_key)
                    .do_nothing()
                    .execute(conn)
                    .await?;
                if recorded == 0 {
                    return Ok(SeedingResult::AlreadySeeded);
                }

                for row in &account_rows {
                    match diesel::insert_into(accounts::table)
                        .values(row)
                        .execute(conn)
                        .await
                    {
                        Ok(_) => {}
                        Err(err) if is_email_violation(&err) => {
                            return Err(SeedTxError::DuplicateEmail(row.email.to_owned()));
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                if !fund_rows.is_empty() {
                    diesel::insert_into(funds::table)
                        .values(&fund_rows)
                        .execute(conn)
                        .await?;
                }
                Ok(SeedingResult::Applied)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_tx_error)
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping for the seed adapter.
    use super::*;
    use super::super::diesel_helpers::test_support::unique_violation;
    use rstest::rstest;

    #[rstest]
    fn email_violation_is_recognised_by_constraint() {
        assert!(is_email_violation(&unique_violation(Some(EMAIL_CONSTRAINT))));
        assert!(!is_email_violation(&unique_violation(Some("funds_pkey"))));
        assert!(!is_email_violation(&DieselError::NotFound));
    }

    #[rstest]
    fn duplicate_email_keeps_the_address() {
        let err = map_tx_error(SeedTxError::DuplicateEmail("ada@example.org".to_owned()));
        assert_eq!(
            err,
            SeedRepositoryError::DuplicateEmail {
                email: "ada@example.org".to_owned()
            }
        );
    }

    #[rstest]
    #[case(unique_violation(Some("funds_pkey")))]
    #[case(DieselError::NotFound)]
    fn other_failures_are_query_errors(#[case] error: DieselError) {
        assert!(matches!(
            map_tx_error(SeedTxError::Diesel(error)),
            SeedRepositoryError::Query { .. }
        ));
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(err, SeedRepositoryError::Connection { .. }));
    }
}
