//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! All variants share the `accounts` table. The shared fields are columns;
//! variant fields live in the `profile` JSONB column and are decoded
//! according to the `kind` discriminator.

use async_trait::async_trait;
use diesel::dsl::{AsSelect, SqlTypeOf};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountDocument, AccountKind, OrganizationProfile, ProfileDocument, Provider,
    PublisherSummary, RecordId, UserProfile,
};

use super::diesel_helpers::{DieselFailure, classify_diesel_error};
use super::models::{AccountRow, NewAccountRow, PublisherRow};
use super::pool::{DbPool, PoolError};
use super::schema::accounts;

/// Unique constraint guarding account emails.
pub(super) const EMAIL_CONSTRAINT: &str = "accounts_email_key";

type PublisherQuery = accounts::BoxedQuery<'static, Pg, SqlTypeOf<AsSelect<PublisherRow, Pg>>>;

/// Diesel-backed implementation of the `AccountRepository` port.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    AccountRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> AccountRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => AccountRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(EMAIL_CONSTRAINT) =>
        {
            AccountRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        DieselFailure::UniqueViolation { .. } => {
            AccountRepositoryError::query("account identifier already exists")
        }
        DieselFailure::Query(message) => AccountRepositoryError::query(message),
    }
}

fn ids(values: &[RecordId]) -> Vec<Uuid> {
    values.iter().map(|id| *id.as_uuid()).collect()
}

fn record_ids(values: Vec<Uuid>) -> Vec<RecordId> {
    values.into_iter().map(RecordId::from_uuid).collect()
}

fn corrupt(id: Uuid, detail: impl std::fmt::Display) -> AccountRepositoryError {
    AccountRepositoryError::query(format!("stored account {id} is invalid: {detail}"))
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountRepositoryError> {
    let id = row.id;
    let kind: AccountKind = row.kind.parse().map_err(|err| corrupt(id, err))?;
    let provider: Provider = row.provider.parse().map_err(|err| corrupt(id, err))?;
    let profile = match kind {
        AccountKind::User => serde_json::from_value::<UserProfile>(row.profile)
            .map(ProfileDocument::User),
        AccountKind::Organization => serde_json::from_value::<OrganizationProfile>(row.profile)
            .map(ProfileDocument::Organization),
    }
    .map_err(|err| corrupt(id, err))?;

    let document = AccountDocument {
        id: RecordId::from_uuid(id),
        email: row.email,
        hashed_password: row.hashed_password,
        provider,
        provider_id: row.provider_id,
        is_verified: row.is_verified,
        created_events: record_ids(row.created_events),
        followers: record_ids(row.followers),
        created_funds: record_ids(row.created_funds),
        profile,
    };
    Account::try_from(document).map_err(|err| corrupt(id, err))
}

fn row_to_publisher(row: PublisherRow) -> Result<PublisherSummary, AccountRepositoryError> {
    let profile =
        serde_json::from_value::<UserProfile>(row.profile).map_err(|err| corrupt(row.id, err))?;
    Ok(PublisherSummary {
        id: RecordId::from_uuid(row.id),
        first_name: profile.first_name,
        last_name: profile.last_name,
        email: row.email,
        profile_image: profile.profile_image,
    })
}

/// Encode an account as an insertable row.
pub(super) fn new_account_row(account: &Account) -> Result<NewAccountRow<'_>, serde_json::Error> {
    let profile = match account {
        Account::User(user) => serde_json::to_value(user.profile()),
        Account::Organization(organization) => serde_json::to_value(organization.profile()),
    }?;

    let core = account.core();
    Ok(NewAccountRow {
        id: *core.id.as_uuid(),
        kind: account.kind().as_str(),
        email: core.email.as_ref(),
        hashed_password: &core.hashed_password,
        provider: core.provider.as_str(),
        provider_id: core.provider_id.as_deref(),
        is_verified: core.is_verified,
        created_events: ids(&core.created_events),
        followers: ids(&core.followers),
        created_funds: ids(&core.created_funds),
        profile,
    })
}

/// Person accounts among `publisher_ids`.
fn publishers_query(publisher_ids: &[RecordId]) -> PublisherQuery {
    accounts::table
        .filter(accounts::kind.eq(AccountKind::User.as_str()))
        .filter(accounts::id.eq_any(ids(publisher_ids)))
        .select(PublisherRow::as_select())
        .into_boxed()
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        let row = new_account_row(account).map_err(|err| {
            AccountRepositoryError::query(format!("profile encoding failed: {err}"))
        })?;

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::insert_into(accounts::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(row.email)))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::id.eq(*id.as_uuid()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?
            .map(row_to_account)
            .transpose()
    }

    async fn find_publishers(
        &self,
        publisher_ids: &[RecordId],
    ) -> Result<Vec<PublisherSummary>, AccountRepositoryError> {
        if publisher_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        publishers_query(publisher_ids)
            .load::<PublisherRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?
            .into_iter()
            .map(row_to_publisher)
            .collect()
    }
}
