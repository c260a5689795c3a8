//! In-process document store.
//!
//! Backs both repository ports when no database URL is configured, and in
//! tests. Funds keep insertion order. Email uniqueness is enforced across
//! account variants, as the SQL adapter does with its unique constraint.
//! Seed runs are staged on a copy of the collections and swapped in whole.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, FundRepository, FundRepositoryError,
    SeedRepository, SeedRepositoryError, SeedRequest, SeedingResult,
};
use crate::domain::{Account, Fund, FundFilter, PublisherSummary, RecordId};

#[derive(Debug, Default, Clone)]
struct Collections {
    accounts: HashMap<RecordId, Account>,
    emails: HashSet<String>,
    funds: Vec<Fund>,
    seed_runs: HashSet<String>,
}

impl Collections {
    fn insert_account(&mut self, account: &Account) -> Result<(), AccountRepositoryError> {
        let email = account.email().to_string();
        if self.emails.contains(&email) {
            return Err(AccountRepositoryError::duplicate_email(email));
        }
        if self.accounts.contains_key(&account.id()) {
            return Err(AccountRepositoryError::query(format!(
                "account {} already exists",
                account.id()
            )));
        }
        self.emails.insert(email);
        self.accounts.insert(account.id(), account.clone());
        Ok(())
    }

    fn insert_fund(&mut self, fund: &Fund) -> Result<(), FundRepositoryError> {
        if self.funds.iter().any(|stored| stored.id == fund.id) {
            return Err(FundRepositoryError::query(format!(
                "fund {} already exists",
                fund.id
            )));
        }
        self.funds.push(fund.clone());
        Ok(())
    }

    fn apply_seed(&mut self, request: &SeedRequest) -> Result<SeedingResult, SeedRepositoryError> {
        if self.seed_runs.contains(&request.seed_key) {
            return Ok(SeedingResult::AlreadySeeded);
        }
        let mut staged = self.clone();
        for account in &request.accounts {
            staged.insert_account(account).map_err(|err| match err {
                AccountRepositoryError::DuplicateEmail { email } => {
                    SeedRepositoryError::duplicate_email(email)
                }
                other => SeedRepositoryError::query(other.to_string()),
            })?;
        }
        for fund in &request.funds {
            staged
                .insert_fund(fund)
                .map_err(|err| SeedRepositoryError::query(err.to_string()))?;
        }
        staged.seed_runs.insert(request.seed_key.clone());
        *self = staged;
        Ok(SeedingResult::Applied)
    }
}

/// Thread-safe in-memory store implementing [`FundRepository`],
/// [`AccountRepository`] and [`SeedRepository`].
///
/// The lock is only held for synchronous sections.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<Collections>,
}

fn poisoned<T>(_: PoisonError<T>) -> String {
    "in-memory store lock poisoned".to_owned()
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<R>(&self, f: impl FnOnce(&Collections) -> R) -> Result<R, String> {
        let guard = self.collections.read().map_err(poisoned)?;
        Ok(f(&guard))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Collections) -> R) -> Result<R, String> {
        let mut guard = self.collections.write().map_err(poisoned)?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl FundRepository for InMemoryDocumentStore {
    async fn insert(&self, fund: &Fund) -> Result<(), FundRepositoryError> {
        self.write(|collections| collections.insert_fund(fund))
            .map_err(FundRepositoryError::query)?
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Fund>, FundRepositoryError> {
        self.read(|collections| collections.funds.iter().find(|fund| fund.id == *id).cloned())
            .map_err(FundRepositoryError::query)
    }

    async fn find_matching(&self, filter: &FundFilter) -> Result<Vec<Fund>, FundRepositoryError> {
        self.read(|collections| {
            collections
                .funds
                .iter()
                .filter(|fund| filter.matches(fund))
                .cloned()
                .collect()
        })
        .map_err(FundRepositoryError::query)
    }
}

#[async_trait]
impl AccountRepository for InMemoryDocumentStore {
    async fn insert(&self, account: &Account) -> Result<(), AccountRepositoryError> {
        self.write(|collections| collections.insert_account(account))
            .map_err(AccountRepositoryError::query)?
    }

    async fn find_by_id(&self, id: &RecordId) -> Result<Option<Account>, AccountRepositoryError> {
        self.read(|collections| collections.accounts.get(id).cloned())
            .map_err(AccountRepositoryError::query)
    }

    async fn find_publishers(
        &self,
        ids: &[RecordId],
    ) -> Result<Vec<PublisherSummary>, AccountRepositoryError> {
        self.read(|collections| {
            ids.iter()
                .filter_map(|id| collections.accounts.get(id))
                .filter_map(Account::as_user)
                .map(PublisherSummary::from)
                .collect()
        })
        .map_err(AccountRepositoryError::query)
    }
}

#[async_trait]
impl SeedRepository for InMemoryDocumentStore {
    async fn apply_seed(
        &self,
        request: SeedRequest,
    ) -> Result<SeedingResult, SeedRepositoryError> {
        self.write(|collections| collections.apply_seed(&request))
            .map_err(SeedRepositoryError::query)?
    }
}
