//! Loading a seed document of accounts and funds into the stores.
//!
//! Seeds go through the same validation as creation: account constructors,
//! vocabulary checks, and store-level email uniqueness. Each document is
//! applied once per `seedKey`; later runs with the same key are skipped.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::ports::{SeedRepository, SeedRepositoryError, SeedRequest, SeedingResult};
use crate::domain::{
    Account, AccountDocument, AccountValidationError, Fund, FundValidationError, Vocabulary,
    VocabularyError,
};

/// Seed key used when a document does not name one.
pub const DEFAULT_SEED_KEY: &str = "default";

fn default_seed_key() -> String {
    DEFAULT_SEED_KEY.to_owned()
}

/// JSON seed document: `{"seedKey": "...", "accounts": [...], "funds": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedDocument {
    #[serde(rename = "seedKey", default = "default_seed_key")]
    pub seed_key: String,
    #[serde(default)]
    pub accounts: Vec<AccountDocument>,
    #[serde(default)]
    pub funds: Vec<Fund>,
}

impl SeedDocument {
    /// Parse a seed document from JSON.
    pub fn from_json(raw: &str) -> Result<Self, SeedingError> {
        serde_json::from_str(raw).map_err(|err| SeedingError::Parse {
            message: err.to_string(),
        })
    }
}

/// Summary of a seeding run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Key the run was recorded under.
    pub seed_key: String,
    /// Accounts in the document.
    pub accounts: usize,
    /// Funds in the document.
    pub funds: usize,
    /// Whether the records were written or the run was skipped.
    pub result: SeedingResult,
}

/// Errors raised while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedingError {
    /// The seed document is not valid JSON of the expected shape.
    #[error("seed document is invalid: {message}")]
    Parse {
        /// Parser message.
        message: String,
    },
    /// The seed key is blank.
    #[error("seed key must not be blank")]
    BlankSeedKey,
    /// An account failed validation.
    #[error("seed account {index} is invalid: {source}")]
    Account {
        /// Position in the `accounts` list.
        index: usize,
        /// Validation failure.
        #[source]
        source: AccountValidationError,
    },
    /// An account uses a value outside the vocabulary.
    #[error("seed account {index} is invalid: {source}")]
    AccountVocabulary {
        /// Position in the `accounts` list.
        index: usize,
        /// Vocabulary failure.
        #[source]
        source: VocabularyError,
    },
    /// A fund failed validation.
    #[error("seed fund {index} is invalid: {source}")]
    Fund {
        /// Position in the `funds` list.
        index: usize,
        /// Validation failure.
        #[source]
        source: FundValidationError,
    },
    /// The store rejected the run.
    #[error(transparent)]
    Store(#[from] SeedRepositoryError),
}

/// Validates seed documents and hands them to a [`SeedRepository`].
#[derive(Clone)]
pub struct DocumentSeeder<R> {
    repository: Arc<R>,
    vocabulary: Arc<Vocabulary>,
}

impl<R> DocumentSeeder<R>
where
    R: SeedRepository,
{
    /// Create a seeder over the given repository.
    pub fn new(repository: Arc<R>, vocabulary: Arc<Vocabulary>) -> Self {
        Self {
            repository,
            vocabulary,
        }
    }

    /// Validate every record, then apply the document as one seed run.
    ///
    /// Validation runs before the store is touched, so a malformed document
    /// leaves it unchanged. A key that was applied before is reported as
    /// [`SeedingResult::AlreadySeeded`].
    pub async fn seed(&self, document: SeedDocument) -> Result<SeedOutcome, SeedingError> {
        let seed_key = document.seed_key.trim().to_owned();
        if seed_key.is_empty() {
            return Err(SeedingError::BlankSeedKey);
        }
        let accounts = document
            .accounts
            .into_iter()
            .enumerate()
            .map(|(index, raw)| self.validate_account(index, raw))
            .collect::<Result<Vec<_>, _>>()?;
        for (index, fund) in document.funds.iter().enumerate() {
            fund.validate(&self.vocabulary)
                .map_err(|source| SeedingError::Fund { index, source })?;
        }

        let account_count = accounts.len();
        let fund_count = document.funds.len();
        let result = self
            .repository
            .apply_seed(SeedRequest {
                seed_key: seed_key.clone(),
                accounts,
                funds: document.funds,
            })
            .await?;

        match result {
            SeedingResult::Applied => info!(
                seed_key = %seed_key,
                accounts = account_count,
                funds = fund_count,
                "seed document applied"
            ),
            SeedingResult::AlreadySeeded => {
                info!(seed_key = %seed_key, "seed document already applied, skipping")
            }
        }
        Ok(SeedOutcome {
            seed_key,
            accounts: account_count,
            funds: fund_count,
            result,
        })
    }

    fn validate_account(
        &self,
        index: usize,
        raw: AccountDocument,
    ) -> Result<Account, SeedingError> {
        let account =
            Account::try_from(raw).map_err(|source| SeedingError::Account { index, source })?;
        account
            .check_vocabulary(&self.vocabulary)
            .map_err(|source| SeedingError::AccountVocabulary { index, source })?;
        Ok(account)
    }
}
