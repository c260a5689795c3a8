//! Builders for the HTTP state and its backing stores.
//!
//! A configured database URL selects the Diesel repositories (after running
//! migrations); otherwise a fresh in-memory store backs both ports. An
//! optional seed document is validated against the vocabulary and written to
//! whichever store was selected, once per seed key.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::ports::SeedRepository;
use crate::domain::{
    DocumentSeeder, FundsQueryService, SeedDocument, SeedingError, Vocabulary, VocabularyError,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryDocumentStore;
use crate::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselFundRepository, DieselSeedRepository, MigrationError,
    PoolError, run_pending_migrations,
};

use super::ServerSettings;

/// Errors raised while preparing the application state.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A configured file could not be read.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The vocabulary file was malformed.
    #[error("vocabulary error: {0}")]
    Vocabulary(#[from] VocabularyError),
    /// The seed document was malformed or could not be stored.
    #[error("seeding error: {0}")]
    Seeding(#[from] SeedingError),
    /// Schema migrations failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

impl From<StartupError> for std::io::Error {
    fn from(value: StartupError) -> Self {
        std::io::Error::other(value)
    }
}

/// Read a UTF-8 file through a capability handle on its parent directory.
fn read_text(path: &Path) -> Result<String, StartupError> {
    let read_error = |source| StartupError::FileRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(Path::new(file_name)).map_err(read_error)
}

/// Load the vocabulary from `path`, or the built-in one when unset.
pub fn load_vocabulary(path: Option<&Path>) -> Result<Vocabulary, StartupError> {
    match path {
        Some(path) => {
            let vocabulary = Vocabulary::from_json(&read_text(path)?)?;
            info!(path = %path.display(), "loaded vocabulary");
            Ok(vocabulary)
        }
        None => Ok(Vocabulary::default()),
    }
}

/// Load a seed document from `path`.
pub fn load_seed(path: &Path) -> Result<SeedDocument, StartupError> {
    Ok(SeedDocument::from_json(&read_text(path)?)?)
}

async fn apply_seed<R>(
    repository: Arc<R>,
    vocabulary: Arc<Vocabulary>,
    seed: Option<SeedDocument>,
) -> Result<(), StartupError>
where
    R: SeedRepository,
{
    let Some(document) = seed else {
        info!(reason = "no seed path", "seeding skipped");
        return Ok(());
    };
    DocumentSeeder::new(repository, vocabulary)
        .seed(document)
        .await?;
    Ok(())
}

/// Build the HTTP state from `settings`.
///
/// # Errors
/// Returns [`StartupError`] when a configured file cannot be loaded, the
/// database cannot be migrated or pooled, or the seed document is rejected.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState, StartupError> {
    let vocabulary = Arc::new(load_vocabulary(settings.vocabulary_path.as_deref())?);
    let seed = settings.seed_path.as_deref().map(load_seed).transpose()?;

    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(settings.pool_config(url)).await?;
            let seeds = Arc::new(DieselSeedRepository::new(pool.clone()));
            apply_seed(seeds, vocabulary, seed).await?;
            let funds = Arc::new(DieselFundRepository::new(pool.clone()));
            let accounts = Arc::new(DieselAccountRepository::new(pool));
            info!(store = "postgres", "fund stores ready");
            Ok(HttpState::new(Arc::new(FundsQueryService::new(
                funds, accounts,
            ))))
        }
        None => {
            let store = Arc::new(InMemoryDocumentStore::new());
            apply_seed(store.clone(), vocabulary, seed).await?;
            info!(store = "memory", "fund stores ready");
            Ok(HttpState::new(Arc::new(FundsQueryService::new(
                store.clone(),
                store,
            ))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    use crate::domain::FundFilterParams;

    const SEED: &str = r#"{
        "accounts": [{
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "kind": "User",
            "email": "ada@example.org",
            "hashedPassword": "$argon2id$stub",
            "isVerified": true,
            "firstName": "Ada",
            "lastName": "Lovelace",
            "dateOfBirth": "1815-12-10"
        }],
        "funds": [{
            "id": "9b2f4c1e-8d7a-4f3b-a2c5-6e1d0f9a8b7c",
            "title": "Clean water",
            "description": "Wells for three villages",
            "category": "environment",
            "publisherId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "createdAt": "2024-01-15T09:30:00Z"
        }]
    }"#;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    fn settings(seed_path: Option<PathBuf>, vocabulary_path: Option<PathBuf>) -> ServerSettings {
        ServerSettings {
            bind_addr: None,
            database_url: None,
            vocabulary_path,
            seed_path,
            pool_max_size: None,
            pool_timeout_secs: None,
        }
    }

    #[rstest]
    fn missing_vocabulary_path_uses_builtin() {
        let vocabulary = load_vocabulary(None).expect("default vocabulary");
        assert_eq!(vocabulary, Vocabulary::default());
    }

    #[rstest]
    fn vocabulary_file_is_parsed() {
        let file = write_temp(r#"{"cities": ["Lagos"], "categories": ["health"]}"#);
        let vocabulary = load_vocabulary(Some(file.path())).expect("vocabulary loads");
        assert!(vocabulary.contains_city("Lagos"));
        assert!(!vocabulary.contains_category("education"));
    }

    #[rstest]
    fn unreadable_file_names_the_path() {
        let path = PathBuf::from("/nonexistent/civic/seed.json");
        let err = load_seed(&path).expect_err("missing file");
        assert!(matches!(err, StartupError::FileRead { ref path, .. } if path.ends_with("seed.json")));
    }

    #[rstest]
    #[tokio::test]
    async fn memory_state_is_seeded() {
        let file = write_temp(SEED);
        let state = build_http_state(&settings(Some(file.path().to_path_buf()), None))
            .await
            .expect("state builds");

        let funds = state
            .funds
            .get_funds(FundFilterParams::default())
            .await
            .expect("listing succeeds");
        assert_eq!(funds.len(), 1);
        let publisher = funds[0].publisher.as_ref().expect("publisher resolved");
        assert_eq!(publisher.first_name, "Ada");
    }

    #[rstest]
    #[tokio::test]
    async fn seed_outside_vocabulary_is_rejected() {
        let seed = write_temp(SEED);
        let vocabulary = write_temp(r#"{"cities": ["Lagos"], "categories": ["health"]}"#);
        let err = build_http_state(&settings(
            Some(seed.path().to_path_buf()),
            Some(vocabulary.path().to_path_buf()),
        ))
        .await
        .err()
        .expect("seed rejected");
        assert!(matches!(err, StartupError::Seeding(_)));
    }
}
