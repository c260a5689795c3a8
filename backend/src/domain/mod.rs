//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the account and fund model, the fund filter builder, and
//! the read service behind the HTTP adapter. Types here are transport
//! agnostic; serialisation contracts are documented on each type.
//!
//! Public surface:
//! - `Account` with its `User` and `Organization` variants and derived
//!   `fullName` / `rate` values.
//! - `Fund`, `PublishedFund`, and the publisher projection.
//! - `build_fund_filter` and `FundFilter`.
//! - `FundsQueryService`, the implementation of the `FundsQuery` port.
//! - `Error` / `ErrorCode` for use-case failures.

pub mod account;
pub mod error;
pub mod fund;
pub mod fund_filter;
pub mod funds_service;
pub mod ports;
pub mod record_id;
pub mod seeding;
pub mod trace_id;
pub mod vocabulary;

pub use self::account::{
    Account, AccountCore, AccountDocument, AccountKind, AccountValidationError, Email, Gender,
    OrganizationAccount, OrganizationProfile, ProfileDocument, Provider, RateValue, Rating,
    UserAccount, UserProfile,
};
pub use self::error::{Error, ErrorCode};
pub use self::fund::{
    Fund, FundValidationError, PUBLISHER_PROJECTION, PublishedFund, PublisherSummary,
};
pub use self::fund_filter::{
    DateRange, FundFilter, FundFilterError, FundFilterParams, build_fund_filter,
};
pub use self::funds_service::FundsQueryService;
pub use self::record_id::{RecordId, RecordIdError};
pub use self::seeding::{
    DEFAULT_SEED_KEY, DocumentSeeder, SeedDocument, SeedOutcome, SeedingError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::vocabulary::{DEFAULT_CATEGORIES, DEFAULT_CITIES, Vocabulary, VocabularyError};
