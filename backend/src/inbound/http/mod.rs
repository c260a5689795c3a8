//! HTTP inbound adapter exposing the funds REST endpoints.

pub mod error;
pub mod funds;
pub mod health;
pub mod query;
pub mod schemas;
pub mod state;

pub use error::{FundListFailure, FundLookupFailure};
