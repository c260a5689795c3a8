//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{accounts, funds, seed_runs};

/// Row struct for reading from the accounts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub kind: String,
    pub email: String,
    pub hashed_password: String,
    pub provider: String,
    pub provider_id: Option<String>,
    pub is_verified: bool,
    pub created_events: Vec<Uuid>,
    pub followers: Vec<Uuid>,
    pub created_funds: Vec<Uuid>,
    pub profile: serde_json::Value,
}

/// Insertable struct for creating account records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub kind: &'a str,
    pub email: &'a str,
    pub hashed_password: &'a str,
    pub provider: &'a str,
    pub provider_id: Option<&'a str>,
    pub is_verified: bool,
    pub created_events: Vec<Uuid>,
    pub followers: Vec<Uuid>,
    pub created_funds: Vec<Uuid>,
    pub profile: serde_json::Value,
}

/// Narrow projection used to resolve fund publishers.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PublisherRow {
    pub id: Uuid,
    pub email: String,
    pub profile: serde_json::Value,
}

/// Row struct for reading from the funds table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = funds)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FundRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub publisher_id: Uuid,
    pub goal: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating fund records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = funds)]
pub(crate) struct NewFundRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub category: &'a str,
    pub publisher_id: Uuid,
    pub goal: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Insertable marker for an applied seed document.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = seed_runs)]
pub(crate) struct NewSeedRunRow<'a> {
    pub seed_key: &'a str,
    pub account_count: i32,
    pub fund_count: i32,
}
