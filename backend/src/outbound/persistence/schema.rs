//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly.

diesel::table! {
    /// Every account variant. `kind` is the discriminator and `profile`
    /// holds the variant-specific fields as JSON.
    accounts (id) {
        id -> Uuid,
        kind -> Varchar,
        email -> Varchar,
        hashed_password -> Varchar,
        provider -> Varchar,
        provider_id -> Nullable<Varchar>,
        is_verified -> Bool,
        created_events -> Array<Uuid>,
        followers -> Array<Uuid>,
        created_funds -> Array<Uuid>,
        profile -> Jsonb,
    }
}

diesel::table! {
    /// Fundraising campaigns.
    funds (id) {
        id -> Uuid,
        title -> Varchar,
        description -> Text,
        category -> Varchar,
        publisher_id -> Uuid,
        goal -> Nullable<Int8>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applied seed documents.
    seed_runs (seed_key) {
        seed_key -> Varchar,
        account_count -> Int4,
        fund_count -> Int4,
        applied_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(accounts, funds, seed_runs);
