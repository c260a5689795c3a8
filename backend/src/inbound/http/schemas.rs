//! OpenAPI schema definitions for fund payloads.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the JSON each domain type serialises to and exist
//! only for documentation.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::PublisherSummary`].
///
/// The person projection substituted for a fund's `publisherId`.
#[derive(ToSchema)]
#[schema(as = crate::domain::PublisherSummary, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PublisherSchema {
    /// Publisher identifier.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada")]
    first_name: String,
    #[schema(example = "Lovelace")]
    last_name: String,
    #[schema(example = "ada@example.org")]
    email: String,
    /// Avatar URL; `null` when the user never set one.
    profile_image: Option<String>,
}

/// OpenAPI schema for [`crate::domain::PublishedFund`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PublishedFund, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FundSchema {
    #[schema(example = "9b2f4c1e-8d7a-4f3b-a2c5-6e1d0f9a8b7c")]
    id: String,
    #[schema(example = "Books for all")]
    title: String,
    description: String,
    /// One of the configured fund categories.
    #[schema(example = "education")]
    category: String,
    /// Resolved publisher, or `null` when the reference no longer points at
    /// a user.
    publisher_id: Option<PublisherSchema>,
    /// Target amount; omitted when unset.
    #[schema(required = false)]
    goal: Option<u64>,
    /// RFC 3339 creation timestamp.
    #[schema(example = "2024-01-15T09:30:00Z")]
    created_at: String,
}

/// Body of the `GET /funds/{id}` 404 response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct NotFoundBodySchema {
    #[schema(example = "Not found")]
    message: String,
}

/// Body of the `GET /funds/{id}` 500 response.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct InternalErrorBodySchema {
    #[schema(example = "Internal server error")]
    error: String,
}
