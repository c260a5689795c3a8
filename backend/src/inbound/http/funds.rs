//! Funds API handlers.
//!
//! ```text
//! GET /funds/3fa85f64-5717-4562-b3fc-2c963f66afa6
//! GET /funds?category=health&category=education&publisherId=...&currentDate=2024-01-01&lastDate=2024-02-01
//! ```
//!
//! Fund reads resolve `publisherId` to the publisher projection. Failures
//! follow the per-route contract in [`crate::inbound::http::error`].

use actix_web::{HttpRequest, get, web};
use serde_json::json;

use crate::domain::{Error, PublishedFund};
use crate::inbound::http::error::{FundListFailure, FundLookupFailure};
use crate::inbound::http::query::parse_fund_query;
use crate::inbound::http::schemas::{FundSchema, InternalErrorBodySchema, NotFoundBodySchema};
use crate::inbound::http::state::HttpState;

/// Fetch one fund with its publisher projection.
#[utoipa::path(
    get,
    path = "/funds/{id}",
    params(("id" = String, Path, description = "Fund identifier")),
    responses(
        (status = 200, description = "Fund with resolved publisher", body = FundSchema),
        (status = 404, description = "No fund has this identifier", body = NotFoundBodySchema),
        (status = 500, description = "Internal server error", body = InternalErrorBodySchema)
    ),
    tags = ["funds"],
    operation_id = "getOneFund"
)]
#[get("/funds/{id}")]
pub async fn get_one_fund(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> Result<web::Json<PublishedFund>, FundLookupFailure> {
    let id = path.into_inner();
    state
        .funds
        .get_one_fund(&id)
        .await
        .map(web::Json)
        .map_err(FundLookupFailure::new)
}

/// List funds, optionally filtered by category, publisher, and creation
/// window.
///
/// The creation window applies only when both `currentDate` and `lastDate`
/// are supplied.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use civic_backend::inbound::http::funds::get_funds;
///
/// let app = App::new().service(get_funds);
/// ```
#[utoipa::path(
    get,
    path = "/funds",
    params(
        ("category" = Option<Vec<String>>, Query, description = "Match any of these categories"),
        ("publisherId" = Option<String>, Query, description = "Publisher identifier"),
        ("currentDate" = Option<String>, Query, description = "Inclusive lower bound of createdAt"),
        ("lastDate" = Option<String>, Query, description = "Inclusive upper bound of createdAt")
    ),
    responses(
        (status = 200, description = "Matching funds", body = [FundSchema]),
        (status = 500, description = "Listing failed; no body")
    ),
    tags = ["funds"],
    operation_id = "getFunds"
)]
#[get("/funds")]
pub async fn get_funds(
    state: web::Data<HttpState>,
    request: HttpRequest,
) -> Result<web::Json<Vec<PublishedFund>>, FundListFailure> {
    let params = parse_fund_query(request.query_string()).map_err(|err| {
        FundListFailure::new(
            Error::invalid_request(err.to_string())
                .with_details(json!({ "code": "repeated_parameter" })),
        )
    })?;
    state
        .funds
        .get_funds(params)
        .await
        .map(web::Json)
        .map_err(FundListFailure::new)
}
