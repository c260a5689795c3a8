//! HTTP mapping of fund read failures.
//!
//! The fund routes keep a fixed wire contract that differs per route:
//!
//! - `GET /funds/{id}`: `404 {"message":"Not found"}` for a missing fund,
//!   otherwise `500 {"error":"Internal server error"}`.
//! - `GET /funds`: a bare `500` with no body for every failure.
//!
//! Domain error details are logged with the trace identifier and never
//! returned to clients.

use actix_web::{HttpResponse, HttpResponseBuilder, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Body of the single-fund 404 response.
pub const NOT_FOUND_MESSAGE: &str = "Not found";
/// Body of the single-fund 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

fn log_failure(route: &'static str, failure: &Error) {
    if failure.code() == ErrorCode::NotFound {
        debug!(route, message = failure.message(), "fund not found");
    } else {
        error!(
            route,
            code = ?failure.code(),
            message = failure.message(),
            details = ?failure.details(),
            trace_id = failure.trace_id().unwrap_or_default(),
            "fund request failed"
        );
    }
}

fn builder_with_trace(status: StatusCode, failure: &Error) -> HttpResponseBuilder {
    let mut builder = HttpResponse::build(status);
    if let Some(id) = failure.trace_id() {
        builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
    }
    builder
}

/// Failure of `GET /funds/{id}`.
#[derive(Debug)]
pub struct FundLookupFailure(Error);

impl FundLookupFailure {
    /// Wrap and log a domain error.
    pub fn new(failure: Error) -> Self {
        log_failure("get_one_fund", &failure);
        Self(failure)
    }

    /// Underlying domain error.
    pub fn error(&self) -> &Error {
        &self.0
    }
}

impl std::fmt::Display for FundLookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fund lookup failed: {}", self.0)
    }
}

impl ResponseError for FundLookupFailure {
    fn status_code(&self) -> StatusCode {
        if self.0.code() == ErrorCode::NotFound {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = if status == StatusCode::NOT_FOUND {
            json!({ "message": NOT_FOUND_MESSAGE })
        } else {
            json!({ "error": INTERNAL_ERROR_MESSAGE })
        };
        builder_with_trace(status, &self.0).json(body)
    }
}

/// Failure of `GET /funds`.
#[derive(Debug)]
pub struct FundListFailure(Error);

impl FundListFailure {
    /// Wrap and log a domain error.
    pub fn new(failure: Error) -> Self {
        log_failure("get_funds", &failure);
        Self(failure)
    }

    /// Underlying domain error.
    pub fn error(&self) -> &Error {
        &self.0
    }
}

impl std::fmt::Display for FundListFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fund listing failed: {}", self.0)
    }
}

impl ResponseError for FundListFailure {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        builder_with_trace(self.status_code(), &self.0).finish()
    }
}

#[cfg(test)]
mod tests;
