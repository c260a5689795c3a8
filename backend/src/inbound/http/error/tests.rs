//! Tests for the fund route failure contract.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

async fn body_bytes(response: HttpResponse) -> Vec<u8> {
    to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds")
        .to_vec()
}

fn trace_header(response: &HttpResponse) -> Option<String> {
    response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("ascii header").to_owned())
}

#[rstest]
#[actix_web::test]
async fn lookup_not_found_uses_message_body(expected_trace_id: String) {
    let failure = FundLookupFailure::new(
        Error::not_found("fund missing").with_trace_id(expected_trace_id.clone()),
    );
    let response = failure.error_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(trace_header(&response), Some(expected_trace_id));
    let body: Value = serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert_eq!(body, json!({ "message": "Not found" }));
}

#[rstest]
#[case(Error::internal("connection reset by peer"))]
#[case(Error::service_unavailable("pool timed out"))]
#[case(Error::invalid_request("fund id `x` is not valid").with_details(json!({"code": "invalid_identifier"})))]
#[actix_web::test]
async fn lookup_other_failures_use_redacted_error_body(#[case] error: Error) {
    let failure = FundLookupFailure::new(error);
    let response = failure.error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = serde_json::from_slice(&body_bytes(response).await).expect("json body");
    assert_eq!(body, json!({ "error": "Internal server error" }));
}

#[rstest]
#[case(Error::internal("boom"))]
#[case(Error::invalid_request("publisherId `x` is not a valid identifier"))]
#[case(Error::not_found("unexpected"))]
#[actix_web::test]
async fn list_failures_are_bare_500(#[case] error: Error) {
    let failure = FundListFailure::new(error);
    let response = failure.error_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_bytes(response).await.is_empty());
}

#[rstest]
#[actix_web::test]
async fn list_failure_without_trace_id_omits_header() {
    let response = FundListFailure::new(Error::internal("boom")).error_response();
    assert!(trace_header(&response).is_none());
}

#[rstest]
fn display_keeps_domain_message() {
    let failure = FundListFailure::new(Error::internal("store offline"));
    assert_eq!(failure.to_string(), "fund listing failed: store offline");
    assert_eq!(failure.error().code(), ErrorCode::InternalError);
}
