//! Tests for the fund read service.

use std::sync::Arc;

use super::*;
use crate::domain::{ErrorCode, FundFilter};
use crate::domain::ports::{MockAccountRepository, MockFundRepository};
use chrono::Utc;
use mockall::predicate::eq;

fn make_service(
    funds: MockFundRepository,
    accounts: MockAccountRepository,
) -> FundsQueryService<MockFundRepository, MockAccountRepository> {
    FundsQueryService::new(Arc::new(funds), Arc::new(accounts))
}

fn fund(publisher_id: RecordId, category: &str) -> Fund {
    Fund {
        id: RecordId::random(),
        title: "Community garden".to_owned(),
        description: "Raised beds for the block".to_owned(),
        category: category.to_owned(),
        publisher_id,
        goal: Some(800),
        created_at: Utc::now(),
    }
}

fn publisher(id: RecordId, first_name: &str) -> PublisherSummary {
    PublisherSummary {
        id,
        first_name: first_name.to_owned(),
        last_name: "Okafor".to_owned(),
        email: format!("{}@example.org", first_name.to_lowercase()),
        profile_image: None,
    }
}

#[tokio::test]
async fn get_one_fund_resolves_publisher() {
    let publisher_id = RecordId::random();
    let stored = fund(publisher_id, "community");
    let fund_id = stored.id;
    let summary = publisher(publisher_id, "Chidi");

    let mut funds = MockFundRepository::new();
    funds
        .expect_find_by_id()
        .with(eq(fund_id))
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut accounts = MockAccountRepository::new();
    let expected_summary = summary.clone();
    accounts
        .expect_find_publishers()
        .withf(move |ids| ids == [publisher_id])
        .times(1)
        .return_once(move |_| Ok(vec![summary]));

    let service = make_service(funds, accounts);
    let published = service
        .get_one_fund(&fund_id.to_string())
        .await
        .expect("fund found");

    assert_eq!(published.fund.id, fund_id);
    assert_eq!(published.publisher, Some(expected_summary));
}

#[tokio::test]
async fn get_one_fund_leaves_dangling_publisher_empty() {
    let stored = fund(RecordId::random(), "health");
    let fund_id = stored.id;

    let mut funds = MockFundRepository::new();
    funds
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(stored)));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_publishers()
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(funds, accounts);
    let published = service
        .get_one_fund(&fund_id.to_string())
        .await
        .expect("fund found");
    assert!(published.publisher.is_none());
}

#[tokio::test]
async fn get_one_fund_reports_missing_fund() {
    let mut funds = MockFundRepository::new();
    funds.expect_find_by_id().return_once(|_| Ok(None));
    let mut accounts = MockAccountRepository::new();
    accounts.expect_find_publishers().never();

    let service = make_service(funds, accounts);
    let error = service
        .get_one_fund(&RecordId::random().to_string())
        .await
        .expect_err("missing fund");
    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn get_one_fund_rejects_malformed_identifier_without_touching_store() {
    let mut funds = MockFundRepository::new();
    funds.expect_find_by_id().never();

    let service = make_service(funds, MockAccountRepository::new());
    let error = service
        .get_one_fund("507f1f77bcf86cd799439011")
        .await
        .expect_err("malformed id");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&json!("invalid_identifier"))
    );
}

#[tokio::test]
async fn get_one_fund_maps_store_failures() {
    let mut funds = MockFundRepository::new();
    funds
        .expect_find_by_id()
        .return_once(|_| Err(FundRepositoryError::connection("pool timed out")));

    let service = make_service(funds, MockAccountRepository::new());
    let error = service
        .get_one_fund(&RecordId::random().to_string())
        .await
        .expect_err("store down");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn get_funds_resolves_publishers_in_one_batch() {
    let first_publisher = RecordId::random();
    let second_publisher = RecordId::random();
    let stored = vec![
        fund(first_publisher, "education"),
        fund(second_publisher, "education"),
        fund(first_publisher, "education"),
    ];
    let expected_ids: Vec<RecordId> = stored.iter().map(|item| item.id).collect();

    let mut funds = MockFundRepository::new();
    funds
        .expect_find_matching()
        .withf(|filter| filter.categories() == Some(&["education".to_owned()][..]))
        .times(1)
        .return_once(move |_| Ok(stored));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_publishers()
        .withf(move |ids| ids == [first_publisher, second_publisher])
        .times(1)
        .return_once(move |_| Ok(vec![publisher(second_publisher, "Tahani")]));

    let service = make_service(funds, accounts);
    let published = service
        .get_funds(FundFilterParams {
            category: vec!["education".to_owned()],
            ..FundFilterParams::default()
        })
        .await
        .expect("list funds");

    let ids: Vec<RecordId> = published.iter().map(|item| item.fund.id).collect();
    assert_eq!(ids, expected_ids);
    let names: Vec<Option<&str>> = published
        .iter()
        .map(|item| item.publisher.as_ref().map(|p| p.first_name.as_str()))
        .collect();
    assert_eq!(names, vec![None, Some("Tahani"), None]);
}

#[tokio::test]
async fn get_funds_skips_lookup_when_nothing_matches() {
    let mut funds = MockFundRepository::new();
    funds
        .expect_find_matching()
        .withf(FundFilter::is_universal)
        .return_once(|_| Ok(Vec::new()));
    let mut accounts = MockAccountRepository::new();
    accounts.expect_find_publishers().never();

    let service = make_service(funds, accounts);
    let published = service
        .get_funds(FundFilterParams::default())
        .await
        .expect("empty list");
    assert!(published.is_empty());
}

#[tokio::test]
async fn get_funds_reports_invalid_filters() {
    let mut funds = MockFundRepository::new();
    funds.expect_find_matching().never();

    let service = make_service(funds, MockAccountRepository::new());
    let error = service
        .get_funds(FundFilterParams {
            current_date: Some("2024-01-01".to_owned()),
            last_date: Some("soon".to_owned()),
            ..FundFilterParams::default()
        })
        .await
        .expect_err("bad date");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("code")),
        Some(&json!("invalid_date"))
    );
}

#[tokio::test]
async fn get_funds_maps_publisher_lookup_failures() {
    let stored = vec![fund(RecordId::random(), "sports")];
    let mut funds = MockFundRepository::new();
    funds.expect_find_matching().return_once(move |_| Ok(stored));
    let mut accounts = MockAccountRepository::new();
    accounts
        .expect_find_publishers()
        .return_once(|_| Err(AccountRepositoryError::query("relation missing")));

    let service = make_service(funds, accounts);
    let error = service
        .get_funds(FundFilterParams::default())
        .await
        .expect_err("lookup failed");
    assert_eq!(error.code(), ErrorCode::InternalError);
}
